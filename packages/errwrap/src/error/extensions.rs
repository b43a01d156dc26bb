//! Wrapping straight from `Result`

use super::types::{BoxError, Wrapped};

/// Wrap the error side of a `Result`. `Ok` values pass through untouched.
pub trait ResultExt<T> {
    /// Wrap the error, capturing the caller's stack
    fn wrap_err(self) -> Result<T, Wrapped>;

    /// Wrap the error with an explicit cause built on the error path only
    fn wrap_err_caused_by<C, F>(self, cause: F) -> Result<T, Wrapped>
    where
        C: Into<BoxError>,
        F: FnOnce() -> C;
}

impl<T, E: Into<BoxError>> ResultExt<T> for Result<T, E> {
    #[inline(never)]
    fn wrap_err(self) -> Result<T, Wrapped> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Wrapped::builder(err).build(Self::wrap_err as usize)),
        }
    }

    #[inline(never)]
    fn wrap_err_caused_by<C, F>(self, cause: F) -> Result<T, Wrapped>
    where
        C: Into<BoxError>,
        F: FnOnce() -> C,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Wrapped::builder(err)
                .cause(cause())
                .build(Self::wrap_err_caused_by::<C, F> as usize)),
        }
    }
}
