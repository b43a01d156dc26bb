//! Wrapping entry points and the modifier builder
//!
//! Every public function here that captures a stack passes its own address
//! down to the capture. Frames of those functions are dropped by address, not
//! counted, so a frame lost to a tail call cannot shift the trace onto the
//! caller's caller.

use super::types::{BoxError, Wrapped, WrappedInner};
use crate::stack::StackCapture;
use std::error::Error as StdError;
use std::sync::Arc;

/// Wrap `err`, capturing the caller's stack.
///
/// If `err` already is a [`Wrapped`] it is returned unchanged.
#[inline(never)]
pub fn wrap<E: Into<BoxError>>(err: E) -> Wrapped {
    Wrapped::builder(err).build(wrap::<E> as usize)
}

/// Like [`wrap`], passing `None` through untouched
#[inline(never)]
#[allow(clippy::manual_map)]
pub fn wrap_opt<E: Into<BoxError>>(err: Option<E>) -> Option<Wrapped> {
    // no closure: it would add a frame between the caller and the capture
    match err {
        Some(err) => Some(Wrapped::builder(err).build(wrap_opt::<E> as usize)),
        None => None,
    }
}

/// One level of unwrapping: the wrapped error of a [`Wrapped`], otherwise
/// `err` itself
#[must_use]
pub fn original_err<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    match err.downcast_ref::<Wrapped>() {
        Some(wrapped) => wrapped.original(),
        None => err,
    }
}

impl Wrapped {
    /// Start wrapping `err` with modifiers
    pub fn builder<E: Into<BoxError>>(err: E) -> WrapBuilder {
        WrapBuilder {
            error: err.into(),
            cause: None,
            trace: None,
            modified: false,
        }
    }
}

/// Modifiers applied to a wrap, in call order.
///
/// Setting a field twice keeps the last value. Any modifier call makes the
/// wrap build a new chain even when the error is already [`Wrapped`].
#[must_use]
pub struct WrapBuilder {
    error: BoxError,
    cause: Option<BoxError>,
    trace: Option<StackCapture>,
    modified: bool,
}

impl WrapBuilder {
    /// Attach an explicit cause
    pub fn cause<C: Into<BoxError>>(mut self, cause: C) -> Self {
        self.cause = Some(cause.into());
        self.modified = true;
        self
    }

    /// Capture the stack here, at the caller of this method.
    ///
    /// Useful when wrapping happens inside a helper: call this from the frame
    /// that should appear first.
    #[inline(never)]
    pub fn auto_stack_trace(mut self) -> Self {
        self.trace = Some(StackCapture::below(&[Self::auto_stack_trace as usize], 0));
        self.modified = true;
        self
    }

    /// Use an existing capture instead of taking one
    pub fn stack_trace(mut self, capture: StackCapture) -> Self {
        self.trace = Some(capture);
        self.modified = true;
        self
    }

    /// Build the chain, capturing the caller's stack unless a modifier
    /// already supplied one
    #[inline(never)]
    #[must_use]
    pub fn finish(self) -> Wrapped {
        self.build(Self::finish as usize)
    }

    /// `entry` is the address of the public function the caller called
    #[inline(never)]
    pub(crate) fn build(self, entry: usize) -> Wrapped {
        let Self {
            error,
            cause,
            trace,
            modified,
        } = self;

        let error = if modified {
            error
        } else {
            match error.downcast::<Wrapped>() {
                Ok(wrapped) => return *wrapped,
                Err(error) => error,
            }
        };

        let trace = match trace {
            Some(trace) => trace,
            None => StackCapture::below(&[Self::build as usize, entry], 0),
        };

        Wrapped {
            inner: Arc::new(WrappedInner {
                error,
                cause,
                trace,
            }),
        }
    }
}
