//! Display and trait implementations for Wrapped

use super::types::Wrapped;
use crate::stack::Verb;
use std::error::Error as StdError;
use std::fmt;

/// Rendered in place of the cause by `{:+}` when none was attached
pub const NO_CAUSE: &str = "<no cause recorded>";

impl Wrapped {
    /// Format with a single verb, honoring the `+` flag of the surrounding
    /// format string. `s`, `q` and `v` render the message; `+v` appends the
    /// cause. `d` and `n` render nothing.
    #[must_use]
    pub fn display(&self, verb: Verb) -> WrappedDisplay<'_> {
        WrappedDisplay {
            wrapped: self,
            verb,
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, verb: Verb, plus: bool) -> fmt::Result {
        match verb {
            Verb::Value if plus => {
                write!(f, "{} (caused by: ", self.inner.error)?;
                match &self.inner.cause {
                    Some(cause) => write!(f, "{cause}")?,
                    None => f.write_str(NO_CAUSE)?,
                }
                f.write_str(")")
            }
            Verb::Short | Verb::Quote | Verb::Value => write!(f, "{}", self.inner.error),
            Verb::Line | Verb::Name => Ok(()),
        }
    }
}

/// Display adapter returned by [`Wrapped::display`]
pub struct WrappedDisplay<'a> {
    wrapped: &'a Wrapped,
    verb: Verb,
}

impl fmt::Display for WrappedDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plus = f.sign_plus();
        self.wrapped.render(f, self.verb, plus)
    }
}

/// `{}` renders the message, `{:+}` the message and its cause
impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plus = f.sign_plus();
        self.render(f, Verb::Value, plus)
    }
}

impl fmt::Debug for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("error", &self.inner.error)
            .field("cause", &self.inner.cause)
            .field("stack_trace", &self.inner.trace.frames())
            .finish()
    }
}

impl StdError for Wrapped {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.inner.cause {
            Some(cause) => Some(cause.as_ref() as &(dyn StdError + 'static)),
            None => Some(self.inner.error.as_ref() as &(dyn StdError + 'static)),
        }
    }
}
