//! Error wrapping with explicit causes and captured stack traces
//!
//! Provides:
//! - Idempotent wrapping of arbitrary errors into a [`Wrapped`] chain
//! - Explicit cause attachment independent of the underlying error
//! - Automatic stack capture at the wrap site
//! - Multi-verb rendering and logging of wrapped errors

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
pub mod types;

pub use constructors::{original_err, wrap, wrap_opt, WrapBuilder};
pub use display::{WrappedDisplay, NO_CAUSE};
pub use extensions::ResultExt;
pub use logging::LoggingTransformer;
pub use types::{BoxError, Wrapped};
