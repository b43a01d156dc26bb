//! Error wrapping with explicit causes and captured call stacks
//!
//! This crate provides:
//! - [`wrap`] and [`Wrapped::builder`] to annotate any error with a stack
//!   captured at the call site and an optional explicit cause
//! - [`StackCapture`], [`Frame`] and [`StackTrace`] for capturing return
//!   addresses and resolving them lazily into function, file and line
//! - A small verb language ([`Verb`]) for rendering frames, traces and
//!   wrapped errors
//!
//! ```
//! use errwrap::{wrap, Wrapped};
//!
//! let err = Wrapped::builder("disk full").cause("io timeout").finish();
//! assert_eq!(format!("{err}"), "disk full");
//! assert_eq!(format!("{err:+}"), "disk full (caused by: io timeout)");
//!
//! // wrapping again without modifiers is a no-op
//! assert!(Wrapped::ptr_eq(&wrap(err.clone()), &err));
//! ```

pub mod error;
pub mod stack;

pub use error::{
    original_err, wrap, wrap_opt, BoxError, LoggingTransformer, ResultExt, WrapBuilder, Wrapped,
    WrappedDisplay, NO_CAUSE,
};
pub use stack::{
    Frame, FrameDisplay, StackCapture, StackTrace, Symbol, Symbolize, System, TraceDisplay,
    UnknownVerb, Verb, MAX_DEPTH, UNKNOWN,
};
