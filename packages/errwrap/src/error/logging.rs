//! Structured logging of wrapped errors
//!
//! Provides env_logger-based initialization and helpers that emit wrapped
//! errors together with their causes and captured stacks through the
//! standard log crate.

use super::types::Wrapped;
use log::{error, info, warn};
use std::error::Error as StdError;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging entry points using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging (call once at application startup)
    ///
    /// Levels come from `RUST_LOG`:
    /// - `RUST_LOG=error` - only reported errors
    /// - `RUST_LOG=errwrap=trace` - also frames that fail to resolve
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            let initialized = env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .try_init()
                .is_ok();
            if initialized {
                info!("Structured logging initialized");
            }
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a wrapped error with its cause and the multi-line stack trace
    pub fn log_wrapped(err: &Wrapped) {
        error!("{err:+}{:+}", err.stack_trace());
    }

    /// Log an error followed by every error in its `source()` chain
    pub fn log_cause_chain(err: &(dyn StdError + 'static)) {
        warn!("{err}");
        let mut source = err.source();
        while let Some(cause) = source {
            warn!("  caused by: {cause}");
            source = cause.source();
        }
    }
}
