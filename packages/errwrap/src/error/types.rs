//! Core wrapped error type

use crate::stack::{StackCapture, StackTrace};
use std::error::Error as StdError;
use std::sync::Arc;

/// Boxed, thread-safe error accepted everywhere an error is wrapped
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An error augmented with an optional explicit cause and a stack capture.
///
/// Cloning is cheap and yields the same chain; see [`Wrapped::ptr_eq`].
#[derive(Clone)]
pub struct Wrapped {
    pub(super) inner: Arc<WrappedInner>,
}

pub(super) struct WrappedInner {
    /// The wrapped error
    pub error: BoxError,
    /// Explicitly attached cause, if any
    pub cause: Option<BoxError>,
    /// Stack captured at the wrap site
    pub trace: StackCapture,
}

impl Wrapped {
    /// The wrapped error, one level down
    #[must_use]
    pub fn original(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.error.as_ref()
    }

    /// The explicitly attached cause.
    ///
    /// `None` when no cause was set; the wrapped error is never reported here.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.inner.cause.as_deref()
    }

    /// Frames captured when this chain was built, innermost first
    #[must_use]
    pub fn stack_trace(&self) -> StackTrace {
        self.inner.trace.stack_trace()
    }

    /// The raw capture behind [`Wrapped::stack_trace`]
    #[must_use]
    pub fn stack_capture(&self) -> &StackCapture {
        &self.inner.trace
    }

    /// Whether both values are the same chain
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    /// Whether `target` appears in the wrapped error's chain.
    ///
    /// Walks the wrapped error and its `source()` chain, looking through
    /// nested [`Wrapped`] values, and compares by value.
    pub fn is<E>(&self, target: &E) -> bool
    where
        E: StdError + PartialEq + 'static,
    {
        self.chain()
            .any(|err| err.downcast_ref::<E>() == Some(target))
    }

    /// First error of type `E` in the wrapped error's chain
    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.chain().find_map(|err| err.downcast_ref::<E>())
    }

    fn chain(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> + '_ {
        let first: &(dyn StdError + 'static) = self.original();
        std::iter::successors(Some(first), |&err| match err.downcast_ref::<Self>() {
            Some(wrapped) => Some(wrapped.original() as &(dyn StdError + 'static)),
            None => err.source(),
        })
    }
}
