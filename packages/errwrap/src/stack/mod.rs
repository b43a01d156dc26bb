//! Call-stack capture with deferred symbol resolution
//!
//! A [`StackCapture`] records raw return addresses only. Names, files and
//! lines are resolved through a [`Symbolize`] implementation each time a
//! [`Frame`] or [`StackTrace`] is formatted.

pub mod frame;
pub mod trace;
pub mod verb;

pub use frame::{Frame, FrameDisplay, Symbol, Symbolize, System, UNKNOWN};
pub use trace::{StackTrace, TraceDisplay};
pub use verb::{UnknownVerb, Verb};

/// Most frames a single capture records. Deeper stacks are truncated.
pub const MAX_DEPTH: usize = 32;

/// An immutable snapshot of return addresses, innermost first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackCapture {
    frames: Box<[Frame]>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Walker,
    Library,
    Caller,
}

impl StackCapture {
    /// Capture the current call stack.
    ///
    /// With `skip == 0` the first recorded frame is the direct caller of
    /// `new`; every increment drops one more caller. At most [`MAX_DEPTH`]
    /// frames are kept. Without the `full-backtrace` feature nothing is
    /// recorded.
    #[inline(never)]
    #[must_use]
    pub fn new(skip: usize) -> Self {
        Self::below(&[Self::new as usize], skip)
    }

    /// Capture the stack above a run of library functions.
    ///
    /// `library` holds the start addresses of the functions between the
    /// caller and this one. Their frames are dropped wherever they appear
    /// directly above this function; a function missing from the stack
    /// (tail-called away) is simply not found. `skip` then drops further
    /// callers.
    #[inline(never)]
    pub(crate) fn below(library: &[usize], skip: usize) -> Self {
        if !cfg!(feature = "full-backtrace") {
            return Self::default();
        }

        let marker = Self::below as usize;
        let mut phase = Phase::Walker;
        let mut walker = Vec::new();
        let mut skipped = 0;
        let mut frames = Vec::with_capacity(MAX_DEPTH);

        backtrace::trace(|frame| {
            let ip = frame.ip() as usize;
            let symbol = frame.symbol_address() as usize;
            match phase {
                Phase::Walker => {
                    if symbol == marker {
                        phase = Phase::Library;
                    } else {
                        walker.push(ip);
                    }
                    return true;
                }
                Phase::Library if library.contains(&symbol) => return true,
                Phase::Library => phase = Phase::Caller,
                Phase::Caller => {}
            }
            if skipped < skip {
                skipped += 1;
                return true;
            }
            frames.push(Frame::from_addr(ip));
            frames.len() < MAX_DEPTH
        });

        if phase == Phase::Walker {
            log::debug!("capture frame not found in stack walk; recording from the innermost frame");
            return walker
                .into_iter()
                .skip(skip)
                .map(Frame::from_addr)
                .collect();
        }
        Self {
            frames: frames.into_boxed_slice(),
        }
    }

    /// Build a capture from known frames, truncated to [`MAX_DEPTH`]
    #[must_use]
    pub fn from_frames<I: IntoIterator<Item = Frame>>(frames: I) -> Self {
        frames.into_iter().take(MAX_DEPTH).collect()
    }

    /// The recorded frames, innermost first
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of recorded frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// A formatting view over the recorded frames
    #[must_use]
    pub fn stack_trace(&self) -> StackTrace {
        StackTrace::new(self.frames.to_vec())
    }
}

impl FromIterator<Frame> for StackCapture {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().take(MAX_DEPTH).collect(),
        }
    }
}

#[cfg(all(test, feature = "full-backtrace"))]
mod tests {
    use super::*;
    use std::hint::black_box;

    #[inline(never)]
    fn library_entry() -> StackCapture {
        black_box(StackCapture::below(&[library_entry as usize], 0))
    }

    #[inline(never)]
    fn calls_library() -> StackCapture {
        black_box(library_entry())
    }

    // Same shape as a library entry point whose frame was tail-called away
    #[inline(never)]
    fn entry_frame_missing() -> StackCapture {
        black_box(StackCapture::below(&[library_entry as usize], 0))
    }

    fn first_name(capture: &StackCapture) -> String {
        capture.frames().first().map(|frame| frame.name()).unwrap_or_default()
    }

    #[test]
    fn library_frames_are_dropped_by_address() {
        let name = first_name(&calls_library());
        assert!(name.ends_with("tests::calls_library"), "{name}");
    }

    #[test]
    fn missing_library_frame_keeps_caller() {
        let name = first_name(&entry_frame_missing());
        assert!(name.ends_with("tests::entry_frame_missing"), "{name}");
    }

    #[test]
    fn skip_counts_callers_after_library() {
        let capture = black_box(StackCapture::below(&[], 0));
        let skipped = black_box(StackCapture::below(&[], 1));
        assert!(first_name(&capture).ends_with("tests::skip_counts_callers_after_library"));
        assert_ne!(first_name(&skipped), first_name(&capture));
    }
}
