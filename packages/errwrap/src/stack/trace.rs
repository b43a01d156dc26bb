//! Ordered views over captured frames

use super::frame::{Frame, Symbolize, System};
use super::verb::Verb;
use serde::Serialize;
use std::fmt;

/// Frames from innermost (most recent call) to outermost.
///
/// Formatting:
///
/// - `{}` lists `file:line` for each frame: `[a.rs:10 b.rs:20]`
/// - `{:+}` prints every frame as `\nfunction\n\tpath:line`
/// - `{:#}` dumps the raw frame addresses
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StackTrace {
    frames: Vec<Frame>,
}

impl StackTrace {
    /// Build a trace from frames ordered innermost first
    #[must_use]
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// The frames, innermost first
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frames were captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate over the frames, innermost first
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Format with a single verb. Only `s` and `v` produce output.
    #[must_use]
    pub fn display(&self, verb: Verb) -> TraceDisplay<'_> {
        TraceDisplay {
            trace: self,
            verb,
            symbols: &System,
        }
    }

    /// Like [`StackTrace::display`] but resolving through `symbols`
    #[must_use]
    pub fn display_with<'a>(&'a self, verb: Verb, symbols: &'a dyn Symbolize) -> TraceDisplay<'a> {
        TraceDisplay {
            trace: self,
            verb,
            symbols,
        }
    }

    fn render(
        &self,
        f: &mut fmt::Formatter<'_>,
        verb: Verb,
        symbols: &dyn Symbolize,
    ) -> fmt::Result {
        let plus = f.sign_plus();
        match verb {
            Verb::Value if plus => {
                for frame in &self.frames {
                    f.write_str("\n")?;
                    symbols.resolve(*frame).render(f, verb, true)?;
                }
                Ok(())
            }
            Verb::Value if f.alternate() => write!(f, "{:?}", self.frames),
            Verb::Value | Verb::Short => {
                f.write_str("[")?;
                for (i, frame) in self.frames.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    symbols.resolve(*frame).render(f, verb, plus)?;
                }
                f.write_str("]")
            }
            Verb::Quote | Verb::Line | Verb::Name => Ok(()),
        }
    }
}

impl fmt::Debug for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.frames).finish()
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, Verb::Value, &System)
    }
}

impl From<Vec<Frame>> for StackTrace {
    fn from(frames: Vec<Frame>) -> Self {
        Self::new(frames)
    }
}

impl FromIterator<Frame> for StackTrace {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for StackTrace {
    type Item = Frame;
    type IntoIter = std::vec::IntoIter<Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl<'a> IntoIterator for &'a StackTrace {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Display adapter returned by [`StackTrace::display`]
pub struct TraceDisplay<'a> {
    trace: &'a StackTrace,
    verb: Verb,
    symbols: &'a dyn Symbolize,
}

impl fmt::Display for TraceDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.trace.render(f, self.verb, self.symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::frame::Symbol;

    struct Fixed;

    impl Symbolize for Fixed {
        fn resolve(&self, frame: Frame) -> Symbol {
            match frame.addr() {
                1 => Symbol::new("app::inner", "/src/app/inner.rs", 10),
                2 => Symbol::new("app::outer", "/src/app/outer.rs", 20),
                _ => Symbol::default(),
            }
        }
    }

    fn trace() -> StackTrace {
        [1, 2].into_iter().map(Frame::from_addr).collect()
    }

    #[test]
    fn list_forms() {
        let trace = trace();
        assert_eq!(
            format!("{}", trace.display_with(Verb::Value, &Fixed)),
            "[inner.rs:10 outer.rs:20]"
        );
        assert_eq!(
            format!("{}", trace.display_with(Verb::Short, &Fixed)),
            "[inner.rs outer.rs]"
        );
    }

    #[test]
    fn plus_short_stays_in_list() {
        assert_eq!(
            format!("{:+}", trace().display_with(Verb::Short, &Fixed)),
            "[app::inner\n\t/src/app/inner.rs app::outer\n\t/src/app/outer.rs]"
        );
    }

    #[test]
    fn plus_value_is_multi_line() {
        assert_eq!(
            format!("{:+}", trace().display_with(Verb::Value, &Fixed)),
            "\napp::inner\n\t/src/app/inner.rs:10\napp::outer\n\t/src/app/outer.rs:20"
        );
    }

    #[test]
    fn alternate_dumps_raw_frames() {
        assert_eq!(
            format!("{:#}", trace().display_with(Verb::Value, &Fixed)),
            "[Frame(0x1), Frame(0x2)]"
        );
    }

    #[test]
    fn other_verbs_render_nothing() {
        for verb in [Verb::Line, Verb::Name, Verb::Quote] {
            assert_eq!(format!("{}", trace().display_with(verb, &Fixed)), "");
        }
    }

    #[test]
    fn empty_trace() {
        let trace = StackTrace::default();
        assert_eq!(format!("{}", trace.display_with(Verb::Value, &Fixed)), "[]");
        assert_eq!(format!("{:+}", trace.display_with(Verb::Value, &Fixed)), "");
    }
}
