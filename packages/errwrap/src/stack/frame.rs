//! Single stack frames and their lazy symbolication

use super::verb::Verb;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::ffi::c_void;
use std::fmt;
use std::path::{Path, PathBuf};

/// Placeholder rendered for anything that could not be resolved
pub const UNKNOWN: &str = "unknown";

/// One captured return address.
///
/// A frame stores the address exactly as the stack walk reported it. Symbol
/// information (function name, file, line) is looked up again every time the
/// frame is formatted; nothing is cached.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame(usize);

impl Frame {
    /// Wrap a raw return address
    #[must_use]
    pub const fn from_addr(addr: usize) -> Self {
        Self(addr)
    }

    /// The raw return address
    #[must_use]
    pub const fn addr(self) -> usize {
        self.0
    }

    /// The program counter of the call instruction.
    ///
    /// Return addresses point just past the call, so symbol lookups are keyed
    /// on `addr - 1`.
    #[must_use]
    pub const fn pc(self) -> usize {
        self.0.saturating_sub(1)
    }

    /// Resolve against the process symbol table
    #[must_use]
    pub fn symbol(self) -> Symbol {
        System.resolve(self)
    }

    /// Full path of the source file, or `"unknown"`
    #[must_use]
    pub fn file(self) -> String {
        self.symbol().file().into_owned()
    }

    /// Source line, or `0`
    #[must_use]
    pub fn line(self) -> u32 {
        self.symbol().line()
    }

    /// Fully qualified function name, or `"unknown"`
    #[must_use]
    pub fn name(self) -> String {
        self.symbol().name().to_owned()
    }

    /// Format this frame with a single verb, honoring the `+` flag of the
    /// surrounding format string
    #[must_use]
    pub fn display(self, verb: Verb) -> FrameDisplay<'static> {
        FrameDisplay {
            frame: self,
            verb,
            symbols: &System,
        }
    }

    /// Like [`Frame::display`] but resolving through `symbols`
    #[must_use]
    pub fn display_with(self, verb: Verb, symbols: &dyn Symbolize) -> FrameDisplay<'_> {
        FrameDisplay {
            frame: self,
            verb,
            symbols,
        }
    }

    /// Single-line text form: `"<name> <file>:<line>"`, or `"unknown"` when
    /// the function cannot be resolved at all
    #[must_use]
    pub fn to_text(self) -> String {
        self.to_text_with(&System)
    }

    /// Like [`Frame::to_text`] but resolving through `symbols`
    #[must_use]
    pub fn to_text_with(self, symbols: &dyn Symbolize) -> String {
        let symbol = symbols.resolve(self);
        if !symbol.is_resolved() {
            return UNKNOWN.to_owned();
        }
        format!("{} {}:{}", symbol.name(), symbol.file(), symbol.line())
    }
}

impl From<usize> for Frame {
    fn from(addr: usize) -> Self {
        Self(addr)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Frame")
            .field(&format_args!("{:#x}", self.0))
            .finish()
    }
}

/// `{}` renders `file:line`, `{:+}` renders `function\n\tpath:line`
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plus = f.sign_plus();
        System.resolve(*self).render(f, Verb::Value, plus)
    }
}

impl Serialize for Frame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

/// Display adapter returned by [`Frame::display`]
pub struct FrameDisplay<'a> {
    frame: Frame,
    verb: Verb,
    symbols: &'a dyn Symbolize,
}

impl fmt::Display for FrameDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plus = f.sign_plus();
        self.symbols.resolve(self.frame).render(f, self.verb, plus)
    }
}

/// Symbol information for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Symbol {
    name: Option<String>,
    file: Option<PathBuf>,
    line: Option<u32>,
}

impl Symbol {
    /// A fully resolved symbol
    pub fn new(name: impl Into<String>, file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            name: Some(name.into()),
            file: Some(file.into()),
            line: Some(line),
        }
    }

    /// Whether the owning function was found
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.name.is_some()
    }

    /// Fully qualified function name, or `"unknown"`
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN)
    }

    /// Function name with its path and crate prefix removed
    #[must_use]
    pub fn short_name(&self) -> &str {
        let name = self.name();
        let name = name.rsplit_once('/').map_or(name, |(_, tail)| tail);
        name.split_once("::").map_or(name, |(_, tail)| tail)
    }

    /// Full source path, or `"unknown"`
    #[must_use]
    pub fn file(&self) -> Cow<'_, str> {
        self.file
            .as_deref()
            .map_or(Cow::Borrowed(UNKNOWN), Path::to_string_lossy)
    }

    /// Last component of the source path, or `"unknown"`
    #[must_use]
    pub fn file_name(&self) -> Cow<'_, str> {
        match self.file.as_deref() {
            Some(path) => path
                .file_name()
                .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy()),
            None => Cow::Borrowed(UNKNOWN),
        }
    }

    /// Source line, or `0`
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line.unwrap_or(0)
    }

    pub(crate) fn render(&self, f: &mut fmt::Formatter<'_>, verb: Verb, plus: bool) -> fmt::Result {
        match verb {
            Verb::Short if plus => write!(f, "{}\n\t{}", self.name(), self.file()),
            Verb::Short => f.write_str(&self.file_name()),
            Verb::Line => write!(f, "{}", self.line()),
            Verb::Name => f.write_str(self.short_name()),
            Verb::Value => {
                self.render(f, Verb::Short, plus)?;
                f.write_str(":")?;
                self.render(f, Verb::Line, plus)
            }
            Verb::Quote => Ok(()),
        }
    }
}

/// Source of symbol information for captured frames.
///
/// Implementations must degrade to an unresolved [`Symbol`] rather than fail.
pub trait Symbolize: Send + Sync {
    /// Look up the function, file and line owning `frame`
    fn resolve(&self, frame: Frame) -> Symbol;
}

/// The running process's own debug information, read through `backtrace`
#[derive(Debug, Clone, Copy, Default)]
pub struct System;

impl Symbolize for System {
    fn resolve(&self, frame: Frame) -> Symbol {
        let mut symbol = Symbol::default();
        // `backtrace::resolve` applies the `addr - 1` adjustment itself
        backtrace::resolve(frame.addr() as *mut c_void, |sym| {
            if symbol.name.is_some() {
                return;
            }
            symbol.name = sym.name().map(|name| format!("{name:#}"));
            symbol.file = sym.filename().map(Path::to_path_buf);
            symbol.line = sym.lineno();
        });
        if !symbol.is_resolved() {
            log::trace!("no symbol for frame {:#x}", frame.addr());
        }
        symbol
    }
}
