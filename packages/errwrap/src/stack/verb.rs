//! Formatting verbs understood by frames, traces and wrapped errors

use std::fmt;
use thiserror::Error;

/// A single formatting verb.
///
/// Verbs combine with the `+` flag of the surrounding format string, so
/// `format!("{:+}", frame.display(Verb::Short))` is the "plus short" form.
///
/// | verb | frame | wrapped error |
/// |---|---|---|
/// | `s` | base file name (`+`: function name, newline, tab, full path) | message |
/// | `q` | nothing | message |
/// | `d` | line number | nothing |
/// | `n` | function name without its crate prefix | nothing |
/// | `v` | `s:d` (`+`: `+s:d`) | message (`+`: message and cause) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `s`
    Short,
    /// `q`
    Quote,
    /// `d`
    Line,
    /// `n`
    Name,
    /// `v`
    Value,
}

impl Verb {
    /// The character this verb is written as
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Short => 's',
            Self::Quote => 'q',
            Self::Line => 'd',
            Self::Name => 'n',
            Self::Value => 'v',
        }
    }
}

/// Returned when a character does not name a [`Verb`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown formatting verb '{0}'")]
pub struct UnknownVerb(pub char);

impl TryFrom<char> for Verb {
    type Error = UnknownVerb;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            's' => Ok(Self::Short),
            'q' => Ok(Self::Quote),
            'd' => Ok(Self::Line),
            'n' => Ok(Self::Name),
            'v' => Ok(Self::Value),
            other => Err(UnknownVerb(other)),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
