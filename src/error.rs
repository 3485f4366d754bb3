use std::{borrow::Cow, error::Error, fmt};

/// A failed match.
///
/// Failures are descriptive rather than typed: a message plus the input position
/// at which the failing parser noticed the problem. Combinators never report a
/// cursor alongside a failure, so callers resume from the cursor they passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    position: usize,
    message: Cow<'static, str>,
}

impl ParseError {
    #[inline]
    pub fn new(position: usize, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }

    /// Offset into the input where the failure was detected.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Keeps the message, prefixing it with the combinator that gave up.
    pub(crate) fn context(self, action: &'static str) -> Self {
        Self {
            position: self.position,
            message: format!("{action}: {msg}", msg = self.message).into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{msg} (at position {pos})",
            msg = self.message,
            pos = self.position
        )
    }
}

impl Error for ParseError {}
