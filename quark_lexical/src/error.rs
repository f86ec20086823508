//! Contains all kinds of lexical errors that can occur while tokenizing the source code.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use quark_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

/// The source code contains an unclosed `/*` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnterminatedComment {
    /// The span of the unclosed `/*` that starts the comment.
    pub span: Span,
}

impl Display for UnterminatedComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an unclosed `/*` comment"),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// A string literal is not closed by a `"` before the end of the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnterminatedString {
    /// The span from the opening `"` to the end of the source code.
    pub span: Span,
}

impl Display for UnterminatedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an unterminated string literal"),
            SourceCodeDisplay::new(&self.span, Some("add a closing `\"`"))
        )
    }
}

/// A character literal is not of the form `'c'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnterminatedChar {
    /// The span of the opening `'` and the character following it.
    pub span: Span,
}

impl Display for UnterminatedChar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found a malformed character literal"),
            SourceCodeDisplay::new(
                &self.span,
                Some("a character literal is exactly one character enclosed in `'`")
            )
        )
    }
}

/// A character that cannot start any token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCharacter {
    /// The span of the offending character.
    pub span: Span,
}

impl Display for InvalidCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!("found an invalid character `{}`", self.span.str())
            ),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// Is an enumeration containing all kinds of lexical errors that can occur while tokenizing the
/// source code.
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner, From, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("{0}")]
    UnterminatedComment(UnterminatedComment),

    #[error("{0}")]
    UnterminatedString(UnterminatedString),

    #[error("{0}")]
    UnterminatedChar(UnterminatedChar),

    #[error("{0}")]
    InvalidCharacter(InvalidCharacter),
}

impl Error {
    /// Gets the span of the source code the error points at.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::UnterminatedComment(error) => &error.span,
            Self::UnterminatedString(error) => &error.span,
            Self::UnterminatedChar(error) => &error.span,
            Self::InvalidCharacter(error) => &error.span,
        }
    }
}
