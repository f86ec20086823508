//! Contains all kinds of syntactic errors that can occur while parsing the token stream.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use quark_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};
use quark_lexical::token::Token;

/// A parenthesis is never closed, or a `)` closes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnbalancedParentheses {
    /// The span of the unclosed `(`, or of the stray `)`.
    pub span: Span,

    /// The token found where the closing `)` was expected; `None` for a stray `)`.
    pub found: Option<Token>,
}

impl Display for UnbalancedParentheses {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.found {
            Some(found) => write!(
                f,
                "{}\n{}",
                Message::new(
                    Severity::Error,
                    format!("expected `)` to close the parenthesis, but found {found}")
                ),
                SourceCodeDisplay::new(&self.span, Some("the parenthesis is opened here"))
            ),
            None => write!(
                f,
                "{}\n{}",
                Message::new(Severity::Error, "found a `)` without a matching `(`"),
                SourceCodeDisplay::new(&self.span, Option::<i32>::None)
            ),
        }
    }
}

/// A token that cannot start an expression was found where an expression was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedToken {
    /// The span of the offending token.
    pub span: Span,

    /// The offending token.
    pub found: Token,
}

impl Display for UnexpectedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!("expected an expression, but found {}", self.found)
            ),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// An argument is missing before or after a `,` in a function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedArgumentList {
    /// The span of the token found where the argument was expected.
    pub span: Span,

    /// The token found where the argument was expected.
    pub found: Token,
}

impl Display for MalformedArgumentList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!("expected an argument, but found {}", self.found)
            ),
            SourceCodeDisplay::new(&self.span, Some("arguments are separated by a single `,`"))
        )
    }
}

/// Operands are nested deeper than [`crate::parser::MAX_NESTING_DEPTH`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestingTooDeep {
    /// The span of the token that would start the operand past the limit.
    pub span: Span,
}

impl Display for NestingTooDeep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!(
                    "expressions cannot be nested more than {} levels deep",
                    crate::parser::MAX_NESTING_DEPTH
                )
            ),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// Is an enumeration containing all kinds of errors that can occur while parsing expressions.
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner, From, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("{0}")]
    UnbalancedParentheses(UnbalancedParentheses),

    #[error("{0}")]
    UnexpectedToken(UnexpectedToken),

    #[error("{0}")]
    MalformedArgumentList(MalformedArgumentList),

    #[error("{0}")]
    NestingTooDeep(NestingTooDeep),

    /// The tokenizer failed while the parser was pulling tokens.
    #[error("{0}")]
    Lexical(quark_lexical::error::Error),
}

impl Error {
    /// Gets the span of the source code the error points at.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::UnbalancedParentheses(error) => &error.span,
            Self::UnexpectedToken(error) => &error.span,
            Self::MalformedArgumentList(error) => &error.span,
            Self::NestingTooDeep(error) => &error.span,
            Self::Lexical(error) => error.span(),
        }
    }
}
