//! Is a module containing the [`Token`] type and all of its related types.

use std::{collections::HashMap, fmt::Display, ops::Range, str::FromStr};

use derive_new::new;
use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use lazy_static::lazy_static;
use quark_base::source_file::ByteIndex;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

/// Is an enumeration representing keywords in the Quark programming language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    If,
    Else,
    While,
    For,
    Return,
    True,
    False,
    Void,
    Int,
    Float,
    String,
    Char,
    Bool,
    Func,
    Import,
}

impl Display for KeywordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Is an error that is returned when a string cannot be parsed into a [`KeywordKind`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref STRING_KEYWORD_MAP: HashMap<&'static str, KeywordKind> =
                KeywordKind::iter()
                    .map(|keyword| (keyword.as_str(), keyword))
                    .collect();
        }

        STRING_KEYWORD_MAP.get(s).copied().ok_or(KeywordParseError)
    }
}

impl KeywordKind {
    /// Gets the string representation of the keyword as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::For => "for",
            Self::Return => "return",
            Self::True => "true",
            Self::False => "false",
            Self::Void => "void",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Char => "char",
            Self::Bool => "bool",
            Self::Func => "func",
            Self::Import => "import",
        }
    }
}

/// Is an enumeration of the single character punctuation and operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum Punctuation {
    LeftParenthesis,
    RightParenthesis,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Semicolon,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Equals,
    Less,
    Greater,
    Exclamation,
}

impl Punctuation {
    /// Gets the character the punctuation is written with.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::LeftParenthesis => '(',
            Self::RightParenthesis => ')',
            Self::LeftBrace => '{',
            Self::RightBrace => '}',
            Self::LeftBracket => '[',
            Self::RightBracket => ']',
            Self::Comma => ',',
            Self::Semicolon => ';',
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Asterisk => '*',
            Self::Slash => '/',
            Self::Equals => '=',
            Self::Less => '<',
            Self::Greater => '>',
            Self::Exclamation => '!',
        }
    }

    /// Gets the punctuation written with the given character, if any.
    #[must_use]
    pub fn from_char(character: char) -> Option<Self> {
        Some(match character {
            '(' => Self::LeftParenthesis,
            ')' => Self::RightParenthesis,
            '{' => Self::LeftBrace,
            '}' => Self::RightBrace,
            '[' => Self::LeftBracket,
            ']' => Self::RightBracket,
            ',' => Self::Comma,
            ';' => Self::Semicolon,
            '+' => Self::Plus,
            '-' => Self::Minus,
            '*' => Self::Asterisk,
            '/' => Self::Slash,
            '=' => Self::Equals,
            '<' => Self::Less,
            '>' => Self::Greater,
            '!' => Self::Exclamation,
            _ => return None,
        })
    }
}

/// Is an enumeration of the operators spelled with more than one character.
///
/// No operator is a prefix of another one, so the order of [`Operator::iter`] does not matter
/// when matching them against the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum Operator {
    Exponent,
    EqualEqual,
    NotEqual,
    LessEqual,
    GreaterEqual,
    And,
    Or,
}

impl Operator {
    /// Gets the string representation of the operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exponent => "**",
            Self::EqualEqual => "==",
            Self::NotEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// Is an enumeration of the kinds of literal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum LiteralKind {
    Integer,
    Float,
    String,
    Character,
}

/// Is an enumeration containing all kinds of tokens in the Quark programming language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
pub enum TokenKind {
    /// A single character punctuation or operator.
    Punctuation(Punctuation),

    /// An operator made of more than one character.
    Operator(Operator),

    /// Marks the end of the source text.
    EndOfInput,

    /// A name that is not a keyword.
    Identifier,

    /// A hardcoded value.
    Literal(LiteralKind),

    /// A reserved word.
    Keyword(KeywordKind),

    /// A character that starts no token.
    Invalid,
}

impl From<Punctuation> for TokenKind {
    fn from(punctuation: Punctuation) -> Self { Self::Punctuation(punctuation) }
}

impl From<Operator> for TokenKind {
    fn from(operator: Operator) -> Self { Self::Operator(operator) }
}

impl From<LiteralKind> for TokenKind {
    fn from(literal: LiteralKind) -> Self { Self::Literal(literal) }
}

impl From<KeywordKind> for TokenKind {
    fn from(keyword: KeywordKind) -> Self { Self::Keyword(keyword) }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Punctuation(punctuation) => write!(f, "`{}`", punctuation.as_char()),
            Self::Operator(operator) => write!(f, "`{}`", operator.as_str()),
            Self::EndOfInput => f.write_str("end of input"),
            Self::Identifier => f.write_str("identifier"),
            Self::Literal(LiteralKind::Integer) => f.write_str("integer literal"),
            Self::Literal(LiteralKind::Float) => f.write_str("float literal"),
            Self::Literal(LiteralKind::String) => f.write_str("string literal"),
            Self::Literal(LiteralKind::Character) => f.write_str("character literal"),
            Self::Keyword(keyword) => write!(f, "keyword `{keyword}`"),
            Self::Invalid => f.write_str("invalid token"),
        }
    }
}

/// Is the smallest syntactic unit: a [`TokenKind`] and the text it was read from.
///
/// The lexeme of a literal is its value: string literals drop their quotes, character literals
/// keep only the character, and a numeric literal ending with `.` drops the dot. The byte range
/// always covers every character consumed for the token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, CopyGetters, new)]
pub struct Token {
    /// Gets the kind of the token.
    #[get_copy = "pub"]
    kind: TokenKind,

    /// Gets the text of the token.
    #[get = "pub"]
    lexeme: String,

    /// Gets the byte index of the first character of the token.
    #[get_copy = "pub"]
    start: ByteIndex,

    /// Gets the byte index right after the last character of the token.
    #[get_copy = "pub"]
    end: ByteIndex,
}

impl Token {
    /// Gets the byte range of the source text the token was read from.
    #[must_use]
    pub fn range(&self) -> Range<ByteIndex> { self.start..self.end }

    /// Returns `true` if the token marks the end of the source text.
    #[must_use]
    pub fn is_end_of_input(&self) -> bool { self.kind == TokenKind::EndOfInput }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::Literal(..) | TokenKind::Invalid => {
                write!(f, "{} `{}`", self.kind, self.lexeme)
            }
            kind => write!(f, "{kind}"),
        }
    }
}
