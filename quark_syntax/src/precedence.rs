//! The binary operator priority table used by precedence climbing.

use std::collections::HashMap;

use lazy_static::lazy_static;
use quark_lexical::token::{Operator, Punctuation, TokenKind};

lazy_static! {
    static ref BINARY_OPERATOR_PRIORITY: HashMap<TokenKind, u8> = [
        (TokenKind::Operator(Operator::Exponent), 70),
        (TokenKind::Punctuation(Punctuation::Asterisk), 60),
        (TokenKind::Punctuation(Punctuation::Slash), 60),
        (TokenKind::Punctuation(Punctuation::Plus), 50),
        (TokenKind::Punctuation(Punctuation::Minus), 50),
        (TokenKind::Operator(Operator::EqualEqual), 40),
        (TokenKind::Operator(Operator::NotEqual), 40),
        (TokenKind::Punctuation(Punctuation::Less), 40),
        (TokenKind::Operator(Operator::LessEqual), 40),
        (TokenKind::Punctuation(Punctuation::Greater), 40),
        (TokenKind::Operator(Operator::GreaterEqual), 40),
        (TokenKind::Operator(Operator::And), 20),
        (TokenKind::Operator(Operator::Or), 10),
    ]
    .into_iter()
    .collect();
}

/// Gets the priority of the token kind as a binary operator; the higher binds tighter.
///
/// Returns `0` for anything that is not a binary operator.
#[must_use]
pub fn priority(kind: TokenKind) -> u8 {
    BINARY_OPERATOR_PRIORITY.get(&kind).copied().unwrap_or(0)
}

/// The side a chain of operators of equal priority groups towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Associativity {
    Left,
    Right,
}

/// Gets the associativity of the token kind as a binary operator.
#[must_use]
pub fn associativity(kind: TokenKind) -> Associativity {
    if kind == TokenKind::Operator(Operator::Exponent) {
        Associativity::Right
    } else {
        Associativity::Left
    }
}
