//! Contains all definition of syntax trees and their parsing logic.

use std::ops::Range;

use quark_base::source_file::ByteIndex;
use quark_lexical::token::Token;

pub mod expression;

/// Is a trait for the syntax tree nodes that were read from a range of the source text.
pub trait SourceElement {
    /// Gets the byte range of the source text the element was read from.
    fn range(&self) -> Range<ByteIndex>;
}

impl SourceElement for Token {
    fn range(&self) -> Range<ByteIndex> { self.start()..self.end() }
}
