//! Contains the [`Parser`] logic.

use quark_base::{
    diagnostic::Handler,
    log::{Message, Severity},
    source_file::Span,
};
use quark_lexical::{token::Token, tokenizer::Tokenizer};

use crate::error::{Error, NestingTooDeep};

/// The deepest operands may be nested through parentheses, prefix operators, call arguments and
/// right-associative operators.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Pulls tokens from a [`Tokenizer`] on demand, with a single token of lookahead.
///
/// The parsing functions themselves live next to the syntax tree they produce, see
/// [`crate::syntax_tree::expression`].
#[derive(Debug)]
pub struct Parser<'t, 'h> {
    tokenizer: &'t mut Tokenizer<'h>,
    lookahead: Option<Token>,
    depth: usize,
}

impl<'t, 'h> Parser<'t, 'h> {
    /// Creates a parser that reads from the given tokenizer.
    #[must_use]
    pub fn new(tokenizer: &'t mut Tokenizer<'h>) -> Self {
        Self {
            tokenizer,
            lookahead: None,
            depth: 0,
        }
    }

    /// Returns the next token without consuming it.
    ///
    /// # Errors
    /// [`Error::Lexical`]: the tokenizer failed to read the token.
    pub fn peek(&mut self) -> Result<&Token, Error> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.tokenizer.next_token()?,
        };

        Ok(self.lookahead.insert(token))
    }

    /// Consumes and returns the next token.
    ///
    /// # Errors
    /// [`Error::Lexical`]: the tokenizer failed to read the token.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        match self.lookahead.take() {
            Some(token) => Ok(token),
            None => Ok(self.tokenizer.next_token()?),
        }
    }

    /// Creates a [`Span`] covering the given token.
    #[must_use]
    pub fn span(&self, token: &Token) -> Span { self.tokenizer.span(token.start(), token.end()) }

    /// Gets the handler the parser and its tokenizer report to.
    #[must_use]
    pub fn logger(&self) -> &'h dyn Handler<Message<String>> { self.tokenizer.logger() }

    pub(crate) fn log(&self, severity: Severity, message: String) {
        self.logger().receive(Message::new(severity, message));
    }

    /// Runs `parse` one nesting level deeper, failing once [`MAX_NESTING_DEPTH`] is reached.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            let token = self.next_token()?;
            let span = self.span(&token);
            return Err(self.report(NestingTooDeep { span }));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;

        result
    }

    /// Logs a syntax error and hands it back to be returned.
    pub(crate) fn report(&self, error: impl Into<Error>) -> Error {
        let error = error.into();
        self.log(Severity::Error, error.to_string());
        error
    }
}
