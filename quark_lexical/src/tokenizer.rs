//! Contains the [`Tokenizer`], which turns the source text into [`Token`]s one at a time.

use std::{fmt::Debug, sync::Arc};

use quark_base::{
    diagnostic::Handler,
    log::{Message, Severity},
    source_file::{ByteIndex, SourceFile, Span},
};
use strum::IntoEnumIterator;

use crate::{
    error::{
        Error, InvalidCharacter, UnterminatedChar, UnterminatedComment, UnterminatedString,
    },
    token::{KeywordKind, LiteralKind, Operator, Punctuation, Token, TokenKind},
};

/// Reads tokens from a [`SourceFile`] on demand.
///
/// The cursor only moves forward. Once the end of the input is reached, every further call to
/// [`Tokenizer::next_token`] returns another [`TokenKind::EndOfInput`] token.
pub struct Tokenizer<'a> {
    source_file: Arc<SourceFile>,
    cursor: ByteIndex,
    logger: &'a dyn Handler<Message<String>>,
}

impl<'a> Debug for Tokenizer<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("source_file", &self.source_file)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer positioned at the start of the given source file.
    ///
    /// Every token, error and the end of the input are reported to `logger`.
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>, logger: &'a dyn Handler<Message<String>>) -> Self {
        Self {
            source_file,
            cursor: 0,
            logger,
        }
    }

    /// Gets the source file being tokenized.
    #[must_use]
    pub fn source_file(&self) -> &Arc<SourceFile> { &self.source_file }

    /// Gets the byte index of the next character to be read.
    #[must_use]
    pub fn cursor(&self) -> ByteIndex { self.cursor }

    /// Gets the handler the tokenizer reports to.
    #[must_use]
    pub fn logger(&self) -> &'a dyn Handler<Message<String>> { self.logger }

    /// Creates a [`Span`] over the given byte range of the source file being tokenized.
    #[must_use]
    pub fn span(&self, start: ByteIndex, end: ByteIndex) -> Span {
        Span::new(self.source_file.clone(), start, end)
    }

    /// Reads the next token, skipping any whitespace and comments before it.
    ///
    /// # Errors
    /// - [`Error::UnterminatedComment`]: a `/*` comment is never closed.
    /// - [`Error::UnterminatedString`]: a string literal is never closed.
    /// - [`Error::UnterminatedChar`]: a `'` is not followed by exactly one character and `'`.
    /// - [`Error::InvalidCharacter`]: a character that starts no token was found.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_trivia()?;

        let Some(character) = self.remainder().chars().next() else {
            self.log(Severity::Debug, "reached the end of input".to_owned());
            return Ok(Token::new(
                TokenKind::EndOfInput,
                String::new(),
                self.cursor,
                self.cursor,
            ));
        };

        let token = match self.read_operator().or_else(|| self.read_punctuation()) {
            Some(token) => token,
            None => self.read_literal(character)?,
        };

        if token.kind() == TokenKind::Invalid {
            let span = self.span(token.start(), token.end());
            return Err(self.report(InvalidCharacter { span }.into()));
        }

        self.log(
            Severity::Debug,
            format!("{}..{}: {token}", token.start(), token.end()),
        );

        Ok(token)
    }

    fn log(&self, severity: Severity, message: String) {
        self.logger.receive(Message::new(severity, message));
    }

    fn report(&self, error: Error) -> Error {
        self.log(Severity::Error, error.to_string());
        error
    }

    fn remainder(&self) -> &str { &self.source_file.content()[self.cursor..] }

    fn skip_trivia(&mut self) -> Result<(), Error> {
        loop {
            let remainder = self.remainder();
            let whitespace = remainder.len()
                - remainder
                    .trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0B')
                    .len();
            self.cursor += whitespace;

            let remainder = self.remainder();
            if remainder.starts_with("//") {
                self.cursor += remainder.find('\n').unwrap_or(remainder.len());
            } else if remainder.starts_with("/*") {
                let start = self.cursor;

                // the closing marker is searched after the opening one, so `/*/` stays open
                let closing = remainder[2..].find("*/");
                match closing {
                    Some(offset) => self.cursor += offset + 4,
                    None => {
                        self.cursor = self.source_file.content().len();
                        let span = self.span(start, start + 2);
                        return Err(self.report(UnterminatedComment { span }.into()));
                    }
                }
            } else {
                return Ok(());
            }
        }
    }

    /// Emits a token whose lexeme is the next `length` bytes of the source text.
    fn emit(&mut self, kind: TokenKind, length: usize) -> Token {
        let start = self.cursor;
        let lexeme = self.remainder()[..length].to_owned();
        self.cursor += length;

        Token::new(kind, lexeme, start, self.cursor)
    }

    fn read_operator(&mut self) -> Option<Token> {
        let operator =
            Operator::iter().find(|operator| self.remainder().starts_with(operator.as_str()))?;

        Some(self.emit(operator.into(), operator.as_str().len()))
    }

    fn read_punctuation(&mut self) -> Option<Token> {
        let mut characters = self.remainder().chars();
        let punctuation = characters.next().and_then(Punctuation::from_char)?;

        // `//` and `/*` open comments
        if punctuation == Punctuation::Slash && matches!(characters.next(), Some('/' | '*')) {
            return None;
        }

        Some(self.emit(punctuation.into(), 1))
    }

    fn read_literal(&mut self, character: char) -> Result<Token, Error> {
        match character {
            '0'..='9' => Ok(self.read_number()),
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.read_identifier_or_keyword()),
            '"' => self.read_string(),
            '\'' => self.read_character(),
            character => Ok(self.emit(TokenKind::Invalid, character.len_utf8())),
        }
    }

    fn read_number(&mut self) -> Token {
        let start = self.cursor;
        let mut has_decimal = false;

        let length = self
            .remainder()
            .bytes()
            .take_while(|byte| match byte {
                b'0'..=b'9' => true,
                b'.' if !has_decimal => {
                    has_decimal = true;
                    true
                }
                _ => false,
            })
            .count();

        let text = &self.remainder()[..length];
        let lexeme = text.strip_suffix('.').unwrap_or(text).to_owned();
        let kind = if has_decimal {
            LiteralKind::Float
        } else {
            LiteralKind::Integer
        };

        self.cursor += length;
        Token::new(kind.into(), lexeme, start, self.cursor)
    }

    fn read_identifier_or_keyword(&mut self) -> Token {
        let length = self
            .remainder()
            .bytes()
            .take_while(|byte| byte.is_ascii_alphanumeric() || *byte == b'_')
            .count();

        let kind = self.remainder()[..length]
            .parse::<KeywordKind>()
            .map_or(TokenKind::Identifier, TokenKind::Keyword);

        self.emit(kind, length)
    }

    fn read_string(&mut self) -> Result<Token, Error> {
        let start = self.cursor;
        let body = &self.remainder()[1..];

        if let Some(length) = body.find('"') {
            let lexeme = body[..length].to_owned();
            self.cursor += length + 2;

            Ok(Token::new(
                LiteralKind::String.into(),
                lexeme,
                start,
                self.cursor,
            ))
        } else {
            self.cursor = self.source_file.content().len();
            let span = self.span(start, self.cursor);

            Err(self.report(UnterminatedString { span }.into()))
        }
    }

    fn read_character(&mut self) -> Result<Token, Error> {
        let start = self.cursor;
        let mut characters = self.remainder().char_indices().skip(1);

        match (characters.next(), characters.next()) {
            (Some((_, character)), Some((offset, '\''))) => {
                self.cursor += offset + 1;

                Ok(Token::new(
                    LiteralKind::Character.into(),
                    character.to_string(),
                    start,
                    self.cursor,
                ))
            }
            (character, _) => {
                self.cursor += 1 + character.map_or(0, |(_, character)| character.len_utf8());
                let span = self.span(start, self.cursor);

                Err(self.report(UnterminatedChar { span }.into()))
            }
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, Error>;

    /// Yields tokens until the end of the input, which is not yielded itself.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) if token.is_end_of_input() => None,
            result => Some(result),
        }
    }
}
