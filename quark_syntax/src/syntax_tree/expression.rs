//! Contains the syntax trees related to expressions and their parsing logic.

use std::{
    cmp::Ordering,
    fmt::{Display, Write},
    ops::Range,
};

use derive_new::new;
use enum_as_inner::EnumAsInner;
use getset::Getters;
use quark_base::{log::Severity, source_file::ByteIndex};
use quark_lexical::token::{KeywordKind, LiteralKind, Operator, Punctuation, Token, TokenKind};

use super::SourceElement;
use crate::{
    error::{Error, MalformedArgumentList, UnbalancedParentheses, UnexpectedToken},
    parser::Parser,
    precedence::{self, Associativity},
};

/// Syntax Synopsis:
///
/// ``` ebnf
/// BinaryOperator:
///     '**'
///     | '*'
///     | '/'
///     | '+'
///     | '-'
///     | '=='
///     | '!='
///     | '<'
///     | '<='
///     | '>'
///     | '>='
///     | '&&'
///     | '||'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum BinaryOperator {
    Exponent(Token),
    Multiply(Token),
    Divide(Token),
    Add(Token),
    Subtract(Token),
    Equal(Token),
    NotEqual(Token),
    LessThan(Token),
    LessThanOrEqual(Token),
    GreaterThan(Token),
    GreaterThanOrEqual(Token),
    LogicalAnd(Token),
    LogicalOr(Token),
}

impl BinaryOperator {
    /// Converts the token into a binary operator, or gives it back if it is not one.
    ///
    /// # Errors
    /// Returns the given token if its kind is not a binary operator.
    pub fn from_token(token: Token) -> Result<Self, Token> {
        Ok(match token.kind() {
            TokenKind::Operator(Operator::Exponent) => Self::Exponent(token),
            TokenKind::Punctuation(Punctuation::Asterisk) => Self::Multiply(token),
            TokenKind::Punctuation(Punctuation::Slash) => Self::Divide(token),
            TokenKind::Punctuation(Punctuation::Plus) => Self::Add(token),
            TokenKind::Punctuation(Punctuation::Minus) => Self::Subtract(token),
            TokenKind::Operator(Operator::EqualEqual) => Self::Equal(token),
            TokenKind::Operator(Operator::NotEqual) => Self::NotEqual(token),
            TokenKind::Punctuation(Punctuation::Less) => Self::LessThan(token),
            TokenKind::Operator(Operator::LessEqual) => Self::LessThanOrEqual(token),
            TokenKind::Punctuation(Punctuation::Greater) => Self::GreaterThan(token),
            TokenKind::Operator(Operator::GreaterEqual) => Self::GreaterThanOrEqual(token),
            TokenKind::Operator(Operator::And) => Self::LogicalAnd(token),
            TokenKind::Operator(Operator::Or) => Self::LogicalOr(token),
            _ => return Err(token),
        })
    }

    /// Gets the token the operator was read from.
    #[must_use]
    pub fn token(&self) -> &Token {
        match self {
            Self::Exponent(token)
            | Self::Multiply(token)
            | Self::Divide(token)
            | Self::Add(token)
            | Self::Subtract(token)
            | Self::Equal(token)
            | Self::NotEqual(token)
            | Self::LessThan(token)
            | Self::LessThanOrEqual(token)
            | Self::GreaterThan(token)
            | Self::GreaterThanOrEqual(token)
            | Self::LogicalAnd(token)
            | Self::LogicalOr(token) => token,
        }
    }

    /// Gets the priority of the operator (the higher the number, the tighter it binds).
    #[must_use]
    pub fn priority(&self) -> u8 { precedence::priority(self.token().kind()) }

    /// Gets the associativity of the operator.
    #[must_use]
    pub fn associativity(&self) -> Associativity {
        precedence::associativity(self.token().kind())
    }

    /// Gets the string representation of the operator.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exponent(..) => "**",
            Self::Multiply(..) => "*",
            Self::Divide(..) => "/",
            Self::Add(..) => "+",
            Self::Subtract(..) => "-",
            Self::Equal(..) => "==",
            Self::NotEqual(..) => "!=",
            Self::LessThan(..) => "<",
            Self::LessThanOrEqual(..) => "<=",
            Self::GreaterThan(..) => ">",
            Self::GreaterThanOrEqual(..) => ">=",
            Self::LogicalAnd(..) => "&&",
            Self::LogicalOr(..) => "||",
        }
    }
}

impl SourceElement for BinaryOperator {
    fn range(&self) -> Range<ByteIndex> { self.token().range() }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Binary:
///     Expression BinaryOperator Expression
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, new)]
pub struct Binary {
    #[get = "pub"]
    left_operand: Box<Expression>,
    #[get = "pub"]
    operator: BinaryOperator,
    #[get = "pub"]
    right_operand: Box<Expression>,
}

impl SourceElement for Binary {
    fn range(&self) -> Range<ByteIndex> {
        self.left_operand.range().start..self.right_operand.range().end
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// PrefixOperator:
///     '!' | '-'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum PrefixOperator {
    LogicalNot(Token),
    Negate(Token),
}

impl PrefixOperator {
    /// Gets the token the operator was read from.
    #[must_use]
    pub fn token(&self) -> &Token {
        match self {
            Self::LogicalNot(token) | Self::Negate(token) => token,
        }
    }

    /// Gets the string representation of the operator.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogicalNot(..) => "!",
            Self::Negate(..) => "-",
        }
    }
}

/// Syntax Synopsis:
///
/// ```ebnf
/// Prefix:
///     PrefixOperator Primary
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, new)]
pub struct Prefix {
    #[get = "pub"]
    operator: PrefixOperator,
    #[get = "pub"]
    operand: Box<Expression>,
}

impl SourceElement for Prefix {
    fn range(&self) -> Range<ByteIndex> {
        self.operator.token().start()..self.operand.range().end
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// FunctionCall:
///     Identifier '(' (Expression (',' Expression)*)? ')'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, new)]
pub struct FunctionCall {
    #[get = "pub"]
    identifier: Token,
    #[get = "pub"]
    arguments: Vec<Expression>,
    #[get = "pub"]
    right_parenthesis: Token,
}

impl SourceElement for FunctionCall {
    fn range(&self) -> Range<ByteIndex> {
        self.identifier.start()..self.right_parenthesis.end()
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Expression:
///     NumericLiteral
///     | StringLiteral
///     | CharacterLiteral
///     | 'true'
///     | 'false'
///     | Identifier
///     | FunctionCall
///     | Prefix
///     | Binary
///     | '(' Expression ')'
///     ;
/// ```
///
/// Parentheses only group; they produce no node of their own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum Expression {
    Numeric(Token),
    String(Token),
    Character(Token),
    Boolean(Token),
    Identifier(Token),
    FunctionCall(FunctionCall),
    Prefix(Prefix),
    Binary(Binary),
}

impl SourceElement for Expression {
    fn range(&self) -> Range<ByteIndex> {
        match self {
            Self::Numeric(token)
            | Self::String(token)
            | Self::Character(token)
            | Self::Boolean(token)
            | Self::Identifier(token) => token.range(),
            Self::FunctionCall(function_call) => function_call.range(),
            Self::Prefix(prefix) => prefix.range(),
            Self::Binary(binary) => binary.range(),
        }
    }
}

/// Renders the expression with every binary operation wrapped in parentheses.
impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // `7.` keeps its dot so that it still reads as a float
            Self::Numeric(token)
                if token.kind() == TokenKind::Literal(LiteralKind::Float)
                    && !token.lexeme().contains('.') =>
            {
                write!(f, "{}.", token.lexeme())
            }
            Self::Numeric(token) | Self::Boolean(token) | Self::Identifier(token) => {
                f.write_str(token.lexeme())
            }
            Self::String(token) => write!(f, "\"{}\"", token.lexeme()),
            Self::Character(token) => write!(f, "'{}'", token.lexeme()),
            Self::FunctionCall(function_call) => {
                write!(f, "{}(", function_call.identifier.lexeme())?;

                for (index, argument) in function_call.arguments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }

                    Display::fmt(argument, f)?;
                }

                f.write_char(')')
            }
            Self::Prefix(prefix) => write!(f, "{}{}", prefix.operator.as_str(), prefix.operand),
            Self::Binary(binary) => write!(
                f,
                "({} {} {})",
                binary.left_operand,
                binary.operator.as_str(),
                binary.right_operand
            ),
        }
    }
}

impl<'t, 'h> Parser<'t, 'h> {
    /// Parses an [`Expression`], leaving the first token that cannot extend it unconsumed.
    ///
    /// # Errors
    /// - [`Error::UnbalancedParentheses`]: a `(` is not closed or a `)` closes nothing.
    /// - [`Error::UnexpectedToken`]: a token that cannot start an operand was found.
    /// - [`Error::MalformedArgumentList`]: an argument is missing around a `,`.
    /// - [`Error::NestingTooDeep`]: operands are nested deeper than
    ///   [`crate::parser::MAX_NESTING_DEPTH`].
    /// - [`Error::Lexical`]: the tokenizer failed.
    pub fn parse_expression(&mut self) -> Result<Expression, Error> {
        let primary = self.parse_primary()?;
        self.parse_binary_rhs(1, primary)
    }

    /// Parses expressions separated by optional `;` until the end of the input.
    ///
    /// # Errors
    /// The first error [`Parser::parse_expression`] returns.
    pub fn parse_expressions(&mut self) -> Result<Vec<Expression>, Error> {
        let mut expressions = Vec::new();

        loop {
            while self.peek()?.kind() == TokenKind::Punctuation(Punctuation::Semicolon) {
                self.next_token()?;
            }

            if self.peek()?.is_end_of_input() {
                self.log(
                    Severity::Info,
                    format!("parsed {} expression(s)", expressions.len()),
                );
                return Ok(expressions);
            }

            let expression = self.parse_expression()?;
            self.log(Severity::Debug, format!("parsed expression {expression}"));
            expressions.push(expression);
        }
    }

    /// Parses an operand: a literal, an identifier or function call, a prefixed operand, or a
    /// parenthesized expression.
    ///
    /// # Errors
    /// See [`Parser::parse_expression`].
    pub fn parse_primary(&mut self) -> Result<Expression, Error> {
        self.nested(Self::parse_operand)
    }

    fn parse_operand(&mut self) -> Result<Expression, Error> {
        let token = self.next_token()?;

        match token.kind() {
            TokenKind::Literal(LiteralKind::Integer | LiteralKind::Float) => {
                Ok(Expression::Numeric(token))
            }
            TokenKind::Literal(LiteralKind::String) => Ok(Expression::String(token)),
            TokenKind::Literal(LiteralKind::Character) => Ok(Expression::Character(token)),
            TokenKind::Keyword(KeywordKind::True | KeywordKind::False) => {
                Ok(Expression::Boolean(token))
            }

            // identifier or function call
            TokenKind::Identifier => {
                if self.peek()?.kind() == TokenKind::Punctuation(Punctuation::LeftParenthesis) {
                    self.parse_function_call(token).map(Expression::FunctionCall)
                } else {
                    Ok(Expression::Identifier(token))
                }
            }

            TokenKind::Punctuation(Punctuation::Exclamation) => {
                let operand = Box::new(self.parse_primary()?);
                Ok(Expression::Prefix(Prefix::new(
                    PrefixOperator::LogicalNot(token),
                    operand,
                )))
            }
            TokenKind::Punctuation(Punctuation::Minus) => {
                let operand = Box::new(self.parse_primary()?);
                Ok(Expression::Prefix(Prefix::new(
                    PrefixOperator::Negate(token),
                    operand,
                )))
            }

            TokenKind::Punctuation(Punctuation::LeftParenthesis) => {
                self.parse_parenthesized(&token)
            }
            TokenKind::Punctuation(Punctuation::RightParenthesis) => {
                let span = self.span(&token);
                Err(self.report(UnbalancedParentheses { span, found: None }))
            }

            _ => Err(self.unexpected_token(token)),
        }
    }

    /// Folds binary operators of at least `min_priority` onto `lhs` by precedence climbing.
    ///
    /// # Errors
    /// See [`Parser::parse_expression`].
    pub fn parse_binary_rhs(
        &mut self,
        min_priority: u8,
        mut lhs: Expression,
    ) -> Result<Expression, Error> {
        loop {
            let Some(operator) = self.peek_binary_operator()? else {
                return Ok(lhs);
            };

            if operator.priority() < min_priority {
                return Ok(lhs);
            }

            self.next_token()?;
            let mut rhs = self.parse_primary()?;

            // absorb the operators that bind tighter than this one into the right side
            while let Some(next) = self.peek_binary_operator()? {
                let next_min_priority = match next.priority().cmp(&operator.priority()) {
                    Ordering::Greater => operator.priority() + 1,
                    Ordering::Equal if next.associativity() == Associativity::Right => {
                        operator.priority()
                    }
                    _ => break,
                };

                rhs = self.nested(|parser| parser.parse_binary_rhs(next_min_priority, rhs))?;
            }

            lhs = Expression::Binary(Binary::new(Box::new(lhs), operator, Box::new(rhs)));
        }
    }

    fn peek_binary_operator(&mut self) -> Result<Option<BinaryOperator>, Error> {
        let token = self.peek()?;

        if precedence::priority(token.kind()) == 0 {
            return Ok(None);
        }

        Ok(BinaryOperator::from_token(token.clone()).ok())
    }

    fn parse_parenthesized(&mut self, open: &Token) -> Result<Expression, Error> {
        if self.peek()?.kind() == TokenKind::Punctuation(Punctuation::RightParenthesis) {
            let token = self.next_token()?;
            return Err(self.unexpected_token(token));
        }

        let expression = self.parse_expression()?;
        let close = self.next_token()?;

        if close.kind() == TokenKind::Punctuation(Punctuation::RightParenthesis) {
            Ok(expression)
        } else {
            Err(self.report(UnbalancedParentheses {
                span: self.span(open),
                found: Some(close),
            }))
        }
    }

    /// Parses the argument list of a call; the lookahead is the opening `(`.
    fn parse_function_call(&mut self, identifier: Token) -> Result<FunctionCall, Error> {
        let open = self.next_token()?;
        let mut arguments = Vec::new();

        if self.peek()?.kind() == TokenKind::Punctuation(Punctuation::RightParenthesis) {
            return Ok(FunctionCall {
                identifier,
                arguments,
                right_parenthesis: self.next_token()?,
            });
        }

        loop {
            // a `,` or `)` here means an argument is missing around a `,`
            if matches!(
                self.peek()?.kind(),
                TokenKind::Punctuation(Punctuation::Comma | Punctuation::RightParenthesis)
            ) {
                let found = self.next_token()?;
                return Err(self.report(MalformedArgumentList {
                    span: self.span(&found),
                    found,
                }));
            }

            arguments.push(self.parse_expression()?);

            let token = self.next_token()?;
            match token.kind() {
                TokenKind::Punctuation(Punctuation::Comma) => {}
                TokenKind::Punctuation(Punctuation::RightParenthesis) => {
                    return Ok(FunctionCall {
                        identifier,
                        arguments,
                        right_parenthesis: token,
                    });
                }
                _ => {
                    return Err(self.report(UnbalancedParentheses {
                        span: self.span(&open),
                        found: Some(token),
                    }));
                }
            }
        }
    }

    fn unexpected_token(&self, found: Token) -> Error {
        let span = self.span(&found);
        self.report(UnexpectedToken { span, found })
    }
}

#[cfg(test)]
pub(super) mod tests;
