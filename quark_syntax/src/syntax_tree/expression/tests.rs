use std::{fmt::Display, str::FromStr};

use enum_as_inner::EnumAsInner;
use proptest::{
    prelude::Arbitrary,
    prop_assert_eq, prop_oneof, proptest,
    strategy::{BoxedStrategy, Just, Strategy},
    test_runner::{TestCaseError, TestCaseResult},
};
use quark_base::{
    diagnostic::{Dummy, Storage},
    log::{Message, Severity},
    source_file::SourceFile,
};
use quark_lexical::{
    error::Error as LexicalError,
    token::{KeywordKind, LiteralKind, Punctuation, TokenKind},
    tokenizer::Tokenizer,
};
use quark_test::input::Input;
use strum::IntoEnumIterator;

use crate::{
    error::Error,
    parser::Parser,
    precedence::Associativity,
    syntax_tree::SourceElement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BinaryOperator {
    Exponent,
    Multiply,
    Divide,
    Add,
    Subtract,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LogicalAnd,
    LogicalOr,
}

impl BinaryOperator {
    fn as_str(self) -> &'static str {
        match self {
            Self::Exponent => "**",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
        }
    }

    fn priority(self) -> u8 {
        match self {
            Self::Exponent => 70,
            Self::Multiply | Self::Divide => 60,
            Self::Add | Self::Subtract => 50,
            Self::Equal
            | Self::NotEqual
            | Self::LessThan
            | Self::LessThanOrEqual
            | Self::GreaterThan
            | Self::GreaterThanOrEqual => 40,
            Self::LogicalAnd => 20,
            Self::LogicalOr => 10,
        }
    }

    fn is_right_associative(self) -> bool { self == Self::Exponent }
}

impl Arbitrary for BinaryOperator {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Just(Self::Exponent),
            Just(Self::Multiply),
            Just(Self::Divide),
            Just(Self::Add),
            Just(Self::Subtract),
            Just(Self::Equal),
            Just(Self::NotEqual),
            Just(Self::LessThan),
            Just(Self::LessThanOrEqual),
            Just(Self::GreaterThan),
            Just(Self::GreaterThanOrEqual),
            Just(Self::LogicalAnd),
            Just(Self::LogicalOr),
        ]
        .boxed()
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Input<&super::BinaryOperator> for &BinaryOperator {
    fn assert(self, output: &super::BinaryOperator) -> TestCaseResult {
        prop_assert_eq!(self.as_str(), output.as_str());
        prop_assert_eq!(self.priority(), output.priority());
        prop_assert_eq!(
            self.is_right_associative(),
            output.associativity() == Associativity::Right
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrefixOperator {
    LogicalNot,
    Negate,
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LogicalNot => f.write_str("!"),
            Self::Negate => f.write_str("-"),
        }
    }
}

impl Input<&super::PrefixOperator> for &PrefixOperator {
    fn assert(self, output: &super::PrefixOperator) -> TestCaseResult {
        match (self, output) {
            (PrefixOperator::LogicalNot, super::PrefixOperator::LogicalNot(..))
            | (PrefixOperator::Negate, super::PrefixOperator::Negate(..)) => Ok(()),
            _ => Err(TestCaseError::fail(format!(
                "expected {self:?} but found {output:?}",
            ))),
        }
    }
}

/// Represents an input for the [`super::Expression`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
pub enum Expression {
    Numeric(String),
    String(String),
    Character(char),
    Boolean(bool),
    Identifier(String),
    FunctionCall(String, Vec<Expression>),
    Prefix(PrefixOperator, Box<Expression>),
    Binary(Box<Expression>, BinaryOperator, Box<Expression>),

    /// Grouping parentheses written around the expression; they leave no node behind.
    Parenthesized(Box<Expression>),
}

fn identifier() -> BoxedStrategy<String> {
    "[A-Za-z_][A-Za-z0-9_]{0,8}"
        .prop_filter("filter out keywords", |x| KeywordKind::from_str(x).is_err())
        .boxed()
}

impl Arbitrary for Expression {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let leaf = prop_oneof![
            "[0-9]{1,6}".prop_map(Self::Numeric),
            "[0-9]{1,4}\\.[0-9]{1,4}".prop_map(Self::Numeric),
            "[^\"]{0,8}".prop_map(Self::String),
            proptest::char::any().prop_map(Self::Character),
            proptest::bool::ANY.prop_map(Self::Boolean),
            identifier().prop_map(Self::Identifier),
        ];

        leaf.prop_recursive(6, 32, 4, |inner| {
            prop_oneof![
                (inner.clone(), BinaryOperator::arbitrary(), inner.clone()).prop_map(
                    |(left, operator, right)| {
                        Self::Binary(Box::new(left), operator, Box::new(right))
                    }
                ),
                (identifier(), proptest::collection::vec(inner.clone(), 0..=3))
                    .prop_map(|(name, arguments)| Self::FunctionCall(name, arguments)),
                (
                    prop_oneof![Just(PrefixOperator::LogicalNot), Just(PrefixOperator::Negate)],
                    inner.clone()
                )
                    .prop_map(|(operator, operand)| Self::Prefix(operator, Box::new(operand))),
                inner.prop_map(|inner| Self::Parenthesized(Box::new(inner))),
            ]
        })
        .boxed()
    }
}

impl Expression {
    /// Gets the binary operator at the root. Parenthesized input writes its own parentheses.
    fn root_operator(&self) -> Option<BinaryOperator> {
        match self {
            Self::Binary(_, operator, _) => Some(*operator),
            _ => None,
        }
    }

    fn fmt_operand(
        operand: &Self,
        needs_parentheses: bool,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        if needs_parentheses {
            write!(f, "({operand})")
        } else {
            write!(f, "{operand}")
        }
    }
}

/// Writes the expression with the fewest parentheses that still parse back to the same tree.
impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(digits) | Self::Identifier(digits) => f.write_str(digits),
            Self::String(content) => write!(f, "\"{content}\""),
            Self::Character(character) => write!(f, "'{character}'"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::FunctionCall(name, arguments) => {
                write!(f, "{name}(")?;

                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }

                    Display::fmt(argument, f)?;
                }

                f.write_str(")")
            }
            Self::Prefix(operator, operand) => {
                write!(f, "{operator}")?;
                Self::fmt_operand(operand, operand.root_operator().is_some(), f)
            }
            Self::Binary(left, operator, right) => {
                let left_needs_parentheses = left.root_operator().is_some_and(|left| {
                    left.priority() < operator.priority()
                        || (left.priority() == operator.priority()
                            && operator.is_right_associative())
                });
                let right_needs_parentheses = right.root_operator().is_some_and(|right| {
                    right.priority() < operator.priority()
                        || (right.priority() == operator.priority()
                            && !operator.is_right_associative())
                });

                Self::fmt_operand(left, left_needs_parentheses, f)?;
                write!(f, " {operator} ")?;
                Self::fmt_operand(right, right_needs_parentheses, f)
            }
            Self::Parenthesized(inner) => write!(f, "({inner})"),
        }
    }
}

fn assert_token(
    output: &super::Expression,
    kind: TokenKind,
    lexeme: &str,
) -> TestCaseResult {
    let token = match output {
        super::Expression::Numeric(token)
        | super::Expression::String(token)
        | super::Expression::Character(token)
        | super::Expression::Boolean(token)
        | super::Expression::Identifier(token) => token,
        output => {
            return Err(TestCaseError::fail(format!(
                "expected a {kind} leaf but found {output:?}"
            )))
        }
    };

    prop_assert_eq!(token.kind(), kind);
    prop_assert_eq!(token.lexeme().as_str(), lexeme);
    Ok(())
}

impl Input<&super::Expression> for &Expression {
    fn assert(self, output: &super::Expression) -> TestCaseResult {
        match (self, output) {
            (Expression::Numeric(digits), output) => {
                let kind = if digits.contains('.') {
                    LiteralKind::Float
                } else {
                    LiteralKind::Integer
                };
                assert_token(output, TokenKind::Literal(kind), digits)
            }
            (Expression::String(content), output) => {
                assert_token(output, TokenKind::Literal(LiteralKind::String), content)
            }
            (Expression::Character(character), output) => assert_token(
                output,
                TokenKind::Literal(LiteralKind::Character),
                &character.to_string(),
            ),
            (Expression::Boolean(true), output) => {
                assert_token(output, TokenKind::Keyword(KeywordKind::True), "true")
            }
            (Expression::Boolean(false), output) => {
                assert_token(output, TokenKind::Keyword(KeywordKind::False), "false")
            }
            (Expression::Identifier(name), output) => {
                assert_token(output, TokenKind::Identifier, name)
            }
            (Expression::FunctionCall(name, arguments), super::Expression::FunctionCall(call)) => {
                prop_assert_eq!(name, call.identifier().lexeme());
                arguments.assert(call.arguments())
            }
            (
                Expression::Prefix(operator, operand),
                super::Expression::Prefix(prefix),
            ) => {
                operator.assert(prefix.operator())?;
                operand.assert(prefix.operand())
            }
            (
                Expression::Binary(left, operator, right),
                super::Expression::Binary(binary),
            ) => {
                operator.assert(binary.operator())?;
                left.assert(binary.left_operand())?;
                right.assert(binary.right_operand())
            }
            (Expression::Parenthesized(inner), output) => inner.as_ref().assert(output),
            _ => Err(TestCaseError::fail(format!(
                "expected {self:?} but found {output:?}",
            ))),
        }
    }
}

fn parse(source: &str) -> Result<super::Expression, Error> {
    let source_file = SourceFile::in_memory("test.qk", source);
    let mut tokenizer = Tokenizer::new(source_file, &Dummy);
    let mut parser = Parser::new(&mut tokenizer);

    let expression = parser.parse_expression()?;
    assert!(parser.peek()?.is_end_of_input(), "input left over in {source}");

    Ok(expression)
}

proptest! {
    #[test]
    fn expression_test(
        expression_input in Expression::arbitrary()
    ) {
        let source = expression_input.to_string();
        let source_file = SourceFile::temp(&source)?;
        let mut tokenizer = Tokenizer::new(source_file, &Dummy);
        let mut parser = Parser::new(&mut tokenizer);

        let expression = parser.parse_expression()?;
        prop_assert_eq!(parser.peek()?.kind(), TokenKind::EndOfInput);

        expression_input.assert(&expression)?;

        // the fully parenthesized rendering reads back as the same tree
        let rendered = expression.to_string();
        let reparsed = parse(&rendered)?;
        expression_input.assert(&reparsed)?;
        prop_assert_eq!(reparsed.to_string(), rendered);
    }
}

fn render(source: &str) -> String { parse(source).unwrap().to_string() }

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(render("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(render("1 * 2 + 3"), "((1 * 2) + 3)");
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(render("8 - 3 - 2"), "((8 - 3) - 2)");
    assert_eq!(render("a < b == c"), "((a < b) == c)");
}

#[test]
fn parentheses_group_without_a_node() {
    assert_eq!(render("(1 + 2) * 3"), "((1 + 2) * 3)");
    assert_eq!(render("((x))"), "x");
}

#[test]
fn exponent_is_right_associative() {
    assert_eq!(render("2 ** 3 ** 2"), "(2 ** (3 ** 2))");
    assert_eq!(render("2 * 3 ** 4 ** 5"), "(2 * (3 ** (4 ** 5)))");
    assert_eq!(render("2 ** 3 * 4"), "((2 ** 3) * 4)");
}

#[test]
fn logical_operators_bind_loosest() {
    assert_eq!(
        render("a || b && c == d + e"),
        "(a || (b && (c == (d + e))))"
    );
}

#[test]
fn prefix_operators_apply_to_the_next_operand() {
    assert_eq!(render("!a && -b"), "(!a && -b)");
    assert_eq!(render("-(1 + 2) * 3"), "(-(1 + 2) * 3)");
    assert_eq!(render("!!flag"), "!!flag");
}

#[test]
fn literals_render_as_written() {
    assert_eq!(render("\"hi\" + 'c'"), "(\"hi\" + 'c')");
    assert_eq!(render("7. == 7.0"), "(7. == 7.0)");
    assert_eq!(render("true != false"), "(true != false)");
}

#[test]
fn function_call_arguments() {
    let expression = parse("foo(1, 2+3)").unwrap();
    let call = expression.as_function_call().unwrap();

    assert_eq!(call.identifier().lexeme(), "foo");
    assert_eq!(call.arguments().len(), 2);
    assert_eq!(call.arguments()[0].to_string(), "1");
    assert_eq!(call.arguments()[1].to_string(), "(2 + 3)");

    assert_eq!(render("f()"), "f()");
    assert_eq!(render("f(g(x), y) * 2"), "(f(g(x), y) * 2)");
}

#[test]
fn expression_range() {
    let expression = parse("x + foo(1)").unwrap();
    assert_eq!(expression.range(), 0..10);

    let expression = parse("-y").unwrap();
    assert_eq!(expression.range(), 0..2);
}

#[test]
fn lookahead_is_left_unconsumed() {
    let source_file = SourceFile::in_memory("test.qk", "1 + 2; x");
    let mut tokenizer = Tokenizer::new(source_file, &Dummy);
    let mut parser = Parser::new(&mut tokenizer);

    assert_eq!(parser.parse_expression().unwrap().to_string(), "(1 + 2)");
    assert_eq!(
        parser.next_token().unwrap().kind(),
        TokenKind::Punctuation(Punctuation::Semicolon)
    );
    assert_eq!(parser.parse_expression().unwrap().to_string(), "x");
}

#[test]
fn expression_sequence() {
    let source_file = SourceFile::in_memory("test.qk", ";1; 2 + 3;; f(x)\ny");
    let mut tokenizer = Tokenizer::new(source_file, &Dummy);
    let mut parser = Parser::new(&mut tokenizer);

    let rendered = parser
        .parse_expressions()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    assert_eq!(rendered, vec!["1", "(2 + 3)", "f(x)", "y"]);
}

#[test]
fn empty_sequence() {
    let source_file = SourceFile::in_memory("test.qk", " ;; // nothing\n");
    let mut tokenizer = Tokenizer::new(source_file, &Dummy);
    let mut parser = Parser::new(&mut tokenizer);

    assert!(parser.parse_expressions().unwrap().is_empty());
}

#[test]
fn unbalanced_parentheses() {
    for (source, span) in [("(1 + 2", "("), ("f(1 2)", "("), ("1 + )", ")")] {
        let error = parse(source).unwrap_err();

        assert!(
            matches!(error, Error::UnbalancedParentheses(..)),
            "{source}: {error:?}"
        );
        assert_eq!(error.span().str(), span);
    }

    let error = parse("(1 + 2").unwrap_err();
    assert!(error
        .as_unbalanced_parentheses()
        .unwrap()
        .found
        .as_ref()
        .unwrap()
        .is_end_of_input());
}

#[test]
fn unexpected_tokens() {
    for (source, found) in [("* 2", "*"), ("1 + if", "if"), ("()", ")"), ("x + ;", ";")] {
        let error = parse(source).unwrap_err();

        assert!(matches!(error, Error::UnexpectedToken(..)), "{source}: {error:?}");
        assert_eq!(error.span().str(), found);
    }

    let error = parse("").unwrap_err();
    assert!(error.as_unexpected_token().unwrap().found.is_end_of_input());
}

#[test]
fn malformed_argument_lists() {
    for (source, found) in [("f(,1)", ","), ("f(1,)", ")"), ("f(1,,2)", ",")] {
        let error = parse(source).unwrap_err();

        assert!(
            matches!(error, Error::MalformedArgumentList(..)),
            "{source}: {error:?}"
        );
        assert_eq!(error.span().str(), found);
    }
}

#[test]
fn lexical_errors_propagate() {
    let error = parse("\"abc").unwrap_err();
    assert!(matches!(
        error,
        Error::Lexical(LexicalError::UnterminatedString(..))
    ));

    let error = parse("1 + 'ab'").unwrap_err();
    assert!(matches!(
        error,
        Error::Lexical(LexicalError::UnterminatedChar(..))
    ));
}

#[test]
fn errors_are_reported_once() {
    let storage: Storage<Message<String>> = Storage::new();
    let source_file = SourceFile::in_memory("test.qk", "(1 + 2");
    let mut tokenizer = Tokenizer::new(source_file, &storage);
    let mut parser = Parser::new(&mut tokenizer);

    assert!(parser.parse_expression().is_err());

    let errors = storage
        .as_vec()
        .iter()
        .filter(|message| message.severity == Severity::Error)
        .count();
    assert_eq!(errors, 1);
}

#[test]
fn every_binary_token_kind_is_an_operator() {
    for punctuation in Punctuation::iter() {
        let kind = TokenKind::Punctuation(punctuation);
        let token = quark_lexical::token::Token::new(kind, String::new(), 0, 0);

        assert_eq!(
            super::BinaryOperator::from_token(token).is_ok(),
            crate::precedence::priority(kind) > 0,
            "{kind}"
        );
    }
}

#[test]
fn nesting_within_the_limit_parses() {
    let source = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(render(&source), "1");

    let source = format!("{}a", "!".repeat(100));
    assert!(parse(&source).is_ok());
}

#[test]
fn nesting_past_the_limit_is_an_error() {
    let sources = [
        format!("{}1{}", "(".repeat(50_000), ")".repeat(50_000)),
        format!("{}a", "-".repeat(50_000)),
        format!("{}f()", "f(".repeat(50_000)),
        format!("{}2", "2 ** ".repeat(50_000)),
    ];

    for source in sources {
        let error = parse(&source).unwrap_err();
        assert!(matches!(error, Error::NestingTooDeep(..)));
    }
}

#[test]
fn non_ascii_whitespace_between_operands_is_rejected() {
    let source_file = SourceFile::in_memory("test.qk", "a\u{a0}b");
    let mut tokenizer = Tokenizer::new(source_file, &Dummy);
    let mut parser = Parser::new(&mut tokenizer);

    let error = parser.parse_expressions().unwrap_err();
    assert!(matches!(
        error,
        Error::Lexical(LexicalError::InvalidCharacter(..))
    ));
}
