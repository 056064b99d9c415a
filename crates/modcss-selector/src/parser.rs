//! Selector Parser
//!
//! Backtracking parser built from three combinators over the token stream:
//! - `try_parse`: run one production, rewinding the stream on failure
//! - `try_parse_multiple`: first successful alternative wins
//! - `try_parse_until`: repeat a production until it fails
//!
//! Every failure is recorded against the deepest error seen so far. When the
//! whole parse fails, that deepest error is usually the most useful one to
//! report: it belongs to the attempt that matched the longest prefix.

use crate::ast::{
    AttributeExpression, AttributeOperator, AttributeSelector, AttributeValue, Combinator,
    ComplexSelector, CompoundSelector, Selector, SimpleSelector, StringLiteral,
};
use crate::error::ParseError;
use crate::token_stream::TokenStream;
use crate::tokenizer::{tokenize, TokenType};

pub type ParseResult<T> = Result<T, ParseError>;

/// A parse production over the parser state
type Production<T> = fn(&mut Parser) -> ParseResult<T>;

const NAME_TOKENS: &[TokenType] = &[
    TokenType::Letter,
    TokenType::Digit,
    TokenType::Minus,
    TokenType::Underscore,
];

const OPERATOR_PREFIX_TOKENS: &[TokenType] = &[
    TokenType::Tilde,
    TokenType::Pipe,
    TokenType::Caret,
    TokenType::Dollar,
    TokenType::Asterisk,
];

const COMBINATOR_TOKENS: &[TokenType] = &[
    TokenType::LeftAngleBracket,
    TokenType::Plus,
    TokenType::Tilde,
];

/// Outcome of a speculative parse
#[derive(Debug)]
pub struct TryParseResult<T> {
    pub result: Option<T>,
    pub errors: Vec<ParseError>,
}

impl<T> TryParseResult<T> {
    fn success(result: T) -> Self {
        Self { result: Some(result), errors: Vec::new() }
    }

    fn failure(errors: Vec<ParseError>) -> Self {
        Self { result: None, errors }
    }

    /// Turn into a `Result`, surfacing the deepest collected error
    pub fn into_result(self, fallback: ParseError) -> ParseResult<T> {
        match self.result {
            Some(result) => Ok(result),
            None => Err(ParseError::deepest(self.errors).unwrap_or(fallback)),
        }
    }
}

/// CSS selector parser
pub struct Parser {
    stream: TokenStream,
    deepest_error: Option<ParseError>,
}

impl Parser {
    pub fn new(selector: &str) -> Self {
        Self {
            stream: TokenStream::new(tokenize(selector)),
            deepest_error: None,
        }
    }

    /// Parse the whole input as one selector
    pub fn parse(mut self) -> ParseResult<ComplexSelector> {
        let outcome = match self.parse_complex_selector() {
            Ok(selector) => self.stream.expect_end_of_input().map(|()| selector),
            Err(err) => Err(err),
        };

        outcome.map_err(|err| match self.deepest_error.take() {
            Some(deepest) if deepest.offset() > err.offset() => deepest,
            _ => err,
        })
    }

    fn on_error_raised(&mut self, error: &ParseError) {
        if let Some(deepest) = &self.deepest_error {
            if deepest.offset() >= error.offset() {
                return;
            }
        }

        tracing::trace!(offset = error.offset(), "deepest selector error: {}", error.message);
        self.deepest_error = Some(error.clone());
    }

    // === Combinators ===

    fn try_parse<T>(&mut self, parse_fn: impl FnOnce(&mut Self) -> ParseResult<T>) -> TryParseResult<T> {
        self.stream.store_position();

        match parse_fn(self) {
            Ok(result) => {
                self.stream.clear_position();
                TryParseResult::success(result)
            }
            Err(err) => {
                self.stream.restore_position();
                self.on_error_raised(&err);
                TryParseResult::failure(vec![err])
            }
        }
    }

    fn try_parse_multiple<T>(&mut self, parse_fns: &[Production<T>]) -> TryParseResult<T> {
        let mut errors = Vec::new();

        for &parse_fn in parse_fns {
            let attempt = self.try_parse(parse_fn);
            if attempt.result.is_some() {
                return attempt;
            }
            errors.extend(attempt.errors);
        }

        TryParseResult::failure(errors)
    }

    fn try_parse_until<T>(&mut self, parse_fn: Production<T>) -> TryParseResult<Vec<T>> {
        let mut results = Vec::new();

        loop {
            let start = self.stream.offset();
            let attempt = self.try_parse(parse_fn);

            match attempt.result {
                Some(result) => {
                    results.push(result);
                    // A production that consumed nothing would succeed forever
                    if self.stream.offset() == start {
                        break;
                    }
                }
                None if results.is_empty() => {
                    return TryParseResult { result: Some(results), errors: attempt.errors };
                }
                None => break,
            }
        }

        TryParseResult::success(results)
    }

    fn error_here(&self, message: &str) -> ParseError {
        ParseError::new(message, self.stream.current_position())
    }

    // === Selectors ===

    fn parse_name(&mut self) -> ParseResult<Selector> {
        let first = self.stream.consume_expect(&[TokenType::Letter])?;
        let mut value = String::from(first.value);

        while let Some(token) = self.stream.consume_if_any(NAME_TOKENS) {
            value.push(token.value);
        }

        Ok(Selector::new(value))
    }

    fn parse_identifier(&mut self) -> ParseResult<Selector> {
        self.stream.consume_expect(&[TokenType::Hash])?;
        let name = self.parse_name()?;
        Ok(Selector::new(format!("#{}", name.value)))
    }

    fn parse_class(&mut self) -> ParseResult<Selector> {
        self.stream.consume_expect(&[TokenType::Period])?;
        let name = self.parse_name()?;
        Ok(Selector::new(format!(".{}", name.value)))
    }

    fn parse_string(&mut self) -> ParseResult<StringLiteral> {
        let open = self.stream.consume_expect(&[TokenType::Quote])?;
        let mut value = String::from(open.value);

        loop {
            let Some(token) = self.stream.consume() else {
                return Err(ParseError::new(
                    "Unterminated string literal",
                    self.stream.current_position(),
                ));
            };

            value.push(token.value);
            if token.is(TokenType::Quote) && token.value == open.value {
                break;
            }
        }

        Ok(StringLiteral { value })
    }

    fn parse_attribute_value(&mut self) -> ParseResult<AttributeValue> {
        let fallback = self.error_here("Expected string or name as attribute selector value");

        self.try_parse_multiple(&[
            |p| p.parse_string().map(AttributeValue::String),
            |p| p.parse_name().map(AttributeValue::Name),
        ])
        .into_result(fallback)
    }

    /// `ws? operator? '=' ws? value`
    fn parse_comparison(&mut self) -> ParseResult<(AttributeOperator, AttributeValue)> {
        self.stream.eat_whitespace();

        let prefix = self.stream.consume_if_any(OPERATOR_PREFIX_TOKENS);
        let equals = self.stream.consume_expect(&[TokenType::Equals])?;
        let operator = AttributeOperator::from_prefix(prefix.map(|t| t.kind))
            .ok_or_else(|| ParseError::new("Invalid attribute operator", equals.position))?;

        self.stream.eat_whitespace();
        let value = self.parse_attribute_value()?;

        Ok((operator, value))
    }

    fn parse_expression(&mut self) -> ParseResult<AttributeExpression> {
        let attribute = self.parse_name()?;
        let comparison = self.try_parse(Self::parse_comparison).result;
        let (operator, value) = comparison.unzip();

        Ok(AttributeExpression { attribute, operator, value })
    }

    fn parse_attribute_selector(&mut self) -> ParseResult<AttributeSelector> {
        self.stream.consume_expect(&[TokenType::LeftBracket])?;
        let expression = self.parse_expression()?;
        self.stream.consume_expect(&[TokenType::RightBracket])?;

        Ok(AttributeSelector { expression })
    }

    fn parse_simple_selector(&mut self) -> ParseResult<SimpleSelector> {
        let fallback = self.error_here("Expected a selector");

        self.try_parse_multiple(&[
            |p| p.parse_identifier().map(SimpleSelector::Selector),
            |p| p.parse_class().map(SimpleSelector::Selector),
            |p| p.parse_attribute_selector().map(SimpleSelector::Attribute),
            |p| p.parse_name().map(SimpleSelector::Selector),
        ])
        .into_result(fallback)
    }

    fn parse_compound_selector(&mut self) -> ParseResult<CompoundSelector> {
        let fallback = self.error_here("Expected at least one selector");
        let TryParseResult { result, errors } = self.try_parse_until(Self::parse_simple_selector);

        match result {
            Some(selectors) if !selectors.is_empty() => Ok(CompoundSelector { selectors }),
            _ => Err(ParseError::deepest(errors).unwrap_or(fallback)),
        }
    }

    // === Combinators ===

    fn parse_operator_combinator(&mut self) -> ParseResult<ComplexSelector> {
        let left = self.parse_compound_selector()?;
        self.stream.eat_whitespace();

        let operator = self.stream.consume_expect(COMBINATOR_TOKENS)?;

        self.stream.eat_whitespace();
        let right = self.parse_complex_selector()?;

        Ok(ComplexSelector::Combinator(Combinator { operator, left, right: Box::new(right) }))
    }

    fn parse_descendant_combinator(&mut self) -> ParseResult<ComplexSelector> {
        let left = self.parse_compound_selector()?;
        let operator = self.stream.consume_expect(&[TokenType::Whitespace])?;

        self.stream.eat_whitespace();
        let right = self.parse_complex_selector()?;

        Ok(ComplexSelector::Combinator(Combinator { operator, left, right: Box::new(right) }))
    }

    fn parse_complex_selector(&mut self) -> ParseResult<ComplexSelector> {
        let fallback = self.error_here("Expected a selector");

        self.try_parse_multiple(&[
            Self::parse_operator_combinator,
            Self::parse_descendant_combinator,
            |p| p.parse_compound_selector().map(ComplexSelector::Compound),
        ])
        .into_result(fallback)
    }
}
