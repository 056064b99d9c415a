//! modcss Selector Parser
//!
//! Tokenizer, token stream and backtracking parser for the CSS selector
//! subset used by CSS-module assertions: type names, `#id`, `.class`,
//! attribute selectors with all six comparison operators, and the four
//! combinators. Also provides selector specificity.
//!
//! ```
//! let selector = modcss_selector::parse("ul > li.item[data-x^=\"a\"]").unwrap();
//! assert_eq!(selector.to_string(), "ul > li.item[data-x^=\"a\"]");
//! ```

mod ast;
mod error;
mod parser;
mod specificity;
mod token_stream;
mod tokenizer;

use std::str::FromStr;

pub use ast::{
    AttributeExpression, AttributeOperator, AttributeSelector, AttributeValue, ChainLink,
    Combinator, CombinatorKind, ComplexSelector, CompoundSelector, Selector, SelectorKind,
    SimpleSelector, StringLiteral,
};
pub use error::ParseError;
pub use parser::{ParseResult, Parser, TryParseResult};
pub use specificity::{calculate as calculate_specificity, Specificity};
pub use token_stream::TokenStream;
pub use tokenizer::{tokenize, Position, Token, TokenType};

/// Parse a selector string
pub fn parse(selector: &str) -> Result<ComplexSelector, ParseError> {
    Parser::new(selector).parse().inspect_err(|err| {
        tracing::debug!(selector, "selector rejected: {}", err);
    })
}

impl FromStr for ComplexSelector {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
