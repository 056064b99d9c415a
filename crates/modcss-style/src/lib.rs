//! modcss Style System
//!
//! Stylesheet parsing (lightningcss), the stylesheet registry and the
//! resolver that checks expected styles against the rules matching an
//! element.

mod cascade;
mod parser;
mod registry;
mod source;
mod stylesheet;

pub mod properties;

pub use cascade::{
    CandidateMatch, ExpectedStyles, ExpectedValue, MatchStrategy, ResolverOptions, StyleMatch,
    StyleResolver, UnmatchedProperty,
};
pub use parser::CssParser;
pub use registry::{RegisteredRule, StylesheetRegistry};
pub use stylesheet::{Declarations, Stylesheet, StylesheetRule};

/// Parse a CSS stylesheet
pub fn parse_stylesheet(id: &str, css: &str) -> Result<Stylesheet, CssError> {
    Stylesheet::new(id, css)
}

/// CSS declaration (property: value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Kebab-case property name
    pub property: String,
    /// Value as written in the stylesheet
    pub value: String,
    /// Value as serialized by lightningcss
    pub canonical: String,
    pub important: bool,
    /// Index of the declaring rule among the stylesheet's style rules
    pub rule_index: usize,
}

/// CSS parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CssError {
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError { line: u32, column: u32, message: String },

    #[error("Failed to serialize CSS: {0}")]
    Serialize(String),
}

/// Invalid input to the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("the received value is not an element")]
    NotAnElement,

    #[error("no style properties were given to match")]
    NoProperties,
}
