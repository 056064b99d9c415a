//! Selector AST
//!
//! Every node renders back to selector text through `Display`; parsing the
//! rendered text yields an equal tree.

use std::fmt;

use crate::tokenizer::{Token, TokenType};

/// Simple selector: type name, `#id` or `.class`
///
/// The value keeps its leading sigil, e.g. `#main` or `.card`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    pub value: String,
}

/// What a simple selector targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    Type,
    Id,
    Class,
}

impl Selector {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    pub fn kind(&self) -> SelectorKind {
        match self.value.as_bytes().first() {
            Some(b'#') => SelectorKind::Id,
            Some(b'.') => SelectorKind::Class,
            _ => SelectorKind::Type,
        }
    }

    /// Name without the `#`/`.` sigil
    pub fn name(&self) -> &str {
        match self.kind() {
            SelectorKind::Type => &self.value,
            SelectorKind::Id | SelectorKind::Class => &self.value[1..],
        }
    }
}

/// Quoted attribute value, quotes included
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringLiteral {
    pub value: String,
}

impl StringLiteral {
    /// Text between the quotes
    pub fn unquoted(&self) -> &str {
        let inner = self.value.get(1..).unwrap_or("");
        inner.get(..inner.len().saturating_sub(1)).unwrap_or("")
    }
}

/// Attribute comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeOperator {
    /// `=`
    Equals,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

impl AttributeOperator {
    /// Operator from the optional token preceding `=`
    pub fn from_prefix(prefix: Option<TokenType>) -> Option<Self> {
        match prefix {
            None => Some(Self::Equals),
            Some(TokenType::Tilde) => Some(Self::Includes),
            Some(TokenType::Pipe) => Some(Self::DashMatch),
            Some(TokenType::Caret) => Some(Self::Prefix),
            Some(TokenType::Dollar) => Some(Self::Suffix),
            Some(TokenType::Asterisk) => Some(Self::Substring),
            Some(_) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
            Self::Prefix => "^=",
            Self::Suffix => "$=",
            Self::Substring => "*=",
        }
    }
}

/// Attribute value: quoted string or bare name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    String(StringLiteral),
    Name(Selector),
}

impl AttributeValue {
    /// Value used for comparison (quotes stripped)
    pub fn as_str(&self) -> &str {
        match self {
            Self::String(s) => s.unquoted(),
            Self::Name(n) => &n.value,
        }
    }
}

/// `name`, or `name op value`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeExpression {
    pub attribute: Selector,
    pub operator: Option<AttributeOperator>,
    pub value: Option<AttributeValue>,
}

/// `[expression]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSelector {
    pub expression: AttributeExpression,
}

impl AttributeSelector {
    #[inline]
    pub fn name(&self) -> &str {
        &self.expression.attribute.value
    }
}

/// Member of a compound selector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    Selector(Selector),
    Attribute(AttributeSelector),
}

/// Simple selectors applied to the same element, e.g. `div.foo#bar[attr]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompoundSelector {
    pub selectors: Vec<SimpleSelector>,
}

/// Relationship expressed by a combinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinatorKind {
    /// Descendant (whitespace)
    Descendant,
    /// Direct child (>)
    Child,
    /// Adjacent sibling (+)
    NextSibling,
    /// General sibling (~)
    SubsequentSibling,
}

impl CombinatorKind {
    pub fn from_token(token: &Token) -> Self {
        match token.kind {
            TokenType::LeftAngleBracket => Self::Child,
            TokenType::Plus => Self::NextSibling,
            TokenType::Tilde => Self::SubsequentSibling,
            _ => Self::Descendant,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => ">",
            Self::NextSibling => "+",
            Self::SubsequentSibling => "~",
        }
    }
}

/// `left operator right`
///
/// `left` is parsed before the operator is consumed; `right` is the rest of
/// the selector parsed recursively.
#[derive(Debug, Clone)]
pub struct Combinator {
    pub operator: Token,
    pub left: CompoundSelector,
    pub right: Box<ComplexSelector>,
}

impl Combinator {
    #[inline]
    pub fn kind(&self) -> CombinatorKind {
        CombinatorKind::from_token(&self.operator)
    }
}

// Structural equality: where the operator token sat in the source is irrelevant.
impl PartialEq for Combinator {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.left == other.left && self.right == other.right
    }
}

impl Eq for Combinator {}

/// Root of a parsed selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplexSelector {
    Compound(CompoundSelector),
    Combinator(Combinator),
}

/// One compound of a flattened selector with the combinator linking it to the previous one
#[derive(Debug, Clone, Copy)]
pub struct ChainLink<'a> {
    pub combinator: Option<CombinatorKind>,
    pub compound: &'a CompoundSelector,
}

impl ComplexSelector {
    /// Compounds in source order, each with the combinator that precedes it
    pub fn chain(&self) -> Vec<ChainLink<'_>> {
        let mut links = Vec::new();
        let mut combinator = None;
        let mut current = self;

        loop {
            match current {
                Self::Compound(compound) => {
                    links.push(ChainLink { combinator, compound });
                    return links;
                }
                Self::Combinator(node) => {
                    links.push(ChainLink { combinator, compound: &node.left });
                    combinator = Some(node.kind());
                    current = &node.right;
                }
            }
        }
    }

    /// Rightmost compound, the one the selector targets
    pub fn subject(&self) -> &CompoundSelector {
        match self {
            Self::Compound(compound) => compound,
            Self::Combinator(node) => node.right.subject(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => s.fmt(f),
            Self::Name(n) => n.fmt(f),
        }
    }
}

impl fmt::Display for AttributeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.attribute.fmt(f)?;
        if let (Some(operator), Some(value)) = (&self.operator, &self.value) {
            write!(f, "{}{}", operator.as_str(), value)?;
        }
        Ok(())
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.expression)
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(s) => s.fmt(f),
            Self::Attribute(a) => a.fmt(f),
        }
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for selector in &self.selectors {
            selector.fmt(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            CombinatorKind::Descendant => write!(f, "{} {}", self.left, self.right),
            kind => write!(f, "{} {} {}", self.left, kind.as_str(), self.right),
        }
    }
}

impl fmt::Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compound(c) => c.fmt(f),
            Self::Combinator(c) => c.fmt(f),
        }
    }
}
