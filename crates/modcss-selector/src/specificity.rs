//! Selector Specificity
//!
//! Two ways to score a selector:
//! - [`calculate`] works on selector text and understands syntax the parser
//!   does not (pseudo-classes, pseudo-elements, `*`), so it can rank any rule
//!   found in a stylesheet.
//! - `specificity()` on the AST types, for selectors already parsed.
//!
//! Both agree on every selector the parser accepts.

use std::fmt;
use std::ops::Add;

use crate::ast::{ComplexSelector, CompoundSelector, SelectorKind, SimpleSelector};

/// Selector specificity (a, b, c) where:
/// a = ID selectors
/// b = class, attribute, pseudo-class
/// c = type, pseudo-element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    pub const ZERO: Specificity = Specificity(0, 0, 0);

    #[inline]
    pub fn ids(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn classes(&self) -> u32 {
        self.1
    }

    #[inline]
    pub fn types(&self) -> u32 {
        self.2
    }
}

impl Add for Specificity {
    type Output = Specificity;

    fn add(self, rhs: Self) -> Self {
        Specificity(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0, self.1, self.2)
    }
}

// Pseudo-elements that may be written with a single colon
const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["before", "after", "first-line", "first-letter"];

/// Specificity of a selector given as text
///
/// The selector is split on whitespace into parts; each part is scanned for
/// its simple selectors. Combinator characters and `*` count for nothing.
pub fn calculate(selector: &str) -> Specificity {
    split_parts(selector)
        .into_iter()
        .map(part_specificity)
        .fold(Specificity::ZERO, Add::add)
}

/// Split on whitespace that is not inside brackets, parentheses or quotes
fn split_parts(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start: Option<usize> = None;

    for (i, c) in selector.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '[' | '(' => depth += 1,
                ']' | ')' => depth = depth.saturating_sub(1),
                c if c.is_whitespace() && depth == 0 => {
                    if let Some(s) = start.take() {
                        parts.push(&selector[s..i]);
                    }
                    continue;
                }
                _ => {}
            },
        }

        if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        parts.push(&selector[s..]);
    }

    parts
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn part_specificity(part: &str) -> Specificity {
    let chars: Vec<char> = part.chars().collect();
    let mut specificity = Specificity::ZERO;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '#' => {
                specificity.0 += 1;
                i = skip_name(&chars, i + 1);
            }
            '.' => {
                specificity.1 += 1;
                i = skip_name(&chars, i + 1);
            }
            '[' => {
                specificity.1 += 1;
                i = skip_group(&chars, i, '[', ']');
            }
            ':' if chars.get(i + 1) == Some(&':') => {
                specificity.2 += 1;
                i = skip_arguments(&chars, skip_name(&chars, i + 2));
            }
            ':' => {
                let end = skip_name(&chars, i + 1);
                let name: String = chars[i + 1..end].iter().collect::<String>().to_ascii_lowercase();

                if LEGACY_PSEUDO_ELEMENTS.contains(&name.as_str()) {
                    specificity.2 += 1;
                } else if name != "where" {
                    specificity.1 += 1;
                }
                i = skip_arguments(&chars, end);
            }
            c if c.is_alphabetic() => {
                specificity.2 += 1;
                i = skip_name(&chars, i);
            }
            _ => i += 1,
        }
    }

    specificity
}

fn skip_name(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if is_name_char(c) => i += 1,
            _ => break,
        }
    }
    i.min(chars.len())
}

fn skip_arguments(chars: &[char], i: usize) -> usize {
    if chars.get(i) == Some(&'(') {
        skip_group(chars, i, '(', ')')
    } else {
        i
    }
}

/// Index just past the group closing the one opened at `i`
fn skip_group(chars: &[char], mut i: usize, open: char, close: char) -> usize {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    while i < chars.len() {
        let c = chars[i];
        i += 1;

        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == open => depth += 1,
            None if c == close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
            None => {}
        }
    }

    i
}

impl SimpleSelector {
    pub fn specificity(&self) -> Specificity {
        match self {
            SimpleSelector::Selector(s) => match s.kind() {
                SelectorKind::Id => Specificity(1, 0, 0),
                SelectorKind::Class => Specificity(0, 1, 0),
                SelectorKind::Type => Specificity(0, 0, 1),
            },
            SimpleSelector::Attribute(_) => Specificity(0, 1, 0),
        }
    }
}

impl CompoundSelector {
    pub fn specificity(&self) -> Specificity {
        self.selectors
            .iter()
            .map(SimpleSelector::specificity)
            .fold(Specificity::ZERO, Add::add)
    }
}

impl ComplexSelector {
    pub fn specificity(&self) -> Specificity {
        self.chain()
            .iter()
            .map(|link| link.compound.specificity())
            .fold(Specificity::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_buckets() {
        assert_eq!(calculate("#a"), Specificity(1, 0, 0));
        assert_eq!(calculate(".b"), Specificity(0, 1, 0));
        assert_eq!(calculate("div"), Specificity(0, 0, 1));
    }

    #[test]
    fn test_ordering() {
        assert!(calculate("#a") > calculate(".b"));
        assert!(calculate(".b") > calculate("div"));
        assert!(calculate(".a.b") > calculate(".z"));
        assert!(calculate("#x") > calculate(".a.b.c.d div span"));
    }

    #[test]
    fn test_compound_parts() {
        assert_eq!(calculate("div.foo#bar[title]"), Specificity(1, 2, 1));
    }

    #[test]
    fn test_attribute_and_pseudo_class() {
        assert_eq!(calculate("[data-x=\"a b\"]"), Specificity(0, 1, 0));
        assert_eq!(calculate("a:hover"), Specificity(0, 1, 1));
        assert_eq!(calculate("li:nth-child(2n + 1)"), Specificity(0, 1, 1));
        assert_eq!(calculate(":where(.a) p"), Specificity(0, 0, 1));
    }

    #[test]
    fn test_pseudo_elements() {
        assert_eq!(calculate("p::first-line"), Specificity(0, 0, 2));
        assert_eq!(calculate("p:before"), Specificity(0, 0, 2));
    }

    #[test]
    fn test_combinators_and_universal() {
        assert_eq!(calculate("ul > li + li ~ .x"), Specificity(0, 1, 3));
        assert_eq!(calculate("*"), Specificity::ZERO);
        assert_eq!(calculate("ul>li"), Specificity(0, 0, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Specificity(1, 2, 3).to_string(), "(1, 2, 3)");
    }
}
