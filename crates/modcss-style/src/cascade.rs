//! Style Match Resolver
//!
//! Answers "does this element have these styles?" by:
//! 1. Matching every registered selector against the element
//! 2. Ranking the matches by importance, specificity and source order
//! 3. Comparing each expected property against the matching declarations

use std::fmt;

use modcss_dom::{ElementQuery, NodeId};
use modcss_selector::{calculate_specificity, Specificity};
use serde::{Deserialize, Serialize};

use crate::properties::to_kebab_case;
use crate::{CssParser, Declaration, ResolveError, StylesheetRegistry, StylesheetRule};

/// How an expected property is judged satisfied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchStrategy {
    /// Some matching rule declares the property with the expected value
    #[default]
    AnyDeclaration,
    /// The declaration that wins the cascade has the expected value
    Cascade,
}

/// Resolver options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    pub strategy: MatchStrategy,
    /// Compare values in lightningcss's canonical spelling; otherwise the
    /// expected text must equal the value as written
    pub canonicalize_values: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::AnyDeclaration,
            canonicalize_values: true,
        }
    }
}

/// Expected property value
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectedValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for ExpectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ExpectedValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ExpectedValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for ExpectedValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ExpectedValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

/// Expected styles, in the order the caller listed them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectedStyles {
    entries: Vec<(String, ExpectedValue)>,
}

impl ExpectedStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, property: &str, value: impl Into<ExpectedValue>) -> Self {
        self.insert(property, value);
        self
    }

    /// Add or replace an expectation; the name may be camelCase
    pub fn insert(&mut self, property: &str, value: impl Into<ExpectedValue>) {
        let property = to_kebab_case(property);
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExpectedValue)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<ExpectedValue>> FromIterator<(K, V)> for ExpectedStyles {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut styles = Self::new();
        for (property, value) in iter {
            styles.insert(property.as_ref(), value);
        }
        styles
    }
}

/// A selector of a registered rule that matched the element
#[derive(Debug, Clone, Copy)]
pub struct CandidateMatch<'a> {
    pub stylesheet: &'a str,
    pub selector: &'a str,
    pub rule: &'a StylesheetRule,
    pub specificity: Specificity,
    pub sheet_index: usize,
    pub source_order: usize,
}

/// An expected property the element does not have
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedProperty {
    pub property: String,
    pub expected_value: String,
    /// Value the cascade resolves to as written, if any matching rule declares the property
    pub actual_value: Option<String>,
}

/// Outcome of resolving expected styles against an element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMatch {
    pub matched_all: bool,
    pub unmatched: Vec<UnmatchedProperty>,
    /// Number of matching selectors considered
    pub candidates: usize,
}

/// Style resolver - checks expected styles against matching rules
#[derive(Debug, Default)]
pub struct StyleResolver {
    options: ResolverOptions,
    parser: CssParser,
}

impl StyleResolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options, parser: CssParser::new() }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve `expected` against the rules of `registry` matching `element`
    ///
    /// Input is validated before any matching. Every unmatched property is
    /// reported, in the order of `expected`.
    pub fn resolve<Q: ElementQuery + ?Sized>(
        &self,
        host: &Q,
        element: NodeId,
        registry: &StylesheetRegistry,
        expected: &ExpectedStyles,
    ) -> Result<StyleMatch, ResolveError> {
        if !host.is_element(element) {
            return Err(ResolveError::NotAnElement);
        }
        if expected.is_empty() {
            return Err(ResolveError::NoProperties);
        }

        let candidates = self.candidates(host, element, registry);
        let mut unmatched = Vec::new();

        for (property, value) in expected.iter() {
            let expected_value = value.to_string();
            let winner = Self::cascade_winner(&candidates, property);

            let satisfied = match self.options.strategy {
                MatchStrategy::AnyDeclaration => candidates.iter().any(|c| {
                    c.rule
                        .declarations
                        .get(property)
                        .is_some_and(|d| self.values_equal(property, &expected_value, d))
                }),
                MatchStrategy::Cascade => {
                    winner.is_some_and(|d| self.values_equal(property, &expected_value, d))
                }
            };

            if !satisfied {
                tracing::debug!(property, expected = %expected_value, "Unmatched property");
                unmatched.push(UnmatchedProperty {
                    property: property.to_string(),
                    expected_value,
                    actual_value: winner.map(|d| d.value.clone()),
                });
            }
        }

        Ok(StyleMatch {
            matched_all: unmatched.is_empty(),
            unmatched,
            candidates: candidates.len(),
        })
    }

    /// Every registered selector matching `element`, in source order
    pub fn candidates<'r, Q: ElementQuery + ?Sized>(
        &self,
        host: &Q,
        element: NodeId,
        registry: &'r StylesheetRegistry,
    ) -> Vec<CandidateMatch<'r>> {
        let mut matches = Vec::new();

        for registered in registry.rules() {
            for selector in &registered.rule.selectors {
                if !host.matches(element, selector) {
                    continue;
                }

                let specificity = calculate_specificity(selector);
                tracing::trace!(
                    stylesheet = registered.stylesheet,
                    selector = selector.as_str(),
                    %specificity,
                    "Selector matches"
                );
                matches.push(CandidateMatch {
                    stylesheet: registered.stylesheet,
                    selector,
                    rule: registered.rule,
                    specificity,
                    sheet_index: registered.sheet_index,
                    source_order: registered.source_order,
                });
            }
        }

        matches
    }

    /// Declaration of `property` that wins the cascade among the candidates
    ///
    /// Importance first, then specificity, then source order; later wins ties.
    /// Source order is that of the declaring rule, so declarations merged
    /// from a repeated selector keep their own position.
    pub fn cascade_winner<'r>(candidates: &[CandidateMatch<'r>], property: &str) -> Option<&'r Declaration> {
        candidates
            .iter()
            .filter_map(|c| c.rule.declarations.get(property).map(|d| (d, c)))
            .max_by_key(|(d, c)| (d.important, c.specificity, c.sheet_index, d.rule_index))
            .map(|(d, _)| d)
    }

    fn values_equal(&self, property: &str, expected: &str, actual: &Declaration) -> bool {
        let expected = expected.trim();
        if expected == actual.value {
            return true;
        }
        if !self.options.canonicalize_values {
            return false;
        }

        let canonical = self
            .parser
            .canonical_value(property, expected)
            .unwrap_or_else(|| expected.to_string());
        canonical == actual.canonical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modcss_dom::DomTree;

    fn element(classes: &str) -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.set_attribute(div, "class", classes);
        tree.append_child(tree.root(), div);
        (tree, div)
    }

    fn registry(css: &str) -> StylesheetRegistry {
        let mut registry = StylesheetRegistry::new();
        registry.add("m1", css).unwrap();
        registry
    }

    #[test]
    fn test_expected_value_display() {
        assert_eq!(ExpectedValue::from(10).to_string(), "10");
        assert_eq!(ExpectedValue::from(0.5).to_string(), "0.5");
        assert_eq!(ExpectedValue::from("red").to_string(), "red");
    }

    #[test]
    fn test_expected_styles_normalise_names() {
        let styles = ExpectedStyles::new().with("backgroundColor", "red").with("background-color", "blue");
        assert_eq!(styles.len(), 1);
        assert_eq!(styles.iter().next(), Some(("background-color", &ExpectedValue::from("blue"))));
    }

    #[test]
    fn test_candidates_rank() {
        let (tree, div) = element("a b");
        let registry = registry(".a.b { color: red; } .a { color: blue; } div { color: green; }");
        let resolver = StyleResolver::default();

        let candidates = resolver.candidates(&tree, div, &registry);
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].specificity, Specificity(0, 2, 0));

        let winner = StyleResolver::cascade_winner(&candidates, "color");
        assert_eq!(winner.map(|d| d.value.as_str()), Some("red"));
    }

    #[test]
    fn test_source_order_breaks_ties() {
        let (tree, div) = element("a b");
        let registry = registry(".a { color: red; } .b { color: blue; }");
        let candidates = StyleResolver::default().candidates(&tree, div, &registry);
        let winner = StyleResolver::cascade_winner(&candidates, "color");
        assert_eq!(winner.map(|d| d.value.as_str()), Some("blue"));
    }

    #[test]
    fn test_repeated_selector_keeps_later_position() {
        let (tree, div) = element("a b");
        let registry = registry(".a { color: red; } .b { color: green; } .a { color: blue; }");
        let expected = ExpectedStyles::new().with("color", "blue");

        let outcome = StyleResolver::new(ResolverOptions { strategy: MatchStrategy::Cascade, ..Default::default() })
            .resolve(&tree, div, &registry, &expected)
            .unwrap();
        assert!(outcome.matched_all, "{:?}", outcome.unmatched);
    }

    #[test]
    fn test_merged_declarations_keep_earlier_position() {
        let (tree, div) = element("a b");
        let registry = registry(".a { color: red; margin: 0; } .b { margin: 4px; } .a { color: blue; }");
        let candidates = StyleResolver::default().candidates(&tree, div, &registry);

        let margin = StyleResolver::cascade_winner(&candidates, "margin");
        assert_eq!(margin.map(|d| d.value.as_str()), Some("4px"));
        let color = StyleResolver::cascade_winner(&candidates, "color");
        assert_eq!(color.map(|d| d.value.as_str()), Some("blue"));
    }

    #[test]
    fn test_later_stylesheet_wins_ties() {
        let (tree, div) = element("a b");
        let mut registry = StylesheetRegistry::new();
        registry.add("m1", ".x { color: gray; } .a { color: red; }").unwrap();
        registry.add("m2", ".b { color: blue; }").unwrap();

        let candidates = StyleResolver::default().candidates(&tree, div, &registry);
        let winner = StyleResolver::cascade_winner(&candidates, "color");
        assert_eq!(winner.map(|d| d.value.as_str()), Some("blue"));
    }

    #[test]
    fn test_important_beats_specificity() {
        let (tree, div) = element("a");
        let registry = registry("div { color: red !important; } div.a { color: blue; }");
        let candidates = StyleResolver::default().candidates(&tree, div, &registry);
        let winner = StyleResolver::cascade_winner(&candidates, "color");
        assert_eq!(winner.map(|d| d.value.as_str()), Some("red"));
    }

    #[test]
    fn test_strategies_differ_on_overridden_values() {
        let (tree, div) = element("a b");
        let registry = registry(".a.b { color: red; } .a { color: blue; }");
        let expected = ExpectedStyles::new().with("color", "blue");

        let any = StyleResolver::default().resolve(&tree, div, &registry, &expected).unwrap();
        assert!(any.matched_all);

        let cascade = StyleResolver::new(ResolverOptions { strategy: MatchStrategy::Cascade, ..Default::default() })
            .resolve(&tree, div, &registry, &expected)
            .unwrap();
        assert!(!cascade.matched_all);
        assert_eq!(cascade.unmatched[0].actual_value.as_deref(), Some("red"));
    }

    #[test]
    fn test_validation_happens_first() {
        let (tree, _) = element("a");
        let registry = StylesheetRegistry::new();
        let resolver = StyleResolver::default();

        let err = resolver.resolve(&tree, tree.root(), &registry, &ExpectedStyles::new().with("color", "red"));
        assert_eq!(err, Err(ResolveError::NotAnElement));
    }

    #[test]
    fn test_values_compare_canonically() {
        let (tree, div) = element("a");
        let registry = registry(".a { color: #ff0000; }");
        let expected = ExpectedStyles::new().with("color", "red");

        let canonical = StyleResolver::default().resolve(&tree, div, &registry, &expected).unwrap();
        assert!(canonical.matched_all);
    }

    #[test]
    fn test_raw_values_match_as_written() {
        let (tree, div) = element("c");
        let registry = registry(".c { color: #FF0000; margin: 0px 0px; }");
        let raw = StyleResolver::new(ResolverOptions { canonicalize_values: false, ..Default::default() });

        let written = ExpectedStyles::new().with("color", "#FF0000").with("margin", " 0px 0px ");
        let outcome = raw.resolve(&tree, div, &registry, &written).unwrap();
        assert!(outcome.matched_all, "{:?}", outcome.unmatched);

        let respelled = ExpectedStyles::new().with("color", "red").with("margin", "0");
        let outcome = raw.resolve(&tree, div, &registry, &respelled).unwrap();
        assert_eq!(outcome.unmatched.len(), 2);
        assert_eq!(outcome.unmatched[0].actual_value.as_deref(), Some("#FF0000"));
        assert_eq!(outcome.unmatched[1].actual_value.as_deref(), Some("0px 0px"));

        let outcome = StyleResolver::default().resolve(&tree, div, &registry, &respelled).unwrap();
        assert!(outcome.matched_all, "{:?}", outcome.unmatched);
    }

    #[test]
    fn test_strategy_deserializes_camel_case() {
        let strategy: MatchStrategy = serde_json::from_str("\"anyDeclaration\"").unwrap();
        assert_eq!(strategy, MatchStrategy::AnyDeclaration);
        let strategy: MatchStrategy = serde_json::from_str("\"cascade\"").unwrap();
        assert_eq!(strategy, MatchStrategy::Cascade);
    }
}
