//! Element Query and Selector Matching
//!
//! `matches`, `query_selector` and `query_selector_all` over the arena tree.
//! Selectors are matched right to left: the subject compound is checked
//! against the element, then each combinator walks to the candidate parents
//! or siblings for the compound to its left.

use modcss_selector::{
    AttributeOperator, AttributeSelector, ChainLink, CombinatorKind, ComplexSelector,
    CompoundSelector, SelectorKind, SimpleSelector,
};

use crate::{Document, DomTree, NodeId};

/// Element query trait
///
/// The host side of style matching: anything that can say whether an element
/// matches a selector string.
pub trait ElementQuery {
    /// Whether `element` refers to an element node
    fn is_element(&self, element: NodeId) -> bool;

    /// Check if element matches selector
    ///
    /// Selectors that cannot be parsed match nothing.
    fn matches(&self, element: NodeId, selector: &str) -> bool;

    /// Short description of the element, for messages
    fn describe(&self, element: NodeId) -> String;

    /// All elements below `root` matching the selector, in document order
    fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    /// First element below `root` matching the selector
    fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        self.query_selector_all(root, selector).into_iter().next()
    }
}

/// Check a parsed selector against an element
pub fn matches_selector(tree: &DomTree, element: NodeId, selector: &ComplexSelector) -> bool {
    let chain = selector.chain();
    tree.is_element(element) && matches_chain(tree, element, &chain)
}

fn parse_for_matching(selector: &str) -> Option<ComplexSelector> {
    match modcss_selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::trace!(selector, "selector not supported for matching: {}", err);
            None
        }
    }
}

/// `links` is non-empty; its last compound must match `element`
fn matches_chain(tree: &DomTree, element: NodeId, links: &[ChainLink<'_>]) -> bool {
    let Some((last, rest)) = links.split_last() else {
        return true;
    };

    if !matches_compound(tree, element, last.compound) {
        return false;
    }

    let Some(combinator) = last.combinator else {
        return true;
    };

    match combinator {
        CombinatorKind::Child => tree
            .parent_element(element)
            .is_some_and(|parent| matches_chain(tree, parent, rest)),
        CombinatorKind::Descendant => {
            let mut current = tree.parent_element(element);
            while let Some(ancestor) = current {
                if matches_chain(tree, ancestor, rest) {
                    return true;
                }
                current = tree.parent_element(ancestor);
            }
            false
        }
        CombinatorKind::NextSibling => tree
            .previous_element_sibling(element)
            .is_some_and(|sibling| matches_chain(tree, sibling, rest)),
        CombinatorKind::SubsequentSibling => {
            let mut current = tree.previous_element_sibling(element);
            while let Some(sibling) = current {
                if matches_chain(tree, sibling, rest) {
                    return true;
                }
                current = tree.previous_element_sibling(sibling);
            }
            false
        }
    }
}

fn matches_compound(tree: &DomTree, element: NodeId, compound: &CompoundSelector) -> bool {
    let Some(elem) = tree.get(element).and_then(|n| n.as_element()) else {
        return false;
    };

    compound.selectors.iter().all(|simple| match simple {
        SimpleSelector::Selector(selector) => match selector.kind() {
            SelectorKind::Type => tree.resolve(elem.name).eq_ignore_ascii_case(selector.name()),
            SelectorKind::Id => elem.id.as_deref() == Some(selector.name()),
            SelectorKind::Class => elem.has_class(selector.name()),
        },
        SimpleSelector::Attribute(attribute) => matches_attribute(tree, element, attribute),
    })
}

fn matches_attribute(tree: &DomTree, element: NodeId, attribute: &AttributeSelector) -> bool {
    let Some(actual) = tree.get_attribute(element, attribute.name()) else {
        return false;
    };

    let expression = &attribute.expression;
    let (Some(operator), Some(value)) = (expression.operator, &expression.value) else {
        return true;
    };
    let expected = value.as_str();

    match operator {
        AttributeOperator::Equals => actual == expected,
        AttributeOperator::Includes => {
            !expected.is_empty() && actual.split_ascii_whitespace().any(|w| w == expected)
        }
        AttributeOperator::DashMatch => {
            actual == expected
                || actual
                    .strip_prefix(expected)
                    .is_some_and(|rest| rest.starts_with('-'))
        }
        AttributeOperator::Prefix => !expected.is_empty() && actual.starts_with(expected),
        AttributeOperator::Suffix => !expected.is_empty() && actual.ends_with(expected),
        AttributeOperator::Substring => !expected.is_empty() && actual.contains(expected),
    }
}

impl ElementQuery for DomTree {
    fn is_element(&self, element: NodeId) -> bool {
        DomTree::is_element(self, element)
    }

    fn matches(&self, element: NodeId, selector: &str) -> bool {
        parse_for_matching(selector).is_some_and(|parsed| matches_selector(self, element, &parsed))
    }

    fn describe(&self, element: NodeId) -> String {
        DomTree::describe(self, element)
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(parsed) = parse_for_matching(selector) else {
            return Vec::new();
        };

        self.descendants(root)
            .into_iter()
            .filter(|&id| matches_selector(self, id, &parsed))
            .collect()
    }
}

impl ElementQuery for Document {
    fn is_element(&self, element: NodeId) -> bool {
        self.tree.is_element(element)
    }

    fn matches(&self, element: NodeId, selector: &str) -> bool {
        ElementQuery::matches(&self.tree, element, selector)
    }

    fn describe(&self, element: NodeId) -> String {
        self.tree.describe(element)
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        self.tree.query_selector_all(root, selector)
    }
}
