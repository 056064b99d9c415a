//! Matcher Context
//!
//! Owns the stylesheet registry for one test run. Callers create a context,
//! load the documents or stylesheets under test, run assertions and reset
//! it before the next test.

use modcss_dom::{Document, ElementQuery, NodeId};
use modcss_style::{ExpectedStyles, StyleResolver, StylesheetRegistry};

use crate::{AssertionOutcome, Config, Result};

/// Stylesheet registry plus the resolver configured for it
#[derive(Debug)]
pub struct MatcherContext {
    config: Config,
    registry: StylesheetRegistry,
    resolver: StyleResolver,
}

impl MatcherContext {
    pub fn new(config: Config) -> Self {
        let resolver = StyleResolver::new(config.resolver_options());
        Self {
            config,
            registry: StylesheetRegistry::new(),
            resolver,
        }
    }

    /// Context configured from camelCase JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(Config::from_json(json)?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &StylesheetRegistry {
        &self.registry
    }

    /// Register a CSS module; no-op when `id` is already registered
    pub fn add_stylesheet(&mut self, id: &str, css: &str) -> Result<bool> {
        Ok(self.registry.add(id, css)?)
    }

    /// Register every module style element of `document`
    ///
    /// Returns how many stylesheets were new.
    pub fn load_document(&mut self, document: &Document) -> Result<usize> {
        let sources = document.style_sources(&self.config.style_source_attribute);
        let added = self.registry.add_sources(&sources)?;
        tracing::debug!(found = sources.len(), added, "Loaded document style sources");
        Ok(added)
    }

    /// Forget every registered stylesheet
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    /// First element of `document` matching `selector`
    ///
    /// Unlike `ElementQuery::query_selector`, an invalid selector is an error.
    pub fn find_element(&self, document: &Document, selector: &str) -> Result<Option<NodeId>> {
        let parsed = modcss_selector::parse(selector)?;
        let tree = document.tree();
        Ok(tree
            .descendants(tree.root())
            .into_iter()
            .find(|&id| modcss_dom::matches_selector(tree, id, &parsed)))
    }

    /// Check that `element` has every style in `expected`
    pub fn to_have_css_style<Q: ElementQuery + ?Sized>(
        &self,
        host: &Q,
        element: NodeId,
        expected: &ExpectedStyles,
    ) -> Result<AssertionOutcome> {
        let outcome = self.resolver.resolve(host, element, &self.registry, expected)?;

        Ok(AssertionOutcome {
            pass: outcome.matched_all,
            element: host.describe(element),
            expected: expected.clone(),
            unmatched: outcome.unmatched,
        })
    }
}

impl Default for MatcherContext {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
