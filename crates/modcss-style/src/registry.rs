//! Stylesheet Registry
//!
//! Holds every stylesheet registered for a test context, keyed by module
//! id. The registry is an ordinary owned value: whoever runs the assertions
//! creates one, fills it and resets it between tests.

use std::collections::HashMap;

use modcss_dom::StyleSource;

use crate::{CssError, Stylesheet, StylesheetRule};

/// A rule as seen through the registry
#[derive(Debug, Clone, Copy)]
pub struct RegisteredRule<'a> {
    /// Id of the stylesheet the rule belongs to
    pub stylesheet: &'a str,
    pub rule: &'a StylesheetRule,
    /// Registration index of the stylesheet
    pub sheet_index: usize,
    /// Position in the flattened rule list
    pub source_order: usize,
}

/// Stylesheets by module id, in registration order
#[derive(Debug, Default)]
pub struct StylesheetRegistry {
    sheets: Vec<Stylesheet>,
    index: HashMap<String, usize>,
}

impl StylesheetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register a stylesheet
    ///
    /// Returns `Ok(false)` without parsing when `id` is already registered.
    pub fn add(&mut self, id: &str, content: &str) -> Result<bool, CssError> {
        if self.index.contains_key(id) {
            tracing::debug!(stylesheet = id, "Stylesheet already registered, skipping");
            return Ok(false);
        }

        let sheet = Stylesheet::new(id, content)?;
        self.insert(sheet);
        Ok(true)
    }

    /// Register an already parsed stylesheet; no-op for known ids
    pub fn add_stylesheet(&mut self, sheet: Stylesheet) -> bool {
        if self.index.contains_key(sheet.id()) {
            tracing::debug!(stylesheet = sheet.id(), "Stylesheet already registered, skipping");
            return false;
        }
        self.insert(sheet);
        true
    }

    fn insert(&mut self, sheet: Stylesheet) {
        tracing::debug!(stylesheet = sheet.id(), rules = sheet.len(), "Registered stylesheet");
        self.index.insert(sheet.id().to_string(), self.sheets.len());
        self.sheets.push(sheet);
    }

    /// Register every source, returning how many were new
    ///
    /// Stops at the first source that fails to parse.
    pub fn add_sources(&mut self, sources: &[StyleSource]) -> Result<usize, CssError> {
        let mut added = 0;
        for source in sources {
            if self.add(&source.id, &source.css)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Every rule of every stylesheet, registration order then source order
    pub fn rules(&self) -> Vec<RegisteredRule<'_>> {
        self.sheets
            .iter()
            .enumerate()
            .flat_map(|(sheet_index, sheet)| sheet.rules().iter().map(move |rule| (sheet_index, sheet.id(), rule)))
            .enumerate()
            .map(|(source_order, (sheet_index, stylesheet, rule))| RegisteredRule {
                stylesheet,
                rule,
                sheet_index,
                source_order,
            })
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Stylesheet> {
        self.index.get(id).map(|&i| &self.sheets[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stylesheet> {
        self.sheets.iter()
    }

    /// Number of registered stylesheets
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Forget every stylesheet
    pub fn reset(&mut self) {
        self.sheets.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut registry = StylesheetRegistry::new();
        assert!(registry.add("m1", ".a { color: red; }").unwrap());
        assert!(!registry.add("m1", ".b { color: blue; }").unwrap());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.rules().len(), 1);
        assert_eq!(registry.get("m1").map(|s| s.content()), Some(".a { color: red; }"));
    }

    #[test]
    fn test_second_add_does_not_parse() {
        let mut registry = StylesheetRegistry::new();
        registry.add("m1", ".a { color: red; }").unwrap();
        // Would fail to parse if it were looked at
        assert!(matches!(registry.add("m1", "..broken {"), Ok(false)));
    }

    #[test]
    fn test_rules_are_flattened_in_order() {
        let mut registry = StylesheetRegistry::new();
        registry.add("m1", ".a { color: red; } .b { color: red; }").unwrap();
        registry.add("m2", ".c { color: red; }").unwrap();

        let rules = registry.rules();
        let keys: Vec<(String, usize, usize)> = rules
            .iter()
            .map(|r| (format!("{}:{}", r.stylesheet, r.rule.key()), r.sheet_index, r.source_order))
            .collect();
        assert_eq!(
            keys,
            vec![("m1:.a".to_string(), 0, 0), ("m1:.b".to_string(), 0, 1), ("m2:.c".to_string(), 1, 2)]
        );
    }

    #[test]
    fn test_failed_add_registers_nothing() {
        let mut registry = StylesheetRegistry::new();
        assert!(registry.add("bad", "..broken { color: red; }").is_err());
        assert!(!registry.contains("bad"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_sources_and_reset() {
        let mut registry = StylesheetRegistry::new();
        let sources = vec![
            StyleSource { id: "m1".into(), css: ".a { color: red; }".into() },
            StyleSource { id: "m2".into(), css: ".b { color: red; }".into() },
            StyleSource { id: "m1".into(), css: ".c { color: red; }".into() },
        ];
        assert_eq!(registry.add_sources(&sources).unwrap(), 2);
        assert_eq!(registry.iter().map(|s| s.id()).collect::<Vec<_>>(), vec!["m1", "m2"]);

        registry.reset();
        assert!(registry.is_empty());
        assert!(registry.rules().is_empty());
        assert!(registry.add("m1", ".a { color: red; }").unwrap());
    }
}
