//! Stylesheet Model
//!
//! A stylesheet is parsed once, when constructed. Its rules are kept in
//! source order and indexed by their selector-list key.

use std::collections::HashMap;

use crate::{CssError, CssParser, Declaration};

/// Ordered declarations of one rule
///
/// One entry per property. A later declaration replaces an earlier one,
/// except that a normal declaration never replaces an `!important` one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    entries: Vec<Declaration>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, declaration: Declaration) {
        match self.entries.iter_mut().find(|d| d.property == declaration.property) {
            Some(existing) if existing.important && !declaration.important => {}
            Some(existing) => *existing = declaration,
            None => self.entries.push(declaration),
        }
    }

    pub fn get(&self, property: &str) -> Option<&Declaration> {
        self.entries.iter().find(|d| d.property == property)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A style rule: selector texts and the declarations they share
#[derive(Debug, Clone, PartialEq)]
pub struct StylesheetRule {
    /// Individual selectors of the rule's selector list, in order
    pub selectors: Vec<String>,
    pub declarations: Declarations,
}

impl StylesheetRule {
    /// Canonical selector-list key, e.g. `h1, h2 > span`
    pub fn key(&self) -> String {
        self.selectors.join(", ")
    }
}

/// Parsed stylesheet of one CSS module
#[derive(Debug, Clone)]
pub struct Stylesheet {
    id: String,
    content: String,
    rules: Vec<StylesheetRule>,
    by_key: HashMap<String, usize>,
}

impl Stylesheet {
    /// Parse `content` as the stylesheet identified by `id`
    ///
    /// Rules whose selector lists serialize to the same key are merged into
    /// the first one, declarations applied in source order. Each declaration
    /// keeps the index of the rule that declared it.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Result<Self, CssError> {
        let id = id.into();
        let content = content.into();
        let parsed = CssParser::new().parse(&content)?;

        let mut rules: Vec<StylesheetRule> = Vec::with_capacity(parsed.len());
        let mut by_key = HashMap::with_capacity(parsed.len());

        for rule in parsed {
            let key = rule.key();
            if let Some(&index) = by_key.get(&key) {
                let existing: &mut StylesheetRule = &mut rules[index];
                for declaration in rule.declarations.iter() {
                    existing.declarations.insert(declaration.clone());
                }
                continue;
            }

            by_key.insert(key, rules.len());
            rules.push(rule);
        }

        tracing::debug!(stylesheet = %id, rules = rules.len(), "Parsed stylesheet");
        Ok(Self { id, content, rules, by_key })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw CSS text
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn rules(&self) -> &[StylesheetRule] {
        &self.rules
    }

    /// Rule by selector-list key
    pub fn get(&self, key: &str) -> Option<&StylesheetRule> {
        self.by_key.get(key).map(|&index| &self.rules[index])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
