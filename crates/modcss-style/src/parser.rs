//! CSS Parser using lightningcss
//!
//! Parses CSS text into rules of selector texts and declarations. Selectors
//! come from lightningcss's serializer. Each declaration keeps its value as
//! written next to lightningcss's canonical spelling of it.

use lightningcss::properties::{Property, PropertyId};
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::traits::ToCss;

use crate::source::{self, SourceDeclaration};
use crate::{CssError, Declaration, Declarations, StylesheetRule};

/// CSS Parser
#[derive(Debug, Default)]
pub struct CssParser;

impl CssParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CSS stylesheet into its style rules, in source order
    pub fn parse(&self, css: &str) -> Result<Vec<StylesheetRule>, CssError> {
        let stylesheet = StyleSheet::parse(css, ParserOptions::default()).map_err(|e| {
            let (line, column) = e.loc.as_ref().map(|l| (l.line + 1, l.column)).unwrap_or((0, 0));
            CssError::ParseError { line, column, message: e.kind.to_string() }
        })?;

        let style_rules = stylesheet.rules.0.iter().filter(|r| matches!(r, CssRule::Style(_))).count();
        let blocks = source::style_blocks(css);
        if blocks.len() != style_rules {
            tracing::debug!(
                parsed = style_rules,
                scanned = blocks.len(),
                "Source text unavailable, keeping serialized values"
            );
        }

        let mut rules = Vec::new();
        for rule in stylesheet.rules.0.iter() {
            let index = rules.len();
            let written = if blocks.len() == style_rules {
                blocks.get(index).map(Vec::as_slice)
            } else {
                None
            };

            if let Some(converted) = self.convert_rule(rule, index, written)? {
                rules.push(converted);
            }
        }

        tracing::debug!("Parsed {} style rules", rules.len());
        Ok(rules)
    }

    fn convert_rule(
        &self,
        rule: &CssRule,
        index: usize,
        written: Option<&[SourceDeclaration]>,
    ) -> Result<Option<StylesheetRule>, CssError> {
        match rule {
            CssRule::Style(style_rule) => {
                let mut selectors = Vec::with_capacity(style_rule.selectors.0.len());
                for selector in style_rule.selectors.0.iter() {
                    selectors.push(
                        selector
                            .to_css_string(PrinterOptions::default())
                            .map_err(|e| CssError::Serialize(e.to_string()))?,
                    );
                }

                if !style_rule.rules.0.is_empty() {
                    tracing::debug!(
                        rule = %selectors.join(", "),
                        nested = style_rule.rules.0.len(),
                        "Skipping nested rules"
                    );
                }

                let mut declarations = Declarations::new();
                for property in style_rule.declarations.declarations.iter() {
                    declarations.insert(self.convert_declaration(property, false, index, written)?);
                }
                for property in style_rule.declarations.important_declarations.iter() {
                    declarations.insert(self.convert_declaration(property, true, index, written)?);
                }

                Ok(Some(StylesheetRule { selectors, declarations }))
            }
            other => {
                tracing::debug!("Skipping non-style rule: {}", rule_kind(other));
                Ok(None)
            }
        }
    }

    fn convert_declaration(
        &self,
        property: &Property,
        important: bool,
        rule_index: usize,
        written: Option<&[SourceDeclaration]>,
    ) -> Result<Declaration, CssError> {
        let text = property
            .to_css_string(false, PrinterOptions::default())
            .map_err(|e| CssError::Serialize(e.to_string()))?;
        let (name, canonical) = split_declaration(&text);

        let value = written
            .and_then(|decls| {
                decls
                    .iter()
                    .rev()
                    .find(|d| d.property.eq_ignore_ascii_case(&name) && d.important == important)
            })
            .map(|d| d.value.clone())
            .unwrap_or_else(|| canonical.clone());

        Ok(Declaration { property: name, value, canonical, important, rule_index })
    }

    /// Canonical spelling of `value` for `property`
    ///
    /// Returns `None` when lightningcss cannot parse the value for that property.
    pub fn canonical_value(&self, property: &str, value: &str) -> Option<String> {
        let parsed = Property::parse_string(PropertyId::from(property), value, ParserOptions::default()).ok()?;
        let text = parsed.to_css_string(false, PrinterOptions::default()).ok()?;
        Some(split_declaration(&text).1)
    }
}

/// Split serialized `name: value` text
fn split_declaration(text: &str) -> (String, String) {
    match text.split_once(':') {
        Some((name, value)) => (name.trim().to_string(), value.trim().to_string()),
        None => (text.trim().to_string(), String::new()),
    }
}

fn rule_kind(rule: &CssRule) -> &'static str {
    match rule {
        CssRule::Media(_) => "@media",
        CssRule::Import(_) => "@import",
        CssRule::Keyframes(_) => "@keyframes",
        CssRule::FontFace(_) => "@font-face",
        CssRule::Supports(_) => "@supports",
        CssRule::Page(_) => "@page",
        CssRule::Namespace(_) => "@namespace",
        CssRule::LayerBlock(_) | CssRule::LayerStatement(_) => "@layer",
        _ => "at-rule",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let css = r#"
            .foo { display: block; }
            #bar { color: red; }
        "#;

        let result = CssParser::new().parse(css);
        assert!(result.is_ok(), "Parse error: {:?}", result.err());

        let rules = result.unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].selectors, vec![".foo"]);
        assert_eq!(rules[1].declarations.get("color").map(|d| d.value.as_str()), Some("red"));
    }

    #[test]
    fn test_selector_list_is_split() {
        let rules = CssParser::new().parse("h1, h2 > span, .a.b { margin: 0 }").unwrap();
        assert_eq!(rules[0].selectors, vec!["h1", "h2 > span", ".a.b"]);
    }

    #[test]
    fn test_important_declarations() {
        let rules = CssParser::new().parse(".x { color: red !important; color: blue; }").unwrap();
        let color = rules[0].declarations.get("color").unwrap();
        assert_eq!(color.value, "red");
        assert!(color.important);
    }

    #[test]
    fn test_at_rules_are_skipped() {
        let css = "@media (min-width: 10px) { .a { color: red; } } .b { color: blue; }";
        let rules = CssParser::new().parse(css).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selectors, vec![".b"]);
    }

    #[test]
    fn test_malformed_css() {
        let err = CssParser::new().parse("..broken { color: red; }").unwrap_err();
        assert!(matches!(err, CssError::ParseError { .. }), "{:?}", err);
    }

    #[test]
    fn test_values_keep_written_text() {
        let rules = CssParser::new().parse(".c { color: #FF0000; margin: 0px 0px; }").unwrap();
        let color = rules[0].declarations.get("color").unwrap();
        assert_eq!(color.value, "#FF0000");
        assert_eq!(color.canonical, "red");

        let margin = rules[0].declarations.get("margin").unwrap();
        assert_eq!(margin.value, "0px 0px");
        assert_eq!(Some(margin.canonical.clone()), CssParser::new().canonical_value("margin", "0"));
    }

    #[test]
    fn test_rule_index_counts_style_rules() {
        let css = "@media print { .x { color: red; } } .a { color: red; } .b { margin: 0; }";
        let rules = CssParser::new().parse(css).unwrap();
        assert_eq!(rules[0].declarations.get("color").map(|d| d.rule_index), Some(0));
        assert_eq!(rules[1].declarations.get("margin").map(|d| d.rule_index), Some(1));
    }

    #[test]
    fn test_nested_rules_are_skipped() {
        let rules = CssParser::new().parse(".a { color: red; &:hover { color: blue; } }").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selectors, vec![".a"]);
        assert_eq!(rules[0].declarations.len(), 1);
        assert_eq!(rules[0].declarations.get("color").map(|d| d.value.as_str()), Some("red"));
    }

    #[test]
    fn test_canonical_value() {
        let parser = CssParser::new();
        assert_eq!(parser.canonical_value("color", "  red "), Some("red".to_string()));
        assert_eq!(parser.canonical_value("color", "#ff0000"), parser.canonical_value("color", "red"));
    }

    #[test]
    fn test_split_declaration() {
        assert_eq!(split_declaration("color: red"), ("color".to_string(), "red".to_string()));
        assert_eq!(
            split_declaration("background: url(a:b)"),
            ("background".to_string(), "url(a:b)".to_string())
        );
    }
}
