//! modcss HTML Parser
//!
//! HTML5 parsing built on html5ever, producing the modcss arena DOM. Parsed
//! documents expose the module style elements they embed through
//! [`Document::style_sources`].

mod parser;

pub use modcss_dom::{Document, StyleSource};
pub use parser::HtmlParser;

/// Parse an HTML string into a document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Module stylesheets embedded in `html` as `<style {attribute}="id">` elements
pub fn style_sources(html: &str, attribute: &str) -> Vec<StyleSource> {
    parse(html).style_sources(attribute)
}
