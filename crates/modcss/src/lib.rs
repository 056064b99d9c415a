//! modcss
//!
//! Style assertions for CSS modules: register the compiled CSS of each
//! module, then check that an element has the styles a test expects. The
//! answer accounts for every rule whose selector matches the element.
//!
//! # Example
//! ```rust
//! use modcss::{ExpectedStyles, MatcherContext};
//!
//! let doc = modcss::html::parse(r#"<div class="card">Hello</div>"#);
//! let mut context = MatcherContext::default();
//! context.add_stylesheet("card.module.css", ".card { color: red; }").unwrap();
//!
//! let card = context.find_element(&doc, ".card").unwrap().unwrap();
//! let outcome = context
//!     .to_have_css_style(&doc, card, &ExpectedStyles::new().with("color", "red"))
//!     .unwrap();
//! assert!(outcome.pass);
//! ```

mod assertion;
mod config;
mod context;
mod error;
pub mod logging;

pub use assertion::AssertionOutcome;
pub use config::Config;
pub use context::MatcherContext;
pub use error::{ConfigError, LoggingError, MatcherError, Result};

pub use modcss_dom::{Document, ElementQuery, NodeId};
pub use modcss_style::{
    ExpectedStyles, ExpectedValue, MatchStrategy, StylesheetRegistry, UnmatchedProperty,
};

// Re-export sub-crates for advanced usage
pub use modcss_dom as dom;
pub use modcss_html as html;
pub use modcss_selector as selector;
pub use modcss_style as style;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
