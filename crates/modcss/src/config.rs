//! Matcher Configuration

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use modcss_style::{MatchStrategy, ResolverOptions};

/// Matcher configuration options
///
/// Deserializes from camelCase JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// How expected properties are judged
    pub strategy: MatchStrategy,

    /// Compare values after canonicalising both sides with lightningcss
    pub canonicalize_values: bool,

    /// Attribute marking `<style>` elements that carry a CSS module
    pub style_source_attribute: String,

    /// Default `tracing` filter directive when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl Config {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            strategy: self.strategy,
            canonicalize_values: self.canonicalize_values,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::AnyDeclaration,
            canonicalize_values: true,
            style_source_attribute: "data-css-module".to_string(),
            log_filter: None,
        }
    }
}
