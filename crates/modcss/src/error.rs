//! Error types

use modcss_selector::ParseError;
use modcss_style::{CssError, ResolveError};

/// Invalid configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// The global tracing subscriber could not be installed
#[derive(Debug, thiserror::Error)]
#[error("failed to install tracing subscriber: {0}")]
pub struct LoggingError(pub String);

/// Errors raised while setting up or evaluating a style assertion
#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error(transparent)]
    Css(#[from] CssError),

    #[error(transparent)]
    Selector(#[from] ParseError),

    #[error("[toHaveCssStyle] {0}")]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, MatcherError>;
