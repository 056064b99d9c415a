//! Parse errors

use crate::tokenizer::Position;

/// Syntactic error raised while parsing a selector
///
/// Always positioned. During backtracking several of these are produced; the
/// parser keeps the one at the greatest offset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Parsing Error [{position}]: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self { message: message.into(), position }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.position.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.position.column
    }

    /// Pick the deepest error, keeping the first one seen among equals
    pub fn deepest(errors: impl IntoIterator<Item = ParseError>) -> Option<ParseError> {
        errors.into_iter().fold(None, |deepest, error| match deepest {
            Some(current) if current.offset() >= error.offset() => Some(current),
            _ => Some(error),
        })
    }
}
