//! Token Stream
//!
//! A single owned read head over the token list. Backtracking is done with an
//! explicit stack of offsets rather than by cloning the stream.

use crate::error::ParseError;
use crate::tokenizer::{Position, Token, TokenType};

/// Repositionable cursor over selector tokens
#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
    position_stack: Vec<usize>,
    /// Position just past the last token
    end: Position,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map(|t| t.position.advance(t.value))
            .unwrap_or(Position::START);

        Self {
            tokens,
            position: 0,
            position_stack: Vec::new(),
            end,
        }
    }

    /// Next token without consuming it
    #[inline]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Consume and return the next token
    pub fn consume(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).copied()?;
        self.position += 1;
        Some(token)
    }

    /// Consume the next token if it has the given type
    pub fn consume_if(&mut self, kind: TokenType) -> Option<Token> {
        self.consume_if_any(&[kind])
    }

    /// Consume the next token if it has one of the given types
    pub fn consume_if_any(&mut self, kinds: &[TokenType]) -> Option<Token> {
        match self.peek() {
            Some(token) if kinds.contains(&token.kind) => self.consume(),
            _ => None,
        }
    }

    /// Consume a token of one of the expected types, or fail at the current position
    pub fn consume_expect(&mut self, kinds: &[TokenType]) -> Result<Token, ParseError> {
        if let Some(token) = self.consume_if_any(kinds) {
            return Ok(token);
        }

        let expected = kinds.iter().map(TokenType::name).collect::<Vec<_>>().join(", ");
        let found = self.peek().map(|t| t.kind.name()).unwrap_or("end of input");

        Err(ParseError::new(
            format!("Expected token of type {}, but got {}", expected, found),
            self.current_position(),
        ))
    }

    /// Consume every immediately following whitespace token
    pub fn eat_whitespace(&mut self) -> usize {
        let mut eaten = 0;
        while self.consume_if(TokenType::Whitespace).is_some() {
            eaten += 1;
        }
        eaten
    }

    /// Push the current offset onto the checkpoint stack
    pub fn store_position(&mut self) {
        self.position_stack.push(self.position);
    }

    /// Drop the last checkpoint without moving
    pub fn clear_position(&mut self) {
        self.position_stack.pop();
    }

    /// Pop the last checkpoint and move back to it
    pub fn restore_position(&mut self) {
        if let Some(position) = self.position_stack.pop() {
            self.position = position;
        }
    }

    /// Fail unless only whitespace remains
    pub fn expect_end_of_input(&mut self) -> Result<(), ParseError> {
        self.eat_whitespace();

        match self.peek() {
            None => Ok(()),
            Some(token) => Err(ParseError::new(
                format!("Expected end of input, but got token of type {}", token.kind),
                token.position,
            )),
        }
    }

    /// Source position of the next token, or of the end of input
    pub fn current_position(&self) -> Position {
        self.peek().map(|t| t.position).unwrap_or(self.end)
    }

    /// Index of the next token
    #[inline]
    pub fn offset(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Unconsumed input as text
    pub fn remainder(&self) -> String {
        self.tokens[self.position.min(self.tokens.len())..]
            .iter()
            .map(|t| t.value)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn stream(input: &str) -> TokenStream {
        TokenStream::new(tokenize(input))
    }

    #[test]
    fn test_peek_consume() {
        let mut s = stream("ab");
        assert_eq!(s.peek().map(|t| t.value), Some('a'));
        assert_eq!(s.consume().map(|t| t.value), Some('a'));
        assert_eq!(s.consume().map(|t| t.value), Some('b'));
        assert!(s.consume().is_none());
        assert_eq!(s.offset(), 2);
    }

    #[test]
    fn test_consume_expect_error_position() {
        let mut s = stream("a]");
        s.consume();
        let err = s.consume_expect(&[TokenType::Letter, TokenType::Digit]).unwrap_err();
        assert_eq!(err.message, "Expected token of type letter, digit, but got right_bracket");
        assert_eq!(err.offset(), 1);
        // Failed expectations do not consume
        assert_eq!(s.offset(), 1);
    }

    #[test]
    fn test_consume_expect_at_end() {
        let mut s = stream("ab");
        s.consume();
        s.consume();
        let err = s.consume_expect(&[TokenType::Quote]).unwrap_err();
        assert_eq!(err.message, "Expected token of type quote, but got end of input");
        assert_eq!((err.line(), err.column(), err.offset()), (1, 3, 2));
    }

    #[test]
    fn test_checkpoints() {
        let mut s = stream("abcd");
        s.store_position();
        s.consume();
        s.store_position();
        s.consume();
        s.consume();
        s.restore_position();
        assert_eq!(s.offset(), 1);
        s.clear_position();
        s.consume();
        // Stack is empty: restore is a no-op
        s.restore_position();
        assert_eq!(s.offset(), 2);
    }

    #[test]
    fn test_eat_whitespace_eats_runs() {
        let mut s = stream("   a");
        assert_eq!(s.eat_whitespace(), 3);
        assert_eq!(s.eat_whitespace(), 0);
        assert_eq!(s.remainder(), "a");
    }

    #[test]
    fn test_expect_end_of_input() {
        let mut s = stream("a  ");
        s.consume();
        assert!(s.expect_end_of_input().is_ok());
        assert!(s.is_at_end());

        let mut s = stream("a b");
        s.consume();
        let err = s.expect_end_of_input().unwrap_err();
        assert_eq!(err.message, "Expected end of input, but got token of type letter");
        assert_eq!(err.column(), 3);
    }
}
