//! Selector Tokenizer
//!
//! Converts a selector string into one token per character. Tokens are never
//! merged here: `div` becomes three `letter` tokens and the parser assembles
//! names itself. Tokenizing is total; unknown characters become `other`.

use std::fmt;

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Letter,
    Digit,
    Minus,
    Underscore,
    Whitespace,
    Hash,
    Period,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Colon,
    Asterisk,
    Equals,
    Quote,
    Tilde,
    /// `>`
    LeftAngleBracket,
    /// `<`
    RightAngleBracket,
    Dollar,
    Caret,
    Pipe,
    Comma,
    Plus,
    Other,
}

impl TokenType {
    /// Classify a single character
    pub fn of(c: char) -> Self {
        match c {
            'a'..='z' | 'A'..='Z' => Self::Letter,
            '0'..='9' => Self::Digit,
            c if c.is_whitespace() => Self::Whitespace,
            '[' => Self::LeftBracket,
            ']' => Self::RightBracket,
            '(' => Self::LeftParen,
            ')' => Self::RightParen,
            ':' => Self::Colon,
            '.' => Self::Period,
            '#' => Self::Hash,
            '*' => Self::Asterisk,
            '=' => Self::Equals,
            '"' | '\'' => Self::Quote,
            '~' => Self::Tilde,
            '>' => Self::LeftAngleBracket,
            '<' => Self::RightAngleBracket,
            '$' => Self::Dollar,
            '^' => Self::Caret,
            '|' => Self::Pipe,
            ',' => Self::Comma,
            '-' => Self::Minus,
            '+' => Self::Plus,
            '_' => Self::Underscore,
            _ => Self::Other,
        }
    }

    /// Name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Letter => "letter",
            Self::Digit => "digit",
            Self::Minus => "minus",
            Self::Underscore => "underscore",
            Self::Whitespace => "whitespace",
            Self::Hash => "hash",
            Self::Period => "period",
            Self::LeftBracket => "left_bracket",
            Self::RightBracket => "right_bracket",
            Self::LeftParen => "left_paren",
            Self::RightParen => "right_paren",
            Self::Colon => "colon",
            Self::Asterisk => "asterisk",
            Self::Equals => "equals",
            Self::Quote => "quote",
            Self::Tilde => "tilde",
            Self::LeftAngleBracket => "left_angle_bracket",
            Self::RightAngleBracket => "right_angle_bracket",
            Self::Dollar => "dollar",
            Self::Caret => "caret",
            Self::Pipe => "pipe",
            Self::Comma => "comma",
            Self::Plus => "plus",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Location of a token in the source selector
///
/// `line` and `column` are 1-based, `offset` counts characters from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl Position {
    /// Position of the first character
    pub const START: Position = Position { line: 1, column: 1, offset: 0 };

    /// Position of the character following `c`
    pub fn advance(self, c: char) -> Self {
        if c == '\n' {
            Self { line: self.line + 1, column: 1, offset: self.offset + 1 }
        } else {
            Self { line: self.line, column: self.column + 1, offset: self.offset + 1 }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single selector token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenType,
    pub value: char,
    pub position: Position,
}

impl Token {
    #[inline]
    pub fn is(&self, kind: TokenType) -> bool {
        self.kind == kind
    }
}

/// Tokenize a selector string
pub fn tokenize(selector: &str) -> Vec<Token> {
    let mut position = Position::START;
    let mut tokens = Vec::with_capacity(selector.len());

    for value in selector.chars() {
        tokens.push(Token { kind: TokenType::of(value), value, position });
        position = position.advance(value);
    }

    tokens
}
