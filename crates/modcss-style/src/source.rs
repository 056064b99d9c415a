//! Declaration Source Text
//!
//! lightningcss hands declarations back in its own serialization. This scans
//! the stylesheet text for the values as they were written, one block per
//! top-level style rule, so they can be paired with the parsed rules.

/// A declaration as written in the stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceDeclaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// Declarations of every top-level style rule, in source order
///
/// At-rules are skipped with their blocks. Rules nested inside a style block
/// do not contribute to that block's declarations.
pub(crate) fn style_blocks(css: &str) -> Vec<Vec<SourceDeclaration>> {
    let mut scanner = Scanner::new(css);
    let mut blocks = Vec::new();

    while let Some(c) = scanner.skip_trivia() {
        if c == '@' {
            if scanner.find_top_level(&[';', '{']) == Some('{') {
                scanner.skip_block();
            }
            continue;
        }

        if scanner.find_top_level(&['{']).is_none() {
            break;
        }
        let start = scanner.pos;
        let end = scanner.skip_block();
        blocks.push(declarations(&css[start..end]));
    }

    blocks
}

fn declarations(body: &str) -> Vec<SourceDeclaration> {
    let mut scanner = Scanner::new(body);
    let mut result = Vec::new();
    let mut start = 0;

    loop {
        match scanner.find_top_level(&[';', '{']) {
            Some(';') => {
                result.extend(parse_declaration(&body[start..scanner.pos - 1]));
                start = scanner.pos;
            }
            Some(_) => {
                // Nested rule
                scanner.skip_block();
                start = scanner.pos;
            }
            None => {
                result.extend(parse_declaration(&body[start..]));
                return result;
            }
        }
    }
}

fn parse_declaration(text: &str) -> Option<SourceDeclaration> {
    let text = strip_comments(text);
    let (name, value) = text.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    // Custom property names are case-sensitive
    let property = if name.starts_with("--") {
        name.to_string()
    } else {
        name.to_ascii_lowercase()
    };

    let value = value.trim();
    let (value, important) = match strip_important(value) {
        Some(rest) => (rest, true),
        None => (value, false),
    };

    Some(SourceDeclaration { property, value: value.to_string(), important })
}

fn strip_important(value: &str) -> Option<&str> {
    let bang = value.rfind('!')?;
    let (rest, flag) = value.split_at(bang);
    flag[1..]
        .trim()
        .eq_ignore_ascii_case("important")
        .then(|| rest.trim_end())
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut scanner = Scanner::new(text);

    while let Some(c) = scanner.bump() {
        match c {
            '/' if scanner.rest().starts_with('*') => scanner.skip_comment(),
            '"' | '\'' => {
                let start = scanner.pos - 1;
                scanner.skip_string(c);
                out.push_str(&text[start..scanner.pos]);
            }
            c => out.push(c),
        }
    }

    out
}

/// Byte cursor over CSS text
struct Scanner<'a> {
    css: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(css: &'a str) -> Self {
        Self { css, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.css[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip whitespace and comments, returning the next character unconsumed
    fn skip_trivia(&mut self) -> Option<char> {
        loop {
            match self.peek()? {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' if self.rest().starts_with("/*") => {
                    self.pos += 1;
                    self.skip_comment();
                }
                c => return Some(c),
            }
        }
    }

    /// Called with the `/` consumed and the cursor on `*`
    fn skip_comment(&mut self) {
        self.pos += 1;
        match self.rest().find("*/") {
            Some(end) => self.pos += end + 2,
            None => self.pos = self.css.len(),
        }
    }

    /// Called with the opening quote consumed; stops past the closing one
    fn skip_string(&mut self, quote: char) {
        while let Some(c) = self.bump() {
            if c == '\\' {
                self.bump();
            } else if c == quote {
                return;
            }
        }
    }

    /// Consume up to and including the first of `stops` outside strings,
    /// comments, parentheses and brackets
    fn find_top_level(&mut self, stops: &[char]) -> Option<char> {
        let mut depth = 0usize;

        while let Some(c) = self.bump() {
            match c {
                '/' if self.rest().starts_with('*') => self.skip_comment(),
                '"' | '\'' => self.skip_string(c),
                '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                c if depth == 0 && stops.contains(&c) => return Some(c),
                _ => {}
            }
        }

        None
    }

    /// Called just past `{`; consumes through the matching `}` and returns
    /// the offset of that `}` (or the end of input)
    fn skip_block(&mut self) -> usize {
        let mut depth = 1usize;

        while let Some(c) = self.bump() {
            match c {
                '/' if self.rest().starts_with('*') => self.skip_comment(),
                '"' | '\'' => self.skip_string(c),
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return self.pos - 1;
                    }
                }
                _ => {}
            }
        }

        self.css.len()
    }
}
