//! Assertion outcome and its message

use std::fmt::Write as _;

use modcss_style::{ExpectedStyles, UnmatchedProperty};

/// Result of a `to_have_css_style` assertion
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionOutcome {
    pub pass: bool,
    /// Description of the element the assertion ran against
    pub element: String,
    pub expected: ExpectedStyles,
    pub unmatched: Vec<UnmatchedProperty>,
}

impl AssertionOutcome {
    /// Human-readable message
    ///
    /// For a passing assertion this describes the negated expectation, so it
    /// reads correctly when the caller asserted the opposite.
    pub fn message(&self) -> String {
        let mut message = String::new();

        if self.pass {
            let _ = write!(message, "expected {} not to have styles:", self.element);
            for (property, value) in self.expected.iter() {
                let _ = write!(message, "\n  {}: {}", property, value);
            }
            return message;
        }

        let _ = write!(message, "expected {} to have styles:", self.element);
        for unmatched in &self.unmatched {
            match &unmatched.actual_value {
                Some(actual) => {
                    let _ = write!(
                        message,
                        "\n  {}: expected \"{}\", received \"{}\"",
                        unmatched.property, unmatched.expected_value, actual
                    );
                }
                None => {
                    let _ = write!(
                        message,
                        "\n  {}: expected \"{}\", not declared by any matching rule",
                        unmatched.property, unmatched.expected_value
                    );
                }
            }
        }
        message
    }
}
