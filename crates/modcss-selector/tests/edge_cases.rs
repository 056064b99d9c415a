//! Edge case tests for modcss-selector
//!
//! Empty and degenerate input, unsupported syntax, multi-line positions and
//! long selectors.

use modcss_selector::{calculate_specificity, parse, tokenize, AttributeValue, SimpleSelector, Specificity};

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_empty_input() {
    assert!(tokenize("").is_empty());

    let err = parse("").unwrap_err();
    assert_eq!((err.line(), err.column(), err.offset()), (1, 1, 0));
}

#[test]
fn test_only_whitespace() {
    assert!(parse("   \t\n").is_err());
}

#[test]
fn test_single_letter() {
    let selector = parse("a").unwrap();
    assert_eq!(selector.to_string(), "a");
    assert_eq!(selector.chain().len(), 1);
}

#[test]
fn test_trailing_whitespace_is_ignored() {
    assert_eq!(parse("div > p \n\t").unwrap().to_string(), "div > p");
}

// ============================================================================
// NAMES
// ============================================================================

#[test]
fn test_name_characters() {
    assert_eq!(parse(".a-1_b").unwrap().to_string(), ".a-1_b");
    assert_eq!(parse("#x9").unwrap().to_string(), "#x9");
}

#[test]
fn test_name_must_start_with_letter() {
    assert!(parse(".1a").is_err());
    assert!(parse("#-x").is_err());
    assert!(parse("_div").is_err());
}

#[test]
fn test_non_ascii_name_is_rejected() {
    let err = parse(".café").unwrap_err();
    assert_eq!(err.column(), 5);
}

// ============================================================================
// UNSUPPORTED SYNTAX
// ============================================================================

#[test]
fn test_pseudo_class_is_rejected() {
    let err = parse("a:hover").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parsing Error [1:2]: Expected end of input, but got token of type colon"
    );
}

#[test]
fn test_universal_and_lists_are_rejected() {
    assert!(parse("*").is_err());
    assert!(parse("a, b").is_err());
}

#[test]
fn test_unsupported_selectors_still_have_specificity() {
    assert_eq!(calculate_specificity("a:hover"), Specificity(0, 1, 1));
    assert_eq!(calculate_specificity("p::before"), Specificity(0, 0, 2));
}

// ============================================================================
// ATTRIBUTE VALUES
// ============================================================================

#[test]
fn test_quotes_inside_other_quotes() {
    let selector = parse(r#"a[title='say "hi"']"#).unwrap();
    let SimpleSelector::Attribute(attribute) = &selector.subject().selectors[1] else {
        panic!("expected attribute selector");
    };

    match &attribute.expression.value {
        Some(value @ AttributeValue::String(_)) => assert_eq!(value.as_str(), r#"say "hi""#),
        other => panic!("unexpected value {:?}", other),
    }
}

#[test]
fn test_empty_string_value() {
    let selector = parse(r#"a[title=""]"#).unwrap();
    assert_eq!(selector.to_string(), r#"a[title=""]"#);
}

#[test]
fn test_unterminated_string() {
    let err = parse("a[title=\"open").unwrap_err();
    assert_eq!(err.message, "Unterminated string literal");
    assert_eq!(err.offset(), 13);
}

// ============================================================================
// POSITIONS
// ============================================================================

#[test]
fn test_error_on_later_line() {
    let err = parse("div\n  > ]").unwrap_err();
    assert_eq!((err.line(), err.column(), err.offset()), (2, 5, 8));
}

// ============================================================================
// STRESS
// ============================================================================

#[test]
fn test_long_descendant_chain() {
    let input = vec!["section"; 100].join(" ");
    let selector = parse(&input).unwrap();
    assert_eq!(selector.chain().len(), 100);
    assert_eq!(selector.specificity(), Specificity(0, 0, 100));
}

#[test]
fn test_long_compound() {
    let input: String = (0..200).map(|i| format!(".c{}", i)).collect();
    let selector = parse(&input).unwrap();
    assert_eq!(selector.subject().selectors.len(), 200);
    assert_eq!(calculate_specificity(&input), Specificity(0, 200, 0));
}
