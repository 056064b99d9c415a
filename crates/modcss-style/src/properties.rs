//! CSS Property Names
//!
//! Expected styles may name properties the way a DOM style object does
//! (`backgroundColor`); stylesheets use kebab-case (`background-color`).

/// Convert a camelCase property name to its kebab-case CSS name
///
/// Names already in kebab-case and custom properties (`--x`) pass through.
pub fn to_kebab_case(name: &str) -> String {
    let name = name.trim();

    if name.starts_with("--") || !name.chars().any(|c| c.is_ascii_uppercase()) {
        return name.to_string();
    }
    if name == "cssFloat" {
        return "float".to_string();
    }

    let mut result = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    // `msTransform` is the one vendor prefix written with a lowercase initial
    if result.starts_with("ms-") {
        result.insert(0, '-');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(to_kebab_case("backgroundColor"), "background-color");
        assert_eq!(to_kebab_case("borderTopLeftRadius"), "border-top-left-radius");
        assert_eq!(to_kebab_case("color"), "color");
    }

    #[test]
    fn test_vendor_prefixes() {
        assert_eq!(to_kebab_case("WebkitTransition"), "-webkit-transition");
        assert_eq!(to_kebab_case("MozAppearance"), "-moz-appearance");
        assert_eq!(to_kebab_case("msTransform"), "-ms-transform");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(to_kebab_case("background-color"), "background-color");
        assert_eq!(to_kebab_case("--Brand-Color"), "--Brand-Color");
        assert_eq!(to_kebab_case("cssFloat"), "float");
        assert_eq!(to_kebab_case(" margin "), "margin");
    }
}
