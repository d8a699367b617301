//! CSS selector parsing utilities.

use scraper::Selector;

/// Parses a CSS selector that must succeed (for compile-time constants).
///
/// Selectors in this crate come from the interface table and other static
/// strings, so a parse failure is a programming error.
///
/// # Panics
///
/// Panics if the selector cannot be parsed.
pub fn parse_selector_unsafe(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}

/// Parses a list of static selectors.
pub fn parse_selectors(selector_strs: &[&str], context: &str) -> Vec<Selector> {
    selector_strs
        .iter()
        .map(|s| parse_selector_unsafe(s, context))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selectors_keeps_order() {
        let selectors = parse_selectors(&["form#write_form", "form[action$='/new']"], "test");
        assert_eq!(selectors.len(), 2);
    }

    #[test]
    #[should_panic(expected = "programming error")]
    fn test_parse_selector_unsafe_panics_on_garbage() {
        parse_selector_unsafe("form[[", "test");
    }
}
