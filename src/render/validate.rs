use regex::Regex;
use std::sync::OnceLock;

fn empty_link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Whole-text match; `.` stops at line breaks, so only single-line
    // texts can trip it.
    PATTERN.get_or_init(|| {
        Regex::new(r"^.*\[\s*\]\([^)]*\).*$").expect("empty link pattern is a valid regex")
    })
}

/// Shallow structural sanity check for Markdown text.
///
/// Brackets and parentheses must balance and links must not have empty
/// text. This is a screen, not a parser: plenty of questionable input
/// still passes.
///
/// ```
/// use objmd::is_valid_markdown;
///
/// assert!(is_valid_markdown("# Heading\nA [link](https://example.com)"));
/// assert!(!is_valid_markdown("An [incomplete link"));
/// assert!(!is_valid_markdown("[](https://example.com)"));
/// ```
pub fn is_valid_markdown(text: &str) -> bool {
    if text.matches('[').count() != text.matches(']').count() {
        return false;
    }
    if text.matches('(').count() != text.matches(')').count() {
        return false;
    }
    if text.contains("[](") {
        return false;
    }
    !empty_link_pattern().is_match(text)
}
