//! Reflection text cleanup before storage
//!
//! Sanitizing is a storage concern only. Crisis keyword scanning always runs
//! on the raw text, so markup cannot hide a phrase from the scanner.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum stored reflection length, in characters
pub const MAX_REFLECTION_CHARS: usize = 1000;

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex"));

/// Strip markup from a reflection and cap its length
///
/// Removes `<...>` tags, then any stray angle brackets, then keeps the first
/// [`MAX_REFLECTION_CHARS`] characters.
pub fn sanitize_reflection(text: &str) -> String {
    let without_tags = TAG_PATTERN.replace_all(text, "");
    without_tags
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .take(MAX_REFLECTION_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strips_tags_and_brackets() {
        assert_eq!(
            sanitize_reflection("<script>alert(1)</script> felt ok > fine"),
            "alert(1) felt ok  fine"
        );
        assert_eq!(sanitize_reflection("a < b"), "a  b");
    }

    #[test]
    fn test_truncates_by_characters() {
        let long = "é".repeat(MAX_REFLECTION_CHARS + 20);
        let cleaned = sanitize_reflection(&long);
        assert_eq!(cleaned.chars().count(), MAX_REFLECTION_CHARS);
    }

    #[test]
    fn test_plain_text_is_untouched() {
        assert_eq!(sanitize_reflection("quiet evening"), "quiet evening");
    }
}
