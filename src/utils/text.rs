//! Text normalization for extracted content.

use regex::Regex;
use std::sync::LazyLock;

/// Minimal `<...>` match; tags may span lines.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<.*?>").unwrap());

static WHITESPACE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip HTML-like tags, collapse whitespace runs to a single space and trim.
///
/// Tags are removed before collapsing so that `a <b> c` becomes `a c`
/// rather than leaving a double space behind.
pub fn normalize(text: &str) -> String {
    let stripped = TAG_PATTERN.replace_all(text, "");
    let collapsed = WHITESPACE_PATTERN.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_double_whitespace(s: &str) -> bool {
        s.chars()
            .zip(s.chars().skip(1))
            .any(|(a, b)| a.is_whitespace() && b.is_whitespace())
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  RFQ\n\n  Number:\tQ-1  "), "RFQ Number: Q-1");
    }

    #[test]
    fn test_normalize_strips_tags() {
        assert_eq!(
            normalize("<html><body><p>Agency: DLA</p></body></html>"),
            "Agency: DLA"
        );
        assert_eq!(normalize("a <b> c"), "a c");
    }

    #[test]
    fn test_normalize_tag_spanning_lines() {
        assert_eq!(normalize("before <div\nclass=\"x\">after"), "before after");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
        assert_eq!(normalize("<br/>"), "");
    }

    #[test]
    fn test_normalize_unclosed_angle_is_kept() {
        assert_eq!(normalize("price < 5"), "price < 5");
        assert_eq!(normalize("5 > 3"), "5 > 3");
    }

    #[test]
    fn test_normalize_properties() {
        let inputs = [
            "plain",
            "  lots   of\n\nspace  ",
            "<<a>b> tail",
            "x <y\n> z <w",
            "\u{00a0}nbsp\u{2003}em\u{00a0}",
            "<p> one </p>\r\n<p> two </p>",
        ];
        for input in inputs {
            let out = normalize(input);
            assert!(!has_double_whitespace(&out), "double whitespace in {:?}", out);
            assert!(!TAG_PATTERN.is_match(&out), "tag left in {:?}", out);
            assert_eq!(out, out.trim());
            assert_eq!(normalize(&out), out, "not idempotent for {:?}", input);
        }
    }
}
