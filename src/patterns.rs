//! Compiled regex patterns for the pipeline.
//!
//! All patterns are compiled once at startup using `LazyLock` for efficiency.
//! Patterns are organized by their purpose in the pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Markup Preparation Patterns
// =============================================================================

/// Matches a self-closing tag such as `<actions string="Two Actions" />`.
///
/// Group 1 is the tag name, group 2 the attribute text.
pub static SELF_CLOSING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z][A-Za-z0-9-]*)((?:\s[^<>]*?)?)\s*/>").expect("SELF_CLOSING_TAG regex")
});

// =============================================================================
// Text Normalization Patterns
// =============================================================================

/// Matches runs of two or more spaces.
pub static MULTIPLE_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("MULTIPLE_SPACES regex"));

/// Matches any whitespace run (used when building slugs).
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

/// Matches trailing separator punctuation left on a header value.
pub static TRAILING_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s;,]+$").expect("TRAILING_SEPARATOR regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_closing_tag_captures_name_and_attrs() {
        let caps = SELF_CLOSING_TAG
            .captures(r#"x <actions string="Two Actions" /> y"#)
            .expect("match");
        assert_eq!(&caps[1], "actions");
        assert_eq!(caps[2].trim(), r#"string="Two Actions""#);
    }

    #[test]
    fn test_self_closing_tag_without_attrs() {
        let caps = SELF_CLOSING_TAG.captures("<br/>").expect("match");
        assert_eq!(&caps[1], "br");
        assert_eq!(&caps[2], "");
    }

    #[test]
    fn test_trailing_separator() {
        assert_eq!(TRAILING_SEPARATOR.replace(" 30 feet; ", ""), " 30 feet");
        assert_eq!(TRAILING_SEPARATOR.replace(" arcane,", ""), " arcane");
    }
}
