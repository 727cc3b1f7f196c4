//! Tag tables for the document builder and sanitizer.
//!
//! Provides both arrays (for iteration) and `HashSet`s (for O(1) lookup).

use std::collections::HashSet;
use std::sync::LazyLock;

use super::NodeKind;

// === Builder Tag Lists ===

/// Header metadata and footnote markers, dropped with their content.
pub static DROPPED_TAGS: [&str; 3] = ["title", "traits", "sup"];

/// Cosmetic inline tags replaced by their content while building.
pub static COLLAPSED_TAGS: [&str; 2] = ["a", "span"];

/// Elements whose bare text is rendered as markdown before the outer pass.
pub static MARKDOWN_CELL_TAGS: [&str; 2] = ["li", "td"];

/// Action cost marker tag; replaced by its annotation text.
pub const ACTION_TAG: &str = "actions";

/// Attribute of [`ACTION_TAG`] holding the action phrase.
pub const ACTION_ATTR: &str = "string";

/// HTML void elements; the only tags a self-closing slash is valid on.
pub static VOID_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// `DROPPED_TAGS` as a `HashSet`
pub static DROPPED_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DROPPED_TAGS.into_iter().collect());

/// `COLLAPSED_TAGS` as a `HashSet`
pub static COLLAPSED_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| COLLAPSED_TAGS.into_iter().collect());

/// `VOID_TAGS` as a `HashSet`
pub static VOID_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| VOID_TAGS.into_iter().collect());

// === Action Annotations ===

/// Action phrases and the annotation each one becomes, longest first so that
/// "Free Action" wins over a bare match elsewhere in the phrase.
pub static ACTION_SUBSTITUTIONS: [(&str, &str); 5] = [
    ("Free Action", "[free-action]"),
    ("Single Action", "[one-action]"),
    ("Two Actions", "[two-actions]"),
    ("Three Actions", "[three-actions]"),
    ("Reaction", "[reaction]"),
];

/// Words kept between two annotations ("one to three actions").
pub static ACTION_JOINERS: [&str; 2] = ["to", "or"];

// === Sanitizer Whitelist ===

/// Whether a node kind survives sanitization.
///
/// Root and text are structural and always allowed.
#[must_use]
pub fn is_whitelisted(kind: &NodeKind) -> bool {
    match kind {
        NodeKind::Root
        | NodeKind::Text
        | NodeKind::Paragraph
        | NodeKind::HorizontalRule
        | NodeKind::Strong
        | NodeKind::Emphasis
        | NodeKind::ListItem
        | NodeKind::UnorderedList
        | NodeKind::LineBreak
        | NodeKind::Table
        | NodeKind::Row
        | NodeKind::HeaderCell
        | NodeKind::Cell => true,
        NodeKind::Other(_) => false,
    }
}
