//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate used by the document builder.
//! The builder only reads from `dom_query`; all rewriting happens in the
//! arena tree of [`crate::document`].

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// === Parsing ===

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// The `<body>` element of a parsed document.
#[inline]
#[must_use]
pub fn body(doc: &Document) -> Selection<'_> {
    doc.select("body")
}

// === Tag/Node Information ===

/// Lowercase tag name of an element node.
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// All attributes of an element as key-value pairs.
#[must_use]
pub fn attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

/// Single attribute value.
#[inline]
#[must_use]
pub fn attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|v| v.to_string())
}

// === Serialization ===

/// Inner HTML of a selection.
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> String {
    sel.inner_html().to_string()
}

/// Outer HTML of a selection.
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> String {
    sel.html().to_string()
}

/// Replace the content of a selection with an HTML fragment.
#[inline]
pub fn set_inner_html(sel: &Selection, html: &str) {
    sel.set_html(html);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_tag_name() {
        let doc = parse(r#"<p class="x" data-a="1">text</p>"#);
        let p = doc.select("p");
        let node = p.nodes().first().copied().expect("paragraph");

        assert_eq!(tag_name(&node).as_deref(), Some("p"));
        assert_eq!(attribute(&node, "class").as_deref(), Some("x"));
        assert_eq!(attributes(&node).len(), 2);
    }

    #[test]
    fn test_set_inner_html_replaces_content() {
        let doc = parse("<ul><li>one</li></ul>");
        let li = doc.select("li");
        set_inner_html(&li, "<em>two</em>");

        assert_eq!(outer_html(&li), "<li><em>two</em></li>");
        assert!(inner_html(&body(&doc)).contains("<em>two</em>"));
    }
}
