//! Formatter and serializer.
//!
//! The formatter settles whitespace at block edges and adds line separators;
//! the serializer writes the restricted tree back out as markup.

use crate::patterns::MULTIPLE_SPACES;

use super::{Document, NodeId, NodeKind};

/// Format a sanitized document and serialize it to canonical text.
///
/// Mutates the tree: a leading horizontal rule is dropped, paragraph-like
/// blocks are trimmed, separators are inserted.
pub fn format_document(doc: &mut Document) -> String {
    drop_leading_rule(doc);
    trim_blocks(doc);
    space_strong_emphasis(doc);
    insert_separators(doc);
    let text = serialize(doc);
    MULTIPLE_SPACES.replace_all(&text, " ").into_owned()
}

/// A rule at the very top only marks where the header region ended.
fn drop_leading_rule(doc: &mut Document) {
    if let Some(first) = doc.first_child(NodeId::ROOT) {
        if *doc.kind(first) == NodeKind::HorizontalRule {
            doc.detach(first);
        }
    }
}

fn trim_blocks(doc: &mut Document) {
    for id in doc.descendants(NodeId::ROOT) {
        if !doc.kind(id).is_paragraph_like() {
            continue;
        }
        if let Some(first) = doc.first_child(id) {
            if doc.is_text(first) {
                let trimmed = doc.text(first).trim_start().to_string();
                if trimmed.is_empty() {
                    doc.detach(first);
                } else {
                    doc.set_text(first, trimmed);
                }
            }
        }
        if let Some(&last) = doc.children(id).last() {
            if doc.is_text(last) {
                let trimmed = doc.text(last).trim_end().to_string();
                if trimmed.is_empty() {
                    doc.detach(last);
                } else {
                    doc.set_text(last, trimmed);
                }
            }
        }
    }
}

/// Renderers abut `<strong>x</strong><em>y</em>`; keep a space between them.
fn space_strong_emphasis(doc: &mut Document) {
    for id in doc.descendants(NodeId::ROOT) {
        if *doc.kind(id) != NodeKind::Strong {
            continue;
        }
        if doc
            .next_sibling(id)
            .is_some_and(|next| *doc.kind(next) == NodeKind::Emphasis)
        {
            let space = doc.create_text(" ");
            doc.insert_after(id, space);
        }
    }
}

fn insert_separators(doc: &mut Document) {
    for id in doc.descendants(NodeId::ROOT) {
        match doc.kind(id) {
            NodeKind::Paragraph | NodeKind::ListItem | NodeKind::HorizontalRule => {
                let newline = doc.create_text("\n");
                doc.insert_after(id, newline);
            }
            NodeKind::UnorderedList => {
                let opening = doc.create_text("\n");
                doc.insert(id, 0, opening);
                let closing = doc.create_text("\n");
                doc.insert_after(id, closing);
            }
            _ => {}
        }
    }
}

/// Serialize a document as restricted markup.
///
/// Only the class survives as an attribute; void kinds are written
/// self-closed.
#[must_use]
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    write_children(doc, NodeId::ROOT, &mut out);
    out
}

fn write_children(doc: &Document, id: NodeId, out: &mut String) {
    for &child in doc.children(id) {
        write_node(doc, child, out);
    }
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    let kind = doc.kind(id);
    let Some(tag) = kind.tag() else {
        if *kind == NodeKind::Text {
            out.push_str(&escape_text(doc.text(id)));
        } else {
            write_children(doc, id, out);
        }
        return;
    };

    out.push('<');
    out.push_str(tag);
    if let Some(class) = doc.class(id) {
        out.push_str(" class=\"");
        out.push_str(&escape_attribute(class));
        out.push('"');
    }
    if kind.is_void() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    write_children(doc, id, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Escape text content for markup output.
#[must_use]
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{build_document, sanitize};

    fn formatted(markup: &str) -> String {
        let mut doc = build_document(markup).expect("document");
        sanitize(&mut doc);
        format_document(&mut doc)
    }

    #[test]
    fn test_blocks_are_trimmed_and_separated() {
        let text = formatted("<p>  first  </p><p>second</p>");
        assert_eq!(text, "<p>first</p>\n<p>second</p>\n");
    }

    #[test]
    fn test_runs_of_spaces_collapse() {
        let text = formatted("<p>a    b</p>");
        assert_eq!(text, "<p>a b</p>\n");
    }

    #[test]
    fn test_leading_rule_is_dropped() {
        let text = formatted("<hr><p>body</p><hr><p>tail</p>");
        assert_eq!(text, "<p>body</p>\n<hr/>\n<p>tail</p>\n");
    }

    #[test]
    fn test_space_between_strong_and_emphasis() {
        let text = formatted("<p><strong>Heightened</strong><em>(+1)</em> more</p>");
        assert!(text.contains("<strong>Heightened</strong> <em>(+1)</em>"), "{text}");
    }

    #[test]
    fn test_list_is_wrapped_in_newlines() {
        let text = formatted("<ul><li>one</li><li>two</li></ul>");
        assert_eq!(text, "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n");
    }

    #[test]
    fn test_class_and_escaping() {
        let mut doc = Document::new();
        let p = doc.create(NodeKind::Paragraph);
        doc.append(NodeId::ROOT, p);
        doc.set_class(p, "hanging-indent range");
        let t = doc.create_text("1 < 2 & 3");
        doc.append(p, t);
        assert_eq!(serialize(&doc), "<p class=\"hanging-indent range\">1 &lt; 2 &amp; 3</p>");
    }
}
