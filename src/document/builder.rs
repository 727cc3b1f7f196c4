//! Document builder: raw entry markup to the arena tree.
//!
//! Markdown syntax inside an already-tagged block (a list item or a table
//! cell) is literal text to a markdown renderer, so the builder renders twice:
//! first the bare text of every such cell in isolation, then the whole body.
//! The second rendering is parsed with `dom_query` and copied into a
//! [`Document`], reclassifying every tag on the way.

use crate::dom::{self, NodeRef, Selection};
use crate::error::{Error, Result};
use crate::markdown;
use crate::metadata::actions::annotate_actions;
use crate::patterns::SELF_CLOSING_TAG;

use super::sanitize::HANGING_INDENT_CLASS;
use super::tags::{
    ACTION_ATTR, ACTION_TAG, COLLAPSED_TAG_SET, DROPPED_TAGS, DROPPED_TAG_SET, MARKDOWN_CELL_TAGS,
    VOID_TAG_SET,
};
use super::{Document, NodeId, NodeKind};

/// Class given to a block split off a list item by a line break.
pub const INDENT_CLASS: &str = "indent";

/// Classes a source block may carry into the tree.
const LAYOUT_CLASSES: [&str; 2] = [HANGING_INDENT_CLASS, INDENT_CLASS];

/// Build a document tree from raw entry markup.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the rendered markup has no body to read from.
pub fn build_document(markup: &str) -> Result<Document> {
    let expanded = expand_self_closing(markup);

    // Pass 1: cell-level markdown.
    let first = dom::parse(&expanded);
    first.select(&DROPPED_TAGS.join(", ")).remove();
    render_cell_markdown(&first);
    let body_html = dom::inner_html(&dom::body(&first));

    // Pass 2: document-level markdown.
    let rendered = markdown::render(&body_html);
    let tree = dom::parse(&rendered);
    let body = dom::body(&tree);
    let Some(body_node) = body.nodes().first().copied() else {
        return Err(Error::Parse("rendered markup has no body".to_string()));
    };

    let mut doc = Document::new();
    convert_children(&body_node, NodeId::ROOT, &mut doc);
    split_line_breaks(&mut doc);
    Ok(doc)
}

/// Rewrite `<tag ... />` as `<tag ...></tag>` for non-void tags.
///
/// The HTML parser ignores the self-closing flag on unknown elements, which
/// would make a marker like `<actions ... />` swallow the rest of its block.
#[must_use]
pub fn expand_self_closing(markup: &str) -> String {
    SELF_CLOSING_TAG
        .replace_all(markup, |caps: &regex::Captures| {
            let name = &caps[1];
            let attrs = &caps[2];
            if VOID_TAG_SET.contains(name.to_ascii_lowercase().as_str()) {
                format!("<{name}{attrs}>")
            } else {
                format!("<{name}{attrs}></{name}>")
            }
        })
        .into_owned()
}

/// Render the bare text of list items and table cells as inline markdown.
///
/// Cells are handled innermost first so an outer cell serializes the already
/// rendered content of the cells nested in it.
fn render_cell_markdown(doc: &dom::Document) {
    let cells = doc.select(&MARKDOWN_CELL_TAGS.join(", ")).nodes().to_vec();

    for node in cells.into_iter().rev() {
        let children = node.children();
        let has_text = children
            .iter()
            .any(|c| c.is_text() && !c.text().trim().is_empty());
        if !has_text {
            continue;
        }

        let mut inner = String::new();
        for child in &children {
            if child.is_text() {
                inner.push_str(&markdown::render_inline(&child.text()));
            } else if child.is_element() {
                inner.push_str(&dom::outer_html(&Selection::from(*child)));
            }
        }
        dom::set_inner_html(&Selection::from(node), &inner);
    }
}

/// Copy the children of a parsed node into the arena under `parent`.
fn convert_children(source: &NodeRef, parent: NodeId, doc: &mut Document) {
    for child in source.children() {
        if child.is_text() {
            let text = doc.create_text(child.text().to_string());
            doc.append(parent, text);
            continue;
        }
        if !child.is_element() {
            continue;
        }
        let Some(tag) = dom::tag_name(&child) else {
            continue;
        };

        if DROPPED_TAG_SET.contains(tag.as_str()) {
            continue;
        }

        if tag == ACTION_TAG {
            let phrase = dom::attribute(&child, ACTION_ATTR).unwrap_or_default();
            let annotation = doc.create_text(annotate_actions(&phrase));
            doc.append(parent, annotation);
            convert_children(&child, parent, doc);
            continue;
        }

        if COLLAPSED_TAG_SET.contains(tag.as_str()) {
            convert_children(&child, parent, doc);
            continue;
        }

        let id = doc.create(NodeKind::from_tag(&tag));
        for (name, value) in dom::attributes(&child) {
            if name == "class" {
                if let Some(class) = layout_classes(&value) {
                    doc.set_class(id, class);
                }
            }
            doc.node_mut(id).attrs.push((name, value));
        }
        doc.append(parent, id);
        convert_children(&child, id, doc);
    }
}

/// Keep only the layout tokens of a source class string, in order.
///
/// Field slugs are assigned during header extraction; a slug written in the
/// source would let a body block pass for a header field.
fn layout_classes(class: &str) -> Option<String> {
    let tokens: Vec<&str> = class
        .split_whitespace()
        .filter(|t| LAYOUT_CLASSES.contains(t))
        .collect();
    (!tokens.is_empty()).then(|| tokens.join(" "))
}

/// Split paragraph-like blocks at each direct line break.
///
/// Everything after the break moves into a new block of the same kind
/// inserted right after the original; blocks split off a list item are
/// classed `indent`. The break itself is removed.
pub fn split_line_breaks(doc: &mut Document) {
    let mut work: Vec<NodeId> = doc
        .descendants(NodeId::ROOT)
        .into_iter()
        .filter(|&id| doc.kind(id).is_paragraph_like())
        .rev()
        .collect();

    while let Some(block) = work.pop() {
        let Some(br_index) = doc
            .children(block)
            .iter()
            .position(|&c| *doc.kind(c) == NodeKind::LineBreak)
        else {
            continue;
        };

        let kind = doc.kind(block).clone();
        let br = doc.children(block)[br_index];
        let next = doc.create(kind.clone());
        if kind == NodeKind::ListItem {
            doc.set_class(next, INDENT_CLASS);
        }
        doc.move_children_from(block, br_index + 1, next);
        doc.detach(br);
        doc.insert_after(block, next);
        work.push(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::serialize;

    #[test]
    fn test_expand_self_closing_keeps_void_tags() {
        assert_eq!(
            expand_self_closing(r#"<actions string="Reaction" />"#),
            r#"<actions string="Reaction"></actions>"#
        );
        assert_eq!(expand_self_closing("a<br/>b"), "a<br>b");
    }

    #[test]
    fn test_markdown_inside_table_cells_is_rendered() {
        let doc = build_document("<table><tr><td>**Hit** 2d6</td></tr></table>")
            .expect("document");
        let html = serialize(&doc);
        assert!(html.contains("<td><strong>Hit</strong> 2d6</td>"), "{html}");
    }

    #[test]
    fn test_action_marker_becomes_annotation() {
        let doc = build_document(r#"**Cast** <actions string="Two Actions" /> somatic"#)
            .expect("document");
        let p = doc.children(NodeId::ROOT)[0];
        assert_eq!(doc.text_content(p), "Cast [two-actions] somatic");
    }

    #[test]
    fn test_title_and_traits_are_dropped() {
        let markup = "<title level=\"1\">Fireball</title>\n\n<traits><trait label=\"Fire\" /></traits>\n\nBody text";
        let doc = build_document(markup).expect("document");
        assert_eq!(doc.text_content(NodeId::ROOT).trim(), "Body text");
    }

    #[test]
    fn test_links_collapse_and_bold_variants_normalize() {
        let doc = build_document("<p><b>Bold</b> <i>it</i> <a href=\"/x\">link</a></p>")
            .expect("document");
        let p = doc.children(NodeId::ROOT)[0];
        let kinds: Vec<&NodeKind> = doc.children(p).iter().map(|&c| doc.kind(c)).collect();
        assert_eq!(kinds[0], &NodeKind::Strong);
        assert_eq!(kinds[2], &NodeKind::Emphasis);
        assert!(!kinds.iter().any(|k| matches!(k, NodeKind::Other(_))));
        assert_eq!(doc.text_content(p), "Bold it link");
    }

    #[test]
    fn test_line_break_splits_paragraph() {
        let doc = build_document("<p>one<br>two<br>three</p>").expect("document");
        let blocks: Vec<NodeId> = doc
            .children(NodeId::ROOT)
            .iter()
            .copied()
            .filter(|&c| !doc.is_text(c))
            .collect();
        assert_eq!(blocks.len(), 3);
        assert_eq!(doc.text_content(blocks[0]), "one");
        assert_eq!(doc.text_content(blocks[2]), "three");
        assert!(blocks.iter().all(|&b| *doc.kind(b) == NodeKind::Paragraph));
    }

    #[test]
    fn test_line_break_in_list_item_marks_indent() {
        let doc = build_document("<ul><li>first<br>second</li></ul>").expect("document");
        let ul = doc
            .children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&c| *doc.kind(c) == NodeKind::UnorderedList)
            .expect("list");
        let items: Vec<NodeId> = doc
            .children(ul)
            .iter()
            .copied()
            .filter(|&c| *doc.kind(c) == NodeKind::ListItem)
            .collect();
        assert_eq!(items.len(), 2);
        assert!(doc.has_class(items[1], INDENT_CLASS));
        assert_eq!(doc.text_content(items[1]), "second");
    }
}
