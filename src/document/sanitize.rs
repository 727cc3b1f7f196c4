//! Tree sanitizer: whitelist enforcement and text-run cleanup.
//!
//! After [`sanitize`] every attached node is one of the whitelisted kinds, no
//! node carries attributes besides its class, no text run is blank and the
//! root holds only blocks.

use super::builder::{split_line_breaks, INDENT_CLASS};
use super::tags::is_whitelisted;
use super::{Document, NodeId, NodeKind};

/// Class of a paragraph led by a bold label.
pub const HANGING_INDENT_CLASS: &str = "hanging-indent";

/// Sanitize a document in place.
pub fn sanitize(doc: &mut Document) {
    enforce_whitelist(doc, NodeId::ROOT);
    // Unwrapping can leave a break directly inside a paragraph.
    split_line_breaks(doc);
    merge_text_runs(doc, NodeId::ROOT);
    normalize_text_runs(doc);
    promote_root_text(doc);
    prune_empty_blocks(doc);
    mark_hanging_indents(doc);
}

/// Strip attributes and remove non-whitelisted nodes, depth first.
///
/// A removed node is unwrapped in place when it has an element parent and
/// dropped with its content when it sits directly under the root.
fn enforce_whitelist(doc: &mut Document, parent: NodeId) {
    let mut i = 0;
    while i < doc.children(parent).len() {
        let child = doc.children(parent)[i];
        doc.node_mut(child).attrs.clear();

        if !is_whitelisted(doc.kind(child)) {
            if parent == NodeId::ROOT {
                doc.detach(child);
            } else {
                doc.unwrap(child);
            }
            // Spliced children now occupy index `i`.
            continue;
        }

        enforce_whitelist(doc, child);
        i += 1;
    }
}

/// Merge adjacent text runs into the first run of each sequence.
fn merge_text_runs(doc: &mut Document, parent: NodeId) {
    let mut run: Option<NodeId> = None;
    for child in doc.children(parent).to_vec() {
        if !doc.is_text(child) {
            run = None;
            merge_text_runs(doc, child);
            continue;
        }
        match run {
            Some(first) => {
                let text = std::mem::take(&mut doc.node_mut(child).text);
                doc.node_mut(first).text.push_str(&text);
                doc.detach(child);
            }
            None => run = Some(child),
        }
    }
}

/// Drop runs made only of spaces and newlines; turn embedded newlines into
/// spaces. Other whitespace, such as a non-breaking space, is content.
fn normalize_text_runs(doc: &mut Document) {
    for id in doc.descendants(NodeId::ROOT) {
        if !doc.is_text(id) {
            continue;
        }
        if doc.text(id).trim_matches([' ', '\n']).is_empty() {
            doc.detach(id);
        } else if doc.text(id).contains('\n') {
            let text = doc.text(id).replace('\n', " ");
            doc.set_text(id, text);
        }
    }
}

/// Wrap bare text at the root into its own paragraph.
fn promote_root_text(doc: &mut Document) {
    for (index, child) in doc.children(NodeId::ROOT).to_vec().into_iter().enumerate() {
        if !doc.is_text(child) {
            continue;
        }
        let paragraph = doc.create(NodeKind::Paragraph);
        doc.insert(NodeId::ROOT, index, paragraph);
        doc.append(paragraph, child);
    }
}

/// Remove paragraphs and list items left without children, innermost first.
fn prune_empty_blocks(doc: &mut Document) {
    for id in doc.descendants(NodeId::ROOT).into_iter().rev() {
        if doc.kind(id).is_paragraph_like() && doc.children(id).is_empty() {
            doc.detach(id);
        }
    }
}

/// Class paragraphs led by a bold label as hanging-indent blocks.
///
/// Such a paragraph is also `indent` when the element before it is a list
/// item or itself indented.
fn mark_hanging_indents(doc: &mut Document) {
    for id in doc.descendants(NodeId::ROOT) {
        if *doc.kind(id) != NodeKind::Paragraph {
            continue;
        }
        let led_by_strong = doc
            .first_child(id)
            .is_some_and(|c| *doc.kind(c) == NodeKind::Strong);
        if !led_by_strong {
            continue;
        }

        doc.add_class(id, HANGING_INDENT_CLASS);
        if let Some(prev) = previous_element(doc, id) {
            if *doc.kind(prev) == NodeKind::ListItem || doc.has_class(prev, INDENT_CLASS) {
                doc.add_class(id, INDENT_CLASS);
            }
        }
    }
}

fn previous_element(doc: &Document, id: NodeId) -> Option<NodeId> {
    let mut current = doc.prev_sibling(id);
    while let Some(prev) = current {
        if !doc.is_text(prev) {
            return Some(prev);
        }
        current = doc.prev_sibling(prev);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::build_document;

    fn sanitized(markup: &str) -> Document {
        let mut doc = build_document(markup).expect("document");
        sanitize(&mut doc);
        doc
    }

    #[test]
    fn test_only_whitelisted_kinds_and_no_attributes_remain() {
        let doc = sanitized(
            r#"<div><p>dropped</p></div><p id="x" class="keep">kept <span style="c">inline</span></p><h2>gone</h2><table><thead><tr><th>a</th></tr></thead></table>"#,
        );
        for id in doc.descendants(NodeId::ROOT) {
            assert!(is_whitelisted(doc.kind(id)), "{:?}", doc.kind(id));
            assert!(doc.node(id).attrs.is_empty());
        }
        let text = doc.text_content(NodeId::ROOT);
        assert!(!text.contains("dropped"));
        assert!(!text.contains("gone"));
        assert!(text.contains("kept inline"));
        assert!(text.contains('a'));
    }

    #[test]
    fn test_source_classes_keep_only_layout_tokens() {
        let doc = sanitized(
            r#"<p class="area" data-x="1">body</p><ul><li class="x indent">item</li></ul>"#,
        );
        let blocks = doc.children(NodeId::ROOT);
        assert_eq!(doc.class(blocks[0]), None);
        assert!(doc.node(blocks[0]).attrs.is_empty());
        let li = doc.children(blocks[1])[0];
        assert_eq!(doc.class(li), Some(INDENT_CLASS));
    }

    #[test]
    fn test_unwrapped_inline_text_is_merged() {
        let doc = sanitized("<p>one <span>two</span> three</p>");
        let p = doc.children(NodeId::ROOT)[0];
        assert_eq!(doc.children(p).len(), 1);
        assert_eq!(doc.text(doc.children(p)[0]), "one two three");
    }

    #[test]
    fn test_newlines_become_spaces_and_blank_runs_vanish() {
        let doc = sanitized("<p><strong>A</strong>\n<em>b</em>\nline\nwrap</p>");
        let p = doc.children(NodeId::ROOT)[0];
        let kids = doc.children(p);
        assert_eq!(kids.len(), 3);
        assert_eq!(doc.text(kids[2]), " line wrap");
    }

    #[test]
    fn test_non_breaking_space_run_is_kept() {
        let doc = sanitized("<p><strong>A</strong>&nbsp;<em>b</em></p>");
        let p = doc.children(NodeId::ROOT)[0];
        let kids = doc.children(p);
        assert_eq!(kids.len(), 3);
        assert_eq!(doc.text(kids[1]), "\u{a0}");
    }

    #[test]
    fn test_break_inside_unwrapped_inline_splits_paragraph() {
        let doc = sanitized("<p>one <u>a<br>b</u></p>");
        let blocks = doc.children(NodeId::ROOT);
        assert_eq!(blocks.len(), 2);
        assert_eq!(doc.text_content(blocks[0]), "one a");
        assert_eq!(doc.text_content(blocks[1]), "b");
        for id in doc.descendants(NodeId::ROOT) {
            assert_ne!(*doc.kind(id), NodeKind::LineBreak);
        }
    }

    #[test]
    fn test_root_holds_only_blocks() {
        let doc = sanitized("plain text\n\n<hr>\n\nmore");
        for &child in doc.children(NodeId::ROOT) {
            assert!(!doc.is_text(child));
        }
        assert_eq!(doc.children(NodeId::ROOT).len(), 3);
    }

    #[test]
    fn test_empty_paragraphs_are_pruned() {
        let doc = sanitized("<p> </p><p><span></span></p><p>x</p>");
        assert_eq!(doc.children(NodeId::ROOT).len(), 1);
    }

    #[test]
    fn test_hanging_indent_marking() {
        let doc = sanitized("<p><strong>Range</strong> 30 feet</p><p>plain</p>");
        let blocks = doc.children(NodeId::ROOT);
        assert_eq!(doc.class(blocks[0]), Some(HANGING_INDENT_CLASS));
        assert_eq!(doc.class(blocks[1]), None);
    }

    #[test]
    fn test_hanging_indent_after_list_item_is_indented() {
        let mut doc = Document::new();
        let ul = doc.create(NodeKind::UnorderedList);
        doc.append(NodeId::ROOT, ul);
        let li = doc.create(NodeKind::ListItem);
        doc.append(ul, li);
        let li_text = doc.create_text("item");
        doc.append(li, li_text);
        let p = doc.create(NodeKind::Paragraph);
        doc.append(ul, p);
        let strong = doc.create(NodeKind::Strong);
        doc.append(p, strong);
        let label = doc.create_text("Note");
        doc.append(strong, label);

        sanitize(&mut doc);

        assert!(doc.has_class(p, HANGING_INDENT_CLASS));
        assert!(doc.has_class(p, INDENT_CLASS));
    }
}
