//! Header field extraction.
//!
//! An entry's header is the run of leading paragraphs shaped as a bold label
//! followed by value text. Scanning stops at the first block of any other
//! shape, so body paragraphs that happen to open with bold text are not
//! mistaken for fields unless the header runs straight into them.

use crate::document::sanitize::HANGING_INDENT_CLASS;
use crate::document::{Document, NodeId, NodeKind};
use crate::error::{Error, Result};

use super::rules::{label_slug, FieldRules};
use super::HeaderField;

enum Scan {
    /// The field stays in the text; move on to the next block.
    Kept(HeaderField),
    /// The field's paragraph was removed; the next block now sits at the same index.
    Removed(HeaderField),
    /// Label not in the rule set; the block is left as it was.
    Unknown,
}

/// Extract and rewrite the header fields at the top of a document.
///
/// Fields are returned in document order, including the ones removed from
/// the text because they are hidden, gated or empty after filtering.
///
/// # Errors
///
/// Returns [`Error::Structure`] when a paragraph bundles a second label that
/// is not followed by value text.
pub fn extract_header_fields(
    doc: &mut Document,
    traits: &[String],
    rules: &FieldRules,
) -> Result<Vec<HeaderField>> {
    let mut fields = Vec::new();
    let mut index = 0;

    loop {
        let Some(&block) = doc.children(NodeId::ROOT).get(index) else {
            break;
        };
        let Some(label) = label_node(doc, block) else {
            break;
        };

        let raw_label = doc.text_content(label).trim().to_string();
        if rules.skip_labels.contains(&raw_label) {
            tracing::trace!(label = %raw_label, "dropping skipped header paragraph");
            doc.detach(block);
            continue;
        }

        split_bundled_field(doc, block, &raw_label)?;

        match read_field(doc, block, label, &raw_label, traits, rules) {
            Scan::Kept(field) => {
                fields.push(field);
                index += 1;
            }
            Scan::Removed(field) => fields.push(field),
            Scan::Unknown => index += 1,
        }
    }

    Ok(fields)
}

/// The label of a header-shaped block: a paragraph whose first child is
/// bold and whose second child is text.
fn label_node(doc: &Document, block: NodeId) -> Option<NodeId> {
    if *doc.kind(block) != NodeKind::Paragraph {
        return None;
    }
    let label = doc.first_child(block)?;
    if *doc.kind(label) != NodeKind::Strong {
        return None;
    }
    let value = doc.next_sibling(label)?;
    doc.is_text(value).then_some(label)
}

/// Move a second bold label, and everything after it, into its own paragraph.
///
/// Sources sometimes write `Range 30 feet; Targets 1 creature` in a single
/// paragraph. The new paragraph is inserted right after `block` so the scan
/// reaches it next.
fn split_bundled_field(doc: &mut Document, block: NodeId, label: &str) -> Result<()> {
    let Some(position) = doc
        .children(block)
        .iter()
        .skip(1)
        .position(|&c| *doc.kind(c) == NodeKind::Strong)
        .map(|p| p + 1)
    else {
        return Ok(());
    };

    let next = doc.create(NodeKind::Paragraph);
    doc.move_children_from(block, position, next);
    doc.insert_after(block, next);

    let has_value = doc
        .children(next)
        .get(1)
        .is_some_and(|&c| doc.is_text(c));
    if !has_value {
        let bundled = doc.text_content(doc.children(next)[0]);
        return Err(Error::Structure(format!(
            "field {:?} bundled after {label:?} has no value text",
            bundled.trim()
        )));
    }
    Ok(())
}

fn read_field(
    doc: &mut Document,
    block: NodeId,
    label_node: NodeId,
    raw_label: &str,
    traits: &[String],
    rules: &FieldRules,
) -> Scan {
    let label = rules.canonical_label(raw_label).to_string();
    if !rules.is_known(&label) {
        return Scan::Unknown;
    }
    let slug = label_slug(&label);

    let Some(value_node) = doc.next_sibling(label_node) else {
        return Scan::Unknown;
    };
    let at_block_end = doc.children(block).last() == Some(&value_node);
    let value = rules.transform_value(&slug, doc.text(value_node), at_block_end);

    // Rewrite the label as a single text run.
    for child in doc.children(label_node).to_vec() {
        doc.detach(child);
    }
    let label_text = doc.create_text(label.clone());
    doc.append(label_node, label_text);
    if let Some(value) = &value {
        doc.set_text(value_node, value.clone());
    }
    doc.set_class(block, format!("{HANGING_INDENT_CLASS} {slug}"));

    let hidden = rules.hidden.contains(&slug);
    let gated_out = !rules.passes_gate(&slug, traits);
    let field = HeaderField {
        label,
        gate: rules.gate(&slug).map(str::to_string),
        value: value.as_deref().map(str::trim).unwrap_or_default().to_string(),
        slug,
    };

    if hidden || gated_out || value.is_none() {
        tracing::trace!(slug = %field.slug, hidden, gated_out, "removing header field");
        doc.detach(block);
        return Scan::Removed(field);
    }
    Scan::Kept(field)
}
