//! Parameter collapsing.
//!
//! Short related fields read better on one line: the right-hand field of
//! each configured pair is appended to the left-hand one, separated by `"; "`.

use crate::document::Document;

use super::rules::FieldRules;

const SEPARATOR: &str = "; ";

/// Merge configured field pairs, in rule order. Returns how many merges ran.
///
/// A pair applies only when both blocks are still present, so a field that
/// was already absorbed by an earlier pair is never merged a second time.
pub fn collapse_parameters(doc: &mut Document, rules: &FieldRules) -> usize {
    let mut merged = 0;
    for (left, right) in &rules.collapse_pairs {
        let (Some(target), Some(source)) =
            (doc.find_block_by_class(left), doc.find_block_by_class(right))
        else {
            continue;
        };

        let separator = doc.create_text(SEPARATOR);
        doc.append(target, separator);
        doc.move_children_from(source, 0, target);
        doc.detach(source);
        merged += 1;
    }
    merged
}
