//! Field documentation for the top of a generated file: one `--` comment line per field,
//! in the same pre-order the row renderer uses.

use crate::ast::{FieldId, FieldTree};
use crate::options::ExportOptions;

/// Width of the key column in a comment line.
pub const KEY_WIDTH: usize = 30;
/// Width of the descriptor column in a comment line.
pub const TYPE_WIDTH: usize = 10;

/// Comment lines for every exported field of `tree`.
pub fn comment_lines(tree: &FieldTree, options: &ExportOptions) -> Vec<String> {
    let mut out = Vec::with_capacity(tree.len());
    for &child in &tree.root().children {
        push_comments(tree, child, options, &mut out);
    }
    out
}

/// The whole comment block, lines joined with `\n`.
pub fn comment_block(tree: &FieldTree, options: &ExportOptions) -> String {
    comment_lines(tree, options).join("\n")
}

fn push_comments(tree: &FieldTree, id: FieldId, options: &ExportOptions, out: &mut Vec<String>) {
    let node = tree.node(id);
    if !options.target.includes(node.mode) {
        return;
    }
    out.push(comment_line(tree, id, options));
    for &child in &node.children {
        push_comments(tree, child, options, out);
    }
}

/// Format the comment line of a single field. Keys are indented one level deeper than the
/// field's depth, so top-level fields already carry one indent. The descriptor is shown
/// trimmed so stray spaces in the header cannot break the alignment.
pub fn comment_line(tree: &FieldTree, id: FieldId, options: &ExportOptions) -> String {
    let node = tree.node(id);
    let pad = options.pad(node.depth.max(0) as usize + 1);
    let key = match node.array_position {
        Some(i) if tree.in_array(id) => format!("{}[{}]", pad, i),
        _ => format!("{}{}", pad, node.name),
    };
    format!(
        "-- {:<kw$} {:<tw$} {}",
        key,
        node.descriptor,
        node.description,
        kw = KEY_WIDTH,
        tw = TYPE_WIDTH
    )
}
