//! Render data rows as Lua table entries by walking the compiled [`FieldTree`].
//!
//! The walk mirrors the order the tree was compiled in, so each leaf picks its value from
//! the row cell at its own column index:
//!
//! ```text
//! [1001] = {
//!   id = 1001,
//!   name = Sword,
//!   cost = {
//!     [1] = 10,
//!     [2] = 20,
//!   },
//! },
//! ```

use crate::ast::{FieldId, FieldTree};
use crate::error::RowError;
use crate::options::ExportOptions;

/// Whether a data row takes part in the export: its id cell must be non-empty and must not
/// start with the comment marker.
pub fn accept_row(row: &[String], options: &ExportOptions) -> bool {
    match row.first() {
        Some(id) => !id.is_empty() && !id.starts_with(options.comment_marker.as_str()),
        None => false,
    }
}

/// Render one row as a single block (lines joined with `\n`, no trailing newline).
pub fn render_row(tree: &FieldTree, row: &[String], options: &ExportOptions) -> Result<String, RowError> {
    Ok(render_row_lines(tree, row, options)?.join("\n"))
}

/// Render one row, one output line per entry.
pub fn render_row_lines(
    tree: &FieldTree,
    row: &[String],
    options: &ExportOptions,
) -> Result<Vec<String>, RowError> {
    let mut renderer = RowRenderer {
        tree,
        row,
        options,
        out: Vec::with_capacity(tree.len() + 1),
    };
    renderer.render_node(FieldId::ROOT, 0, 0)?;
    Ok(renderer.out)
}

struct RowRenderer<'a> {
    tree: &'a FieldTree,
    row: &'a [String],
    options: &'a ExportOptions,
    out: Vec<String>,
}

impl<'a> RowRenderer<'a> {
    /// `position` is the 0-based ordinal of `id` among its parent's children.
    fn render_node(&mut self, id: FieldId, position: usize, depth: usize) -> Result<(), RowError> {
        let tree = self.tree;
        let node = tree.node(id);
        let pad = self.options.pad(depth);
        if node.is_root() {
            let row_id = self.row.first().map(String::as_str).unwrap_or("");
            self.out.push(format!("[{}] = {{", row_id));
        } else {
            let key = if tree.in_array(id) {
                format!("[{}]", position + self.options.array_base)
            } else {
                node.name.clone()
            };
            if node.is_container() {
                self.out.push(format!("{}{} = {{", pad, key));
            } else {
                let value = self.cell(node.index.unwrap_or(0))?;
                self.out.push(format!("{}{} = {},", pad, key, value));
            }
        }

        for (i, &child) in node.children.iter().enumerate() {
            if self.options.target.includes(tree.node(child).mode) {
                self.render_node(child, i, depth + 1)?;
            }
        }
        if node.is_root() || node.is_container() {
            self.out.push(format!("{}}},", pad));
        }
        Ok(())
    }

    fn cell(&self, column: usize) -> Result<&'a str, RowError> {
        self.row
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| RowError::MissingCell {
                id: self.row.first().cloned().unwrap_or_default(),
                column,
            })
    }
}
