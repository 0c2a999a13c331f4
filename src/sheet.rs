//! A whole sheet: header rows plus data rows, compiled once and exported to Lua text.
//!
//! Row layout of the raw grid:
//!
//! | row | content |
//! |-----|---------|
//! | 0 | field descriptions |
//! | 1 | field names (first must be `id`) |
//! | 2 | type descriptors |
//! | 3 | mode tags (`s`, `c`, `b`) |
//! | 4.. | data rows |

use crate::ast::FieldTree;
use crate::compile::compile;
use crate::dump::comment_lines;
use crate::error::{ExportError, SchemaError};
use crate::header::Header;
use crate::options::ExportOptions;
use crate::render::{accept_row, render_row};

const DESCRIPTION_ROW: usize = 0;
const NAME_ROW: usize = 1;
const TYPE_ROW: usize = 2;
const MODE_ROW: usize = 3;

/// Raw sheet as read from the table source.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn from_rows(name: &str, rows: Vec<Vec<String>>) -> Self {
        Sheet {
            name: name.to_string(),
            rows,
        }
    }

    /// Header rows taken from the top of the grid; missing rows are empty.
    pub fn header(&self) -> Header {
        let row = |i: usize| self.rows.get(i).cloned().unwrap_or_default();
        Header {
            descriptions: row(DESCRIPTION_ROW),
            names: row(NAME_ROW),
            types: trim_trailing_blanks(row(TYPE_ROW)),
            modes: row(MODE_ROW),
        }
    }

    /// Validate and compile the header.
    pub fn compile(self) -> Result<CompiledSheet, SchemaError> {
        let header = self.header();
        let tree = compile(&header)?;
        Ok(CompiledSheet {
            name: self.name,
            header,
            tree,
            rows: self.rows,
        })
    }
}

/// Spreadsheet exports pad short rows with empty cells; only the type row's real extent
/// defines the columns.
fn trim_trailing_blanks(mut types: Vec<String>) -> Vec<String> {
    while types.last().map(|t| t.trim().is_empty()).unwrap_or(false) {
        types.pop();
    }
    types
}

/// A sheet whose header compiled successfully.
#[derive(Debug, Clone)]
pub struct CompiledSheet {
    pub name: String,
    pub header: Header,
    pub tree: FieldTree,
    rows: Vec<Vec<String>>,
}

impl CompiledSheet {
    /// All rows of the grid, header rows included.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Data rows that take part in the export, with their row index in the grid.
    pub fn accepted_rows<'a>(
        &'a self,
        options: &'a ExportOptions,
    ) -> impl Iterator<Item = (usize, &'a [String])> + 'a {
        self.rows
            .iter()
            .enumerate()
            .skip(options.data_start_row)
            .filter(move |(line, row)| {
                let keep = accept_row(row, options);
                if !keep {
                    tracing::debug!(line = *line, "skipping row");
                }
                keep
            })
            .map(|(line, row)| (line, row.as_slice()))
    }

    /// Render comments and every accepted row.
    pub fn export(&self, options: &ExportOptions) -> Result<Export, ExportError> {
        let comments = comment_lines(&self.tree, options);
        let data = self
            .accepted_rows(options)
            .map(|(_, row)| render_row(&self.tree, row, options))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(sheet = %self.name, rows = data.len(), "exported sheet");
        Ok(Export {
            name: self.name.clone(),
            comments,
            data,
        })
    }
}

/// Generated text of one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub name: String,
    /// One comment line per field.
    pub comments: Vec<String>,
    /// One rendered block per accepted row.
    pub data: Vec<String>,
}

impl Export {
    pub fn comment_text(&self) -> String {
        self.comments.join("\n")
    }

    pub fn data_text(&self) -> String {
        self.data.join("\n")
    }

    /// Comment block followed by the data block, newline-terminated.
    pub fn to_lua(&self) -> String {
        let mut out = self.comment_text();
        out.push('\n');
        out.push_str(&self.data_text());
        out.push('\n');
        out
    }
}
