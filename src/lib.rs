//! # tabconf — spreadsheet schemas to Lua configuration tables
//!
//! A configuration sheet describes its columns in four header rows (description, name,
//! type, mode). The type row is a flat, pre-order encoding of a field tree: container
//! columns are followed directly by the columns of their members. This crate compiles
//! that row into a [`FieldTree`] with a PEST grammar for the descriptors, then replays the
//! tree against every data row to emit nested Lua table entries.
//!
//! ## Type descriptors
//!
//! ```text
//! descriptor := base_type ( "[" count "]" | "<" count ">" )?
//! ```
//!
//! - `int`, `string`, `float`, ... — leaf column, value copied from the cell
//! - `T[n]` — array of `n` elements; the next `n` column subtrees are the elements
//! - `dict<n>` — fixed group of `n` named members; the next `n` column subtrees are the members
//!
//! ## Example
//!
//! ```rust
//! use tabconf::{ExportOptions, Sheet};
//!
//! let grid: Vec<Vec<String>> = [
//!     vec!["key", "reward", "", ""],
//!     vec!["id", "drops", "", ""],
//!     vec!["int", "int[2]", "int", "int"],
//!     vec!["b", "b", "", ""],
//!     vec!["1001", "", "7", "9"],
//! ]
//! .iter()
//! .map(|r| r.iter().map(|s| s.to_string()).collect())
//! .collect();
//!
//! let export = Sheet::from_rows("item", grid)
//!     .compile()
//!     .unwrap()
//!     .export(&ExportOptions::default())
//!     .unwrap();
//! assert_eq!(
//!     export.data[0],
//!     "[1001] = {\n  id = 1001,\n  drops = {\n    [1] = 7,\n    [2] = 9,\n  },\n},"
//! );
//! ```

pub mod ast;
pub mod compile;
pub mod dump;
pub mod error;
pub mod header;
pub mod lint;
pub mod logging;
pub mod options;
pub mod parser;
pub mod render;
pub mod sheet;
pub mod source;

pub use ast::{Descriptor, DescriptorKind, FieldId, FieldNode, FieldTree, Mode};
pub use compile::{compile, compile_types};
pub use dump::{comment_block, comment_lines};
pub use error::{ExportError, RowError, SchemaError};
pub use header::Header;
pub use options::{ExportOptions, ExportTarget};
pub use parser::parse_descriptor;
pub use render::{accept_row, render_row, render_row_lines};
pub use sheet::{CompiledSheet, Export, Sheet};
pub use source::{load_sheet, read_table, read_table_str};
