//! Export configuration.
//!
//! The defaults reproduce the classic output byte for byte: two-space indentation, 1-based
//! array keys in data blocks, data starting at row 4, `//` marking commented-out rows, and
//! every column exported regardless of its mode tag.
//!
//! ```rust
//! use tabconf::{ExportOptions, ExportTarget};
//!
//! let options = ExportOptions::new()
//!     .with_target(ExportTarget::Server)
//!     .with_indent(4);
//! assert_eq!(options.indent, 4);
//! ```

use crate::ast::Mode;

/// Which side an export is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportTarget {
    /// Every column, whatever its mode tag.
    #[default]
    All,
    Server,
    Client,
}

impl ExportTarget {
    /// Parse a CLI value: `all`/`both`/`b`, `server`/`s`, `client`/`c`.
    pub fn parse(s: &str) -> Option<ExportTarget> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "both" | "b" => Some(ExportTarget::All),
            "server" | "s" => Some(ExportTarget::Server),
            "client" | "c" => Some(ExportTarget::Client),
            _ => None,
        }
    }

    /// Whether a column with this mode is part of the export.
    pub fn includes(self, mode: Mode) -> bool {
        match (self, mode) {
            (ExportTarget::All, _) | (_, Mode::Both) => true,
            (ExportTarget::Server, Mode::Server) | (ExportTarget::Client, Mode::Client) => true,
            _ => false,
        }
    }
}

/// Options for rendering rows and comments.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Spaces per depth level.
    pub indent: usize,
    /// Key of the first array element in data blocks (comments always count from 0).
    pub array_base: usize,
    pub target: ExportTarget,
    /// Index of the first data row; rows before it are header rows.
    pub data_start_row: usize,
    /// Rows whose id cell starts with this marker are skipped.
    pub comment_marker: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            indent: 2,
            array_base: 1,
            target: ExportTarget::All,
            data_start_row: 4,
            comment_marker: "//".to_string(),
        }
    }
}

impl ExportOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_array_base(mut self, base: usize) -> Self {
        self.array_base = base;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: ExportTarget) -> Self {
        self.target = target;
        self
    }

    /// Header rows below 4 are still read as description/name/type/mode; this only moves
    /// where data starts.
    #[must_use]
    pub fn with_data_start_row(mut self, row: usize) -> Self {
        self.data_start_row = row;
        self
    }

    #[must_use]
    pub fn with_comment_marker(mut self, marker: &str) -> Self {
        self.comment_marker = marker.to_string();
        self
    }

    pub(crate) fn pad(&self, depth: usize) -> String {
        " ".repeat(self.indent * depth)
    }
}
