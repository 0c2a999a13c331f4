//! Header rows of a sheet and the checks run on them before compilation.

use crate::error::SchemaError;

/// Name the first column must carry.
pub const ID_COLUMN: &str = "id";

/// The four parallel header rows, indexed by column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub descriptions: Vec<String>,
    pub names: Vec<String>,
    pub types: Vec<String>,
    pub modes: Vec<String>,
}

impl Header {
    pub fn new(names: &[&str], types: &[&str]) -> Self {
        Header {
            descriptions: Vec::new(),
            names: names.iter().map(|s| s.to_string()).collect(),
            types: types.iter().map(|s| s.to_string()).collect(),
            modes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_descriptions(mut self, descriptions: &[&str]) -> Self {
        self.descriptions = descriptions.iter().map(|s| s.to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_modes(mut self, modes: &[&str]) -> Self {
        self.modes = modes.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Number of schema columns (the length of the type row).
    pub fn column_count(&self) -> usize {
        self.types.len()
    }

    /// Check the id column and that every type cell is filled. Stops at the first problem.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let first = self.names.first().map(String::as_str).unwrap_or("");
        if first != ID_COLUMN {
            return Err(SchemaError::MissingIdColumn {
                found: first.to_string(),
            });
        }
        if self.types.is_empty() {
            return Err(SchemaError::NoColumns);
        }
        if let Some(column) = self.types.iter().position(|t| t.trim().is_empty()) {
            return Err(SchemaError::EmptyDescriptor { column });
        }
        Ok(())
    }

    pub(crate) fn cell(row: &[String], column: usize) -> &str {
        row.get(column).map(String::as_str).unwrap_or("")
    }
}
