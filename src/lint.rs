//! Linter for compiled sheets: checks that do not block an export but usually point at a
//! mistake in the table.
//!
//! ## Rules
//!
//! - **Integer ids**: every exported row id should be an integer.
//! - **Unique ids**: two exported rows must not share an id.
//! - **Unique names**: named fields under the same parent must not share a name.
//! - **Element types**: a scalar or group element of an array should have the array's base type.
//! - **Complete containers**: a container must find all of its declared columns.
//! - **Row width**: every exported row must have a cell for every leaf column.
//!
//! Run the linter via the `lint_sheet` binary: `cargo run --bin lint_sheet -- item.csv`.
//! Exit code 1 if any error-level findings.

use crate::ast::{FieldId, FieldTree};
use crate::compile::element_type_matches;
use crate::options::ExportOptions;
use crate::sheet::CompiledSheet;
use std::collections::{HashMap, HashSet};

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Identifies which rule produced the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintRule {
    /// Row id is not an integer.
    IdNotInteger,
    /// Row id already used by an earlier row.
    DuplicateId,
    /// Two sibling fields share a name.
    DuplicateFieldName,
    /// Array element descriptor differs from the array's base type.
    ElementTypeMismatch,
    /// Type row ended before a container got all of its members.
    TruncatedContainer,
    /// Row has fewer cells than the schema reads.
    ShortRow,
}

impl LintRule {
    /// Stable kebab-case identifier, used in CLI output.
    pub fn id(self) -> &'static str {
        match self {
            LintRule::IdNotInteger => "id-not-integer",
            LintRule::DuplicateId => "duplicate-id",
            LintRule::DuplicateFieldName => "duplicate-field-name",
            LintRule::ElementTypeMismatch => "element-type-mismatch",
            LintRule::TruncatedContainer => "truncated-container",
            LintRule::ShortRow => "short-row",
        }
    }
}

/// A single lint message. `row` and `column` are 0-based grid positions.
#[derive(Debug, Clone)]
pub struct LintMessage {
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub rule: LintRule,
    pub severity: Severity,
    pub message: String,
}

/// Run all lint rules. Schema findings come first (column order), then row findings (row order).
pub fn lint_sheet(sheet: &CompiledSheet, options: &ExportOptions) -> Vec<LintMessage> {
    let mut out = lint_tree(&sheet.tree);

    let needed = sheet.tree.max_column().map(|c| c + 1).unwrap_or(0);
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (line, row) in sheet.accepted_rows(options) {
        let id = row[0].as_str();
        if id.trim().parse::<i64>().is_err() {
            out.push(LintMessage {
                row: Some(line),
                column: Some(0),
                rule: LintRule::IdNotInteger,
                severity: Severity::Warning,
                message: format!("id `{}` is not an integer", id),
            });
        }
        let first = *seen.entry(id).or_insert(line);
        if first != line {
            out.push(LintMessage {
                row: Some(line),
                column: Some(0),
                rule: LintRule::DuplicateId,
                severity: Severity::Error,
                message: format!("id `{}` already used on row {}", id, first + 1),
            });
        }
        if row.len() < needed {
            out.push(LintMessage {
                row: Some(line),
                column: Some(row.len()),
                rule: LintRule::ShortRow,
                severity: Severity::Error,
                message: format!("row has {} cell(s), schema reads {}", row.len(), needed),
            });
        }
    }
    out
}

/// Schema-only rules.
pub fn lint_tree(tree: &FieldTree) -> Vec<LintMessage> {
    let mut out = Vec::new();
    for id in std::iter::once(FieldId::ROOT).chain(tree.preorder()) {
        let node = tree.node(id);
        let declared = node.kind.width();
        if node.children.len() < declared {
            out.push(LintMessage {
                row: None,
                column: node.index,
                rule: LintRule::TruncatedContainer,
                severity: Severity::Warning,
                message: format!(
                    "`{}` declares {} member(s) but only {} column(s) follow",
                    node.descriptor,
                    declared,
                    node.children.len()
                ),
            });
        }

        if !node.is_array {
            let mut names = HashSet::new();
            for (_, child) in tree.children(id) {
                if !child.name.is_empty() && !names.insert(child.name.as_str()) {
                    out.push(LintMessage {
                        row: None,
                        column: child.index,
                        rule: LintRule::DuplicateFieldName,
                        severity: Severity::Error,
                        message: format!("field name `{}` is used twice at this level", child.name),
                    });
                }
            }
        } else {
            for (_, child) in tree.children(id) {
                if !element_type_matches(node, child) {
                    out.push(LintMessage {
                        row: None,
                        column: child.index,
                        rule: LintRule::ElementTypeMismatch,
                        severity: Severity::Warning,
                        message: format!(
                            "element `{}` in `{}` array",
                            child.descriptor, node.base_type
                        ),
                    });
                }
            }
        }
    }
    out.sort_by_key(|m| m.column);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile;
    use crate::header::Header;
    use crate::sheet::Sheet;

    fn rules(msgs: &[LintMessage]) -> Vec<LintRule> {
        msgs.iter().map(|m| m.rule).collect()
    }

    #[test]
    fn duplicate_sibling_names() {
        let tree = compile(&Header::new(&["id", "hp", "hp"], &["int", "int", "int"])).expect("compile");
        let msgs = lint_tree(&tree);
        assert_eq!(rules(&msgs), vec![LintRule::DuplicateFieldName]);
        assert_eq!(msgs[0].column, Some(2));
    }

    #[test]
    fn same_name_under_different_parents_is_fine() {
        let header = Header::new(
            &["id", "a", "x", "b", "x"],
            &["int", "dict<1>", "int", "dict<1>", "int"],
        );
        let tree = compile(&header).expect("compile");
        assert!(lint_tree(&tree).is_empty());
    }

    #[test]
    fn element_mismatch_and_truncation_are_warnings() {
        let tree = compile(&Header::new(&["id", "l", ""], &["int", "int[2]", "string"])).expect("compile");
        let msgs = lint_tree(&tree);
        let found = rules(&msgs);
        assert!(found.contains(&LintRule::TruncatedContainer));
        assert!(found.contains(&LintRule::ElementTypeMismatch));
        assert!(msgs.iter().all(|m| m.severity == Severity::Warning));
    }

    #[test]
    fn every_duplicate_id_points_at_the_first_row() {
        let rows = [
            vec!["key", "hp"],
            vec!["id", "hp"],
            vec!["int", "int"],
            vec!["b", "b"],
            vec!["7", "1"],
            vec!["7", "2"],
            vec!["7", "3"],
        ];
        let grid = rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect();
        let sheet = Sheet::from_rows("mob", grid).compile().expect("compile");
        let msgs = lint_sheet(&sheet, &ExportOptions::default());
        let dups: Vec<_> = msgs
            .iter()
            .filter(|m| m.rule == LintRule::DuplicateId)
            .map(|m| (m.row, m.message.as_str()))
            .collect();
        assert_eq!(
            dups,
            vec![
                (Some(5), "id `7` already used on row 5"),
                (Some(6), "id `7` already used on row 5"),
            ]
        );
    }

    #[test]
    fn clean_schema_passes() {
        let header = Header::new(
            &["id", "cost", "", "", "pos", "x", "y"],
            &["int", "int[2]", "int", "int", "dict<2>", "float", "float"],
        );
        let tree = compile(&header).expect("compile");
        let msgs = lint_tree(&tree);
        assert!(msgs.is_empty(), "clean schema should have no findings: {:?}", msgs);
    }
}
