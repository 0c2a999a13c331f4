//! Field tree compiled from a sheet header.
//!
//! Nodes live in a single arena ([`FieldTree`]) and refer to each other through [`FieldId`]
//! handles: children are owned by position in the arena, `parent` and `root` are plain
//! handles, so there are no reference cycles. Slot 0 is always the synthetic root.

use std::fmt;

/// Handle of a node inside a [`FieldTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub(crate) usize);

impl FieldId {
    /// The synthetic root of every tree.
    pub const ROOT: FieldId = FieldId(0);
}

/// Parsed form of one column type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// Trimmed descriptor text, e.g. `int[3]`.
    pub text: String,
    /// Descriptor without its `[N]` / `<N>` suffix.
    pub base_type: String,
    pub kind: DescriptorKind,
}

/// Shape declared by a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    /// Plain value read from the row.
    Leaf,
    /// `base[N]`: N array elements follow in the token stream.
    Array(usize),
    /// `dict<N>`: N positional members follow in the token stream.
    Group(usize),
}

impl DescriptorKind {
    /// Number of child subtrees the descriptor declares.
    pub fn width(self) -> usize {
        match self {
            DescriptorKind::Leaf => 0,
            DescriptorKind::Array(n) | DescriptorKind::Group(n) => n,
        }
    }
}

/// Generation mode tag of a column (`s`, `c`, `b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Server,
    Client,
    /// `b`, or a blank mode cell.
    #[default]
    Both,
}

impl Mode {
    /// Parse a mode cell. Unknown tags are treated as `Both` so they are never dropped.
    pub fn parse(cell: &str) -> Mode {
        match cell.trim().to_ascii_lowercase().as_str() {
            "s" | "server" => Mode::Server,
            "c" | "client" => Mode::Client,
            _ => Mode::Both,
        }
    }
}

/// One compiled column (or the synthetic root).
#[derive(Debug, Clone)]
pub struct FieldNode {
    /// Column index in the type row; `None` for the synthetic root.
    pub index: Option<usize>,
    /// Trimmed descriptor, e.g. `int[3]`.
    pub descriptor: String,
    /// Descriptor exactly as it appeared in the header.
    pub raw_descriptor: String,
    pub base_type: String,
    pub name: String,
    pub description: String,
    /// Raw mode cell.
    pub mode_tag: String,
    pub mode: Mode,
    /// `parent.depth + 1`; the root sits at `-1`.
    pub depth: i32,
    pub kind: DescriptorKind,
    pub is_array: bool,
    /// Ordinal among array siblings; `None` when the parent is not an array.
    pub array_position: Option<usize>,
    pub parent: Option<FieldId>,
    pub root: FieldId,
    pub children: Vec<FieldId>,
}

impl FieldNode {
    pub(crate) fn root() -> Self {
        FieldNode {
            index: None,
            descriptor: String::new(),
            raw_descriptor: String::new(),
            base_type: String::new(),
            name: String::new(),
            description: String::new(),
            mode_tag: String::new(),
            mode: Mode::Both,
            depth: -1,
            kind: DescriptorKind::Leaf,
            is_array: false,
            array_position: None,
            parent: None,
            root: FieldId::ROOT,
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.index.is_none()
    }

    pub fn is_container(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Immutable field tree. Built once by [`compile`](crate::compile::compile), then shared
/// read-only by the row renderer, the comment dump and the linter.
#[derive(Debug, Clone)]
pub struct FieldTree {
    pub(crate) nodes: Vec<FieldNode>,
    pub(crate) column_count: usize,
}

impl FieldTree {
    pub fn root(&self) -> &FieldNode {
        &self.nodes[FieldId::ROOT.0]
    }

    pub fn node(&self, id: FieldId) -> &FieldNode {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: FieldId) -> Option<&FieldNode> {
        self.node(id).parent.map(|p| self.node(p))
    }

    pub fn children(&self, id: FieldId) -> impl Iterator<Item = (FieldId, &FieldNode)> + '_ {
        self.node(id).children.iter().map(move |&c| (c, self.node(c)))
    }

    /// Whether `id` sits directly under an array node.
    pub fn in_array(&self, id: FieldId) -> bool {
        self.parent(id).map(|p| p.is_array).unwrap_or(false)
    }

    /// Number of columns in the type row the tree was built from.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Highest column index referenced by any node.
    pub fn max_column(&self) -> Option<usize> {
        self.nodes.iter().filter_map(|n| n.index).max()
    }

    /// Non-root nodes in pre-order (the order of both the comment dump and row output).
    pub fn preorder(&self) -> Vec<FieldId> {
        let mut out = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        let mut stack: Vec<FieldId> = self.root().children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }
}

impl fmt::Display for FieldTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.preorder() {
            let n = self.node(id);
            let pad = "  ".repeat(n.depth.max(0) as usize);
            match n.array_position {
                Some(i) => writeln!(f, "{}[{}]: {}", pad, i, n.descriptor)?,
                None => writeln!(f, "{}{}: {}", pad, n.name, n.descriptor)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile_types;

    #[test]
    fn tree_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldTree>();
    }

    #[test]
    fn display_outlines_the_tree() {
        let tree = compile_types(&["int", "dict<1>", "int[2]", "int", "int"]).expect("compile");
        assert_eq!(
            tree.to_string(),
            "id: int\nfield1: dict<1>\n  field2: int[2]\n    [0]: int\n    [1]: int\n"
        );
    }

    #[test]
    fn preorder_follows_columns() {
        let tree = compile_types(&["int", "int[2]", "int", "int", "string"]).expect("compile");
        let columns: Vec<_> = tree.preorder().into_iter().map(|id| tree.node(id).index).collect();
        assert_eq!(columns, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
    }
}
