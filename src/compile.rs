//! Compile the flat type row into a [`FieldTree`].
//!
//! Columns are a pre-order serialization of the tree: a container column (`int[3]`,
//! `dict<2>`) is immediately followed by the columns of its N child subtrees, with no
//! closing marker. The builder walks the type row once, left to right, and every call of
//! `compile_field` returns the index of the last column its subtree consumed so
//! the caller can continue right after it.
//!
//! Descriptors are parsed up front, before the recursion starts, so the grammar never
//! runs on top of a deep stack of nested containers.

use crate::ast::{Descriptor, DescriptorKind, FieldId, FieldNode, FieldTree, Mode};
use crate::error::SchemaError;
use crate::header::Header;
use crate::parser::parse_descriptor;

/// Validate `header` and compile its type row.
pub fn compile(header: &Header) -> Result<FieldTree, SchemaError> {
    header.validate()?;
    let descriptors = parse_types(&header.types)?;
    let mut builder = Builder {
        header,
        descriptors,
        nodes: vec![FieldNode::root()],
    };
    let mut cursor = 0;
    while cursor < header.column_count() {
        cursor = builder.compile_field(FieldId::ROOT, cursor, None)? + 1;
    }
    let tree = FieldTree {
        nodes: builder.nodes,
        column_count: header.column_count(),
    };
    tracing::debug!(
        columns = tree.column_count(),
        fields = tree.len() - 1,
        top_level = tree.root().children.len(),
        "compiled header"
    );
    Ok(tree)
}

/// Compile a bare type row. The first column is named `id`, the others `field<i>`.
pub fn compile_types(types: &[&str]) -> Result<FieldTree, SchemaError> {
    let names: Vec<String> = (0..types.len())
        .map(|i| if i == 0 { "id".to_string() } else { format!("field{}", i) })
        .collect();
    let header = Header {
        names,
        types: types.iter().map(|s| s.to_string()).collect(),
        ..Header::default()
    };
    compile(&header)
}

fn parse_types(types: &[String]) -> Result<Vec<Descriptor>, SchemaError> {
    types
        .iter()
        .enumerate()
        .map(|(column, raw)| {
            parse_descriptor(raw).map_err(|reason| SchemaError::InvalidDescriptor {
                column,
                descriptor: raw.trim().to_string(),
                reason,
            })
        })
        .collect()
}

struct Builder<'a> {
    header: &'a Header,
    /// One parsed descriptor per column of `header.types`.
    descriptors: Vec<Descriptor>,
    nodes: Vec<FieldNode>,
}

impl Builder<'_> {
    /// Compile the column at `cursor` (and its subtree) as the next child of `parent`.
    /// Returns the index of the last column consumed; past the end it returns `cursor`.
    fn compile_field(
        &mut self,
        parent: FieldId,
        cursor: usize,
        array_position: Option<usize>,
    ) -> Result<usize, SchemaError> {
        let header = self.header;
        let (Some(raw), Some(descriptor)) = (header.types.get(cursor), self.descriptors.get(cursor)) else {
            return Ok(cursor);
        };
        let kind = descriptor.kind;

        let id = FieldId(self.nodes.len());
        let (parent_depth, root) = {
            let p = &self.nodes[parent.0];
            (p.depth, p.root)
        };
        let mode_tag = Header::cell(&header.modes, cursor).to_string();
        self.nodes.push(FieldNode {
            index: Some(cursor),
            raw_descriptor: raw.clone(),
            base_type: descriptor.base_type.clone(),
            descriptor: descriptor.text.clone(),
            name: Header::cell(&header.names, cursor).to_string(),
            description: Header::cell(&header.descriptions, cursor).to_string(),
            mode: Mode::parse(&mode_tag),
            mode_tag,
            depth: parent_depth + 1,
            kind,
            is_array: matches!(kind, DescriptorKind::Array(_)),
            array_position,
            parent: Some(parent),
            root,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);

        let mut cursor = cursor;
        let columns = header.column_count();
        match kind {
            DescriptorKind::Leaf => self.check_element_type(parent, id),
            DescriptorKind::Array(n) => {
                for i in 0..n {
                    if cursor + 1 >= columns {
                        break;
                    }
                    cursor = self.compile_field(id, cursor + 1, Some(i))?;
                }
            }
            DescriptorKind::Group(n) => {
                self.check_element_type(parent, id);
                for _ in 0..n {
                    if cursor + 1 >= columns {
                        break;
                    }
                    cursor = self.compile_field(id, cursor + 1, None)?;
                }
            }
        }

        let declared = kind.width();
        let built = self.nodes[id.0].children.len();
        if built < declared {
            tracing::warn!(
                column = id_column(&self.nodes[id.0]),
                declared,
                built,
                "type row ended inside a container"
            );
        }
        Ok(cursor)
    }

    /// Element type check for array members. Evaluated but not enforced: a mismatch is
    /// only traced and the column is accepted as written.
    fn check_element_type(&self, parent: FieldId, id: FieldId) {
        let parent = &self.nodes[parent.0];
        let node = &self.nodes[id.0];
        if parent.is_array && !element_type_matches(parent, node) {
            tracing::trace!(
                column = id_column(node),
                element = %node.descriptor,
                expected = %parent.base_type,
                "array element type differs from array type"
            );
        }
    }
}

/// Whether a non-array element agrees with the base type of its array.
pub fn element_type_matches(array: &FieldNode, element: &FieldNode) -> bool {
    element.is_array || element.descriptor == array.base_type
}

fn id_column(node: &FieldNode) -> usize {
    node.index.unwrap_or(0)
}
