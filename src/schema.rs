// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The flat, identifier-indexed type table and the schema tree walker.
//!
//! ORC footers encode the type tree as a flat list: each entry names its
//! children by column id rather than holding them directly. The table here
//! keeps that arena representation, and [`walk_schema`] flattens the tree
//! into depth-annotated nodes in document order.

use std::fmt;

use snafu::{ensure, OptionExt};

use crate::error::{MalformedSchemaSnafu, Result};
use crate::proto;

/// Identifier of one node in the schema tree. Identifier 0 is the root.
pub type ColumnId = u32;

/// ORC logical type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Binary,
    Timestamp,
    List,
    Map,
    Struct,
    Union,
    Decimal,
    Date,
    Varchar,
    Char,
    TimestampInstant,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Boolean => "BOOLEAN",
            TypeKind::Byte => "BYTE",
            TypeKind::Short => "SHORT",
            TypeKind::Int => "INT",
            TypeKind::Long => "LONG",
            TypeKind::Float => "FLOAT",
            TypeKind::Double => "DOUBLE",
            TypeKind::String => "STRING",
            TypeKind::Binary => "BINARY",
            TypeKind::Timestamp => "TIMESTAMP",
            TypeKind::List => "LIST",
            TypeKind::Map => "MAP",
            TypeKind::Struct => "STRUCT",
            TypeKind::Union => "UNION",
            TypeKind::Decimal => "DECIMAL",
            TypeKind::Date => "DATE",
            TypeKind::Varchar => "VARCHAR",
            TypeKind::Char => "CHAR",
            TypeKind::TimestampInstant => "TIMESTAMP_INSTANT",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<proto::TypeKind> for TypeKind {
    fn from(value: proto::TypeKind) -> Self {
        match value {
            proto::TypeKind::Boolean => TypeKind::Boolean,
            proto::TypeKind::Byte => TypeKind::Byte,
            proto::TypeKind::Short => TypeKind::Short,
            proto::TypeKind::Int => TypeKind::Int,
            proto::TypeKind::Long => TypeKind::Long,
            proto::TypeKind::Float => TypeKind::Float,
            proto::TypeKind::Double => TypeKind::Double,
            proto::TypeKind::String => TypeKind::String,
            proto::TypeKind::Binary => TypeKind::Binary,
            proto::TypeKind::Timestamp => TypeKind::Timestamp,
            proto::TypeKind::List => TypeKind::List,
            proto::TypeKind::Map => TypeKind::Map,
            proto::TypeKind::Struct => TypeKind::Struct,
            proto::TypeKind::Union => TypeKind::Union,
            proto::TypeKind::Decimal => TypeKind::Decimal,
            proto::TypeKind::Date => TypeKind::Date,
            proto::TypeKind::Varchar => TypeKind::Varchar,
            proto::TypeKind::Char => TypeKind::Char,
            proto::TypeKind::TimestampInstant => TypeKind::TimestampInstant,
        }
    }
}

/// A named child edge in the type tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildField {
    pub name: String,
    pub column_id: ColumnId,
}

/// One entry of the flat type arena: a kind and its child edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescription {
    kind: TypeKind,
    children: Vec<ChildField>,
}

impl TypeDescription {
    pub fn new(kind: TypeKind, children: Vec<ChildField>) -> Self {
        Self { kind, children }
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn children(&self) -> &[ChildField] {
        &self.children
    }
}

impl From<&proto::Type> for TypeDescription {
    fn from(value: &proto::Type) -> Self {
        let kind = TypeKind::from(value.kind());
        let children = value
            .subtypes
            .iter()
            .enumerate()
            .map(|(index, &column_id)| {
                let name = match kind {
                    // Non-struct composites carry no field names in the
                    // footer; synthesize the Arrow-conventional ones.
                    TypeKind::List => "item".to_string(),
                    TypeKind::Map if index == 0 => "key".to_string(),
                    TypeKind::Map if index == 1 => "value".to_string(),
                    _ => value
                        .field_names
                        .get(index)
                        .cloned()
                        .unwrap_or_else(|| format!("field{index}")),
                };
                ChildField { name, column_id }
            })
            .collect();
        Self { kind, children }
    }
}

/// The flat type table; tree structure is expressed purely as column-id
/// references between entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTable {
    types: Vec<TypeDescription>,
}

impl TypeTable {
    pub fn new(types: Vec<TypeDescription>) -> Self {
        Self { types }
    }

    pub(crate) fn from_proto(types: &[proto::Type]) -> Self {
        Self {
            types: types.iter().map(TypeDescription::from).collect(),
        }
    }

    pub fn get(&self, column_id: ColumnId) -> Option<&TypeDescription> {
        self.types.get(column_id as usize)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The file's top-level record type, always at column id 0.
    pub fn root(&self) -> Result<&TypeDescription> {
        self.get(0).context(MalformedSchemaSnafu {
            column_id: 0u32,
            message: "type table has no root entry",
        })
    }
}

/// One flattened schema entry: a column, its display name, and how deep it
/// sits under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    pub column_id: ColumnId,
    pub name: String,
    pub depth: usize,
}

/// Flatten the type tree into pre-order, depth-annotated schema nodes.
///
/// The root itself is not emitted; depth 0 means a direct child of the
/// root. Sibling order follows the declared field order, so reports list
/// columns in document order. The walk is a pure function of the table and
/// may be repeated with identical results.
///
/// Fails with [`MalformedSchema`](crate::InspectError::MalformedSchema)
/// when the root is missing, a child id has no entry, an id is reachable
/// through more than one parent, or nesting exceeds the table size (both
/// latter cases cover cycles).
pub fn walk_schema(types: &TypeTable) -> Result<Vec<SchemaNode>> {
    let root = types.root()?;
    let mut visited = vec![false; types.len()];
    visited[0] = true;
    let mut nodes = Vec::with_capacity(types.len().saturating_sub(1));
    visit_fields(types, 0, root, 0, &mut visited, &mut nodes)?;
    Ok(nodes)
}

fn visit_fields(
    types: &TypeTable,
    parent_id: ColumnId,
    parent: &TypeDescription,
    depth: usize,
    visited: &mut [bool],
    out: &mut Vec<SchemaNode>,
) -> Result<()> {
    // A valid tree can never nest deeper than it has entries.
    ensure!(
        depth < types.len(),
        MalformedSchemaSnafu {
            column_id: parent_id,
            message: "nesting depth exceeds the type count",
        }
    );
    for child in parent.children() {
        let column_id = child.column_id;
        let description = types.get(column_id).context(MalformedSchemaSnafu {
            column_id,
            message: "child identifier has no type entry",
        })?;
        ensure!(
            !visited[column_id as usize],
            MalformedSchemaSnafu {
                column_id,
                message: "identifier reachable through more than one parent",
            }
        );
        visited[column_id as usize] = true;
        out.push(SchemaNode {
            column_id,
            name: child.name.clone(),
            depth,
        });
        // A composite kind with no declared children is a valid leaf.
        if !description.children().is_empty() {
            visit_fields(types, column_id, description, depth + 1, visited, out)?;
        }
    }
    Ok(())
}
