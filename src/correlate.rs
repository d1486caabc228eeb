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

//! Pairing schema nodes with the statistics recorded for them.
//!
//! The absence policy lives here, so the renderer never has to reason
//! about missing tables or missing entries itself.

use crate::schema::SchemaNode;
use crate::statistics::{ColumnStatistics, StatisticsTable};

/// One schema node joined with its statistics record, if any was recorded.
#[derive(Debug, Clone, Copy)]
pub struct CorrelatedColumn<'a> {
    pub node: &'a SchemaNode,
    pub statistics: Option<&'a ColumnStatistics>,
}

/// Look up each node's statistics record by exact column id.
///
/// An absent table, or a table without an entry for a given id, yields a
/// `None` pairing; neither case is an error. The output is parallel to the
/// input: exactly one pairing per node, in node order.
pub fn correlate_columns<'a>(
    nodes: &'a [SchemaNode],
    table: Option<&'a StatisticsTable>,
) -> Vec<CorrelatedColumn<'a>> {
    nodes
        .iter()
        .map(|node| CorrelatedColumn {
            node,
            statistics: table.and_then(|table| table.get(node.column_id)),
        })
        .collect()
}
