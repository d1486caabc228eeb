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

//! Rendering of the inspection report as plain text lines.
//!
//! Nesting is shown through indentation, two spaces per depth level, so
//! the structure is visible without parent pointers in the output. The
//! renderer never mutates its inputs; presentation choices here carry no
//! semantics beyond listing every schema node exactly once per scope, in
//! traversal order.

use crate::correlate::CorrelatedColumn;
use crate::error::{MalformedSchemaSnafu, Result};
use crate::reader::metadata::FileMetadata;
use crate::schema::TypeTable;
use crate::statistics::{ColumnStatistics, TypeStatistics};
use crate::stripe::StripeMetadata;
use snafu::OptionExt;

/// Marker shown where no statistics record exists for a column.
pub const NO_STATISTICS: &str = "none";

/// Notice shown for a stripe with no statistics in the metadata section.
pub const NO_STRIPE_STATISTICS: &str = "no statistics captured";

/// Format a statistics record into a human-readable summary.
pub fn format_stats(stats: &ColumnStatistics) -> String {
    let mut parts = vec![format!("values={}", stats.number_of_values())];
    if stats.has_null() {
        parts.push("has_nulls=true".to_string());
    }
    if let Some(ts) = stats.type_statistics() {
        match ts {
            TypeStatistics::Integer { min, max, sum } => {
                parts.push(format!("min={min}"));
                parts.push(format!("max={max}"));
                if let Some(sum) = sum {
                    parts.push(format!("sum={sum}"));
                }
            }
            TypeStatistics::Double { min, max, sum } => {
                parts.push(format!("min={min}"));
                parts.push(format!("max={max}"));
                if let Some(sum) = sum {
                    parts.push(format!("sum={sum}"));
                }
            }
            TypeStatistics::String { min, max, sum } => {
                parts.push(format!("min={min}"));
                parts.push(format!("max={max}"));
                parts.push(format!("total_length={sum}"));
            }
            TypeStatistics::Bucket { true_count } => {
                parts.push(format!("true_count={true_count}"));
            }
            TypeStatistics::Decimal { min, max, sum } => {
                parts.push(format!("min={min}"));
                parts.push(format!("max={max}"));
                if let Some(sum) = sum {
                    parts.push(format!("sum={sum}"));
                }
            }
            TypeStatistics::Date { min, max } => {
                parts.push(format!("min={min}"));
                parts.push(format!("max={max}"));
            }
            TypeStatistics::Binary { sum } => {
                parts.push(format!("total_bytes={sum}"));
            }
            TypeStatistics::Timestamp { min, max } => {
                parts.push(format!("min={min}"));
                parts.push(format!("max={max}"));
            }
            TypeStatistics::Collection {
                min_children,
                max_children,
                total_children,
            } => {
                parts.push(format!("min_children={min_children}"));
                parts.push(format!("max_children={max_children}"));
                parts.push(format!("total_children={total_children}"));
            }
        }
    }
    parts.join(", ")
}

/// Top-level facts: row counts, compression, stripe count, user metadata.
pub(crate) fn render_file_facts(
    metadata: &FileMetadata,
    column_count: usize,
    out: &mut Vec<String>,
) {
    out.push(format!("Rows: {}", metadata.number_of_rows()));
    out.push(format!(
        "Row group size: {}",
        metadata
            .row_index_stride()
            .map(|stride| stride.to_string())
            .unwrap_or_else(|| "None".to_string())
    ));
    out.push(format!("Columns: {column_count}"));
    out.push(format!(
        "Compression: {}",
        metadata
            .compression()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "None".to_string())
    ));
    out.push(format!(
        "Compression block size: {}",
        metadata
            .compression()
            .map(|c| c.block_size().to_string())
            .unwrap_or_else(|| "None".to_string())
    ));
    if let Some(version) = metadata.software_version() {
        out.push(format!("Writer version: {version}"));
    }
    out.push(format!("Stripes: {}", metadata.stripes().len()));
    out.push("User metadata:".to_string());
    if metadata.user_metadata().is_empty() {
        out.push("  (none)".to_string());
    }
    for (key, value) in metadata.user_metadata() {
        out.push(format!("  {key} = {}", String::from_utf8_lossy(value)));
    }
}

/// Descriptor summary line for one stripe.
pub(crate) fn stripe_summary(index: usize, stripe: &StripeMetadata) -> String {
    format!(
        "Stripe {index}: offset={} index_length={} data_length={} footer_length={} rows={}",
        stripe.offset(),
        stripe.index_length(),
        stripe.data_length(),
        stripe.footer_length(),
        stripe.number_of_rows()
    )
}

/// One line per correlated column, indented by nesting depth.
///
/// The type kind is resolved from the table at render time rather than
/// cached on the node.
pub(crate) fn render_columns(
    columns: &[CorrelatedColumn<'_>],
    types: &TypeTable,
    base_indent: usize,
    out: &mut Vec<String>,
) -> Result<()> {
    for column in columns {
        let node = column.node;
        let description = types.get(node.column_id).context(MalformedSchemaSnafu {
            column_id: node.column_id,
            message: "column vanished from the type table",
        })?;
        let stats = column
            .statistics
            .map(format_stats)
            .unwrap_or_else(|| NO_STATISTICS.to_string());
        out.push(format!(
            "{}name = {}  type = {}  stats = {}",
            "  ".repeat(base_indent + node.depth),
            node.name,
            description.kind(),
            stats
        ));
    }
    Ok(())
}
