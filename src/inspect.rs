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

//! The inspection entry points.
//!
//! [`inspect`] loads a file's metadata and renders the full report;
//! [`render_report`] is the pure half, reusable against metadata obtained
//! elsewhere. The schema is walked once and reused across the file scope
//! and every stripe scope. A fatal error aborts the whole run with no
//! partial report; absent statistics at any scope is reported, not raised.

use std::fs::File;
use std::path::Path;

use crate::correlate::correlate_columns;
use crate::error::{Result, SourceUnreadableSnafu};
use crate::reader::metadata::{read_metadata, FileMetadata};
use crate::report;
use crate::schema::walk_schema;

/// Inspect the ORC file at `path` and return the report lines.
pub fn inspect<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| {
        SourceUnreadableSnafu {
            message: format!("failed to open {}: {e}", path.display()),
        }
        .build()
    })?;
    let metadata = read_metadata(&mut file)?;
    render_report(&metadata)
}

/// Render the full report for already-loaded metadata.
pub fn render_report(metadata: &FileMetadata) -> Result<Vec<String>> {
    let nodes = walk_schema(metadata.types())?;
    let column_count = metadata.types().root()?.children().len();

    let mut lines = Vec::new();
    report::render_file_facts(metadata, column_count, &mut lines);

    lines.push(String::new());
    lines.push("Schema:".to_string());
    let columns = correlate_columns(&nodes, metadata.file_statistics());
    report::render_columns(&columns, metadata.types(), 0, &mut lines)?;

    for (index, stripe) in metadata.stripes().iter().enumerate() {
        lines.push(String::new());
        lines.push(report::stripe_summary(index, stripe));
        match metadata.stripe_statistics(index) {
            Some(statistics) => {
                lines.push(format!("  retained size: {}", statistics.retained_size()));
                let columns = correlate_columns(&nodes, Some(statistics.columns()));
                report::render_columns(&columns, metadata.types(), 1, &mut lines)?;
            }
            None => lines.push(format!("  {}", report::NO_STRIPE_STATISTICS)),
        }
    }

    Ok(lines)
}
