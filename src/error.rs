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

//! Error types for ORC metadata inspection.

use snafu::Snafu;

use crate::schema::ColumnId;

pub type Result<T, E = InspectError> = std::result::Result<T, E>;

/// Fatal inspection failures.
///
/// Absent statistics, at the file level or for any stripe, is never an
/// error; it is reported as part of the output instead.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum InspectError {
    /// The source cannot be opened, is truncated, or does not decode as an
    /// ORC container.
    #[snafu(display("source unreadable: {message}"))]
    SourceUnreadable { message: String },

    /// The type table is internally inconsistent: a dangling child
    /// identifier, a missing root, or a traversal cycle.
    #[snafu(display("malformed schema: {message} (column {column_id})"))]
    MalformedSchema { column_id: ColumnId, message: String },
}
