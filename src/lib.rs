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

//! Inspect ORC file metadata without touching row data.
//!
//! Reads the file tail (postscript, footer, metadata section), reconstructs
//! the nested column schema from the footer's flat type list, correlates it
//! with the file-level and per-stripe column statistics, and renders an
//! indented text report.
//!
//! ```no_run
//! # fn main() -> orc_inspect::Result<()> {
//! for line in orc_inspect::inspect("/path/to/file.orc")? {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod compression;
pub mod correlate;
pub mod error;
pub mod inspect;
pub mod proto;
pub mod reader;
pub mod report;
pub mod schema;
pub mod statistics;
pub mod stripe;

pub use error::{InspectError, Result};
pub use inspect::{inspect, render_report};
