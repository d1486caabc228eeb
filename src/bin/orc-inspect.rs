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

//! Print an ORC file's metadata report: schema, stripes and statistics.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "orc-inspect")]
#[command(author, version, about = "Inspect ORC file metadata", long_about = None)]
struct Args {
    /// Path to the ORC file
    file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let lines = orc_inspect::inspect(&args.file)
        .with_context(|| format!("failed to inspect {}", args.file.display()))?;
    for line in &lines {
        println!("{line}");
    }
    Ok(())
}
