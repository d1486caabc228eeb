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

//! Tests for the `orc-inspect` CLI binary.
//!
//! The inspected file is synthesized on the fly; see
//! `tests/integration/main.rs` for the full tail-building coverage.

#![cfg(feature = "cli")]

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use prost::Message;

use orc_inspect::proto;

/// Build a minimal single-column ORC tail and write it to `dir`.
fn write_minimal_orc(dir: &tempfile::TempDir) -> PathBuf {
    let footer = proto::Footer {
        number_of_rows: Some(3),
        types: vec![
            proto::Type {
                kind: Some(proto::TypeKind::Struct as i32),
                subtypes: vec![1],
                field_names: vec!["id".to_string()],
                ..Default::default()
            },
            proto::Type {
                kind: Some(proto::TypeKind::Long as i32),
                ..Default::default()
            },
        ],
        stripes: vec![proto::StripeInformation {
            offset: Some(3),
            index_length: Some(0),
            data_length: Some(30),
            footer_length: Some(10),
            number_of_rows: Some(3),
        }],
        ..Default::default()
    };
    let footer_buf = footer.encode_to_vec();
    let postscript = proto::PostScript {
        footer_length: Some(footer_buf.len() as u64),
        compression: Some(proto::CompressionKind::None as i32),
        metadata_length: Some(0),
        version: vec![0, 12],
        magic: Some("ORC".to_string()),
        ..Default::default()
    };
    let postscript_buf = postscript.encode_to_vec();

    let mut bytes = b"ORC".to_vec();
    bytes.extend_from_slice(&footer_buf);
    bytes.extend_from_slice(&postscript_buf);
    bytes.push(postscript_buf.len() as u8);

    let path = dir.path().join("minimal.orc");
    fs::write(&path, bytes).unwrap();
    path
}

fn run_inspect(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_orc-inspect"))
        .args(args)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.success(), stdout, stderr)
}

#[test]
fn test_inspect_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_minimal_orc(&dir);
    let (ok, stdout, _) = run_inspect(&[path.to_str().unwrap()]);
    assert!(ok, "orc-inspect failed");
    assert!(stdout.contains("Rows: 3"), "missing row count:\n{stdout}");
    assert!(
        stdout.contains("name = id  type = LONG  stats = none"),
        "missing schema line:\n{stdout}"
    );
    assert!(
        stdout.contains("no statistics captured"),
        "missing stripe notice:\n{stdout}"
    );
}

#[test]
fn test_inspect_missing_file() {
    let (ok, _, stderr) = run_inspect(&["/nonexistent/path/file.orc"]);
    assert!(!ok, "should fail for a missing file");
    assert!(
        stderr.contains("failed to inspect"),
        "should show error context: {stderr}"
    );
}

#[test]
fn test_inspect_garbage_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.orc");
    fs::write(&path, vec![0xABu8; 64]).unwrap();
    let (ok, _, stderr) = run_inspect(&[path.to_str().unwrap()]);
    assert!(!ok, "should fail for a non-ORC file");
    assert!(
        stderr.contains("source unreadable"),
        "should surface the error taxonomy: {stderr}"
    );
}

#[test]
fn test_no_arguments_shows_usage() {
    let (ok, stdout, stderr) = run_inspect(&[]);
    assert!(!ok, "should fail without a file argument");
    let combined = format!("{stdout}{stderr}");
    assert!(
        combined.contains("Usage:"),
        "should show usage info: {combined}"
    );
}
