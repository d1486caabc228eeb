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

//! End-to-end inspection tests over synthesized ORC files.
//!
//! The files are built in memory from the crate's own protobuf definitions
//! and written to a temp directory, so no binary fixtures are checked in.
//! Only the file tail is populated; the inspector never touches stripe
//! data.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use prost::Message;

use orc_inspect::error::InspectError;
use orc_inspect::proto;
use orc_inspect::reader::metadata::FileMetadata;
use orc_inspect::schema::{ChildField, TypeDescription, TypeKind, TypeTable};
use orc_inspect::statistics::{ColumnStatistics, StatisticsTable, TypeStatistics};
use orc_inspect::stripe::{StripeMetadata, StripeStatistics};
use orc_inspect::{inspect, render_report};

const MAGIC: &[u8] = b"ORC";

fn struct_type(children: &[(&str, u32)]) -> proto::Type {
    proto::Type {
        kind: Some(proto::TypeKind::Struct as i32),
        subtypes: children.iter().map(|(_, id)| *id).collect(),
        field_names: children.iter().map(|(name, _)| name.to_string()).collect(),
        ..Default::default()
    }
}

fn primitive_type(kind: proto::TypeKind) -> proto::Type {
    proto::Type {
        kind: Some(kind as i32),
        ..Default::default()
    }
}

fn count_stats(values: u64) -> proto::ColumnStatistics {
    proto::ColumnStatistics {
        number_of_values: Some(values),
        ..Default::default()
    }
}

fn int_stats(values: u64, min: i64, max: i64, sum: i64) -> proto::ColumnStatistics {
    proto::ColumnStatistics {
        number_of_values: Some(values),
        int_statistics: Some(proto::IntegerStatistics {
            minimum: Some(min),
            maximum: Some(max),
            sum: Some(sum),
        }),
        ..Default::default()
    }
}

fn string_stats(values: u64, min: &str, max: &str, sum: i64) -> proto::ColumnStatistics {
    proto::ColumnStatistics {
        number_of_values: Some(values),
        string_statistics: Some(proto::StringStatistics {
            minimum: Some(min.to_string()),
            maximum: Some(max.to_string()),
            sum: Some(sum),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn stripe_information(offset: u64, rows: u64) -> proto::StripeInformation {
    proto::StripeInformation {
        offset: Some(offset),
        index_length: Some(0),
        data_length: Some(100),
        footer_length: Some(20),
        number_of_rows: Some(rows),
    }
}

/// Footer for `struct<id:bigint, address:struct<city:string>>` with one
/// stripe and file-level statistics for every column.
fn nested_footer() -> proto::Footer {
    proto::Footer {
        number_of_rows: Some(5),
        row_index_stride: Some(10_000),
        types: vec![
            struct_type(&[("id", 1), ("address", 2)]),
            primitive_type(proto::TypeKind::Long),
            struct_type(&[("city", 3)]),
            primitive_type(proto::TypeKind::String),
        ],
        statistics: vec![
            count_stats(5),
            int_stats(5, 1, 5, 15),
            count_stats(5),
            string_stats(5, "ann arbor", "zeeland", 60),
        ],
        stripes: vec![stripe_information(3, 5)],
        metadata: vec![
            proto::UserMetadataItem {
                name: Some("writer.version".to_string()),
                value: Some(b"2.1".to_vec()),
            },
            proto::UserMetadataItem {
                name: Some("created.by".to_string()),
                value: Some(b"etl-job-7".to_vec()),
            },
        ],
        ..Default::default()
    }
}

/// Serialize an uncompressed tail: magic, metadata section, footer,
/// postscript, trailing postscript length.
fn encode_tail(footer: &proto::Footer, metadata: Option<&proto::Metadata>) -> Vec<u8> {
    let metadata_buf = metadata.map(|m| m.encode_to_vec()).unwrap_or_default();
    let footer_buf = footer.encode_to_vec();
    let postscript = proto::PostScript {
        footer_length: Some(footer_buf.len() as u64),
        compression: Some(proto::CompressionKind::None as i32),
        metadata_length: Some(metadata_buf.len() as u64),
        version: vec![0, 12],
        magic: Some("ORC".to_string()),
        ..Default::default()
    };
    let postscript_buf = postscript.encode_to_vec();

    let mut out = MAGIC.to_vec();
    out.extend_from_slice(&metadata_buf);
    out.extend_from_slice(&footer_buf);
    out.extend_from_slice(&postscript_buf);
    out.push(postscript_buf.len() as u8);
    out
}

fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// Lines following `header`, up to the next blank line.
fn section(lines: &[String], header: &str) -> Vec<String> {
    let start = lines.iter().position(|l| l == header).unwrap() + 1;
    let end = lines[start..]
        .iter()
        .position(|l| l.is_empty())
        .map(|offset| start + offset)
        .unwrap_or(lines.len());
    lines[start..end].to_vec()
}

#[test]
fn test_inspect_reports_schema_in_document_order() {
    let dir = tempfile::tempdir().unwrap();
    let metadata = proto::Metadata {
        stripe_stats: vec![proto::StripeStatistics {
            col_stats: vec![
                count_stats(5),
                int_stats(5, 1, 5, 15),
                count_stats(5),
                string_stats(5, "ann arbor", "zeeland", 60),
            ],
        }],
    };
    let path = write_file(
        &dir,
        "nested.orc",
        &encode_tail(&nested_footer(), Some(&metadata)),
    );

    let lines = inspect(&path).unwrap();

    assert!(lines.contains(&"Rows: 5".to_string()));
    assert!(lines.contains(&"Row group size: 10000".to_string()));
    assert!(lines.contains(&"Columns: 2".to_string()));
    assert!(lines.contains(&"Compression: None".to_string()));
    assert!(lines.contains(&"Stripes: 1".to_string()));

    assert_eq!(
        section(&lines, "Schema:"),
        vec![
            "name = id  type = LONG  stats = values=5, min=1, max=5, sum=15".to_string(),
            "name = address  type = STRUCT  stats = values=5".to_string(),
            "  name = city  type = STRING  stats = values=5, min=ann arbor, max=zeeland, total_length=60"
                .to_string(),
        ]
    );

    // the stripe section repeats the same columns, one indent level deeper
    let stripe_start = lines
        .iter()
        .position(|l| l.starts_with("Stripe 0:"))
        .unwrap();
    assert_eq!(
        lines[stripe_start],
        "Stripe 0: offset=3 index_length=0 data_length=100 footer_length=20 rows=5"
    );
    assert!(lines[stripe_start + 1].starts_with("  retained size: "));
    assert_eq!(
        lines[stripe_start + 2],
        "  name = id  type = LONG  stats = values=5, min=1, max=5, sum=15"
    );
    assert_eq!(
        lines[stripe_start + 4],
        "    name = city  type = STRING  stats = values=5, min=ann arbor, max=zeeland, total_length=60"
    );
}

#[test]
fn test_absent_file_statistics_marks_every_column() {
    let dir = tempfile::tempdir().unwrap();
    let mut footer = nested_footer();
    footer.statistics.clear();
    let path = write_file(&dir, "nostats.orc", &encode_tail(&footer, None));

    let lines = inspect(&path).unwrap();
    assert_eq!(
        section(&lines, "Schema:"),
        vec![
            "name = id  type = LONG  stats = none".to_string(),
            "name = address  type = STRUCT  stats = none".to_string(),
            "  name = city  type = STRING  stats = none".to_string(),
        ]
    );
}

#[test]
fn test_stripe_sections_rendered_for_every_stripe() {
    let dir = tempfile::tempdir().unwrap();
    let mut footer = nested_footer();
    footer.stripes = vec![
        stripe_information(3, 2),
        stripe_information(103, 2),
        stripe_information(203, 1),
    ];
    // statistics recorded for the first two stripes only
    let metadata = proto::Metadata {
        stripe_stats: vec![
            proto::StripeStatistics {
                col_stats: vec![count_stats(2); 4],
            },
            proto::StripeStatistics {
                col_stats: vec![count_stats(2); 4],
            },
        ],
    };
    let path = write_file(
        &dir,
        "threestripes.orc",
        &encode_tail(&footer, Some(&metadata)),
    );

    let lines = inspect(&path).unwrap();
    let summaries: Vec<&String> = lines.iter().filter(|l| l.starts_with("Stripe ")).collect();
    assert_eq!(summaries.len(), 3);

    let last = lines
        .iter()
        .position(|l| l.starts_with("Stripe 2:"))
        .unwrap();
    assert_eq!(lines[last + 1], "  no statistics captured");
}

#[test]
fn test_mixed_stripe_statistics_presence() {
    // absent in the middle, present on both sides; each stripe still gets
    // its own section
    let types = TypeTable::new(vec![
        TypeDescription::new(
            TypeKind::Struct,
            vec![ChildField {
                name: "id".to_string(),
                column_id: 1,
            }],
        ),
        TypeDescription::new(TypeKind::Long, vec![]),
    ]);
    let stats = || {
        StripeStatistics::new(
            64,
            StatisticsTable::new(vec![
                ColumnStatistics::new(2, false, None),
                ColumnStatistics::new(
                    2,
                    false,
                    Some(TypeStatistics::Integer {
                        min: 1,
                        max: 2,
                        sum: Some(3),
                    }),
                ),
            ]),
        )
    };
    let metadata = FileMetadata::from_parts(
        5,
        None,
        None,
        None,
        types,
        None,
        vec![
            StripeMetadata::new(3, 0, 10, 5, 2),
            StripeMetadata::new(18, 0, 10, 5, 2),
            StripeMetadata::new(33, 0, 10, 5, 1),
        ],
        vec![Some(stats()), None, Some(stats())],
        vec![],
    );

    let lines = render_report(&metadata).unwrap();
    let summaries: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.starts_with("Stripe "))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(summaries.len(), 3);
    assert_eq!(lines[summaries[0] + 1], "  retained size: 64");
    assert_eq!(lines[summaries[1] + 1], "  no statistics captured");
    assert_eq!(lines[summaries[2] + 1], "  retained size: 64");
}

#[test]
fn test_user_metadata_in_declared_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "meta.orc", &encode_tail(&nested_footer(), None));

    let lines = inspect(&path).unwrap();
    assert_eq!(
        section(&lines, "User metadata:"),
        vec![
            "  writer.version = 2.1".to_string(),
            "  created.by = etl-job-7".to_string(),
        ]
    );
}

#[test]
fn test_dangling_identifier_fails_with_malformed_schema() {
    let dir = tempfile::tempdir().unwrap();
    let footer = proto::Footer {
        number_of_rows: Some(1),
        types: vec![struct_type(&[("ghost", 99)])],
        ..Default::default()
    };
    let path = write_file(&dir, "dangling.orc", &encode_tail(&footer, None));

    match inspect(&path).unwrap_err() {
        InspectError::MalformedSchema { column_id, .. } => assert_eq!(column_id, 99),
        other => panic!("expected MalformedSchema, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_source_unreadable() {
    let err = inspect("/nonexistent/path/file.orc").unwrap_err();
    assert!(matches!(err, InspectError::SourceUnreadable { .. }));
}

#[test]
fn test_zlib_compressed_tail_end_to_end() {
    let dir = tempfile::tempdir().unwrap();

    let deflate_section = |raw: &[u8]| {
        let mut encoder =
            flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(raw).unwrap();
        let compressed = encoder.finish().unwrap();
        let mut framed = ((compressed.len() as u32) << 1).to_le_bytes()[..3].to_vec();
        framed.extend_from_slice(&compressed);
        framed
    };

    let metadata = proto::Metadata {
        stripe_stats: vec![proto::StripeStatistics {
            col_stats: vec![count_stats(5); 4],
        }],
    };
    let metadata_buf = deflate_section(&metadata.encode_to_vec());
    let footer_buf = deflate_section(&nested_footer().encode_to_vec());

    let postscript = proto::PostScript {
        footer_length: Some(footer_buf.len() as u64),
        compression: Some(proto::CompressionKind::Zlib as i32),
        compression_block_size: Some(256 * 1024),
        metadata_length: Some(metadata_buf.len() as u64),
        version: vec![0, 12],
        magic: Some("ORC".to_string()),
        ..Default::default()
    };
    let postscript_buf = postscript.encode_to_vec();

    let mut bytes = MAGIC.to_vec();
    bytes.extend_from_slice(&metadata_buf);
    bytes.extend_from_slice(&footer_buf);
    bytes.extend_from_slice(&postscript_buf);
    bytes.push(postscript_buf.len() as u8);

    let path = write_file(&dir, "zlib.orc", &bytes);
    let lines = inspect(&path).unwrap();

    assert!(lines.contains(&"Rows: 5".to_string()));
    assert!(lines.contains(&"Compression: ZLIB".to_string()));
    assert!(lines.contains(&"Compression block size: 262144".to_string()));
    assert!(lines
        .iter()
        .any(|l| l == "  name = id  type = LONG  stats = values=5"));
}
