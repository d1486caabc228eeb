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

//! Decoding of the ORC file tail into [`FileMetadata`].
//!
//! The tail sits at the end of the file:
//!
//! ```text
//! ... stripe data ... | metadata | footer | postscript | psLen (1 byte)
//! ```
//!
//! The postscript is never compressed; the footer and metadata sections
//! are compressed with the codec the postscript declares.

use std::io::{Read, Seek, SeekFrom};

use bytes::{Buf, Bytes};
use prost::Message;
use snafu::ensure;

use crate::compression::{Compression, Decompressor};
use crate::error::{Result, SourceUnreadableSnafu};
use crate::proto;
use crate::schema::TypeTable;
use crate::statistics::StatisticsTable;
use crate::stripe::{StripeMetadata, StripeStatistics};

const MAGIC: &str = "ORC";

/// Initial read from the end of the file; covers the whole tail for most
/// files and avoids a second seek.
const DEFAULT_TAIL_SIZE: u64 = 16 * 1024;

/// The parsed object model of one ORC file's metadata, decoupled from the
/// wire representation.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetadata {
    number_of_rows: u64,
    row_index_stride: Option<u32>,
    compression: Option<Compression>,
    software_version: Option<String>,
    types: TypeTable,
    file_statistics: Option<StatisticsTable>,
    stripes: Vec<StripeMetadata>,
    stripe_statistics: Vec<Option<StripeStatistics>>,
    user_metadata: Vec<(String, Vec<u8>)>,
}

impl FileMetadata {
    /// Assemble metadata from raw parts (mainly for tests).
    ///
    /// `stripe_statistics` must be parallel to `stripes`; an entry of
    /// `None` marks a stripe without recorded statistics.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        number_of_rows: u64,
        row_index_stride: Option<u32>,
        compression: Option<Compression>,
        software_version: Option<String>,
        types: TypeTable,
        file_statistics: Option<StatisticsTable>,
        stripes: Vec<StripeMetadata>,
        stripe_statistics: Vec<Option<StripeStatistics>>,
        user_metadata: Vec<(String, Vec<u8>)>,
    ) -> Self {
        Self {
            number_of_rows,
            row_index_stride,
            compression,
            software_version,
            types,
            file_statistics,
            stripes,
            stripe_statistics,
            user_metadata,
        }
    }

    fn from_proto(
        footer: &proto::Footer,
        metadata: Option<&proto::Metadata>,
        compression: Option<Compression>,
    ) -> Self {
        let stripes: Vec<StripeMetadata> =
            footer.stripes.iter().map(StripeMetadata::from).collect();
        let recorded = metadata.map(|m| m.stripe_stats.as_slice()).unwrap_or(&[]);
        // Parallel to the stripe list; a missing metadata section or a
        // shorter-than-stripes list marks the remaining stripes absent.
        let stripe_statistics = (0..stripes.len())
            .map(|index| recorded.get(index).map(StripeStatistics::from))
            .collect();
        let file_statistics = if footer.statistics.is_empty() {
            None
        } else {
            Some(StatisticsTable::from_proto(&footer.statistics))
        };
        let user_metadata = footer
            .metadata
            .iter()
            .map(|item| (item.name().to_string(), item.value().to_vec()))
            .collect();

        Self {
            number_of_rows: footer.number_of_rows(),
            row_index_stride: footer.row_index_stride,
            compression,
            software_version: footer.software_version.clone(),
            types: TypeTable::from_proto(&footer.types),
            file_statistics,
            stripes,
            stripe_statistics,
            user_metadata,
        }
    }

    pub fn number_of_rows(&self) -> u64 {
        self.number_of_rows
    }

    /// Configured rows per row group, when the writer recorded indexes.
    pub fn row_index_stride(&self) -> Option<u32> {
        self.row_index_stride
    }

    pub fn compression(&self) -> Option<Compression> {
        self.compression
    }

    pub fn software_version(&self) -> Option<&str> {
        self.software_version.as_deref()
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// File-scope column statistics; absent when the footer records none.
    pub fn file_statistics(&self) -> Option<&StatisticsTable> {
        self.file_statistics.as_ref()
    }

    pub fn stripes(&self) -> &[StripeMetadata] {
        &self.stripes
    }

    /// Statistics for the stripe at `index`, when recorded.
    pub fn stripe_statistics(&self, index: usize) -> Option<&StripeStatistics> {
        self.stripe_statistics.get(index)?.as_ref()
    }

    /// User-supplied key/value entries, in file-declared order.
    pub fn user_metadata(&self) -> &[(String, Vec<u8>)] {
        &self.user_metadata
    }
}

/// Read and decode the file tail of an ORC source.
///
/// Every failure here is a [`SourceUnreadable`](crate::InspectError) -- an
/// unreadable or truncated source, a bad magic, or an undecodable section.
pub fn read_metadata<R: Read + Seek>(reader: &mut R) -> Result<FileMetadata> {
    let file_len = reader
        .seek(SeekFrom::End(0))
        .map_err(|e| unreadable(format!("failed to determine source length: {e}")))?;
    ensure!(
        file_len > MAGIC.len() as u64 + 1,
        SourceUnreadableSnafu {
            message: format!("{file_len} bytes is too short for an ORC file"),
        }
    );

    let mut tail = read_tail(reader, file_len, DEFAULT_TAIL_SIZE.min(file_len))?;

    let postscript_len = tail[tail.len() - 1] as usize;
    ensure!(
        postscript_len > 0 && postscript_len + 1 < tail.len(),
        SourceUnreadableSnafu {
            message: format!("postscript length {postscript_len} does not fit the file"),
        }
    );
    let postscript_start = tail.len() - 1 - postscript_len;
    let postscript = proto::PostScript::decode(&tail[postscript_start..tail.len() - 1])
        .map_err(|e| unreadable(format!("failed to decode postscript: {e}")))?;
    ensure!(
        postscript.magic() == MAGIC,
        SourceUnreadableSnafu {
            message: format!("bad magic {:?}; not an ORC file", postscript.magic()),
        }
    );

    let compression = Compression::from_proto(
        postscript.compression(),
        postscript.compression_block_size,
    )?;
    // Validate the declared section sizes in u64 space; a corrupt file can
    // claim lengths that would overflow the offset arithmetic below.
    let tail_needed = (postscript_len as u64 + 1)
        .checked_add(postscript.footer_length())
        .and_then(|n| n.checked_add(postscript.metadata_length()))
        .filter(|&n| n <= file_len)
        .ok_or_else(|| {
            unreadable(format!(
                "declared tail sections exceed the {file_len} byte file"
            ))
        })?;
    if tail_needed > tail.len() as u64 {
        tail = read_tail(reader, file_len, tail_needed)?;
    }
    let footer_len = postscript.footer_length() as usize;
    let metadata_len = postscript.metadata_length() as usize;

    let footer_end = tail.len() - 1 - postscript_len;
    let footer_start = footer_end - footer_len;
    let metadata_start = footer_start - metadata_len;

    let footer_bytes = decompress_section(tail.slice(footer_start..footer_end), compression)?;
    let footer = proto::Footer::decode(footer_bytes.as_slice())
        .map_err(|e| unreadable(format!("failed to decode footer: {e}")))?;

    let metadata = if metadata_len > 0 {
        let metadata_bytes =
            decompress_section(tail.slice(metadata_start..footer_start), compression)?;
        Some(
            proto::Metadata::decode(metadata_bytes.as_slice())
                .map_err(|e| unreadable(format!("failed to decode metadata section: {e}")))?,
        )
    } else {
        None
    };

    Ok(FileMetadata::from_proto(
        &footer,
        metadata.as_ref(),
        compression,
    ))
}

fn unreadable(message: String) -> crate::InspectError {
    SourceUnreadableSnafu { message }.build()
}

fn read_tail<R: Read + Seek>(reader: &mut R, file_len: u64, size: u64) -> Result<Bytes> {
    reader
        .seek(SeekFrom::Start(file_len - size))
        .map_err(|e| unreadable(format!("failed to seek to the file tail: {e}")))?;
    let mut buf = vec![0u8; size as usize];
    reader
        .read_exact(&mut buf)
        .map_err(|e| unreadable(format!("failed to read the file tail: {e}")))?;
    Ok(Bytes::from(buf))
}

fn decompress_section(section: Bytes, compression: Option<Compression>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    Decompressor::new(section.reader(), compression, Vec::new())
        .read_to_end(&mut out)
        .map_err(|e| unreadable(format!("failed to decompress a tail section: {e}")))?;
    Ok(out)
}
