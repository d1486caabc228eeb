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

//! ORC compression-block decoding for the file tail.
//!
//! The footer and metadata sections are compressed with the file's general
//! codec. Compressed data is framed in blocks with a 3 byte header holding
//! the block length and an is-original flag; original blocks carry the raw
//! bytes unchanged.

use std::fmt;
use std::io::{self, Read};

use crate::error::{Result, SourceUnreadableSnafu};
use crate::proto;

/// Compression codec declared in the file postscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionKind {
    Zlib,
    Snappy,
    Lzo,
    Lz4,
    Zstd,
}

impl fmt::Display for CompressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompressionKind::Zlib => "ZLIB",
            CompressionKind::Snappy => "SNAPPY",
            CompressionKind::Lzo => "LZO",
            CompressionKind::Lz4 => "LZ4",
            CompressionKind::Zstd => "ZSTD",
        };
        f.write_str(name)
    }
}

/// Compression codec plus the declared maximum block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compression {
    kind: CompressionKind,
    block_size: u64,
}

impl Compression {
    pub fn kind(&self) -> CompressionKind {
        self.kind
    }

    /// Maximum number of bytes a single block decompresses to.
    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    pub(crate) fn from_proto(
        kind: proto::CompressionKind,
        block_size: Option<u64>,
    ) -> Result<Option<Self>> {
        let kind = match kind {
            proto::CompressionKind::None => return Ok(None),
            proto::CompressionKind::Zlib => CompressionKind::Zlib,
            proto::CompressionKind::Snappy => CompressionKind::Snappy,
            proto::CompressionKind::Lzo => CompressionKind::Lzo,
            proto::CompressionKind::Lz4 => CompressionKind::Lz4,
            proto::CompressionKind::Zstd => CompressionKind::Zstd,
        };
        match block_size {
            Some(block_size) => Ok(Some(Self { kind, block_size })),
            None => SourceUnreadableSnafu {
                message: format!("compression {kind} declared without a block size"),
            }
            .fail(),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

/// Length and is-original flag decoded from a 3 byte block header.
#[derive(Debug, PartialEq, Eq)]
enum BlockHeader {
    Original(u32),
    Compressed(u32),
}

fn decode_block_header(bytes: [u8; 3]) -> BlockHeader {
    let length = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]);
    if length & 1 == 1 {
        BlockHeader::Original(length >> 1)
    } else {
        BlockHeader::Compressed(length >> 1)
    }
}

/// Decompresses a reader of ORC compression blocks.
///
/// With no compression configured, reads pass through unchanged; ORC does
/// not frame uncompressed files into blocks.
pub struct Decompressor<R: Read> {
    reader: R,
    compression: Option<Compression>,
    block: Vec<u8>,
    block_offset: usize,
}

impl<R: Read> Decompressor<R> {
    pub fn new(reader: R, compression: Option<Compression>, scratch: Vec<u8>) -> Self {
        let mut block = scratch;
        block.clear();
        Self {
            reader,
            compression,
            block,
            block_offset: 0,
        }
    }

    fn decompress_block(&mut self, compression: Compression, compressed: &[u8]) -> io::Result<()> {
        self.block.clear();
        match compression.kind() {
            CompressionKind::Zlib => {
                let mut decoder = flate2::read::DeflateDecoder::new(compressed);
                decoder.read_to_end(&mut self.block)?;
            }
            CompressionKind::Snappy => {
                let len = snap::raw::decompress_len(compressed)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                self.block.resize(len, 0);
                snap::raw::Decoder::new()
                    .decompress(compressed, &mut self.block)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            }
            CompressionKind::Lzo => {
                let decompressed = lzokay_native::decompress_all(compressed, None).map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("lzo decompression failed: {e:?}"),
                    )
                })?;
                self.block.extend(decompressed);
            }
            CompressionKind::Lz4 => {
                let decompressed =
                    lz4_flex::block::decompress(compressed, compression.block_size() as usize)
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                self.block.extend(decompressed);
            }
            CompressionKind::Zstd => {
                zstd::stream::copy_decode(compressed, &mut self.block)?;
            }
        }
        Ok(())
    }

    fn refill(&mut self, compression: Compression) -> io::Result<bool> {
        let mut header = [0u8; 3];
        let n = self.reader.read(&mut header[..1])?;
        if n == 0 {
            return Ok(false);
        }
        self.reader.read_exact(&mut header[1..])?;

        match decode_block_header(header) {
            BlockHeader::Original(len) => {
                self.block.resize(len as usize, 0);
                self.reader.read_exact(&mut self.block)?;
            }
            BlockHeader::Compressed(len) => {
                let mut compressed = vec![0u8; len as usize];
                self.reader.read_exact(&mut compressed)?;
                self.decompress_block(compression, &compressed)?;
            }
        }
        self.block_offset = 0;
        Ok(true)
    }
}

impl<R: Read> Read for Decompressor<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(compression) = self.compression else {
            return self.reader.read(buf);
        };
        if buf.is_empty() {
            return Ok(0);
        }

        if self.block_offset >= self.block.len() && !self.refill(compression)? {
            return Ok(0);
        }

        let available = &self.block[self.block_offset..];
        let n = buf.len().min(available.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.block_offset += n;
        Ok(n)
    }
}
