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

//! Stripe descriptors and per-stripe statistics.

use prost::Message;

use crate::proto;
use crate::statistics::StatisticsTable;

/// Physical placement of one stripe, as declared in the footer.
///
/// The declared order of stripes is significant: it is the stripe index
/// used throughout the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripeMetadata {
    offset: u64,
    index_length: u64,
    data_length: u64,
    footer_length: u64,
    number_of_rows: u64,
}

impl StripeMetadata {
    pub fn new(
        offset: u64,
        index_length: u64,
        data_length: u64,
        footer_length: u64,
        number_of_rows: u64,
    ) -> Self {
        Self {
            offset,
            index_length,
            data_length,
            footer_length,
            number_of_rows,
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn index_length(&self) -> u64 {
        self.index_length
    }

    pub fn data_length(&self) -> u64 {
        self.data_length
    }

    pub fn footer_length(&self) -> u64 {
        self.footer_length
    }

    pub fn number_of_rows(&self) -> u64 {
        self.number_of_rows
    }
}

impl From<&proto::StripeInformation> for StripeMetadata {
    fn from(value: &proto::StripeInformation) -> Self {
        Self {
            offset: value.offset(),
            index_length: value.index_length(),
            data_length: value.data_length(),
            footer_length: value.footer_length(),
            number_of_rows: value.number_of_rows(),
        }
    }
}

/// Statistics recorded for one stripe in the metadata section.
#[derive(Debug, Clone, PartialEq)]
pub struct StripeStatistics {
    retained_size: u64,
    columns: StatisticsTable,
}

impl StripeStatistics {
    pub fn new(retained_size: u64, columns: StatisticsTable) -> Self {
        Self {
            retained_size,
            columns,
        }
    }

    /// Bytes this stripe's statistics occupy in serialized form.
    pub fn retained_size(&self) -> u64 {
        self.retained_size
    }

    pub fn columns(&self) -> &StatisticsTable {
        &self.columns
    }
}

impl From<&proto::StripeStatistics> for StripeStatistics {
    fn from(value: &proto::StripeStatistics) -> Self {
        Self {
            retained_size: value.encoded_len() as u64,
            columns: StatisticsTable::from_proto(&value.col_stats),
        }
    }
}
