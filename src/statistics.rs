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

//! Column statistics decoded from the footer and metadata sections.

use crate::proto;
use crate::schema::ColumnId;

/// Statistics for one column within one scope (the whole file or a single
/// stripe).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStatistics {
    number_of_values: u64,
    has_null: bool,
    type_statistics: Option<TypeStatistics>,
}

impl ColumnStatistics {
    pub fn new(
        number_of_values: u64,
        has_null: bool,
        type_statistics: Option<TypeStatistics>,
    ) -> Self {
        Self {
            number_of_values,
            has_null,
            type_statistics,
        }
    }

    /// Number of non-null values observed in the scope.
    pub fn number_of_values(&self) -> u64 {
        self.number_of_values
    }

    pub fn has_null(&self) -> bool {
        self.has_null
    }

    pub fn type_statistics(&self) -> Option<&TypeStatistics> {
        self.type_statistics.as_ref()
    }
}

impl From<&proto::ColumnStatistics> for ColumnStatistics {
    fn from(value: &proto::ColumnStatistics) -> Self {
        Self {
            number_of_values: value.number_of_values(),
            has_null: value.has_null(),
            type_statistics: TypeStatistics::from_proto(value),
        }
    }
}

/// Kind-specific summaries recorded alongside the value count.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeStatistics {
    Integer {
        min: i64,
        max: i64,
        sum: Option<i64>,
    },
    Double {
        min: f64,
        max: f64,
        sum: Option<f64>,
    },
    String {
        min: String,
        max: String,
        /// Total length of all strings in the scope.
        sum: i64,
    },
    /// Boolean columns: count of true values.
    Bucket { true_count: u64 },
    Decimal {
        min: String,
        max: String,
        sum: Option<String>,
    },
    /// Days since epoch.
    Date { min: i32, max: i32 },
    /// Total binary blob length in the scope.
    Binary { sum: i64 },
    /// Milliseconds since epoch; UTC values preferred when recorded.
    Timestamp { min: i64, max: i64 },
    Collection {
        min_children: u64,
        max_children: u64,
        total_children: u64,
    },
}

impl TypeStatistics {
    fn from_proto(value: &proto::ColumnStatistics) -> Option<Self> {
        if let Some(int) = &value.int_statistics {
            return Some(TypeStatistics::Integer {
                min: int.minimum?,
                max: int.maximum?,
                sum: int.sum,
            });
        }
        if let Some(double) = &value.double_statistics {
            return Some(TypeStatistics::Double {
                min: double.minimum?,
                max: double.maximum?,
                sum: double.sum,
            });
        }
        if let Some(string) = &value.string_statistics {
            // Writers record bounds instead of exact extremes for very long
            // values.
            let min = string.minimum.clone().or_else(|| string.lower_bound.clone())?;
            let max = string.maximum.clone().or_else(|| string.upper_bound.clone())?;
            return Some(TypeStatistics::String {
                min,
                max,
                sum: string.sum(),
            });
        }
        if let Some(bucket) = &value.bucket_statistics {
            return Some(TypeStatistics::Bucket {
                true_count: bucket.count.first().copied().unwrap_or(0),
            });
        }
        if let Some(decimal) = &value.decimal_statistics {
            return Some(TypeStatistics::Decimal {
                min: decimal.minimum.clone()?,
                max: decimal.maximum.clone()?,
                sum: decimal.sum.clone(),
            });
        }
        if let Some(date) = &value.date_statistics {
            return Some(TypeStatistics::Date {
                min: date.minimum?,
                max: date.maximum?,
            });
        }
        if let Some(binary) = &value.binary_statistics {
            return Some(TypeStatistics::Binary { sum: binary.sum() });
        }
        if let Some(timestamp) = &value.timestamp_statistics {
            return Some(TypeStatistics::Timestamp {
                min: timestamp.minimum_utc.or(timestamp.minimum)?,
                max: timestamp.maximum_utc.or(timestamp.maximum)?,
            });
        }
        if let Some(collection) = &value.collection_statistics {
            return Some(TypeStatistics::Collection {
                min_children: collection.min_children(),
                max_children: collection.max_children(),
                total_children: collection.total_children(),
            });
        }
        None
    }
}

/// Per-scope collection of column statistics, addressed by column id.
///
/// Tables are sparse: looking up an id past the recorded range yields
/// `None` rather than an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsTable {
    columns: Vec<ColumnStatistics>,
}

impl StatisticsTable {
    pub fn new(columns: Vec<ColumnStatistics>) -> Self {
        Self { columns }
    }

    pub(crate) fn from_proto(columns: &[proto::ColumnStatistics]) -> Self {
        Self {
            columns: columns.iter().map(ColumnStatistics::from).collect(),
        }
    }

    pub fn get(&self, column_id: ColumnId) -> Option<&ColumnStatistics> {
        self.columns.get(column_id as usize)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
