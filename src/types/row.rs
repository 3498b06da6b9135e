//! Row and timestamp types
//!
//! A `Row` is one CSV data line keyed by its header labels. Columns that the
//! line does not carry are simply absent, so every lookup yields an
//! `Option<&str>`.

use chrono::{DateTime, FixedOffset};
use csv::StringRecord;
use std::collections::HashMap;

/// Point in time carried with its UTC+9 offset
///
/// Comparisons are on the underlying instant, so ordering is unaffected by
/// the offset it is displayed in.
pub type Timestamp = DateTime<FixedOffset>;

/// One CSV data row, column label to raw value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Build a row by pairing `headers` with the values of `record`
    ///
    /// Short records (flexible CSV) leave the trailing columns absent.
    /// Surplus values with no header are dropped. When a label repeats, the
    /// last column carrying it wins.
    pub fn from_record(headers: &[String], record: &StringRecord) -> Self {
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();

        Row { fields }
    }

    /// Value of `column`, or `None` when the row has no such column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Copy of this row with `column` set to `value`
    pub fn with_field(&self, column: &str, value: impl Into<String>) -> Self {
        let mut row = self.clone();
        row.fields.insert(column.to_string(), value.into());
        row
    }

    /// Number of columns present in the row
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row carries no columns at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
