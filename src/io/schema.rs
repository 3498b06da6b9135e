//! Column labels of both exports and typed views over their rows
//!
//! Rows stay generic (`Row`) so passthrough columns survive untouched. The
//! views below borrow the columns the pipeline actually reads and make each
//! one an `Option`, since any export may lack a column or leave it blank.

use crate::types::Row;

/// PayPay transaction history export
pub mod source {
    /// Transaction timestamp, `YYYY/MM/DD HH:MM:SS`
    pub const DATE: &str = "取引日";
    /// Amount paid out, or `-`
    pub const OUTGOING: &str = "出金金額（円）";
    /// Amount received, or `-`
    pub const INCOMING: &str = "入金金額（円）";
    pub const COUNTERPARTY: &str = "取引先";
    /// One method name, or `name (amount円), name (amount円)` for combined payments
    pub const METHOD: &str = "取引方法";
    pub const TRANSACTION_ID: &str = "取引番号";

    /// Value used in the amount column that does not apply to the row
    pub const PLACEHOLDER: &str = "-";
}

/// Money Forward ME transaction history export
pub mod aggregator {
    /// Inclusion flag, `1` counted or `0` not counted
    pub const INCLUDED: &str = "計算対象";
    /// Transaction date, `YYYY/MM/DD`
    pub const DATE: &str = "日付";
    pub const CONTENT: &str = "内容";
    /// Signed amount
    pub const AMOUNT: &str = "金額（円）";
    pub const INSTITUTION: &str = "保有金融機関";

    /// `INCLUDED` value marking a row the aggregator leaves out of its totals
    pub const NOT_COUNTED: &str = "0";
}

/// The columns of a PayPay row the extractor needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRecord<'a> {
    pub date: Option<&'a str>,
    pub outgoing: Option<&'a str>,
    pub incoming: Option<&'a str>,
    pub counterparty: Option<&'a str>,
    pub method: Option<&'a str>,
    pub transaction_id: Option<&'a str>,
}

impl<'a> SourceRecord<'a> {
    pub fn from_row(row: &'a Row) -> Self {
        SourceRecord {
            date: row.get(source::DATE),
            outgoing: row.get(source::OUTGOING),
            incoming: row.get(source::INCOMING),
            counterparty: row.get(source::COUNTERPARTY),
            method: row.get(source::METHOD),
            transaction_id: row.get(source::TRANSACTION_ID),
        }
    }

    /// The date segment of the timestamp (`2024/05/01` of `2024/05/01 12:00:00`)
    pub fn date_only(&self) -> &'a str {
        self.date
            .map(str::trim)
            .and_then(|date| date.split_whitespace().next())
            .unwrap_or("")
    }
}

/// The columns of a Money Forward row the exclusion builder needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorRecord<'a> {
    pub included: Option<&'a str>,
    pub date: Option<&'a str>,
    pub content: Option<&'a str>,
    pub amount: Option<&'a str>,
    pub institution: Option<&'a str>,
}

impl<'a> AggregatorRecord<'a> {
    pub fn from_row(row: &'a Row) -> Self {
        AggregatorRecord {
            included: row.get(aggregator::INCLUDED),
            date: row.get(aggregator::DATE),
            content: row.get(aggregator::CONTENT),
            amount: row.get(aggregator::AMOUNT),
            institution: row.get(aggregator::INSTITUTION),
        }
    }

    /// Whether the aggregator flags this row as left out of its totals
    pub fn is_not_counted(&self) -> bool {
        self.included.map(str::trim) == Some(aggregator::NOT_COUNTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_source_record_reads_known_columns() {
        let row: Row = [
            (source::DATE, "2024/05/01 12:34:56"),
            (source::OUTGOING, "190"),
            (source::INCOMING, "-"),
            (source::COUNTERPARTY, "セブン-イレブン"),
            (source::METHOD, "PayPay残高"),
            ("取引内容", "支払い"),
        ]
        .into_iter()
        .collect();

        let record = SourceRecord::from_row(&row);
        assert_eq!(record.outgoing, Some("190"));
        assert_eq!(record.incoming, Some("-"));
        assert_eq!(record.method, Some("PayPay残高"));
        assert_eq!(record.transaction_id, None);
        assert_eq!(record.date_only(), "2024/05/01");
    }

    #[rstest]
    #[case::with_time(Some("2024/05/01 12:34:56"), "2024/05/01")]
    #[case::date_only(Some("2024/05/01"), "2024/05/01")]
    #[case::padded(Some(" 2024/05/01 00:00:00 "), "2024/05/01")]
    #[case::blank(Some(""), "")]
    #[case::missing(None, "")]
    fn test_date_only(#[case] date: Option<&str>, #[case] expected: &str) {
        let row = match date {
            Some(value) => [(source::DATE, value)].into_iter().collect(),
            None => Row::default(),
        };
        assert_eq!(SourceRecord::from_row(&row).date_only(), expected);
    }

    #[rstest]
    #[case::not_counted(Some("0"), true)]
    #[case::counted(Some("1"), false)]
    #[case::blank(Some(""), false)]
    #[case::missing(None, false)]
    fn test_is_not_counted(#[case] flag: Option<&str>, #[case] expected: bool) {
        let row = match flag {
            Some(value) => [(aggregator::INCLUDED, value)].into_iter().collect(),
            None => Row::default(),
        };
        assert_eq!(AggregatorRecord::from_row(&row).is_not_counted(), expected);
    }
}
