//! Transaction extraction from the PayPay export
//!
//! Each source row yields zero or more transactions:
//! - none when it has no payment method or no usable amount
//! - one per `name (amount円)` entry when the method column lists a combined
//!   payment, each with the method and amount columns rewritten to that entry
//! - otherwise exactly one, with the row passed through unchanged
//!
//! Stats are kept over the source rows themselves, not over the
//! transactions they split into.

use crate::core::dates::{observe_row, parse_date};
use crate::io::csv_format::{parse_rows, ParsedCsv};
use crate::io::schema::{source, SourceRecord};
use crate::types::{Direction, Row, Stats, Transaction};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, info};

/// One `name (amount円)` entry; the amount keeps its thousands separators
static COMBINED_METHOD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^,]+?)\s*\(([0-9,]+)円\)").expect("method pattern is a valid regex")
});

/// Output of the extraction stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Transactions in source order, split siblings in listing order
    pub transactions: Vec<Transaction>,

    /// Count and date range over the source rows
    pub stats: Stats,

    /// Header labels of the export, empty for empty input
    pub headers: Vec<String>,
}

/// One entry of a combined-payment method column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEntry<'a> {
    pub name: &'a str,

    /// Amount as written, thousands separators included
    pub raw_amount: &'a str,
}

/// Split a combined-payment method column into its entries
///
/// Returns an empty list when the column holds no `name (amount円)` entry,
/// meaning the whole column is a single method name.
pub fn split_payment_methods(field: &str) -> Vec<MethodEntry<'_>> {
    COMBINED_METHOD_PATTERN
        .captures_iter(field)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().trim();
            let raw_amount = caps.get(2)?.as_str();
            Some(MethodEntry { name, raw_amount })
        })
        .collect()
}

/// Strip thousands separators and parse an amount
///
/// The result is normalized (trailing fractional zeros dropped), so `"2,599"`,
/// `"2599.00"` and `"02599"` all become `2599`. `None` when nothing numeric
/// remains.
pub fn normalize_amount(raw: &str) -> Option<Decimal> {
    let stripped: String = raw.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&stripped).ok().map(|amount| amount.normalize())
}

/// Infer the direction from whichever amount column holds a real value
///
/// The outgoing column wins when both are filled in. Returns the raw value
/// of the chosen column alongside the direction.
pub fn detect_direction<'a>(record: &SourceRecord<'a>) -> Option<(Direction, &'a str)> {
    let holds_value =
        |value: &&str| !value.trim().is_empty() && value.trim() != source::PLACEHOLDER;

    record
        .outgoing
        .filter(holds_value)
        .map(|amount| (Direction::Expense, amount))
        .or_else(|| {
            record
                .incoming
                .filter(holds_value)
                .map(|amount| (Direction::Income, amount))
        })
}

/// Dedup key shared with the aggregator side: `date_signedAmount_method_counterparty`
pub fn transaction_key(date: &str, signed_amount: &str, method: &str, counterparty: &str) -> String {
    format!("{}_{}_{}_{}", date, signed_amount, method, counterparty)
}

/// Parse the PayPay export and extract its transactions
///
/// Never fails: rows without a method or a usable amount are skipped and
/// logged at debug level, empty input yields an empty `Extraction`.
pub fn extract_transactions(text: &str) -> Extraction {
    let ParsedCsv { headers, rows } = parse_rows(text);

    let (transactions, stats) = rows.iter().fold(
        (Vec::with_capacity(rows.len()), Stats::default()),
        |(mut transactions, stats), row| {
            let record = SourceRecord::from_row(row);
            transactions.extend(transactions_for_row(row, &record));
            (transactions, observe_row(stats, parse_date(record.date)))
        },
    );

    info!(
        "Extracted {} transactions from {} source rows",
        transactions.len(),
        stats.count
    );

    Extraction {
        transactions,
        stats,
        headers,
    }
}

fn transactions_for_row(row: &Row, record: &SourceRecord<'_>) -> Vec<Transaction> {
    let row_id = record.transaction_id.unwrap_or("?");

    let Some(method_field) = record.method.filter(|m| !m.trim().is_empty()) else {
        debug!("Row {} skipped: no payment method", row_id);
        return Vec::new();
    };

    let Some((direction, raw_amount)) = detect_direction(record) else {
        debug!("Row {} skipped: no amount", row_id);
        return Vec::new();
    };

    let entries = split_payment_methods(method_field);
    if entries.is_empty() {
        return match normalize_amount(raw_amount) {
            Some(amount) => vec![build_transaction(
                row.clone(),
                record,
                method_field,
                amount,
                direction,
            )],
            None => {
                debug!("Row {} skipped: unusable amount '{}'", row_id, raw_amount);
                Vec::new()
            }
        };
    }

    let amount_column = match direction {
        Direction::Expense => source::OUTGOING,
        Direction::Income => source::INCOMING,
    };

    entries
        .into_iter()
        .filter_map(|entry| {
            let Some(amount) = normalize_amount(entry.raw_amount) else {
                debug!(
                    "Row {} entry '{}' skipped: unusable amount '{}'",
                    row_id, entry.name, entry.raw_amount
                );
                return None;
            };

            let split_row = row
                .with_field(source::METHOD, entry.name)
                .with_field(amount_column, amount.to_string());
            Some(build_transaction(
                split_row, record, entry.name, amount, direction,
            ))
        })
        .collect()
}

fn build_transaction(
    row: Row,
    record: &SourceRecord<'_>,
    method: &str,
    amount: Decimal,
    direction: Direction,
) -> Transaction {
    let key = transaction_key(
        record.date_only(),
        &direction.sign(amount).to_string(),
        method,
        record.counterparty.unwrap_or(""),
    );

    Transaction {
        key,
        row,
        payment_method: method.to_string(),
        direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const HEADER: &str = "取引日,出金金額（円）,入金金額（円）,取引内容,取引先,取引方法,取引番号";

    fn source_csv(lines: &[&str]) -> String {
        let mut text = format!("{}\n", HEADER);
        for line in lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_single_method_row() {
        let text = source_csv(&["2024/05/01 12:00:00,190,-,支払い,セブン-イレブン,PayPay残高,T1"]);

        let extraction = extract_transactions(&text);

        assert_eq!(extraction.transactions.len(), 1);
        let tx = &extraction.transactions[0];
        assert_eq!(tx.payment_method, "PayPay残高");
        assert_eq!(tx.direction, Direction::Expense);
        assert_eq!(tx.key, "2024/05/01_-190_PayPay残高_セブン-イレブン");
        assert_eq!(tx.row.get(source::OUTGOING), Some("190"));
    }

    #[test]
    fn test_combined_payment_splits_into_siblings() {
        let text = source_csv(&[
            "2024/05/02 08:15:00,410,-,支払い,ローソン,\"PayPayポイント (93円), PayPay残高 (317円)\",T2",
        ]);

        let extraction = extract_transactions(&text);
        let txs = &extraction.transactions;

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].payment_method, "PayPayポイント");
        assert_eq!(txs[0].row.get(source::METHOD), Some("PayPayポイント"));
        assert_eq!(txs[0].row.get(source::OUTGOING), Some("93"));
        assert_eq!(txs[0].key, "2024/05/02_-93_PayPayポイント_ローソン");
        assert_eq!(txs[1].payment_method, "PayPay残高");
        assert_eq!(txs[1].row.get(source::OUTGOING), Some("317"));
        assert_eq!(txs[1].key, "2024/05/02_-317_PayPay残高_ローソン");
        // Passthrough columns are copied to every sibling
        assert_eq!(txs[1].row.get(source::TRANSACTION_ID), Some("T2"));
        assert_eq!(extraction.stats.count, 1);
    }

    #[test]
    fn test_combined_amount_thousands_separator_removed() {
        let text = source_csv(&[
            "2024/05/03 19:00:00,\"2,692\",-,支払い,Amazon,\"PayPayポイント (93円), PayPay残高 (2,599円)\",T3",
        ]);

        let txs = extract_transactions(&text).transactions;

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[1].payment_method, "PayPay残高");
        assert_eq!(txs[1].row.get(source::OUTGOING), Some("2599"));
        assert_eq!(txs[1].key, "2024/05/03_-2599_PayPay残高_Amazon");
    }

    #[test]
    fn test_income_row_uses_incoming_column() {
        let text = source_csv(&["2024/05/04 10:00:00,-,\"1,000\",受け取り,山田太郎,PayPay残高,T4"]);

        let txs = extract_transactions(&text).transactions;

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].direction, Direction::Income);
        assert_eq!(txs[0].key, "2024/05/04_1000_PayPay残高_山田太郎");
        // Single-method rows pass through verbatim
        assert_eq!(txs[0].row.get(source::INCOMING), Some("1,000"));
    }

    #[test]
    fn test_combined_income_rewrites_incoming_column() {
        let text = source_csv(&[
            "2024/05/02 08:15:00,-,410,返金,ローソン,\"PayPayポイント (93円), PayPay残高 (317円)\",T11",
        ]);

        let txs = extract_transactions(&text).transactions;

        assert_eq!(txs.len(), 2);
        for (tx, method, amount) in [
            (&txs[0], "PayPayポイント", "93"),
            (&txs[1], "PayPay残高", "317"),
        ] {
            assert_eq!(tx.direction, Direction::Income);
            assert_eq!(tx.row.get(source::INCOMING), Some(amount));
            assert_eq!(tx.row.get(source::OUTGOING), Some("-"));
            assert_eq!(tx.key, format!("2024/05/02_{}_{}_ローソン", amount, method));
        }
    }

    #[rstest]
    #[case::both_filled("100", "200", Direction::Expense, "-100")]
    #[case::outgoing_only("100", "-", Direction::Expense, "-100")]
    #[case::incoming_only("-", "200", Direction::Income, "200")]
    #[case::blank_outgoing("", "200", Direction::Income, "200")]
    fn test_direction_from_amount_columns(
        #[case] outgoing: &str,
        #[case] incoming: &str,
        #[case] direction: Direction,
        #[case] signed: &str,
    ) {
        let line = format!(
            "2024/05/05 10:00:00,{},{},支払い,店,PayPay残高,T12",
            outgoing, incoming
        );

        let txs = extract_transactions(&source_csv(&[&line])).transactions;

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].direction, direction);
        assert_eq!(txs[0].key, format!("2024/05/05_{}_PayPay残高_店", signed));
    }

    #[test]
    fn test_zero_expense_with_scale_is_unsigned() {
        let text = source_csv(&["2024/05/06 10:00:00,0.00,-,支払い,店,PayPay残高,T13"]);

        let txs = extract_transactions(&text).transactions;

        assert_eq!(txs[0].key, "2024/05/06_0_PayPay残高_店");
    }

    #[rstest]
    #[case::no_method("2024/05/01 12:00:00,190,-,支払い,店,,T5")]
    #[case::blank_method("2024/05/01 12:00:00,190,-,支払い,店,  ,T5")]
    #[case::both_placeholders("2024/05/01 12:00:00,-,-,支払い,店,PayPay残高,T5")]
    #[case::both_blank("2024/05/01 12:00:00,,,支払い,店,PayPay残高,T5")]
    #[case::unusable_amount("2024/05/01 12:00:00,abc,-,支払い,店,PayPay残高,T5")]
    fn test_rows_without_required_fields_yield_nothing(#[case] line: &str) {
        let extraction = extract_transactions(&source_csv(&[line]));

        assert!(extraction.transactions.is_empty());
        // The row still counts toward stats
        assert_eq!(extraction.stats.count, 1);
        assert!(extraction.stats.start_date.is_some());
    }

    #[test]
    fn test_missing_columns_yield_nothing() {
        let extraction = extract_transactions("取引日,取引先\n2024/05/01 12:00:00,店\n");

        assert!(extraction.transactions.is_empty());
        assert_eq!(extraction.stats.count, 1);
    }

    #[rstest]
    #[case::single("PayPay残高", 1)]
    #[case::one_entry("PayPay残高 (190円)", 1)]
    #[case::two_entries("PayPayポイント (93円), PayPay残高 (317円)", 2)]
    #[case::three_entries("PayPayポイント (1円), PayPay残高 (2円), PayPayカード (3,000円)", 3)]
    #[case::no_space("PayPayポイント(93円),PayPay残高(317円)", 2)]
    fn test_transaction_count_matches_entries(#[case] method: &str, #[case] expected: usize) {
        let line = format!("2024/05/01 12:00:00,3190,-,支払い,店,\"{}\",T6", method);
        let txs = extract_transactions(&source_csv(&[&line])).transactions;
        assert_eq!(txs.len(), expected);
    }

    #[test]
    fn test_stats_cover_source_rows() {
        let text = source_csv(&[
            "2024/05/03 09:00:00,100,-,支払い,A,PayPay残高,T7",
            "2024/05/01 09:00:00,-,-,支払い,B,PayPay残高,T8",
            "not a date,100,-,支払い,C,PayPay残高,T9",
            "2024/05/02 09:00:00,200,-,支払い,D,\"PayPayポイント (50円), PayPay残高 (150円)\",T10",
        ]);

        let extraction = extract_transactions(&text);

        assert_eq!(extraction.stats.count, 4);
        assert_eq!(extraction.transactions.len(), 4);
        assert_eq!(
            extraction.stats.start_date,
            parse_date(Some("2024/05/01 09:00:00"))
        );
        assert_eq!(
            extraction.stats.end_date,
            parse_date(Some("2024/05/03 09:00:00"))
        );
    }

    #[test]
    fn test_headers_returned_in_source_order() {
        let extraction = extract_transactions(&source_csv(&[]));

        assert_eq!(extraction.headers.len(), 7);
        assert_eq!(extraction.headers[0], source::DATE);
        assert!(extraction.transactions.is_empty());
        assert_eq!(extraction.stats, Stats::default());
    }

    #[test]
    fn test_empty_input() {
        let extraction = extract_transactions("");
        assert_eq!(extraction, Extraction::default());
    }

    #[rstest]
    #[case::plain("190", Some("190"))]
    #[case::separators("2,599", Some("2599"))]
    #[case::padded(" 1,000 ", Some("1000"))]
    #[case::leading_zero("0190", Some("190"))]
    #[case::trailing_zeros("12.50", Some("12.5"))]
    #[case::zero_with_scale("0.00", Some("0"))]
    #[case::placeholder("-", None)]
    #[case::empty("", None)]
    #[case::only_commas(",,", None)]
    fn test_normalize_amount(#[case] raw: &str, #[case] expected: Option<&str>) {
        let normalized = normalize_amount(raw).map(|amount| amount.to_string());
        assert_eq!(normalized.as_deref(), expected);
    }

    #[test]
    fn test_split_payment_methods() {
        let entries = split_payment_methods("PayPayポイント (93円), PayPay残高 (2,599円)");
        assert_eq!(
            entries,
            vec![
                MethodEntry {
                    name: "PayPayポイント",
                    raw_amount: "93"
                },
                MethodEntry {
                    name: "PayPay残高",
                    raw_amount: "2,599"
                },
            ]
        );
        assert!(split_payment_methods("PayPay残高").is_empty());
        assert!(split_payment_methods("クレジット(VISA)").is_empty());
    }
}
