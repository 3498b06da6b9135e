//! Exclusion key set built from Money Forward exports
//!
//! Every aggregator row counts toward the stats. Only rows the aggregator
//! itself counts (inclusion flag other than `0`) contribute a dedup key.

use crate::core::dates::{observe_row, parse_date};
use crate::core::extractor::{normalize_amount, transaction_key};
use crate::io::csv_format::parse_rows;
use crate::io::schema::AggregatorRecord;
use crate::types::{ExclusionKeySet, Stats};
use tracing::{debug, info};

/// Output of the exclusion stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exclusions {
    pub keys: ExclusionKeySet,

    /// Count and date range over every aggregator row, excluded or not
    pub stats: Stats,
}

/// Dedup key for one aggregator row: `date_signedAmount_institution_content`
///
/// The amount is already signed by the aggregator; it is normalized the same
/// way as source amounts so `-1,234` and `-1234` produce the same key. A value
/// that does not parse as a number is used as written.
pub fn aggregator_key(record: &AggregatorRecord<'_>) -> String {
    let raw_amount = record.amount.unwrap_or("").trim();
    let amount = normalize_amount(raw_amount)
        .map(|amount| amount.to_string())
        .unwrap_or_else(|| raw_amount.to_string());

    transaction_key(
        record.date.unwrap_or("").trim(),
        &amount,
        record.institution.unwrap_or(""),
        record.content.unwrap_or(""),
    )
}

/// Build the exclusion key set and stats from zero or more aggregator exports
///
/// Never fails; no texts, empty texts and header-only texts all contribute
/// nothing.
pub fn build_exclusions<S: AsRef<str>>(texts: &[S]) -> Exclusions {
    let (keys, stats) = texts
        .iter()
        .flat_map(|text| parse_rows(text.as_ref()).rows)
        .fold(
            (Vec::new(), Stats::default()),
            |(mut keys, stats), row| {
                let record = AggregatorRecord::from_row(&row);
                if record.is_not_counted() {
                    debug!(
                        "Aggregator row '{}' not counted; no exclusion key",
                        record.content.unwrap_or("")
                    );
                } else {
                    keys.push(aggregator_key(&record));
                }
                (keys, observe_row(stats, parse_date(record.date)))
            },
        );

    let keys: ExclusionKeySet = keys.into_iter().collect();
    info!(
        "Built {} exclusion keys from {} aggregator rows",
        keys.len(),
        stats.count
    );

    Exclusions { keys, stats }
}
