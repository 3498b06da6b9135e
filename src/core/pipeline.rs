//! End-to-end conversion of export text into chunks
//!
//! ```text
//! source text ──▶ extract_transactions ─┐
//!                                       ├─▶ filter_transactions ──▶ chunk_groups ──▶ Conversion
//! aggregator texts ──▶ build_exclusions ┘
//! ```
//!
//! Every stage is a pure function of its inputs, so `convert` can run
//! concurrently on unrelated inputs and is safe to re-run when they change.

use crate::core::chunker::{chunk_groups, ChunkConfig};
use crate::core::exclusion::build_exclusions;
use crate::core::extractor::extract_transactions;
use crate::core::filter::filter_transactions;
use crate::types::{AggregatorStats, ChunkedGroups, ConvertError, Stats};
use tracing::info;

/// Result of one conversion run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversion {
    /// Source header labels, the column order of every chunk
    pub headers: Vec<String>,

    /// Count and date range over the source rows
    pub source_stats: Stats,

    /// Count and date range over the aggregator rows, plus duplicates found
    pub aggregator_stats: AggregatorStats,

    /// Number of distinct dedup keys taken from the aggregator
    pub exclusion_keys: usize,

    /// Chunks per payment method; empty when nothing is left to convert
    pub chunks: ChunkedGroups,
}

impl Conversion {
    /// Whether no transaction survived extraction and deduplication
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Convert a PayPay export into importable chunks, skipping what the
/// aggregator exports already contain
///
/// # Errors
///
/// Only CSV serialization of a chunk can fail; malformed rows never do.
pub fn convert<S: AsRef<str>>(
    source_text: &str,
    aggregator_texts: &[S],
    config: &ChunkConfig,
) -> Result<Conversion, ConvertError> {
    let extraction = extract_transactions(source_text);
    let exclusions = build_exclusions(aggregator_texts);
    let outcome = filter_transactions(&extraction.transactions, &exclusions.keys);
    let chunks = chunk_groups(&outcome.groups, &extraction.headers, config)?;

    info!(
        "Converted {} source rows into {} chunks ({} duplicates skipped)",
        extraction.stats.count,
        chunks.values().map(Vec::len).sum::<usize>(),
        outcome.duplicates
    );

    Ok(Conversion {
        headers: extraction.headers,
        source_stats: extraction.stats,
        aggregator_stats: AggregatorStats {
            stats: exclusions.stats,
            duplicates: outcome.duplicates,
        },
        exclusion_keys: exclusions.keys.len(),
        chunks,
    })
}
