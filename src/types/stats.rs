//! Row count and date range accumulators

use super::row::Timestamp;

/// Row count plus the earliest and latest timestamp seen
///
/// Accumulated by value with `core::dates::observe_row`, which returns a new
/// `Stats` per row so stages can fold without shared mutable state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of rows observed, whether or not they were later used
    pub count: usize,

    /// Earliest parseable timestamp, `None` until one is seen
    pub start_date: Option<Timestamp>,

    /// Latest parseable timestamp, `None` until one is seen
    pub end_date: Option<Timestamp>,
}

/// Stats for the aggregator side, with the duplicates found against it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregatorStats {
    pub stats: Stats,

    /// Source transactions dropped because the aggregator already had them
    pub duplicates: usize,
}
