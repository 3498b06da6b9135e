//! Deduplication and grouping by payment method

use crate::types::{ExclusionKeySet, GroupedRows, Transaction};
use tracing::{debug, info};

/// Output of the filter stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Surviving rows per payment method; methods with no survivors are absent
    pub groups: GroupedRows,

    /// Transactions dropped because their key was already recorded
    pub duplicates: usize,
}

/// Drop excluded transactions and group the rest by payment method
///
/// Each transaction is tested on its own key, so one sibling of a combined
/// payment can be dropped while the other survives. Row order within each
/// group follows `transactions`.
pub fn filter_transactions(
    transactions: &[Transaction],
    exclusions: &ExclusionKeySet,
) -> FilterOutcome {
    let outcome = transactions
        .iter()
        .fold(FilterOutcome::default(), |mut outcome, transaction| {
            if exclusions.contains(&transaction.key) {
                debug!("Duplicate dropped: {}", transaction.key);
                outcome.duplicates += 1;
            } else {
                outcome
                    .groups
                    .entry(transaction.payment_method.clone())
                    .or_default()
                    .push(transaction.row.clone());
            }
            outcome
        });

    info!(
        "{} transactions kept in {} groups, {} duplicates dropped",
        outcome.groups.values().map(Vec::len).sum::<usize>(),
        outcome.groups.len(),
        outcome.duplicates
    );

    outcome
}
