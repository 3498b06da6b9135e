//! Transaction-related types
//!
//! A `Transaction` is one economic event attributable to exactly one payment
//! method. A combined-payment source row yields several of them, one per
//! method it was settled with.

use super::row::Row;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Direction of money flow for a source row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Money left the account; amounts are signed negative in dedup keys
    Expense,

    /// Money arrived in the account; amounts are signed positive
    Income,
}

impl Direction {
    /// Apply this direction's sign to an unsigned amount
    ///
    /// Zero stays unsigned whatever its scale, so `-0` never appears in a key.
    pub fn sign(self, amount: Decimal) -> Decimal {
        match self {
            Direction::Expense if !amount.is_zero() => -amount,
            _ => amount,
        }
    }
}

/// One transaction ready for deduplication and grouping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Dedup key: `date_signedAmount_method_counterparty`
    pub key: String,

    /// Row to emit, already rewritten for combined-payment siblings
    pub row: Row,

    /// Payment method the row is grouped under
    pub payment_method: String,

    /// Direction inferred from the source amount columns
    pub direction: Direction,
}

/// Set of dedup keys taken from the aggregator's own export
///
/// Built once and only ever queried afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionKeySet {
    keys: HashSet<String>,
}

impl ExclusionKeySet {
    /// Whether `key` is already recorded in the aggregator
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<String> for ExclusionKeySet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        ExclusionKeySet {
            keys: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case::expense(Direction::Expense, "190", "-190")]
    #[case::income(Direction::Income, "190", "190")]
    #[case::expense_zero(Direction::Expense, "0", "0")]
    #[case::expense_zero_with_scale(Direction::Expense, "0.00", "0.00")]
    #[case::expense_decimal(Direction::Expense, "12.5", "-12.5")]
    fn test_direction_sign(#[case] direction: Direction, #[case] amount: &str, #[case] expected: &str) {
        let amount = Decimal::from_str(amount).unwrap();
        assert_eq!(direction.sign(amount).to_string(), expected);
    }

    #[test]
    fn test_exclusion_key_set_membership() {
        let set: ExclusionKeySet = vec![
            "2024/05/01_-190_PayPay残高_セブン-イレブン".to_string(),
            "2024/05/01_-190_PayPay残高_セブン-イレブン".to_string(),
            "2024/05/02_500_PayPay残高_送金".to_string(),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        assert!(set.contains("2024/05/02_500_PayPay残高_送金"));
        assert!(!set.contains("2024/05/02_-500_PayPay残高_送金"));
        assert!(!set.is_empty());
        assert!(ExclusionKeySet::default().is_empty());
    }
}
