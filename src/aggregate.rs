//! Income, expense and net totals over a transaction sequence.

use crate::money::Money;
use crate::transaction::{Transaction, TxKind};
use serde::Serialize;

/// Summary totals for a set of transactions.
///
/// # Invariants
///
/// - `net == income - expense`
/// - `income` and `expense` are never negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    /// Sum of all income amounts.
    pub income: Money,

    /// Sum of all expense amounts (as a positive magnitude).
    pub expense: Money,

    /// `income - expense`.
    pub net: Money,
}

/// Sums the transactions into per-kind buckets.
///
/// One linear pass with a single accumulator per bucket. Amounts are exact
/// decimals, so the order of summation does not change the result. A bucket
/// that would exceed the decimal range stays at the maximum.
pub fn aggregate<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = Money::ZERO;
    let mut expense = Money::ZERO;

    for tx in transactions {
        match tx.kind {
            TxKind::Income => income = income.saturating_add(tx.amount.money()),
            TxKind::Expense => expense = expense.saturating_add(tx.amount.money()),
        }
    }

    Totals {
        income,
        expense,
        net: income - expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Amount;
    use crate::query::{query, FilterSpec, SortKey};
    use crate::transaction::TxDate;
    use std::str::FromStr;

    fn tx(kind: TxKind, amount: &str, category: &str) -> Transaction {
        Transaction {
            id: format!("{category}-{amount}"),
            kind,
            amount: Amount::from_str(amount).unwrap(),
            date: TxDate::parse("2024-01-01"),
            category: category.to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_empty_totals_are_zero() {
        let none: Vec<Transaction> = Vec::new();
        let totals = aggregate(&none);
        assert_eq!(totals, Totals::default());
        assert!(totals.net.is_zero());
    }

    #[test]
    fn test_income_minus_expense() {
        let txs = vec![
            tx(TxKind::Income, "1000", "Salary"),
            tx(TxKind::Expense, "200", "Food"),
        ];

        let totals = aggregate(&txs);
        assert_eq!(totals.income.to_plain_string(), "1000");
        assert_eq!(totals.expense.to_plain_string(), "200");
        assert_eq!(totals.net.to_plain_string(), "800");
    }

    #[test]
    fn test_net_can_be_negative() {
        let txs = vec![
            tx(TxKind::Income, "10.10", "Interest"),
            tx(TxKind::Expense, "25.05", "Transport"),
        ];

        let totals = aggregate(&txs);
        assert!(totals.net.is_negative());
        assert_eq!(totals.net.to_string(), "-14.95");
        assert_eq!(totals.income - totals.expense, totals.net);
    }

    #[test]
    fn test_many_small_amounts_sum_exactly() {
        let txs: Vec<Transaction> = (0..1000).map(|_| tx(TxKind::Income, "0.1", "Interest")).collect();
        assert_eq!(aggregate(&txs).income.to_plain_string(), "100");
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let txs = vec![
            tx(TxKind::Income, "50000000000000000000000000000", "Salary"),
            tx(TxKind::Income, "50000000000000000000000000000", "Bonus"),
            tx(TxKind::Expense, "1", "Food"),
        ];

        let totals = aggregate(&txs);
        assert_eq!(totals.income, Money::new(rust_decimal::Decimal::MAX));
        assert_eq!(totals.income - totals.expense, totals.net);
    }

    #[test]
    fn test_filtered_totals_decompose() {
        let txs = vec![
            tx(TxKind::Income, "1000", "Salary"),
            tx(TxKind::Expense, "200", "Food"),
            tx(TxKind::Expense, "30.5", "Food"),
            tx(TxKind::Income, "5", "Interest"),
        ];
        let filter = FilterSpec {
            category: Some("Food".to_string()),
            ..FilterSpec::default()
        };

        let subset = query(&txs, &filter, SortKey::AmountAscending);
        let totals = aggregate(subset.iter().copied());
        let direct: Money = subset.iter().map(|t| t.amount.money()).sum();

        assert_eq!(totals.income + totals.expense, direct);
        assert_eq!(totals.expense.to_plain_string(), "230.5");
        assert!(totals.income.is_zero());
    }
}
