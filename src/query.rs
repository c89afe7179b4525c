//! Transaction query engine.
//!
//! Filters a borrowed transaction collection against a [`FilterSpec`] and
//! orders the survivors by a [`SortKey`]. The engine is stateless: it never
//! mutates or retains the transactions it is given.

use crate::transaction::{Transaction, TxKind};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Active query constraints for a single query call.
///
/// Every `None` field imposes no constraint. Present clauses are combined
/// conjunctively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Case-insensitive substring of `notes`. Trimmed; blank means "any".
    pub text: Option<String>,

    /// Exact kind match.
    pub kind: Option<TxKind>,

    /// Exact category name match.
    pub category: Option<String>,

    /// Inclusive lower date bound.
    pub date_from: Option<NaiveDate>,

    /// Inclusive upper date bound.
    pub date_to: Option<NaiveDate>,
}

impl FilterSpec {
    /// A filter that accepts every transaction.
    pub fn any() -> Self {
        Self::default()
    }

    /// Returns `true` if `tx` satisfies every active clause.
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.matches_kind(tx)
            && self.matches_category(tx)
            && self.matches_date(tx)
            && self.matches_text(tx)
    }

    fn matches_kind(&self, tx: &Transaction) -> bool {
        self.kind.map_or(true, |kind| tx.kind == kind)
    }

    fn matches_category(&self, tx: &Transaction) -> bool {
        self.category
            .as_deref()
            .map_or(true, |category| tx.category == category)
    }

    /// Transactions with a malformed date cannot be placed in a range, so
    /// they only pass when neither bound is set.
    fn matches_date(&self, tx: &Transaction) -> bool {
        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }

        let Some(date) = tx.date.as_date() else {
            return false;
        };

        self.date_from.map_or(true, |from| from <= date)
            && self.date_to.map_or(true, |to| date <= to)
    }

    fn matches_text(&self, tx: &Transaction) -> bool {
        let needle = match self.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_lowercase(),
            _ => return true,
        };

        tx.notes.to_lowercase().contains(&needle)
    }
}

/// Ordering applied to a filtered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    DateAscending,
    #[default]
    DateDescending,
    AmountAscending,
    AmountDescending,
}

impl SortKey {
    /// Every sort key in display order.
    pub const ALL: [SortKey; 4] = [
        SortKey::DateAscending,
        SortKey::DateDescending,
        SortKey::AmountAscending,
        SortKey::AmountDescending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateAscending => "date-asc",
            SortKey::DateDescending => "date-desc",
            SortKey::AmountAscending => "amount-asc",
            SortKey::AmountDescending => "amount-desc",
        }
    }

    /// Compares two transactions under this key.
    ///
    /// Malformed dates compare as earlier than any valid date and equal to
    /// each other. There is no secondary key; ties are left to the stable
    /// sort.
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortKey::DateAscending => a.date.as_date().cmp(&b.date.as_date()),
            SortKey::DateDescending => b.date.as_date().cmp(&a.date.as_date()),
            SortKey::AmountAscending => a.amount.cmp(&b.amount),
            SortKey::AmountDescending => b.amount.cmp(&a.amount),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| {
                format!("unknown sort key '{wanted}' (expected date-asc, date-desc, amount-asc or amount-desc)")
            })
    }
}

/// Filters `transactions` by `filter`, then stably sorts by `sort_key`.
///
/// Accepts any iterator of borrowed transactions, so a previous result can be
/// queried again:
///
/// ```
/// use finance_tracker::{query, FilterSpec, SortKey, Transaction};
///
/// let transactions: Vec<Transaction> = Vec::new();
/// let first = query(&transactions, &FilterSpec::any(), SortKey::DateAscending);
/// let again = query(first.iter().copied(), &FilterSpec::any(), SortKey::DateAscending);
/// assert_eq!(first, again);
/// ```
pub fn query<'a, I>(transactions: I, filter: &FilterSpec, sort_key: SortKey) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut matched: Vec<&Transaction> = transactions
        .into_iter()
        .filter(|tx| filter.matches(tx))
        .collect();

    // `sort_by` is stable
    matched.sort_by(|a, b| sort_key.compare(a, b));
    matched
}
