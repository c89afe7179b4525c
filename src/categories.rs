//! User-defined categories, one set per transaction kind.

use crate::error::{LedgerError, Result};
use crate::transaction::TxKind;
use serde::{Deserialize, Serialize};

/// Income categories offered on first use.
pub const DEFAULT_INCOME: [&str; 3] = ["Salary", "Bonus", "Interest"];

/// Expense categories offered on first use.
pub const DEFAULT_EXPENSE: [&str; 3] = ["Food", "Rent", "Transport"];

/// Category names keyed by kind.
///
/// # Invariants
///
/// - Names are unique within a kind and kept in insertion order
/// - Names are trimmed and never empty
/// - The same name may appear under both kinds
///
/// Serializes as `{"income": [...], "expense": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRegistry {
    #[serde(default)]
    income: Vec<String>,

    #[serde(default)]
    expense: Vec<String>,
}

impl CategoryRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        CategoryRegistry {
            income: Vec::new(),
            expense: Vec::new(),
        }
    }

    /// Drops blank and repeated names, e.g. after loading a hand-edited file.
    pub fn normalized(self) -> Self {
        let mut registry = CategoryRegistry::empty();
        for (kind, names) in [(TxKind::Income, self.income), (TxKind::Expense, self.expense)] {
            for name in names {
                // Blank names are the only failure and are meant to be dropped
                let _ = registry.add(kind, &name);
            }
        }
        registry
    }

    fn set(&self, kind: TxKind) -> &Vec<String> {
        match kind {
            TxKind::Income => &self.income,
            TxKind::Expense => &self.expense,
        }
    }

    fn set_mut(&mut self, kind: TxKind) -> &mut Vec<String> {
        match kind {
            TxKind::Income => &mut self.income,
            TxKind::Expense => &mut self.expense,
        }
    }

    /// Names registered for `kind`, in insertion order.
    pub fn names(&self, kind: TxKind) -> &[String] {
        self.set(kind)
    }

    /// Every name across both kinds without repeats, income names first.
    pub fn all_names(&self) -> Vec<&str> {
        let mut all: Vec<&str> = Vec::new();
        for name in self.income.iter().chain(self.expense.iter()) {
            if !all.contains(&name.as_str()) {
                all.push(name.as_str());
            }
        }
        all
    }

    /// Returns `true` if `name` is registered for `kind`.
    pub fn contains(&self, kind: TxKind, name: &str) -> bool {
        self.set(kind).iter().any(|n| n == name)
    }

    /// Adds `name` (trimmed) to `kind`.
    ///
    /// Returns `Ok(false)` if it was already present.
    pub fn add(&mut self, kind: TxKind, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyCategoryName);
        }
        if self.contains(kind, name) {
            return Ok(false);
        }

        self.set_mut(kind).push(name.to_string());
        Ok(true)
    }

    /// Removes `name` from `kind`. Returns `false` if it was not present.
    ///
    /// Transactions already tagged with the name are unaffected.
    pub fn remove(&mut self, kind: TxKind, name: &str) -> bool {
        let name = name.trim();
        let set = self.set_mut(kind);
        let before = set.len();
        set.retain(|n| n != name);
        set.len() != before
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        CategoryRegistry {
            income: DEFAULT_INCOME.iter().map(|s| s.to_string()).collect(),
            expense: DEFAULT_EXPENSE.iter().map(|s| s.to_string()).collect(),
        }
    }
}
