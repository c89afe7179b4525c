//! The ledger controller.
//!
//! Owns the transaction list and the category registry, validates new
//! transactions, and persists after every mutation. Queries borrow the
//! current state and hand it to the stateless query engine and aggregator.

use crate::aggregate::{aggregate, Totals};
use crate::categories::CategoryRegistry;
use crate::error::{LedgerError, Result};
use crate::export::to_delimited_text;
use crate::query::{query, FilterSpec, SortKey};
use crate::store::{KeyValueStore, CATEGORIES_KEY, TRANSACTIONS_KEY};
use crate::transaction::{NewTransaction, Transaction, TxKind};
use log::{debug, warn};
use serde_json::Value;

/// Filtered, sorted rows together with their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    pub rows: Vec<&'a Transaction>,
    pub totals: Totals,
}

/// Application state backed by a [`KeyValueStore`].
///
/// # Invariants
///
/// - Every mutation is saved before the method returns
/// - A mutation whose save fails leaves the in-memory state unchanged
/// - Removing a category never touches recorded transactions
pub struct Ledger<S: KeyValueStore> {
    store: S,
    transactions: Vec<Transaction>,
    categories: CategoryRegistry,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Loads state from `store`.
    ///
    /// Missing documents fall back to an empty transaction list and the
    /// default categories. Corrupt documents and undecodable transaction
    /// records are logged at warn level and skipped.
    pub fn open(store: S) -> Result<Self> {
        let transactions = load_transactions(&store)?;
        let categories = load_categories(&store)?;

        debug!(
            "Opened ledger with {} transactions, {} income and {} expense categories",
            transactions.len(),
            categories.names(TxKind::Income).len(),
            categories.names(TxKind::Expense).len()
        );

        Ok(Ledger {
            store,
            transactions,
            categories,
        })
    }

    /// All recorded transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records a new transaction.
    ///
    /// The category must currently be registered for the draft's kind. This
    /// is the only place category membership is checked.
    pub fn add_transaction(&mut self, draft: NewTransaction) -> Result<&Transaction> {
        let category = draft.category.trim().to_string();
        if category.is_empty() {
            return Err(LedgerError::EmptyCategoryName);
        }
        if !self.categories.contains(draft.kind, &category) {
            return Err(LedgerError::UnknownCategory {
                kind: draft.kind,
                name: category,
            });
        }

        let tx = Transaction::from_draft(NewTransaction {
            category,
            notes: draft.notes.trim().to_string(),
            ..draft
        });
        debug!("Recording {} {} as {}", tx.kind, tx.amount, tx.id);

        self.transactions.push(tx);
        if let Err(e) = self.save_transactions() {
            self.transactions.pop();
            return Err(e);
        }

        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Deletes the transaction with `id` and returns it.
    pub fn remove_transaction(&mut self, id: &str) -> Result<Transaction> {
        let position = self
            .transactions
            .iter()
            .position(|tx| tx.id == id)
            .ok_or_else(|| LedgerError::TransactionNotFound(id.to_string()))?;

        let removed = self.transactions.remove(position);
        if let Err(e) = self.save_transactions() {
            self.transactions.insert(position, removed);
            return Err(e);
        }

        debug!("Removed transaction {}", removed.id);
        Ok(removed)
    }

    /// Registers a category. Returns `false` if it already existed.
    pub fn add_category(&mut self, kind: TxKind, name: &str) -> Result<bool> {
        let previous = self.categories.clone();
        let added = self.categories.add(kind, name)?;
        if added {
            if let Err(e) = self.save_categories() {
                self.categories = previous;
                return Err(e);
            }
            debug!("Added {} category '{}'", kind, name.trim());
        }
        Ok(added)
    }

    /// Unregisters a category. Returns `false` if it was not registered.
    pub fn remove_category(&mut self, kind: TxKind, name: &str) -> Result<bool> {
        let previous = self.categories.clone();
        let removed = self.categories.remove(kind, name);
        if removed {
            if let Err(e) = self.save_categories() {
                self.categories = previous;
                return Err(e);
            }
            debug!("Removed {} category '{}'", kind, name.trim());
        }
        Ok(removed)
    }

    /// Clears every transaction and restores the default categories.
    ///
    /// On a failed save the in-memory state is restored; a store that
    /// accepted the transaction list but not the categories keeps the
    /// cleared list.
    pub fn reset(&mut self) -> Result<()> {
        let transactions = std::mem::take(&mut self.transactions);
        let categories = std::mem::take(&mut self.categories);

        if let Err(e) = self.save_transactions().and_then(|_| self.save_categories()) {
            self.transactions = transactions;
            self.categories = categories;
            return Err(e);
        }

        debug!("Ledger reset");
        Ok(())
    }

    /// Filters and sorts the transactions and totals the result.
    pub fn view(&self, filter: &FilterSpec, sort_key: SortKey) -> View<'_> {
        let rows = query(&self.transactions, filter, sort_key);
        let totals = aggregate(rows.iter().copied());
        View { rows, totals }
    }

    /// CSV text of exactly the rows [`Ledger::view`] would show.
    pub fn export(&self, filter: &FilterSpec, sort_key: SortKey) -> String {
        to_delimited_text(query(&self.transactions, filter, sort_key))
    }

    fn save_transactions(&mut self) -> Result<()> {
        let value = serde_json::to_value(&self.transactions)?;
        self.store.save(TRANSACTIONS_KEY, &value)
    }

    fn save_categories(&mut self) -> Result<()> {
        let value = serde_json::to_value(&self.categories)?;
        self.store.save(CATEGORIES_KEY, &value)
    }
}

fn load_document<S: KeyValueStore>(store: &S, key: &str) -> Result<Option<Value>> {
    match store.load(key) {
        Ok(value) => Ok(value),
        Err(LedgerError::Json(e)) => {
            warn!("Document '{}' is corrupt, starting fresh: {}", key, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn load_transactions<S: KeyValueStore>(store: &S) -> Result<Vec<Transaction>> {
    let items = match load_document(store, TRANSACTIONS_KEY)? {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            warn!("Document '{}' is not a list, starting fresh", TRANSACTIONS_KEY);
            return Ok(Vec::new());
        }
    };

    let mut transactions = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Transaction>(item) {
            Ok(tx) => transactions.push(tx),
            Err(e) => warn!("Record {}: skipping undecodable transaction: {}", idx, e),
        }
    }

    Ok(transactions)
}

fn load_categories<S: KeyValueStore>(store: &S) -> Result<CategoryRegistry> {
    let Some(value) = load_document(store, CATEGORIES_KEY)? else {
        return Ok(CategoryRegistry::default());
    };

    match serde_json::from_value::<CategoryRegistry>(value) {
        Ok(registry) => Ok(registry.normalized()),
        Err(e) => {
            warn!("Document '{}' is invalid, using defaults: {}", CATEGORIES_KEY, e);
            Ok(CategoryRegistry::default())
        }
    }
}
