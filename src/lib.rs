//! # Finance Tracker
//!
//! Records income and expense transactions, tags them with user-defined
//! categories, and answers filtered, sorted queries with income/expense/net
//! totals and a CSV export.
//!
//! ## Design Principles
//!
//! - **Stateless core**: [`query`], [`aggregate`] and [`to_delimited_text`]
//!   borrow their input and keep nothing
//! - **Exact money**: amounts are positive `rust_decimal` values; the sign
//!   lives in [`TxKind`]
//! - **Deterministic ordering**: stable sorts, malformed dates first
//! - **Explicit state**: [`Ledger`] owns transactions and categories and
//!   persists every mutation through a [`KeyValueStore`]
//!
//! ## Example
//!
//! ```
//! use finance_tracker::{Ledger, MemoryStore, NewTransaction, TxKind, Amount};
//! use finance_tracker::{FilterSpec, SortKey};
//! use chrono::NaiveDate;
//! use std::str::FromStr;
//!
//! let mut ledger = Ledger::open(MemoryStore::new()).unwrap();
//! ledger.add_transaction(NewTransaction {
//!     kind: TxKind::Income,
//!     amount: Amount::from_str("1000").unwrap(),
//!     date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
//!     category: "Salary".to_string(),
//!     notes: String::new(),
//! }).unwrap();
//!
//! let view = ledger.view(&FilterSpec::any(), SortKey::DateDescending);
//! assert_eq!(view.totals.net.to_string(), "1000.00");
//! ```

pub mod aggregate;
pub mod categories;
pub mod error;
pub mod export;
pub mod ledger;
pub mod money;
pub mod query;
pub mod report;
pub mod store;
pub mod transaction;

pub use aggregate::{aggregate, Totals};
pub use categories::CategoryRegistry;
pub use error::{LedgerError, Result};
pub use export::{to_delimited_text, write_delimited};
pub use ledger::{Ledger, View};
pub use money::{Amount, Money};
pub use query::{query, FilterSpec, SortKey};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use transaction::{NewTransaction, Transaction, TxDate, TxKind};
