//! Error types for the finance tracker.

use crate::transaction::TxKind;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while recording, storing, or exporting transactions.
///
/// The query engine and aggregator never produce these; they only surface from
/// creation-time validation and I/O.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Failed to read or write a data file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Stored document could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Amount was not a positive number
    #[error("Invalid amount '{0}': must be a number greater than zero")]
    InvalidAmount(String),

    /// Date was not a `YYYY-MM-DD` calendar date
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Category name was empty after trimming
    #[error("Category name must not be empty")]
    EmptyCategoryName,

    /// Category is not registered for the transaction kind
    #[error("Unknown {kind} category '{name}'")]
    UnknownCategory { kind: TxKind, name: String },

    /// No transaction carries the given ID
    #[error("Transaction {0} not found")]
    TransactionNotFound(String),

    /// Destructive reset requested without confirmation
    #[error("Refusing to reset all data without --yes")]
    ResetNotConfirmed,
}
