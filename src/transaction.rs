//! Transaction models for storage and querying.

use crate::error::LedgerError;
use crate::money::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// ISO-8601 calendar date format used for storage and export.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    /// Money coming in.
    Income,

    /// Money going out.
    Expense,
}

impl TxKind {
    /// Both kinds, income first.
    pub const ALL: [TxKind; 2] = [TxKind::Income, TxKind::Expense];

    /// Lowercase identifier used in storage and export (`income`, `expense`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }

    /// Capitalised name for tables.
    pub fn label(&self) -> &'static str {
        match self {
            TxKind::Income => "Income",
            TxKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(format!("unknown transaction kind '{other}'")),
        }
    }
}

/// The date a transaction happened on.
///
/// Dates are validated when they enter the system, but the store may have
/// been edited by hand, so an unparseable date is kept verbatim instead of
/// rejecting the record. Malformed dates order before every valid date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TxDate {
    /// A well-formed `YYYY-MM-DD` date.
    Valid(NaiveDate),

    /// Raw text that is not a calendar date.
    Malformed(String),
}

impl TxDate {
    /// Parses `raw` as `YYYY-MM-DD`, keeping it verbatim if that fails.
    pub fn parse(raw: &str) -> Self {
        match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Ok(date) => TxDate::Valid(date),
            Err(_) => TxDate::Malformed(raw.to_string()),
        }
    }

    /// The calendar date, if well-formed.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            TxDate::Valid(date) => Some(*date),
            TxDate::Malformed(_) => None,
        }
    }
}

impl From<NaiveDate> for TxDate {
    fn from(date: NaiveDate) -> Self {
        TxDate::Valid(date)
    }
}

impl fmt::Display for TxDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxDate::Valid(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            TxDate::Malformed(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for TxDate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TxDate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(TxDate::parse(&raw))
    }
}

/// Parses a user-supplied `YYYY-MM-DD` date strictly.
pub fn parse_date(raw: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| LedgerError::InvalidDate(raw.trim().to_string()))
}

/// A recorded income or expense.
///
/// Serialized field names match the stored JSON document
/// (`id`, `type`, `amount`, `date`, `category`, `notes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque identifier, stable for the transaction's lifetime
    pub id: String,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TxKind,

    /// Positive magnitude; the sign comes from `kind`
    pub amount: Amount,

    /// Day the transaction happened
    pub date: TxDate,

    /// Category name, checked against the registry only at creation time
    pub category: String,

    /// Free text, empty when absent
    #[serde(default)]
    pub notes: String,
}

impl Transaction {
    /// Builds a transaction from a validated draft, assigning a fresh ID.
    pub fn from_draft(draft: NewTransaction) -> Self {
        Transaction {
            id: new_id(),
            kind: draft.kind,
            amount: draft.amount,
            date: TxDate::Valid(draft.date),
            category: draft.category,
            notes: draft.notes,
        }
    }
}

/// Input for a transaction that has not been recorded yet.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TxKind,
    pub amount: Amount,
    pub date: NaiveDate,
    pub category: String,
    pub notes: String,
}

/// Generates a new opaque transaction ID.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!(TxKind::from_str("income").unwrap(), TxKind::Income);
        assert_eq!(TxKind::from_str("  Expense ").unwrap(), TxKind::Expense);
        assert!(TxKind::from_str("transfer").is_err());
    }

    #[test]
    fn test_date_parse_valid_and_malformed() {
        assert_eq!(
            TxDate::parse("2024-01-05"),
            TxDate::Valid(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
        assert_eq!(
            TxDate::parse("yesterday"),
            TxDate::Malformed("yesterday".to_string())
        );
        assert_eq!(
            TxDate::parse("2024-02-30"),
            TxDate::Malformed("2024-02-30".to_string())
        );
    }

    #[test]
    fn test_malformed_date_keeps_raw_text() {
        let date = TxDate::parse("05/01/2024");
        assert_eq!(date.to_string(), "05/01/2024");
        assert!(date.as_date().is_none());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2024-13-01").is_err());
        assert_eq!(
            parse_date(" 2024-03-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_deserialize_stored_record() {
        let json = r#"{"id":"ab12cd34","type":"expense","amount":200,"date":"2024-01-10","category":"Food"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.id, "ab12cd34");
        assert_eq!(tx.kind, TxKind::Expense);
        assert_eq!(tx.amount.to_string(), "200");
        assert_eq!(tx.date.to_string(), "2024-01-10");
        assert_eq!(tx.notes, "");
    }

    #[test]
    fn test_serialize_uses_type_field() {
        let json = r#"{"id":"x","type":"income","amount":"12.5","date":"not a date","category":"Salary","notes":"hi"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&tx).unwrap();

        assert_eq!(value["type"], "income");
        assert_eq!(value["amount"], "12.5");
        assert_eq!(value["date"], "not a date");
    }

    #[test]
    fn test_from_draft_assigns_unique_ids() {
        let draft = NewTransaction {
            kind: TxKind::Income,
            amount: Amount::from_str("10").unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category: "Salary".to_string(),
            notes: String::new(),
        };

        let a = Transaction::from_draft(draft.clone());
        let b = Transaction::from_draft(draft);
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }
}
