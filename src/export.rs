//! Delimited-text (CSV) export of a transaction sequence.
//!
//! The exporter accepts whatever sequence it is given; callers normally pass
//! the query engine's output so the file matches what the user is looking at.

use crate::error::Result;
use crate::transaction::Transaction;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

/// Fixed export header. Never varies with locale or filter state.
pub const HEADER: [&str; 6] = ["id", "kind", "amount", "date", "category", "notes"];

/// Conventional file name offered for downloads.
pub const DEFAULT_FILE_NAME: &str = "transactions.csv";

/// Serializes `transactions` as CSV text.
///
/// - Newlines in `notes` are replaced by a single space each
/// - Fields containing a comma, a double quote or a line break are quoted,
///   with embedded quotes doubled; everything else is written bare
/// - Rows are separated by `\n` with no separator after the final row
pub fn to_delimited_text<'a, I>(transactions: I) -> String
where
    I: IntoIterator<Item = &'a Transaction>,
{
    // Writing to a Vec cannot fail
    let mut bytes = encode(transactions).expect("in-memory CSV encoding");

    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }

    // Every field is a `String`, so the bytes are UTF-8
    String::from_utf8(bytes).expect("CSV output is UTF-8")
}

/// Writes the same text as [`to_delimited_text`] to `writer`.
pub fn write_delimited<'a, I, W>(transactions: I, mut writer: W) -> Result<()>
where
    I: IntoIterator<Item = &'a Transaction>,
    W: Write,
{
    writer.write_all(to_delimited_text(transactions).as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn encode<'a, I>(transactions: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    csv_writer.write_record(HEADER)?;

    for tx in transactions {
        csv_writer.write_record([
            tx.id.clone(),
            tx.kind.as_str().to_string(),
            tx.amount.to_string(),
            tx.date.to_string(),
            tx.category.clone(),
            tx.notes.replace('\n', " "),
        ])?;
    }

    csv_writer.flush()?;
    csv_writer.into_inner().map_err(|e| e.into_error().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Amount;
    use crate::transaction::{TxDate, TxKind};
    use std::str::FromStr;

    fn tx(id: &str, kind: TxKind, amount: &str, date: &str, category: &str, notes: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            kind,
            amount: Amount::from_str(amount).unwrap(),
            date: TxDate::parse(date),
            category: category.to_string(),
            notes: notes.to_string(),
        }
    }

    #[test]
    fn test_empty_sequence_is_header_only() {
        let none: Vec<Transaction> = Vec::new();
        assert_eq!(to_delimited_text(&none), "id,kind,amount,date,category,notes");
    }

    #[test]
    fn test_plain_rows_are_unquoted() {
        let txs = vec![
            tx("a1", TxKind::Income, "1000", "2024-01-05", "Salary", ""),
            tx("b2", TxKind::Expense, "12.50", "2024-01-10", "Food", "bread and milk"),
        ];

        assert_eq!(
            to_delimited_text(&txs),
            "id,kind,amount,date,category,notes\n\
             a1,income,1000,2024-01-05,Salary,\n\
             b2,expense,12.5,2024-01-10,Food,bread and milk"
        );
    }

    #[test]
    fn test_quotes_and_commas_are_escaped() {
        let txs = vec![tx(
            "b",
            TxKind::Expense,
            "200",
            "2024-01-10",
            "Food",
            "lunch, with \"friends\"",
        )];

        let text = to_delimited_text(&txs);
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, r#"b,expense,200,2024-01-10,Food,"lunch, with ""friends""""#);
    }

    #[test]
    fn test_newlines_in_notes_become_spaces() {
        let txs = vec![tx("n", TxKind::Expense, "1", "2024-01-01", "Food", "line one\nline two\n\nend")];

        let text = to_delimited_text(&txs);
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with(",line one line two  end"));
    }

    #[test]
    fn test_other_fields_are_quoted_when_needed() {
        let txs = vec![tx("q", TxKind::Expense, "3", "2024-01-01", "Food, Drinks", "")];

        let text = to_delimited_text(&txs);
        assert!(text.ends_with(r#"q,expense,3,2024-01-01,"Food, Drinks","#));
    }

    #[test]
    fn test_carriage_return_is_quoted_not_replaced() {
        let txs = vec![tx("p", TxKind::Expense, "1", "2024-01-01", "Food", "a\rb")];
        assert!(to_delimited_text(&txs).ends_with("p,expense,1,2024-01-01,Food,\"a\rb\""));
    }

    #[test]
    fn test_malformed_date_is_exported_verbatim() {
        let txs = vec![tx("m", TxKind::Income, "5", "someday", "Bonus", "")];
        assert!(to_delimited_text(&txs).ends_with("m,income,5,someday,Bonus,"));
    }

    #[test]
    fn test_escaped_fields_read_back() {
        let notes = ["a,b", "He said \"hi\"", "first\nsecond"];
        let txs: Vec<Transaction> = notes
            .iter()
            .enumerate()
            .map(|(i, n)| tx(&i.to_string(), TxKind::Expense, "1", "2024-01-01", "Food", n))
            .collect();

        let text = to_delimited_text(&txs);
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let read_back: Vec<String> = reader
            .records()
            .map(|r| r.unwrap().get(5).unwrap().to_string())
            .collect();

        assert_eq!(read_back, vec!["a,b", "He said \"hi\"", "first second"]);
    }

    #[test]
    fn test_write_delimited_matches_text() {
        let txs = vec![tx("w", TxKind::Income, "9.99", "2024-05-05", "Interest", "x")];
        let mut out = Vec::new();
        write_delimited(&txs, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), to_delimited_text(&txs));
    }
}
