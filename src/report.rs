//! Plain-text rendering of query results for the terminal.

use crate::aggregate::Totals;
use crate::categories::CategoryRegistry;
use crate::error::Result;
use crate::money::Money;
use crate::transaction::{Transaction, TxKind};
use std::io::Write;

const COLUMNS: [&str; 6] = ["DATE", "TYPE", "CATEGORY", "AMOUNT", "NOTES", "ID"];

/// Amount with its sign applied: income positive, expense negative.
pub fn signed_amount(tx: &Transaction) -> Money {
    match tx.kind {
        TxKind::Income => tx.amount.money(),
        TxKind::Expense => -tx.amount.money(),
    }
}

/// Writes one aligned row per transaction under a header line.
pub fn write_table<W: Write>(rows: &[&Transaction], mut writer: W) -> Result<()> {
    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|tx| {
            [
                tx.date.to_string(),
                tx.kind.label().to_string(),
                tx.category.clone(),
                format_signed(signed_amount(tx)),
                tx.notes.replace('\n', " "),
                tx.id.clone(),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = COLUMNS.map(str::to_string);
    write_row(&mut writer, &header, &widths)?;
    for row in &cells {
        write_row(&mut writer, row, &widths)?;
    }

    if rows.is_empty() {
        writeln!(writer, "(no transactions)")?;
    }
    Ok(())
}

/// Writes the income, expense and net lines.
pub fn write_totals<W: Write>(totals: &Totals, mut writer: W) -> Result<()> {
    writeln!(writer, "Income:  +{}", totals.income)?;
    writeln!(writer, "Expense: -{}", totals.expense)?;
    writeln!(writer, "Net:     = {}", totals.net)?;
    Ok(())
}

/// Writes the registered categories of each kind, one per line.
pub fn write_categories<W: Write>(
    registry: &CategoryRegistry,
    kind: Option<TxKind>,
    mut writer: W,
) -> Result<()> {
    for k in TxKind::ALL {
        if kind.map_or(true, |wanted| wanted == k) {
            for name in registry.names(k) {
                writeln!(writer, "{}\t{}", k, name)?;
            }
        }
    }
    Ok(())
}

fn format_signed(value: Money) -> String {
    if value.is_negative() {
        value.to_string()
    } else {
        format!("+{}", value)
    }
}

// Amount column (index 3) is right-aligned, the rest left-aligned.
fn write_row<W: Write>(writer: &mut W, cells: &[String; 6], widths: &[usize; 6]) -> Result<()> {
    let mut line = String::new();
    for (idx, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        if idx == 3 {
            line.push_str(&format!("{:>width$}", cell, width = *width));
        } else {
            line.push_str(&format!("{:<width$}", cell, width = *width));
        }
    }
    writeln!(writer, "{}", line.trim_end())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::money::Amount;
    use crate::transaction::TxDate;
    use std::str::FromStr;

    fn tx(id: &str, kind: TxKind, amount: &str, category: &str, notes: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            kind,
            amount: Amount::from_str(amount).unwrap(),
            date: TxDate::parse("2024-01-05"),
            category: category.to_string(),
            notes: notes.to_string(),
        }
    }

    fn render_table(rows: &[&Transaction]) -> String {
        let mut out = Vec::new();
        write_table(rows, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_signed_amount() {
        let income = tx("i", TxKind::Income, "10", "Salary", "");
        let expense = tx("e", TxKind::Expense, "10", "Food", "");
        assert_eq!(signed_amount(&income).to_string(), "10.00");
        assert_eq!(signed_amount(&expense).to_string(), "-10.00");
    }

    #[test]
    fn test_table_rows() {
        let a = tx("id-a", TxKind::Income, "1000", "Salary", "");
        let b = tx("id-b", TxKind::Expense, "12.5", "Food", "two\nlines");
        let text = render_table(&[&a, &b]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("DATE"));
        assert!(lines[1].contains("Income"));
        assert!(lines[1].contains("+1000.00"));
        assert!(lines[2].contains("-12.50"));
        assert!(lines[2].contains("two lines"));
        assert!(lines[2].ends_with("id-b"));
    }

    #[test]
    fn test_empty_table() {
        let text = render_table(&[]);
        assert!(text.contains("(no transactions)"));
    }

    #[test]
    fn test_totals_lines() {
        let txs = vec![
            tx("a", TxKind::Income, "1000", "Salary", ""),
            tx("b", TxKind::Expense, "200", "Food", ""),
        ];
        let mut out = Vec::new();
        write_totals(&aggregate(&txs), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Income:  +1000.00\nExpense: -200.00\nNet:     = 800.00\n"
        );
    }

    #[test]
    fn test_categories_listing() {
        let mut out = Vec::new();
        write_categories(&CategoryRegistry::default(), Some(TxKind::Expense), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "expense\tFood\nexpense\tRent\nexpense\tTransport\n");
    }
}
