//! Finance Tracker CLI
//!
//! Records transactions and categories in a data directory and prints
//! filtered listings, totals, or a CSV export.
//!
//! # Usage
//!
//! ```bash
//! finance-tracker add --kind expense --amount 12.5 --category Food --notes lunch
//! finance-tracker list --kind expense --from 2024-01-01 --sort amount-desc
//! finance-tracker export --output transactions.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//! - `FINANCE_TRACKER_DIR`: Data directory (default `.finance-tracker`)

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use finance_tracker::report::{write_categories, write_table, write_totals};
use finance_tracker::transaction::parse_date;
use finance_tracker::{
    write_delimited, Amount, FilterSpec, JsonFileStore, Ledger, LedgerError, NewTransaction,
    Result, SortKey, TxKind,
};
use log::warn;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "finance-tracker", version, about = "Track income and expenses")]
struct Cli {
    /// Directory holding the JSON data files
    #[arg(long, global = true, env = "FINANCE_TRACKER_DIR", default_value = ".finance-tracker")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new transaction
    Add {
        #[arg(long)]
        kind: TxKind,
        #[arg(long)]
        amount: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Delete a transaction by ID
    Remove { id: String },
    /// Show matching transactions and their totals
    List(FilterArgs),
    /// Show only the totals of matching transactions
    Summary(FilterArgs),
    /// Write matching transactions as CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Delete all transactions and restore default categories
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    /// List categories
    List {
        #[arg(long)]
        kind: Option<TxKind>,
    },
    /// Register a category
    Add {
        #[arg(long)]
        kind: TxKind,
        name: String,
    },
    /// Unregister a category; existing transactions keep it
    Remove {
        #[arg(long)]
        kind: TxKind,
        name: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindFilter {
    All,
    Income,
    Expense,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Case-insensitive text to find in notes
    #[arg(long)]
    text: Option<String>,
    #[arg(long, value_enum, default_value = "all")]
    kind: KindFilter,
    /// Exact category name, or "all"
    #[arg(long, default_value = "all")]
    category: String,
    /// Inclusive start date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Inclusive end date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
    /// date-asc, date-desc, amount-asc or amount-desc
    #[arg(long, default_value = "date-desc")]
    sort: SortKey,
}

impl FilterArgs {
    fn to_filter(&self) -> FilterSpec {
        FilterSpec {
            text: self.text.clone(),
            kind: match self.kind {
                KindFilter::All => None,
                KindFilter::Income => Some(TxKind::Income),
                KindFilter::Expense => Some(TxKind::Expense),
            },
            category: match self.category.as_str() {
                "all" => None,
                name => Some(name.to_string()),
            },
            date_from: bound("--from", self.from.as_deref()),
            date_to: bound("--to", self.to.as_deref()),
        }
    }
}

/// Unparseable bounds are ignored rather than rejected.
fn bound(flag: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match parse_date(raw) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!("Ignoring {}: {}", flag, e);
            None
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut ledger = Ledger::open(JsonFileStore::new(&cli.data_dir))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Add {
            kind,
            amount,
            date,
            category,
            notes,
        } => {
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => Local::now().date_naive(),
            };
            let tx = ledger.add_transaction(NewTransaction {
                kind,
                amount: Amount::from_str(&amount)?,
                date,
                category,
                notes,
            })?;
            writeln!(out, "Recorded {}", tx.id)?;
        }
        Command::Remove { id } => {
            let removed = ledger.remove_transaction(&id)?;
            writeln!(out, "Removed {}", removed.id)?;
        }
        Command::List(args) => {
            let view = ledger.view(&args.to_filter(), args.sort);
            write_table(&view.rows, &mut out)?;
            writeln!(out)?;
            write_totals(&view.totals, &mut out)?;
        }
        Command::Summary(args) => {
            let view = ledger.view(&args.to_filter(), args.sort);
            write_totals(&view.totals, &mut out)?;
        }
        Command::Export { filter, output } => {
            let view = ledger.view(&filter.to_filter(), filter.sort);
            match output {
                Some(path) => {
                    let file = BufWriter::new(File::create(&path)?);
                    write_delimited(view.rows.iter().copied(), file)?;
                    writeln!(
                        out,
                        "Exported {} transactions to {}",
                        view.rows.len(),
                        path.display()
                    )?;
                }
                None => write_delimited(view.rows.iter().copied(), &mut out)?,
            }
        }
        Command::Category(CategoryCommand::List { kind }) => {
            write_categories(ledger.categories(), kind, &mut out)?;
        }
        Command::Category(CategoryCommand::Add { kind, name }) => {
            if ledger.add_category(kind, &name)? {
                writeln!(out, "Added {} category '{}'", kind, name.trim())?;
            } else {
                writeln!(out, "{} category '{}' already exists", kind, name.trim())?;
            }
        }
        Command::Category(CategoryCommand::Remove { kind, name }) => {
            if ledger.remove_category(kind, &name)? {
                writeln!(out, "Removed {} category '{}'", kind, name.trim())?;
            } else {
                writeln!(out, "No {} category named '{}'", kind, name.trim())?;
            }
        }
        Command::Reset { yes } => {
            if !yes {
                return Err(LedgerError::ResetNotConfirmed);
            }
            ledger.reset()?;
            writeln!(out, "All data cleared")?;
        }
    }

    Ok(())
}
