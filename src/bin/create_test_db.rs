use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use tally_rs::{Transaction, TransactionKind, create_transaction, initialize_db};

/// A utility for creating a demo database for the API server of tally_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const PROFILES: [&str; 2] = ["Personal", "Business"];
const CURRENCIES: [&str; 2] = ["USD", "EUR"];
const EXPENSE_TAGS: [&str; 7] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Healthcare",
    "Travel",
];
const INCOME_TAGS: [&str; 5] = ["Salary", "Freelance", "Investment", "Gift", "Bonus"];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating demo transactions...");

    let today = OffsetDateTime::now_utc().date();

    for i in 0..40usize {
        let kind = if i % 3 == 0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        let (tag_pool, amount_minor) = match kind {
            TransactionKind::Expense => (&EXPENSE_TAGS[..], 1_000 + (i as i64 * 1_237) % 49_000),
            TransactionKind::Income => (&INCOME_TAGS[..], 10_000 + (i as i64 * 3_511) % 140_000),
        };

        let date = today - Duration::days((i as i64 * 7) % 90);
        let builder = Transaction::build(amount_minor, date, kind)
            .profile(PROFILES[i % PROFILES.len()])
            .currency(CURRENCIES[i % CURRENCIES.len()])
            .tags(vec![tag_pool[i % tag_pool.len()].to_owned()])
            .note(&format!("Demo transaction #{}", i + 1));

        create_transaction(builder, &conn)?;
    }

    println!("Success!");

    Ok(())
}
