//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction spent money or earned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money leaving the budget, e.g. groceries or rent.
    Expense,
    /// Money entering the budget, e.g. a salary payment.
    Income,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Expense => write!(f, "expense"),
            TransactionKind::Income => write!(f, "income"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(TransactionKind::Expense),
            "income" => Ok(TransactionKind::Income),
            other => Err(Error::InvalidTransactionKind(other.to_string())),
        }
    }
}

/// An expense or income recorded under a budgeting profile.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The name of the budgeting profile the transaction was recorded under.
    pub profile: String,
    /// When the transaction happened.
    pub date: Date,
    /// The value of the transaction in minor units of its currency, e.g. cents.
    pub amount_minor: i64,
    /// The currency code the amount is denominated in.
    pub currency: String,
    /// Whether the transaction is an expense or income.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The names of the tags attached to this transaction.
    pub tags: Vec<String>,
    /// A text note describing what the transaction was for.
    pub note: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount_minor: i64, date: Date, kind: TransactionKind) -> TransactionBuilder {
        TransactionBuilder {
            amount_minor,
            date,
            kind,
            profile: String::new(),
            currency: String::new(),
            tags: Vec::new(),
            note: String::new(),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Profile, currency, tags, and note default to empty values, which the
/// catalog summarizer treats as "contributes to no grouping".
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The value of the transaction in minor units, e.g. `4599` for $45.99.
    pub amount_minor: i64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Whether the transaction is an expense or income.
    pub kind: TransactionKind,
    /// The budgeting profile the transaction belongs to, e.g. "Personal".
    pub profile: String,
    /// The currency code the amount is denominated in, e.g. "USD".
    pub currency: String,
    /// The tag names attached to the transaction, e.g. "Groceries".
    pub tags: Vec<String>,
    /// A human-readable description of the transaction.
    pub note: String,
}

impl TransactionBuilder {
    /// Set the budgeting profile for the transaction.
    pub fn profile(mut self, profile: &str) -> Self {
        self.profile = profile.to_owned();
        self
    }

    /// Set the currency code for the transaction.
    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_owned();
        self
    }

    /// Set the tag names for the transaction.
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the note for the transaction.
    pub fn note(mut self, note: &str) -> Self {
        self.note = note.to_owned();
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::JSONSerializationError] if the tag list cannot be serialized,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let tags_json = serde_json::to_string(&builder.tags)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (profile, date, amount_minor, currency, kind, tags, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, profile, date, amount_minor, currency, kind, tags, note",
        )?
        .query_row(
            (
                &builder.profile,
                builder.date,
                builder.amount_minor,
                &builder.currency,
                builder.kind.to_string(),
                tags_json,
                &builder.note,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, profile, date, amount_minor, currency, kind, tags, note
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve all transactions, newest first.
///
/// Transactions sharing a date are ordered by ID so that the listing stays
/// stable across updates.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn list_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, profile, date, amount_minor, currency, kind, tags, note
             FROM \"transaction\" ORDER BY date DESC, id ASC",
        )?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Delete a transaction by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingTransaction] if `id` does not refer to a
/// transaction in the database.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                profile TEXT NOT NULL,
                date TEXT NOT NULL,
                amount_minor INTEGER NOT NULL,
                currency TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('expense', 'income')),
                tags TEXT NOT NULL DEFAULT '[]',
                note TEXT NOT NULL DEFAULT ''
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Index used by the transaction listing.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Rows with tag data that does not parse as a JSON array are treated as
/// having no tags.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let profile = row.get(1)?;
    let date = row.get(2)?;
    let amount_minor = row.get(3)?;
    let currency = row.get(4)?;

    let raw_kind: String = row.get(5)?;
    let kind = raw_kind.parse().map_err(|error: Error| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(error))
    })?;

    let raw_tags: String = row.get(6)?;
    let tags = serde_json::from_str(&raw_tags).unwrap_or_default();

    let note = row.get(7)?;

    Ok(Transaction {
        id,
        profile,
        date,
        amount_minor,
        currency,
        kind,
        tags,
        note,
    })
}

// ============================================================================
// TESTS
// ============================================================================
