//! Defines the endpoint for recording a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::Response,
};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, response,
    transaction::{Transaction, TransactionKind, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for creating a transaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionRequest {
    /// The budgeting profile to record the transaction under.
    pub profile: String,
    /// The date when the transaction occurred.
    pub date: Date,
    /// The value of the transaction in minor units of its currency.
    pub amount_minor: i64,
    /// The currency code the amount is denominated in.
    pub currency: String,
    /// Whether the transaction is an expense or income.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The tag names to attach to the transaction.
    #[serde(default)]
    pub tags: Vec<String>,
    /// A text note describing the transaction.
    #[serde(default)]
    pub note: String,
}

/// A route handler for recording a new transaction, responds with the created
/// transaction on success.
///
/// # Errors
/// This function will return a:
/// - [Error::DatabaseLockError] if the database lock cannot be acquired,
/// - or the error from creating the transaction.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Json(request): Json<NewTransactionRequest>,
) -> Result<Response, Error> {
    let builder = Transaction::build(request.amount_minor, request.date, request.kind)
        .profile(&request.profile)
        .currency(&request.currency)
        .tags(request.tags)
        .note(&request.note);

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transaction = create_transaction(builder, &connection)?;

    Ok(response::success(StatusCode::CREATED, transaction))
}
