//! Defines the endpoint listing recorded transactions.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::Response,
};
use rusqlite::Connection;

use crate::{AppState, Error, response, transaction::core::list_transactions};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler listing all recorded transactions, newest first.
///
/// # Errors
/// This function will return a:
/// - [Error::DatabaseLockError] if the database lock cannot be acquired,
/// - or the error from reading the stored transactions.
pub async fn get_transactions_endpoint(
    State(state): State<ListTransactionsState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transactions = list_transactions(&connection)?;

    Ok(response::success(StatusCode::OK, transactions))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;
    use serde_json::Value;
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::{Transaction, TransactionKind, create_transaction},
    };

    use super::{ListTransactionsState, get_transactions_endpoint};

    fn get_test_state() -> ListTransactionsState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        ListTransactionsState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn lists_transactions_newest_first() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_transaction(
                Transaction::build(100, date!(2025 - 10 - 01), TransactionKind::Expense)
                    .note("older"),
                &connection,
            )
            .unwrap();
            create_transaction(
                Transaction::build(200, date!(2025 - 10 - 05), TransactionKind::Expense)
                    .note("newer"),
                &connection,
            )
            .unwrap();
        }

        let response = get_transactions_endpoint(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], Value::Bool(true));
        assert_eq!(body["data"][0]["note"], "newer");
        assert_eq!(body["data"][1]["note"], "older");
    }
}
