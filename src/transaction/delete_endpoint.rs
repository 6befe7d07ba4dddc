//! Defines the endpoint for deleting a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState, Error, database_id::TransactionId, response, transaction::core::delete_transaction,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction by its ID.
///
/// Responds with a 404 error envelope if the transaction does not exist.
///
/// # Errors
/// This function will return a:
/// - [Error::DatabaseLockError] if the database lock cannot be acquired,
/// - or [Error::DeleteMissingTransaction] if the transaction does not exist.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    delete_transaction(transaction_id, &connection)?;

    Ok(response::success_message(StatusCode::OK, "transaction deleted"))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{Transaction, TransactionKind, create_transaction, core::get_transaction},
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    fn get_test_state() -> DeleteTransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn deletes_existing_transaction() {
        let state = get_test_state();
        let transaction_id = {
            let connection = state.db_connection.lock().unwrap();
            create_transaction(
                Transaction::build(100, date!(2025 - 10 - 05), TransactionKind::Expense),
                &connection,
            )
            .unwrap()
            .id
        };

        let response = delete_transaction_endpoint(State(state.clone()), Path(transaction_id))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_transaction(transaction_id, &connection),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn deleting_missing_transaction_returns_not_found() {
        let state = get_test_state();

        let response = delete_transaction_endpoint(State(state), Path(999))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
