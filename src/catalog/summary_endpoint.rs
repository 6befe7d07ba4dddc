//! Defines the endpoint serving the catalog summary.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    catalog::{query::get_catalog_entries, summary::summarize_catalog},
    response,
};

/// The state needed to summarize the transaction catalog.
#[derive(Debug, Clone)]
pub struct CatalogSummaryState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CatalogSummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler serving usage counts for the profiles, currencies, and
/// tags observed across all recorded transactions.
///
/// # Errors
/// This function will return a:
/// - [Error::DatabaseLockError] if the database lock cannot be acquired,
/// - or the error from reading the stored transactions.
pub async fn get_catalog_summary_endpoint(
    State(state): State<CatalogSummaryState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let entries = get_catalog_entries(&connection)?;

    Ok(response::success(StatusCode::OK, summarize_catalog(&entries)))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::{Transaction, TransactionKind, create_transaction},
    };

    use super::{CatalogSummaryState, get_catalog_summary_endpoint};

    fn get_test_state() -> CatalogSummaryState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CatalogSummaryState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn summarizes_recorded_transactions() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_transaction(
                Transaction::build(4599, date!(2025 - 10 - 04), TransactionKind::Expense)
                    .profile("Personal")
                    .currency("usd")
                    .tags(vec!["Food".to_string()]),
                &connection,
            )
            .unwrap();
            create_transaction(
                Transaction::build(1299, date!(2025 - 10 - 05), TransactionKind::Expense)
                    .profile("Personal")
                    .currency("USD")
                    .tags(vec!["Food".to_string(), "Transport".to_string()]),
                &connection,
            )
            .unwrap();
        }

        let response = get_catalog_summary_endpoint(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "success": true,
                "data": {
                    "transactionCount": 2,
                    "profiles": [{"name": "Personal", "count": 2}],
                    "currencies": [{"code": "USD", "count": 2}],
                    "tags": [
                        {"profile": "Personal", "name": "Food", "type": "expense", "count": 2},
                        {"profile": "Personal", "name": "Transport", "type": "expense", "count": 1},
                    ],
                },
            })
        );
    }

    #[tokio::test]
    async fn poisoned_database_lock_is_an_internal_error() {
        let state = get_test_state();
        let db_connection = state.db_connection.clone();
        std::thread::spawn(move || {
            let _connection = db_connection.lock().unwrap();
            panic!("leave the lock poisoned");
        })
        .join()
        .unwrap_err();

        let response = get_catalog_summary_endpoint(State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn empty_database_yields_empty_summary() {
        let state = get_test_state();

        let response = get_catalog_summary_endpoint(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "success": true,
                "data": {
                    "transactionCount": 0,
                    "profiles": [],
                    "currencies": [],
                    "tags": [],
                },
            })
        );
    }
}
