//! Tally is a web app for tracking personal income and expenses across
//! budgeting profiles.
//!
//! This library provides a JSON API for recording transactions and for
//! summarizing the catalog of profiles, currencies, and tags observed
//! across them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod catalog;
mod database_id;
mod db;
pub mod endpoints;
mod logging;
mod response;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use catalog::{
    CatalogEntry, CatalogSummary, CurrencyUsage, ProfileUsage, TagUsage, summarize_catalog,
};
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use transaction::{Transaction, TransactionBuilder, TransactionKind, create_transaction};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A transaction kind string was neither "expense" nor "income".
    ///
    /// This can only happen when reading rows that were written outside the
    /// application, since the API deserializes the kind into an enum.
    #[error("\"{0}\" is not a valid transaction kind, expected \"expense\" or \"income\"")]
    InvalidTransactionKind(String),

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => response::error(
                StatusCode::NOT_FOUND,
                "the requested resource could not be found",
            ),
            Error::DeleteMissingTransaction => response::error(
                StatusCode::NOT_FOUND,
                "the transaction could not be found, it may have already been deleted",
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                response::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an unexpected error occurred, check the server logs for more details",
                )
            }
        }
    }
}
