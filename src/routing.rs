//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::Response,
    routing::{delete, get},
};

use crate::{
    AppState,
    catalog::get_catalog_summary_endpoint,
    endpoints, response,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::CATALOG_SUMMARY, get(get_catalog_summary_endpoint))
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The fallback handler for unknown routes.
async fn get_404_not_found() -> Response {
    response::error(
        StatusCode::NOT_FOUND,
        "the requested resource could not be found",
    )
}
