//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The route to create or list transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route serving usage counts for the profiles, currencies, and tags
/// observed across all recorded transactions.
pub const CATALOG_SUMMARY: &str = "/api/catalog/summary";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a brace-delimited segment such as '{transaction_id}'. This
/// function assumes an endpoint path contains at most one parameter. If no
/// parameter is found, the original `endpoint_path` is returned.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) if start < end => format!(
            "{}{}{}",
            &endpoint_path[..start],
            id,
            &endpoint_path[end + 1..]
        ),
        _ => endpoint_path.to_string(),
    }
}
