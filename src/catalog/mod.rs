//! Catalog summarization: usage counts for the profiles, currencies, and
//! tags observed across a user's transactions.
//!
//! This module contains:
//! - The pure [summarize_catalog] aggregation and its input/output models
//! - The database query projecting stored transactions into catalog entries
//! - The route handler serving the summary as JSON

pub(crate) mod query;
mod summary;
mod summary_endpoint;

pub use summary::{
    CatalogEntry, CatalogSummary, CurrencyUsage, ProfileUsage, TagUsage, summarize_catalog,
};
pub use summary_endpoint::get_catalog_summary_endpoint;
