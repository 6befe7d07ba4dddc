//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing, querying, and deleting transactions
//! - JSON API handlers for transaction operations

pub(crate) mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use core::{
    Transaction, TransactionBuilder, TransactionKind, create_transaction,
    create_transaction_table,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::get_transactions_endpoint;
