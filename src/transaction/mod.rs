//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the `NewTransaction` insert payload
//! - Database functions for storing, listing, and deleting transactions
//! - The JSON route handlers for the transaction endpoints

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use core::{
    Transaction, TransactionId, TransactionKind, TransactionRecord, all_transactions,
    create_transaction_table,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;

#[cfg(test)]
pub use core::{NewTransaction, create_transaction};
