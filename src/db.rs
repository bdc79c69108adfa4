/*! This module initializes the application's database schema. */

use rusqlite::Connection;

use crate::transaction::create_transaction_table;

/// Create the tables for the application's domain models if they do not
/// already exist.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    create_transaction_table(connection)
}
