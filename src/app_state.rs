//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the table for the
    /// transaction model.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

#[cfg(test)]
mod app_state_tests {
    use rusqlite::Connection;

    use super::AppState;

    #[test]
    fn new_initializes_schema() {
        let conn = Connection::open_in_memory().expect("Could not open database in memory.");

        let state = AppState::new(conn).expect("Could not create app state.");

        let count: i64 = state
            .db_connection
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(id) FROM \"transaction\"", [], |row| row.get(0))
            .expect("Transaction table missing");
        assert_eq!(count, 0);
    }
}
