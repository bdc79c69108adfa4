//! Defines the core data models and database queries for transactions.

use std::{fmt, str::FromStr};

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for mapping to database IDs.
pub type TransactionId = i64;

/// Whether a transaction adds money to the ledger or removes it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in, e.g. a salary payment.
    Credit,
    /// Money going out, e.g. a grocery shop.
    Debit,
}

impl TransactionKind {
    /// The kind as the lowercase string stored in the database and used on
    /// the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            other => Err(format!("unknown transaction type \"{other}\"")),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|message: String| FromSqlError::Other(message.into()))
    }
}

/// An event where money was either earned (credit) or spent (debit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the store on creation.
    pub id: TransactionId,
    /// Whether the transaction is a credit or a debit.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The amount of money earned or spent, in currency units. Never negative.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened (UTC, day precision).
    pub date: Date,
}

/// The validated data needed to insert a transaction.
///
/// `date` is the civil date in UTC; callers default it to today when the
/// client did not supply one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Whether the transaction is a credit or a debit.
    pub kind: TransactionKind,
    /// The amount of money earned or spent. Never negative.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
}

/// A raw transaction row as consumed by the report engine.
///
/// The kind is kept as the stored string so that legacy rows with an unknown
/// type can be skipped during aggregation instead of failing the whole
/// report.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// The stored transaction type string, expected to be "credit" or "debit".
    pub kind: String,
    /// The amount of money earned or spent.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// The ID is assigned by the database and returned on the created
/// transaction.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (kind, amount, description, date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, kind, amount, description, date",
        )?
        .query_row(
            (
                new_transaction.kind,
                new_transaction.amount,
                new_transaction.description,
                new_transaction.date,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a page of transactions from the database.
///
/// Transactions are returned in a stable order (date ascending, then ID
/// ascending), skipping the first `skip` rows and returning at most `limit`
/// rows.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error, including rows whose
/// stored type is not "credit" or "debit".
pub fn list_transactions(
    skip: u32,
    limit: u32,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            // Sort by date, and then ID to keep the order stable across calls.
            "SELECT id, kind, amount, description, date FROM \"transaction\"
             ORDER BY date ASC, id ASC
             LIMIT ?1 OFFSET ?2",
        )?
        .query_map((limit, skip), map_transaction_row)?
        .map(|result| result.map_err(Error::from))
        .collect()
}

type RowsAffected = usize;

/// Remove the transaction with `id` from the database.
///
/// Returns the number of rows removed: zero means no transaction had the
/// given ID.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Retrieve every transaction as a raw [TransactionRecord].
///
/// Used exclusively by the report engine; no ordering is guaranteed since the
/// engine re-derives its own grouping.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn all_transactions(connection: &Connection) -> Result<Vec<TransactionRecord>, Error> {
    connection
        .prepare("SELECT kind, amount, description, date FROM \"transaction\"")?
        .query_map([], |row| {
            Ok(TransactionRecord {
                kind: row.get(0)?,
                amount: row.get(1)?,
                description: row.get(2)?,
                date: row.get(3)?,
            })
        })?
        .map(|result| result.map_err(Error::from))
        .collect()
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL,
                amount REAL NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let kind = row.get(1)?;
    let amount = row.get(2)?;
    let description = row.get(3)?;
    let date = row.get(4)?;

    Ok(Transaction {
        id,
        kind,
        amount,
        description,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use std::collections::HashSet;

    use rusqlite::Connection;
    use time::macros::date;

    use crate::db::initialize;

    use super::{
        NewTransaction, TransactionKind, all_transactions, create_transaction,
        delete_transaction, list_transactions,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn new_debit(amount: f64, description: &str, date: time::Date) -> NewTransaction {
        NewTransaction {
            kind: TransactionKind::Debit,
            amount,
            description: description.to_owned(),
            date,
        }
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let amount = 12.3;

        let result = create_transaction(new_debit(amount, "coffee", date!(2024 - 01 - 05)), &conn);

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.amount, amount);
                assert_eq!(transaction.kind, TransactionKind::Debit);
                assert_eq!(transaction.description, "coffee");
                assert_eq!(transaction.date, date!(2024 - 01 - 05));
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_assigns_unique_ids() {
        let conn = get_test_connection();
        let mut ids = HashSet::new();

        for i in 0..20 {
            let transaction =
                create_transaction(new_debit(i as f64, "", date!(2024 - 01 - 01)), &conn)
                    .expect("Could not create transaction");

            assert!(
                ids.insert(transaction.id),
                "duplicate id {}",
                transaction.id
            );
        }
    }

    #[test]
    fn list_orders_by_date_then_id() {
        let conn = get_test_connection();
        // Inserted out of date order on purpose.
        create_transaction(new_debit(1.0, "second", date!(2024 - 01 - 02)), &conn).unwrap();
        create_transaction(new_debit(2.0, "first", date!(2024 - 01 - 01)), &conn).unwrap();
        create_transaction(new_debit(3.0, "third", date!(2024 - 01 - 02)), &conn).unwrap();

        let got = list_transactions(0, 100, &conn).expect("Could not list transactions");

        let descriptions: Vec<&str> = got
            .iter()
            .map(|transaction| transaction.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["first", "second", "third"]);
    }

    #[test]
    fn list_applies_skip_and_limit() {
        let conn = get_test_connection();
        for i in 0..10 {
            create_transaction(new_debit(i as f64, "", date!(2024 - 01 - 01)), &conn).unwrap();
        }

        let got = list_transactions(3, 4, &conn).expect("Could not list transactions");

        assert_eq!(got.len(), 4);
        assert_eq!(got[0].amount, 3.0);
        assert_eq!(got[3].amount, 6.0);
    }

    #[test]
    fn delete_removes_row_and_reports_missing() {
        let conn = get_test_connection();
        let transaction =
            create_transaction(new_debit(1.23, "", date!(2024 - 01 - 01)), &conn).unwrap();

        let rows_affected = delete_transaction(transaction.id, &conn).unwrap();
        assert_eq!(rows_affected, 1);
        assert!(list_transactions(0, 100, &conn).unwrap().is_empty());

        // The second delete must report that nothing was removed.
        let rows_affected = delete_transaction(transaction.id, &conn).unwrap();
        assert_eq!(rows_affected, 0);
    }

    #[test]
    fn all_preserves_legacy_kinds() {
        let conn = get_test_connection();
        create_transaction(new_debit(5.0, "", date!(2024 - 01 - 01)), &conn).unwrap();
        conn.execute(
            "INSERT INTO \"transaction\" (kind, amount, description, date)
             VALUES ('transfer', 10.0, 'legacy row', '2024-01-01')",
            (),
        )
        .unwrap();

        let records = all_transactions(&conn).expect("Could not read all transactions");

        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|record| record.kind == "transfer"));
    }

    #[test]
    fn kind_round_trips_as_string() {
        assert_eq!("credit".parse(), Ok(TransactionKind::Credit));
        assert_eq!("debit".parse(), Ok(TransactionKind::Debit));
        assert!("Transfer".parse::<TransactionKind>().is_err());
        assert_eq!(TransactionKind::Credit.to_string(), "credit");
    }
}
