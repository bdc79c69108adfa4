//! The route handler for listing transactions with skip/limit paging.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{AppState, Error};

use super::core::{Transaction, list_transactions};

fn default_limit() -> u32 {
    100
}

/// The query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// How many transactions to skip from the start of the stable order.
    #[serde(default)]
    skip: u32,
    /// The maximum number of transactions to return.
    #[serde(default = "default_limit")]
    limit: u32,
}

/// A route handler for listing transactions.
///
/// Transactions are returned in a stable order (date ascending, then ID
/// ascending), after applying the `skip` offset and the `limit` cap
/// (defaults: skip 0, limit 100).
pub async fn list_transactions_endpoint(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;
    let transactions = list_transactions(query.skip, query.limit, &connection)?;

    Ok(Json(transactions))
}

#[cfg(test)]
mod list_endpoint_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        AppState, build_router, endpoints,
        transaction::{NewTransaction, Transaction, TransactionKind, create_transaction},
    };

    fn new_test_server_with_transactions(count: u32) -> TestServer {
        let conn = Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(conn).expect("Could not create app state.");

        {
            let connection = state.db_connection.lock().unwrap();
            for i in 0..count {
                create_transaction(
                    NewTransaction {
                        kind: TransactionKind::Debit,
                        amount: i as f64,
                        description: format!("transaction #{i}"),
                        date: date!(2024 - 01 - 01),
                    },
                    &connection,
                )
                .expect("Could not create transaction");
            }
        }

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn list_returns_all_with_defaults() {
        let server = new_test_server_with_transactions(5);

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_ok();
        let transactions: Vec<Transaction> = response.json();
        assert_eq!(transactions.len(), 5);
    }

    #[tokio::test]
    async fn list_applies_skip_and_limit() {
        let server = new_test_server_with_transactions(10);

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("skip", 2)
            .add_query_param("limit", 3)
            .await;

        response.assert_status_ok();
        let transactions: Vec<Transaction> = response.json();
        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions[0].amount, 2.0);
    }

    #[tokio::test]
    async fn list_caps_at_default_limit() {
        let server = new_test_server_with_transactions(105);

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_ok();
        let transactions: Vec<Transaction> = response.json();
        assert_eq!(transactions.len(), 100);
    }
}
