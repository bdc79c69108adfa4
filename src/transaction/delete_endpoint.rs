//! The route handler for deleting a transaction by its ID.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{AppState, Error};

use super::core::{TransactionId, delete_transaction};

/// A route handler for deleting a transaction.
///
/// Responds with a confirmation message on success, or a 404 response with a
/// `{"detail": ...}` body when no transaction has the given ID. Deletion is
/// permanent.
pub async fn delete_transaction_endpoint(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Value>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;

    match delete_transaction(transaction_id, &connection)? {
        0 => Err(Error::NotFound),
        _ => {
            tracing::debug!("deleted transaction {transaction_id}");
            Ok(Json(json!({ "message": "Transaction deleted successfully" })))
        }
    }
}
