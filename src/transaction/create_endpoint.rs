//! The route handler for creating a transaction from a JSON request body.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{AppState, Error};

use super::core::{NewTransaction, Transaction, TransactionKind, create_transaction};

/// The request body for creating a transaction.
///
/// The transaction type is taken as a free string so that an unknown type is
/// reported as a validation error rather than a generic deserialization
/// failure.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// The transaction type, "credit" or "debit".
    #[serde(rename = "type")]
    kind: Option<String>,
    /// The transaction amount. Must be a non-negative number.
    amount: Option<f64>,
    /// What the transaction was for.
    description: Option<String>,
    /// The day the transaction happened, defaults to today (UTC).
    #[serde(default)]
    date: Option<Date>,
}

/// A route handler for creating a new transaction.
///
/// Responds with the created transaction as JSON, or a 400 response with an
/// `{"error": ...}` body when the request is not a valid transaction.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<Json<Transaction>, Error> {
    let Json(request) = payload.map_err(|rejection| Error::Validation(rejection.body_text()))?;
    let new_transaction = validate(request)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;
    let transaction = create_transaction(new_transaction, &connection)?;

    tracing::debug!(
        "created {} transaction {} for {}",
        transaction.kind,
        transaction.id,
        transaction.amount
    );

    Ok(Json(transaction))
}

fn validate(request: CreateTransactionRequest) -> Result<NewTransaction, Error> {
    let kind = request
        .kind
        .ok_or_else(|| Error::Validation("type is required".to_owned()))?
        .parse::<TransactionKind>()
        .map_err(Error::Validation)?;

    let amount = request
        .amount
        .ok_or_else(|| Error::Validation("amount is required".to_owned()))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::Validation(
            "amount must be a non-negative number".to_owned(),
        ));
    }

    let description = request
        .description
        .ok_or_else(|| Error::Validation("description is required".to_owned()))?;

    let date = request
        .date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    Ok(NewTransaction {
        kind,
        amount,
        description,
        date,
    })
}
