//! The route handler for the category breakdown report.

use axum::{Json, extract::State};

use crate::{AppState, Error, transaction::all_transactions};

use super::engine::{CategoryAggregate, breakdown_report};

/// A route handler for the per-category breakdown report.
///
/// Reads a snapshot of every transaction and returns one row per populated
/// `(type, category)` pair.
pub async fn breakdown_report_endpoint(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryAggregate>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;
    let records = all_transactions(&connection)?;

    Ok(Json(breakdown_report(&records)))
}
