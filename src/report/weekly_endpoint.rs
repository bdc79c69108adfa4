//! The route handler for the weekly report.

use axum::{Json, extract::State};

use crate::{AppState, Error, transaction::all_transactions};

use super::engine::{WeeklyAggregate, weekly_report};

/// A route handler for the weekly credit/debit/balance report.
///
/// Reads a snapshot of every transaction and returns one row per populated
/// week, sorted ascending by week-start date.
pub async fn weekly_report_endpoint(
    State(state): State<AppState>,
) -> Result<Json<Vec<WeeklyAggregate>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLock)?;
    let records = all_transactions(&connection)?;

    Ok(Json(weekly_report(&records)))
}
