//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints,
    report::{breakdown_report_endpoint, weekly_report_endpoint},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// The router carries a permissive CORS layer so browser frontends hosted
/// elsewhere can talk to the API directly.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
        .route(endpoints::WEEKLY_REPORT, get(weekly_report_endpoint))
        .route(endpoints::BREAKDOWN_REPORT, get(breakdown_report_endpoint))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
