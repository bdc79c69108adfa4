//! Reporting over the transaction ledger.
//!
//! This module contains the aggregation core and its route handlers:
//! - Week bucketing with a Monday-start convention
//! - Description-to-category normalization
//! - The pure weekly and breakdown report computations

mod breakdown_endpoint;
mod category;
mod engine;
mod week;
mod weekly_endpoint;

pub use breakdown_endpoint::breakdown_report_endpoint;
pub use engine::{CategoryAggregate, WeeklyAggregate};
pub use weekly_endpoint::weekly_report_endpoint;
