//! Forecasting pipeline, leaves first: CSV import delivers raw records,
//! aggregation turns them into one regular monthly series per product, and
//! the forecasting service fits the smoothing candidates and picks a winner.

pub mod aggregation_service;
pub mod csv_import_service;
pub mod forecasting_service;
