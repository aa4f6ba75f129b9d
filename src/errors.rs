use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("No sales data for product '{0}'")]
    EmptySeries(String),
    #[error("Smoothing parameter {0} is outside the open interval (0, 1)")]
    InvalidParameter(f64),
    #[error("No smoothing results to select from")]
    EmptyResultSet,
}
