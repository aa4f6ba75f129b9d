use serde::{Deserialize, Serialize};

use crate::models::MonthlySeries;

/// Outcome of fitting one smoothing parameter to a monthly series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothingResult {
    pub alpha: f64,
    /// One-step-ahead fitted values for periods 1..n-1. The first period has
    /// no prediction, so a series of n months yields n-1 fitted values.
    pub fitted: Vec<f64>,
    /// Next-period forecast, rounded to one decimal place.
    pub forecast: f64,
    /// In-sample mean squared error over the fitted values, full precision.
    /// `None` for a single-period series, which has nothing to score.
    pub mse: Option<f64>,
}

/// Complete forecast for one product selection: the aggregated series, one
/// result per candidate parameter in scan order, and the winning result.
///
/// Rebuilt wholesale on every product change; nothing is cached between
/// invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub series: MonthlySeries,
    pub results: Vec<SmoothingResult>,
    pub best: SmoothingResult,
}

impl ForecastReport {
    pub fn best_alpha(&self) -> f64 {
        self.best.alpha
    }

    pub fn best_forecast(&self) -> f64 {
        self.best.forecast
    }
}
