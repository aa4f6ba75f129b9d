use tracing::info;

use crate::errors::AppError;
use crate::models::{ForecastReport, MonthlySeries, SmoothingResult};

/// Candidate smoothing parameters scanned for every report: 0.1 through 0.9
/// in steps of 0.1. The scan order doubles as the tie-break order.
pub fn candidate_alphas() -> Vec<f64> {
    (1..=9).map(|i| i as f64 / 10.0).collect()
}

/// Fits a simple exponential smoothing model to the series.
///
/// The level starts at the first observation and updates with
/// s = alpha * y + (1 - alpha) * s, so the level carried into each period is
/// that period's one-step-ahead fitted value and the final level is the
/// forecast for the month after the series ends.
///
/// The error score is the mean squared error of the fitted values against the
/// actual observations. The first period has no prediction and is excluded,
/// leaving n-1 residuals; a single-period series has none at all and reports
/// `mse: None` instead of dividing by zero.
///
/// Only the forecast is rounded (one decimal, ties to even). The error score
/// stays at full precision so selection is never decided by display rounding.
pub fn evaluate(series: &MonthlySeries, alpha: f64) -> Result<SmoothingResult, AppError> {
    if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
        return Err(AppError::InvalidParameter(alpha));
    }
    if series.is_empty() {
        return Err(AppError::EmptySeries(series.product.clone()));
    }

    let values = series.values();
    let (fitted, level) = smooth(&values, alpha);

    let mse = if fitted.is_empty() {
        None
    } else {
        let sum: f64 = fitted
            .iter()
            .zip(&values[1..])
            .map(|(s, y)| (s - y) * (s - y))
            .sum();
        Some(sum / fitted.len() as f64)
    };

    Ok(SmoothingResult {
        alpha,
        fitted,
        forecast: round_to_tenth(level),
        mse,
    })
}

/// Runs the level recurrence over the observations. Returns the one-step-ahead
/// fitted values (the level carried into periods 1..n-1) and the final level.
///
/// `values` must be non-empty; callers validate first.
fn smooth(values: &[f64], alpha: f64) -> (Vec<f64>, f64) {
    let mut level = values[0];
    let mut fitted = Vec::with_capacity(values.len().saturating_sub(1));

    for &y in &values[1..] {
        fitted.push(level);
        level = alpha * y + (1.0 - alpha) * level;
    }

    (fitted, level)
}

/// Rounds to one decimal place with ties going to the even digit, matching how
/// the rendered table rounds for display.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Picks the result with the lowest error score.
///
/// Comparison uses the unrounded score. Ties keep the earliest candidate in
/// scan order, and a result without a scoreable error never displaces an
/// earlier one, so a degenerate series resolves to the first candidate.
pub fn select_best(results: &[SmoothingResult]) -> Result<&SmoothingResult, AppError> {
    let mut best = results.first().ok_or(AppError::EmptyResultSet)?;

    for candidate in &results[1..] {
        let better = match (candidate.mse, best.mse) {
            (Some(c), Some(b)) => c < b,
            (Some(_), None) => true,
            _ => false,
        };
        if better {
            best = candidate;
        }
    }

    Ok(best)
}

/// Builds the full report for one product: one evaluator run per candidate
/// parameter in scan order, then the best pick over the collected results.
///
/// Always recomputes from scratch; repeated calls with the same inputs return
/// identical reports.
pub fn build_report(series: MonthlySeries, alphas: &[f64]) -> Result<ForecastReport, AppError> {
    let mut results = Vec::with_capacity(alphas.len());
    for &alpha in alphas {
        results.push(evaluate(&series, alpha)?);
    }

    let best = select_best(&results)?.clone();

    info!(
        product = %series.product,
        months = series.len(),
        best_alpha = best.alpha,
        best_forecast = best.forecast,
        "forecast report built"
    );

    Ok(ForecastReport {
        series,
        results,
        best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::MonthlyPoint;

    const EPS: f64 = 1e-10;

    /// Monthly series starting January 2023 with the given totals.
    fn series_of(values: &[f64]) -> MonthlySeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &total)| MonthlyPoint {
                period: NaiveDate::from_ymd_opt(2023, 1 + i as u32, 1).unwrap(),
                total,
            })
            .collect();
        MonthlySeries {
            product: "buku".to_string(),
            points,
        }
    }

    fn result(alpha: f64, mse: Option<f64>) -> SmoothingResult {
        SmoothingResult {
            alpha,
            fitted: vec![],
            forecast: 0.0,
            mse,
        }
    }

    #[test]
    fn test_evaluate_known_scenario() {
        // Worked example: levels 100, 105, 105 feed the fitted values and the
        // forecast is 0.5 * 120 + 0.5 * 105 = 112.5.
        let series = series_of(&[100.0, 110.0, 105.0, 120.0]);
        let result = evaluate(&series, 0.5).unwrap();

        assert_eq!(result.fitted, vec![100.0, 105.0, 105.0]);
        assert!((result.forecast - 112.5).abs() < EPS);
        // mean(100, 0, 225) = 325 / 3
        assert!((result.mse.unwrap() - 325.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_fitted_count_and_residual_count() {
        for n in 2..12 {
            let values: Vec<f64> = (0..n).map(|i| 50.0 + (i as f64) * 3.0).collect();
            let series = series_of(&values);

            for &alpha in &candidate_alphas() {
                let result = evaluate(&series, alpha).unwrap();
                assert_eq!(result.fitted.len(), n - 1);

                let manual: f64 = result
                    .fitted
                    .iter()
                    .zip(&values[1..])
                    .map(|(s, y)| (s - y) * (s - y))
                    .sum::<f64>()
                    / (n - 1) as f64;
                assert!((result.mse.unwrap() - manual).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_alpha_zero_boundary_never_updates_level() {
        // Not a production candidate; sanity check of the recurrence itself.
        let values = [42.0, 100.0, 7.0, 63.0];
        let (fitted, level) = smooth(&values, 0.0);

        assert!(fitted.iter().all(|&s| s == 42.0));
        assert_eq!(level, 42.0);
    }

    #[test]
    fn test_evaluate_rejects_out_of_range_alpha() {
        let series = series_of(&[10.0, 12.0]);
        for alpha in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let err = evaluate(&series, alpha).unwrap_err();
            assert!(matches!(err, AppError::InvalidParameter(_)));
        }
    }

    #[test]
    fn test_evaluate_rejects_empty_series() {
        let series = series_of(&[]);
        let err = evaluate(&series, 0.5).unwrap_err();
        assert!(matches!(err, AppError::EmptySeries(_)));
    }

    #[test]
    fn test_degenerate_single_period() {
        let series = series_of(&[50.0]);
        let result = evaluate(&series, 0.3).unwrap();

        assert!(result.fitted.is_empty());
        assert_eq!(result.forecast, 50.0);
        assert_eq!(result.mse, None);
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        // .25 and .75 are exactly representable, so the tie is real.
        assert_eq!(round_to_tenth(4.25), 4.2);
        assert_eq!(round_to_tenth(4.75), 4.8);
        assert_eq!(round_to_tenth(-4.25), -4.2);
        assert_eq!(round_to_tenth(112.75), 112.8);
        assert_eq!(round_to_tenth(112.34), 112.3);
    }

    #[test]
    fn test_select_best_minimum_wins() {
        let results = vec![
            result(0.1, Some(12.0)),
            result(0.2, Some(3.0)),
            result(0.3, Some(9.0)),
        ];
        assert_eq!(select_best(&results).unwrap().alpha, 0.2);
    }

    #[test]
    fn test_select_best_tie_keeps_scan_order() {
        let results = vec![
            result(0.1, Some(5.0)),
            result(0.2, Some(5.0)),
            result(0.3, Some(8.0)),
        ];
        assert_eq!(select_best(&results).unwrap().alpha, 0.1);
    }

    #[test]
    fn test_select_best_compares_unrounded_error() {
        // Both round to 10.0 for display; the unrounded comparison still
        // picks the second.
        let results = vec![result(0.1, Some(10.04)), result(0.2, Some(10.01))];
        assert_eq!(select_best(&results).unwrap().alpha, 0.2);
    }

    #[test]
    fn test_select_best_all_unscored_keeps_first() {
        let results = vec![result(0.1, None), result(0.2, None)];
        assert_eq!(select_best(&results).unwrap().alpha, 0.1);
    }

    #[test]
    fn test_select_best_empty_is_error() {
        let err = select_best(&[]).unwrap_err();
        assert!(matches!(err, AppError::EmptyResultSet));
    }

    #[test]
    fn test_candidate_alphas_scan_order() {
        let alphas = candidate_alphas();
        assert_eq!(alphas.len(), 9);
        for (i, alpha) in alphas.iter().enumerate() {
            assert!((alpha - (i + 1) as f64 / 10.0).abs() < EPS);
        }
    }

    #[test]
    fn test_build_report_preserves_candidate_order() {
        let series = series_of(&[100.0, 90.0, 110.0, 95.0, 120.0]);
        let report = build_report(series, &candidate_alphas()).unwrap();

        let order: Vec<f64> = report.results.iter().map(|r| r.alpha).collect();
        assert_eq!(order, candidate_alphas());
    }

    #[test]
    fn test_build_report_is_idempotent() {
        let series = series_of(&[100.0, 90.0, 110.0, 95.0, 120.0]);
        let first = build_report(series.clone(), &candidate_alphas()).unwrap();
        let second = build_report(series, &candidate_alphas()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_build_report_best_matches_minimum() {
        let series = series_of(&[100.0, 90.0, 110.0, 95.0, 120.0]);
        let report = build_report(series, &candidate_alphas()).unwrap();

        let min = report
            .results
            .iter()
            .map(|r| r.mse.unwrap())
            .fold(f64::INFINITY, f64::min);
        assert_eq!(report.best.mse.unwrap(), min);
    }

    #[test]
    fn test_build_report_degenerate_series_still_reports() {
        let series = series_of(&[50.0]);
        let report = build_report(series, &candidate_alphas()).unwrap();

        assert_eq!(report.results.len(), 9);
        assert!(report.results.iter().all(|r| r.mse.is_none()));
        assert_eq!(report.best_alpha(), 0.1);
        assert_eq!(report.best_forecast(), 50.0);
    }
}
