use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use tracing::debug;

use crate::errors::AppError;
use crate::models::{MonthlyPoint, MonthlySeries, SalesRecord};

/// Groups raw transaction rows for one product into a regular monthly series.
///
/// Each matching record is keyed by the first day of its (year, month) and
/// quantities within the same month are summed. The result is then resampled
/// onto a strict monthly calendar between the earliest and latest period
/// observed for the product: months inside that span with no transactions are
/// materialized with a total of exactly 0.0. Months outside the span are
/// absent.
pub fn monthly_series(records: &[SalesRecord], product: &str) -> Result<MonthlySeries, AppError> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for record in records.iter().filter(|r| r.product == product) {
        let period = period_key(record)?;
        *totals.entry(period).or_insert(0.0) += record.quantity;
    }

    let (first, last) = match (totals.keys().next(), totals.keys().next_back()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Err(AppError::EmptySeries(product.to_string())),
    };

    let mut points = Vec::new();
    let mut period = first;
    loop {
        let total = totals.get(&period).copied().unwrap_or(0.0);
        points.push(MonthlyPoint { period, total });
        if period == last {
            break;
        }
        period = match period.checked_add_months(Months::new(1)) {
            Some(next) => next,
            // NaiveDate tops out around year 262142; nothing left to fill.
            None => break,
        };
    }

    debug!(product, months = points.len(), "aggregated monthly series");

    Ok(MonthlySeries {
        product: product.to_string(),
        points,
    })
}

fn period_key(record: &SalesRecord) -> Result<NaiveDate, AppError> {
    NaiveDate::from_ymd_opt(record.year, record.month, 1).ok_or_else(|| {
        AppError::MalformedRecord(format!(
            "year {} and month {} do not form a calendar month",
            record.year, record.month
        ))
    })
}
