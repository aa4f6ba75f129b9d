use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Aggregated sales for one calendar month, keyed by the first day of the month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub period: NaiveDate,
    pub total: f64,
}

/// Regular monthly sales series for a single product.
///
/// Periods are unique and strictly ascending, one entry per calendar month
/// between the earliest and latest month observed for the product. Months
/// inside that span with no transactions carry a total of exactly 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub product: String,
    pub points: Vec<MonthlyPoint>,
}

impl MonthlySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Totals in period order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total).collect()
    }

    pub fn last_period(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.period)
    }

    /// The calendar month right after the series ends, i.e. the month the
    /// one-step-ahead forecast applies to.
    pub fn next_period(&self) -> Option<NaiveDate> {
        self.last_period()
            .and_then(|d| d.checked_add_months(Months::new(1)))
    }
}
