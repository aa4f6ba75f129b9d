use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{ForecastReport, SmoothingResult};

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Alpha")]
    alpha: String,
    #[tabled(rename = "Prediction")]
    prediction: String,
    #[tabled(rename = "MSE")]
    mse: String,
}

impl From<&SmoothingResult> for ResultRow {
    fn from(result: &SmoothingResult) -> Self {
        Self {
            alpha: format!("{:.1}", result.alpha),
            prediction: format!("{:.1}", result.forecast),
            // Error scores are kept at full precision internally and only
            // rounded here, for display.
            mse: match result.mse {
                Some(mse) => format!("{mse:.1}"),
                None => "n/a".to_string(),
            },
        }
    }
}

pub fn render_product_menu(products: &[String]) {
    println!("\nAvailable products:");
    for (i, product) in products.iter().enumerate() {
        println!("  {}. {}", i + 1, product);
    }
}

/// Prints everything a product selection produces: the actual monthly series
/// with the single extrapolated next-period point, and the per-parameter
/// result table.
pub fn render_report(report: &ForecastReport) {
    println!("\nMonthly sales for '{}':", report.series.product);
    for point in &report.series.points {
        println!("  {}  {:>10.1}", point.period.format("%Y-%m"), point.total);
    }
    if let Some(next) = report.series.next_period() {
        println!(
            "  {}  {:>10.1}  (forecast, alpha {:.1})",
            next.format("%Y-%m"),
            report.best_forecast(),
            report.best_alpha()
        );
    }

    let rows: Vec<ResultRow> = report.results.iter().map(ResultRow::from).collect();
    println!("\n{}", Table::new(rows).with(Style::rounded()));

    println!(
        "Best parameter: alpha {:.1}, next-month prediction {:.1}\n",
        report.best_alpha(),
        report.best_forecast()
    );
}
