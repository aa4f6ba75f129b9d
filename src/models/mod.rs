mod forecast;
mod monthly_series;
mod sales_record;

pub use forecast::{ForecastReport, SmoothingResult};
pub use monthly_series::{MonthlyPoint, MonthlySeries};
pub use sales_record::SalesRecord;
