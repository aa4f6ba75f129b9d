mod errors;
mod logging;
mod models;
mod render;
mod services;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::models::{ForecastReport, SalesRecord};
use crate::services::{aggregation_service, csv_import_service, forecasting_service};

const DEFAULT_DATASET: &str = "dataset.csv";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging(logging::LoggingConfig::from_env())?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let path = resolve_dataset_path(&mut input)?;
    tracing::info!("📈 Loading sales data from {}", path.display());

    let import = csv_import_service::load_records(&path)?;
    for error in &import.errors {
        tracing::warn!("rejected row: {error}");
    }
    if import.records.is_empty() {
        return Err(format!("no usable rows in {}", path.display()).into());
    }
    tracing::info!(
        rows = import.records.len(),
        products = import.products.len(),
        "import finished"
    );

    run_menu(&mut input, &import.records, &import.products);

    Ok(())
}

/// Uses `dataset.csv` from the working directory when present, otherwise asks
/// for a path. There are deliberately no CLI flags.
fn resolve_dataset_path(input: &mut impl BufRead) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let default = PathBuf::from(DEFAULT_DATASET);
    if default.exists() {
        return Ok(default);
    }

    print!("No {DEFAULT_DATASET} in the working directory. CSV path: ");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let path = PathBuf::from(line.trim());
    if path.as_os_str().is_empty() || !path.exists() {
        return Err(format!("no dataset file at '{}'", path.display()).into());
    }

    Ok(path)
}

/// Interactive product loop. This holds the only mutable presentation state:
/// the last successfully computed report, which stays on screen when a
/// recompute fails.
fn run_menu(input: &mut impl BufRead, records: &[SalesRecord], products: &[String]) {
    let mut last_report: Option<ForecastReport> = None;

    // The first product renders immediately, mirroring a default selection.
    if let Some(first) = products.first() {
        select_product(records, first, &mut last_report);
    }

    loop {
        render::render_product_menu(products);
        print!("Select product (number or name, blank = first, q = quit): ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let choice = line.trim();
        if choice.eq_ignore_ascii_case("q") {
            break;
        }

        match resolve_choice(products, choice) {
            Some(product) => select_product(records, &product, &mut last_report),
            None => tracing::error!("unknown product '{choice}'"),
        }
    }
}

fn select_product(
    records: &[SalesRecord],
    product: &str,
    last_report: &mut Option<ForecastReport>,
) {
    let outcome = aggregation_service::monthly_series(records, product).and_then(|series| {
        forecasting_service::build_report(series, &forecasting_service::candidate_alphas())
    });

    match outcome {
        Ok(report) => {
            render::render_report(&report);
            *last_report = Some(report);
        }
        Err(e) => {
            tracing::error!("forecast for '{product}' failed: {e}");
            if let Some(previous) = last_report {
                println!(
                    "(previous report for '{}' left on screen)",
                    previous.series.product
                );
            }
        }
    }
}

fn resolve_choice(products: &[String], choice: &str) -> Option<String> {
    if choice.is_empty() {
        return products.first().cloned();
    }
    if let Ok(index) = choice.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| products.get(i)).cloned();
    }
    products.iter().find(|p| p.as_str() == choice).cloned()
}
