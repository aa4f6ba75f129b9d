use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::warn;

use crate::models::SalesRecord;

// Raw CSV row as it appears in the source file; the column names follow the
// upstream dataset.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "tahun")]
    year: i32,
    #[serde(rename = "bulan")]
    month: u32,
    #[serde(rename = "barang")]
    product: String,
    #[serde(rename = "penjualan")]
    quantity: f64,
}

#[derive(Debug)]
pub struct ImportResult {
    pub records: Vec<SalesRecord>,
    /// Distinct product identifiers in first-appearance order.
    pub products: Vec<String>,
    /// One message per rejected row, keyed by CSV line number.
    pub errors: Vec<String>,
}

pub fn load_records(path: &Path) -> Result<ImportResult> {
    let file_content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;

    Ok(read_records(file_content.as_bytes()))
}

/// Reads transaction rows, rejecting malformed ones with a line-numbered
/// message instead of coercing them. Rows for the same product and month are
/// all kept; summing happens during aggregation.
pub fn read_records<R: Read>(reader: R) -> ImportResult {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut records = Vec::new();
    let mut products: Vec<String> = Vec::new();
    let mut errors = Vec::new();

    for (line_num, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        match result.map_err(anyhow::Error::from).and_then(validate_row) {
            Ok(record) => {
                if !products.iter().any(|p| p == &record.product) {
                    products.push(record.product.clone());
                }
                records.push(record);
            }
            Err(e) => {
                errors.push(format!("Line {}: {}", line_num + 2, e));
            }
        }
    }

    if !errors.is_empty() {
        warn!(rejected = errors.len(), "some rows were rejected during import");
    }

    ImportResult {
        records,
        products,
        errors,
    }
}

fn validate_row(row: CsvRow) -> Result<SalesRecord> {
    if !(1..=12).contains(&row.month) {
        anyhow::bail!("month {} is outside 1-12", row.month);
    }
    if !row.quantity.is_finite() {
        anyhow::bail!("quantity {} is not a finite number", row.quantity);
    }

    Ok(SalesRecord::new(row.year, row.month, row.product, row.quantity))
}
