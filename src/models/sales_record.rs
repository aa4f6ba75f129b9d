use serde::{Deserialize, Serialize};

// Represents one raw transaction row: sales of a product in a calendar month.
// Immutable once loaded; everything downstream is derived from these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    pub year: i32,
    pub month: u32,
    pub product: String,
    pub quantity: f64,
}

impl SalesRecord {
    pub fn new(year: i32, month: u32, product: impl Into<String>, quantity: f64) -> Self {
        Self {
            year,
            month,
            product: product.into(),
            quantity,
        }
    }
}
