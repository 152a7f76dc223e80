use serde::{Deserialize, Serialize};

/// Итог нормализации: сколько строк принято и почему отброшены остальные
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Rows seen, malformed ones included
    pub total_rows: usize,
    pub accepted: usize,
    /// `InvoiceDate` missing or not `YYYY-MM-DD HH:MM`
    pub dropped_invalid_date: usize,
    /// Revenue came out NaN or infinite
    pub dropped_non_finite_revenue: usize,
    /// `Quantity` fractional or beyond the exactly representable range
    #[serde(default)]
    pub dropped_invalid_quantity: usize,
    /// CSV records the reader could not decode at all
    pub malformed_rows: usize,
}

impl ImportReport {
    pub fn dropped(&self) -> usize {
        self.dropped_invalid_date
            + self.dropped_non_finite_revenue
            + self.dropped_invalid_quantity
            + self.malformed_rows
    }
}
