use contracts::domain::a001_sales_record::RawSalesRow;
use std::io::Read;

use super::executor::{normalize, NormalizedSales};
use crate::shared::error::Result;

/// Decoded CSV rows and the number of records the reader had to skip
#[derive(Debug, Clone, Default)]
pub struct CsvRows {
    pub rows: Vec<RawSalesRow>,
    pub malformed: usize,
}

/// Read the sales CSV (header row required).
///
/// A missing or unreadable header fails the whole file; a broken record is
/// skipped with a warning.
pub fn read_sales_rows<R: Read>(reader: R) -> Result<CsvRows> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    tracing::debug!(
        "Sales CSV headers: {:?}",
        headers.iter().collect::<Vec<_>>()
    );

    let mut out = CsvRows::default();
    for result in reader.deserialize::<RawSalesRow>() {
        match result {
            Ok(row) => out.rows.push(row),
            Err(e) => {
                tracing::warn!("Skipping malformed CSV record: {}", e);
                out.malformed += 1;
            }
        }
    }

    Ok(out)
}

pub fn parse_sales_csv(text: &str) -> Result<CsvRows> {
    // Strip UTF-8 BOM if present
    let text = text.trim_start_matches('\u{FEFF}');
    read_sales_rows(text.as_bytes())
}

/// CSV text -> normalized record set, malformed records included in the report.
pub fn import_sales_csv(text: &str) -> Result<NormalizedSales> {
    let csv_rows = parse_sales_csv(text)?;
    let mut normalized = normalize(&csv_rows.rows);
    normalized.report.malformed_rows = csv_rows.malformed;
    normalized.report.total_rows += csv_rows.malformed;

    tracing::info!(
        "Imported {} sales records ({} dropped)",
        normalized.report.accepted,
        normalized.report.dropped()
    );

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{FEFF}InvoiceNo,InvoiceDate,Quantity,UnitPrice,Discount,ShippingCost,CustomerID,Country,ReturnStatus,ShipmentProvider,WarehouseLocation,OrderPriority\n\
221958,2020-01-01 00:00,38,1.71,0.47,10.79,37039.0,Australia,Not Returned,UPS,London,Medium\n\
771155,2020-01-01 01:00,18,41.25,0.19,9.51,19144.0,Spain,Not Returned,UPS,Rome,Medium\n\
231932,bad-date,49,29.11,0.35,23.03,50472.0,Australia,Returned,UPS,Berlin,High\n";

    #[test]
    fn test_import_sample() {
        let normalized = import_sales_csv(SAMPLE).unwrap();
        assert_eq!(normalized.report.total_rows, 3);
        assert_eq!(normalized.report.accepted, 2);
        assert_eq!(normalized.report.dropped_invalid_date, 1);

        let first = &normalized.records[0];
        assert_eq!(first.invoice_no, "221958");
        assert_eq!(first.country, "Australia");
        assert_eq!(first.warehouse_location, "London");
        assert_eq!(first.customer_id, Some(37039));
        assert!((first.revenue - 38.0 * 1.71 * 0.53).abs() < 1e-9);
    }

    #[test]
    fn test_missing_columns_default_to_blank() {
        let text = "InvoiceDate,Quantity,UnitPrice,Country\n2023-07-04 12:00,2,5,Peru\n";
        let normalized = import_sales_csv(text).unwrap();
        assert_eq!(normalized.records.len(), 1);
        let record = &normalized.records[0];
        assert_eq!(record.revenue, 10.0);
        assert_eq!(record.shipment_provider, "");
    }
}
