use chrono::NaiveDateTime;
use contracts::domain::a001_sales_record::{OrderPriority, RawSalesRow, ReturnStatus, SalesRecord};
use contracts::usecases::u501_import_sales::ImportReport;

/// Format of `InvoiceDate`
pub const INVOICE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Largest quantity an f64 cell carries exactly (2^53)
pub const MAX_QUANTITY: f64 = 9_007_199_254_740_992.0;

/// Normalized record set with the accounting of what was dropped
#[derive(Debug, Clone, Default)]
pub struct NormalizedSales {
    pub records: Vec<SalesRecord>,
    pub report: ImportReport,
}

/// Why a row did not make it into the record set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    InvalidDate,
    NonFiniteRevenue,
    /// Fractional or out-of-range quantity
    InvalidQuantity,
}

pub fn parse_invoice_date(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), INVOICE_DATE_FORMAT).ok()
}

/// Numeric coercion of a text cell: blank is 0, garbage is NaN.
fn parse_number(value: &str) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        return 0.0;
    }
    value.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn normalize_row(row: &RawSalesRow) -> Result<SalesRecord, RowRejection> {
    let invoice_timestamp =
        parse_invoice_date(&row.invoice_date).ok_or(RowRejection::InvalidDate)?;

    let quantity = parse_number(&row.quantity);
    let unit_price = parse_number(&row.unit_price);
    let discount = parse_number(&row.discount);

    let revenue = SalesRecord::compute_revenue(quantity, unit_price, discount);
    if !revenue.is_finite() {
        return Err(RowRejection::NonFiniteRevenue);
    }
    // revenue must agree with the stored integer quantity
    if quantity.fract() != 0.0 || quantity.abs() > MAX_QUANTITY {
        return Err(RowRejection::InvalidQuantity);
    }

    // the flow view sums shipping cost, a broken cell counts as 0
    let shipping_cost = match parse_number(&row.shipping_cost) {
        v if v.is_finite() => v,
        _ => 0.0,
    };

    let customer_id = match parse_number(&row.customer_id) {
        v if v.is_finite() && !row.customer_id.trim().is_empty() => Some(v as i64),
        _ => None,
    };

    Ok(SalesRecord {
        invoice_no: row.invoice_no.trim().to_string(),
        invoice_timestamp,
        country: row.country.trim().to_string(),
        shipment_provider: row.shipment_provider.trim().to_string(),
        warehouse_location: row.warehouse_location.trim().to_string(),
        quantity: quantity as i64,
        unit_price,
        discount,
        shipping_cost,
        customer_id,
        return_status: ReturnStatus::parse(&row.return_status),
        order_priority: OrderPriority::parse(&row.order_priority),
        revenue,
    })
}

/// Parse raw rows into the typed record set.
///
/// Rows with an unparseable date, non-finite revenue or a non-integral
/// quantity are left out of the record set and counted in the report.
pub fn normalize(rows: &[RawSalesRow]) -> NormalizedSales {
    let mut records = Vec::with_capacity(rows.len());
    let mut report = ImportReport {
        total_rows: rows.len(),
        ..ImportReport::default()
    };

    for row in rows {
        match normalize_row(row) {
            Ok(record) => records.push(record),
            Err(RowRejection::InvalidDate) => report.dropped_invalid_date += 1,
            Err(RowRejection::NonFiniteRevenue) => report.dropped_non_finite_revenue += 1,
            Err(RowRejection::InvalidQuantity) => report.dropped_invalid_quantity += 1,
        }
    }
    report.accepted = records.len();

    if report.dropped() > 0 {
        tracing::warn!(
            "Dropped {} of {} rows (invalid date: {}, non-finite revenue: {}, invalid quantity: {})",
            report.dropped(),
            report.total_rows,
            report.dropped_invalid_date,
            report.dropped_non_finite_revenue,
            report.dropped_invalid_quantity
        );
    }

    NormalizedSales { records, report }
}
