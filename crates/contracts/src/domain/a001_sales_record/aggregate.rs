use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Строка CSV в исходном виде, все поля как текст
///
/// Missing columns deserialize to empty strings, so a short header never
/// fails the whole file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSalesRow {
    #[serde(rename = "InvoiceNo")]
    pub invoice_no: String,
    #[serde(rename = "InvoiceDate")]
    pub invoice_date: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "ShipmentProvider")]
    pub shipment_provider: String,
    #[serde(rename = "WarehouseLocation")]
    pub warehouse_location: String,
    #[serde(rename = "Quantity")]
    pub quantity: String,
    #[serde(rename = "UnitPrice")]
    pub unit_price: String,
    #[serde(rename = "Discount")]
    pub discount: String,
    #[serde(rename = "ShippingCost")]
    pub shipping_cost: String,
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    #[serde(rename = "ReturnStatus")]
    pub return_status: String,
    #[serde(rename = "OrderPriority")]
    pub order_priority: String,
}

/// Статус возврата заказа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReturnStatus {
    Returned,
    #[serde(rename = "Not Returned")]
    NotReturned,
    #[default]
    Unknown,
}

impl ReturnStatus {
    /// Blank or unrecognised values map to `Unknown`.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("returned") {
            ReturnStatus::Returned
        } else if value.eq_ignore_ascii_case("not returned") {
            ReturnStatus::NotReturned
        } else {
            ReturnStatus::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnStatus::Returned => "Returned",
            ReturnStatus::NotReturned => "Not Returned",
            ReturnStatus::Unknown => "Unknown",
        }
    }
}

/// Приоритет заказа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderPriority {
    High,
    Medium,
    Low,
    #[default]
    Unknown,
}

impl OrderPriority {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => OrderPriority::High,
            "medium" => OrderPriority::Medium,
            "low" => OrderPriority::Low,
            _ => OrderPriority::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderPriority::High => "High",
            OrderPriority::Medium => "Medium",
            OrderPriority::Low => "Low",
            OrderPriority::Unknown => "Unknown",
        }
    }
}

/// Нормализованная строка продаж
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "invoiceNo")]
    pub invoice_no: String,

    /// Момент выставления счёта (без часового пояса)
    #[serde(rename = "invoiceTimestamp")]
    pub invoice_timestamp: NaiveDateTime,

    pub country: String,

    #[serde(rename = "shipmentProvider")]
    pub shipment_provider: String,

    #[serde(rename = "warehouseLocation")]
    pub warehouse_location: String,

    pub quantity: i64,

    #[serde(rename = "unitPrice")]
    pub unit_price: f64,

    /// Fraction in `[0, 1]`
    pub discount: f64,

    #[serde(rename = "shippingCost")]
    pub shipping_cost: f64,

    #[serde(rename = "customerId")]
    pub customer_id: Option<i64>,

    #[serde(rename = "returnStatus")]
    pub return_status: ReturnStatus,

    #[serde(rename = "orderPriority")]
    pub order_priority: OrderPriority,

    /// quantity × unit_price × (1 − discount)
    pub revenue: f64,
}

impl SalesRecord {
    /// Build a record with revenue derived from quantity, price and discount.
    /// Logistics fields start empty and categorical fields start `Unknown`.
    pub fn new(
        invoice_timestamp: NaiveDateTime,
        country: impl Into<String>,
        shipment_provider: impl Into<String>,
        quantity: i64,
        unit_price: f64,
        discount: f64,
    ) -> Self {
        Self {
            invoice_no: String::new(),
            invoice_timestamp,
            country: country.into(),
            shipment_provider: shipment_provider.into(),
            warehouse_location: String::new(),
            quantity,
            unit_price,
            discount,
            shipping_cost: 0.0,
            customer_id: None,
            return_status: ReturnStatus::Unknown,
            order_priority: OrderPriority::Unknown,
            revenue: Self::compute_revenue(quantity as f64, unit_price, discount),
        }
    }

    pub fn with_warehouse(mut self, warehouse_location: impl Into<String>) -> Self {
        self.warehouse_location = warehouse_location.into();
        self
    }

    pub fn with_shipping_cost(mut self, shipping_cost: f64) -> Self {
        self.shipping_cost = shipping_cost;
        self
    }

    pub fn with_return_status(mut self, return_status: ReturnStatus) -> Self {
        self.return_status = return_status;
        self
    }

    pub fn with_order_priority(mut self, order_priority: OrderPriority) -> Self {
        self.order_priority = order_priority;
        self
    }

    pub fn compute_revenue(quantity: f64, unit_price: f64, discount: f64) -> f64 {
        quantity * unit_price * (1.0 - discount)
    }

    pub fn year(&self) -> i32 {
        self.invoice_timestamp.year()
    }

    pub fn date(&self) -> NaiveDate {
        self.invoice_timestamp.date()
    }

    pub fn hour(&self) -> u32 {
        self.invoice_timestamp.hour()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_revenue_is_derived() {
        let record = SalesRecord::new(ts("2024-03-01 10:15"), "France", "DHL", 4, 2.5, 0.2);
        assert!((record.revenue - 8.0).abs() < 1e-9);
        assert_eq!(record.year(), 2024);
        assert_eq!(record.hour(), 10);
    }

    #[test]
    fn test_full_discount_is_zero_revenue() {
        let record = SalesRecord::new(ts("2024-03-01 10:15"), "France", "DHL", 3, 9.99, 1.0);
        assert_eq!(record.revenue, 0.0);
    }

    #[test]
    fn test_categorical_parsing() {
        assert_eq!(ReturnStatus::parse("Returned"), ReturnStatus::Returned);
        assert_eq!(ReturnStatus::parse(" not returned "), ReturnStatus::NotReturned);
        assert_eq!(ReturnStatus::parse(""), ReturnStatus::Unknown);
        assert_eq!(OrderPriority::parse("HIGH"), OrderPriority::High);
        assert_eq!(OrderPriority::parse("Urgent"), OrderPriority::Unknown);
    }

    #[test]
    fn test_return_status_serde_name() {
        let json = serde_json::to_string(&ReturnStatus::NotReturned).unwrap();
        assert_eq!(json, "\"Not Returned\"");
    }
}
