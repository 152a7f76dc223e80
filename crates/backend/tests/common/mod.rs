#![allow(dead_code)]

use chrono::NaiveDateTime;
use contracts::domain::a001_sales_record::{OrderPriority, ReturnStatus, SalesRecord};
use proptest::prelude::*;

pub const HEADER: &str = "InvoiceNo,InvoiceDate,Quantity,UnitPrice,Discount,ShippingCost,CustomerID,Country,ReturnStatus,ShipmentProvider,WarehouseLocation,OrderPriority";

/// Small CSV with one row of each kind the normalizer can reject
pub fn sample_csv() -> String {
    [
        HEADER,
        "1001,2023-01-15 09:30,2,10.00,0.10,5.00,17001.0,France,Not Returned,DHL,London,High",
        "1002,2023-07-04 18:05,1,40.00,0.00,7.50,17002.0,Spain,Returned,UPS,Berlin,Low",
        "1003,2024-02-29 12:00,3,5.00,0.20,2.00,,France,Not Returned,DHL,London,Medium",
        "1004,2024-11-30 23:59,4,2.50,0.00,1.00,17004.0,United States,Not Returned,FedEx,Rome,High",
        "1005,not-a-date,1,1.00,0.00,1.00,17005.0,France,Not Returned,DHL,London,High",
        "1006,2024-03-01 08:00,abc,1.00,0.00,1.00,17006.0,France,Not Returned,DHL,London,High",
    ]
    .join("\n")
}

pub const WORLD_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "id": "FRA", "properties": {"name": "France"}, "geometry": null},
    {"type": "Feature", "id": "ESP", "properties": {"name": "Spain"}, "geometry": null},
    {"type": "Feature", "id": "USA", "properties": {"name": "USA"}, "geometry": null},
    {"type": "Feature", "id": "PER", "properties": {"name": "Peru"}, "geometry": null}
  ]
}"#;

pub fn record(ts: &str, country: &str, provider: &str, quantity: i64, price: f64) -> SalesRecord {
    let ts = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M").unwrap();
    SalesRecord::new(ts, country, provider, quantity, price, 0.0)
}

fn return_status() -> impl Strategy<Value = ReturnStatus> {
    prop_oneof![
        Just(ReturnStatus::Returned),
        Just(ReturnStatus::NotReturned),
        Just(ReturnStatus::Unknown),
    ]
}

fn order_priority() -> impl Strategy<Value = OrderPriority> {
    prop_oneof![
        Just(OrderPriority::High),
        Just(OrderPriority::Medium),
        Just(OrderPriority::Low),
        Just(OrderPriority::Unknown),
    ]
}

fn timestamp() -> impl Strategy<Value = NaiveDateTime> {
    // 2020-01-01 .. 2025-12-31, minute resolution
    (0i64..(6 * 366 * 24 * 60)).prop_filter_map("out of range", |minutes| {
        let start = NaiveDateTime::parse_from_str("2020-01-01 00:00", "%Y-%m-%d %H:%M").ok()?;
        let ts = start + chrono::Duration::minutes(minutes);
        (chrono::Datelike::year(&ts) <= 2025).then_some(ts)
    })
}

/// Records over a handful of names so that groups collide
pub fn sales_record() -> impl Strategy<Value = SalesRecord> {
    (
        timestamp(),
        prop_oneof![Just("France"), Just("Spain"), Just("Peru"), Just("")],
        prop_oneof![Just("DHL"), Just("UPS"), Just("FedEx")],
        prop_oneof![Just("London"), Just("Berlin"), Just("Rome"), Just("")],
        -5i64..50,
        0u32..10_000,
        0u32..100,
        0u32..5_000,
        return_status(),
        order_priority(),
    )
        .prop_map(
            |(ts, country, provider, warehouse, qty, cents, disc, ship, status, priority)| {
                SalesRecord::new(
                    ts,
                    country,
                    provider,
                    qty,
                    cents as f64 / 100.0,
                    disc as f64 / 100.0,
                )
                .with_warehouse(warehouse)
                .with_shipping_cost(ship as f64 / 100.0)
                .with_return_status(status)
                .with_order_priority(priority)
            },
        )
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}

/// Shipments whose names repeat across stages, so bare-name nodes collide
/// and a warehouse named like its provider yields a self-loop
pub fn colliding_shipment() -> impl Strategy<Value = SalesRecord> {
    (
        timestamp(),
        prop_oneof![Just("Georgia"), Just("DHL"), Just("London")],
        prop_oneof![Just("DHL"), Just("UPS")],
        prop_oneof![Just("Georgia"), Just("France"), Just("UPS")],
        0u32..5_000,
        return_status(),
        order_priority(),
    )
        .prop_map(|(ts, warehouse, provider, country, ship, status, priority)| {
            SalesRecord::new(ts, country, provider, 1, 1.0, 0.0)
                .with_warehouse(warehouse)
                .with_shipping_cost(ship as f64 / 100.0)
                .with_return_status(status)
                .with_order_priority(priority)
        })
}
