use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_sales_record::SalesRecord;

/// What to do with Feb 29 records when the reference year has no Feb 29
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeapDayPolicy {
    #[default]
    FoldIntoFeb28,
    Drop,
}

/// Calendar heatmap settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarPolicy {
    /// Year whose days lay out the "all years" view
    #[serde(default = "default_reference_year")]
    pub reference_year: i32,
    /// Negative revenue is data-entry noise in the heatmap
    #[serde(default = "default_exclude_negative")]
    pub exclude_negative_revenue: bool,
    #[serde(default)]
    pub leap_day: LeapDayPolicy,
}

fn default_reference_year() -> i32 {
    2025
}

fn default_exclude_negative() -> bool {
    true
}

impl Default for CalendarPolicy {
    fn default() -> Self {
        Self {
            reference_year: default_reference_year(),
            exclude_negative_revenue: default_exclude_negative(),
            leap_day: LeapDayPolicy::default(),
        }
    }
}

/// Group key of a calendar cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarKey {
    /// Exact day of one year
    Date { date: NaiveDate },
    /// Month and day, year ignored
    MonthDay { month: u32, day: u32 },
}

/// Revenue of one calendar cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDayAggregate {
    pub key: CalendarKey,
    /// Layout date; equals the key date, or the reference-year date in aggregate mode
    pub date: NaiveDate,
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
    #[serde(rename = "orderCount")]
    pub order_count: usize,
    /// Contributing records in input order
    #[serde(rename = "detailRecords")]
    pub detail_records: Vec<SalesRecord>,
    /// Sum over several years rather than one day of one year
    #[serde(rename = "isAggregate")]
    pub is_aggregate: bool,
}

/// Revenue of one hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyBin {
    pub hour: u32,
    pub revenue: f64,
}

/// Grid position of a day: Monday-based week of year and weekday (Mon = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub week: u32,
    pub weekday: u32,
}
