use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Revenue of one country in one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryAggregate {
    pub country: String,
    pub year: i32,
    pub revenue: f64,
}

/// Units sold per country (feeds the choropleth colour)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySales {
    pub country: String,
    pub quantity: i64,
}

/// One boundary feature joined with its sales; unmatched names carry 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoroplethEntry {
    pub name: String,
    #[serde(rename = "filteredSales")]
    pub filtered_sales: i64,
}

/// Joined map data plus the colour-scale domain.
///
/// The domain spans the strictly positive values only; with none it is `0..1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choropleth {
    pub entries: Vec<ChoroplethEntry>,
    #[serde(rename = "domainMin")]
    pub domain_min: i64,
    #[serde(rename = "domainMax")]
    pub domain_max: i64,
}

/// Point of a multi-year trend line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// January 1 of `year`, used as the time-axis position
    pub date: NaiveDate,
    pub year: i32,
    pub revenue: f64,
}

/// One polyline per country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySeries {
    pub country: String,
    pub points: Vec<TrendPoint>,
}
