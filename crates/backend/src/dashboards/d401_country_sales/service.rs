use chrono::NaiveDate;
use contracts::dashboards::d401_country_sales::{
    Choropleth, ChoroplethEntry, CountryAggregate, CountrySales, CountrySeries, TrendPoint,
};
use contracts::domain::a001_sales_record::SalesRecord;
use contracts::domain::a002_geo_boundary::BoundaryCollection;
use contracts::shared::filter::FilterState;
use std::collections::{BTreeMap, HashMap};

/// Revenue per (country, year), ordered by country then year.
pub fn aggregate_by_country_year<'a, I>(records: I) -> Vec<CountryAggregate>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut totals: BTreeMap<(String, i32), f64> = BTreeMap::new();

    for record in records {
        *totals
            .entry((record.country.clone(), record.year()))
            .or_insert(0.0) += record.revenue;
    }

    totals
        .into_iter()
        .map(|((country, year), revenue)| CountryAggregate {
            country,
            year,
            revenue,
        })
        .collect()
}

/// Single-year snapshot, highest revenue first (ties by country name).
pub fn country_ranking(aggregates: &[CountryAggregate], year: i32) -> Vec<CountryAggregate> {
    let mut ranking: Vec<CountryAggregate> = aggregates
        .iter()
        .filter(|a| a.year == year)
        .cloned()
        .collect();
    ranking.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.country.cmp(&b.country))
    });
    ranking
}

/// One trend line per country, each point positioned at January 1 of its year.
pub fn country_trend_series(aggregates: &[CountryAggregate]) -> Vec<CountrySeries> {
    let mut series: BTreeMap<&str, Vec<TrendPoint>> = BTreeMap::new();

    for aggregate in aggregates {
        let Some(date) = NaiveDate::from_ymd_opt(aggregate.year, 1, 1) else {
            continue;
        };
        series
            .entry(aggregate.country.as_str())
            .or_default()
            .push(TrendPoint {
                date,
                year: aggregate.year,
                revenue: aggregate.revenue,
            });
    }

    series
        .into_iter()
        .map(|(country, mut points)| {
            points.sort_by_key(|p| p.year);
            CountrySeries {
                country: country.to_string(),
                points,
            }
        })
        .collect()
}

/// Units sold per country for the map.
///
/// Provider and year apply; the country selection does not, since the map
/// always shows every country.
pub fn sales_quantity_by_country(records: &[SalesRecord], filter: &FilterState) -> Vec<CountrySales> {
    let mut totals: BTreeMap<&str, i64> = BTreeMap::new();

    for record in records.iter().filter(|r| {
        filter.provider.matches(&r.shipment_provider) && filter.year.matches(r.year())
    }) {
        let total = totals.entry(record.country.as_str()).or_insert(0);
        *total = total.saturating_add(record.quantity);
    }

    totals
        .into_iter()
        .map(|(country, quantity)| CountrySales {
            country: country.to_string(),
            quantity,
        })
        .collect()
}

/// Join sales onto boundary features by name, zero-filling the rest.
pub fn choropleth(boundaries: &BoundaryCollection, sales: &[CountrySales]) -> Choropleth {
    let by_country: HashMap<&str, i64> = sales
        .iter()
        .map(|s| (s.country.as_str(), s.quantity))
        .collect();

    let entries: Vec<ChoroplethEntry> = boundaries
        .names()
        .map(|name| ChoroplethEntry {
            name: name.to_string(),
            filtered_sales: by_country.get(name).copied().unwrap_or(0),
        })
        .collect();

    let positive = entries.iter().map(|e| e.filtered_sales).filter(|v| *v > 0);
    let domain_min = positive.clone().min().unwrap_or(0);
    let domain_max = positive.max().unwrap_or(1);

    Choropleth {
        entries,
        domain_min,
        domain_max,
    }
}
