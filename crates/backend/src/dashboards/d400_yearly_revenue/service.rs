use contracts::dashboards::d400_yearly_revenue::YearlyAggregate;
use contracts::domain::a001_sales_record::SalesRecord;
use contracts::shared::filter::FilterState;
use std::collections::BTreeMap;

/// Revenue per year for the provider / country in `filter`.
///
/// The year selection is ignored: the bar chart always shows every year and
/// only highlights the selected one. Output is ascending by year, one entry
/// per year present.
pub fn aggregate_by_year(records: &[SalesRecord], filter: &FilterState) -> Vec<YearlyAggregate> {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();

    for record in records.iter().filter(|r| filter.matches_scope(r)) {
        *by_year.entry(record.year()).or_insert(0.0) += record.revenue;
    }

    tracing::debug!(
        "aggregate_by_year: {} records -> {} years (provider={}, country={})",
        records.len(),
        by_year.len(),
        filter.provider,
        filter.country
    );

    by_year
        .into_iter()
        .map(|(year, revenue)| YearlyAggregate { year, revenue })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use contracts::shared::filter::Selection;

    fn record(ts: &str, country: &str, provider: &str, revenue: f64) -> SalesRecord {
        let ts = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M").unwrap();
        SalesRecord::new(ts, country, provider, 1, revenue, 0.0)
    }

    #[test]
    fn test_groups_and_sorts_by_year() {
        let records = vec![
            record("2025-02-01 10:00", "Spain", "UPS", 30.0),
            record("2024-01-01 10:00", "France", "DHL", 100.0),
            record("2024-06-01 10:00", "France", "DHL", 50.0),
        ];
        let result = aggregate_by_year(&records, &FilterState::default());
        assert_eq!(
            result,
            vec![
                YearlyAggregate { year: 2024, revenue: 150.0 },
                YearlyAggregate { year: 2025, revenue: 30.0 },
            ]
        );
    }

    #[test]
    fn test_provider_and_country_filters() {
        let records = vec![
            record("2024-01-01 10:00", "France", "DHL", 100.0),
            record("2024-01-02 10:00", "France", "UPS", 40.0),
            record("2024-01-03 10:00", "Spain", "DHL", 7.0),
        ];
        let filter = FilterState::default()
            .with_provider(Selection::only("DHL"))
            .with_country(Selection::only("France"));
        let result = aggregate_by_year(&records, &filter);
        assert_eq!(result, vec![YearlyAggregate { year: 2024, revenue: 100.0 }]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let records = vec![record("2024-01-01 10:00", "France", "DHL", 100.0)];
        let filter = FilterState::default().with_provider(Selection::only("Nobody"));
        assert!(aggregate_by_year(&records, &filter).is_empty());
        assert!(aggregate_by_year(&[], &FilterState::default()).is_empty());
    }
}
