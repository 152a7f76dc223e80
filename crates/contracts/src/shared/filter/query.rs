use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{FilterState, Selection, YearFilter};

#[derive(Debug, Error)]
pub enum FilterQueryError {
    #[error("malformed filter query: {0}")]
    Malformed(#[from] serde_qs::Error),
}

/// Wire form of the filter: three optional text parameters.
#[derive(Debug, Default, Serialize, Deserialize)]
struct FilterQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

impl FilterState {
    /// Encode all three parameters, e.g. `year=all&provider=All&country=All`.
    pub fn to_query(&self) -> String {
        let query = FilterQuery {
            year: Some(self.year.as_param()),
            provider: Some(self.provider.as_param().to_string()),
            country: Some(self.country.as_param().to_string()),
        };
        serde_qs::to_string(&query).unwrap_or_default()
    }

    /// Decode a query string (a leading `?` is accepted).
    ///
    /// Missing provider / country mean "All"; a missing or unparseable year
    /// falls back to `default_year`.
    pub fn from_query(query: &str, default_year: i32) -> Result<Self, FilterQueryError> {
        let raw: FilterQuery = serde_qs::from_str(query.trim_start_matches('?'))?;
        Ok(FilterState {
            year: YearFilter::parse(raw.year.as_deref(), default_year),
            provider: Selection::parse(raw.provider.as_deref()),
            country: Selection::parse(raw.country.as_deref()),
        })
    }

    /// Drill-down link to a details page carrying the current filter.
    pub fn details_link(&self, base: &str) -> String {
        format!("{}?{}", base, self.to_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_encodes_all_literals() {
        assert_eq!(
            FilterState::default().to_query(),
            "year=all&provider=All&country=All"
        );
    }

    #[test]
    fn test_round_trip_with_spaces() {
        let state = FilterState::new(
            YearFilter::Year(2024),
            Selection::only("Royal Mail"),
            Selection::only("United Kingdom"),
        );
        let decoded = FilterState::from_query(&state.to_query(), 2025).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_round_trip_all_years() {
        let state = FilterState::default().with_country(Selection::only("Spain"));
        let decoded = FilterState::from_query(&state.to_query(), 2025).unwrap();
        assert_eq!(decoded.year, YearFilter::All);
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_missing_parameters() {
        let decoded = FilterState::from_query("?provider=DHL", 2025).unwrap();
        assert_eq!(decoded.year, YearFilter::Year(2025));
        assert_eq!(decoded.provider, Selection::only("DHL"));
        assert_eq!(decoded.country, Selection::All);

        let empty = FilterState::from_query("", 2023).unwrap();
        assert_eq!(empty.year, YearFilter::Year(2023));
    }

    #[test]
    fn test_details_link() {
        let state = FilterState::default().with_year(YearFilter::Year(2022));
        assert_eq!(
            state.details_link("html/details.html"),
            "html/details.html?year=2022&provider=All&country=All"
        );
    }
}
