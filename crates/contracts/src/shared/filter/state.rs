use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::a001_sales_record::SalesRecord;
use crate::shared::events::FilterEvent;

/// Query-string literal for "every year".
pub const ALL_YEARS: &str = "all";
/// Query-string literal for "no provider / country restriction".
pub const ALL_SELECTION: &str = "All";

// ---------------------------------------------------------------------------
// Year
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl YearFilter {
    /// `"all"` selects every year. Otherwise the leading integer selects
    /// that year ("2024abc" is 2024); no digits, 0 or overflow fall back to
    /// `default_year`.
    pub fn parse(value: Option<&str>, default_year: i32) -> Self {
        match value.map(str::trim) {
            Some(ALL_YEARS) => YearFilter::All,
            Some(v) => match leading_int(v) {
                Some(year) if year != 0 => YearFilter::Year(year),
                _ => YearFilter::Year(default_year),
            },
            None => YearFilter::Year(default_year),
        }
    }

    pub fn matches(&self, year: i32) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(y) => *y == year,
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            YearFilter::All => None,
            YearFilter::Year(y) => Some(*y),
        }
    }

    /// Clicking the selected year clears the selection; clicking any other
    /// year selects it.
    pub fn toggle(self, year: i32) -> Self {
        if self == YearFilter::Year(year) {
            YearFilter::All
        } else {
            YearFilter::Year(year)
        }
    }

    pub fn as_param(&self) -> String {
        match self {
            YearFilter::All => ALL_YEARS.to_string(),
            YearFilter::Year(y) => y.to_string(),
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => write!(f, "All Years"),
            YearFilter::Year(y) => write!(f, "{}", y),
        }
    }
}

// Event payloads carry either the number or the "all" literal.
impl Serialize for YearFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            YearFilter::All => serializer.serialize_str(ALL_YEARS),
            YearFilter::Year(y) => serializer.serialize_i32(*y),
        }
    }
}

/// Optional sign followed by at least one digit, trailing text ignored
fn leading_int(value: &str) -> Option<i32> {
    let unsigned = value.strip_prefix(&['-', '+'][..]).unwrap_or(value);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    let end = value.len() - unsigned.len() + digits;
    value[..end].parse::<i32>().ok()
}

impl<'de> Deserialize<'de> for YearFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(y) => Ok(YearFilter::Year(y)),
            Raw::Text(s) if s == ALL_YEARS => Ok(YearFilter::All),
            Raw::Text(s) => s
                .trim()
                .parse::<i32>()
                .map(YearFilter::Year)
                .map_err(|_| de::Error::custom(format!("invalid year filter: {}", s))),
        }
    }
}

// ---------------------------------------------------------------------------
// Provider / country
// ---------------------------------------------------------------------------

/// Either no restriction or one exact name.
///
/// The literal `"All"` is reserved, so a provider or country actually named
/// "All" cannot be selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn only(value: impl Into<String>) -> Self {
        Selection::Only(value.into())
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None => Selection::All,
            Some(v) if v.is_empty() || v == ALL_SELECTION => Selection::All,
            Some(v) => Selection::Only(v.to_string()),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Only(v) => Some(v.as_str()),
        }
    }

    pub fn as_param(&self) -> &str {
        self.name().unwrap_or(ALL_SELECTION)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_param())
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Selection::parse(raw.as_deref()))
    }
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Active year / provider / country selection shared by every view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub year: YearFilter,
    pub provider: Selection,
    pub country: Selection,
}

impl FilterState {
    pub fn new(year: YearFilter, provider: Selection, country: Selection) -> Self {
        Self {
            year,
            provider,
            country,
        }
    }

    pub fn with_year(mut self, year: YearFilter) -> Self {
        self.year = year;
        self
    }

    pub fn with_provider(mut self, provider: Selection) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_country(mut self, country: Selection) -> Self {
        self.country = country;
        self
    }

    /// Provider and country only; the year is left to the caller.
    pub fn matches_scope(&self, record: &SalesRecord) -> bool {
        self.provider.matches(&record.shipment_provider) && self.country.matches(&record.country)
    }

    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.year.matches(record.year()) && self.matches_scope(record)
    }

    /// Apply one cross-view notification. Returns `true` when a field changed.
    pub fn apply(&mut self, event: &FilterEvent) -> bool {
        match event {
            FilterEvent::YearChanged { year } => replace_if_changed(&mut self.year, *year),
            FilterEvent::ProviderChanged { provider } => {
                replace_if_changed(&mut self.provider, provider.clone())
            }
            FilterEvent::CountrySelected { country } => {
                replace_if_changed(&mut self.country, country.clone())
            }
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_parse() {
        assert_eq!(YearFilter::parse(Some("all"), 2025), YearFilter::All);
        assert_eq!(YearFilter::parse(Some("2023"), 2025), YearFilter::Year(2023));
        assert_eq!(YearFilter::parse(Some("soon"), 2025), YearFilter::Year(2025));
        assert_eq!(YearFilter::parse(None, 2025), YearFilter::Year(2025));
    }

    #[test]
    fn test_year_parse_takes_leading_digits() {
        assert_eq!(YearFilter::parse(Some("2024abc"), 2025), YearFilter::Year(2024));
        assert_eq!(YearFilter::parse(Some("2023.7"), 2025), YearFilter::Year(2023));
        assert_eq!(YearFilter::parse(Some("-12x"), 2025), YearFilter::Year(-12));
        assert_eq!(YearFilter::parse(Some("0"), 2025), YearFilter::Year(2025));
        assert_eq!(YearFilter::parse(Some("-"), 2025), YearFilter::Year(2025));
        assert_eq!(YearFilter::parse(Some("99999999999"), 2025), YearFilter::Year(2025));
    }

    #[test]
    fn test_year_toggle() {
        assert_eq!(YearFilter::All.toggle(2024), YearFilter::Year(2024));
        assert_eq!(YearFilter::Year(2024).toggle(2024), YearFilter::All);
        assert_eq!(YearFilter::Year(2023).toggle(2024), YearFilter::Year(2024));
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse(None), Selection::All);
        assert_eq!(Selection::parse(Some("All")), Selection::All);
        assert_eq!(Selection::parse(Some("")), Selection::All);
        assert_eq!(Selection::parse(Some("UPS")), Selection::only("UPS"));
        assert!(Selection::All.matches("anything"));
        assert!(!Selection::only("UPS").matches("DHL"));
    }

    #[test]
    fn test_apply_reports_change() {
        let mut state = FilterState::default();
        let event = FilterEvent::ProviderChanged {
            provider: Selection::only("FedEx"),
        };
        assert!(state.apply(&event));
        assert!(!state.apply(&event));
        assert_eq!(state.provider, Selection::only("FedEx"));
    }

    #[test]
    fn test_year_json() {
        assert_eq!(serde_json::to_string(&YearFilter::All).unwrap(), "\"all\"");
        assert_eq!(serde_json::to_string(&YearFilter::Year(2024)).unwrap(), "2024");
        let year: YearFilter = serde_json::from_str("\"2022\"").unwrap();
        assert_eq!(year, YearFilter::Year(2022));
        assert!(serde_json::from_str::<YearFilter>("\"next\"").is_err());
    }
}
