use serde::{Deserialize, Serialize};

use crate::shared::filter::{Selection, YearFilter};

/// Уведомление между представлениями дашборда
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterEvent {
    /// Выбран год (или "all")
    YearChanged { year: YearFilter },

    /// Выбран перевозчик
    ProviderChanged { provider: Selection },

    /// Выбрана страна на карте
    CountrySelected { country: Selection },
}

impl FilterEvent {
    pub fn year(year: YearFilter) -> Self {
        FilterEvent::YearChanged { year }
    }

    pub fn provider(provider: Selection) -> Self {
        FilterEvent::ProviderChanged { provider }
    }

    pub fn country(country: Selection) -> Self {
        FilterEvent::CountrySelected { country }
    }

    /// Event name used by the browser dashboard.
    pub fn name(&self) -> &'static str {
        match self {
            FilterEvent::YearChanged { .. } => "yearChanged",
            FilterEvent::ProviderChanged { .. } => "providerChanged",
            FilterEvent::CountrySelected { .. } => "countrySelected",
        }
    }
}
