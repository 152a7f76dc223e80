use contracts::dashboards::d401_country_sales::{Choropleth, CountryAggregate, CountrySales};
use contracts::shared::events::FilterEvent;
use contracts::shared::filter::{FilterState, Selection, YearFilter};
use std::any::Any;

use super::service::{
    aggregate_by_country_year, choropleth, country_ranking, sales_quantity_by_country,
};
use crate::shared::session::{DashboardView, FilterToken, RefreshContext};

/// Choropleth map of units sold plus the per-country revenue ranking
#[derive(Debug, Default)]
pub struct CountrySalesView {
    pub sales: Vec<CountrySales>,
    pub map: Option<Choropleth>,
    /// Revenue ranking for the selected year; empty when all years are shown
    pub ranking: Vec<CountryAggregate>,
    filter: FilterState,
    token: Option<FilterToken>,
}

impl CountrySalesView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clicking the selected country clears the selection
    pub fn click_event(&self, country: &str) -> FilterEvent {
        if self.filter.country.matches(country) && !self.filter.country.is_all() {
            FilterEvent::country(Selection::All)
        } else {
            FilterEvent::country(Selection::only(country))
        }
    }

    pub fn legend_title(&self) -> String {
        match self.filter.year {
            YearFilter::All => "Products sold (All Years)".to_string(),
            YearFilter::Year(y) => format!("Products sold ({})", y),
        }
    }

    /// Link to the calendar / logistics details page for `country`
    pub fn details_link(&self, base: &str, country: &str) -> String {
        self.filter
            .clone()
            .with_country(Selection::only(country))
            .details_link(base)
    }

    pub fn no_data_message(&self) -> Option<String> {
        if !self.sales.is_empty() {
            return None;
        }
        let provider = match self.filter.provider.name() {
            Some(p) => format!(" via {}", p),
            None => String::new(),
        };
        Some(format!("No products sold in {}{}.", self.filter.year, provider))
    }
}

impl DashboardView for CountrySalesView {
    fn name(&self) -> &str {
        "country_sales"
    }

    fn refresh(&mut self, ctx: &RefreshContext<'_>) {
        self.sales = sales_quantity_by_country(ctx.records, ctx.filter);
        self.map = Some(choropleth(ctx.boundaries, &self.sales));
        self.ranking = match ctx.filter.year {
            YearFilter::Year(year) => {
                let scoped = ctx
                    .records
                    .iter()
                    .filter(|r| ctx.filter.provider.matches(&r.shipment_provider));
                country_ranking(&aggregate_by_country_year(scoped), year)
            }
            YearFilter::All => Vec::new(),
        };
        self.filter = ctx.filter.clone();
        self.token = Some(ctx.token);
    }

    fn token(&self) -> Option<FilterToken> {
        self.token
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
