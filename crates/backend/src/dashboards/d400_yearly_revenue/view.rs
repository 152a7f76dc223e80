use contracts::dashboards::d400_yearly_revenue::YearlyAggregate;
use contracts::shared::events::FilterEvent;
use contracts::shared::filter::{FilterState, YearFilter};
use std::any::Any;

use super::service::aggregate_by_year;
use crate::shared::format::format_money;
use crate::shared::session::{DashboardView, FilterToken, RefreshContext};

/// Bar chart of yearly revenue
#[derive(Debug, Default)]
pub struct YearlyRevenueView {
    pub data: Vec<YearlyAggregate>,
    filter: FilterState,
    token: Option<FilterToken>,
}

impl YearlyRevenueView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_year(&self) -> YearFilter {
        self.filter.year
    }

    pub fn title(&self) -> String {
        let mut title = "Annual Revenue Trend".to_string();
        if let Some(country) = self.filter.country.name() {
            title.push_str(&format!(" for {}", country));
        }
        if let Some(provider) = self.filter.provider.name() {
            title.push_str(&format!(" ({})", provider));
        }
        title
    }

    /// Notification to publish when a bar is clicked
    pub fn click_event(&self, year: i32) -> FilterEvent {
        FilterEvent::year(self.filter.year.toggle(year))
    }

    pub fn tooltip(&self, year: i32) -> Option<String> {
        let bar = self.data.iter().find(|d| d.year == year)?;
        let hint = if self.filter.year == YearFilter::Year(year) {
            "Click to show all years"
        } else {
            "Click to filter to this year"
        };
        Some(format!(
            "{}\nRevenue: {}\n{}",
            bar.year,
            format_money(bar.revenue),
            hint
        ))
    }

    pub fn no_data_message(&self) -> Option<String> {
        if !self.data.is_empty() {
            return None;
        }
        Some(format!("No revenue data. {}", self.title()))
    }
}

impl DashboardView for YearlyRevenueView {
    fn name(&self) -> &str {
        "yearly_revenue"
    }

    fn refresh(&mut self, ctx: &RefreshContext<'_>) {
        self.data = aggregate_by_year(ctx.records, ctx.filter);
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
