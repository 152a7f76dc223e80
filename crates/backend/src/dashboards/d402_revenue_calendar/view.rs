use contracts::dashboards::d402_revenue_calendar::{CalendarDayAggregate, CalendarPolicy};
use contracts::shared::filter::{FilterState, YearFilter};
use std::any::Any;

use super::service::{aggregate_calendar, max_total};
use crate::shared::session::{DashboardView, FilterToken, RefreshContext};

/// Calendar heatmap of daily revenue
#[derive(Debug, Default)]
pub struct RevenueCalendarView {
    policy: CalendarPolicy,
    pub days: Vec<CalendarDayAggregate>,
    /// Colour-scale upper bound
    pub max_total: f64,
    filter: FilterState,
    token: Option<FilterToken>,
}

impl RevenueCalendarView {
    pub fn new(policy: CalendarPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn is_aggregate(&self) -> bool {
        self.filter.year == YearFilter::All
    }

    pub fn title(&self) -> String {
        let provider = match self.filter.provider.name() {
            Some(p) => p.to_string(),
            None => "All shipment providers".to_string(),
        };
        format!("{} - {} - {}", self.filter.year, self.filter.country, provider)
    }

    pub fn no_data_message(&self) -> Option<String> {
        if !self.days.is_empty() {
            return None;
        }
        let year = match self.filter.year {
            YearFilter::All => "any year".to_string(),
            YearFilter::Year(y) => y.to_string(),
        };
        let provider = match self.filter.provider.name() {
            Some(p) => format!(" via {}", p),
            None => String::new(),
        };
        Some(format!(
            "No data for {} in {}{}.",
            self.filter.country, year, provider
        ))
    }
}

impl DashboardView for RevenueCalendarView {
    fn name(&self) -> &str {
        "revenue_calendar"
    }

    fn refresh(&mut self, ctx: &RefreshContext<'_>) {
        self.days = aggregate_calendar(ctx.records, ctx.filter, &self.policy);
        self.max_total = max_total(&self.days);
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
