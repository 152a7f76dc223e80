use contracts::domain::a001_sales_record::SalesRecord;
use contracts::domain::a002_geo_boundary::BoundaryCollection;
use contracts::shared::events::FilterEvent;
use contracts::shared::filter::FilterState;
use serde::Serialize;
use std::any::Any;

/// Generation of the filter state; increases on every effective change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct FilterToken(pub u64);

impl FilterToken {
    pub fn next(self) -> Self {
        FilterToken(self.0 + 1)
    }
}

/// Everything a view needs to recompute its aggregate
pub struct RefreshContext<'a> {
    pub records: &'a [SalesRecord],
    pub boundaries: &'a BoundaryCollection,
    pub filter: &'a FilterState,
    pub token: FilterToken,
    /// Event that triggered the refresh; `None` on initial load
    pub event: Option<&'a FilterEvent>,
    /// The receiving view published `event` itself
    pub is_origin: bool,
}

/// View model fed by the session.
///
/// A view recomputes from scratch on every refresh and keeps nothing but its
/// latest summary.
pub trait DashboardView: Any {
    fn name(&self) -> &str;

    fn refresh(&mut self, ctx: &RefreshContext<'_>);

    /// Token of the filter state the current summary was computed for
    fn token(&self) -> Option<FilterToken>;

    fn as_any(&self) -> &dyn Any;
}
