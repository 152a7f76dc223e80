use contracts::domain::a001_sales_record::SalesRecord;
use contracts::domain::a002_geo_boundary::BoundaryCollection;
use contracts::shared::events::FilterEvent;
use contracts::shared::filter::FilterState;
use std::sync::Arc;

use super::view::{DashboardView, FilterToken, RefreshContext};
use crate::shared::error::Result;

/// Handle of a registered view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(usize);

/// Owns the filter state and drives every view.
///
/// The record set and boundaries are loaded once and never mutated. Each
/// effective filter change bumps the token, rewrites the query string and
/// refreshes every view; the publishing view is told it was the origin.
pub struct DashboardSession {
    records: Arc<Vec<SalesRecord>>,
    boundaries: Arc<BoundaryCollection>,
    filter: FilterState,
    token: FilterToken,
    query: String,
    views: Vec<Box<dyn DashboardView>>,
}

impl DashboardSession {
    pub fn new(
        records: Arc<Vec<SalesRecord>>,
        boundaries: Arc<BoundaryCollection>,
        filter: FilterState,
    ) -> Self {
        let query = filter.to_query();
        Self {
            records,
            boundaries,
            filter,
            token: FilterToken::default(),
            query,
            views: Vec::new(),
        }
    }

    /// Session whose filter is restored from a URL query string.
    pub fn from_query(
        records: Arc<Vec<SalesRecord>>,
        boundaries: Arc<BoundaryCollection>,
        query: &str,
        default_year: i32,
    ) -> Result<Self> {
        let filter = FilterState::from_query(query, default_year)?;
        Ok(Self::new(records, boundaries, filter))
    }

    /// Register a view and compute its first summary.
    pub fn register(&mut self, mut view: Box<dyn DashboardView>) -> ViewId {
        let ctx = RefreshContext {
            records: &self.records,
            boundaries: &self.boundaries,
            filter: &self.filter,
            token: self.token,
            event: None,
            is_origin: false,
        };
        view.refresh(&ctx);
        self.views.push(view);
        ViewId(self.views.len() - 1)
    }

    /// Apply a change coming from view `origin` (or from outside when `None`).
    ///
    /// An event that leaves the state unchanged notifies nobody.
    pub fn publish(&mut self, origin: Option<ViewId>, event: FilterEvent) -> FilterToken {
        if !self.filter.apply(&event) {
            tracing::debug!("{} left filter unchanged", event.name());
            return self.token;
        }

        self.token = self.token.next();
        self.query = self.filter.to_query();
        tracing::debug!(
            "{} -> token {}, query {}",
            event.name(),
            self.token.0,
            self.query
        );

        for (index, view) in self.views.iter_mut().enumerate() {
            let ctx = RefreshContext {
                records: &self.records,
                boundaries: &self.boundaries,
                filter: &self.filter,
                token: self.token,
                event: Some(&event),
                is_origin: origin == Some(ViewId(index)),
            };
            view.refresh(&ctx);
        }

        self.token
    }

    /// Recompute every view for the current state.
    pub fn refresh_all(&mut self) {
        let ctx = RefreshContext {
            records: &self.records,
            boundaries: &self.boundaries,
            filter: &self.filter,
            token: self.token,
            event: None,
            is_origin: false,
        };
        for view in self.views.iter_mut() {
            view.refresh(&ctx);
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// URL query representing the current filter
    pub fn query_string(&self) -> &str {
        &self.query
    }

    pub fn token(&self) -> FilterToken {
        self.token
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn boundaries(&self) -> &BoundaryCollection {
        &self.boundaries
    }

    /// `false` when the state moved on since `token` was issued
    pub fn is_current(&self, token: FilterToken) -> bool {
        token == self.token
    }

    pub fn view(&self, id: ViewId) -> Option<&dyn DashboardView> {
        self.views.get(id.0).map(|v| v.as_ref())
    }

    pub fn view_as<T: DashboardView>(&self, id: ViewId) -> Option<&T> {
        self.view(id).and_then(|v| v.as_any().downcast_ref::<T>())
    }

    /// Views whose summary predates the current token
    pub fn stale_views(&self) -> Vec<ViewId> {
        self.views
            .iter()
            .enumerate()
            .filter(|(_, v)| v.token() != Some(self.token))
            .map(|(i, _)| ViewId(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::DashboardError;
    use contracts::shared::filter::{Selection, YearFilter};
    use std::any::Any;

    #[derive(Default)]
    struct CountingView {
        refreshes: usize,
        origin_refreshes: usize,
        last_filter: Option<FilterState>,
        token: Option<FilterToken>,
    }

    impl DashboardView for CountingView {
        fn name(&self) -> &str {
            "counting"
        }

        fn refresh(&mut self, ctx: &RefreshContext<'_>) {
            self.refreshes += 1;
            if ctx.is_origin {
                self.origin_refreshes += 1;
            }
            self.last_filter = Some(ctx.filter.clone());
            self.token = Some(ctx.token);
        }

        fn token(&self) -> Option<FilterToken> {
            self.token
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn session() -> DashboardSession {
        DashboardSession::new(
            Arc::new(Vec::new()),
            Arc::new(BoundaryCollection::new(Vec::new())),
            FilterState::default(),
        )
    }

    #[test]
    fn test_every_view_is_refreshed() {
        let mut session = session();
        let a = session.register(Box::<CountingView>::default());
        let b = session.register(Box::<CountingView>::default());

        let token = session.publish(Some(a), FilterEvent::year(YearFilter::Year(2024)));
        assert_eq!(token, FilterToken(1));

        let view_a = session.view_as::<CountingView>(a).unwrap();
        let view_b = session.view_as::<CountingView>(b).unwrap();
        assert_eq!(view_a.refreshes, 2);
        assert_eq!(view_a.origin_refreshes, 1);
        assert_eq!(view_b.refreshes, 2);
        assert_eq!(view_b.origin_refreshes, 0);
        assert_eq!(
            view_b.last_filter.as_ref().map(|f| f.year),
            Some(YearFilter::Year(2024))
        );
        assert!(session.stale_views().is_empty());
    }

    #[test]
    fn test_unchanged_event_is_ignored() {
        let mut session = session();
        let a = session.register(Box::<CountingView>::default());
        let token = session.publish(None, FilterEvent::provider(Selection::All));
        assert_eq!(token, FilterToken(0));
        assert_eq!(session.view_as::<CountingView>(a).unwrap().refreshes, 1);
    }

    #[test]
    fn test_from_query_restores_filter() {
        let session = DashboardSession::from_query(
            Arc::new(Vec::new()),
            Arc::new(BoundaryCollection::new(Vec::new())),
            "?year=2023&country=Peru",
            2025,
        )
        .unwrap();
        assert_eq!(session.filter().year, YearFilter::Year(2023));
        assert_eq!(session.filter().country, Selection::only("Peru"));
        assert_eq!(session.query_string(), "year=2023&provider=All&country=Peru");

        let nested = DashboardSession::from_query(
            Arc::new(Vec::new()),
            Arc::new(BoundaryCollection::new(Vec::new())),
            "year[from]=2023",
            2025,
        );
        assert!(matches!(nested, Err(DashboardError::Query(_))));
    }

    #[test]
    fn test_query_follows_state() {
        let mut session = session();
        session.publish(None, FilterEvent::country(Selection::only("Italy")));
        assert_eq!(session.query_string(), "year=all&provider=All&country=Italy");
        assert!(!session.is_current(FilterToken(0)));
        assert!(session.is_current(FilterToken(1)));
    }
}
