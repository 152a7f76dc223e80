use contracts::dashboards::d403_logistics_flow::{FlowGraph, NodeIdentity};
use contracts::shared::filter::FilterState;
use std::any::Any;

use super::service::build_flow_graph;
use crate::shared::session::{DashboardView, FilterToken, RefreshContext};

/// Sankey diagram warehouse → provider → country
#[derive(Debug, Default)]
pub struct LogisticsFlowView {
    identity: NodeIdentity,
    pub graph: FlowGraph,
    filter: FilterState,
    token: Option<FilterToken>,
}

impl LogisticsFlowView {
    pub fn new(identity: NodeIdentity) -> Self {
        Self {
            identity,
            ..Self::default()
        }
    }

    pub fn no_data_message(&self) -> Option<String> {
        if !self.graph.is_empty() {
            return None;
        }
        let country = self.filter.country.name().unwrap_or("selected country");
        let provider = match self.filter.provider.name() {
            Some(p) => format!(" via {}", p),
            None => String::new(),
        };
        Some(format!("No shipments for {}{}.", country, provider))
    }
}

impl DashboardView for LogisticsFlowView {
    fn name(&self) -> &str {
        "logistics_flow"
    }

    fn refresh(&mut self, ctx: &RefreshContext<'_>) {
        self.graph = build_flow_graph(ctx.records, ctx.filter, self.identity);
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
