use contracts::dashboards::d403_logistics_flow::{
    FlowEdge, FlowGraph, FlowNode, FlowStage, NodeIdentity, PriorityCounts, ReturnCounts,
};
use contracts::domain::a001_sales_record::SalesRecord;
use contracts::shared::filter::FilterState;
use std::collections::HashMap;

#[derive(Debug, Default, Clone, Copy)]
struct FlowAcc {
    orders: u64,
    shipping_cost: f64,
    returns: ReturnCounts,
    priorities: PriorityCounts,
}

impl FlowAcc {
    fn add_record(&mut self, record: &SalesRecord) {
        self.orders += 1;
        self.shipping_cost += record.shipping_cost;
        self.returns.record(record.return_status);
        self.priorities.record(record.order_priority);
    }

    fn merge(&mut self, other: &FlowAcc) {
        self.orders += other.orders;
        self.shipping_cost += other.shipping_cost;
        self.returns.merge(&other.returns);
        self.priorities.merge(&other.priorities);
    }
}

struct NodeSlot<'a> {
    id: String,
    name: &'a str,
    stage: Option<FlowStage>,
    acc: FlowAcc,
}

/// Interns nodes and edges in first-seen order
struct GraphBuilder<'a> {
    identity: NodeIdentity,
    node_index: HashMap<String, usize>,
    nodes: Vec<NodeSlot<'a>>,
    edge_index: HashMap<(usize, usize), usize>,
    edges: Vec<(usize, usize, FlowAcc)>,
}

impl<'a> GraphBuilder<'a> {
    fn new(identity: NodeIdentity) -> Self {
        Self {
            identity,
            node_index: HashMap::new(),
            nodes: Vec::new(),
            edge_index: HashMap::new(),
            edges: Vec::new(),
        }
    }

    fn node(&mut self, stage: FlowStage, name: &'a str) -> usize {
        let (id, stage) = match self.identity {
            NodeIdentity::Namespaced => (format!("{}:{}", stage.as_str(), name), Some(stage)),
            NodeIdentity::BareName => (name.to_string(), None),
        };
        if let Some(&index) = self.node_index.get(&id) {
            return index;
        }
        let index = self.nodes.len();
        self.node_index.insert(id.clone(), index);
        self.nodes.push(NodeSlot {
            id,
            name,
            stage,
            acc: FlowAcc::default(),
        });
        index
    }

    fn add(&mut self, source: usize, target: usize, record: &SalesRecord) {
        let next = self.edges.len();
        let index = *self.edge_index.entry((source, target)).or_insert(next);
        if index == next {
            self.edges.push((source, target, FlowAcc::default()));
        }
        self.edges[index].2.add_record(record);
    }

    fn finish(mut self) -> FlowGraph {
        // a node sums every incident edge; a self-loop counts twice
        for (source, target, acc) in &self.edges {
            self.nodes[*source].acc.merge(acc);
            self.nodes[*target].acc.merge(acc);
        }

        let edges = self
            .edges
            .iter()
            .map(|(source, target, acc)| FlowEdge {
                source: self.nodes[*source].id.clone(),
                target: self.nodes[*target].id.clone(),
                orders_total: acc.orders,
                shipping_cost_total: acc.shipping_cost,
                average_shipping_cost: acc.shipping_cost / acc.orders as f64,
                return_counts: acc.returns,
                priority_counts: acc.priorities,
            })
            .collect();

        let nodes = self
            .nodes
            .into_iter()
            .map(|slot| FlowNode {
                id: slot.id,
                name: slot.name.to_string(),
                stage: slot.stage,
                orders_total: slot.acc.orders,
                shipping_cost_total: slot.acc.shipping_cost,
                return_counts: slot.acc.returns,
                priority_counts: slot.acc.priorities,
            })
            .collect();

        FlowGraph { nodes, edges }
    }
}

fn has_logistics(record: &SalesRecord) -> bool {
    !record.warehouse_location.trim().is_empty()
        && !record.shipment_provider.trim().is_empty()
        && !record.country.trim().is_empty()
}

/// Two-stage Sankey graph warehouse → provider → country.
///
/// Only records with all three logistics fields take part, narrowed by the
/// provider and country selection; the year selection does not apply. Every
/// edge has at least one order, so the average never divides by zero.
pub fn build_flow_graph(
    records: &[SalesRecord],
    filter: &FilterState,
    identity: NodeIdentity,
) -> FlowGraph {
    let mut builder = GraphBuilder::new(identity);

    for record in records
        .iter()
        .filter(|r| has_logistics(r) && filter.matches_scope(r))
    {
        let warehouse = builder.node(FlowStage::Warehouse, &record.warehouse_location);
        let provider = builder.node(FlowStage::Provider, &record.shipment_provider);
        let country = builder.node(FlowStage::Country, &record.country);
        builder.add(warehouse, provider, record);
        builder.add(provider, country, record);
    }

    let graph = builder.finish();
    tracing::debug!(
        "build_flow_graph: {} records -> {} nodes, {} edges",
        records.len(),
        graph.nodes.len(),
        graph.edges.len()
    );
    graph
}
