use serde::{Deserialize, Serialize};

use crate::domain::a001_sales_record::{OrderPriority, ReturnStatus};

/// Stage of the logistics chain a node belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    Warehouse,
    Provider,
    Country,
}

impl FlowStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowStage::Warehouse => "warehouse",
            FlowStage::Provider => "provider",
            FlowStage::Country => "country",
        }
    }
}

/// How nodes are identified.
///
/// `BareName` merges equal names across stages (reproduces the browser
/// dashboard); `Namespaced` keys nodes by stage and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeIdentity {
    #[default]
    Namespaced,
    BareName,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnCounts {
    #[serde(rename = "Returned")]
    pub returned: u64,
    #[serde(rename = "Not Returned")]
    pub not_returned: u64,
    #[serde(rename = "Unknown")]
    pub unknown: u64,
}

impl ReturnCounts {
    pub fn record(&mut self, status: ReturnStatus) {
        match status {
            ReturnStatus::Returned => self.returned += 1,
            ReturnStatus::NotReturned => self.not_returned += 1,
            ReturnStatus::Unknown => self.unknown += 1,
        }
    }

    pub fn merge(&mut self, other: &ReturnCounts) {
        self.returned += other.returned;
        self.not_returned += other.not_returned;
        self.unknown += other.unknown;
    }

    pub fn total(&self) -> u64 {
        self.returned + self.not_returned + self.unknown
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    #[serde(rename = "High")]
    pub high: u64,
    #[serde(rename = "Medium")]
    pub medium: u64,
    #[serde(rename = "Low")]
    pub low: u64,
    #[serde(rename = "Unknown")]
    pub unknown: u64,
}

impl PriorityCounts {
    pub fn record(&mut self, priority: OrderPriority) {
        match priority {
            OrderPriority::High => self.high += 1,
            OrderPriority::Medium => self.medium += 1,
            OrderPriority::Low => self.low += 1,
            OrderPriority::Unknown => self.unknown += 1,
        }
    }

    pub fn merge(&mut self, other: &PriorityCounts) {
        self.high += other.high;
        self.medium += other.medium;
        self.low += other.low;
        self.unknown += other.unknown;
    }

    pub fn total(&self) -> u64 {
        self.high + self.medium + self.low + self.unknown
    }
}

/// Node of the Sankey graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Unique key; `"<stage>:<name>"` when namespaced, the name otherwise
    pub id: String,
    pub name: String,
    /// `None` when bare names are used, since a node may span stages
    pub stage: Option<FlowStage>,
    #[serde(rename = "ordersTotal")]
    pub orders_total: u64,
    #[serde(rename = "shippingCostTotal")]
    pub shipping_cost_total: f64,
    #[serde(rename = "returnCounts")]
    pub return_counts: ReturnCounts,
    #[serde(rename = "priorityCounts")]
    pub priority_counts: PriorityCounts,
}

/// Directed edge warehouse → provider or provider → country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
    #[serde(rename = "ordersTotal")]
    pub orders_total: u64,
    #[serde(rename = "shippingCostTotal")]
    pub shipping_cost_total: f64,
    /// Rendering weight: shipping_cost_total / orders_total
    #[serde(rename = "averageShippingCost")]
    pub average_shipping_cost: f64,
    #[serde(rename = "returnCounts")]
    pub return_counts: ReturnCounts,
    #[serde(rename = "priorityCounts")]
    pub priority_counts: PriorityCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
