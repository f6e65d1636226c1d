use serde::{Deserialize, Serialize};

use crate::network::Objective;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MstAlgorithm {
    #[default]
    Prim,
    Kruskal,
}

impl MstAlgorithm {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "prim" => Some(Self::Prim),
            "kruskal" => Some(Self::Kruskal),
            _ => None,
        }
    }
}

/// A link accepted into the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeEdge {
    pub from: String,
    pub to: String,
    /// Cost under the tree's objective.
    pub weight: f64,
}

/// Result of a minimum-spanning-tree query.
///
/// On a disconnected graph this is a minimum spanning forest: `is_forest` is set and
/// `component_count` says how many trees it holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningTree {
    pub algorithm: MstAlgorithm,
    pub objective: Objective,
    pub nodes: Vec<String>,
    /// In acceptance order.
    pub edges: Vec<TreeEdge>,
    pub total_cost: f64,
    pub is_forest: bool,
    pub component_count: usize,
    /// Construction trace. Empty when the events went to a caller-supplied sink.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<TraceEvent>,
}

/// One decision taken while building a tree, for step-by-step playback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// A new tree is grown from `root` (Prim only).
    TreeStarted { root: String },
    Considered { from: String, to: String, weight: f64 },
    /// `total` is the cost accumulated so far, this link included.
    Accepted { from: String, to: String, weight: f64, total: f64 },
    /// The link would close a cycle.
    Rejected { from: String, to: String, weight: f64 },
}

/// Receives construction events as they happen.
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn record(&mut self, _event: TraceEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_event_serialization() {
        let event = TraceEvent::Accepted {
            from: "A".into(),
            to: "B".into(),
            weight: 1.0,
            total: 1.0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "accepted");
        assert_eq!(json["from"], "A");
        assert_eq!(json["total"], 1.0);
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(MstAlgorithm::from_str("Kruskal"), Some(MstAlgorithm::Kruskal));
        assert_eq!(MstAlgorithm::from_str("boruvka"), None);
    }
}
