use std::{cmp::Ordering, collections::BinaryHeap};

use petgraph::graph::{EdgeIndex, NodeIndex};
use tracing::debug;

use crate::network::{Objective, RailGraph};

use super::tree::{MstAlgorithm, SpanningTree, TraceEvent, TraceSink, TreeEdge};

/// Candidate link leaving the tree. Min-heap on (weight, link insertion order).
#[derive(Debug)]
struct Candidate {
    weight: f64,
    link: EdgeIndex,
    inside: NodeIndex,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.link.cmp(&self.link))
    }
}

/// Lazy Prim: grows one tree at a time from the lowest-id city not yet covered.
pub fn mst_prim_traced(
    graph: &RailGraph,
    objective: Objective,
    sink: &mut dyn TraceSink,
) -> SpanningTree {
    let mut roots: Vec<NodeIndex> = graph.indices().collect();
    roots.sort_by(|a, b| graph.city_at(*a).id.cmp(&graph.city_at(*b).id));

    let mut in_tree = vec![false; graph.city_count()];
    let mut edges = Vec::new();
    let mut total_cost = 0.0;
    let mut component_count = 0;
    let mut heap = BinaryHeap::new();

    let enter = |node: NodeIndex, in_tree: &mut [bool], heap: &mut BinaryHeap<Candidate>| {
        in_tree[node.index()] = true;
        for hop in graph.hops(node) {
            if !in_tree[hop.to.index()] {
                heap.push(Candidate {
                    weight: hop.cost(objective),
                    link: hop.link,
                    inside: node,
                });
            }
        }
    };

    for root in roots {
        if in_tree[root.index()] {
            continue;
        }
        component_count += 1;
        sink.record(TraceEvent::TreeStarted {
            root: graph.city_at(root).id.clone(),
        });
        enter(root, &mut in_tree, &mut heap);

        while let Some(candidate) = heap.pop() {
            let (a, b) = graph.endpoints(candidate.link);
            let outside = if a == candidate.inside { b } else { a };
            let from = graph.city_at(candidate.inside).id.clone();
            let to = graph.city_at(outside).id.clone();
            sink.record(TraceEvent::Considered {
                from: from.clone(),
                to: to.clone(),
                weight: candidate.weight,
            });

            if in_tree[outside.index()] {
                sink.record(TraceEvent::Rejected {
                    from,
                    to,
                    weight: candidate.weight,
                });
                continue;
            }

            total_cost += candidate.weight;
            sink.record(TraceEvent::Accepted {
                from: from.clone(),
                to: to.clone(),
                weight: candidate.weight,
                total: total_cost,
            });
            edges.push(TreeEdge {
                from,
                to,
                weight: candidate.weight,
            });
            enter(outside, &mut in_tree, &mut heap);
        }
    }

    debug!(
        edges = edges.len(),
        total_cost, component_count, "prim finished"
    );

    SpanningTree {
        algorithm: MstAlgorithm::Prim,
        objective,
        nodes: graph.nodes().map(|city| city.id.clone()).collect(),
        edges,
        total_cost,
        is_forest: component_count > 1,
        component_count,
        steps: Vec::new(),
    }
}
