use std::{cmp::Ordering, collections::BinaryHeap};

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::network::{Objective, RailGraph};

/// Frontier entry. Lower priority pops first; equal priorities pop in push order.
#[derive(Debug)]
struct Entry {
    priority: f64,
    seq: u64,
    cost: f64,
    node: NodeIndex,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap on (priority, seq)
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Shortest-path tree grown from one source.
#[derive(Debug, Clone)]
pub(crate) struct SearchTree {
    source: NodeIndex,
    pub cost: Vec<f64>,
    parent: Vec<Option<(NodeIndex, EdgeIndex)>>,
    /// Nodes expanded, for diagnostics.
    pub expanded: usize,
}

impl SearchTree {
    pub fn reached(&self, node: NodeIndex) -> bool {
        self.cost[node.index()].is_finite()
    }

    /// Links from the source to `node`, or `None` if it was not reached.
    pub fn links_to(&self, node: NodeIndex) -> Option<Vec<EdgeIndex>> {
        if !self.reached(node) {
            return None;
        }
        let mut links = Vec::new();
        let mut current = node;
        while current != self.source {
            let (previous, link) = self.parent[current.index()]?;
            links.push(link);
            current = previous;
        }
        links.reverse();
        Some(links)
    }
}

/// Best-first exploration shared by Dijkstra, A* and BFS.
///
/// Each link costs its `objective` weight, or 1 when `objective` is `None`. The frontier
/// is ordered by cost so far plus `estimate`; a node's label only changes on a strict
/// improvement, so among equal-cost paths the first one discovered is kept. Nodes can be
/// re-expanded when a cheaper label appears, which keeps A* optimal for admissible
/// estimates that are not consistent. Exploration stops when a node passing `goal` is
/// popped. With unit costs and a zero estimate entries pop in FIFO order, which is
/// breadth-first search.
pub(crate) fn explore<E, G>(
    graph: &RailGraph,
    source: NodeIndex,
    objective: Option<Objective>,
    estimate: E,
    goal: G,
) -> SearchTree
where
    E: Fn(NodeIndex) -> f64,
    G: Fn(NodeIndex) -> bool,
{
    let n = graph.city_count();
    let mut tree = SearchTree {
        source,
        cost: vec![f64::INFINITY; n],
        parent: vec![None; n],
        expanded: 0,
    };
    let mut frontier = BinaryHeap::new();
    let mut seq = 0u64;

    tree.cost[source.index()] = 0.0;
    frontier.push(Entry {
        priority: estimate(source),
        seq,
        cost: 0.0,
        node: source,
    });

    while let Some(current) = frontier.pop() {
        if current.cost > tree.cost[current.node.index()] {
            continue; // stale
        }
        if goal(current.node) {
            break;
        }
        tree.expanded += 1;

        for hop in graph.hops(current.node) {
            let step = objective.map_or(1.0, |objective| hop.cost(objective));
            let tentative = current.cost + step;
            if tentative < tree.cost[hop.to.index()] {
                tree.cost[hop.to.index()] = tentative;
                tree.parent[hop.to.index()] = Some((current.node, hop.link));
                seq += 1;
                frontier.push(Entry {
                    priority: tentative + estimate(hop.to),
                    seq,
                    cost: tentative,
                    node: hop.to,
                });
            }
        }
    }

    tree
}
