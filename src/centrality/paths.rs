use std::{
    cmp::Ordering,
    collections::{BTreeMap, BinaryHeap, VecDeque},
};

use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::{
    config::DistanceMode,
    network::{Objective, RailGraph},
    routing::explore,
};

/// Path lengths closer than this count as equal when splitting betweenness credit.
const TIE_EPSILON: f64 = 1e-9;

/// Closeness scores plus the cities whose score only covers their own component.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Closeness {
    pub scores: BTreeMap<String, f64>,
    pub restricted: Vec<String>,
}

/// Closeness over hop counts.
pub fn closeness_centrality(graph: &RailGraph) -> Closeness {
    closeness_with(graph, DistanceMode::Hops)
}

/// `r / total` where `r` is the number of other cities reachable and `total` the sum of
/// distances to them. Isolated cities score 0.
pub fn closeness_with(graph: &RailGraph, mode: DistanceMode) -> Closeness {
    let n = graph.city_count();
    let mut closeness = Closeness::default();

    for source in graph.indices() {
        let tree = explore(graph, source, mode.objective(), |_| 0.0, |_| false);
        let (reached, total) = tree
            .cost
            .iter()
            .enumerate()
            .filter(|(i, cost)| *i != source.index() && cost.is_finite())
            .fold((0usize, 0.0), |(count, sum), (_, cost)| (count + 1, sum + cost));

        let id = graph.city_at(source).id.clone();
        if reached + 1 < n {
            closeness.restricted.push(id.clone());
        }
        let score = if total > 0.0 { reached as f64 / total } else { 0.0 };
        closeness.scores.insert(id, score);
    }
    closeness.restricted.sort();
    closeness
}

/// Betweenness over travel time, normalized.
pub fn betweenness_centrality(graph: &RailGraph) -> BTreeMap<String, f64> {
    betweenness_with(graph, DistanceMode::Time, true)
}

/// Brandes' accumulation. Credit for a pair with several shortest paths is split evenly
/// across them. Normalized scores divide by the number of city pairs `(n-1)(n-2)/2`.
pub fn betweenness_with(graph: &RailGraph, mode: DistanceMode, normalized: bool) -> BTreeMap<String, f64> {
    let n = graph.city_count();
    let mut centrality = vec![0.0_f64; n];

    for source in graph.indices() {
        let sweep = match mode.objective() {
            None => unweighted_sweep(graph, source),
            Some(objective) => weighted_sweep(graph, source, objective),
        };

        let mut delta = vec![0.0_f64; n];
        for &w in sweep.order.iter().rev() {
            for &v in &sweep.predecessors[w] {
                delta[v] += (sweep.sigma[v] / sweep.sigma[w]) * (1.0 + delta[w]);
            }
            if w != source.index() {
                centrality[w] += delta[w];
            }
        }
    }

    // every pair was counted from both ends
    let mut scale = 0.5;
    if normalized && n > 2 {
        scale /= ((n - 1) * (n - 2)) as f64 / 2.0;
    }

    graph
        .indices()
        .map(|node| (graph.city_at(node).id.clone(), centrality[node.index()] * scale))
        .collect()
}

/// Single-source shortest-path DAG: settle order, path counts, predecessors.
struct Sweep {
    order: Vec<usize>,
    sigma: Vec<f64>,
    predecessors: Vec<Vec<usize>>,
}

impl Sweep {
    fn new(n: usize, source: NodeIndex) -> Self {
        let mut sigma = vec![0.0; n];
        sigma[source.index()] = 1.0;
        Self {
            order: Vec::with_capacity(n),
            sigma,
            predecessors: vec![Vec::new(); n],
        }
    }
}

fn unweighted_sweep(graph: &RailGraph, source: NodeIndex) -> Sweep {
    let n = graph.city_count();
    let mut sweep = Sweep::new(n, source);
    let mut dist = vec![-1i64; n];
    dist[source.index()] = 0;

    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        sweep.order.push(v.index());
        for hop in graph.hops(v) {
            let w = hop.to.index();
            if dist[w] < 0 {
                dist[w] = dist[v.index()] + 1;
                queue.push_back(hop.to);
            }
            if dist[w] == dist[v.index()] + 1 {
                sweep.sigma[w] += sweep.sigma[v.index()];
                sweep.predecessors[w].push(v.index());
            }
        }
    }
    sweep
}

#[derive(Debug)]
struct Tentative {
    dist: f64,
    node: NodeIndex,
}

impl PartialEq for Tentative {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Tentative {}

impl PartialOrd for Tentative {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Tentative {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

fn weighted_sweep(graph: &RailGraph, source: NodeIndex, objective: Objective) -> Sweep {
    let n = graph.city_count();
    let mut sweep = Sweep::new(n, source);
    let mut dist = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    dist[source.index()] = 0.0;

    let mut heap = BinaryHeap::from([Tentative { dist: 0.0, node: source }]);
    while let Some(Tentative { dist: d, node: v }) = heap.pop() {
        if settled[v.index()] || d > dist[v.index()] {
            continue;
        }
        settled[v.index()] = true;
        sweep.order.push(v.index());

        for hop in graph.hops(v) {
            let w = hop.to.index();
            if settled[w] {
                continue;
            }
            let candidate = d + hop.cost(objective);
            if candidate < dist[w] - TIE_EPSILON {
                dist[w] = candidate;
                sweep.sigma[w] = sweep.sigma[v.index()];
                sweep.predecessors[w] = vec![v.index()];
                heap.push(Tentative { dist: candidate, node: hop.to });
            } else if (candidate - dist[w]).abs() <= TIE_EPSILON {
                sweep.sigma[w] += sweep.sigma[v.index()];
                sweep.predecessors[w].push(v.index());
            }
        }
    }
    sweep
}
