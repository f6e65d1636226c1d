use std::collections::BTreeMap;

use crate::network::RailGraph;

/// Incident links per city divided by `n - 1`. Every score is 0 when `n <= 1`.
pub fn degree_centrality(graph: &RailGraph) -> BTreeMap<String, f64> {
    let n = graph.city_count();
    graph
        .indices()
        .map(|node| {
            let score = if n > 1 {
                graph.hops(node).len() as f64 / (n - 1) as f64
            } else {
                0.0
            };
            (graph.city_at(node).id.clone(), score)
        })
        .collect()
}

/// Fraction of neighbour pairs that are linked to each other. Cities with fewer than two
/// neighbours score 0.
pub fn clustering_coefficient(graph: &RailGraph) -> BTreeMap<String, f64> {
    graph
        .indices()
        .map(|node| {
            let neighbours: Vec<_> = graph.hops(node).into_iter().map(|hop| hop.to).collect();
            let k = neighbours.len();
            let score = if k < 2 {
                0.0
            } else {
                let mut closed = 0usize;
                for (i, a) in neighbours.iter().enumerate() {
                    for b in &neighbours[i + 1..] {
                        if graph.are_adjacent(*a, *b) {
                            closed += 1;
                        }
                    }
                }
                2.0 * closed as f64 / (k * (k - 1)) as f64
            };
            (graph.city_at(node).id.clone(), score)
        })
        .collect()
}

/// Mean clustering coefficient over all cities, 0 for an empty network.
pub fn average_clustering(graph: &RailGraph) -> f64 {
    let scores = clustering_coefficient(graph);
    if scores.is_empty() {
        return 0.0;
    }
    scores.values().sum::<f64>() / scores.len() as f64
}
