use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::{AnalysisConfig, DistanceMode},
    network::RailGraph,
};

use super::{
    local::{average_clustering, clustering_coefficient, degree_centrality},
    paths::{betweenness_with, closeness_with},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Betweenness,
    Degree,
    Closeness,
    Clustering,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Betweenness,
        Metric::Degree,
        Metric::Closeness,
        Metric::Clustering,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "betweenness" => Some(Self::Betweenness),
            "degree" => Some(Self::Degree),
            "closeness" => Some(Self::Closeness),
            "clustering" => Some(Self::Clustering),
            _ => None,
        }
    }
}

/// A city and its score under some metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCity {
    pub id: String,
    pub score: f64,
}

/// All four scores of one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeCentrality {
    pub id: String,
    pub name: String,
    pub betweenness: f64,
    pub degree: f64,
    pub closeness: f64,
    pub clustering: f64,
}

impl NodeCentrality {
    pub fn score(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Betweenness => self.betweenness,
            Metric::Degree => self.degree,
            Metric::Closeness => self.closeness,
            Metric::Clustering => self.clustering,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityReport {
    /// Ordered by city id.
    pub nodes: Vec<NodeCentrality>,
    /// Top cities by betweenness.
    pub hubs: Vec<RankedCity>,
    pub average_clustering: f64,
    /// Cities whose closeness only covers their own component.
    pub restricted_closeness: Vec<String>,
    pub betweenness_distance: DistanceMode,
    pub closeness_distance: DistanceMode,
}

impl CentralityReport {
    /// The `n` best cities under `metric`, ties by id ascending.
    pub fn top(&self, metric: Metric, n: usize) -> Vec<RankedCity> {
        rank(
            self.nodes.iter().map(|node| (node.id.as_str(), node.score(metric))),
            n,
        )
    }

    pub fn node(&self, id: &str) -> Option<&NodeCentrality> {
        self.nodes
            .binary_search_by(|node| node.id.as_str().cmp(id))
            .ok()
            .map(|i| &self.nodes[i])
    }
}

/// Sort descending by score, then ascending by id, and keep at most `k`.
pub(crate) fn rank<'a>(scores: impl Iterator<Item = (&'a str, f64)>, k: usize) -> Vec<RankedCity> {
    let mut ranked: Vec<_> = scores.collect();
    ranked.sort_by(|(id_a, a), (id_b, b)| b.total_cmp(a).then_with(|| id_a.cmp(id_b)));
    ranked
        .into_iter()
        .take(k)
        .map(|(id, score)| RankedCity {
            id: id.to_string(),
            score,
        })
        .collect()
}

/// The `k` cities with the highest travel-time betweenness.
pub fn top_hubs(graph: &RailGraph, k: usize) -> Vec<RankedCity> {
    top_hubs_with(graph, k, &AnalysisConfig::default())
}

pub fn top_hubs_with(graph: &RailGraph, k: usize, config: &AnalysisConfig) -> Vec<RankedCity> {
    let scores = betweenness_with(graph, config.betweenness_distance, config.normalized);
    rank(scores.iter().map(|(id, score)| (id.as_str(), *score)), k)
}

/// Every metric for every city, plus hubs.
pub fn analyze(graph: &RailGraph, config: &AnalysisConfig) -> CentralityReport {
    let betweenness = betweenness_with(graph, config.betweenness_distance, config.normalized);
    let degree = degree_centrality(graph);
    let closeness = closeness_with(graph, config.closeness_distance);
    let clustering = clustering_coefficient(graph);

    let score = |map: &BTreeMap<String, f64>, id: &str| map.get(id).copied().unwrap_or(0.0);
    let mut nodes: Vec<NodeCentrality> = graph
        .nodes()
        .map(|city| NodeCentrality {
            id: city.id.clone(),
            name: city.name.clone(),
            betweenness: score(&betweenness, &city.id),
            degree: score(&degree, &city.id),
            closeness: score(&closeness.scores, &city.id),
            clustering: score(&clustering, &city.id),
        })
        .collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    let hubs = rank(
        betweenness.iter().map(|(id, score)| (id.as_str(), *score)),
        config.hub_count,
    );
    debug!(
        cities = nodes.len(),
        restricted = closeness.restricted.len(),
        "centrality analysis finished"
    );

    CentralityReport {
        nodes,
        hubs,
        average_clustering: average_clustering(graph),
        restricted_closeness: closeness.restricted,
        betweenness_distance: config.betweenness_distance,
        closeness_distance: config.closeness_distance,
    }
}
