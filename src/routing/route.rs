use std::{fmt::Display, time::Duration};

use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::network::{Objective, RailGraph};

/// Search strategy used to produce a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathAlgorithm {
    #[default]
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
    /// Fewest links, weights ignored.
    Bfs,
}

impl PathAlgorithm {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dijkstra" => Some(Self::Dijkstra),
            "astar" | "a*" => Some(Self::AStar),
            "bfs" => Some(Self::Bfs),
            _ => None,
        }
    }
}

/// One link travelled along a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegment {
    pub source: String,
    pub target: String,
    pub time: f64,
    pub price: f64,
}

/// Result of a shortest-path query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// City identifiers from source to destination.
    pub path: Vec<String>,
    pub total_time: f64,
    pub total_price: f64,
    /// Weight that was minimised; `None` for fewest-link routes.
    pub objective: Option<Objective>,
    pub algorithm: PathAlgorithm,
    pub segments: Vec<RouteSegment>,
}

impl Route {
    /// Zero-length route that stays at `city`.
    pub(crate) fn stay(
        graph: &RailGraph,
        city: NodeIndex,
        objective: Option<Objective>,
        algorithm: PathAlgorithm,
    ) -> Self {
        Self::from_links(graph, city, &[], objective, algorithm)
    }

    /// Route starting at `start` and following `links` in order.
    pub(crate) fn from_links(
        graph: &RailGraph,
        start: NodeIndex,
        links: &[EdgeIndex],
        objective: Option<Objective>,
        algorithm: PathAlgorithm,
    ) -> Self {
        let mut path = Vec::with_capacity(links.len() + 1);
        let mut segments = Vec::with_capacity(links.len());
        let mut current = start;
        path.push(graph.city_at(current).id.clone());

        for &link in links {
            let (a, b) = graph.endpoints(link);
            let next = if a == current { b } else { a };
            let weights = graph.link_at(link).weights;
            segments.push(RouteSegment {
                source: graph.city_at(current).id.clone(),
                target: graph.city_at(next).id.clone(),
                time: weights.time,
                price: weights.price,
            });
            path.push(graph.city_at(next).id.clone());
            current = next;
        }

        Self {
            total_time: segments.iter().map(|segment| segment.time).sum(),
            total_price: segments.iter().map(|segment| segment.price).sum(),
            path,
            objective,
            algorithm,
            segments,
        }
    }

    pub fn source(&self) -> &str {
        &self.path[0]
    }

    pub fn destination(&self) -> &str {
        &self.path[self.path.len() - 1]
    }

    /// Accumulated cost under `objective`.
    pub fn cost(&self, objective: Objective) -> f64 {
        match objective {
            Objective::Time => self.total_time,
            Objective::Price => self.total_price,
        }
    }

    /// Number of links travelled.
    pub fn hops(&self) -> usize {
        self.segments.len()
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs((self.total_time * 3600.0).round() as u64)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, ¥{:.2}, {} stops)",
            self.path.join(" > "),
            humantime::format_duration(self.duration()),
            self.total_price,
            self.path.len()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteChoice {
    /// Both objectives pick the same route.
    Identical,
    Fastest,
    Cheapest,
}

/// Which of the two routes to suggest, with the relative savings behind the choice.
///
/// `time_saving` is the fraction of the cheapest route's time that the fastest route
/// saves; `price_saving` the fraction of the fastest route's price that the cheapest
/// route saves. The fastest route wins when its saving is at least the other's plus
/// the configured margin. This is a presentation heuristic, not an optimality claim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub choice: RouteChoice,
    pub time_saving: f64,
    pub price_saving: f64,
}

impl Recommendation {
    pub fn between(fastest: &Route, cheapest: &Route, margin: f64) -> Self {
        let time_saving = relative_saving(cheapest.total_time, fastest.total_time);
        let price_saving = relative_saving(fastest.total_price, cheapest.total_price);
        let choice = if fastest.path == cheapest.path {
            RouteChoice::Identical
        } else if time_saving >= price_saving + margin {
            RouteChoice::Fastest
        } else {
            RouteChoice::Cheapest
        };
        Self {
            choice,
            time_saving,
            price_saving,
        }
    }
}

fn relative_saving(baseline: f64, improved: f64) -> f64 {
    if baseline > 0.0 {
        (baseline - improved) / baseline
    } else {
        0.0
    }
}

/// Fastest and cheapest routes between the same two cities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DualRoute {
    pub time_route: Route,
    pub price_route: Route,
    pub recommendation: Recommendation,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &[&str], time: f64, price: f64) -> Route {
        Route {
            path: path.iter().map(|s| s.to_string()).collect(),
            total_time: time,
            total_price: price,
            objective: None,
            algorithm: PathAlgorithm::Dijkstra,
            segments: vec![],
        }
    }

    #[test]
    fn test_recommendation_rule() {
        // 50% faster but only 10% more expensive -> fastest
        let fastest = route(&["a", "b"], 2.0, 110.0);
        let cheapest = route(&["a", "c", "b"], 4.0, 100.0);
        let rec = Recommendation::between(&fastest, &cheapest, 0.0);
        assert_eq!(rec.choice, RouteChoice::Fastest);
        assert!((rec.time_saving - 0.5).abs() < 1e-12);
        assert!((rec.price_saving - 10.0 / 110.0).abs() < 1e-12);

        // a large margin flips it
        assert_eq!(Recommendation::between(&fastest, &cheapest, 0.5).choice, RouteChoice::Cheapest);

        // 5% faster but half the price -> cheapest
        let fastest = route(&["a", "b"], 3.8, 200.0);
        let cheapest = route(&["a", "c", "b"], 4.0, 100.0);
        assert_eq!(Recommendation::between(&fastest, &cheapest, 0.0).choice, RouteChoice::Cheapest);

        let same = route(&["a", "b"], 1.0, 1.0);
        assert_eq!(Recommendation::between(&same, &same, 0.0).choice, RouteChoice::Identical);
    }

    #[test]
    fn test_zero_baselines() {
        let stay = route(&["a"], 0.0, 0.0);
        let rec = Recommendation::between(&stay, &stay, 0.0);
        assert_eq!(rec.time_saving, 0.0);
        assert_eq!(rec.price_saving, 0.0);
    }

    #[test]
    fn test_display() {
        let r = route(&["beijing", "jinan", "shanghai"], 4.5, 553.0);
        assert_eq!(r.to_string(), "beijing > jinan > shanghai (4h 30m, ¥553.00, 3 stops)");
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(PathAlgorithm::from_str("A*"), Some(PathAlgorithm::AStar));
        assert_eq!(serde_json::to_string(&PathAlgorithm::AStar).unwrap(), "\"astar\"");
        assert_eq!(
            serde_json::from_str::<PathAlgorithm>("\"bfs\"").unwrap(),
            PathAlgorithm::Bfs
        );
    }
}
