use std::collections::BTreeSet;

use petgraph::graph::{EdgeIndex, NodeIndex};
use tracing::debug;

use crate::{
    config::RoutingConfig,
    error::{RailError, RailResult},
    network::{Objective, RailGraph},
    routing::{
        frontier::explore,
        heuristic::{GreatCircle, Heuristic},
        route::{DualRoute, PathAlgorithm, Recommendation, Route},
    },
};

/// Cheapest route under `objective` (Dijkstra).
pub fn shortest_path(
    graph: &RailGraph,
    source: &str,
    destination: &str,
    objective: Objective,
) -> RailResult<Route> {
    let (from, to) = (graph.resolve(source)?, graph.resolve(destination)?);
    search(graph, from, to, Some(objective), PathAlgorithm::Dijkstra, |_| 0.0)
}

/// Cheapest route under `objective`, guided by `heuristic` (A*).
///
/// Matches [`shortest_path`]'s cost whenever the heuristic is admissible.
pub fn shortest_path_astar<H: Heuristic + ?Sized>(
    graph: &RailGraph,
    source: &str,
    destination: &str,
    objective: Objective,
    heuristic: &H,
) -> RailResult<Route> {
    let (from, to) = (graph.resolve(source)?, graph.resolve(destination)?);
    let goal = graph.city_at(to);
    search(graph, from, to, Some(objective), PathAlgorithm::AStar, |node| {
        heuristic.estimate(graph.city_at(node), goal)
    })
}

/// Route with the fewest links, weights ignored (BFS).
pub fn fewest_transfers(graph: &RailGraph, source: &str, destination: &str) -> RailResult<Route> {
    let (from, to) = (graph.resolve(source)?, graph.resolve(destination)?);
    search(graph, from, to, None, PathAlgorithm::Bfs, |_| 0.0)
}

/// Every city reachable from `source`, including `source` itself.
pub fn reachable_bfs(graph: &RailGraph, source: &str) -> RailResult<BTreeSet<String>> {
    let from = graph.resolve(source)?;
    let tree = explore(graph, from, None, |_| 0.0, |_| false);
    Ok(graph
        .indices()
        .filter(|&node| tree.reached(node))
        .map(|node| graph.city_at(node).id.clone())
        .collect())
}

/// Fastest and cheapest routes with a recommendation, using Dijkstra.
pub fn dual_objective(graph: &RailGraph, source: &str, destination: &str) -> RailResult<DualRoute> {
    dual_objective_with(graph, source, destination, &RoutingConfig::default())
}

/// Fastest and cheapest routes with a recommendation, using the configured algorithm.
pub fn dual_objective_with(
    graph: &RailGraph,
    source: &str,
    destination: &str,
    config: &RoutingConfig,
) -> RailResult<DualRoute> {
    let route_for = |objective: Objective| match config.algorithm {
        PathAlgorithm::Dijkstra => shortest_path(graph, source, destination, objective),
        PathAlgorithm::AStar => {
            let heuristic = GreatCircle::calibrated(graph, objective);
            shortest_path_astar(graph, source, destination, objective, &heuristic)
        }
        PathAlgorithm::Bfs => fewest_transfers(graph, source, destination),
    };

    let time_route = route_for(Objective::Time)?;
    let price_route = route_for(Objective::Price)?;
    let recommendation = Recommendation::between(&time_route, &price_route, config.recommendation_margin);
    Ok(DualRoute {
        time_route,
        price_route,
        recommendation,
    })
}

/// Cheapest route visiting `waypoints` in the given order.
///
/// Each leg is solved independently and the legs are concatenated; the visiting order
/// is not optimised. Fails if any leg is unreachable, without returning a partial route.
pub fn route_through_waypoints<S: AsRef<str>>(
    graph: &RailGraph,
    source: &str,
    waypoints: &[S],
    destination: &str,
    objective: Objective,
) -> RailResult<Route> {
    let mut stops = Vec::with_capacity(waypoints.len() + 2);
    stops.push(graph.resolve(source)?);
    for waypoint in waypoints {
        stops.push(graph.resolve(waypoint.as_ref())?);
    }
    stops.push(graph.resolve(destination)?);

    let mut links: Vec<EdgeIndex> = Vec::new();
    for leg in stops.windows(2) {
        let (from, to) = (leg[0], leg[1]);
        if from == to {
            continue;
        }
        let tree = explore(graph, from, Some(objective), |_| 0.0, |node| node == to);
        let leg_links = tree.links_to(to).ok_or_else(|| no_path(graph, from, to))?;
        links.extend(leg_links);
    }

    debug!(legs = stops.len() - 1, links = links.len(), "waypoint route assembled");
    Ok(Route::from_links(graph, stops[0], &links, Some(objective), PathAlgorithm::Dijkstra))
}

fn search<E>(
    graph: &RailGraph,
    from: NodeIndex,
    to: NodeIndex,
    objective: Option<Objective>,
    algorithm: PathAlgorithm,
    estimate: E,
) -> RailResult<Route>
where
    E: Fn(NodeIndex) -> f64,
{
    if from == to {
        return Ok(Route::stay(graph, from, objective, algorithm));
    }
    let tree = explore(graph, from, objective, estimate, |node| node == to);
    debug!(?algorithm, expanded = tree.expanded, "route search finished");
    let links = tree.links_to(to).ok_or_else(|| no_path(graph, from, to))?;
    Ok(Route::from_links(graph, from, &links, objective, algorithm))
}

fn no_path(graph: &RailGraph, from: NodeIndex, to: NodeIndex) -> RailError {
    RailError::NoPath {
        from: graph.city_at(from).id.clone(),
        to: graph.city_at(to).id.clone(),
    }
}
