/*!
Shortest-path engine.

Structure:
- `frontier`: the single best-first traversal behind Dijkstra, A* and BFS.
- `heuristic`: the `Heuristic` trait for A*, with a zero and a great-circle estimate.
- `route`: result values (`Route`, `DualRoute`, `Recommendation`).
- `engine`: the public queries.
*/

mod frontier;

pub mod engine;
pub mod heuristic;
pub mod route;

pub use engine::{
    dual_objective, dual_objective_with, fewest_transfers, reachable_bfs, route_through_waypoints,
    shortest_path, shortest_path_astar,
};
pub use heuristic::{GreatCircle, Heuristic, ZeroHeuristic};
pub use route::{DualRoute, PathAlgorithm, Recommendation, Route, RouteChoice, RouteSegment};

pub(crate) use frontier::explore;
