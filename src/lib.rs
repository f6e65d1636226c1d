/*!
Analysis engine for a national high-speed rail network.

The network is loaded once from a static dataset and then queried read-only:
- `routing`: shortest routes by travel time or price (Dijkstra, A*, fewest transfers),
  dual-objective comparison and routes through waypoints.
- `spanning`: minimum spanning trees (Prim, Kruskal) with a replayable construction trace.
- `centrality`: degree, closeness, betweenness and clustering, plus hub ranking.

```no_run
use rail_network::{EmbeddedSource, NetworkBuilder, Objective, load_network, shortest_path};

# async fn run() -> Result<(), Box<dyn std::error::Error>> {
let graph = load_network(&mut EmbeddedSource, &NetworkBuilder::default()).await?;
let route = shortest_path(&graph, "beijing", "shanghai", Objective::Time)?;
println!("{route}");
# Ok(())
# }
```
*/

pub mod centrality;
pub mod config;
pub mod dataset;
pub mod error;
pub mod network;
pub mod routing;
pub mod spanning;

#[cfg(test)]
mod test_support;

pub use centrality::{CentralityReport, Metric, analyze, top_hubs};
pub use config::{AnalysisConfig, BuildConfig, DistanceMode, EngineConfig, RoutingConfig};
pub use dataset::{DatasetSource, EmbeddedSource, JsonFileSource, NetworkBuilder, load_network};
pub use error::{RailError, RailResult};
pub use network::{City, Objective, RailGraph, RailLink};
pub use routing::{
    DualRoute, PathAlgorithm, Route, dual_objective, route_through_waypoints, shortest_path,
    shortest_path_astar,
};
pub use spanning::{MstAlgorithm, SpanningTree, TraceEvent, minimum_spanning_tree};
