/*!
Structural importance of cities.

- `local`: degree centrality and clustering, which only look at a city's own links.
- `paths`: closeness and betweenness, built on single-source shortest paths.
- `report`: rankings and the bundled `CentralityReport`.
*/

pub mod local;
pub mod paths;
pub mod report;

pub use local::{average_clustering, clustering_coefficient, degree_centrality};
pub use paths::{Closeness, betweenness_centrality, betweenness_with, closeness_centrality, closeness_with};
pub use report::{CentralityReport, Metric, NodeCentrality, RankedCity, analyze, top_hubs, top_hubs_with};
