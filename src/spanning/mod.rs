/*!
Minimum spanning trees over the rail network.

Both algorithms take a `TraceSink` that sees every considered link and whether it was
accepted or rejected, so a caller can replay the construction. On a disconnected network
the result is a spanning forest, flagged through `SpanningTree::is_forest`.
*/

pub mod kruskal;
pub mod prim;
pub mod tree;
pub mod union_find;

pub use kruskal::mst_kruskal_traced;
pub use prim::mst_prim_traced;
pub use tree::{MstAlgorithm, NoTrace, SpanningTree, TraceEvent, TraceSink, TreeEdge};
pub use union_find::DisjointSet;

use crate::network::{Objective, RailGraph};

/// Prim's tree with its construction trace attached.
pub fn mst_prim(graph: &RailGraph, objective: Objective) -> SpanningTree {
    minimum_spanning_tree(graph, MstAlgorithm::Prim, objective)
}

/// Kruskal's tree with its construction trace attached.
pub fn mst_kruskal(graph: &RailGraph, objective: Objective) -> SpanningTree {
    minimum_spanning_tree(graph, MstAlgorithm::Kruskal, objective)
}

pub fn minimum_spanning_tree(
    graph: &RailGraph,
    algorithm: MstAlgorithm,
    objective: Objective,
) -> SpanningTree {
    let mut steps = Vec::new();
    let mut tree = traced(graph, algorithm, objective, &mut steps);
    tree.steps = steps;
    tree
}

/// Only the construction trace, for playback.
pub fn mst_steps(graph: &RailGraph, algorithm: MstAlgorithm, objective: Objective) -> Vec<TraceEvent> {
    let mut steps = Vec::new();
    traced(graph, algorithm, objective, &mut steps);
    steps
}

fn traced(
    graph: &RailGraph,
    algorithm: MstAlgorithm,
    objective: Objective,
    sink: &mut dyn TraceSink,
) -> SpanningTree {
    match algorithm {
        MstAlgorithm::Prim => mst_prim_traced(graph, objective, sink),
        MstAlgorithm::Kruskal => mst_kruskal_traced(graph, objective, sink),
    }
}
