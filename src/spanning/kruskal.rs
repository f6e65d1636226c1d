use petgraph::graph::EdgeIndex;
use tracing::debug;

use crate::network::{Objective, RailGraph};

use super::{
    tree::{MstAlgorithm, SpanningTree, TraceEvent, TraceSink, TreeEdge},
    union_find::DisjointSet,
};

/// Kruskal over links sorted by (weight, smaller id, larger id).
pub fn mst_kruskal_traced(
    graph: &RailGraph,
    objective: Objective,
    sink: &mut dyn TraceSink,
) -> SpanningTree {
    let mut order: Vec<EdgeIndex> = graph.link_indices().collect();
    order.sort_by(|a, b| {
        let (la, lb) = (graph.link_at(*a), graph.link_at(*b));
        la.weight(objective)
            .total_cmp(&lb.weight(objective))
            .then_with(|| la.key().cmp(&lb.key()))
    });

    let mut sets = DisjointSet::new(graph.city_count());
    let mut edges = Vec::new();
    let mut total_cost = 0.0;

    for index in order {
        let link = graph.link_at(index);
        let weight = link.weight(objective);
        let (a, b) = graph.endpoints(index);
        sink.record(TraceEvent::Considered {
            from: link.from.clone(),
            to: link.to.clone(),
            weight,
        });

        if !sets.union(a.index(), b.index()) {
            sink.record(TraceEvent::Rejected {
                from: link.from.clone(),
                to: link.to.clone(),
                weight,
            });
            continue;
        }

        total_cost += weight;
        sink.record(TraceEvent::Accepted {
            from: link.from.clone(),
            to: link.to.clone(),
            weight,
            total: total_cost,
        });
        edges.push(TreeEdge {
            from: link.from.clone(),
            to: link.to.clone(),
            weight,
        });
    }

    let component_count = sets.set_count();
    debug!(
        edges = edges.len(),
        total_cost, component_count, "kruskal finished"
    );

    SpanningTree {
        algorithm: MstAlgorithm::Kruskal,
        objective,
        nodes: graph.nodes().map(|city| city.id.clone()).collect(),
        edges,
        total_cost,
        is_forest: component_count > 1,
        component_count,
        steps: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{City, Coordinates, LinkWeights, RailLink};

    #[test]
    fn test_equal_weights_break_on_ids() {
        let cities = ["x", "y", "z"]
            .into_iter()
            .map(|id| City::new(id, id, Coordinates::new(0.0, 0.0)))
            .collect();
        let links = vec![
            RailLink::new("z", "y", LinkWeights::new(1.0, 1.0)),
            RailLink::new("y", "x", LinkWeights::new(1.0, 1.0)),
            RailLink::new("x", "z", LinkWeights::new(1.0, 1.0)),
        ];
        let graph = RailGraph::new(cities, links).unwrap();

        let mut events = Vec::new();
        let tree = mst_kruskal_traced(&graph, Objective::Price, &mut events);

        let considered: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Considered { from, to, .. } => Some((from.as_str(), to.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(considered, vec![("y", "x"), ("x", "z"), ("z", "y")]);
        assert_eq!(tree.edges.len(), 2);
        assert_eq!(tree.total_cost, 2.0);
        assert!(matches!(events.last(), Some(TraceEvent::Rejected { .. })));
    }
}
