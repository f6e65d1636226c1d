use serde::Serialize;

use crate::network::rail_graph::RailGraph;

/// Summary figures for a network, as shown on the overview screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub avg_degree: f64,
    /// Highest-degree city; ties go to the lowest identifier.
    pub max_degree_city: Option<String>,
    pub max_degree: usize,
    pub is_connected: bool,
    pub component_count: usize,
}

impl NetworkStats {
    pub fn of(graph: &RailGraph) -> Self {
        let node_count = graph.city_count();
        let edge_count = graph.link_count();

        let mut max_degree_city: Option<(&str, usize)> = None;
        for index in graph.indices() {
            let city = graph.city_at(index);
            let degree = graph.hops(index).len();
            let better = match max_degree_city {
                None => true,
                Some((id, best)) => degree > best || (degree == best && city.id.as_str() < id),
            };
            if better {
                max_degree_city = Some((city.id.as_str(), degree));
            }
        }

        let avg_degree = if node_count == 0 {
            0.0
        } else {
            2.0 * edge_count as f64 / node_count as f64
        };
        let component_count = graph.components().len();

        Self {
            node_count,
            edge_count,
            avg_degree,
            max_degree_city: max_degree_city.map(|(id, _)| id.to_string()),
            max_degree: max_degree_city.map(|(_, degree)| degree).unwrap_or(0),
            is_connected: component_count <= 1,
            component_count,
        }
    }
}
