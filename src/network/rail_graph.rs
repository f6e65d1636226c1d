use std::collections::{HashMap, HashSet};

use petgraph::{
    graph::{EdgeIndex, NodeIndex, UnGraph},
    visit::{Bfs, EdgeRef},
};

use crate::{
    error::{RailError, RailResult},
    network::{
        city::City,
        link::{LinkWeights, Objective, RailLink},
        stats::NetworkStats,
    },
};

/// A neighbouring city together with the weights of the link leading to it.
#[derive(Debug, Clone, Copy)]
pub struct Adjacent<'a> {
    pub city: &'a City,
    pub weights: LinkWeights,
}

/// Index-level adjacency entry used by the engines.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Hop {
    pub to: NodeIndex,
    pub link: EdgeIndex,
    pub weights: LinkWeights,
}

impl Hop {
    pub fn cost(&self, objective: Objective) -> f64 {
        self.weights.get(objective)
    }
}

/// The rail network: cities as nodes, undirected links carrying a time and a price.
///
/// Built once and never mutated afterwards. City identifiers are mapped to stable
/// petgraph indices, which the engines use for dense per-node arrays; node indices
/// follow city insertion order and edge indices follow link insertion order.
#[derive(Debug, Clone, Default)]
pub struct RailGraph {
    graph: UnGraph<City, RailLink>,
    city_id_to_index_map: HashMap<String, NodeIndex>,
}

impl RailGraph {
    /// Build a graph, enforcing every structural invariant.
    ///
    /// Fails on duplicate cities, self-loops, links to unknown cities, repeated city
    /// pairs and weights that are negative or not finite. Policies such as merging
    /// duplicates belong to [`crate::dataset::NetworkBuilder`], which calls this last.
    pub fn new(cities: Vec<City>, links: Vec<RailLink>) -> RailResult<Self> {
        let mut graph = UnGraph::with_capacity(cities.len(), links.len());
        let mut city_id_to_index_map = HashMap::with_capacity(cities.len());

        for city in cities {
            if city_id_to_index_map.contains_key(&city.id) {
                return Err(RailError::DuplicateCity(city.id));
            }
            let id = city.id.clone();
            let index = graph.add_node(city);
            city_id_to_index_map.insert(id, index);
        }

        let mut seen = HashSet::with_capacity(links.len());
        for link in links {
            if link.from == link.to {
                return Err(RailError::SelfLoop(link.from));
            }
            if let Some((objective, value)) = link.weights.first_invalid() {
                return Err(RailError::InvalidWeight {
                    from: link.from,
                    to: link.to,
                    objective,
                    value,
                });
            }
            let (Some(&a), Some(&b)) = (
                city_id_to_index_map.get(&link.from),
                city_id_to_index_map.get(&link.to),
            ) else {
                return Err(RailError::DanglingLink {
                    from: link.from,
                    to: link.to,
                });
            };
            let key = link.key();
            if !seen.insert(key.clone()) {
                return Err(RailError::DuplicateLink { a: key.a, b: key.b });
            }
            graph.add_edge(a, b, link);
        }

        Ok(Self {
            graph,
            city_id_to_index_map,
        })
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.city_id_to_index_map.contains_key(id)
    }

    pub fn city(&self, id: &str) -> RailResult<&City> {
        self.resolve(id).map(|index| &self.graph[index])
    }

    /// All cities in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &City> {
        self.graph.node_weights()
    }

    /// All links in insertion order.
    pub fn links(&self) -> impl Iterator<Item = &RailLink> {
        self.graph.edge_weights()
    }

    pub fn city_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Neighbours of `id` with the weights of the connecting links, in link insertion order.
    pub fn neighbors(&self, id: &str) -> RailResult<Vec<Adjacent<'_>>> {
        let index = self.resolve(id)?;
        Ok(self
            .hops(index)
            .into_iter()
            .map(|hop| Adjacent {
                city: &self.graph[hop.to],
                weights: hop.weights,
            })
            .collect())
    }

    pub fn link_between(&self, a: &str, b: &str) -> RailResult<Option<&RailLink>> {
        let (a, b) = (self.resolve(a)?, self.resolve(b)?);
        Ok(self.graph.find_edge(a, b).map(|edge| &self.graph[edge]))
    }

    /// Scalar cost of the link between `a` and `b` under `objective`, if they are linked.
    pub fn weight(&self, a: &str, b: &str, objective: Objective) -> RailResult<Option<f64>> {
        Ok(self.link_between(a, b)?.map(|link| link.weight(objective)))
    }

    pub fn degree(&self, id: &str) -> RailResult<usize> {
        let index = self.resolve(id)?;
        Ok(self.graph.edges(index).count())
    }

    /// Connected components, each sorted by city id, ordered by their smallest member.
    pub fn components(&self) -> Vec<Vec<&str>> {
        let mut visited = vec![false; self.city_count()];
        let mut components = Vec::new();
        for start in self.graph.node_indices() {
            if visited[start.index()] {
                continue;
            }
            let mut members = Vec::new();
            let mut bfs = Bfs::new(&self.graph, start);
            while let Some(index) = bfs.next(&self.graph) {
                visited[index.index()] = true;
                members.push(self.graph[index].id.as_str());
            }
            members.sort_unstable();
            components.push(members);
        }
        components.sort_by(|a, b| a[0].cmp(b[0]));
        components
    }

    pub fn is_connected(&self) -> bool {
        self.components().len() <= 1
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats::of(self)
    }

    pub(crate) fn resolve(&self, id: &str) -> RailResult<NodeIndex> {
        self.city_id_to_index_map
            .get(id)
            .copied()
            .ok_or_else(|| RailError::UnknownNode(id.to_string()))
    }

    pub(crate) fn city_at(&self, index: NodeIndex) -> &City {
        &self.graph[index]
    }

    pub(crate) fn link_at(&self, index: EdgeIndex) -> &RailLink {
        &self.graph[index]
    }

    pub(crate) fn indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    pub(crate) fn link_indices(&self) -> impl Iterator<Item = EdgeIndex> {
        self.graph.edge_indices()
    }

    pub(crate) fn endpoints(&self, link: EdgeIndex) -> (NodeIndex, NodeIndex) {
        // Edge indices handed out by this graph always exist.
        self.graph
            .edge_endpoints(link)
            .unwrap_or((NodeIndex::end(), NodeIndex::end()))
    }

    /// Outgoing hops of `index`, sorted by link insertion order for deterministic traversal.
    pub(crate) fn hops(&self, index: NodeIndex) -> Vec<Hop> {
        let mut hops: Vec<Hop> = self
            .graph
            .edges(index)
            .map(|edge| {
                let to = if edge.source() == index {
                    edge.target()
                } else {
                    edge.source()
                };
                Hop {
                    to,
                    link: edge.id(),
                    weights: edge.weight().weights,
                }
            })
            .collect();
        hops.sort_unstable_by_key(|hop| hop.link);
        hops
    }

    pub(crate) fn are_adjacent(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.contains_edge(a, b)
    }

    #[cfg(test)]
    pub(crate) fn petgraph(&self) -> &UnGraph<City, RailLink> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::city::Coordinates;

    fn city(id: &str) -> City {
        City::new(id, id.to_uppercase(), Coordinates::new(30.0, 110.0))
    }

    fn link(a: &str, b: &str, time: f64, price: f64) -> RailLink {
        RailLink::new(a, b, LinkWeights::new(time, price))
    }

    fn triangle() -> RailGraph {
        RailGraph::new(
            vec![city("a"), city("b"), city("c"), city("d")],
            vec![link("a", "b", 1.0, 10.0), link("b", "c", 2.0, 20.0), link("a", "c", 4.0, 5.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_neighbors_follow_link_order() {
        let graph = triangle();
        let neighbors = graph.neighbors("a").unwrap();
        let ids: Vec<_> = neighbors.iter().map(|n| n.city.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(neighbors[1].weights, LinkWeights::new(4.0, 5.0));

        // Symmetric view from the other end
        let from_c: Vec<_> = graph.neighbors("c").unwrap().iter().map(|n| n.city.id.clone()).collect();
        assert_eq!(from_c, vec!["b", "a"]);
        assert!(graph.neighbors("d").unwrap().is_empty());
    }

    #[test]
    fn test_weight_lookup() {
        let graph = triangle();
        assert_eq!(graph.weight("c", "a", Objective::Price).unwrap(), Some(5.0));
        assert_eq!(graph.weight("a", "b", Objective::Time).unwrap(), Some(1.0));
        assert_eq!(graph.weight("a", "d", Objective::Time).unwrap(), None);
        assert_eq!(
            graph.weight("a", "x", Objective::Time),
            Err(RailError::UnknownNode("x".into()))
        );
    }

    #[test]
    fn test_unknown_node_queries() {
        let graph = triangle();
        assert!(graph.has_node("a"));
        assert!(!graph.has_node("z"));
        assert_eq!(graph.city("z").unwrap_err(), RailError::UnknownNode("z".into()));
        assert!(matches!(graph.neighbors("z"), Err(RailError::UnknownNode(_))));
        assert!(matches!(graph.degree("z"), Err(RailError::UnknownNode(_))));
    }

    #[test]
    fn test_construction_invariants() {
        assert_eq!(
            RailGraph::new(vec![city("a")], vec![link("a", "a", 1.0, 1.0)]).unwrap_err(),
            RailError::SelfLoop("a".into())
        );
        assert_eq!(
            RailGraph::new(vec![city("a"), city("a")], vec![]).unwrap_err(),
            RailError::DuplicateCity("a".into())
        );
        assert_eq!(
            RailGraph::new(
                vec![city("a"), city("b")],
                vec![link("a", "b", 1.0, 1.0), link("b", "a", 2.0, 2.0)]
            )
            .unwrap_err(),
            RailError::DuplicateLink { a: "a".into(), b: "b".into() }
        );
        assert!(matches!(
            RailGraph::new(vec![city("a")], vec![link("a", "b", 1.0, 1.0)]),
            Err(RailError::DanglingLink { .. })
        ));
        assert!(matches!(
            RailGraph::new(vec![city("a"), city("b")], vec![link("a", "b", 1.0, -3.0)]),
            Err(RailError::InvalidWeight { objective: Objective::Price, .. })
        ));
    }

    #[test]
    fn test_components() {
        let graph = RailGraph::new(
            vec![city("e"), city("b"), city("a"), city("d"), city("c")],
            vec![link("e", "d", 1.0, 1.0), link("a", "b", 1.0, 1.0)],
        )
        .unwrap();
        assert_eq!(graph.components(), vec![vec!["a", "b"], vec!["c"], vec!["d", "e"]]);
        assert!(!graph.is_connected());
        assert!(triangle().components().len() == 2);
        assert!(RailGraph::default().is_connected());
    }
}
