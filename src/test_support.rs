//! Graph fixtures shared by unit tests.

use std::collections::HashSet;

use rand::{Rng, rngs::StdRng};

use crate::{
    dataset::{Dataset, NetworkBuilder},
    network::{City, Coordinates, LinkWeights, RailGraph, RailLink},
};

pub fn load(json: &str) -> RailGraph {
    NetworkBuilder::default()
        .build(Dataset::from_json_str(json).unwrap())
        .unwrap()
}

pub fn china() -> RailGraph {
    load(include_str!("../data/china_hsr.json"))
}

pub fn toy() -> RailGraph {
    load(include_str!("../test_data/toy_network.json"))
}

pub fn two_islands() -> RailGraph {
    load(include_str!("../test_data/two_islands.json"))
}

/// Graph with unit weights, all cities at the origin.
pub fn unit_graph(ids: &[&str], links: &[(&str, &str)]) -> RailGraph {
    let cities = ids
        .iter()
        .map(|id| City::new(*id, *id, Coordinates::new(0.0, 0.0)))
        .collect();
    let links = links
        .iter()
        .map(|(a, b)| RailLink::new(*a, *b, LinkWeights::new(1.0, 1.0)))
        .collect();
    RailGraph::new(cities, links).unwrap()
}

/// Connected graph: a random spanning tree plus extra links, integral weights.
pub fn random_graph(rng: &mut StdRng, n: usize, extra: usize) -> RailGraph {
    let cities: Vec<City> = (0..n)
        .map(|i| {
            City::new(
                format!("c{i:02}"),
                format!("City {i}"),
                Coordinates::new(rng.random_range(20.0..45.0), rng.random_range(100.0..125.0)),
            )
        })
        .collect();
    let mut seen = HashSet::new();
    let mut links = Vec::new();
    let mut add = |a: usize, b: usize, rng: &mut StdRng| {
        let key = (a.min(b), a.max(b));
        if a != b && seen.insert(key) {
            links.push(RailLink::new(
                format!("c{a:02}"),
                format!("c{b:02}"),
                LinkWeights::new(rng.random_range(1..20u32) as f64, rng.random_range(1..20u32) as f64),
            ));
        }
    };
    for i in 1..n {
        let parent = rng.random_range(0..i);
        add(i, parent, rng);
    }
    for _ in 0..extra {
        let (a, b) = (rng.random_range(0..n), rng.random_range(0..n));
        add(a, b, rng);
    }
    RailGraph::new(cities, links).unwrap()
}
