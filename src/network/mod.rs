/*
 * This module defines the graph model shared by every engine: cities, undirected links
 * carrying a time and a price, and the immutable `RailGraph` that owns them.
 * Engines only ever see one scalar per link, picked by an `Objective`.
 */

pub mod city;
pub mod link;
pub mod rail_graph;
pub mod stats;

pub use city::{City, Coordinates};
pub use link::{LinkWeights, Objective, RailLink, UndirectedLinkKey};
pub use rail_graph::{Adjacent, RailGraph};
pub use stats::NetworkStats;
