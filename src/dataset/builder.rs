use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use crate::{
    config::{BuildConfig, DuplicatePolicy},
    dataset::model::Dataset,
    error::{RailError, RailResult},
    network::{City, RailGraph, RailLink},
};

/// Turns a raw [`Dataset`] into a [`RailGraph`], applying the configured policies for
/// repeated city pairs and links to unknown cities. Weight validation is not optional:
/// malformed weights fail the build.
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    config: BuildConfig,
}

impl NetworkBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn build(&self, dataset: Dataset) -> RailResult<RailGraph> {
        let cities: Vec<City> = dataset.cities.into_iter().map(City::from).collect();
        let known: HashSet<&str> = cities.iter().map(|city| city.id.as_str()).collect();

        // Slot per distinct city pair, in order of first appearance.
        let mut slots: Vec<RailLink> = Vec::with_capacity(dataset.links.len());
        let mut slot_by_key = HashMap::with_capacity(dataset.links.len());
        let mut skipped = 0usize;

        for record in dataset.links {
            let link = RailLink::from(record);
            if !known.contains(link.from.as_str()) || !known.contains(link.to.as_str()) {
                if !self.config.skip_dangling_links {
                    return Err(RailError::DanglingLink {
                        from: link.from,
                        to: link.to,
                    });
                }
                warn!(from = %link.from, to = %link.to, "skipping link to unknown city");
                skipped += 1;
                continue;
            }

            let key = link.key();
            match slot_by_key.get(&key) {
                None => {
                    slot_by_key.insert(key, slots.len());
                    slots.push(link);
                }
                Some(&slot) => match self.config.duplicate_links {
                    DuplicatePolicy::Reject => {
                        return Err(RailError::DuplicateLink { a: key.a, b: key.b });
                    }
                    DuplicatePolicy::KeepFirst => {
                        warn!(a = %key.a, b = %key.b, "ignoring repeated link");
                        skipped += 1;
                    }
                    DuplicatePolicy::KeepLast => {
                        warn!(a = %key.a, b = %key.b, "repeated link replaces earlier definition");
                        slots[slot] = link;
                    }
                },
            }
        }

        let graph = RailGraph::new(cities, slots)?;
        info!(
            cities = graph.city_count(),
            links = graph.link_count(),
            skipped,
            "rail network built"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Objective;

    fn messy() -> Dataset {
        Dataset::from_json_str(include_str!("../../test_data/messy_network.json")).unwrap()
    }

    #[test]
    fn test_keep_last_replaces_in_place() {
        let graph = NetworkBuilder::default().build(messy()).unwrap();
        assert_eq!(graph.city_count(), 3);
        assert_eq!(graph.link_count(), 2);
        assert_eq!(graph.weight("nanjing", "hefei", Objective::Time).unwrap(), Some(0.9));
        assert_eq!(graph.weight("nanjing", "hefei", Objective::Price).unwrap(), Some(55.0));
        // First appearance keeps its position
        let first = graph.links().next().unwrap();
        assert_eq!(first.key().endpoints(), ("hefei", "nanjing"));
    }

    #[test]
    fn test_keep_first() {
        let builder = NetworkBuilder::new(BuildConfig {
            duplicate_links: DuplicatePolicy::KeepFirst,
            ..BuildConfig::default()
        });
        let graph = builder.build(messy()).unwrap();
        assert_eq!(graph.weight("hefei", "nanjing", Objective::Price).unwrap(), Some(60.0));
    }

    #[test]
    fn test_reject_duplicates() {
        let builder = NetworkBuilder::new(BuildConfig {
            duplicate_links: DuplicatePolicy::Reject,
            ..BuildConfig::default()
        });
        assert_eq!(
            builder.build(messy()).unwrap_err(),
            RailError::DuplicateLink { a: "hefei".into(), b: "nanjing".into() }
        );
    }

    #[test]
    fn test_dangling_links_fail_when_not_skipped() {
        let builder = NetworkBuilder::new(BuildConfig {
            duplicate_links: DuplicatePolicy::KeepLast,
            skip_dangling_links: false,
        });
        assert_eq!(
            builder.build(messy()).unwrap_err(),
            RailError::DanglingLink { from: "wuhan".into(), to: "atlantis".into() }
        );
    }

    #[test]
    fn test_invalid_weight_fails_at_build_time() {
        let mut dataset = messy();
        dataset.links[2].time = -2.0;
        assert!(matches!(
            NetworkBuilder::default().build(dataset),
            Err(RailError::InvalidWeight { objective: Objective::Time, value, .. }) if value == -2.0
        ));
    }
}
