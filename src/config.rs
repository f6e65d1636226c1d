/*!
Engine configuration.

Every section has defaults, so a config file only needs the keys it changes:

```json
{ "analysis": { "closeness_distance": "time", "hub_count": 10 } }
```
*/

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{network::Objective, routing::PathAlgorithm};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What to do when the input lists the same city pair twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    Reject,
    KeepFirst,
    #[default]
    KeepLast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub duplicate_links: DuplicatePolicy,
    /// Drop links whose endpoints are not in the city list instead of failing.
    pub skip_dangling_links: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            duplicate_links: DuplicatePolicy::default(),
            skip_dangling_links: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Extra relative time saving the fastest route needs before it is recommended
    /// over the cheapest one.
    pub recommendation_margin: f64,
    pub algorithm: PathAlgorithm,
}

/// Distance used by the path-based centrality measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMode {
    /// Every link counts as one.
    Hops,
    Time,
    Price,
}

impl DistanceMode {
    pub fn objective(&self) -> Option<Objective> {
        match self {
            DistanceMode::Hops => None,
            DistanceMode::Time => Some(Objective::Time),
            DistanceMode::Price => Some(Objective::Price),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub closeness_distance: DistanceMode,
    pub betweenness_distance: DistanceMode,
    /// Scale betweenness to the fraction of city pairs, rather than raw pair counts.
    pub normalized: bool,
    pub hub_count: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            closeness_distance: DistanceMode::Hops,
            betweenness_distance: DistanceMode::Time,
            normalized: true,
            hub_count: 5,
        }
    }
}

impl AnalysisConfig {
    pub fn with_betweenness_distance(mut self, mode: DistanceMode) -> Self {
        self.betweenness_distance = mode;
        self
    }

    pub fn with_closeness_distance(mut self, mode: DistanceMode) -> Self {
        self.closeness_distance = mode;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub build: BuildConfig,
    pub routing: RoutingConfig,
    pub analysis: AnalysisConfig,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = include_str!("../test_data/partial_config.json");
        let config = EngineConfig::from_json_str(json).expect("Failed to parse config");

        assert_eq!(config.analysis.closeness_distance, DistanceMode::Time);
        assert_eq!(config.analysis.hub_count, 10);
        assert_eq!(config.analysis.betweenness_distance, DistanceMode::Time);
        assert!(config.analysis.normalized);
        assert_eq!(config.build.duplicate_links, DuplicatePolicy::Reject);
        assert!(config.build.skip_dangling_links);
        assert_eq!(config.routing, RoutingConfig::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_malformed_config() {
        let err = EngineConfig::from_json_str(r#"{ "analysis": { "hub_count": "many" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(matches!(
            EngineConfig::from_file("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
