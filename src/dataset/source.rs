/*!
Dataset acquisition.

This module defines:
- `SourceError`: what can go wrong while fetching and shaping the input.
- `DatasetSource`: an async trait returning a raw [`Dataset`].

Sources only fetch; turning a dataset into a graph is [`NetworkBuilder`]'s job, and
[`load_network`] glues the two together.
*/

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::{
    dataset::{builder::NetworkBuilder, model::Dataset},
    error::RailError,
    network::RailGraph,
};

/// Bundled national network.
const EMBEDDED_DATASET: &str = include_str!("../../data/china_hsr.json");

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid network: {0}")]
    Build(#[from] RailError),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// A provider of static city and link data.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch_dataset(&mut self) -> SourceResult<Dataset>;
}

/// Reads a JSON dataset from disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for JsonFileSource {
    async fn fetch_dataset(&mut self) -> SourceResult<Dataset> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), bytes = json.len(), "dataset read");
        Ok(Dataset::from_json_str(&json)?)
    }
}

/// The dataset compiled into the binary.
#[derive(Debug, Default)]
pub struct EmbeddedSource;

#[async_trait]
impl DatasetSource for EmbeddedSource {
    async fn fetch_dataset(&mut self) -> SourceResult<Dataset> {
        Ok(Dataset::from_json_str(EMBEDDED_DATASET)?)
    }
}

/// Fetch a dataset from `source` and build the graph.
pub async fn load_network(
    source: &mut dyn DatasetSource,
    builder: &NetworkBuilder,
) -> SourceResult<RailGraph> {
    let dataset = source.fetch_dataset().await?;
    Ok(builder.build(dataset)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_dataset_builds_connected_network() {
        let graph = load_network(&mut EmbeddedSource, &NetworkBuilder::default())
            .await
            .expect("embedded dataset must build");

        assert!(graph.city_count() >= 20);
        assert!(graph.is_connected());
        assert!(graph.has_node("beijing"));
        assert!(graph.has_node("shanghai"));
    }

    #[tokio::test]
    async fn test_json_file_source() {
        let path = std::env::temp_dir().join(format!("rail-network-{}.json", std::process::id()));
        tokio::fs::write(&path, include_str!("../../test_data/toy_network.json"))
            .await
            .unwrap();

        let mut source = JsonFileSource::new(&path);
        let dataset = source.fetch_dataset().await;
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(dataset.unwrap().cities.len(), 4);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let mut source = JsonFileSource::new("/definitely/not/here.json");
        let err = source.fetch_dataset().await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
