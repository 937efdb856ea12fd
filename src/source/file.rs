//! Snapshots stored as JSON files

use super::{GraphSource, SourceResult};
use crate::graph::GraphData;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads a `{ nodes, links }` JSON document from disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl GraphSource for FileSource {
    async fn load(&self) -> SourceResult<GraphData> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(GraphData::from_json(&text)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
