//! RemoteSource — fetches snapshots from an HTTP endpoint
//!
//! The endpoint answers `GET` with the `{ nodes, links }` document. Failed
//! requests are not retried unless the caller opts in.

use super::{GraphSource, SourceError, SourceResult};
use crate::graph::GraphData;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

/// HTTP graph endpoint
pub struct RemoteSource {
    url: String,
    http_client: Client,
    retries: u32,
}

impl RemoteSource {
    /// Create a source for the given endpoint URL.
    ///
    /// # Example
    /// ```no_run
    /// # use graphlens::source::RemoteSource;
    /// let source = RemoteSource::new("http://localhost:8000/graph/view?collection=docs");
    /// ```
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            http_client: Client::new(),
            retries: 0,
        }
    }

    /// Retry failed requests up to `retries` more times
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    async fn fetch_once(&self) -> SourceResult<GraphData> {
        let response = self.http_client.get(&self.url).send().await?;

        if response.status().is_success() {
            let text = response.text().await?;
            Ok(GraphData::from_json(&text)?)
        } else {
            let status = response.status().as_u16();
            let error_body: serde_json::Value = response
                .json()
                .await
                .unwrap_or_else(|_| serde_json::json!({"detail": "Unknown error"}));
            let message = error_body
                .get("detail")
                .or_else(|| error_body.get("error"))
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            Err(SourceError::Status { status, message })
        }
    }
}

#[async_trait]
impl GraphSource for RemoteSource {
    async fn load(&self) -> SourceResult<GraphData> {
        let mut attempt = 0;
        loop {
            match self.fetch_once().await {
                Ok(graph) => {
                    debug!(url = %self.url, attempt, "fetched graph");
                    return Ok(graph);
                }
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    warn!(url = %self.url, attempt, error = %e, "graph fetch failed, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retries_are_opt_in() {
        let source = RemoteSource::new("http://localhost:8000/graph");
        assert_eq!(source.retries(), 0);
        assert_eq!(source.with_retries(2).retries(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // Port 9 (discard) on localhost is closed in test environments
        let source = RemoteSource::new("http://127.0.0.1:9/graph");
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, SourceError::Http(_)));
    }
}
