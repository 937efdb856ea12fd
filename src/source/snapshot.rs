//! Last-good snapshot holder

use super::{GraphSource, SourceResult};
use crate::graph::GraphData;
use std::sync::Arc;
use tracing::{info, warn};

/// Holds the most recent successfully loaded graph.
///
/// `refresh` only replaces the held graph after a load completes
/// successfully. A failed load returns the error and keeps the previous
/// graph; a cancelled load (future dropped) never reaches the swap.
#[derive(Debug, Default, Clone)]
pub struct GraphSnapshot {
    current: Option<Arc<GraphData>>,
    generation: u64,
}

impl GraphSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The held graph, if any load has succeeded yet
    pub fn current(&self) -> Option<Arc<GraphData>> {
        self.current.clone()
    }

    /// Number of successful refreshes
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub async fn refresh(&mut self, source: &dyn GraphSource) -> SourceResult<Arc<GraphData>> {
        match source.load().await {
            Ok(graph) => {
                let graph = Arc::new(graph);
                self.current = Some(Arc::clone(&graph));
                self.generation += 1;
                info!(
                    source = %source.describe(),
                    nodes = graph.node_count(),
                    links = graph.edge_count(),
                    generation = self.generation,
                    "graph snapshot refreshed"
                );
                Ok(graph)
            }
            Err(e) => {
                warn!(source = %source.describe(), error = %e, "graph refresh failed, keeping previous snapshot");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DecorError, GraphNode};
    use crate::source::SourceError;
    use async_trait::async_trait;
    use std::time::Duration;

    struct Fixed(GraphData);

    #[async_trait]
    impl GraphSource for Fixed {
        async fn load(&self) -> SourceResult<GraphData> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    struct Failing;

    #[async_trait]
    impl GraphSource for Failing {
        async fn load(&self) -> SourceResult<GraphData> {
            Err(SourceError::Graph(DecorError::InvalidInput("boom".into())))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    struct Slow;

    #[async_trait]
    impl GraphSource for Slow {
        async fn load(&self) -> SourceResult<GraphData> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(GraphData::default())
        }

        fn describe(&self) -> String {
            "slow".to_string()
        }
    }

    fn one_node() -> GraphData {
        GraphData::new(vec![GraphNode::new("a", "Routine")], vec![])
    }

    #[tokio::test]
    async fn test_refresh_swaps_on_success() {
        let mut snapshot = GraphSnapshot::new();
        assert!(snapshot.current().is_none());

        snapshot.refresh(&Fixed(one_node())).await.unwrap();
        assert_eq!(snapshot.generation(), 1);
        assert_eq!(snapshot.current().unwrap().node_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous() {
        let mut snapshot = GraphSnapshot::new();
        snapshot.refresh(&Fixed(one_node())).await.unwrap();

        assert!(snapshot.refresh(&Failing).await.is_err());
        assert_eq!(snapshot.generation(), 1);
        assert_eq!(*snapshot.current().unwrap(), one_node());
    }

    #[tokio::test]
    async fn test_cancelled_refresh_keeps_previous() {
        let mut snapshot = GraphSnapshot::new();
        snapshot.refresh(&Fixed(one_node())).await.unwrap();

        let cancelled =
            tokio::time::timeout(Duration::from_millis(10), snapshot.refresh(&Slow)).await;
        assert!(cancelled.is_err());
        assert_eq!(snapshot.generation(), 1);
        assert_eq!(*snapshot.current().unwrap(), one_node());
    }
}
