//! Merge path fragments returned by the question-answering endpoint
//!
//! The answer payload carries `graph_paths: [{nodes, edges}]`, one fragment
//! per retrieved path. Fragments overlap, so merging deduplicates nodes by id
//! and edges by `(source, target, type)`.

use super::types::{GraphData, GraphEdge, GraphNode};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// One retrieved path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphPath {
    pub nodes: Vec<GraphNode>,
    #[serde(alias = "links")]
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    /// Merge path fragments into one snapshot. The first occurrence of a node
    /// id wins; order of first appearance is preserved.
    pub fn from_paths(paths: &[GraphPath]) -> GraphData {
        let mut seen_nodes: FxHashSet<&str> = FxHashSet::default();
        let mut seen_edges: FxHashSet<(&str, &str, &str)> = FxHashSet::default();
        let mut nodes = Vec::new();
        let mut links = Vec::new();

        for path in paths {
            for node in &path.nodes {
                if seen_nodes.insert(node.id.as_str()) {
                    nodes.push(node.clone());
                }
            }
            for edge in &path.edges {
                if seen_edges.insert(edge.key()) {
                    links.push(edge.clone());
                }
            }
        }

        GraphData { nodes, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overlapping_paths() {
        let json = r#"[
            {"nodes": [{"id": 1, "label": "Routine"}, {"id": 2, "label": "Table"}],
             "edges": [{"type": "READS", "source": 1, "target": 2}]},
            {"nodes": [{"id": 2, "label": "Table"}, {"id": 3, "label": "Routine"}],
             "edges": [{"type": "READS", "source": 1, "target": 2},
                       {"type": "WRITES", "source": 1, "target": 2},
                       {"type": "READS", "source": 3, "target": 2}]}
        ]"#;
        let paths: Vec<GraphPath> = serde_json::from_str(json).unwrap();
        let graph = GraphData::from_paths(&paths);

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        // READS 1->2 deduplicated, WRITES 1->2 kept as a distinct parallel edge
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(GraphData::from_paths(&[]), GraphData::default());
    }
}
