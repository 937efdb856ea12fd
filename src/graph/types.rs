//! Core type definitions for graph snapshots
//!
//! A snapshot is the `{ nodes, links }` document produced by the graph
//! database query layer. Optional metadata is modeled as explicit `Option`
//! fields so that "absent" and "present but empty" stay distinguishable.

use super::error::{DecorError, DecorResult};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize};

/// Node identifiers arrive either as strings or as integer element ids.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Integer(i) => i.to_string(),
    })
}

/// Id lists (such as seed sets) accept the same string-or-integer forms.
pub(crate) fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Vec::<RawId>::deserialize(deserializer)?
        .into_iter()
        .map(|raw| match raw {
            RawId::Text(s) => s,
            RawId::Integer(i) => i.to_string(),
        })
        .collect())
}

/// A node of the graph snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Stable identifier, unique within a snapshot
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Category discriminator (e.g. "Routine", "File")
    pub label: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Grouping key for clustering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Importance computed server-side, if the query layer supplied one
    #[serde(default, rename = "coreScore", skip_serializing_if = "Option::is_none")]
    pub core_score: Option<f64>,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            title: None,
            path: None,
            core_score: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_core_score(mut self, score: f64) -> Self {
        self.core_score = Some(score);
        self
    }

    /// Grouping key used by clustering.
    ///
    /// A missing path and an empty path both mean "ungrouped".
    pub fn group_key(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

/// A directed, typed edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    #[serde(deserialize_with = "deserialize_id")]
    pub source: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub target: String,
    /// Relationship kind (free-form)
    #[serde(rename = "type")]
    pub edge_type: String,
}

impl GraphEdge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        edge_type: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            edge_type: edge_type.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Identity of an edge: parallel edges with different types are distinct
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.source, &self.target, &self.edge_type)
    }
}

/// A graph snapshot: nodes plus directed links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    #[serde(alias = "edges")]
    pub links: Vec<GraphEdge>,
}

impl GraphData {
    pub fn new(nodes: Vec<GraphNode>, links: Vec<GraphEdge>) -> Self {
        Self { nodes, links }
    }

    /// Parse a `{ nodes, links }` JSON document.
    ///
    /// Missing arrays or wrongly typed fields are input-shape errors.
    pub fn from_json(json: &str) -> DecorResult<Self> {
        serde_json::from_str(json).map_err(|e| DecorError::InvalidInput(e.to_string()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.links.len()
    }

    /// Check node id uniqueness.
    ///
    /// Links to unknown ids are not an error; they are skipped when the
    /// algorithm view is built.
    pub fn validate(&self) -> DecorResult<()> {
        let mut seen = FxHashSet::default();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(DecorError::DuplicateNodeId(node.id.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot() {
        let json = r#"{
            "nodes": [
                {"id": "n1", "label": "Routine", "title": "Post", "path": "/a/f"},
                {"id": 42, "label": "Object"}
            ],
            "links": [{"source": "n1", "target": 42, "type": "CALLS"}]
        }"#;
        let graph = GraphData::from_json(json).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.nodes[0].title.as_deref(), Some("Post"));
        assert_eq!(graph.nodes[1].id, "42");
        assert_eq!(graph.links[0].target, "42");
        assert_eq!(graph.links[0].edge_type, "CALLS");
    }

    #[test]
    fn test_edges_alias() {
        let json = r#"{"nodes": [], "edges": []}"#;
        assert!(GraphData::from_json(json).is_ok());
    }

    #[test]
    fn test_missing_arrays_rejected() {
        let err = GraphData::from_json(r#"{"nodes": []}"#).unwrap_err();
        assert!(matches!(err, DecorError::InvalidInput(_)));

        let err = GraphData::from_json(r#"{"links": []}"#).unwrap_err();
        assert!(matches!(err, DecorError::InvalidInput(_)));

        let err = GraphData::from_json(r#"{"nodes": {}, "links": []}"#).unwrap_err();
        assert!(matches!(err, DecorError::InvalidInput(_)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let graph = GraphData::new(
            vec![GraphNode::new("a", "X"), GraphNode::new("a", "Y")],
            vec![],
        );
        assert_eq!(graph.validate(), Err(DecorError::DuplicateNodeId("a".into())));
    }

    #[test]
    fn test_group_key_treats_empty_as_ungrouped() {
        assert_eq!(GraphNode::new("a", "X").group_key(), None);
        assert_eq!(GraphNode::new("a", "X").with_path("").group_key(), None);
        assert_eq!(GraphNode::new("a", "X").with_path("/a/f").group_key(), Some("/a/f"));
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let node = GraphNode::new("n1", "Routine");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, serde_json::json!({"id": "n1", "label": "Routine"}));
    }
}
