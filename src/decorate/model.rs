//! Decorated graph: the input shape plus computed render attributes
//!
//! Computed fields carry a leading underscore on the wire (`_score`,
//! `_size`, `_labelSize`, `_pr`/`_ppr`, `_deg`, `_kcore`/`_dist`) so they
//! never collide with properties coming from the graph database.

use crate::graph::{DecorError, DecorResult, GraphData, GraphEdge, GraphNode};
use crate::layout::ForceLayout;
use crate::visual::{link_opacity, MappingConfig};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Distinguish an explicit `null` from an absent field
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A node with its structural signals and render attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoratedNode {
    #[serde(flatten)]
    pub node: GraphNode,
    /// Global PageRank
    #[serde(rename = "_pr", default, skip_serializing_if = "Option::is_none")]
    pub pagerank: Option<f64>,
    /// Personalized PageRank
    #[serde(rename = "_ppr", default, skip_serializing_if = "Option::is_none")]
    pub personalized_pagerank: Option<f64>,
    /// Undirected degree
    #[serde(rename = "_deg", default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<usize>,
    #[serde(rename = "_kcore", default, skip_serializing_if = "Option::is_none")]
    pub kcore: Option<usize>,
    /// Hops from the nearest seed. `Some(None)` (serialized as `null`) means
    /// unreachable; `None` means the mode has no distance signal.
    #[serde(
        rename = "_dist",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub distance: Option<Option<usize>>,
    /// Blended score in [0, 1]
    #[serde(rename = "_score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(rename = "_size", default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(rename = "_labelSize", default, skip_serializing_if = "Option::is_none")]
    pub label_size: Option<f64>,
    #[serde(rename = "_color", default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl DecoratedNode {
    /// Wrap a node without any decoration
    pub fn undecorated(node: GraphNode) -> Self {
        Self {
            node,
            pagerank: None,
            personalized_pagerank: None,
            degree: None,
            kcore: None,
            distance: None,
            score: None,
            size: None,
            label_size: None,
            color: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.node.id
    }

    /// Set the blended score and the sizes derived from it
    pub fn apply_score(&mut self, score: f64, mapping: &MappingConfig) {
        let visual = mapping.map(score);
        self.score = Some(score);
        self.size = Some(visual.size);
        self.label_size = Some(visual.label_size);
    }
}

/// A link with its score and opacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoratedEdge {
    #[serde(flatten)]
    pub edge: GraphEdge,
    #[serde(rename = "_score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(rename = "_opacity", default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl DecoratedEdge {
    pub fn undecorated(edge: GraphEdge) -> Self {
        Self {
            edge,
            score: None,
            opacity: None,
        }
    }

    pub fn apply_score(&mut self, score: f64) {
        self.score = Some(score);
        self.opacity = Some(link_opacity(score));
    }
}

/// Output of a decoration pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecoratedGraph {
    pub nodes: Vec<DecoratedNode>,
    #[serde(alias = "edges")]
    pub links: Vec<DecoratedEdge>,
    /// Spring parameters for the renderer, attached on request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<ForceLayout>,
}

impl DecoratedGraph {
    /// Parse a decorated document, e.g. one produced by an earlier pass
    pub fn from_json(json: &str) -> DecorResult<Self> {
        serde_json::from_str(json).map_err(|e| DecorError::InvalidInput(e.to_string()))
    }

    pub fn node(&self, id: &str) -> Option<&DecoratedNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Blended scores of every node that has one
    pub fn score_map(&self) -> FxHashMap<&str, f64> {
        self.nodes
            .iter()
            .filter_map(|n| n.score.map(|s| (n.id(), s)))
            .collect()
    }

    /// Strip decorations, keeping the raw snapshot
    pub fn to_graph_data(&self) -> GraphData {
        GraphData {
            nodes: self.nodes.iter().map(|n| n.node.clone()).collect(),
            links: self.links.iter().map(|l| l.edge.clone()).collect(),
        }
    }
}
