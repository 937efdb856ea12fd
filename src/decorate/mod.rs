//! Decoration pipeline
//!
//! `graph -> signals -> blended score -> render attributes -> [clusters]`.
//! Every entry point is a pure function of its arguments: nothing is cached
//! between calls and the input snapshot is never modified.

pub mod model;

pub use model::{DecoratedEdge, DecoratedGraph, DecoratedNode};

use crate::algo::build_view;
use crate::cluster::augment_decorated;
use crate::graph::{DecorError, DecorResult, GraphData};
use crate::scoring::{edge_score, score_indexed, NodeScores, ScoringMode, Signals};
use crate::visual::{clamp_unit, node_color, MappingConfig};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything a decoration pass needs; there are no hidden defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecorationConfig {
    pub scoring: ScoringMode,
    pub mapping: MappingConfig,
    /// Add file cluster nodes after scoring
    pub cluster: bool,
}

impl DecorationConfig {
    pub fn validate(&self) -> DecorResult<()> {
        self.scoring.validate()?;
        self.mapping.validate()
    }
}

/// Config for mapping server-computed scores.
///
/// A `scoring` block is accepted so that one file can drive both pipelines,
/// but it is neither used nor range-checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrecomputedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringMode>,
    pub mapping: MappingConfig,
    /// Add file cluster nodes after mapping
    pub cluster: bool,
}

impl PrecomputedConfig {
    pub fn validate(&self) -> DecorResult<()> {
        self.mapping.validate()
    }
}

impl From<&DecorationConfig> for PrecomputedConfig {
    fn from(config: &DecorationConfig) -> Self {
        Self {
            scoring: Some(config.scoring.clone()),
            mapping: config.mapping,
            cluster: config.cluster,
        }
    }
}

/// Score links whose endpoints are both scored; drop the rest.
///
/// Links to unknown nodes were excluded from the algorithm view, so they are
/// excluded from the output as well.
fn decorate_links(graph: &GraphData, scores: &FxHashMap<&str, f64>) -> DecorResult<Vec<DecoratedEdge>> {
    let mut links = Vec::with_capacity(graph.links.len());
    let mut dropped = 0usize;
    for link in &graph.links {
        if !scores.contains_key(link.source.as_str()) || !scores.contains_key(link.target.as_str()) {
            dropped += 1;
            continue;
        }
        let mut decorated = DecoratedEdge::undecorated(link.clone());
        decorated.apply_score(edge_score(scores, link)?);
        links.push(decorated);
    }
    if dropped > 0 {
        debug!(dropped, "links with unknown endpoints left out of the decorated graph");
    }
    Ok(links)
}

fn attach_signals(nodes: &mut [DecoratedNode], signals: &Signals) {
    match signals {
        Signals::Global {
            pagerank,
            degree,
            kcore,
        } => {
            for (i, node) in nodes.iter_mut().enumerate() {
                node.pagerank = Some(pagerank[i]);
                node.degree = Some(degree[i]);
                node.kcore = Some(kcore[i]);
            }
        }
        Signals::Personalized {
            pagerank,
            degree,
            distance,
            ..
        } => {
            for (i, node) in nodes.iter_mut().enumerate() {
                node.personalized_pagerank = Some(pagerank[i]);
                node.degree = Some(degree[i]);
                node.distance = Some(distance[i]);
            }
        }
    }
}

/// Run the full pipeline on a snapshot.
///
/// Parameters are validated before the graph is touched, so a bad config is
/// rejected before any iteration runs.
pub fn decorate(graph: &GraphData, config: &DecorationConfig) -> DecorResult<DecoratedGraph> {
    config.validate()?;
    graph.validate()?;

    let indexed = build_view(graph);
    let NodeScores { signals, blended } = score_indexed(&indexed, &config.scoring)?;

    let mut nodes: Vec<DecoratedNode> = graph
        .nodes
        .iter()
        .cloned()
        .map(DecoratedNode::undecorated)
        .collect();
    attach_signals(&mut nodes, &signals);
    for (node, &score) in nodes.iter_mut().zip(blended.iter()) {
        node.apply_score(score, &config.mapping);
        node.color = Some(node_color(&node.node.label).to_string());
    }

    let scores: FxHashMap<&str, f64> = indexed
        .ids
        .iter()
        .copied()
        .zip(blended.iter().copied())
        .collect();
    let links = decorate_links(graph, &scores)?;

    let decorated = DecoratedGraph {
        nodes,
        links,
        layout: None,
    };

    info!(
        nodes = decorated.nodes.len(),
        links = decorated.links.len(),
        personalized = matches!(config.scoring, ScoringMode::Personalized(_)),
        "decorated graph"
    );

    if config.cluster {
        augment_decorated(&decorated, &config.mapping)
    } else {
        Ok(decorated)
    }
}

/// Map server-computed `coreScore` values to render attributes.
///
/// Scores are clamped to [0, 1] since they cannot be checked against the
/// normalization invariant. A node without `coreScore` is a
/// referential-integrity error and a NaN score is an input error.
pub fn apply_precomputed_scores(
    graph: &GraphData,
    mapping: &MappingConfig,
) -> DecorResult<DecoratedGraph> {
    mapping.validate()?;
    graph.validate()?;
    if graph.nodes.is_empty() {
        return Err(DecorError::EmptyGraph);
    }

    let mut nodes = Vec::with_capacity(graph.nodes.len());
    let mut scores: FxHashMap<&str, f64> = FxHashMap::default();
    for node in &graph.nodes {
        let raw = node
            .core_score
            .ok_or_else(|| DecorError::MissingScore(node.id.clone()))?;
        if raw.is_nan() {
            return Err(DecorError::InvalidInput(format!(
                "coreScore of node {} is NaN",
                node.id
            )));
        }
        let score = clamp_unit(raw);
        scores.insert(node.id.as_str(), score);

        let mut decorated = DecoratedNode::undecorated(node.clone());
        decorated.apply_score(score, mapping);
        decorated.color = Some(node_color(&node.label).to_string());
        nodes.push(decorated);
    }

    let links = decorate_links(graph, &scores)?;
    Ok(DecoratedGraph {
        nodes,
        links,
        layout: None,
    })
}

/// Map server-computed scores and, when configured, add file clusters.
///
/// Cluster nodes take the peak `coreScore` of their members, the same way
/// they take the peak blended score in [`decorate`].
pub fn decorate_precomputed(
    graph: &GraphData,
    config: &PrecomputedConfig,
) -> DecorResult<DecoratedGraph> {
    config.validate()?;
    let decorated = apply_precomputed_scores(graph, &config.mapping)?;

    info!(
        nodes = decorated.nodes.len(),
        links = decorated.links.len(),
        "mapped precomputed scores"
    );

    if config.cluster {
        augment_decorated(&decorated, &config.mapping)
    } else {
        Ok(decorated)
    }
}
