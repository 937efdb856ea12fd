//! Cluster augmentation by grouping key
//!
//! Adds one synthetic `File` node per distinct non-empty `path` and a
//! `membership` edge from every grouped node to its cluster node. Cluster ids
//! are `file:` + path, so augmenting an already augmented graph finds the
//! existing nodes and edges and adds nothing.
//!
//! Inputs are never mutated; both entry points return a new superset.

use crate::decorate::{DecoratedEdge, DecoratedGraph, DecoratedNode};
use crate::graph::{DecorError, DecorResult, GraphData, GraphEdge, GraphNode};
use crate::scoring::edge_score;
use crate::visual::{MappingConfig, CLUSTER_COLOR};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Reserved id prefix of cluster nodes
pub const CLUSTER_PREFIX: &str = "file:";
/// Label of cluster nodes
pub const CLUSTER_LABEL: &str = "File";
/// Type of member -> cluster edges
pub const MEMBERSHIP_TYPE: &str = "membership";

/// Id of the cluster node for a grouping key
pub fn cluster_id(key: &str) -> String {
    format!("{}{}", CLUSTER_PREFIX, key)
}

pub fn is_cluster_node(node: &GraphNode) -> bool {
    node.id.starts_with(CLUSTER_PREFIX)
}

pub fn is_membership_edge(edge: &GraphEdge) -> bool {
    edge.edge_type == MEMBERSHIP_TYPE
}

fn cluster_node(key: &str) -> GraphNode {
    GraphNode::new(cluster_id(key), CLUSTER_LABEL)
        .with_title(key)
        .with_path(key)
}

/// Grouping key -> member ids, in order of first appearance.
///
/// Cluster nodes themselves are never members. Nodes whose path is missing or
/// empty are left ungrouped.
pub fn file_groups<'a, I>(nodes: I) -> IndexMap<&'a str, Vec<&'a str>>
where
    I: IntoIterator<Item = &'a GraphNode>,
{
    let mut groups: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for node in nodes {
        if is_cluster_node(node) {
            continue;
        }
        if let Some(key) = node.group_key() {
            groups.entry(key).or_default().push(node.id.as_str());
        }
    }
    groups
}

/// Nodes and edges to add for a set of groups, skipping anything present
struct Additions {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

fn plan_additions<'a>(
    groups: &IndexMap<&'a str, Vec<&'a str>>,
    existing_ids: &FxHashSet<&str>,
    existing_edges: &FxHashSet<(&str, &str, &str)>,
) -> Additions {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for (key, members) in groups {
        let id = cluster_id(key);
        for member in members {
            if !existing_edges.contains(&(*member, id.as_str(), MEMBERSHIP_TYPE)) {
                edges.push(GraphEdge::new(*member, id.clone(), MEMBERSHIP_TYPE));
            }
        }
        if !existing_ids.contains(id.as_str()) {
            nodes.push(cluster_node(key));
        }
    }

    Additions { nodes, edges }
}

/// Structural augmentation of a raw snapshot
pub fn augment_with_file_clusters(graph: &GraphData) -> GraphData {
    let groups = file_groups(&graph.nodes);
    let existing_ids: FxHashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    let existing_edges: FxHashSet<(&str, &str, &str)> = graph.links.iter().map(GraphEdge::key).collect();
    let additions = plan_additions(&groups, &existing_ids, &existing_edges);

    debug!(
        groups = groups.len(),
        new_nodes = additions.nodes.len(),
        new_edges = additions.edges.len(),
        "file cluster augmentation"
    );

    let mut out = graph.clone();
    out.nodes.extend(additions.nodes);
    out.links.extend(additions.edges);
    out
}

/// Augment a scored graph and score the cluster structure.
///
/// A cluster node's score is the maximum blended score of its members; its
/// sizes are mapped from that score. Membership edges get the mean of their
/// endpoint scores. Fails if any member has no score, which means the graph
/// was not scored first. Existing cluster nodes are refreshed in place.
pub fn augment_decorated(
    graph: &DecoratedGraph,
    mapping: &MappingConfig,
) -> DecorResult<DecoratedGraph> {
    let mut out = graph.clone();

    let additions = {
        let raw: Vec<&GraphNode> = graph.nodes.iter().map(|n| &n.node).collect();
        let groups = file_groups(raw.iter().copied());
        let existing_ids: FxHashSet<&str> = graph.nodes.iter().map(|n| n.id()).collect();
        let existing_edges: FxHashSet<(&str, &str, &str)> =
            graph.links.iter().map(|l| l.edge.key()).collect();
        plan_additions(&groups, &existing_ids, &existing_edges)
    };
    out.nodes
        .extend(additions.nodes.into_iter().map(DecoratedNode::undecorated));
    out.links
        .extend(additions.edges.into_iter().map(DecoratedEdge::undecorated));

    // Peak member score per cluster
    let cluster_scores: FxHashMap<String, f64> = {
        let member_scores: FxHashMap<&str, Option<f64>> =
            out.nodes.iter().map(|n| (n.id(), n.score)).collect();
        let mut peaks = FxHashMap::default();
        for (key, members) in file_groups(out.nodes.iter().map(|n| &n.node)) {
            let mut peak = f64::NEG_INFINITY;
            for member in members {
                let score = member_scores
                    .get(member)
                    .copied()
                    .flatten()
                    .ok_or_else(|| DecorError::MissingScore(member.to_string()))?;
                peak = peak.max(score);
            }
            peaks.insert(cluster_id(key), peak);
        }
        peaks
    };

    for node in out.nodes.iter_mut() {
        if let Some(&score) = cluster_scores.get(node.id()) {
            node.apply_score(score, mapping);
            node.color = Some(CLUSTER_COLOR.to_string());
        }
    }

    let scores: FxHashMap<String, f64> = out
        .nodes
        .iter()
        .filter_map(|n| n.score.map(|s| (n.id().to_string(), s)))
        .collect();
    let score_refs: FxHashMap<&str, f64> = scores.iter().map(|(k, v)| (k.as_str(), *v)).collect();

    for link in out.links.iter_mut() {
        if is_membership_edge(&link.edge) {
            let score = edge_score(&score_refs, &link.edge)?;
            link.apply_score(score);
        }
    }

    debug!(
        clusters = cluster_scores.len(),
        nodes = out.nodes.len(),
        links = out.links.len(),
        "scored file clusters"
    );

    Ok(out)
}
