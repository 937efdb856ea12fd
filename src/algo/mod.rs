//! Graph algorithms module
//!
//! Algorithms are implemented in the `graphlens-algorithms` crate over a
//! dense CSR view. This module provides the adapter layer from a
//! [`GraphData`] snapshot to that view.

use crate::graph::GraphData;
use graphlens_algorithms::GraphView;
use rustc_hash::FxHashMap;
use tracing::debug;

// Re-export algorithms
pub use graphlens_algorithms::{
    core_numbers, multi_source_bfs, page_rank, personalized_page_rank, undirected_degree,
    undirected_neighbors, PageRankConfig, PowerIteration,
};

/// A CSR view plus the mapping between dense indices and node ids
pub struct IndexedGraph<'a> {
    pub view: GraphView,
    /// Dense index -> node id
    pub ids: Vec<&'a str>,
    /// Node id -> dense index
    pub index: FxHashMap<&'a str, usize>,
    /// Links dropped because an endpoint is not in the node set
    pub skipped_links: usize,
}

impl<'a> IndexedGraph<'a> {
    pub fn node_count(&self) -> usize {
        self.view.node_count
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }
}

/// Build the algorithm view for a snapshot.
///
/// Node order is preserved: index `i` is `graph.nodes[i]`. Links whose
/// source or target is unknown are silently excluded, since filtered queries
/// routinely return partial subgraphs. Ids are expected to be unique (see
/// [`GraphData::validate`]); on a duplicate the first occurrence wins.
pub fn build_view(graph: &GraphData) -> IndexedGraph<'_> {
    let node_count = graph.nodes.len();

    // 1. Build index mappings
    let mut ids = Vec::with_capacity(node_count);
    let mut index = FxHashMap::default();
    index.reserve(node_count);
    for (idx, node) in graph.nodes.iter().enumerate() {
        ids.push(node.id.as_str());
        index.entry(node.id.as_str()).or_insert(idx);
    }

    // 2. Resolve links
    let mut edges = Vec::with_capacity(graph.links.len());
    let mut skipped_links = 0;
    for link in &graph.links {
        match (index.get(link.source.as_str()), index.get(link.target.as_str())) {
            (Some(&u), Some(&v)) => edges.push((u, v)),
            _ => skipped_links += 1,
        }
    }

    if skipped_links > 0 {
        debug!(skipped_links, "links with unknown endpoints excluded from view");
    }

    // 3. Convert to CSR
    let view = GraphView::from_edges(node_count, &edges);

    IndexedGraph {
        view,
        ids,
        index,
        skipped_links,
    }
}
