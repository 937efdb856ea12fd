//! Graphlens
//!
//! Structural decoration for graph viewers: given a directed graph pulled
//! from a graph database, compute importance scores entirely in-process and
//! turn them into render attributes (node size, label size, color, link
//! opacity), optionally re-clustering nodes by file path.
//!
//! # Pipeline
//!
//! 1. **Scoring** ([`scoring`]): global mode blends PageRank, undirected
//!    degree and k-core; personalized mode blends personalized PageRank,
//!    degree and a hop-distance decay from a seed set.
//! 2. **Normalization & blending**: each signal is min-max normalized and
//!    combined with caller-supplied weights.
//! 3. **Visual mapping** ([`visual`]): a power-law curve between declared
//!    bounds.
//! 4. **Cluster augmentation** ([`cluster`]): one `File` node per path, with
//!    membership edges and peak-member scores.
//! 5. **Force layout** ([`layout`]): spring parameters per edge type.
//!
//! All stages are pure functions; the input snapshot is never modified and
//! nothing is cached between calls.
//!
//! ## Example Usage
//!
//! ```rust
//! use graphlens::{decorate, DecorationConfig, GlobalScoring, GraphData, MappingConfig, ScoringMode};
//!
//! let graph = GraphData::from_json(r#"{
//!     "nodes": [
//!         {"id": "n1", "label": "Routine", "path": "/a/f"},
//!         {"id": "n2", "label": "Routine", "path": "/a/f"},
//!         {"id": "n3", "label": "Object", "path": "/b/g"}
//!     ],
//!     "links": [{"source": "n1", "target": "n3", "type": "CALLS"}]
//! }"#).unwrap();
//!
//! let config = DecorationConfig {
//!     scoring: ScoringMode::Global(GlobalScoring {
//!         alpha: 0.6,
//!         beta: 0.2,
//!         gamma: 0.2,
//!         damping_factor: 0.85,
//!         iterations: 20,
//!     }),
//!     mapping: MappingConfig {
//!         exponent: 0.8,
//!         size_min: 2.0,
//!         size_max: 12.0,
//!         label_min: 8.0,
//!         label_max: 18.0,
//!     },
//!     cluster: true,
//! };
//!
//! let decorated = decorate(&graph, &config).unwrap();
//! assert_eq!(decorated.nodes.len(), 5); // 3 nodes + 2 file clusters
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod cluster;
pub mod config;
pub mod decorate;
pub mod graph;
pub mod layout;
pub mod scoring;
pub mod source;
pub mod visual;

// Re-export main types for convenience
pub use graph::{DecorError, DecorResult, ErrorKind, GraphData, GraphEdge, GraphNode, GraphPath};

pub use scoring::{GlobalScoring, PersonalizedScoring, ScoringMode};

pub use decorate::{
    apply_precomputed_scores, decorate, decorate_precomputed, DecoratedEdge, DecoratedGraph,
    DecoratedNode, DecorationConfig, PrecomputedConfig,
};

pub use cluster::{augment_decorated, augment_with_file_clusters};

pub use layout::{force_layout, link_force, ForceLayout, LinkForce};

pub use visual::MappingConfig;

pub use config::{load_config, load_precomputed_config, ConfigError};

pub use source::{FileSource, GraphSnapshot, GraphSource, RemoteSource, SourceError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
