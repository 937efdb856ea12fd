//! Force-layout spring parameters per edge type
//!
//! Membership edges pull members tightly around their cluster node; every
//! other relationship gets a long, weak spring so semantic structure stays
//! loose and explorable. The lookup is static.

use crate::cluster::MEMBERSHIP_TYPE;
use crate::decorate::DecoratedGraph;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Spring parameters of one link
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkForce {
    /// Target length
    pub distance: f64,
    /// Spring stiffness in [0, 1]
    pub strength: f64,
}

pub const MEMBERSHIP_FORCE: LinkForce = LinkForce {
    distance: 12.0,
    strength: 1.0,
};

pub const SEMANTIC_FORCE: LinkForce = LinkForce {
    distance: 90.0,
    strength: 0.08,
};

/// Many-body repulsion applied to every node
pub const CHARGE_STRENGTH: f64 = -60.0;

/// Spring parameters for an edge type
pub fn link_force(edge_type: &str) -> LinkForce {
    if edge_type == MEMBERSHIP_TYPE {
        MEMBERSHIP_FORCE
    } else {
        SEMANTIC_FORCE
    }
}

/// Spring parameters for one edge type present in a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeTypeForce {
    #[serde(rename = "type")]
    pub edge_type: String,
    #[serde(flatten)]
    pub force: LinkForce,
}

/// Simulation settings handed to the renderer alongside a decorated graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceLayout {
    pub charge_strength: f64,
    pub links: Vec<EdgeTypeForce>,
}

/// Layout settings for the edge types of `graph`, in order of first appearance
pub fn force_layout(graph: &DecoratedGraph) -> ForceLayout {
    let types: IndexSet<&str> = graph
        .links
        .iter()
        .map(|l| l.edge.edge_type.as_str())
        .collect();

    ForceLayout {
        charge_strength: CHARGE_STRENGTH,
        links: types
            .into_iter()
            .map(|t| EdgeTypeForce {
                edge_type: t.to_string(),
                force: link_force(t),
            })
            .collect(),
    }
}
