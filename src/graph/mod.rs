//! Graph data model
//!
//! Plain node/edge containers consumed by every stage of the decoration
//! pipeline. Snapshots are immutable inputs; decoration produces new values.

pub mod error;
pub mod paths;
pub mod types;

pub use error::{DecorError, DecorResult, ErrorKind};
pub use paths::GraphPath;
pub use types::{GraphData, GraphEdge, GraphNode};

pub(crate) use types::deserialize_ids;
