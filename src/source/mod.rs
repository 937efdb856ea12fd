//! Graph sources: where raw snapshots come from
//!
//! Fetching is the only asynchronous step around the decoration core. A
//! [`GraphSnapshot`] keeps the last good graph and swaps a new one in only
//! after a load has fully succeeded.

pub mod error;
pub mod file;
pub mod remote;
pub mod snapshot;

pub use error::{SourceError, SourceResult};
pub use file::FileSource;
pub use remote::RemoteSource;
pub use snapshot::GraphSnapshot;

use crate::graph::GraphData;
use async_trait::async_trait;

/// Anything that can produce a graph snapshot
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Load one complete snapshot. Dropping the returned future cancels the load.
    async fn load(&self) -> SourceResult<GraphData>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}
