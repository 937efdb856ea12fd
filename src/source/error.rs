//! Error types for graph sources

use crate::graph::DecorError;
use thiserror::Error;

/// Errors that can occur while loading a graph snapshot
#[derive(Error, Debug)]
pub enum SourceError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not a valid graph snapshot
    #[error(transparent)]
    Graph(#[from] DecorError),
}

pub type SourceResult<T> = Result<T, SourceError>;
