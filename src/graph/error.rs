//! Errors raised by the decoration core

use thiserror::Error;

/// Broad class of a [`DecorError`], for callers that translate failures into
/// user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed graph data
    InputShape,
    /// A tunable outside its declared domain
    ParameterRange,
    /// A stage referenced a node without a required score
    ReferentialIntegrity,
    /// Personalized mode without any seed in the graph
    SeedAvailability,
}

/// Errors that can occur while scoring, mapping or clustering a graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecorError {
    #[error("Invalid graph data: {0}")]
    InvalidInput(String),

    #[error("Duplicate node id {0}")]
    DuplicateNodeId(String),

    #[error("Graph has no nodes")]
    EmptyGraph,

    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("Node {0} has no computed score")]
    MissingScore(String),

    #[error("None of the {0} seed(s) are present in the graph")]
    NoSeedsPresent(usize),
}

impl DecorError {
    pub fn invalid_parameter(field: &'static str, reason: impl Into<String>) -> Self {
        DecorError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DecorError::InvalidInput(_) | DecorError::DuplicateNodeId(_) | DecorError::EmptyGraph => {
                ErrorKind::InputShape
            }
            DecorError::InvalidParameter { .. } => ErrorKind::ParameterRange,
            DecorError::MissingScore(_) => ErrorKind::ReferentialIntegrity,
            DecorError::NoSeedsPresent(_) => ErrorKind::SeedAvailability,
        }
    }
}

pub type DecorResult<T> = Result<T, DecorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_names_field() {
        let err = DecorError::invalid_parameter("damping_factor", "must be in (0, 1), got 1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `damping_factor`: must be in (0, 1), got 1"
        );
        assert_eq!(err.kind(), ErrorKind::ParameterRange);
    }

    #[test]
    fn test_error_kinds_are_distinguishable() {
        assert_eq!(DecorError::EmptyGraph.kind(), ErrorKind::InputShape);
        assert_eq!(DecorError::MissingScore("n1".into()).kind(), ErrorKind::ReferentialIntegrity);
        assert_eq!(DecorError::NoSeedsPresent(2).kind(), ErrorKind::SeedAvailability);
    }
}
