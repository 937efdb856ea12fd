//! Visual mapping: blended score -> render attributes
//!
//! `size = size_min + (size_max - size_min) * score^exponent`, and the same
//! for label size with its own bounds. Scores are clamped to [0, 1] before
//! exponentiation because they may come from a server that cannot be
//! re-validated against the normalization invariant.

pub mod palette;

pub use palette::{link_opacity, node_color, CLUSTER_COLOR, LINK_OPACITY_FLOOR};

use crate::graph::{DecorError, DecorResult};
use serde::{Deserialize, Serialize};

/// Mapping parameters; all required
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingConfig {
    /// Emphasis curve; < 1 compresses low scores, > 1 expands them
    pub exponent: f64,
    pub size_min: f64,
    pub size_max: f64,
    pub label_min: f64,
    pub label_max: f64,
}

/// Size attributes for one node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeVisual {
    pub size: f64,
    pub label_size: f64,
}

/// Clamp into [0, 1]; NaN maps to 0
pub fn clamp_unit(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

fn check_bounds(min_field: &'static str, min: f64, max_field: &'static str, max: f64) -> DecorResult<()> {
    if !min.is_finite() {
        return Err(DecorError::invalid_parameter(min_field, format!("must be finite, got {}", min)));
    }
    if !max.is_finite() {
        return Err(DecorError::invalid_parameter(max_field, format!("must be finite, got {}", max)));
    }
    if min > max {
        return Err(DecorError::invalid_parameter(
            min_field,
            format!("must not exceed {} ({} > {})", max_field, min, max),
        ));
    }
    Ok(())
}

impl MappingConfig {
    pub fn validate(&self) -> DecorResult<()> {
        if !(self.exponent > 0.0 && self.exponent.is_finite()) {
            return Err(DecorError::invalid_parameter(
                "exponent",
                format!("must be > 0, got {}", self.exponent),
            ));
        }
        check_bounds("size_min", self.size_min, "size_max", self.size_max)?;
        check_bounds("label_min", self.label_min, "label_max", self.label_max)
    }

    fn curve(&self, score: f64) -> f64 {
        clamp_unit(score).powf(self.exponent)
    }

    pub fn size(&self, score: f64) -> f64 {
        self.size_min + (self.size_max - self.size_min) * self.curve(score)
    }

    pub fn label_size(&self, score: f64) -> f64 {
        self.label_min + (self.label_max - self.label_min) * self.curve(score)
    }

    pub fn map(&self, score: f64) -> NodeVisual {
        NodeVisual {
            size: self.size(score),
            label_size: self.label_size(score),
        }
    }
}
