//! Min-max normalization and weighted blending

use crate::graph::{DecorError, DecorResult, GraphEdge};
use rustc_hash::FxHashMap;

/// Rescale a signal to [0, 1].
///
/// The minimum maps to exactly 0 and the maximum to exactly 1. A constant
/// signal (including a single-node graph) maps to 0 everywhere.
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let range = max - min;
    if values.is_empty() || range <= 0.0 || !range.is_finite() {
        return vec![0.0; values.len()];
    }

    values.iter().map(|&v| (v - min) / range).collect()
}

/// Normalize an integer signal
pub fn min_max_normalize_counts(values: &[usize]) -> Vec<f64> {
    let as_float: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    min_max_normalize(&as_float)
}

/// Weighted sum of normalized signals, one term per `(weight, signal)`.
///
/// Weights are used as given, without renormalization. All signals must have
/// the same length.
pub fn blend(terms: &[(f64, &[f64])]) -> Vec<f64> {
    let len = terms.first().map(|(_, s)| s.len()).unwrap_or(0);
    let mut blended = vec![0.0; len];
    for (weight, signal) in terms {
        debug_assert_eq!(signal.len(), len);
        for (acc, value) in blended.iter_mut().zip(signal.iter()) {
            *acc += weight * value;
        }
    }
    blended
}

/// Score of an edge: mean of its endpoint scores.
///
/// An endpoint absent from `scores` is a referential-integrity error.
pub fn edge_score(scores: &FxHashMap<&str, f64>, edge: &GraphEdge) -> DecorResult<f64> {
    let source = scores
        .get(edge.source.as_str())
        .ok_or_else(|| DecorError::MissingScore(edge.source.clone()))?;
    let target = scores
        .get(edge.target.as_str())
        .ok_or_else(|| DecorError::MissingScore(edge.target.clone()))?;
    Ok((source + target) / 2.0)
}
