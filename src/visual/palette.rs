//! Colors and link opacity

use super::clamp_unit;

/// Categorical palette; a node label always maps to the same entry
const COLORS: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Color of synthesized cluster nodes
pub const CLUSTER_COLOR: &str = "#4b5563";

/// Opacity of a link with score 0
pub const LINK_OPACITY_FLOOR: f64 = 0.15;

/// Stable color for a node label (FNV-1a over the label bytes)
pub fn node_color(label: &str) -> &'static str {
    let hash = label
        .bytes()
        .fold(0xcbf29ce484222325u64, |h, b| (h ^ b as u64).wrapping_mul(0x100000001b3));
    COLORS[(hash % COLORS.len() as u64) as usize]
}

/// Link opacity, linear in the clamped link score above the floor
pub fn link_opacity(score: f64) -> f64 {
    LINK_OPACITY_FLOOR + (1.0 - LINK_OPACITY_FLOOR) * clamp_unit(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_stable() {
        assert_eq!(node_color("Routine"), node_color("Routine"));
        assert!(COLORS.contains(&node_color("")));
    }

    #[test]
    fn test_link_opacity_range() {
        assert_eq!(link_opacity(0.0), LINK_OPACITY_FLOOR);
        assert!((link_opacity(1.0) - 1.0).abs() < 1e-12);
        assert_eq!(link_opacity(4.0), link_opacity(1.0));
    }
}
