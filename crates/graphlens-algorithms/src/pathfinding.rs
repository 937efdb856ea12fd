//! Pathfinding algorithms
//!
//! Multi-source breadth-first search over directed out-edges.

use super::common::GraphView;
use std::collections::VecDeque;

/// Hop distance from the nearest seed for every node.
///
/// All seeds start at distance 0 and the frontier expands along out-edges
/// only. Unreached nodes are `None`. Seeds outside the view are ignored.
pub fn multi_source_bfs(view: &GraphView, seeds: &[usize]) -> Vec<Option<usize>> {
    let mut distance = vec![None; view.node_count];
    let mut queue = VecDeque::new();

    for &seed in seeds {
        if seed < view.node_count && distance[seed].is_none() {
            distance[seed] = Some(0);
            queue.push_back(seed);
        }
    }

    while let Some(current_idx) = queue.pop_front() {
        let next_distance = distance[current_idx].map(|d| d + 1);
        for &next_idx in view.successors(current_idx) {
            if distance[next_idx].is_none() {
                distance[next_idx] = next_distance;
                queue.push_back(next_idx);
            }
        }
    }

    distance
}
