//! Graph topology analysis algorithms
//!
//! Undirected degree and k-core decomposition. Both ignore edge direction,
//! count each unordered pair once and drop self-loops.

use super::common::GraphView;

/// Undirected neighbor sets, sorted and deduplicated, self-loops excluded.
pub fn undirected_neighbors(view: &GraphView) -> Vec<Vec<usize>> {
    (0..view.node_count)
        .map(|u| {
            let mut neighbors: Vec<usize> = view
                .successors(u)
                .iter()
                .chain(view.predecessors(u).iter())
                .copied()
                .filter(|&v| v != u)
                .collect();
            neighbors.sort_unstable();
            neighbors.dedup();
            neighbors
        })
        .collect()
}

/// Undirected degree: size of each node's undirected neighbor set.
pub fn undirected_degree(view: &GraphView) -> Vec<usize> {
    undirected_neighbors(view).iter().map(Vec::len).collect()
}

/// Core number (coreness) of every node.
///
/// Bucket-peeling in O(V + E) (Batagelj & Zaversnik): nodes are kept in an
/// array sorted by current degree with `bin[d]` pointing at the first node of
/// degree `d`. Peeling the next node moves each higher-degree neighbor one
/// bucket down with a constant-time swap instead of a heap update.
///
/// `adjacency` must be symmetric, deduplicated and free of self-loops, as
/// produced by [`undirected_neighbors`].
pub fn core_numbers(adjacency: &[Vec<usize>]) -> Vec<usize> {
    let n = adjacency.len();
    if n == 0 {
        return Vec::new();
    }

    let mut degree: Vec<usize> = adjacency.iter().map(Vec::len).collect();
    let max_degree = degree.iter().copied().max().unwrap_or(0);

    // bin[d] = number of nodes with degree d, then start offset of bucket d
    let mut bin = vec![0usize; max_degree + 1];
    for &d in &degree {
        bin[d] += 1;
    }
    let mut start = 0;
    for slot in bin.iter_mut() {
        let count = *slot;
        *slot = start;
        start += count;
    }

    let mut pos = vec![0usize; n];
    let mut vert = vec![0usize; n];
    for v in 0..n {
        pos[v] = bin[degree[v]];
        vert[pos[v]] = v;
        bin[degree[v]] += 1;
    }
    for d in (1..=max_degree).rev() {
        bin[d] = bin[d - 1];
    }
    bin[0] = 0;

    for i in 0..n {
        let v = vert[i];
        for &u in &adjacency[v] {
            if degree[u] > degree[v] {
                let du = degree[u];
                let pu = pos[u];
                let pw = bin[du];
                let w = vert[pw];
                if u != w {
                    pos[u] = pw;
                    vert[pu] = w;
                    pos[w] = pu;
                    vert[pw] = u;
                }
                bin[du] += 1;
                degree[u] -= 1;
            }
        }
    }

    degree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undirected(n: usize, pairs: &[(usize, usize)]) -> GraphView {
        GraphView::from_edges(n, pairs)
    }

    #[test]
    fn test_degree_ignores_direction_and_duplicates() {
        // 0 -> 1, 1 -> 0, 0 -> 1 again, 1 -> 1 self-loop, 2 -> 0
        let view = undirected(3, &[(0, 1), (1, 0), (0, 1), (1, 1), (2, 0)]);
        assert_eq!(undirected_degree(&view), vec![2, 1, 1]);
    }

    #[test]
    fn test_kcore_two_triangles_with_bridge() {
        // Triangle {0,1,2}, triangle {3,4,5}, bridge 2 - 3, pendant 6 on 0
        let view = undirected(
            7,
            &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3), (6, 0)],
        );
        let cores = core_numbers(&undirected_neighbors(&view));
        assert_eq!(cores, vec![2, 2, 2, 2, 2, 2, 1]);
    }

    #[test]
    fn test_kcore_clique_and_isolated() {
        // K4 on {0,1,2,3}, node 4 isolated, node 5 only has a self-loop
        let mut pairs = Vec::new();
        for i in 0..4 {
            for j in (i + 1)..4 {
                pairs.push((i, j));
            }
        }
        pairs.push((5, 5));
        let view = undirected(6, &pairs);
        let cores = core_numbers(&undirected_neighbors(&view));
        assert_eq!(cores, vec![3, 3, 3, 3, 0, 0]);
    }

    #[test]
    fn test_kcore_path() {
        let view = undirected(4, &[(0, 1), (1, 2), (2, 3)]);
        let cores = core_numbers(&undirected_neighbors(&view));
        assert_eq!(cores, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_kcore_empty() {
        assert!(core_numbers(&[]).is_empty());
    }
}
