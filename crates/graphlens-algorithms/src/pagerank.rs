//! PageRank algorithm implementation
//!
//! Global and personalized PageRank share a single power iteration. The only
//! difference is the teleport vector: uniform `1/N` for the global variant,
//! uniform over the seed set for the personalized one. Dangling nodes (no
//! outgoing edges) hand their whole mass back to the teleport vector every
//! round, and scores are renormalized to sum to 1 after each round.

use super::common::GraphView;

/// PageRank configuration
///
/// There is deliberately no `Default`: callers state both values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankConfig {
    /// Damping factor, in the open interval (0, 1)
    pub damping_factor: f64,
    /// Number of power-iteration rounds
    pub iterations: usize,
}

/// Step-by-step power iteration.
///
/// Each call to [`PowerIteration::step`] performs one round and exposes the
/// resulting distribution, which makes per-round invariants observable.
pub struct PowerIteration<'a> {
    view: &'a GraphView,
    damping: f64,
    teleport: Vec<f64>,
    scores: Vec<f64>,
    next_scores: Vec<f64>,
    rounds_left: usize,
}

impl<'a> PowerIteration<'a> {
    /// Start an iteration from the teleport vector.
    ///
    /// `teleport` must have `view.node_count` entries summing to 1.
    pub fn new(view: &'a GraphView, config: &PageRankConfig, teleport: Vec<f64>) -> Self {
        debug_assert_eq!(teleport.len(), view.node_count);
        let n = view.node_count;
        Self {
            view,
            damping: config.damping_factor,
            scores: teleport.clone(),
            teleport,
            next_scores: vec![0.0; n],
            rounds_left: config.iterations,
        }
    }

    /// Current distribution
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Rounds still to run
    pub fn rounds_left(&self) -> usize {
        self.rounds_left
    }

    /// Run one round. Returns `None` once the configured rounds are spent.
    pub fn step(&mut self) -> Option<&[f64]> {
        if self.rounds_left == 0 {
            return None;
        }
        self.rounds_left -= 1;

        let view = self.view;
        let d = self.damping;
        let n = view.node_count;

        let dangling_mass: f64 = (0..n)
            .filter(|&i| view.out_degree(i) == 0)
            .map(|i| self.scores[i])
            .sum();

        for i in 0..n {
            let mut sum_incoming = 0.0;

            // Iterate over incoming edges; each parallel edge carries its own share
            for &source_idx in view.predecessors(i) {
                let out_degree = view.out_degree(source_idx);
                sum_incoming += self.scores[source_idx] / out_degree as f64;
            }

            let teleport = self.teleport[i];
            self.next_scores[i] = (1.0 - d) * teleport + d * (sum_incoming + dangling_mass * teleport);
        }

        let total: f64 = self.next_scores.iter().sum();
        if total > 0.0 {
            for s in self.next_scores.iter_mut() {
                *s /= total;
            }
        }

        // Swap buffers
        std::mem::swap(&mut self.scores, &mut self.next_scores);
        Some(self.scores.as_slice())
    }

    /// Run all remaining rounds and return the final distribution
    pub fn run(mut self) -> Vec<f64> {
        while self.step().is_some() {}
        self.scores
    }
}

/// Calculate global PageRank for the graph view.
///
/// Returns one score per node index; the scores sum to 1.
pub fn page_rank(view: &GraphView, config: &PageRankConfig) -> Vec<f64> {
    let n = view.node_count;
    if n == 0 {
        return Vec::new();
    }

    let teleport = vec![1.0 / n as f64; n];
    PowerIteration::new(view, config, teleport).run()
}

/// Build the personalization vector: uniform over the distinct in-range seeds.
///
/// Returns `None` if no seed index is inside the view.
pub fn personalization_vector(view: &GraphView, seeds: &[usize]) -> Option<Vec<f64>> {
    let n = view.node_count;
    let mut vector = vec![0.0; n];
    let mut distinct = 0usize;

    for &seed in seeds {
        if seed < n && vector[seed] == 0.0 {
            vector[seed] = 1.0;
            distinct += 1;
        }
    }

    if distinct == 0 {
        return None;
    }

    let weight = 1.0 / distinct as f64;
    for v in vector.iter_mut() {
        *v *= weight;
    }
    Some(vector)
}

/// Calculate personalized PageRank from a seed set.
///
/// Teleportation, dangling redistribution and the initial distribution all
/// route to the uniform seed vector. Returns `None` when `seeds` contains no
/// index inside the view.
pub fn personalized_page_rank(
    view: &GraphView,
    config: &PageRankConfig,
    seeds: &[usize],
) -> Option<Vec<f64>> {
    let teleport = personalization_vector(view, seeds)?;
    Some(PowerIteration::new(view, config, teleport).run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    const EPS: f64 = 1e-9;

    fn config(iterations: usize) -> PageRankConfig {
        PageRankConfig { damping_factor: 0.85, iterations }
    }

    fn random_view(rng: &mut StdRng, n: usize, m: usize) -> GraphView {
        let edges: Vec<(usize, usize)> = (0..m)
            .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
            .collect();
        GraphView::from_edges(n, &edges)
    }

    #[test]
    fn test_pagerank_star() {
        // Center (0) points to leaves (1, 2); leaves point back
        let view = GraphView::from_edges(3, &[(0, 1), (0, 2), (1, 0), (2, 0)]);
        let scores = page_rank(&view, &config(20));

        assert!(scores[0] > scores[1]);
        assert!((scores[1] - scores[2]).abs() < EPS);
        assert!((scores.iter().sum::<f64>() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_pagerank_empty_view() {
        let view = GraphView::from_edges(0, &[]);
        assert!(page_rank(&view, &config(10)).is_empty());
    }

    #[test]
    fn test_conservation_every_round_global() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let view = random_view(&mut rng, 25, 40);
            let teleport = vec![1.0 / 25.0; 25];
            let mut iter = PowerIteration::new(&view, &config(30), teleport);
            while let Some(scores) = iter.step() {
                let total: f64 = scores.iter().sum();
                assert!((total - 1.0).abs() < EPS, "sum drifted to {}", total);
            }
        }
    }

    #[test]
    fn test_conservation_every_round_personalized() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let view = random_view(&mut rng, 25, 30);
            let teleport = personalization_vector(&view, &[0, 3, 3]).unwrap();
            let mut iter = PowerIteration::new(&view, &config(30), teleport);
            while let Some(scores) = iter.step() {
                let total: f64 = scores.iter().sum();
                assert!((total - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_dangling_mass_is_not_lost() {
        // 0 -> 1, node 1 and node 2 are dangling
        let view = GraphView::from_edges(3, &[(0, 1)]);
        let scores = page_rank(&view, &config(30));
        assert!((scores.iter().sum::<f64>() - 1.0).abs() < EPS);
        assert!(scores[1] > scores[0]);
        assert!((scores[0] - scores[2]).abs() < EPS);
    }

    #[test]
    fn test_self_loop_is_harmless() {
        let view = GraphView::from_edges(2, &[(0, 0), (0, 1)]);
        let scores = page_rank(&view, &config(15));
        assert!(scores.iter().all(|s| s.is_finite()));
        assert!((scores.iter().sum::<f64>() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_personalized_favours_seed_neighbourhood() {
        // Two disconnected chains: 0 -> 1 -> 2 and 3 -> 4 -> 5
        let view = GraphView::from_edges(6, &[(0, 1), (1, 2), (3, 4), (4, 5)]);
        let scores = personalized_page_rank(&view, &config(30), &[0]).unwrap();

        assert!(scores[0] > 0.0);
        assert!(scores[2] > 0.0);
        for idx in 3..6 {
            assert_eq!(scores[idx], 0.0);
        }
    }

    #[test]
    fn test_personalized_requires_seed_in_view() {
        let view = GraphView::from_edges(2, &[(0, 1)]);
        assert!(personalized_page_rank(&view, &config(10), &[]).is_none());
        assert!(personalized_page_rank(&view, &config(10), &[7]).is_none());
    }

    #[test]
    fn test_step_count_matches_iterations() {
        let view = GraphView::from_edges(2, &[(0, 1)]);
        let mut iter = PowerIteration::new(&view, &config(12), vec![0.5, 0.5]);
        let mut rounds = 0;
        while iter.step().is_some() {
            rounds += 1;
        }
        assert_eq!(rounds, 12);
        assert_eq!(iter.rounds_left(), 0);
    }
}
