//! Structural scoring engine
//!
//! Two modes, chosen by the caller:
//!
//! - **Global**: PageRank, undirected degree and k-core, blended with
//!   `(alpha, beta, gamma)`.
//! - **Personalized**: personalized PageRank from a seed set, undirected
//!   degree and a distance decay `exp(-lambda * hops)` from the seeds,
//!   blended with `(alpha, beta, gamma)`.
//!
//! Every parameter is required. Validation runs before any computation and
//! names the offending field.

pub mod normalize;

pub use normalize::{blend, edge_score, min_max_normalize, min_max_normalize_counts};

use crate::algo::{
    build_view, core_numbers, multi_source_bfs, page_rank, personalized_page_rank,
    undirected_neighbors, IndexedGraph, PageRankConfig,
};
use crate::graph::{DecorError, DecorResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Allowed range for the number of power-iteration rounds
pub const ITERATION_RANGE: std::ops::RangeInclusive<usize> = 10..=30;

/// Global (seedless) scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalScoring {
    /// Weight of PageRank
    pub alpha: f64,
    /// Weight of undirected degree
    pub beta: f64,
    /// Weight of coreness
    pub gamma: f64,
    pub damping_factor: f64,
    pub iterations: usize,
}

/// Personalized (seeded) scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonalizedScoring {
    /// Weight of personalized PageRank
    pub alpha: f64,
    /// Weight of undirected degree
    pub beta: f64,
    /// Weight of the distance decay term
    pub gamma: f64,
    /// Decay rate per hop in `exp(-lambda * hops)`
    pub lambda: f64,
    pub damping_factor: f64,
    pub iterations: usize,
    /// Seed node ids; intersected with the graph at scoring time
    #[serde(deserialize_with = "crate::graph::deserialize_ids")]
    pub seeds: Vec<String>,
}

/// Scoring mode selected by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScoringMode {
    Global(GlobalScoring),
    Personalized(PersonalizedScoring),
}

fn check_weight(field: &'static str, value: f64) -> DecorResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(DecorError::invalid_parameter(
            field,
            format!("must be in [0, 1], got {}", value),
        ));
    }
    Ok(())
}

fn check_pagerank(damping_factor: f64, iterations: usize) -> DecorResult<()> {
    if !(damping_factor > 0.0 && damping_factor < 1.0) {
        return Err(DecorError::invalid_parameter(
            "damping_factor",
            format!("must be in (0, 1), got {}", damping_factor),
        ));
    }
    if !ITERATION_RANGE.contains(&iterations) {
        return Err(DecorError::invalid_parameter(
            "iterations",
            format!(
                "must be in [{}, {}], got {}",
                ITERATION_RANGE.start(),
                ITERATION_RANGE.end(),
                iterations
            ),
        ));
    }
    Ok(())
}

impl GlobalScoring {
    pub fn validate(&self) -> DecorResult<()> {
        check_weight("alpha", self.alpha)?;
        check_weight("beta", self.beta)?;
        check_weight("gamma", self.gamma)?;
        check_pagerank(self.damping_factor, self.iterations)
    }

    fn pagerank_config(&self) -> PageRankConfig {
        PageRankConfig {
            damping_factor: self.damping_factor,
            iterations: self.iterations,
        }
    }
}

impl PersonalizedScoring {
    pub fn validate(&self) -> DecorResult<()> {
        check_weight("alpha", self.alpha)?;
        check_weight("beta", self.beta)?;
        check_weight("gamma", self.gamma)?;
        check_weight("lambda", self.lambda)?;
        check_pagerank(self.damping_factor, self.iterations)?;
        if self.seeds.is_empty() {
            return Err(DecorError::invalid_parameter("seeds", "must not be empty"));
        }
        Ok(())
    }

    fn pagerank_config(&self) -> PageRankConfig {
        PageRankConfig {
            damping_factor: self.damping_factor,
            iterations: self.iterations,
        }
    }
}

impl ScoringMode {
    pub fn validate(&self) -> DecorResult<()> {
        match self {
            ScoringMode::Global(cfg) => cfg.validate(),
            ScoringMode::Personalized(cfg) => cfg.validate(),
        }
    }
}

/// Raw per-node signals, aligned with the node order of the snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum Signals {
    Global {
        pagerank: Vec<f64>,
        degree: Vec<usize>,
        kcore: Vec<usize>,
    },
    Personalized {
        pagerank: Vec<f64>,
        degree: Vec<usize>,
        /// Hops from the nearest seed; `None` when unreachable
        distance: Vec<Option<usize>>,
        /// `exp(-lambda * hops)`, 0 when unreachable
        decay: Vec<f64>,
    },
}

/// Signals plus the blended score of every node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeScores {
    pub signals: Signals,
    pub blended: Vec<f64>,
}

/// Compute global signals. Parameters are assumed validated.
pub fn global_signals(indexed: &IndexedGraph<'_>, cfg: &GlobalScoring) -> Signals {
    let adjacency = undirected_neighbors(&indexed.view);
    let degree: Vec<usize> = adjacency.iter().map(Vec::len).collect();
    let kcore = core_numbers(&adjacency);
    let pagerank = page_rank(&indexed.view, &cfg.pagerank_config());

    Signals::Global {
        pagerank,
        degree,
        kcore,
    }
}

/// Compute personalized signals. Parameters are assumed validated.
///
/// Fails when none of the configured seeds is a node of the graph.
pub fn personalized_signals(
    indexed: &IndexedGraph<'_>,
    cfg: &PersonalizedScoring,
) -> DecorResult<Signals> {
    let seeds: Vec<usize> = cfg
        .seeds
        .iter()
        .filter_map(|id| indexed.index_of(id))
        .collect();
    if seeds.is_empty() {
        return Err(DecorError::NoSeedsPresent(cfg.seeds.len()));
    }
    debug!(requested = cfg.seeds.len(), present = seeds.len(), "resolved seeds");

    let adjacency = undirected_neighbors(&indexed.view);
    let degree: Vec<usize> = adjacency.iter().map(Vec::len).collect();
    let distance = multi_source_bfs(&indexed.view, &seeds);
    let decay = distance
        .iter()
        .map(|d| match d {
            Some(hops) => (-cfg.lambda * *hops as f64).exp(),
            None => 0.0,
        })
        .collect();
    let pagerank = personalized_page_rank(&indexed.view, &cfg.pagerank_config(), &seeds)
        .ok_or(DecorError::NoSeedsPresent(cfg.seeds.len()))?;

    Ok(Signals::Personalized {
        pagerank,
        degree,
        distance,
        decay,
    })
}

impl Signals {
    /// Normalize global signals and blend with `(alpha, beta, gamma)`.
    /// Personalized signals yield an empty vector.
    pub fn blend_global(&self, cfg: &GlobalScoring) -> Vec<f64> {
        match self {
            Signals::Global {
                pagerank,
                degree,
                kcore,
            } => {
                let pr = min_max_normalize(pagerank);
                let deg = min_max_normalize_counts(degree);
                let core = min_max_normalize_counts(kcore);
                blend(&[(cfg.alpha, &pr[..]), (cfg.beta, &deg[..]), (cfg.gamma, &core[..])])
            }
            Signals::Personalized { .. } => Vec::new(),
        }
    }

    /// Normalize personalized signals and blend with `(alpha, beta, gamma)`.
    /// Global signals yield an empty vector.
    pub fn blend_personalized(&self, cfg: &PersonalizedScoring) -> Vec<f64> {
        match self {
            Signals::Personalized {
                pagerank,
                degree,
                decay,
                ..
            } => {
                let ppr = min_max_normalize(pagerank);
                let deg = min_max_normalize_counts(degree);
                let dist = min_max_normalize(decay);
                blend(&[(cfg.alpha, &ppr[..]), (cfg.beta, &deg[..]), (cfg.gamma, &dist[..])])
            }
            Signals::Global { .. } => Vec::new(),
        }
    }
}

/// Validate, compute signals and blend for an already indexed graph
pub fn score_indexed(indexed: &IndexedGraph<'_>, mode: &ScoringMode) -> DecorResult<NodeScores> {
    mode.validate()?;
    if indexed.node_count() == 0 {
        return Err(DecorError::EmptyGraph);
    }

    let (signals, blended) = match mode {
        ScoringMode::Global(cfg) => {
            let signals = global_signals(indexed, cfg);
            let blended = signals.blend_global(cfg);
            (signals, blended)
        }
        ScoringMode::Personalized(cfg) => {
            let signals = personalized_signals(indexed, cfg)?;
            let blended = signals.blend_personalized(cfg);
            (signals, blended)
        }
    };

    Ok(NodeScores { signals, blended })
}

/// Score a snapshot from scratch
pub fn score(graph: &crate::graph::GraphData, mode: &ScoringMode) -> DecorResult<NodeScores> {
    mode.validate()?;
    graph.validate()?;
    let indexed = build_view(graph);
    score_indexed(&indexed, mode)
}
