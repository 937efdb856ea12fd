pub mod common;
pub mod pagerank;
pub mod pathfinding;
pub mod topology;

pub use common::GraphView;
pub use pagerank::{page_rank, personalized_page_rank, PageRankConfig, PowerIteration};
pub use pathfinding::multi_source_bfs;
pub use topology::{core_numbers, undirected_degree, undirected_neighbors};
