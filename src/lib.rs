//! `seedrank` — seed-personalized node ranking over sparse graphs.
//!
//! The crate computes node-importance scores by iterating a fixed-point
//! equation to convergence (personalized [`PageRank`], [`HeatKernel`]
//! diffusion), then optionally reshapes the resulting mapping through a
//! chain of composable postprocessors (normalization, ordinals,
//! thresholding, sweep ratios).
//!
//! # Quick start
//!
//! ```
//! use seedrank::graph::builder::GraphBuilder;
//! use seedrank::graph::csr::CsrGraph;
//! use seedrank::algorithms::pagerank::PageRank;
//! use seedrank::algorithms::{Personalization, Ranker};
//! use seedrank::postprocess::normalize::{Normalize, NormalizeMethod};
//!
//! let mut builder = GraphBuilder::new();
//! let a = builder.get_or_create_node("a");
//! let b = builder.get_or_create_node("b");
//! builder.increment_edge(a, b, 1.0);
//! let graph = CsrGraph::from_builder(&builder);
//!
//! let seeds = Personalization::from_pairs(&[(a, 1.0)]);
//! let mut algorithm = Normalize::new(NormalizeMethod::Max)
//!     .with_ranker(Box::new(PageRank::new().with_alpha(0.9)));
//! let ranks = algorithm.rank(&graph, Some(&seeds)).unwrap();
//! assert!((ranks.max() - 1.0).abs() < 1e-12);
//! ```
//!
//! # Design invariants
//!
//! - **Node order**: mappings are indexed by node id `0..n-1` in the
//!   graph's insertion order; every component observes the same order.
//! - **Fresh mappings**: `rank` and `transform` always produce a new
//!   [`RankMapping`](algorithms::RankMapping); nothing is reshaped in place.
//! - **Observable convergence**: exhausting the iteration budget is not an
//!   error — inspect the algorithm's [`ConvergenceManager`] afterwards.

pub mod algorithms;
pub mod convergence;
pub mod graph;
pub mod metrics;
pub mod postprocess;
pub mod recipe;

pub use algorithms::heat_kernel::HeatKernel;
pub use algorithms::oversampling::{OversamplingMethod, SeedOversampling};
pub use algorithms::pagerank::PageRank;
pub use algorithms::{Personalization, RankMapping, Ranker};
pub use convergence::{ConvergenceManager, DeltaMetric};
pub use graph::builder::GraphBuilder;
pub use graph::csr::CsrGraph;
pub use graph::matrix::{Normalization, Preprocessor, TransitionMatrix};
pub use postprocess::normalize::{Normalize, NormalizeMethod};
pub use postprocess::ordinals::Ordinals;
pub use postprocess::sweep::Sweep;
pub use postprocess::tautology::Tautology;
pub use postprocess::threshold::{Threshold, ThresholdRule};
pub use recipe::Recipe;

#[derive(Debug, thiserror::Error)]
pub enum RankError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(String),
    #[error("graph has no nodes")]
    EmptyGraph,
}

pub type Result<T> = std::result::Result<T, RankError>;
