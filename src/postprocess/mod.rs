//! Rank postprocessing
//!
//! Decorator-style transforms that wrap a ranker (or another
//! postprocessor) and reshape its output mapping without re-running the
//! underlying iteration. Every postprocessor implements
//! [`Ranker`](crate::algorithms::Ranker) and owns exactly one inner
//! ranker (default [`tautology::Tautology`]), so chains compose freely:
//!
//! ```
//! use seedrank::algorithms::pagerank::PageRank;
//! use seedrank::algorithms::Ranker;
//! use seedrank::postprocess::normalize::{Normalize, NormalizeMethod};
//! use seedrank::postprocess::ordinals::Ordinals;
//!
//! // Ordinals over a sum-normalized PageRank.
//! let mut chain = Ordinals::new().with_ranker(Box::new(
//!     Normalize::new(NormalizeMethod::Sum).with_ranker(Box::new(PageRank::new())),
//! ));
//! # let _ = &mut chain;
//! ```
//!
//! `rank` delegates inward to the wrapped ranker and applies the local
//! reshaping on the way out; `transform` does the same for an
//! already-computed mapping. Transforms assume a well-formed mapping from
//! their wrapped ranker and do not re-validate it.

pub mod normalize;
pub mod ordinals;
pub mod sweep;
pub mod tautology;
pub mod threshold;
