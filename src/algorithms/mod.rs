//! Ranking algorithms
//!
//! The [`Ranker`] trait is the single contract everything composes
//! through: terminal algorithms ([`pagerank::PageRank`],
//! [`heat_kernel::HeatKernel`]) implement `rank`, and the postprocessors
//! in [`crate::postprocess`] both implement and consume the trait, giving
//! a composable decorator chain without inheritance depth.

pub mod heat_kernel;
pub mod oversampling;
pub mod pagerank;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::graph::csr::CsrGraph;
use crate::{RankError, Result};

/// A node-to-score mapping produced by a ranking call.
///
/// Scores are indexed by node id in the graph's enumeration order. Every
/// `rank` and `transform` call produces a fresh mapping; mappings are
/// never reshaped in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankMapping {
    scores: Vec<f64>,
}

impl RankMapping {
    /// Wrap a dense score vector
    pub fn new(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    /// Number of scored nodes
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Get the score for a specific node
    pub fn get(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }

    /// Borrow the dense score vector
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Consume the mapping, yielding the dense score vector
    pub fn into_scores(self) -> Vec<f64> {
        self.scores
    }

    /// Sum of all scores
    pub fn sum(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// Largest score (0.0 for an empty mapping)
    pub fn max(&self) -> f64 {
        self.scores.iter().fold(0.0, |a: f64, &b| a.max(b))
    }

    /// Get top N nodes by score
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        let mut indexed: Vec<_> = self
            .scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as u32, s))
            .collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
        indexed.truncate(n);
        indexed
    }

    /// Pair each score with its node label
    pub fn labeled(&self, graph: &CsrGraph) -> Vec<(String, f64)> {
        self.scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (graph.label(i as u32).to_string(), s))
            .collect()
    }
}

/// A sparse node-to-weight map used as teleportation/restart distribution
/// and as the seed-set indicator. Nodes not present weigh zero.
#[derive(Debug, Clone, Default)]
pub struct Personalization {
    weights: FxHashMap<u32, f64>,
}

impl Personalization {
    /// Build from explicit (node, weight) pairs
    pub fn from_pairs(pairs: &[(u32, f64)]) -> Self {
        Self {
            weights: pairs.iter().copied().collect(),
        }
    }

    /// Build a unit-weight seed set
    pub fn from_nodes(nodes: impl IntoIterator<Item = u32>) -> Self {
        Self {
            weights: nodes.into_iter().map(|n| (n, 1.0)).collect(),
        }
    }

    /// Set the weight for a node
    pub fn insert(&mut self, node: u32, weight: f64) {
        self.weights.insert(node, weight);
    }

    /// Weight of a node (zero when absent)
    pub fn get(&self, node: u32) -> f64 {
        self.weights.get(&node).copied().unwrap_or(0.0)
    }

    /// Iterate over explicit (node, weight) entries
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.weights.iter().map(|(&n, &w)| (n, w))
    }

    /// Number of explicit entries
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no explicit entries exist
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Densify over `n` nodes without normalizing
    pub fn to_dense(&self, n: usize) -> Vec<f64> {
        let mut dense = vec![0.0; n];
        for (&node, &w) in &self.weights {
            if (node as usize) < n {
                dense[node as usize] = w;
            }
        }
        dense
    }
}

/// Densify a personalization over `n` nodes and normalize it to sum 1.
///
/// Absent personalization means uniform restart over all nodes. A supplied
/// personalization whose weights sum to zero cannot seed a walk and fails
/// fast instead of propagating NaN.
pub(crate) fn restart_vector(
    n: usize,
    personalization: Option<&Personalization>,
) -> Result<Vec<f64>> {
    match personalization {
        None => Ok(vec![1.0 / n as f64; n]),
        Some(p) => {
            let mut dense = p.to_dense(n);
            let sum: f64 = dense.iter().sum();
            if sum <= 0.0 {
                return Err(RankError::NumericDegeneracy(
                    "personalization weights sum to zero".to_string(),
                ));
            }
            for w in &mut dense {
                *w /= sum;
            }
            Ok(dense)
        }
    }
}

/// The contract every ranking component exposes.
///
/// `rank` runs (or delegates) a full ranking call; `transform` reshapes an
/// already-computed mapping without re-running the underlying iteration.
/// Terminal algorithms inherit the identity `transform`, so any chain of
/// postprocessors can wrap any ranker.
pub trait Ranker {
    /// Produce a node-to-score mapping for the graph and seed weights
    fn rank(
        &mut self,
        graph: &CsrGraph,
        personalization: Option<&Personalization>,
    ) -> Result<RankMapping>;

    /// Reshape an already-computed mapping
    fn transform(&self, _graph: &CsrGraph, ranks: RankMapping) -> Result<RankMapping> {
        Ok(ranks)
    }
}

impl std::fmt::Debug for dyn Ranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Ranker")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_vector_uniform_when_absent() {
        let v = restart_vector(4, None).unwrap();
        assert_eq!(v, vec![0.25; 4]);
    }

    #[test]
    fn test_restart_vector_normalizes_supplied_weights() {
        let p = Personalization::from_pairs(&[(0, 3.0), (2, 1.0)]);
        let v = restart_vector(4, Some(&p)).unwrap();
        assert!((v[0] - 0.75).abs() < 1e-12);
        assert_eq!(v[1], 0.0);
        assert!((v[2] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_restart_vector_rejects_zero_sum() {
        let p = Personalization::from_pairs(&[(0, 0.0)]);
        let err = restart_vector(3, Some(&p)).unwrap_err();
        assert!(matches!(err, RankError::NumericDegeneracy(_)));
    }

    #[test]
    fn test_restart_vector_ignores_out_of_range_nodes() {
        let p = Personalization::from_pairs(&[(0, 1.0), (99, 5.0)]);
        let v = restart_vector(2, Some(&p)).unwrap();
        assert_eq!(v, vec![1.0, 0.0]);
    }

    #[test]
    fn test_top_n_orders_by_score() {
        let mapping = RankMapping::new(vec![0.1, 0.7, 0.2]);
        let top = mapping.top_n(2);
        assert_eq!(top[0].0, 1);
        assert_eq!(top[1].0, 2);
    }
}
