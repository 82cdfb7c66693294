//! Personalized PageRank
//!
//! Power iteration with restart: mass flows along the normalized
//! transition matrix, dangling mass is redistributed through the
//! personalization vector (not uniformly — uniform redistribution breaks
//! personalized ranking), and a restart term biases the walk toward the
//! seed set.

use super::{restart_vector, Personalization, RankMapping, Ranker};
use crate::convergence::ConvergenceManager;
use crate::graph::csr::CsrGraph;
use crate::graph::matrix::{Normalization, Preprocessor};
use crate::{RankError, Result};

/// Personalized PageRank implementation
#[derive(Debug, Clone)]
pub struct PageRank {
    /// Damping factor (typically 0.85)
    pub alpha: f64,
    preprocessor: Preprocessor,
    convergence: ConvergenceManager,
}

impl Default for PageRank {
    fn default() -> Self {
        Self {
            alpha: 0.85,
            preprocessor: Preprocessor::default(),
            convergence: ConvergenceManager::default(),
        }
    }
}

impl PageRank {
    /// Create a new PageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the transition-matrix normalization mode
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.preprocessor = Preprocessor::new(normalization);
        self
    }

    /// Inject a convergence manager
    ///
    /// The manager is reset at the start of every solve; after a solve its
    /// accessors report how the last call terminated.
    pub fn with_convergence(mut self, convergence: ConvergenceManager) -> Self {
        self.convergence = convergence;
        self
    }

    /// Read how the most recent solve terminated
    pub fn convergence(&self) -> &ConvergenceManager {
        &self.convergence
    }

    /// Rank with a warm-start mapping instead of starting from the
    /// restart distribution, enabling incremental re-ranking.
    pub fn rank_warm(
        &mut self,
        graph: &CsrGraph,
        personalization: Option<&Personalization>,
        warm_start: &RankMapping,
    ) -> Result<RankMapping> {
        self.solve(graph, personalization, Some(warm_start))
    }

    fn solve(
        &mut self,
        graph: &CsrGraph,
        personalization: Option<&Personalization>,
        warm_start: Option<&RankMapping>,
    ) -> Result<RankMapping> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(RankError::InvalidConfiguration(format!(
                "alpha must lie strictly between 0 and 1, got {}",
                self.alpha
            )));
        }

        let matrix = self.preprocessor.to_matrix(graph)?;
        let n = graph.num_nodes;

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("pagerank_solve", nodes = n, alpha = self.alpha).entered();

        let restart = restart_vector(n, personalization)?;

        let mut ranks = match warm_start {
            None => restart.clone(),
            Some(ws) => {
                let mut start = ws.scores().to_vec();
                start.resize(n, 0.0);
                let sum: f64 = start.iter().sum();
                if sum <= 0.0 {
                    return Err(RankError::NumericDegeneracy(
                        "warm-start scores sum to zero".to_string(),
                    ));
                }
                for x in &mut start {
                    *x /= sum;
                }
                start
            }
        };

        // Dangling rows are fixed by the matrix; find them once.
        let dangling = matrix.dangling_rows();

        self.convergence.reset();
        while !self.convergence.has_converged(&ranks) {
            let spread = matrix.apply_left(&ranks);
            let dangling_mass: f64 = dangling.iter().map(|&d| ranks[d as usize]).sum();

            let mut next: Vec<f64> = (0..n)
                .map(|i| {
                    self.alpha * (spread[i] + dangling_mass * restart[i])
                        + (1.0 - self.alpha) * restart[i]
                })
                .collect();

            // Renormalize each step: non-stochastic normalizations
            // (symmetric, none) do not conserve mass on their own.
            let sum: f64 = next.iter().sum();
            if sum <= 0.0 {
                return Err(RankError::NumericDegeneracy(
                    "rank mass vanished during iteration".to_string(),
                ));
            }
            for x in &mut next {
                *x /= sum;
            }

            ranks = next;
        }

        Ok(RankMapping::new(ranks))
    }
}

impl Ranker for PageRank {
    fn rank(
        &mut self,
        graph: &CsrGraph,
        personalization: Option<&Personalization>,
    ) -> Result<RankMapping> {
        self.solve(graph, personalization, None)
    }
}
