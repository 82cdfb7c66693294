//! Heat-kernel diffusion
//!
//! Ranks nodes by the truncated Taylor series of the matrix exponential
//! `exp(t(M - I))` applied to the restart distribution: a separate term
//! vector decays by `t/k` and one matrix product per iteration, and the
//! accumulated sum is checked for convergence. The output is the raw heat
//! mapping; callers wanting a distribution apply
//! [`Normalize`](crate::postprocess::normalize::Normalize) explicitly.

use super::{restart_vector, Personalization, RankMapping, Ranker};
use crate::convergence::ConvergenceManager;
use crate::graph::csr::CsrGraph;
use crate::graph::matrix::{Normalization, Preprocessor};
use crate::{RankError, Result};

/// Heat-kernel diffusion implementation
#[derive(Debug, Clone)]
pub struct HeatKernel {
    /// Diffusion time (typically 5): larger values spread heat further
    pub t: f64,
    preprocessor: Preprocessor,
    convergence: ConvergenceManager,
}

impl Default for HeatKernel {
    fn default() -> Self {
        Self {
            t: 5.0,
            preprocessor: Preprocessor::default(),
            convergence: ConvergenceManager::default(),
        }
    }
}

impl HeatKernel {
    /// Create a new HeatKernel with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diffusion time
    pub fn with_t(mut self, t: f64) -> Self {
        self.t = t;
        self
    }

    /// Set the transition-matrix normalization mode
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.preprocessor = Preprocessor::new(normalization);
        self
    }

    /// Set the convergence tolerance on the accumulated heat vector
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.convergence = self.convergence.with_tolerance(tolerance);
        self
    }

    /// Inject a convergence manager
    pub fn with_convergence(mut self, convergence: ConvergenceManager) -> Self {
        self.convergence = convergence;
        self
    }

    /// Read how the most recent solve terminated
    pub fn convergence(&self) -> &ConvergenceManager {
        &self.convergence
    }
}

impl Ranker for HeatKernel {
    fn rank(
        &mut self,
        graph: &CsrGraph,
        personalization: Option<&Personalization>,
    ) -> Result<RankMapping> {
        if !self.t.is_finite() || self.t <= 0.0 {
            return Err(RankError::InvalidConfiguration(format!(
                "diffusion time must be finite and positive, got {}",
                self.t
            )));
        }

        let matrix = self.preprocessor.to_matrix(graph)?;
        let n = graph.num_nodes;

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("heat_kernel_solve", nodes = n, t = self.t).entered();

        let restart = restart_vector(n, personalization)?;

        // Series term k=0: e^-t * p. Each iteration advances the term by
        // one matrix product and the factorial coefficient.
        let coefficient = (-self.t).exp();
        let mut term: Vec<f64> = restart.iter().map(|&x| x * coefficient).collect();
        let mut ranks = term.clone();

        self.convergence.reset();
        while !self.convergence.has_converged(&ranks) {
            // iteration() is 1-based inside the loop; the max(1) guards
            // the k=0 division the recurrence would otherwise hit.
            let k = self.convergence.iteration().max(1) as f64;
            let spread = matrix.apply_left(&term);
            term = spread.iter().map(|&x| x * (self.t / k)).collect();
            ranks = ranks.iter().zip(term.iter()).map(|(r, d)| r + d).collect();
        }

        Ok(RankMapping::new(ranks))
    }
}
