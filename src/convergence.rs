//! Convergence tracking for iterative solvers
//!
//! A [`ConvergenceManager`] owns the stopping decision shared by all
//! ranking algorithms: it keeps a short history window of recent rank
//! vectors, counts iterations, and signals convergence when either the
//! change between successive vectors drops below a tolerance or the
//! iteration budget runs out. Exhausting the budget is not an error;
//! callers inspect [`ConvergenceManager::budget_exhausted`] afterwards.

use std::collections::VecDeque;

/// How the change between successive rank vectors is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaMetric {
    /// Mean absolute difference per node
    #[default]
    MeanAbs,
    /// Sum of absolute differences (L1)
    SumAbs,
    /// Largest absolute difference of any node
    MaxAbs,
}

impl DeltaMetric {
    fn measure(&self, prev: &[f64], cur: &[f64]) -> f64 {
        debug_assert_eq!(prev.len(), cur.len());
        match self {
            DeltaMetric::MeanAbs => {
                if cur.is_empty() {
                    0.0
                } else {
                    prev.iter()
                        .zip(cur.iter())
                        .map(|(a, b)| (a - b).abs())
                        .sum::<f64>()
                        / cur.len() as f64
                }
            }
            DeltaMetric::SumAbs => prev
                .iter()
                .zip(cur.iter())
                .map(|(a, b)| (a - b).abs())
                .sum(),
            DeltaMetric::MaxAbs => prev
                .iter()
                .zip(cur.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        }
    }
}

/// Tracks iteration count and a rank-history window; decides when an
/// iterative sequence has stabilized.
///
/// Lifecycle: one manager per algorithm instance (or injected by the
/// caller). [`ConvergenceManager::reset`] is mandatory before every
/// independent solve — reuse without reset leaks history and iteration
/// count across unrelated ranking calls.
#[derive(Debug, Clone)]
pub struct ConvergenceManager {
    tolerance: f64,
    max_iterations: usize,
    metric: DeltaMetric,
    window: usize,
    history: VecDeque<Vec<f64>>,
    iteration: usize,
    last_delta: f64,
    converged: bool,
    budget_exhausted: bool,
}

impl Default for ConvergenceManager {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 1000,
            metric: DeltaMetric::default(),
            window: 2,
            history: VecDeque::new(),
            iteration: 0,
            last_delta: f64::INFINITY,
            converged: false,
            budget_exhausted: false,
        }
    }
}

impl ConvergenceManager {
    /// Create a manager with default settings (tolerance 1e-6, budget 1000)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration budget
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the delta aggregation metric
    pub fn with_metric(mut self, metric: DeltaMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the history window size (clamped to at least 2)
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(2);
        self
    }

    /// Clear iteration count, history, and termination flags
    pub fn reset(&mut self) {
        self.history.clear();
        self.iteration = 0;
        self.last_delta = f64::INFINITY;
        self.converged = false;
        self.budget_exhausted = false;
    }

    /// Record the current rank vector and decide whether to stop.
    ///
    /// Returns false unconditionally on the very first call (nothing can
    /// have converged after zero iterations). Afterwards, returns true
    /// when the aggregate change against the previous vector falls below
    /// the tolerance, or when the iteration budget is exceeded.
    pub fn has_converged(&mut self, ranks: &[f64]) -> bool {
        self.iteration += 1;

        let delta = match self.history.back() {
            Some(prev) => self.metric.measure(prev, ranks),
            None => f64::INFINITY,
        };
        self.last_delta = delta;

        self.history.push_back(ranks.to_vec());
        while self.history.len() > self.window {
            self.history.pop_front();
        }

        if delta <= self.tolerance {
            self.converged = true;
            return true;
        }

        if self.iteration > self.max_iterations {
            self.budget_exhausted = true;
            #[cfg(feature = "tracing")]
            tracing::warn!(
                iterations = self.iteration,
                last_delta = self.last_delta,
                tolerance = self.tolerance,
                "iteration budget exhausted before convergence"
            );
            return true;
        }

        false
    }

    /// Number of `has_converged` calls since the last reset
    ///
    /// Inside a solve loop this is the 1-based index of the running
    /// iteration, which series-based algorithms use as a term coefficient.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// The most recent aggregate change between successive vectors
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    /// Whether termination was due to the tolerance criterion
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Whether termination was due to budget exhaustion
    pub fn budget_exhausted(&self) -> bool {
        self.budget_exhausted
    }
}
