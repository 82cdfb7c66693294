//! Score normalization
//!
//! Divides every score by the mapping's maximum or by its sum, turning an
//! arbitrary non-negative mapping into [0,1] scores or a distribution.

use std::str::FromStr;

use super::tautology::Tautology;
use crate::algorithms::{Personalization, RankMapping, Ranker};
use crate::graph::csr::CsrGraph;
use crate::{RankError, Result};

/// The normalization denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizeMethod {
    /// Divide by the maximal score; output lies in [0,1] with max 1
    #[default]
    Max,
    /// Divide by the score sum; output sums to 1
    Sum,
}

impl FromStr for NormalizeMethod {
    type Err = RankError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "max" => Ok(NormalizeMethod::Max),
            "sum" => Ok(NormalizeMethod::Sum),
            other => Err(RankError::InvalidConfiguration(format!(
                "can only normalize towards max or sum, got {other:?}"
            ))),
        }
    }
}

/// Normalizing postprocessor.
pub struct Normalize {
    inner: Box<dyn Ranker>,
    method: NormalizeMethod,
}

impl Default for Normalize {
    fn default() -> Self {
        Self::new(NormalizeMethod::default())
    }
}

impl Normalize {
    /// Create a normalizer over a [`Tautology`] terminal
    pub fn new(method: NormalizeMethod) -> Self {
        Self {
            inner: Box::new(Tautology::new()),
            method,
        }
    }

    /// Set the wrapped ranker
    pub fn with_ranker(mut self, ranker: Box<dyn Ranker>) -> Self {
        self.inner = ranker;
        self
    }

    fn apply(&self, ranks: RankMapping) -> Result<RankMapping> {
        let denominator = match self.method {
            NormalizeMethod::Max => ranks.max(),
            NormalizeMethod::Sum => ranks.sum(),
        };
        if denominator <= 0.0 || !denominator.is_finite() {
            return Err(RankError::NumericDegeneracy(format!(
                "normalization denominator is {denominator}; cannot rescale an all-zero mapping"
            )));
        }
        let scores = ranks
            .into_scores()
            .into_iter()
            .map(|s| s / denominator)
            .collect();
        Ok(RankMapping::new(scores))
    }
}

impl Ranker for Normalize {
    fn rank(
        &mut self,
        graph: &CsrGraph,
        personalization: Option<&Personalization>,
    ) -> Result<RankMapping> {
        let ranks = self.inner.rank(graph, personalization)?;
        self.apply(ranks)
    }

    fn transform(&self, graph: &CsrGraph, ranks: RankMapping) -> Result<RankMapping> {
        let ranks = self.inner.transform(graph, ranks)?;
        self.apply(ranks)
    }
}
