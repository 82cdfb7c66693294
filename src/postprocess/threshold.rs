//! Score binarization
//!
//! Converts a mapping to {0,1} membership indicators, either against a
//! literal numeric threshold or against an automatically detected gap in
//! the degree-normalized score profile.

use super::tautology::Tautology;
use crate::algorithms::{Personalization, RankMapping, Ranker};
use crate::graph::csr::CsrGraph;
use crate::{RankError, Result};

/// How the cut-off is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ThresholdRule {
    /// Pass the mapping through unchanged
    None,
    /// Detect the largest relative drop between consecutive
    /// degree-normalized scores and cut there.
    ///
    /// Experimental: the interaction between degree normalization and
    /// tie handling is still being evaluated.
    #[default]
    Gap,
    /// Literal cut-off applied to raw scores: score >= value maps to 1
    Value(f64),
}

/// Binarizing postprocessor.
pub struct Threshold {
    inner: Box<dyn Ranker>,
    rule: ThresholdRule,
}

impl Default for Threshold {
    fn default() -> Self {
        Self::new(ThresholdRule::default())
    }
}

impl Threshold {
    /// Create a binarizer over a [`Tautology`] terminal
    pub fn new(rule: ThresholdRule) -> Self {
        Self {
            inner: Box::new(Tautology::new()),
            rule,
        }
    }

    /// Set the wrapped ranker
    pub fn with_ranker(mut self, ranker: Box<dyn Ranker>) -> Self {
        self.inner = ranker;
        self
    }

    fn apply(&self, graph: &CsrGraph, ranks: RankMapping) -> Result<RankMapping> {
        match self.rule {
            ThresholdRule::None => Ok(ranks),
            ThresholdRule::Value(cut) => Ok(binarize(ranks.scores(), cut)),
            ThresholdRule::Gap => {
                let mut normalized = Vec::with_capacity(ranks.len());
                for (node, &score) in ranks.scores().iter().enumerate() {
                    let degree = graph.degree(node as u32);
                    if degree == 0 {
                        return Err(RankError::NumericDegeneracy(format!(
                            "gap thresholding cannot degree-normalize isolated node {node}"
                        )));
                    }
                    normalized.push(score / degree as f64);
                }

                let mut order: Vec<u32> = (0..normalized.len() as u32).collect();
                order.sort_by(|&a, &b| {
                    normalized[b as usize]
                        .total_cmp(&normalized[a as usize])
                        .then(a.cmp(&b))
                });

                // Scan descending scores for the largest relative drop;
                // the first node has no predecessor and is skipped.
                let mut max_diff = 0.0;
                let mut cut = 0.0;
                let mut prev = 0.0;
                for &node in &order {
                    let current = normalized[node as usize];
                    if prev > 0.0 {
                        let diff = (prev - current) / prev;
                        if diff > max_diff {
                            max_diff = diff;
                            cut = current;
                        }
                    }
                    prev = current;
                }

                Ok(binarize(&normalized, cut))
            }
        }
    }
}

fn binarize(scores: &[f64], cut: f64) -> RankMapping {
    RankMapping::new(
        scores
            .iter()
            .map(|&s| if s >= cut { 1.0 } else { 0.0 })
            .collect(),
    )
}

impl Ranker for Threshold {
    fn rank(
        &mut self,
        graph: &CsrGraph,
        personalization: Option<&Personalization>,
    ) -> Result<RankMapping> {
        let ranks = self.inner.rank(graph, personalization)?;
        self.apply(graph, ranks)
    }

    fn transform(&self, graph: &CsrGraph, ranks: RankMapping) -> Result<RankMapping> {
        let ranks = self.inner.transform(graph, ranks)?;
        self.apply(graph, ranks)
    }
}
