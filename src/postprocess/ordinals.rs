//! Ordinal conversion
//!
//! Replaces scores with dense rank positions: 1 for the lowest score up
//! to N for the highest. Ties break by node id — the graph's stable
//! enumeration order — so the output is deterministic across runs.

use super::tautology::Tautology;
use crate::algorithms::{Personalization, RankMapping, Ranker};
use crate::graph::csr::CsrGraph;
use crate::Result;

/// Ordinal-converting postprocessor.
pub struct Ordinals {
    inner: Box<dyn Ranker>,
}

impl Default for Ordinals {
    fn default() -> Self {
        Self::new()
    }
}

impl Ordinals {
    /// Create an ordinal converter over a [`Tautology`] terminal
    pub fn new() -> Self {
        Self {
            inner: Box::new(Tautology::new()),
        }
    }

    /// Set the wrapped ranker
    pub fn with_ranker(mut self, ranker: Box<dyn Ranker>) -> Self {
        self.inner = ranker;
        self
    }

    fn apply(&self, ranks: RankMapping) -> RankMapping {
        let scores = ranks.scores();
        let mut order: Vec<u32> = (0..scores.len() as u32).collect();
        order.sort_by(|&a, &b| {
            scores[a as usize]
                .total_cmp(&scores[b as usize])
                .then(a.cmp(&b))
        });

        let mut ordinals = vec![0.0; scores.len()];
        for (position, node) in order.into_iter().enumerate() {
            ordinals[node as usize] = (position + 1) as f64;
        }
        RankMapping::new(ordinals)
    }
}

impl Ranker for Ordinals {
    fn rank(
        &mut self,
        graph: &CsrGraph,
        personalization: Option<&Personalization>,
    ) -> Result<RankMapping> {
        let ranks = self.inner.rank(graph, personalization)?;
        Ok(self.apply(ranks))
    }

    fn transform(&self, graph: &CsrGraph, ranks: RankMapping) -> Result<RankMapping> {
        let ranks = self.inner.transform(graph, ranks)?;
        Ok(self.apply(ranks))
    }
}
