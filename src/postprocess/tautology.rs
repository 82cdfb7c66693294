//! Identity postprocessor
//!
//! Returns mappings as-are. Serves as the default innermost wrapped
//! object of every postprocessor, and as a baseline against which other
//! postprocessing schemes can be compared: wrapping any ranker in a
//! Tautology leaves its output untouched.

use crate::algorithms::{Personalization, RankMapping, Ranker};
use crate::graph::csr::CsrGraph;
use crate::Result;

/// The identity decorator.
///
/// With a wrapped ranker, `rank` delegates and returns the inner output
/// unchanged. Without one, `rank` returns the personalization itself as
/// a dense mapping. `transform` is always the identity.
#[derive(Default)]
pub struct Tautology {
    inner: Option<Box<dyn Ranker>>,
}

impl Tautology {
    /// Create a terminal Tautology
    pub fn new() -> Self {
        Self { inner: None }
    }

    /// Set the wrapped ranker
    pub fn with_ranker(mut self, ranker: Box<dyn Ranker>) -> Self {
        self.inner = Some(ranker);
        self
    }
}

impl Ranker for Tautology {
    /// Delegate to the wrapped ranker, or densify the personalization.
    ///
    /// Absent personalization yields weight 1.0 for every node — the
    /// seed-set-indicator reading of "every node is a seed".
    fn rank(
        &mut self,
        graph: &CsrGraph,
        personalization: Option<&Personalization>,
    ) -> Result<RankMapping> {
        if let Some(inner) = &mut self.inner {
            return inner.rank(graph, personalization);
        }
        let scores = match personalization {
            Some(p) => p.to_dense(graph.num_nodes),
            None => vec![1.0; graph.num_nodes],
        };
        Ok(RankMapping::new(scores))
    }

    fn transform(&self, graph: &CsrGraph, ranks: RankMapping) -> Result<RankMapping> {
        match &self.inner {
            Some(inner) => inner.transform(graph, ranks),
            None => Ok(ranks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::pagerank::PageRank;
    use crate::graph::builder::GraphBuilder;

    fn build_graph() -> CsrGraph {
        CsrGraph::from_builder(&GraphBuilder::from_edges([("a", "b"), ("b", "c")], false))
    }

    #[test]
    fn test_transform_is_identity() {
        let graph = build_graph();
        let mapping = RankMapping::new(vec![0.2, 0.5, 0.9]);
        let out = Tautology::new().transform(&graph, mapping.clone()).unwrap();
        assert_eq!(out, mapping);
    }

    #[test]
    fn test_rank_returns_the_personalization() {
        let graph = build_graph();
        let seeds = Personalization::from_pairs(&[(1, 2.5)]);
        let out = Tautology::new().rank(&graph, Some(&seeds)).unwrap();
        assert_eq!(out.scores(), &[0.0, 2.5, 0.0]);
    }

    #[test]
    fn test_rank_without_personalization_is_all_ones() {
        let graph = build_graph();
        let out = Tautology::new().rank(&graph, None).unwrap();
        assert_eq!(out.scores(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_wrapping_a_ranker_changes_nothing() {
        let graph = build_graph();
        let seeds = Personalization::from_nodes([0]);

        let mut bare = PageRank::new();
        let bare_out = bare.rank(&graph, Some(&seeds)).unwrap();

        let mut wrapped = Tautology::new().with_ranker(Box::new(PageRank::new()));
        let wrapped_out = wrapped.rank(&graph, Some(&seeds)).unwrap();

        assert_eq!(bare_out, wrapped_out);
    }
}
