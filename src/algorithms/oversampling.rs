//! Seed oversampling
//!
//! Wraps a ranker and enriches a sparse seed set before the final solve.
//! Useful when the known members of a community are too few to personalize
//! a walk well: either pull in their immediate neighborhoods, or run a
//! first pass and promote every node that ranks at least as high as the
//! weakest seed.

use std::str::FromStr;

use super::{Personalization, RankMapping, Ranker};
use crate::graph::csr::CsrGraph;
use crate::{RankError, Result};

/// How the seed set is enriched before the final ranking call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OversamplingMethod {
    /// Rank once with the given seeds, then re-seed with every node
    /// scoring at least the weakest positive seed and rank again
    #[default]
    Safe,
    /// Extend the seed set with all out-neighbors of every positive seed
    Neighbors,
}

impl FromStr for OversamplingMethod {
    type Err = RankError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "safe" => Ok(OversamplingMethod::Safe),
            "neighbors" => Ok(OversamplingMethod::Neighbors),
            other => Err(RankError::InvalidConfiguration(format!(
                "unknown oversampling method {other:?}; expected safe or neighbors"
            ))),
        }
    }
}

/// A ranker wrapper that oversamples the seed set.
pub struct SeedOversampling {
    ranker: Box<dyn Ranker>,
    method: OversamplingMethod,
}

impl SeedOversampling {
    /// Wrap a ranker with the default [`OversamplingMethod::Safe`] scheme
    pub fn new(ranker: Box<dyn Ranker>) -> Self {
        Self {
            ranker,
            method: OversamplingMethod::default(),
        }
    }

    /// Set the oversampling method
    pub fn with_method(mut self, method: OversamplingMethod) -> Self {
        self.method = method;
        self
    }
}

impl Ranker for SeedOversampling {
    fn rank(
        &mut self,
        graph: &CsrGraph,
        personalization: Option<&Personalization>,
    ) -> Result<RankMapping> {
        let seeds = match personalization {
            // Nothing to oversample without an explicit seed set.
            None => return self.ranker.rank(graph, None),
            Some(seeds) => seeds,
        };

        match self.method {
            OversamplingMethod::Neighbors => {
                let mut expanded = Personalization::default();
                for (node, weight) in seeds.iter() {
                    if weight <= 0.0 || node as usize >= graph.num_nodes {
                        continue;
                    }
                    expanded.insert(node, 1.0);
                    for (neighbor, _) in graph.neighbors(node) {
                        expanded.insert(neighbor, 1.0);
                    }
                }
                self.ranker.rank(graph, Some(&expanded))
            }
            OversamplingMethod::Safe => {
                let base = self.ranker.rank(graph, Some(seeds))?;
                let weakest = seeds
                    .iter()
                    .filter(|&(node, weight)| weight > 0.0 && (node as usize) < graph.num_nodes)
                    .map(|(node, _)| base.get(node))
                    .fold(f64::INFINITY, f64::min);

                let expanded = Personalization::from_nodes(
                    (0..graph.num_nodes as u32).filter(|&n| base.get(n) >= weakest),
                );
                self.ranker.rank(graph, Some(&expanded))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::pagerank::PageRank;
    use crate::graph::builder::GraphBuilder;

    fn build_two_cluster_graph() -> CsrGraph {
        // Two triangles joined by a single bridge edge.
        CsrGraph::from_builder(&GraphBuilder::from_edges(
            [
                ("a", "b"),
                ("b", "c"),
                ("c", "a"),
                ("c", "d"),
                ("d", "e"),
                ("e", "f"),
                ("f", "d"),
            ],
            false,
        ))
    }

    #[test]
    fn test_neighbors_expansion_boosts_the_neighborhood() {
        let graph = build_two_cluster_graph();
        let seeds = Personalization::from_nodes([0]); // "a"

        let mut plain = PageRank::new();
        let base = plain.rank(&graph, Some(&seeds)).unwrap();

        let mut oversampled = SeedOversampling::new(Box::new(PageRank::new()))
            .with_method(OversamplingMethod::Neighbors);
        let boosted = oversampled.rank(&graph, Some(&seeds)).unwrap();

        // "b" (id 1) is a's neighbor and becomes a seed itself.
        assert!(boosted.get(1) > base.get(1));
        assert!((boosted.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_safe_keeps_a_dominant_seed_fixed_point() {
        let graph = build_two_cluster_graph();
        let seeds = Personalization::from_nodes([0]);

        let mut oversampled = SeedOversampling::new(Box::new(PageRank::new()));
        let result = oversampled.rank(&graph, Some(&seeds)).unwrap();

        assert_eq!(result.len(), graph.num_nodes);
        assert!((result.sum() - 1.0).abs() < 1e-6);
        // The original seed survives every promotion round.
        assert!(result.get(0) > 0.0);
    }

    #[test]
    fn test_no_personalization_delegates_unchanged() {
        let graph = build_two_cluster_graph();

        let mut plain = PageRank::new();
        let base = plain.rank(&graph, None).unwrap();

        let mut oversampled = SeedOversampling::new(Box::new(PageRank::new()));
        let result = oversampled.rank(&graph, None).unwrap();

        for (a, b) in base.scores().iter().zip(result.scores()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "neighbors".parse::<OversamplingMethod>().unwrap(),
            OversamplingMethod::Neighbors
        );
        assert!("aggressive".parse::<OversamplingMethod>().is_err());
    }
}
