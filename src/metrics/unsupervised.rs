//! Unsupervised measures
//!
//! Read a rank mapping as a fuzzy membership indicator over the graph and
//! score the induced cut. Crisp {0,1} mappings (e.g. from
//! [`Threshold`](crate::postprocess::threshold::Threshold)) recover the
//! classic set-based definitions.

use super::Measure;
use crate::algorithms::RankMapping;
use crate::graph::csr::CsrGraph;

/// Boundary mass over internal volume: low values mean the scored set is
/// well separated from the rest of the graph.
#[derive(Debug, Clone, Copy)]
pub struct Conductance<'a> {
    graph: &'a CsrGraph,
    max_rank: f64,
}

impl<'a> Conductance<'a> {
    /// Create the measure over a graph, with membership saturating at 1.0
    pub fn new(graph: &'a CsrGraph) -> Self {
        Self {
            graph,
            max_rank: 1.0,
        }
    }

    /// Set the saturation value for membership scores
    pub fn with_max_rank(mut self, max_rank: f64) -> Self {
        self.max_rank = max_rank;
        self
    }
}

impl Measure for Conductance<'_> {
    fn evaluate(&self, ranks: &RankMapping) -> f64 {
        let mut external = 0.0;
        let mut internal = 0.0;
        for (u, v, w) in self.graph.edges() {
            let ru = ranks.get(u);
            let rv = ranks.get(v);
            external += w * ru * (self.max_rank - rv);
            internal += w * ru * rv;
        }
        if internal == 0.0 {
            return f64::INFINITY;
        }
        external / internal
    }
}

/// Internal edge mass over possible member pairs: 1.0 for a crisp clique.
#[derive(Debug, Clone, Copy)]
pub struct Density<'a> {
    graph: &'a CsrGraph,
}

impl<'a> Density<'a> {
    /// Create the measure over a graph
    pub fn new(graph: &'a CsrGraph) -> Self {
        Self { graph }
    }
}

impl Measure for Density<'_> {
    fn evaluate(&self, ranks: &RankMapping) -> f64 {
        let internal: f64 = self
            .graph
            .edges()
            .map(|(u, v, w)| w * ranks.get(u) * ranks.get(v))
            .sum();
        let mass = ranks.sum();
        let squares: f64 = ranks.scores().iter().map(|r| r * r).sum();
        let pairs = mass * mass - squares;
        if pairs <= 0.0 {
            return 0.0;
        }
        internal / pairs
    }
}

/// Newman modularity of the fuzzy membership against the degree-product
/// null model; positive values indicate denser-than-expected internals.
#[derive(Debug, Clone, Copy)]
pub struct Modularity<'a> {
    graph: &'a CsrGraph,
}

impl<'a> Modularity<'a> {
    /// Create the measure over a graph
    pub fn new(graph: &'a CsrGraph) -> Self {
        Self { graph }
    }
}

impl Measure for Modularity<'_> {
    fn evaluate(&self, ranks: &RankMapping) -> f64 {
        // Arc storage counts undirected edges in both directions, so the
        // total arc weight is the 2m of the classic formula.
        let two_m: f64 = self.graph.edges().map(|(_, _, w)| w).sum();
        if two_m == 0.0 {
            return 0.0;
        }

        let internal: f64 = self
            .graph
            .edges()
            .map(|(u, v, w)| w * ranks.get(u) * ranks.get(v))
            .sum();
        let weighted_volume: f64 = (0..self.graph.num_nodes as u32)
            .map(|u| ranks.get(u) * self.graph.node_total_weight(u))
            .sum();

        internal / two_m - (weighted_volume / two_m).powi(2)
    }
}
