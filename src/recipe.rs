//! Declarative algorithm recipes
//!
//! A [`Recipe`] describes a ranking algorithm and its postprocessor chain
//! as data, typically deserialized from JSON produced by experiment
//! configuration. String fields are interpreted when the recipe is built,
//! not when it is parsed, so an unrecognized method name surfaces as an
//! [`InvalidConfiguration`](crate::RankError::InvalidConfiguration) at
//! the point of use.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "algorithm": "pagerank",
//!   "alpha": 0.9,
//!   "normalization": "col",
//!   "max_iterations": 1000,
//!   "postprocess": [
//!     { "kind": "normalize", "method": "sum" },
//!     { "kind": "threshold", "threshold": 0.5 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::algorithms::heat_kernel::HeatKernel;
use crate::algorithms::oversampling::SeedOversampling;
use crate::algorithms::pagerank::PageRank;
use crate::algorithms::Ranker;
use crate::convergence::ConvergenceManager;
use crate::graph::matrix::Normalization;
use crate::postprocess::normalize::Normalize;
use crate::postprocess::ordinals::Ordinals;
use crate::postprocess::sweep::Sweep;
use crate::postprocess::tautology::Tautology;
use crate::postprocess::threshold::{Threshold, ThresholdRule};
use crate::{RankError, Result};

fn default_alpha() -> f64 {
    0.85
}

fn default_t() -> f64 {
    5.0
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_max_iterations() -> usize {
    1000
}

fn default_method() -> String {
    "max".to_string()
}

/// A ranking algorithm plus its postprocessor chain, as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Terminal algorithm: `"pagerank"`, `"heat_kernel"`, or `"tautology"`
    pub algorithm: String,

    /// PageRank damping factor
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// HeatKernel diffusion time
    #[serde(default = "default_t")]
    pub t: f64,

    /// Transition-matrix normalization mode (default `"auto"`)
    #[serde(default)]
    pub normalization: Option<String>,

    /// Convergence tolerance
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration budget
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Postprocessors applied innermost-first
    #[serde(default)]
    pub postprocess: Vec<Step>,
}

/// One postprocessor layer of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Divide scores by their max or sum
    Normalize {
        #[serde(default = "default_method")]
        method: String,
    },
    /// Replace scores with dense rank positions
    Ordinals,
    /// Binarize against a rule name or a literal cut-off
    Threshold { threshold: ThresholdSpec },
    /// Divide by a uniform-personalization baseline
    Sweep,
    /// Enrich the seed set before solving
    Oversample { method: String },
}

/// Either a rule name (`"none"`, `"gap"`) or a literal numeric cut-off.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThresholdSpec {
    Rule(String),
    Value(f64),
}

impl ThresholdSpec {
    fn to_rule(&self) -> Result<ThresholdRule> {
        match self {
            ThresholdSpec::Value(v) => Ok(ThresholdRule::Value(*v)),
            ThresholdSpec::Rule(name) => match name.to_lowercase().as_str() {
                "none" => Ok(ThresholdRule::None),
                "gap" => Ok(ThresholdRule::Gap),
                other => Err(RankError::InvalidConfiguration(format!(
                    "unknown threshold rule {other:?}; expected none, gap, or a number"
                ))),
            },
        }
    }
}

impl Recipe {
    /// Parse a recipe from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| RankError::InvalidConfiguration(format!("recipe does not parse: {e}")))
    }

    /// Assemble the described ranker and postprocessor chain
    pub fn build(&self) -> Result<Box<dyn Ranker>> {
        let normalization: Normalization =
            self.normalization.as_deref().unwrap_or("auto").parse()?;
        let convergence = ConvergenceManager::new()
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations);

        let mut ranker: Box<dyn Ranker> = match self.algorithm.to_lowercase().as_str() {
            "pagerank" => Box::new(
                PageRank::new()
                    .with_alpha(self.alpha)
                    .with_normalization(normalization)
                    .with_convergence(convergence),
            ),
            "heat_kernel" | "heatkernel" => Box::new(
                HeatKernel::new()
                    .with_t(self.t)
                    .with_normalization(normalization)
                    .with_convergence(convergence),
            ),
            "tautology" => Box::new(Tautology::new()),
            other => {
                return Err(RankError::InvalidConfiguration(format!(
                    "unknown algorithm {other:?}; expected pagerank, heat_kernel, or tautology"
                )))
            }
        };

        for step in &self.postprocess {
            ranker = match step {
                Step::Normalize { method } => {
                    Box::new(Normalize::new(method.parse()?).with_ranker(ranker))
                }
                Step::Ordinals => Box::new(Ordinals::new().with_ranker(ranker)),
                Step::Threshold { threshold } => {
                    Box::new(Threshold::new(threshold.to_rule()?).with_ranker(ranker))
                }
                Step::Sweep => Box::new(Sweep::new(ranker)),
                Step::Oversample { method } => {
                    Box::new(SeedOversampling::new(ranker).with_method(method.parse()?))
                }
            };
        }

        Ok(ranker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Personalization;
    use crate::graph::builder::GraphBuilder;
    use crate::graph::csr::CsrGraph;

    fn build_graph() -> CsrGraph {
        CsrGraph::from_builder(&GraphBuilder::from_edges(
            [("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")],
            false,
        ))
    }

    #[test]
    fn test_full_recipe_round_trips_through_json() {
        let json = r#"{
            "algorithm": "pagerank",
            "alpha": 0.9,
            "normalization": "col",
            "postprocess": [
                { "kind": "normalize", "method": "sum" },
                { "kind": "threshold", "threshold": 0.1 }
            ]
        }"#;
        let recipe = Recipe::from_json(json).unwrap();
        assert_eq!(recipe.max_iterations, 1000); // serde default

        let mut algorithm = recipe.build().unwrap();
        let graph = build_graph();
        let seeds = Personalization::from_nodes([0]);
        let ranks = algorithm.rank(&graph, Some(&seeds)).unwrap();

        // Thresholded output is binary.
        assert!(ranks.scores().iter().all(|&s| s == 0.0 || s == 1.0));
    }

    #[test]
    fn test_unknown_algorithm_fails_at_build() {
        let recipe = Recipe::from_json(r#"{ "algorithm": "simrank" }"#).unwrap();
        let err = recipe.build().unwrap_err();
        assert!(matches!(err, RankError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_unknown_normalize_method_fails_at_build() {
        let json = r#"{
            "algorithm": "pagerank",
            "postprocess": [{ "kind": "normalize", "method": "median" }]
        }"#;
        let err = Recipe::from_json(json).unwrap().build().unwrap_err();
        assert!(matches!(err, RankError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_threshold_accepts_rule_names_and_numbers() {
        assert!(matches!(
            ThresholdSpec::Rule("gap".into()).to_rule().unwrap(),
            ThresholdRule::Gap
        ));
        assert!(matches!(
            ThresholdSpec::Value(0.25).to_rule().unwrap(),
            ThresholdRule::Value(_)
        ));
        assert!(ThresholdSpec::Rule("cliff".into()).to_rule().is_err());
    }

    #[test]
    fn test_heat_kernel_recipe_builds() {
        let json = r#"{ "algorithm": "heat_kernel", "t": 2.0, "normalization": "col" }"#;
        let mut algorithm = Recipe::from_json(json).unwrap().build().unwrap();
        let graph = build_graph();
        let ranks = algorithm.rank(&graph, None).unwrap();
        assert_eq!(ranks.len(), graph.num_nodes);
    }
}
