//! Sparse transition matrices
//!
//! Converts a [`CsrGraph`] plus a [`Normalization`] mode into the sparse
//! transition matrix the iterative solvers multiply against. Conversion is
//! deterministic for a fixed graph and mode, and the row/column order is
//! the graph's own node enumeration order.

use std::str::FromStr;

use super::csr::CsrGraph;
use crate::{RankError, Result};

/// How adjacency weights are normalized into transition probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// [`Normalization::Symmetric`] for undirected graphs, [`Normalization::Col`] otherwise
    #[default]
    Auto,
    /// Divide each out-edge by the source's total outgoing weight
    ///
    /// Rows of non-dangling nodes sum to 1; this is the random-walk
    /// transition used with left vector-matrix products.
    Col,
    /// Divide each arc by the target's total incoming weight
    Row,
    /// Scale each arc by the square roots of both endpoint volumes
    Symmetric,
    /// Keep raw adjacency weights
    None,
}

impl FromStr for Normalization {
    type Err = RankError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "auto" => Ok(Normalization::Auto),
            "col" => Ok(Normalization::Col),
            "row" => Ok(Normalization::Row),
            "symmetric" => Ok(Normalization::Symmetric),
            "none" => Ok(Normalization::None),
            other => Err(RankError::InvalidConfiguration(format!(
                "unknown normalization {other:?}; expected auto, col, row, symmetric, or none"
            ))),
        }
    }
}

/// A sparse row-major transition matrix aligned with a graph's node order
#[derive(Debug, Clone)]
pub struct TransitionMatrix {
    n: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<u32>,
    values: Vec<f64>,
}

impl TransitionMatrix {
    /// Number of rows (= columns = graph nodes)
    pub fn n(&self) -> usize {
        self.n
    }

    /// Left vector-matrix product `y = x * M`
    ///
    /// This is one propagation step of the random walk: mass at each node
    /// is pushed along its out-edges.
    pub fn apply_left(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.n);
        let mut y = vec![0.0; self.n];
        for row in 0..self.n {
            let mass = x[row];
            if mass == 0.0 {
                continue;
            }
            for i in self.row_ptr[row]..self.row_ptr[row + 1] {
                y[self.col_idx[i] as usize] += mass * self.values[i];
            }
        }
        y
    }

    /// Rows with no outgoing transition mass
    pub fn dangling_rows(&self) -> Vec<u32> {
        (0..self.n as u32)
            .filter(|&r| self.row_ptr[r as usize] == self.row_ptr[r as usize + 1])
            .collect()
    }
}

/// Builds transition matrices for a fixed normalization mode.
///
/// One preprocessor instance can serve many graphs; it holds no per-graph
/// state, so sharing it across ranking calls is safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor {
    normalization: Normalization,
}

impl Preprocessor {
    /// Create a preprocessor for the given normalization mode
    pub fn new(normalization: Normalization) -> Self {
        Self { normalization }
    }

    /// The configured normalization mode
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Convert a graph into a sparse transition matrix
    ///
    /// Fails fast with [`RankError::EmptyGraph`] on a zero-node graph;
    /// every downstream solve would otherwise divide by zero.
    pub fn to_matrix(&self, graph: &CsrGraph) -> Result<TransitionMatrix> {
        if graph.is_empty() {
            return Err(RankError::EmptyGraph);
        }

        let mode = match self.normalization {
            Normalization::Auto => {
                if graph.directed {
                    Normalization::Col
                } else {
                    Normalization::Symmetric
                }
            }
            other => other,
        };

        let n = graph.num_nodes;
        let in_weights = match mode {
            Normalization::Row | Normalization::Symmetric => graph.in_weights(),
            _ => Vec::new(),
        };

        let mut values = Vec::with_capacity(graph.num_edges());
        for (u, v, w) in graph.edges() {
            let value = match mode {
                Normalization::Col => w / graph.node_total_weight(u),
                Normalization::Row => w / in_weights[v as usize],
                Normalization::Symmetric => {
                    let out = graph.node_total_weight(u);
                    let into = in_weights[v as usize];
                    w / (out.sqrt() * into.sqrt())
                }
                Normalization::None => w,
                Normalization::Auto => unreachable!("resolved above"),
            };
            values.push(value);
        }

        Ok(TransitionMatrix {
            n,
            row_ptr: graph.row_ptr.clone(),
            col_idx: graph.col_idx.clone(),
            values,
        })
    }
}
