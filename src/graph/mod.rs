//! Graph construction and representation
//!
//! This module provides a mutable [`builder::GraphBuilder`] for incremental
//! construction and an immutable [`csr::CsrGraph`] optimized for the
//! repeated edge sweeps the ranking algorithms perform. [`matrix`] turns a
//! graph plus a normalization mode into a sparse transition matrix.

pub mod builder;
pub mod csr;
pub mod matrix;
