#![forbid(unsafe_code)]

//! Interaction graphs for register embedding.
//!
//! The embedding algorithms in `rydberg-layout` only see pairwise interaction strengths, so this
//! crate reduces a QUBO coefficient matrix to an undirected [`WeightedGraph`] with a stable edge
//! order and precomputed adjacency.

pub mod error;
pub mod graph;
pub mod matrix;

pub use error::{Error, Result};
pub use graph::{Edge, EdgeKey, WeightedGraph};
pub use matrix::{MAX_VARIABLES, from_interaction_matrix};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
