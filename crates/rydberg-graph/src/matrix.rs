//! Interaction-matrix ingestion.
//!
//! A QUBO coefficient matrix carries local biases on its diagonal and pairwise interactions off
//! it. Only the off-diagonal part becomes graph edges. Both full symmetric matrices and
//! triangular ones (each pair stored once) are accepted.

use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::graph::WeightedGraph;

/// Largest problem a register can host.
pub const MAX_VARIABLES: usize = 80;

/// Checks that `matrix` is a usable interaction matrix without building the graph.
pub fn validate(matrix: &DMatrix<f64>) -> Result<()> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(Error::NotSquare { rows, cols });
    }
    if rows > MAX_VARIABLES {
        return Err(Error::TooLarge {
            size: rows,
            max: MAX_VARIABLES,
        });
    }
    for row in 0..rows {
        for col in 0..cols {
            let value = matrix[(row, col)];
            if !value.is_finite() {
                return Err(Error::NonFinite { row, col });
            }
            if row != col && value < 0.0 {
                return Err(Error::NegativeOffDiagonal { row, col, value });
            }
        }
    }
    for row in 0..rows {
        for col in (row + 1)..cols {
            let upper = matrix[(row, col)];
            let lower = matrix[(col, row)];
            if upper != 0.0 && lower != 0.0 && upper != lower {
                return Err(Error::Asymmetric {
                    row,
                    col,
                    upper,
                    lower,
                });
            }
        }
    }
    Ok(())
}

/// Builds the interaction graph from the off-diagonal coefficients of `matrix`.
pub fn from_interaction_matrix(matrix: &DMatrix<f64>) -> Result<WeightedGraph> {
    validate(matrix)?;

    let n = matrix.nrows();
    let mut edges = Vec::new();
    for row in 0..n {
        for col in (row + 1)..n {
            let upper = matrix[(row, col)];
            let weight = if upper != 0.0 {
                upper
            } else {
                matrix[(col, row)]
            };
            if weight != 0.0 {
                edges.push((row, col, weight));
            }
        }
    }

    WeightedGraph::from_edges(n, edges)
}

/// Diagonal coefficients, in variable order.
pub fn local_biases(matrix: &DMatrix<f64>) -> Vec<f64> {
    let n = matrix.nrows().min(matrix.ncols());
    (0..n).map(|i| matrix[(i, i)]).collect()
}
