//! Construction of the symmetric cross influence matrix.
use crate::errors::{SgtError, SgtResult};
use ndarray::{Array1, Array2};

/// Symmetric cross influence matrix
/// `c_ij = (1 - beta_ij) * sqrt(c_ii * c_jj)`.
///
/// Without any binary correction the matrix collapses to products of the
/// pure component values and the coupled Euler-Lagrange system degenerates;
/// that case is classified as singular and refused by the boundary value
/// solvers.
#[derive(Clone, Debug)]
pub struct InfluenceMatrix {
    c: Array2<f64>,
    singular: bool,
}

impl InfluenceMatrix {
    /// Build the influence matrix from pure component influence parameters
    /// and the symmetric, zero-diagonal correction matrix.
    pub fn new(cii: &Array1<f64>, beta: &Array2<f64>) -> SgtResult<Self> {
        let n = cii.len();
        if beta.shape() != [n, n] {
            return Err(SgtError::Configuration(format!(
                "Correction matrix of shape {:?} does not match {} influence parameters.",
                beta.shape(),
                n
            )));
        }
        for (i, &c) in cii.iter().enumerate() {
            if !(c.is_finite() && c > 0.0) {
                return Err(SgtError::Configuration(format!(
                    "Influence parameter of component {i} must be positive, got {c}."
                )));
            }
        }
        let mut singular = true;
        for i in 0..n {
            if beta[(i, i)] != 0.0 {
                return Err(SgtError::Configuration(format!(
                    "Correction matrix must have zero diagonal, got beta[({i}, {i})] = {}.",
                    beta[(i, i)]
                )));
            }
            for j in i + 1..n {
                if beta[(i, j)] != beta[(j, i)] {
                    return Err(SgtError::Configuration(format!(
                        "Correction matrix must be symmetric, got beta[({i}, {j})] = {} and beta[({j}, {i})] = {}.",
                        beta[(i, j)],
                        beta[(j, i)]
                    )));
                }
                if beta[(i, j)] != 0.0 {
                    singular = false;
                }
            }
        }
        let c = Array2::from_shape_fn((n, n), |(i, j)| {
            (1.0 - beta[(i, j)]) * (cii[i] * cii[j]).sqrt()
        });
        Ok(Self { c, singular })
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.c
    }

    pub fn components(&self) -> usize {
        self.c.nrows()
    }

    /// A matrix without off-diagonal corrections cannot drive the coupled
    /// boundary value problem.
    pub fn is_singular(&self) -> bool {
        self.singular
    }
}
