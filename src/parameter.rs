//! Molecular parameter records for components and mixtures.
//!
//! The solvers interpret only the influence parameter of each component;
//! all other fields describe the component to the external equation of
//! state and are passed through opaquely.
use crate::errors::{SgtError, SgtResult};
use crate::influence::InfluenceMatrix;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Association parameters of a single component.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AssociationRecord {
    /// Association energy
    pub epsilon_ab: f64,
    /// Association volume
    pub kappa_ab: f64,
    /// Number of association sites of type A
    #[serde(default = "default_sites")]
    pub na: f64,
    /// Number of association sites of type B
    #[serde(default = "default_sites")]
    pub nb: f64,
}

fn default_sites() -> f64 {
    1.0
}

/// Molecular parameters of a single component.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    /// Number of segments
    pub m: f64,
    /// Segment diameter
    pub sigma: f64,
    /// Dispersion energy divided by the Boltzmann constant
    pub epsilon_k: f64,
    /// Repulsive exponent
    pub lambda_r: f64,
    /// Attractive exponent
    pub lambda_a: f64,
    /// Association contribution
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub association: Option<AssociationRecord>,
    /// Influence parameter
    pub cii: f64,
}

/// An ordered list of components together with the symmetric binary
/// interaction matrix and the symmetric influence correction matrix.
///
/// The interaction matrix `k_ij` belongs to the external equation of state
/// and is only stored here; the correction matrix `beta_ij` enters the
/// influence matrix. Both are kept symmetric with zero diagonal by
/// construction.
#[derive(Clone, Debug)]
pub struct Mixture {
    components: Vec<Component>,
    k_ij: Array2<f64>,
    beta_ij: Array2<f64>,
}

impl Mixture {
    /// Create a new mixture with zero binary parameters.
    pub fn new(components: Vec<Component>) -> SgtResult<Self> {
        if components.is_empty() {
            return Err(SgtError::Configuration(
                "A mixture requires at least one component.".into(),
            ));
        }
        let n = components.len();
        Ok(Self {
            components,
            k_ij: Array2::zeros((n, n)),
            beta_ij: Array2::zeros((n, n)),
        })
    }

    /// Read a list of components from a JSON file.
    pub fn from_json<P: AsRef<Path>>(file: P) -> SgtResult<Self> {
        let reader = BufReader::new(File::open(file).map_err(|e| {
            SgtError::Configuration(format!("Could not open parameter file: {e}"))
        })?);
        let components: Vec<Component> = serde_json::from_reader(reader)
            .map_err(|e| SgtError::Configuration(format!("Could not parse parameter file: {e}")))?;
        Self::new(components)
    }

    /// Set a binary interaction parameter. The matrix stays symmetric.
    pub fn set_binary_interaction(&mut self, i: usize, j: usize, k_ij: f64) -> SgtResult<()> {
        self.check_pair(i, j)?;
        self.k_ij[(i, j)] = k_ij;
        self.k_ij[(j, i)] = k_ij;
        Ok(())
    }

    /// Set an influence correction parameter. The matrix stays symmetric
    /// with zero diagonal.
    pub fn set_influence_correction(&mut self, i: usize, j: usize, beta_ij: f64) -> SgtResult<()> {
        self.check_pair(i, j)?;
        self.beta_ij[(i, j)] = beta_ij;
        self.beta_ij[(j, i)] = beta_ij;
        Ok(())
    }

    fn check_pair(&self, i: usize, j: usize) -> SgtResult<()> {
        let n = self.components.len();
        if i >= n || j >= n {
            return Err(SgtError::Configuration(format!(
                "Binary pair ({i}, {j}) out of range for {n} components."
            )));
        }
        if i == j {
            return Err(SgtError::Configuration(format!(
                "Binary parameters are defined for distinct components, got ({i}, {j})."
            )));
        }
        Ok(())
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn ncomponents(&self) -> usize {
        self.components.len()
    }

    pub fn k_ij(&self) -> &Array2<f64> {
        &self.k_ij
    }

    pub fn beta_ij(&self) -> &Array2<f64> {
        &self.beta_ij
    }

    /// Pure component influence parameters in component order.
    pub fn influence_parameters(&self) -> Array1<f64> {
        self.components.iter().map(|c| c.cii).collect()
    }

    /// Build the cross influence matrix from the pure component influence
    /// parameters and the stored corrections.
    pub fn influence_matrix(&self) -> SgtResult<InfluenceMatrix> {
        InfluenceMatrix::new(&self.influence_parameters(), &self.beta_ij)
    }
}
