//! Interface to the external thermodynamic model.
use crate::errors::{SgtError, SgtResult};
use ndarray::{Array1, Array2};

/// Thermodynamic properties required from the external equation of state.
///
/// Any model that provides the chemical potential, the Helmholtz energy
/// density and the pressure of the homogeneous fluid as functions of the
/// density vector and the temperature can drive the interfacial solvers.
/// All quantities are expected in a self-consistent (reduced) unit system;
/// the resulting tension carries the corresponding pressure times length
/// unit.
pub trait ThermodynamicOracle {
    /// The number of components the model is parametrized for.
    fn components(&self) -> usize;

    /// Chemical potential of every component.
    fn chemical_potential(&self, density: &Array1<f64>, temperature: f64) -> Array1<f64>;

    /// Helmholtz energy density of the homogeneous fluid.
    fn helmholtz_energy_density(&self, density: &Array1<f64>, temperature: f64) -> f64;

    /// Pressure of the homogeneous fluid.
    fn pressure(&self, density: &Array1<f64>, temperature: f64) -> f64;
}

/// Central finite difference approximation of the chemical potential
/// derivative `dmu_i/drho_j`.
///
/// Falls back to a forward difference where the density is too small to
/// step downwards.
pub(crate) fn chemical_potential_derivative<O: ThermodynamicOracle + ?Sized>(
    oracle: &O,
    density: &Array1<f64>,
    temperature: f64,
) -> Array2<f64> {
    let n = density.len();
    let mut dmu = Array2::zeros((n, n));
    let mut rho = density.clone();
    for j in 0..n {
        let h = f64::EPSILON.cbrt() * (1.0 + density[j].abs());
        if density[j] > h {
            rho[j] = density[j] + h;
            let mu_p = oracle.chemical_potential(&rho, temperature);
            rho[j] = density[j] - h;
            let mu_m = oracle.chemical_potential(&rho, temperature);
            for i in 0..n {
                dmu[(i, j)] = (mu_p[i] - mu_m[i]) / (2.0 * h);
            }
        } else {
            let mu_0 = oracle.chemical_potential(density, temperature);
            rho[j] = density[j] + h;
            let mu_p = oracle.chemical_potential(&rho, temperature);
            for i in 0..n {
                dmu[(i, j)] = (mu_p[i] - mu_0[i]) / h;
            }
        }
        rho[j] = density[j];
    }
    dmu
}

/// Precomputed bulk phase equilibrium.
///
/// The two bulk densities, the temperature and the pressure are supplied by
/// an external phase equilibrium solver; the interfacial solvers treat them
/// as a fixed boundary condition.
#[derive(Clone, Debug)]
pub struct BulkEquilibrium {
    pub rho_alpha: Array1<f64>,
    pub rho_beta: Array1<f64>,
    pub temperature: f64,
    pub pressure: f64,
}

impl BulkEquilibrium {
    pub fn new(
        rho_alpha: Array1<f64>,
        rho_beta: Array1<f64>,
        temperature: f64,
        pressure: f64,
    ) -> SgtResult<Self> {
        if rho_alpha.is_empty() || rho_alpha.len() != rho_beta.len() {
            return Err(SgtError::Configuration(format!(
                "Bulk densities of dimension {} and {} do not form an equilibrium.",
                rho_alpha.len(),
                rho_beta.len()
            )));
        }
        for rho in rho_alpha.iter().chain(rho_beta.iter()) {
            if !(rho.is_finite() && *rho >= 0.0) {
                return Err(SgtError::Configuration(format!(
                    "Bulk densities must be non-negative and finite, got {rho}."
                )));
            }
        }
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(SgtError::Configuration(format!(
                "Temperature must be positive, got {temperature}."
            )));
        }
        Ok(Self {
            rho_alpha,
            rho_beta,
            temperature,
            pressure,
        })
    }

    pub fn components(&self) -> usize {
        self.rho_alpha.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    struct Quadratic;

    impl ThermodynamicOracle for Quadratic {
        fn components(&self) -> usize {
            2
        }
        fn chemical_potential(&self, density: &Array1<f64>, _: f64) -> Array1<f64> {
            arr1(&[
                2.0 * density[0] + 0.5 * density[1],
                0.5 * density[0] + 3.0 * density[1],
            ])
        }
        fn helmholtz_energy_density(&self, density: &Array1<f64>, _: f64) -> f64 {
            density[0] * density[0] + 0.5 * density[0] * density[1] + 1.5 * density[1] * density[1]
        }
        fn pressure(&self, _: &Array1<f64>, _: f64) -> f64 {
            0.0
        }
    }

    #[test]
    fn derivative_matches_quadratic_model() {
        let dmu = chemical_potential_derivative(&Quadratic, &arr1(&[0.3, 0.7]), 1.0);
        assert_relative_eq!(dmu[(0, 0)], 2.0, max_relative = 1e-8);
        assert_relative_eq!(dmu[(0, 1)], 0.5, max_relative = 1e-8);
        assert_relative_eq!(dmu[(1, 0)], 0.5, max_relative = 1e-8);
        assert_relative_eq!(dmu[(1, 1)], 3.0, max_relative = 1e-8);
    }

    #[test]
    fn mismatched_bulk_densities_are_rejected() {
        assert!(matches!(
            BulkEquilibrium::new(arr1(&[1.0, 2.0]), arr1(&[1.0]), 300.0, 1.0),
            Err(SgtError::Configuration(_))
        ));
    }
}
