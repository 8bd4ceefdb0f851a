//! A synthetic free energy model with a closed form interfacial solution.
//!
//! Every component carries an independent quartic double well
//! `a0_i = A_i (rho_i - rho_v_i)^2 (rho_l_i - rho_i)^2`, so the chemical
//! potentials vanish at both bulk densities and the pressure of either bulk
//! phase is zero: any combination of well minima is an exact phase
//! equilibrium. For a single component with influence parameter `c` the
//! tension has the closed form `sqrt(2 c A) (rho_l - rho_v)^3 / 6` and the
//! profile is a hyperbolic tangent.
#![allow(dead_code)]
use ndarray::Array1;
use sgt::ThermodynamicOracle;

pub struct DoubleWell {
    pub a: Vec<f64>,
    pub rho_v: Vec<f64>,
    pub rho_l: Vec<f64>,
}

impl DoubleWell {
    pub fn pure() -> Self {
        Self {
            a: vec![1.0],
            rho_v: vec![0.2],
            rho_l: vec![0.8],
        }
    }

    pub fn binary() -> Self {
        Self {
            a: vec![1.0, 1.2],
            rho_v: vec![0.1, 0.15],
            rho_l: vec![0.7, 0.9],
        }
    }

    /// Closed form tension of component `i` alone.
    pub fn exact_tension(&self, i: usize, cii: f64) -> f64 {
        (2.0 * cii * self.a[i]).sqrt() * (self.rho_l[i] - self.rho_v[i]).powi(3) / 6.0
    }
}

impl ThermodynamicOracle for DoubleWell {
    fn components(&self) -> usize {
        self.a.len()
    }

    fn chemical_potential(&self, density: &Array1<f64>, _: f64) -> Array1<f64> {
        Array1::from_shape_fn(self.a.len(), |i| {
            let (v, l, rho) = (self.rho_v[i], self.rho_l[i], density[i]);
            2.0 * self.a[i] * (rho - v) * (l - rho) * (l + v - 2.0 * rho)
        })
    }

    fn helmholtz_energy_density(&self, density: &Array1<f64>, _: f64) -> f64 {
        (0..self.a.len())
            .map(|i| {
                let dv = density[i] - self.rho_v[i];
                let dl = self.rho_l[i] - density[i];
                self.a[i] * dv * dv * dl * dl
            })
            .sum()
    }

    fn pressure(&self, density: &Array1<f64>, temperature: f64) -> f64 {
        density.dot(&self.chemical_potential(density, temperature))
            - self.helmholtz_energy_density(density, temperature)
    }
}
