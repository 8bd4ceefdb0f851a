//! Quadrature of the gradient energy integrand.
use crate::geometry::{CollocationAxis, UniformAxis};
use crate::oracle::ThermodynamicOracle;
use ndarray::{Array1, Array2};

/// Tension from a collocation profile.
///
/// Uses the differentiation matrix and quadrature weights of the axis that
/// produced the profile, so no additional discretization error enters.
pub(crate) fn collocation_tension(
    axis: &CollocationAxis,
    length: f64,
    density: &Array2<f64>,
    c: &Array2<f64>,
) -> f64 {
    let gradient = density.dot(&axis.d1().t()) * (2.0 / length);
    0.5 * length * quadratic_form_sum(&gradient, c, axis.weights())
}

/// Tension on the uniform grid, consistent with its difference operators.
pub(crate) fn finite_difference_tension(
    axis: &UniformAxis,
    density: &Array2<f64>,
    c: &Array2<f64>,
) -> f64 {
    let n = density.nrows();
    let m = density.ncols();
    let mut gradient = Array2::zeros((n, m));
    for i in 0..n {
        gradient
            .row_mut(i)
            .assign(&axis.gradient(density.row(i)));
    }
    quadratic_form_sum(&gradient, c, &axis.integration_weights())
}

fn quadratic_form_sum(gradient: &Array2<f64>, c: &Array2<f64>, weights: &Array1<f64>) -> f64 {
    let n = gradient.nrows();
    let mut tension = 0.0;
    for (k, w) in weights.iter().enumerate() {
        let mut integrand = 0.0;
        for i in 0..n {
            for j in 0..n {
                integrand += c[(i, j)] * gradient[(i, k)] * gradient[(j, k)];
            }
        }
        tension += w * integrand;
    }
    tension
}

/// Excess grand potential density along the profile,
/// `a0(rho(z)) - rho(z) . mu0 + p0`.
pub(crate) fn grand_potential_density<O: ThermodynamicOracle + ?Sized>(
    oracle: &O,
    density: &Array2<f64>,
    temperature: f64,
    mu0: &Array1<f64>,
    p0: f64,
) -> Array1<f64> {
    Array1::from_shape_fn(density.ncols(), |k| {
        let rho = density.column(k).to_owned();
        oracle.helmholtz_energy_density(&rho, temperature) - rho.dot(mu0) + p0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr2;

    #[test]
    fn quadratures_agree_on_a_known_profile() {
        // rho(z) = sin(pi z / L) on [0, L] with c = 1:
        // integral of rho'^2 dz = pi^2 / (2 L)
        let length = 4.0;
        let c = arr2(&[[1.0]]);

        let axis = CollocationAxis::new(40);
        let density = axis
            .grid(length)
            .mapv(|z| (std::f64::consts::PI * z / length).sin())
            .insert_axis(ndarray::Axis(0));
        let sigma = collocation_tension(&axis, length, &density, &c);
        let exact = std::f64::consts::PI.powi(2) / (2.0 * length);
        assert_relative_eq!(sigma, exact, max_relative = 1e-10);

        let fd_axis = UniformAxis::new(801, length);
        let fd_density = fd_axis
            .grid()
            .mapv(|z| (std::f64::consts::PI * z / length).sin())
            .insert_axis(ndarray::Axis(0));
        let fd_sigma = finite_difference_tension(&fd_axis, &fd_density, &c);
        assert_relative_eq!(fd_sigma, exact, max_relative = 1e-4);
    }
}
