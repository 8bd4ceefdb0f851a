//! Density profiles across the interface.
use crate::oracle::BulkEquilibrium;
use ndarray::{Array1, Array2};

/// Strategy for the initial density profile.
#[derive(Clone, Copy)]
pub enum ProfileInitialization<'a> {
    /// Affine interpolation between the bulk densities.
    Linear,
    /// Hyperbolic tangent interpolation centered in the domain.
    ///
    /// Physical profiles are sigmoidal, so this seed typically converges
    /// faster than the linear one.
    Tanh,
    /// Resample a previously converged result onto the new grid.
    Seeded(&'a TensionResult),
}

/// Converged interfacial state.
///
/// Immutable once returned; can be fed back as the seed of a subsequent
/// invocation, e.g. to converge a corrected mixture from the profile of an
/// uncorrected one or to refine the domain length.
#[derive(Clone, Debug)]
pub struct TensionResult {
    /// Interfacial tension
    pub tension: f64,
    /// Spatial grid
    pub z: Array1<f64>,
    /// Density profile with shape (components, nodes)
    pub density: Array2<f64>,
    /// Excess grand potential density along the profile
    pub grand_potential_density: Option<Array1<f64>>,
    /// Total number of solver iterations
    pub iterations: usize,
}

/// Build the initial density profile on the given grid.
///
/// The boundary nodes are set to the bulk densities exactly, independent of
/// the interpolation mode.
pub(crate) fn initial_profile(
    init: &ProfileInitialization,
    eq: &BulkEquilibrium,
    z: &Array1<f64>,
    length: f64,
) -> Array2<f64> {
    let n = eq.components();
    let m = z.len();
    let mut density = match init {
        ProfileInitialization::Linear => Array2::from_shape_fn((n, m), |(i, k)| {
            let weight = z[k] / length;
            eq.rho_alpha[i] + (eq.rho_beta[i] - eq.rho_alpha[i]) * weight
        }),
        ProfileInitialization::Tanh => Array2::from_shape_fn((n, m), |(i, k)| {
            let weight = 0.5 * (1.0 + (4.0 * (2.0 * z[k] / length - 1.0)).tanh());
            eq.rho_alpha[i] + (eq.rho_beta[i] - eq.rho_alpha[i]) * weight
        }),
        ProfileInitialization::Seeded(seed) => resample(&seed.z, &seed.density, z),
    };
    density.column_mut(0).assign(&eq.rho_alpha);
    density.column_mut(m - 1).assign(&eq.rho_beta);
    density
}

/// Linearly interpolate a profile onto a new grid.
///
/// The old domain is centered in the new one; nodes outside of it are
/// padded with the old boundary values. This covers both extension of a
/// converged profile to a longer domain and cropping to a shorter one.
pub(crate) fn resample(
    z_old: &Array1<f64>,
    density_old: &Array2<f64>,
    z_new: &Array1<f64>,
) -> Array2<f64> {
    let n = density_old.nrows();
    let m_old = z_old.len();
    let shift = 0.5 * (z_new[z_new.len() - 1] - z_old[m_old - 1]);
    let mut density = Array2::zeros((n, z_new.len()));
    let mut k = 0;
    for (l, &z) in z_new.iter().enumerate() {
        let t = z - shift;
        while k + 1 < m_old && z_old[k + 1] < t {
            k += 1;
        }
        if t <= z_old[0] {
            density.column_mut(l).assign(&density_old.column(0));
        } else if t >= z_old[m_old - 1] {
            density.column_mut(l).assign(&density_old.column(m_old - 1));
        } else {
            let w = (t - z_old[k]) / (z_old[k + 1] - z_old[k]);
            for i in 0..n {
                density[(i, l)] =
                    density_old[(i, k)] + (density_old[(i, k + 1)] - density_old[(i, k)]) * w;
            }
        }
    }
    density
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    fn equilibrium() -> BulkEquilibrium {
        BulkEquilibrium::new(arr1(&[0.1, 0.2]), arr1(&[0.7, 0.9]), 1.0, 0.0).unwrap()
    }

    #[test]
    fn boundaries_match_bulk_densities() {
        let eq = equilibrium();
        let z = Array1::linspace(0.0, 10.0, 21);
        for init in [ProfileInitialization::Linear, ProfileInitialization::Tanh] {
            let density = initial_profile(&init, &eq, &z, 10.0);
            for i in 0..2 {
                assert_eq!(density[(i, 0)], eq.rho_alpha[i]);
                assert_eq!(density[(i, 20)], eq.rho_beta[i]);
            }
        }
    }

    #[test]
    fn tanh_profile_crosses_at_the_center() {
        let eq = equilibrium();
        let z = Array1::linspace(0.0, 10.0, 21);
        let density = initial_profile(&ProfileInitialization::Tanh, &eq, &z, 10.0);
        assert_relative_eq!(density[(0, 10)], 0.4, max_relative = 1e-12);
        assert_relative_eq!(density[(1, 10)], 0.55, max_relative = 1e-12);
    }

    #[test]
    fn resampling_is_exact_on_the_same_grid() {
        let eq = equilibrium();
        let z = Array1::linspace(0.0, 10.0, 21);
        let density = initial_profile(&ProfileInitialization::Tanh, &eq, &z, 10.0);
        let resampled = resample(&z, &density, &z);
        for (a, b) in density.iter().zip(resampled.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn extension_pads_with_bulk_densities() {
        let eq = equilibrium();
        let z = Array1::linspace(0.0, 10.0, 21);
        let density = initial_profile(&ProfileInitialization::Tanh, &eq, &z, 10.0);
        let z_long = Array1::linspace(0.0, 30.0, 61);
        let extended = resample(&z, &density, &z_long);
        for i in 0..2 {
            // first and last 10 length units fall outside of the old domain
            assert_relative_eq!(extended[(i, 10)], density[(i, 0)], epsilon = 1e-12);
            assert_relative_eq!(extended[(i, 50)], density[(i, 20)], epsilon = 1e-12);
        }
        // the old center maps onto the new center
        assert_relative_eq!(extended[(0, 30)], density[(0, 10)], epsilon = 1e-12);
    }
}
