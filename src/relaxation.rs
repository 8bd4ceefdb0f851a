//! Pseudo-time stabilized relaxation of the interfacial profile on a fixed
//! finite difference grid.
use crate::bvp::check_components;
use crate::errors::{SgtError, SgtResult};
use crate::geometry::UniformAxis;
use crate::influence::InfluenceMatrix;
use crate::oracle::{BulkEquilibrium, ThermodynamicOracle};
use crate::profile::{initial_profile, ProfileInitialization, TensionResult};
use crate::solver::{SgtOptions, Verbosity};
use crate::tension;
use ndarray::{Array1, Array2};
use num_dual::linalg::LU;

/// Integrate `drho_i/ds = sum_j c_ij rho_j''(z) - (mu_i(rho(z)) - mu_i0)`
/// forward in pseudo-time until the profile is stationary.
///
/// The domain length and grid are fixed; the stationary profile satisfies
/// the same discrete Euler-Lagrange system as the collocation solver. The
/// stiff gradient operator is treated implicitly, the chemical potential
/// explicitly, so the iteration matrix is constant and factorized once.
pub fn solve_relaxation<O: ThermodynamicOracle>(
    eq: &BulkEquilibrium,
    oracle: &O,
    influence: &InfluenceMatrix,
    init: ProfileInitialization,
    options: &SgtOptions,
) -> SgtResult<TensionResult> {
    options.validate()?;
    check_components(eq, oracle, influence, &init)?;
    if influence.is_singular() {
        return Err(SgtError::SingularMatrix);
    }

    let axis = UniformAxis::new(options.node_count, options.length);
    let z = axis.grid().clone();
    let mut density = initial_profile(&init, eq, &z, options.length);
    let mu0 = oracle.chemical_potential(&eq.rho_alpha, eq.temperature);
    let c = influence.matrix();

    let n = eq.components();
    let m = options.node_count;
    let interior = m - 2;
    let h2 = axis.step() * axis.step();
    let dt = options.time_step;

    // iteration matrix 1/dt - C (x) D2 over the interior unknowns
    let mut matrix = Array2::zeros((n * interior, n * interior));
    for i in 0..n {
        for j in 0..n {
            let cij = c[(i, j)] / h2;
            for k in 0..interior {
                let row = i * interior + k;
                matrix[(row, j * interior + k)] += 2.0 * cij;
                if k > 0 {
                    matrix[(row, j * interior + k - 1)] -= cij;
                }
                if k + 1 < interior {
                    matrix[(row, j * interior + k + 1)] -= cij;
                }
            }
        }
    }
    for row in 0..n * interior {
        matrix[(row, row)] += 1.0 / dt;
    }
    let lu = LU::new(matrix)?;

    let mut rhs = Array1::zeros(n * interior);
    let mut step_norm = f64::NAN;
    for step in 1..=options.max_iterations {
        for k in 1..m - 1 {
            let rho = density.column(k).to_owned();
            let mu = oracle.chemical_potential(&rho, eq.temperature);
            for i in 0..n {
                let mut r = density[(i, k)] / dt - (mu[i] - mu0[i]);
                if k == 1 {
                    r += (0..n).map(|j| c[(i, j)] * eq.rho_alpha[j]).sum::<f64>() / h2;
                }
                if k == m - 2 {
                    r += (0..n).map(|j| c[(i, j)] * eq.rho_beta[j]).sum::<f64>() / h2;
                }
                rhs[i * interior + k - 1] = r;
            }
        }
        let updated = lu.solve(&rhs);

        step_norm = 0.0;
        for i in 0..n {
            for k in 1..m - 1 {
                let new = updated[i * interior + k - 1];
                step_norm = step_norm.max((new - density[(i, k)]).abs() / dt);
                density[(i, k)] = new;
            }
        }
        if !(step_norm.is_finite() && updated.iter().all(|r| r.is_finite())) {
            return Err(SgtError::PhysicalConsistency(
                "The pseudo-time iteration left the physical density range.".into(),
            ));
        }
        log_iter!(
            options.verbosity,
            "relaxation | {:5} | {:.6e}",
            step,
            step_norm
        );

        if step_norm < options.tolerance {
            let sigma = tension::finite_difference_tension(&axis, &density, c);
            log_result!(
                options.verbosity,
                "stationary after {} steps | tension {:.8e}",
                step,
                sigma
            );
            let omega =
                tension::grand_potential_density(oracle, &density, eq.temperature, &mu0, eq.pressure);
            return Ok(TensionResult {
                tension: sigma,
                z,
                density,
                grand_potential_density: Some(omega),
                iterations: step,
            });
        }
    }
    Err(SgtError::NotConverged {
        solver: "relaxation",
        iterations: options.max_iterations,
        residual: step_norm,
    })
}
