//! Orthogonal collocation solution of the interfacial Euler-Lagrange
//! system with adaptive extension of the domain length.
use crate::errors::{SgtError, SgtResult};
use crate::geometry::CollocationAxis;
use crate::influence::InfluenceMatrix;
use crate::oracle::{chemical_potential_derivative, BulkEquilibrium, ThermodynamicOracle};
use crate::profile::{initial_profile, resample, ProfileInitialization, TensionResult};
use crate::solver::{inf_norm, SgtOptions, Verbosity};
use crate::tension;
use ndarray::{Array1, Array2};
use num_dual::linalg::{norm, LU};

const MAX_HALVINGS: usize = 5;

/// Solve the interfacial Euler-Lagrange system
/// `sum_j c_ij rho_j''(z) = mu_i(rho(z)) - mu_i0` with the bulk densities
/// as boundary conditions by orthogonal collocation.
///
/// Starting from the initial domain length, the domain is repeatedly
/// extended by the configured growth factor, reseeding each solve from the
/// previous profile, until the tension stabilizes.
pub fn solve_bvp<O: ThermodynamicOracle>(
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

    let axis = CollocationAxis::new(options.node_count);
    let mut length = options.length;
    let mut z = axis.grid(length);
    let mut density = initial_profile(&init, eq, &z, length);
    let mu0 = oracle.chemical_potential(&eq.rho_alpha, eq.temperature);
    let c = influence.matrix();

    let mut tension_history: Vec<f64> = Vec::with_capacity(options.max_extensions);
    let mut iterations = 0;
    for _ in 0..options.max_extensions {
        iterations += newton_solve(&axis, length, eq, oracle, c, &mu0, &mut density, options)?;
        let sigma = tension::collocation_tension(&axis, length, &density, c);
        log_result!(
            options.verbosity,
            "domain length {:10.4} | tension {:.8e}",
            length,
            sigma
        );

        if let Some(&previous) = tension_history.last() {
            let change = (sigma - previous).abs() / sigma.abs().max(f64::EPSILON);
            if change < options.tension_tolerance {
                tension_history.push(sigma);
                let omega =
                    tension::grand_potential_density(oracle, &density, eq.temperature, &mu0, eq.pressure);
                return Ok(TensionResult {
                    tension: sigma,
                    z,
                    density,
                    grand_potential_density: Some(omega),
                    iterations,
                });
            }
        }
        tension_history.push(sigma);

        // extend the domain and reseed from the converged profile
        let extended = length * options.length_growth_factor;
        let z_extended = axis.grid(extended);
        density = resample(&z, &density, &z_extended);
        density.column_mut(0).assign(&eq.rho_alpha);
        density.column_mut(options.node_count - 1).assign(&eq.rho_beta);
        z = z_extended;
        length = extended;
    }
    Err(SgtError::DomainExtension {
        extensions: options.max_extensions,
        tension_history,
    })
}

pub(crate) fn check_components<O: ThermodynamicOracle>(
    eq: &BulkEquilibrium,
    oracle: &O,
    influence: &InfluenceMatrix,
    init: &ProfileInitialization,
) -> SgtResult<()> {
    let n = eq.components();
    if oracle.components() != n || influence.components() != n {
        return Err(SgtError::Configuration(format!(
            "Equilibrium ({}), oracle ({}) and influence matrix ({}) disagree on the number of components.",
            n,
            oracle.components(),
            influence.components()
        )));
    }
    if let ProfileInitialization::Seeded(seed) = init {
        if seed.density.nrows() != n {
            return Err(SgtError::Configuration(format!(
                "Seed profile carries {} components instead of {}.",
                seed.density.nrows(),
                n
            )));
        }
    }
    Ok(())
}

/// Damped Newton iteration on the collocation residual for a fixed domain
/// length. The profile is updated in place; returns the number of
/// iterations spent.
#[allow(clippy::too_many_arguments)]
fn newton_solve<O: ThermodynamicOracle>(
    axis: &CollocationAxis,
    length: f64,
    eq: &BulkEquilibrium,
    oracle: &O,
    c: &Array2<f64>,
    mu0: &Array1<f64>,
    density: &mut Array2<f64>,
    options: &SgtOptions,
) -> SgtResult<usize> {
    let n = density.nrows();
    let m = axis.len();
    let interior = m - 2;
    let scale = 4.0 / (length * length);
    let d2 = axis.d2();

    density.column_mut(0).assign(&eq.rho_alpha);
    density.column_mut(m - 1).assign(&eq.rho_beta);

    let residual = |density: &Array2<f64>| -> Array1<f64> {
        let d2rho = density.dot(&d2.t()) * scale;
        let mut res = Array1::zeros(n * interior);
        for k in 1..m - 1 {
            let rho = density.column(k).to_owned();
            let mu = oracle.chemical_potential(&rho, eq.temperature);
            for i in 0..n {
                let gradient_term: f64 = (0..n).map(|j| c[(i, j)] * d2rho[(j, k)]).sum();
                res[i * interior + k - 1] = gradient_term - (mu[i] - mu0[i]);
            }
        }
        res
    };

    let mut res = residual(&*density);
    let mut last_residual = f64::NAN;
    for iteration in 1..=options.max_iterations {
        if !res.iter().all(|r| r.is_finite()) {
            return Err(SgtError::PhysicalConsistency(
                "The chemical potential is not finite along the profile.".into(),
            ));
        }
        last_residual = inf_norm(&res);
        log_iter!(
            options.verbosity,
            "collocation | {:4} | {:.6e}",
            iteration,
            last_residual
        );
        if last_residual < options.tolerance {
            return Ok(iteration);
        }

        // assemble the Jacobian of the collocation residual
        let mut jacobian = Array2::zeros((n * interior, n * interior));
        for k in 1..m - 1 {
            let rho = density.column(k).to_owned();
            let dmu = chemical_potential_derivative(oracle, &rho, eq.temperature);
            for i in 0..n {
                let row = i * interior + k - 1;
                for j in 0..n {
                    for l in 1..m - 1 {
                        jacobian[(row, j * interior + l - 1)] += c[(i, j)] * d2[(k, l)] * scale;
                    }
                    jacobian[(row, j * interior + k - 1)] -= dmu[(i, j)];
                }
            }
        }
        let step = LU::new(jacobian)?.solve(&res.mapv(|r| -r));

        // backtrack while the residual norm grows
        let res_norm = norm(&res);
        let mut damping = 1.0;
        let mut trial = density.clone();
        for halving in 0..=MAX_HALVINGS {
            for i in 0..n {
                for k in 1..m - 1 {
                    trial[(i, k)] = density[(i, k)] + damping * step[i * interior + k - 1];
                }
            }
            let trial_res = residual(&trial);
            let trial_norm = norm(&trial_res);
            if trial_norm.is_finite() && trial_norm < res_norm || halving == MAX_HALVINGS {
                res = trial_res;
                break;
            }
            damping *= 0.5;
        }
        density.assign(&trial);
    }
    Err(SgtError::NotConverged {
        solver: "collocation",
        iterations: options.max_iterations,
        residual: last_residual,
    })
}
