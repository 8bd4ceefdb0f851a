//! Pure component interfacial tension by direct quadrature.
//!
//! For a single component the Euler-Lagrange system reduces to a first
//! integral, `sigma = sqrt(2 c) Int sqrt(a0(rho) - rho mu0 + p0) drho`
//! between the bulk densities, so no boundary value problem has to be
//! solved. The density profile follows from the same integrand by
//! cumulative quadrature of `dz/drho = sqrt(c / (2 dOmega))`.
use crate::errors::{SgtError, SgtResult};
use crate::geometry::gauss_legendre;
use crate::oracle::ThermodynamicOracle;
use crate::profile::TensionResult;
use crate::solver::{SgtOptions, Verbosity};
use ndarray::{arr1, Array1};

const INITIAL_NODES: usize = 32;
const MAX_NODES: usize = 1024;

/// Interfacial tension of a pure fluid at the given saturated state.
pub fn solve_pure<O: ThermodynamicOracle>(
    rho_l: f64,
    rho_v: f64,
    temperature: f64,
    pressure: f64,
    cii: f64,
    oracle: &O,
    options: &SgtOptions,
) -> SgtResult<f64> {
    let (tension, ..) = quadrature(rho_l, rho_v, temperature, pressure, cii, oracle, options)?;
    Ok(tension)
}

/// Interfacial tension of a pure fluid together with the reconstructed
/// density and grand potential profiles.
pub fn solve_pure_profile<O: ThermodynamicOracle>(
    rho_l: f64,
    rho_v: f64,
    temperature: f64,
    pressure: f64,
    cii: f64,
    oracle: &O,
    options: &SgtOptions,
) -> SgtResult<TensionResult> {
    let (tension, density, omega, refinements) =
        quadrature(rho_l, rho_v, temperature, pressure, cii, oracle, options)?;

    // z axis by cumulative trapezoidal quadrature of dz/drho
    let m = density.len();
    let mut z = Array1::zeros(m);
    let dzdrho = omega.mapv(|w| (0.5 * cii / w).sqrt());
    for k in 1..m {
        z[k] = z[k - 1] + 0.5 * (dzdrho[k] + dzdrho[k - 1]) * (density[k] - density[k - 1]);
    }

    Ok(TensionResult {
        tension,
        z,
        density: density.insert_axis(ndarray::Axis(0)),
        grand_potential_density: Some(omega),
        iterations: refinements,
    })
}

type Quadrature = (f64, Array1<f64>, Array1<f64>, usize);

/// Adaptive Gauss-Legendre quadrature of the tension integrand; the node
/// count is doubled until the tension stops changing.
fn quadrature<O: ThermodynamicOracle>(
    rho_l: f64,
    rho_v: f64,
    temperature: f64,
    pressure: f64,
    cii: f64,
    oracle: &O,
    options: &SgtOptions,
) -> SgtResult<Quadrature> {
    options.validate()?;
    if oracle.components() != 1 {
        return Err(SgtError::Configuration(format!(
            "The pure component path requires a single component oracle, got {}.",
            oracle.components()
        )));
    }
    if !(cii.is_finite() && cii > 0.0) {
        return Err(SgtError::Configuration(format!(
            "Influence parameter must be positive, got {cii}."
        )));
    }
    if !(rho_v > 0.0 && rho_l > rho_v) {
        return Err(SgtError::PhysicalConsistency(format!(
            "Bulk densities must satisfy 0 < rho_v < rho_l, got rho_v = {rho_v}, rho_l = {rho_l}."
        )));
    }

    let mu_l = oracle.chemical_potential(&arr1(&[rho_l]), temperature)[0];
    let mu_v = oracle.chemical_potential(&arr1(&[rho_v]), temperature)[0];
    let mu0 = 0.5 * (mu_l + mu_v);

    let mut nodes = INITIAL_NODES;
    let mut previous: Option<f64> = None;
    let mut refinements = 0;
    loop {
        let (x, w) = gauss_legendre(nodes);
        let half_width = 0.5 * (rho_l - rho_v);
        let density = x.mapv(|x| rho_v + half_width * (x + 1.0));
        let mut omega = Array1::zeros(nodes);
        for (k, &rho) in density.iter().enumerate() {
            let radicand =
                oracle.helmholtz_energy_density(&arr1(&[rho]), temperature) - rho * mu0 + pressure;
            if !(radicand.is_finite() && radicand >= 0.0) {
                return Err(SgtError::PhysicalConsistency(format!(
                    "Negative gradient energy radicand {radicand:.3e} at density {rho}; the supplied state is not an equilibrium."
                )));
            }
            omega[k] = radicand;
        }
        let tension: f64 = (2.0 * cii).sqrt()
            * omega
                .iter()
                .zip(w.iter())
                .map(|(omega, w)| w * half_width * omega.sqrt())
                .sum::<f64>();

        log_iter!(
            options.verbosity,
            "pure quadrature | {:4} nodes | {:.8e}",
            nodes,
            tension
        );
        if let Some(previous) = previous {
            if (tension - previous).abs() <= options.tolerance * tension.abs().max(f64::EPSILON) {
                log_result!(
                    options.verbosity,
                    "pure tension {:.8e} with {} nodes",
                    tension,
                    nodes
                );
                return Ok((tension, density, omega, refinements));
            }
        }
        if nodes >= MAX_NODES {
            return Err(SgtError::NotConverged {
                solver: "pure quadrature",
                iterations: refinements,
                residual: previous.map_or(f64::NAN, |p| (tension - p).abs()),
            });
        }
        previous = Some(tension);
        nodes *= 2;
        refinements += 1;
    }
}
