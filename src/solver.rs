//! Configuration of the interfacial solvers.
use crate::errors::{SgtError, SgtResult};
use ndarray::Array1;

/// Level of detail in the iteration output.
#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Do not print output.
    #[default]
    None,
    /// Print information about the success or failure of the iteration.
    Result,
    /// Print a detailed output for every iteration.
    Iter,
}

/// Options for the interfacial solvers.
///
/// One structure covers the collocation, relaxation and pure component
/// paths; each solver reads the subset it needs. The per-solver
/// constructors provide sensible defaults, the setters allow chained
/// adjustments.
#[derive(Clone, Copy)]
pub struct SgtOptions {
    /// Residual tolerance of the Newton iteration, pseudo-time derivative
    /// tolerance of the relaxation, or relative quadrature tolerance of the
    /// pure component path.
    pub tolerance: f64,
    /// Cap on Newton iterations per domain length or on pseudo-time steps.
    pub max_iterations: usize,
    /// Number of spatial nodes.
    pub node_count: usize,
    /// Initial (collocation) or fixed (relaxation) domain length.
    pub length: f64,
    /// Multiplicative domain growth per extension.
    pub length_growth_factor: f64,
    /// Relative tension change below which the domain length counts as
    /// converged.
    pub tension_tolerance: f64,
    /// Cap on domain extensions.
    pub max_extensions: usize,
    /// Pseudo-time step of the relaxation solver.
    pub time_step: f64,
    /// Iteration output.
    pub verbosity: Verbosity,
}

impl SgtOptions {
    /// Defaults for the orthogonal collocation path.
    pub fn collocation() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 50,
            node_count: 25,
            length: 10.0,
            length_growth_factor: 2.0,
            tension_tolerance: 1e-3,
            max_extensions: 10,
            time_step: 0.1,
            verbosity: Verbosity::None,
        }
    }

    /// Defaults for the pseudo-time relaxation path.
    pub fn relaxation() -> Self {
        Self {
            max_iterations: 5000,
            node_count: 101,
            length: 20.0,
            ..Self::collocation()
        }
    }

    /// Defaults for the pure component quadrature.
    pub fn pure_fluid() -> Self {
        Self::collocation()
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    pub fn length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn length_growth_factor(mut self, length_growth_factor: f64) -> Self {
        self.length_growth_factor = length_growth_factor;
        self
    }

    pub fn tension_tolerance(mut self, tension_tolerance: f64) -> Self {
        self.tension_tolerance = tension_tolerance;
        self
    }

    pub fn max_extensions(mut self, max_extensions: usize) -> Self {
        self.max_extensions = max_extensions;
        self
    }

    pub fn time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub(crate) fn validate(&self) -> SgtResult<()> {
        if self.node_count < 5 {
            return Err(SgtError::Configuration(format!(
                "At least 5 spatial nodes are required, got {}.",
                self.node_count
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(SgtError::Configuration(format!(
                "Tolerance must be positive, got {}.",
                self.tolerance
            )));
        }
        if !(self.length > 0.0 && self.length.is_finite()) {
            return Err(SgtError::Configuration(format!(
                "Domain length must be positive, got {}.",
                self.length
            )));
        }
        if !(self.length_growth_factor > 1.0) {
            return Err(SgtError::Configuration(format!(
                "Length growth factor must exceed 1, got {}.",
                self.length_growth_factor
            )));
        }
        if !(self.tension_tolerance > 0.0) {
            return Err(SgtError::Configuration(format!(
                "Tension tolerance must be positive, got {}.",
                self.tension_tolerance
            )));
        }
        if !(self.time_step > 0.0 && self.time_step.is_finite()) {
            return Err(SgtError::Configuration(format!(
                "Pseudo-time step must be positive, got {}.",
                self.time_step
            )));
        }
        if self.max_iterations == 0 || self.max_extensions == 0 {
            return Err(SgtError::Configuration(
                "Iteration and extension caps must be nonzero.".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SgtOptions {
    fn default() -> Self {
        Self::collocation()
    }
}

pub(crate) fn inf_norm(values: &Array1<f64>) -> f64 {
    values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chains() {
        let options = SgtOptions::relaxation().node_count(201).time_step(0.2);
        assert_eq!(options.node_count, 201);
        assert_eq!(options.time_step, 0.2);
        assert_eq!(options.max_iterations, 5000);
    }

    #[test]
    fn invalid_options_are_rejected() {
        assert!(SgtOptions::collocation().node_count(2).validate().is_err());
        assert!(SgtOptions::collocation().tolerance(-1.0).validate().is_err());
        assert!(SgtOptions::collocation()
            .length_growth_factor(1.0)
            .validate()
            .is_err());
        assert!(SgtOptions::relaxation().validate().is_ok());
    }
}
