use num_dual::linalg::LinAlgError;
use thiserror::Error;

/// Error type for improperly specified inputs and convergence problems.
#[derive(Error, Debug)]
pub enum SgtError {
    #[error("{0}")]
    Configuration(String),
    #[error("The influence matrix carries no binary corrections. Use the pure component path or a reference component substitution instead of the full boundary value problem.")]
    SingularMatrix,
    #[error("`{solver}` did not converge within {iterations} iterations (last residual {residual:.3e}).")]
    NotConverged {
        solver: &'static str,
        iterations: usize,
        residual: f64,
    },
    #[error("The interfacial domain was extended {extensions} times without stabilizing the tension.")]
    DomainExtension {
        extensions: usize,
        tension_history: Vec<f64>,
    },
    #[error("Thermodynamically inconsistent input: {0}")]
    PhysicalConsistency(String),
    #[error(transparent)]
    LinAlgError(#[from] LinAlgError),
}

/// Convenience type for `Result<T, SgtError>`.
pub type SgtResult<T> = Result<T, SgtError>;
