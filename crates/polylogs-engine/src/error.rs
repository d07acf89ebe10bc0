//! Error types for polylogarithm evaluation.

use polylogs_constants::TableError;
use thiserror::Error;

/// Errors raised while building an engine or evaluating a polylogarithm.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PolylogError {
    /// The engine could not be constructed with the requested settings.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A weight or argument is outside what the engine supports.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The argument lies on a singularity.
    #[error("domain error: {0}")]
    Domain(String),

    /// A series did not reach the target accuracy within its term budget.
    #[error("{series} series did not converge within {iterations} terms")]
    ConvergenceFailure {
        /// Name of the series that was being summed.
        series: &'static str,
        /// Number of terms summed (or estimated) before giving up.
        iterations: usize,
    },
}

impl From<TableError> for PolylogError {
    fn from(err: TableError) -> Self {
        PolylogError::Configuration(err.to_string())
    }
}

impl PolylogError {
    /// Returns true for errors that depend only on the engine settings.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, PolylogError::Configuration(_))
    }

    /// Returns true if a series ran out of terms.
    #[must_use]
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, PolylogError::ConvergenceFailure { .. })
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, PolylogError>;
