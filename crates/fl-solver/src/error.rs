//! Error types for solver boundary operations.

use thiserror::Error;

/// Errors raised by a flight solver or its library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The solver library is not installed or could not be loaded.
    #[error("Solver library unavailable: {library}")]
    Unavailable { library: String },

    /// A single property could not be read (missing on this model, etc.).
    #[error("Failed to read property {path}: {reason}")]
    PropertyRead { path: String, reason: String },

    /// A single property could not be written.
    #[error("Failed to write property {path}: {reason}")]
    PropertyWrite { path: String, reason: String },

    /// The solver failed while advancing one time step.
    #[error("Solver step failed: {message}")]
    StepFailed { message: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Any other backend failure.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    /// Read failure for a property the solver does not expose.
    pub fn missing_property(path: &str) -> Self {
        SolverError::PropertyRead {
            path: path.to_string(),
            reason: "property not found".to_string(),
        }
    }

    /// Write failure for a property the solver does not accept.
    pub fn rejected_property(path: &str) -> Self {
        SolverError::PropertyWrite {
            path: path.to_string(),
            reason: "property not supported".to_string(),
        }
    }

    /// Whether the failure is confined to a single property access.
    ///
    /// Recoverable errors are absorbed with a default at the point of use;
    /// everything else invalidates the current frame.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SolverError::PropertyRead { .. } | SolverError::PropertyWrite { .. }
        )
    }
}

impl From<fl_core::FlError> for SolverError {
    fn from(e: fl_core::FlError) -> Self {
        match e {
            fl_core::FlError::InvalidArg { what } => SolverError::InvalidArg { what },
            other => SolverError::Backend {
                message: other.to_string(),
            },
        }
    }
}
