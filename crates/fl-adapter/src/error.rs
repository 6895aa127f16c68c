//! Adapter error taxonomy.

use fl_core::FlError;
use fl_solver::SolverError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while initializing or driving the solver.
///
/// Only initialization failures and step failures change adapter state;
/// property-level variants are absorbed at the point of use.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Solver library unavailable: {library}")]
    SolverUnavailable { library: String },

    #[error("No solver data root found (tried {})", display_paths(.attempted))]
    DataRootNotFound { attempted: Vec<PathBuf> },

    #[error("Aircraft model not found: {model_id}")]
    ModelNotFound { model_id: String },

    #[error(
        "No aircraft model available (requested {requested}, tried [{}], root {})",
        display_models(.attempted),
        display_root(.root)
    )]
    NoAircraftModelAvailable {
        requested: String,
        attempted: Vec<String>,
        root: PathBuf,
    },

    #[error("Solver rejected initial conditions")]
    InitialConditionsRejected,

    #[error("Failed to write property {path}: {reason}")]
    PropertyWriteFailed { path: String, reason: String },

    #[error("Failed to read property {path}: {reason}")]
    PropertyReadFailed { path: String, reason: String },

    #[error("Non-finite value for {field}: {value}")]
    NonFiniteState { field: &'static str, value: f64 },

    #[error("Solver step failed: {message}")]
    StepFailure { message: String },

    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: String },

    #[error("Failed to read catalog file: {path}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_models(models: &[String]) -> String {
    models.join(", ")
}

fn display_root(root: &std::path::Path) -> String {
    root.display().to_string()
}

impl From<SolverError> for AdapterError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::Unavailable { library } => AdapterError::SolverUnavailable { library },
            SolverError::PropertyRead { path, reason } => {
                AdapterError::PropertyReadFailed { path, reason }
            }
            SolverError::PropertyWrite { path, reason } => {
                AdapterError::PropertyWriteFailed { path, reason }
            }
            SolverError::StepFailed { message } => AdapterError::StepFailure { message },
            other => AdapterError::Backend {
                message: other.to_string(),
            },
        }
    }
}

impl From<FlError> for AdapterError {
    fn from(e: FlError) -> Self {
        match e {
            FlError::NonFinite { what, value } => {
                AdapterError::NonFiniteState { field: what, value }
            }
            other => AdapterError::Backend {
                message: other.to_string(),
            },
        }
    }
}

impl From<serde_yaml::Error> for AdapterError {
    fn from(e: serde_yaml::Error) -> Self {
        AdapterError::InvalidConfig {
            what: format!("catalog YAML: {}", e),
        }
    }
}
