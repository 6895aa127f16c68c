//! Flight solver trait and library handle.

use crate::error::{SolverError, SolverResult};
use std::path::{Path, PathBuf};

/// Trait for external flight-dynamics solvers.
///
/// The solver is a black box: flightlink never models its equations of motion.
/// It is driven through a string-keyed property tree plus a handful of
/// lifecycle calls. Instances are owned by exactly one adapter and are never
/// shared, so the trait carries no `Send`/`Sync` bound.
pub trait FlightSolver {
    /// Solver name (for debugging/logging).
    fn name(&self) -> &str;

    /// Point the solver at the root of its data installation.
    fn set_root_dir(&mut self, root: &Path);

    /// Load an aircraft model by id. Returns `false` if the model is unavailable.
    fn load_model(&mut self, model_id: &str) -> bool;

    /// Write a property value.
    fn set_property(&mut self, path: &str, value: f64) -> SolverResult<()>;

    /// Read a property value.
    fn get_property(&self, path: &str) -> SolverResult<f64>;

    /// Set the integration time step [s] used by subsequent `step` calls.
    fn set_dt(&mut self, dt: f64);

    /// Apply the `ic/...` properties as the current state.
    ///
    /// Returns `Ok(false)` when the solver rejects the initial conditions.
    fn run_ic(&mut self) -> SolverResult<bool>;

    /// Advance the simulation by one time step.
    fn step(&mut self) -> SolverResult<()>;

    /// Return to the state captured by the last `run_ic`.
    fn reset_to_initial_conditions(&mut self) -> SolverResult<()>;
}

/// Handle to an installed solver library.
///
/// Library presence is a runtime property: `create_solver` returns
/// `SolverError::Unavailable` when the library cannot be used.
pub trait SolverLibrary {
    /// Library name (for debugging/logging).
    fn name(&self) -> &str;

    /// Directory the library is installed in; the first data-root candidate.
    fn module_dir(&self) -> PathBuf;

    /// Create a fresh solver instance.
    fn create_solver(&self) -> SolverResult<Box<dyn FlightSolver>>;
}

/// A library that is known to be absent.
#[derive(Debug, Clone)]
pub struct UnavailableLibrary {
    name: String,
}

impl UnavailableLibrary {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SolverLibrary for UnavailableLibrary {
    fn name(&self) -> &str {
        &self.name
    }

    fn module_dir(&self) -> PathBuf {
        PathBuf::new()
    }

    fn create_solver(&self) -> SolverResult<Box<dyn FlightSolver>> {
        Err(SolverError::Unavailable {
            library: self.name.clone(),
        })
    }
}
