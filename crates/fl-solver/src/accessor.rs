//! Typed, fallible property accessors.
//!
//! Every read and write returns a `SolverResult`. Call sites that can live
//! without a value compose the result with `or_default`, which substitutes a
//! default for recoverable (single-property) failures and still propagates
//! fatal ones.

use crate::error::{SolverError, SolverResult};
use crate::property::Property;
use crate::solver::FlightSolver;
use tracing::debug;

/// Read a typed property.
pub fn read(solver: &dyn FlightSolver, property: Property) -> SolverResult<f64> {
    solver.get_property(property.path())
}

/// Write a typed property.
pub fn write(solver: &mut dyn FlightSolver, property: Property, value: f64) -> SolverResult<()> {
    solver.set_property(property.path(), value)
}

/// Default-substitution combinator for property access results.
pub trait PropertyResultExt<T> {
    /// Replace a recoverable error with `default`, calling `on_absorb` with it.
    fn or_default_with<F>(self, default: T, on_absorb: F) -> SolverResult<T>
    where
        F: FnOnce(&SolverError);

    /// Replace a recoverable error with `default`.
    fn or_default(self, default: T) -> SolverResult<T>
    where
        Self: Sized,
    {
        self.or_default_with(default, |_| {})
    }
}

impl<T> PropertyResultExt<T> for SolverResult<T> {
    fn or_default_with<F>(self, default: T, on_absorb: F) -> SolverResult<T>
    where
        F: FnOnce(&SolverError),
    {
        match self {
            Ok(v) => Ok(v),
            Err(e) if e.is_recoverable() => {
                debug!(error = %e, "property access absorbed, using default");
                on_absorb(&e);
                Ok(default)
            }
            Err(e) => Err(e),
        }
    }
}
