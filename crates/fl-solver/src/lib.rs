//! fl-solver: the boundary between flightlink and an external flight-dynamics solver.
//!
//! Provides:
//! - `FlightSolver` trait: the opaque solver surface (load, property get/set, step, IC)
//! - `SolverLibrary` trait: library presence and solver construction
//! - `Property`: typed keys for every property path the adapter touches
//! - Fallible typed accessors with a default-substitution combinator
//! - `KinematicSolver`: a point-mass reference backend for tests and the CLI
//!
//! # Architecture
//!
//! The external solver exposes a free-form, string-keyed property tree that
//! differs between installations and aircraft models. Everything above this
//! crate talks in `Property` values instead of strings, and every access is a
//! `SolverResult` so a missing key is visible at the call site. Recoverable
//! failures (one property absent) are separated from fatal ones (step failure,
//! backend crash) by `SolverError::is_recoverable`.

pub mod accessor;
pub mod error;
pub mod integrator;
pub mod kinematic;
pub mod model;
pub mod property;
pub mod solver;

// Re-exports for public API
pub use accessor::{PropertyResultExt, read, write};
pub use error::{SolverError, SolverResult};
pub use integrator::{ForwardEuler, Integrator, IntegratorType, RK4};
pub use kinematic::{KinematicLibrary, KinematicParams, KinematicSolver, KinematicState};
pub use model::TransientModel;
pub use property::Property;
pub use solver::{FlightSolver, SolverLibrary, UnavailableLibrary};
