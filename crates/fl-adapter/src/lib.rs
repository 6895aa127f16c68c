//! fl-adapter: drives an external flight-dynamics solver from a host simulation.
//!
//! Provides:
//! - `ModelResolver`: alias table, data-root probing, model fallback chain
//! - `ControlMapper`: host control levels to solver control channels
//! - `FrameConverter`: solver axes/units to host render-space conventions
//! - `StateSanitizer`: non-finite guard on every solver-read scalar
//! - `FdmAdapter`: per-aircraft lifecycle state machine
//!
//! # Data flow per frame
//!
//! host levels -> `ControlMapper` -> `FdmAdapter::update` -> solver step ->
//! `StateSanitizer` -> `FrameConverter` -> `StateSnapshot` -> host
//!
//! A `None` from `FdmAdapter::update` means the host must fall back to its
//! simplified physics model for this aircraft for the rest of the run.
//!
//! # Example
//!
//! ```
//! use fl_adapter::{AdapterConfig, FdmAdapter, HostControlLevels};
//! use fl_solver::KinematicLibrary;
//!
//! let library = KinematicLibrary::new("/opt/flight-solver");
//! let mut adapter = FdmAdapter::new(AdapterConfig::new("cessna", true), &library);
//! assert!(adapter.is_initialized());
//!
//! let controls = HostControlLevels::new(0.8, 0.0, 0.0, 0.0);
//! let snapshot = adapter.update(1.0 / 60.0, &controls).unwrap();
//! assert!(snapshot.altitude_meters > 3000.0);
//! ```

pub mod adapter;
pub mod config;
pub mod controls;
pub mod diagnostics;
pub mod error;
pub mod frame;
pub mod resolver;
pub mod sanitizer;
pub mod snapshot;

pub use adapter::{AdapterState, FdmAdapter, StateKind, Transition};
pub use config::{AdapterConfig, InitialConditions, ModelCatalog};
pub use controls::{ControlFrame, ControlMapper, HostControlLevels};
pub use diagnostics::Diagnostics;
pub use error::{AdapterError, AdapterResult};
pub use frame::{FrameConverter, GeodeticPosition, HostAttitude, SolverAttitude};
pub use resolver::{ModelResolver, ResolvedModel, list_available_aircraft};
pub use sanitizer::{RawState, SafeState, StateField, StateSanitizer};
pub use snapshot::{Acceleration, AngularRate, BodyVelocity, InertialVelocity, StateSnapshot};
