//! fl-core: stable foundation for flightlink.
//!
//! Contains:
//! - units (uom-backed feet/meters, degrees/radians, knots conversions)
//! - numeric (Real + tolerances + float helpers)
//! - vector alias shared by the adapter and the host
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FlError, FlResult};
pub use numeric::*;
pub use units::*;

/// Cartesian vector used for positions, velocities and rates.
pub type Vec3 = nalgebra::Vector3<Real>;
