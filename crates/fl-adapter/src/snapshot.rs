//! Per-frame state handed back to the host.

use fl_core::Vec3;
use serde::Serialize;

/// Body-axis velocity [m/s]: u forward, v right, w down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BodyVelocity {
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

/// Inertial velocity [m/s] in the solver's axis order, with down flipped to up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct InertialVelocity {
    pub north: f64,
    pub up: f64,
    pub east: f64,
}

impl InertialVelocity {
    pub fn magnitude(&self) -> f64 {
        (self.north * self.north + self.up * self.up + self.east * self.east).sqrt()
    }
}

/// Body angular rates [rad/s].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct AngularRate {
    pub p: f64,
    pub q: f64,
    pub r: f64,
}

/// Body-axis accelerations [m/s²].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Acceleration {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Aircraft state after one successful solver step.
///
/// Attitude is already in host convention (roll and pitch negated).
/// `altitude_meters` is the solver's own altitude: the host must take it
/// verbatim rather than integrating `inertial_velocity.up`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub altitude_meters: f64,
    pub roll_deg: f64,
    pub pitch_deg: f64,
    pub yaw_deg: f64,
    pub body_velocity: BodyVelocity,
    pub inertial_velocity: InertialVelocity,
    pub angular_rate: AngularRate,
    pub acceleration: Acceleration,
    pub alpha_deg: f64,
    pub beta_deg: f64,
    pub mach: f64,
}

impl StateSnapshot {
    /// Inertial velocity in host axes (east, up, north).
    pub fn host_velocity(&self) -> Vec3 {
        crate::frame::FrameConverter::to_host_velocity(&self.inertial_velocity)
    }

    /// Ground-frame speed [m/s].
    pub fn speed(&self) -> f64 {
        self.inertial_velocity.magnitude()
    }
}
