//! Solver axes and units to host render-space conventions.
//!
//! Solver: body axes forward/right/down, NED inertial velocity, feet and
//! radians. Host: Cartesian render space with x = east, y = up, z = north,
//! meters and degrees.
//!
//! Roll and pitch change sign between the two conventions; heading does not.
//! Vertical position is never integrated on the host side: the solver's own
//! altitude is taken verbatim every frame, while horizontal position is
//! integrated by the host from the returned velocity.

use crate::sanitizer::{RawState, StateField};
use crate::snapshot::{Acceleration, AngularRate, BodyVelocity, InertialVelocity, StateSnapshot};
use fl_core::Vec3;
use fl_core::constants::METERS_PER_DEGREE;
use fl_core::convert::{
    feet_to_meters, fps_to_mps, fps2_to_mps2, meters_to_feet, mps_to_fps, radians_to_degrees,
};

/// Euler angles in the solver's convention [deg].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolverAttitude {
    pub roll_deg: f64,
    pub pitch_deg: f64,
    pub yaw_deg: f64,
}

impl SolverAttitude {
    pub fn from_radians(roll: f64, pitch: f64, heading: f64) -> Self {
        Self {
            roll_deg: radians_to_degrees(roll),
            pitch_deg: radians_to_degrees(pitch),
            yaw_deg: radians_to_degrees(heading),
        }
    }
}

/// Euler angles in the host's render convention [deg].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HostAttitude {
    pub roll_deg: f64,
    pub pitch_deg: f64,
    pub yaw_deg: f64,
}

/// Solver-side position: latitude/longitude offsets and altitude.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeodeticPosition {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_ft: f64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FrameConverter;

impl FrameConverter {
    pub fn to_host_attitude(att: &SolverAttitude) -> HostAttitude {
        HostAttitude {
            roll_deg: -att.roll_deg,
            pitch_deg: -att.pitch_deg,
            yaw_deg: att.yaw_deg,
        }
    }

    /// Inverse of [`FrameConverter::to_host_attitude`].
    pub fn to_solver_attitude(att: &HostAttitude) -> SolverAttitude {
        SolverAttitude {
            roll_deg: -att.roll_deg,
            pitch_deg: -att.pitch_deg,
            yaw_deg: att.yaw_deg,
        }
    }

    /// (north, up, east) -> host (east, up, north). Pure permutation.
    pub fn to_host_velocity(v: &InertialVelocity) -> Vec3 {
        Vec3::new(v.east, v.up, v.north)
    }

    /// NED velocity [ft/s] to (north, up, east) [m/s].
    pub fn inertial_from_ned_fps(north: f64, east: f64, down: f64) -> InertialVelocity {
        InertialVelocity {
            north: fps_to_mps(north),
            up: -fps_to_mps(down),
            east: fps_to_mps(east),
        }
    }

    pub fn body_velocity_from_fps(u: f64, v: f64, w: f64) -> BodyVelocity {
        BodyVelocity {
            u: fps_to_mps(u),
            v: fps_to_mps(v),
            w: fps_to_mps(w),
        }
    }

    /// Host position after a frame: host x/z kept, altitude from the solver.
    pub fn host_position(current: &Vec3, altitude_m: f64) -> Vec3 {
        Vec3::new(current.x, altitude_m, current.z)
    }

    /// Host velocity [m/s] to solver body velocity (u, v, w) [ft/s].
    ///
    /// Assumes the aircraft is aligned with the host axes: forward = z,
    /// right = x, down = -y.
    pub fn host_velocity_to_body_fps(v: &Vec3) -> (f64, f64, f64) {
        (mps_to_fps(v.z), mps_to_fps(v.x), -mps_to_fps(v.y))
    }

    /// Host position [m] to local latitude/longitude offsets and altitude.
    pub fn host_position_to_geodetic(p: &Vec3) -> GeodeticPosition {
        GeodeticPosition {
            latitude_deg: p.z / METERS_PER_DEGREE,
            longitude_deg: p.x / METERS_PER_DEGREE,
            altitude_ft: meters_to_feet(p.y),
        }
    }

    /// Convert a sanitized raw state into a host snapshot.
    pub fn to_snapshot(raw: &RawState) -> StateSnapshot {
        let attitude = Self::to_host_attitude(&SolverAttitude::from_radians(
            raw.get(StateField::RollRad),
            raw.get(StateField::PitchRad),
            raw.get(StateField::HeadingRad),
        ));

        StateSnapshot {
            altitude_meters: feet_to_meters(raw.get(StateField::AltitudeFt)),
            roll_deg: attitude.roll_deg,
            pitch_deg: attitude.pitch_deg,
            yaw_deg: attitude.yaw_deg,
            body_velocity: Self::body_velocity_from_fps(
                raw.get(StateField::UFps),
                raw.get(StateField::VFps),
                raw.get(StateField::WFps),
            ),
            inertial_velocity: Self::inertial_from_ned_fps(
                raw.get(StateField::VNorthFps),
                raw.get(StateField::VEastFps),
                raw.get(StateField::VDownFps),
            ),
            angular_rate: AngularRate {
                p: raw.get(StateField::PRadSec),
                q: raw.get(StateField::QRadSec),
                r: raw.get(StateField::RRadSec),
            },
            acceleration: Acceleration {
                x: fps2_to_mps2(raw.get(StateField::UdotFtSec2)),
                y: fps2_to_mps2(raw.get(StateField::VdotFtSec2)),
                z: fps2_to_mps2(raw.get(StateField::WdotFtSec2)),
            },
            alpha_deg: raw.get(StateField::AlphaDeg),
            beta_deg: raw.get(StateField::BetaDeg),
            mach: raw.get(StateField::Mach),
        }
    }
}
