//! Host control levels to solver control channels.
//!
//! The host exposes generic levels: a thrust level and three angular command
//! axes packed in a vector (x = pitch, y = yaw, z = roll). Each axis maps to
//! exactly one solver channel with a fixed sign:
//!
//! | Host level          | Solver channel          | Range   |
//! |---------------------|-------------------------|---------|
//! | `thrust_level`      | `fcs/throttle-cmd-norm` | [0, 1]  |
//! | `angular_levels.x`  | `fcs/elevator-cmd-norm` | [-1, 1] |
//! | `angular_levels.z`  | `fcs/aileron-cmd-norm`  | [-1, 1] |
//! | `angular_levels.y`  | `fcs/rudder-cmd-norm`   | [-1, 1] |
//! | `flaps_level`       | `fcs/flap-cmd-norm`     | [0, 1]  |
//! | `brake_level`       | `fcs/brake-cmd-norm`    | [0, 1]  |
//!
//! The pitch axis is passed through with no inversion. An inverted sign here
//! produces inverted control response without any error, so the polarity is
//! covered by property tests.

use fl_core::{Vec3, clamp_finite};
use fl_solver::Property;
use serde::{Deserialize, Serialize};

/// Control levels as the host aircraft holds them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostControlLevels {
    /// Throttle [0, 1]
    pub thrust_level: f64,
    /// x = pitch, y = yaw, z = roll, each [-1, 1]
    pub angular_levels: Vec3,
    /// Flaps [0, 1]; aircraft without flaps leave this unset
    pub flaps_level: Option<f64>,
    /// Wheel brake [0, 1]; aircraft without brakes leave this unset
    pub brake_level: Option<f64>,
}

impl HostControlLevels {
    pub fn new(thrust: f64, pitch: f64, yaw: f64, roll: f64) -> Self {
        Self {
            thrust_level: thrust,
            angular_levels: Vec3::new(pitch, yaw, roll),
            flaps_level: None,
            brake_level: None,
        }
    }

    pub fn with_flaps(mut self, flaps: f64) -> Self {
        self.flaps_level = Some(flaps);
        self
    }

    pub fn with_brake(mut self, brake: f64) -> Self {
        self.brake_level = Some(brake);
        self
    }

    pub fn pitch(&self) -> f64 {
        self.angular_levels.x
    }

    pub fn yaw(&self) -> f64 {
        self.angular_levels.y
    }

    pub fn roll(&self) -> f64 {
        self.angular_levels.z
    }
}

impl Default for HostControlLevels {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Normalized solver commands for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ControlFrame {
    pub throttle: f64,
    pub elevator_cmd: f64,
    pub aileron_cmd: f64,
    pub rudder_cmd: f64,
    pub flaps: f64,
    pub brake: f64,
}

impl ControlFrame {
    /// Each command paired with the solver channel it is written to.
    pub fn channels(&self) -> [(Property, f64); 6] {
        [
            (Property::ThrottleCmd, self.throttle),
            (Property::ElevatorCmd, self.elevator_cmd),
            (Property::AileronCmd, self.aileron_cmd),
            (Property::RudderCmd, self.rudder_cmd),
            (Property::FlapCmd, self.flaps),
            (Property::BrakeCmd, self.brake),
        ]
    }
}

/// Stateless host-to-solver control mapping.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlMapper;

impl ControlMapper {
    /// Map and clamp. Out-of-range inputs are clamped, NaN maps to neutral.
    pub fn to_solver_controls(levels: &HostControlLevels) -> ControlFrame {
        let unit = |v: f64| clamp_finite(v, 0.0, 1.0);
        let axis = |v: f64| clamp_finite(v, -1.0, 1.0);
        ControlFrame {
            throttle: unit(levels.thrust_level),
            elevator_cmd: axis(levels.pitch()),
            aileron_cmd: axis(levels.roll()),
            rudder_cmd: axis(levels.yaw()),
            flaps: unit(levels.flaps_level.unwrap_or(0.0)),
            brake: unit(levels.brake_level.unwrap_or(0.0)),
        }
    }
}
