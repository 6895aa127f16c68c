//! Point-mass reference solver.
//!
//! `KinematicSolver` implements the `FlightSolver` boundary with a small
//! kinematic model so the adapter can be exercised end to end without an
//! external installation:
//! - attitude rates proportional to normalized aileron/elevator/rudder commands
//! - airspeed driven by throttle against quadratic drag and the gravity component
//! - NED velocity from heading and pitch, altitude from the vertical component
//!
//! It answers to the same property paths as the external solver, but it does
//! not implement flaps or brakes: writes to those channels fail, which is what
//! a model without those systems does.

use crate::error::{SolverError, SolverResult};
use crate::integrator::IntegratorType;
use crate::model::TransientModel;
use crate::property::Property;
use crate::solver::{FlightSolver, SolverLibrary};
use fl_core::constants::{METERS_PER_DEGREE, SEA_LEVEL_SPEED_OF_SOUND_FPS};
use fl_core::convert::{degrees_to_radians, feet_to_meters};
use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::{Path, PathBuf};

/// Gravity [ft/s²].
const G_FPS2: f64 = 32.174;

/// Model ids the reference library knows how to "load".
pub const DEFAULT_KINEMATIC_MODELS: [&str; 4] = ["c172p", "f16", "737", "x15"];

/// Tuning of the point-mass model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicParams {
    /// Roll rate at full aileron [rad/s]
    pub max_roll_rate: f64,
    /// Pitch rate at full elevator [rad/s]
    pub max_pitch_rate: f64,
    /// Yaw rate at full rudder [rad/s]
    pub max_yaw_rate: f64,
    /// Forward acceleration at full throttle [ft/s²]
    pub thrust_accel_fps2: f64,
    /// Quadratic drag coefficient [1/ft]
    pub drag_coeff: f64,
    /// Integrator for each step
    pub integrator: IntegratorType,
}

impl Default for KinematicParams {
    fn default() -> Self {
        // Trimmed for ~300 ft/s level flight at 0.8 throttle.
        Self {
            max_roll_rate: 1.5,
            max_pitch_rate: 0.5,
            max_yaw_rate: 0.3,
            thrust_accel_fps2: 20.0,
            drag_coeff: 16.0 / (300.0 * 300.0),
            integrator: IntegratorType::RK4,
        }
    }
}

/// Integrated state of the point-mass model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KinematicState {
    /// Altitude above sea level [ft]
    pub h_ft: f64,
    /// Geodetic latitude [deg]
    pub lat_deg: f64,
    /// Longitude [deg]
    pub lon_deg: f64,
    /// Forward airspeed [ft/s]
    pub u_fps: f64,
    /// Roll [rad]
    pub phi: f64,
    /// Pitch [rad]
    pub theta: f64,
    /// Heading [rad]
    pub psi: f64,
}

/// Control commands held constant across one step.
#[derive(Clone, Copy, Debug, Default)]
struct Commands {
    throttle: f64,
    elevator: f64,
    aileron: f64,
    rudder: f64,
    engine_running: bool,
}

/// Right-hand side of the point-mass equations for one step.
struct PointMass {
    params: KinematicParams,
    commands: Commands,
}

impl PointMass {
    fn forward_accel(&self, x: &KinematicState) -> f64 {
        let thrust = if self.commands.engine_running {
            self.params.thrust_accel_fps2 * self.commands.throttle
        } else {
            0.0
        };
        thrust - self.params.drag_coeff * x.u_fps * x.u_fps.abs() - G_FPS2 * x.theta.sin()
    }

    /// (north, east, down) velocity [ft/s].
    fn ned_velocity(x: &KinematicState) -> (f64, f64, f64) {
        let horizontal = x.u_fps * x.theta.cos();
        (
            horizontal * x.psi.cos(),
            horizontal * x.psi.sin(),
            -x.u_fps * x.theta.sin(),
        )
    }
}

impl TransientModel for PointMass {
    type State = KinematicState;

    fn rhs(&mut self, _t: f64, x: &Self::State) -> SolverResult<Self::State> {
        let (v_north, v_east, v_down) = Self::ned_velocity(x);
        let ft_to_deg = feet_to_meters(1.0) / METERS_PER_DEGREE;
        Ok(KinematicState {
            h_ft: -v_down,
            lat_deg: v_north * ft_to_deg,
            lon_deg: v_east * ft_to_deg,
            u_fps: self.forward_accel(x),
            phi: self.params.max_roll_rate * self.commands.aileron,
            theta: self.params.max_pitch_rate * self.commands.elevator,
            psi: self.params.max_yaw_rate * self.commands.rudder,
        })
    }

    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State {
        KinematicState {
            h_ft: a.h_ft + b.h_ft,
            lat_deg: a.lat_deg + b.lat_deg,
            lon_deg: a.lon_deg + b.lon_deg,
            u_fps: a.u_fps + b.u_fps,
            phi: a.phi + b.phi,
            theta: a.theta + b.theta,
            psi: a.psi + b.psi,
        }
    }

    fn scale(&self, a: &Self::State, scale: f64) -> Self::State {
        KinematicState {
            h_ft: a.h_ft * scale,
            lat_deg: a.lat_deg * scale,
            lon_deg: a.lon_deg * scale,
            u_fps: a.u_fps * scale,
            phi: a.phi * scale,
            theta: a.theta * scale,
            psi: a.psi * scale,
        }
    }
}

/// Property-tree solver over the point-mass model.
#[derive(Debug, Clone)]
pub struct KinematicSolver {
    models: Vec<String>,
    params: KinematicParams,
    root_dir: Option<PathBuf>,
    loaded_model: Option<String>,
    properties: BTreeMap<Property, f64>,
    state: KinematicState,
    initial: Option<KinematicState>,
    dt: f64,
    time: f64,
}

impl KinematicSolver {
    /// Create a solver that can load the given model ids.
    pub fn new<I, S>(models: I, params: KinematicParams) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            models: models.into_iter().map(Into::into).collect(),
            params,
            root_dir: None,
            loaded_model: None,
            properties: BTreeMap::new(),
            state: KinematicState::default(),
            initial: None,
            dt: 1.0 / 60.0,
            time: 0.0,
        }
    }

    /// Currently loaded model id.
    pub fn loaded_model(&self) -> Option<&str> {
        self.loaded_model.as_deref()
    }

    /// Data root configured via `set_root_dir`.
    pub fn root_dir(&self) -> Option<&Path> {
        self.root_dir.as_deref()
    }

    /// Integrated state.
    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    /// Simulated time since the last `run_ic` [s].
    pub fn time(&self) -> f64 {
        self.time
    }

    fn writable(property: Property) -> bool {
        !matches!(property, Property::FlapCmd | Property::BrakeCmd)
    }

    fn value(&self, property: Property) -> f64 {
        self.properties.get(&property).copied().unwrap_or(0.0)
    }

    fn commands(&self) -> Commands {
        Commands {
            throttle: self.value(Property::ThrottleCmd).clamp(0.0, 1.0),
            elevator: self.value(Property::ElevatorCmd).clamp(-1.0, 1.0),
            aileron: self.value(Property::AileronCmd).clamp(-1.0, 1.0),
            rudder: self.value(Property::RudderCmd).clamp(-1.0, 1.0),
            engine_running: self.value(Property::EngineSetRunning) >= 0.5,
        }
    }

    fn state_from_ic(&self) -> KinematicState {
        let u = self.value(Property::IcUFps);
        let v = self.value(Property::IcVFps);
        let w = self.value(Property::IcWFps);
        KinematicState {
            h_ft: self.value(Property::IcAltitudeFt),
            lat_deg: self.value(Property::IcLatitudeDeg),
            lon_deg: self.value(Property::IcLongitudeDeg),
            u_fps: (u * u + v * v + w * w).sqrt().copysign(u),
            phi: degrees_to_radians(self.value(Property::IcRollDeg)),
            theta: degrees_to_radians(self.value(Property::IcPitchDeg)),
            psi: degrees_to_radians(self.value(Property::IcHeadingDeg)).rem_euclid(TAU),
        }
    }

    /// Publish the integrated state and its derived outputs to the property tree.
    fn publish(&mut self, rates: Option<&KinematicState>) {
        let x = self.state;
        let (v_north, v_east, v_down) = PointMass::ned_velocity(&x);
        let (p, q, r, udot) = match rates {
            Some(dx) => (dx.phi, dx.theta, dx.psi, dx.u_fps),
            None => (0.0, 0.0, 0.0, 0.0),
        };

        let outputs = [
            (Property::AltitudeFt, x.h_ft),
            (Property::LatitudeDeg, x.lat_deg),
            (Property::LongitudeDeg, x.lon_deg),
            (Property::RollRad, x.phi),
            (Property::PitchRad, x.theta),
            (Property::HeadingRad, x.psi),
            (Property::UFps, x.u_fps),
            (Property::VFps, 0.0),
            (Property::WFps, 0.0),
            (Property::VNorthFps, v_north),
            (Property::VEastFps, v_east),
            (Property::VDownFps, v_down),
            (Property::PRadSec, p),
            (Property::QRadSec, q),
            (Property::RRadSec, r),
            (Property::UdotFtSec2, udot),
            (Property::VdotFtSec2, 0.0),
            (Property::WdotFtSec2, 0.0),
            (Property::AlphaDeg, 0.0),
            (Property::BetaDeg, 0.0),
            (Property::Mach, x.u_fps.abs() / SEA_LEVEL_SPEED_OF_SOUND_FPS),
            (Property::NumEngines, 1.0),
        ];
        self.properties.extend(outputs);
    }

    fn require_model(&self) -> SolverResult<()> {
        if self.loaded_model.is_none() {
            return Err(SolverError::Backend {
                message: "no aircraft model loaded".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for KinematicSolver {
    fn default() -> Self {
        Self::new(DEFAULT_KINEMATIC_MODELS, KinematicParams::default())
    }
}

impl FlightSolver for KinematicSolver {
    fn name(&self) -> &str {
        "kinematic"
    }

    fn set_root_dir(&mut self, root: &Path) {
        self.root_dir = Some(root.to_path_buf());
    }

    fn load_model(&mut self, model_id: &str) -> bool {
        if self.models.iter().any(|m| m == model_id) {
            self.loaded_model = Some(model_id.to_string());
            self.properties.clear();
            self.initial = None;
            true
        } else {
            false
        }
    }

    fn set_property(&mut self, path: &str, value: f64) -> SolverResult<()> {
        self.require_model()?;
        match Property::from_path(path) {
            Some(property) if Self::writable(property) => {
                self.properties.insert(property, value);
                Ok(())
            }
            _ => Err(SolverError::rejected_property(path)),
        }
    }

    fn get_property(&self, path: &str) -> SolverResult<f64> {
        Property::from_path(path)
            .and_then(|p| self.properties.get(&p).copied())
            .ok_or_else(|| SolverError::missing_property(path))
    }

    fn set_dt(&mut self, dt: f64) {
        self.dt = dt;
    }

    fn run_ic(&mut self) -> SolverResult<bool> {
        if self.loaded_model.is_none() {
            return Ok(false);
        }
        let x0 = self.state_from_ic();
        if !x0.h_ft.is_finite() || !x0.u_fps.is_finite() {
            return Ok(false);
        }
        self.state = x0;
        self.initial = Some(x0);
        self.time = 0.0;
        self.publish(None);
        Ok(true)
    }

    fn step(&mut self) -> SolverResult<()> {
        self.require_model()?;
        if self.initial.is_none() {
            return Err(SolverError::StepFailed {
                message: "initial conditions not applied".to_string(),
            });
        }

        let mut model = PointMass {
            params: self.params,
            commands: self.commands(),
        };
        let mut next = self
            .params
            .integrator
            .step(&mut model, self.time, &self.state, self.dt)
            .map_err(|e| SolverError::StepFailed {
                message: e.to_string(),
            })?;
        next.theta = next.theta.clamp(-FRAC_PI_2 + 1e-3, FRAC_PI_2 - 1e-3);
        next.psi = next.psi.rem_euclid(TAU);

        let rates = model.rhs(self.time, &next)?;
        self.state = next;
        self.time += self.dt;
        self.publish(Some(&rates));
        Ok(())
    }

    fn reset_to_initial_conditions(&mut self) -> SolverResult<()> {
        match self.initial {
            Some(x0) => {
                self.state = x0;
                self.time = 0.0;
                self.publish(None);
                Ok(())
            }
            None => Err(SolverError::Backend {
                message: "no initial conditions to reset to".to_string(),
            }),
        }
    }
}

/// `SolverLibrary` handle for the reference solver.
#[derive(Debug, Clone)]
pub struct KinematicLibrary {
    module_dir: PathBuf,
    models: Vec<String>,
    params: KinematicParams,
}

impl KinematicLibrary {
    pub fn new(module_dir: impl Into<PathBuf>) -> Self {
        Self {
            module_dir: module_dir.into(),
            models: DEFAULT_KINEMATIC_MODELS.iter().map(|m| m.to_string()).collect(),
            params: KinematicParams::default(),
        }
    }

    /// Restrict the loadable model ids.
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_params(mut self, params: KinematicParams) -> Self {
        self.params = params;
        self
    }
}

impl SolverLibrary for KinematicLibrary {
    fn name(&self) -> &str {
        "kinematic"
    }

    fn module_dir(&self) -> PathBuf {
        self.module_dir.clone()
    }

    fn create_solver(&self) -> SolverResult<Box<dyn FlightSolver>> {
        Ok(Box::new(KinematicSolver::new(
            self.models.iter().cloned(),
            self.params,
        )))
    }
}
