//! Per-aircraft solver lifecycle.
//!
//! ```text
//! Disabled --(requested + library present)--> Uninitialized
//! Uninitialized --(model loaded, IC accepted)--> Ready
//! Uninitialized --(any init failure)--> Disabled
//! Ready --(step or state extraction failure)--> Degraded
//! ```
//!
//! `Disabled` and `Degraded` are terminal. Initialization failures end in
//! `Disabled` ("never available"), runtime failures end in `Degraded`
//! ("was available, host falls back from now on").

use crate::config::AdapterConfig;
use crate::controls::{ControlMapper, HostControlLevels};
use crate::diagnostics::Diagnostics;
use crate::error::{AdapterError, AdapterResult};
use crate::frame::{FrameConverter, HostAttitude};
use crate::resolver::{ModelResolver, ResolvedModel};
use crate::sanitizer::{RawState, StateSanitizer};
use crate::snapshot::StateSnapshot;
use fl_core::{Vec3, ensure_positive};
use fl_solver::{FlightSolver, Property, PropertyResultExt, SolverLibrary, read, write};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Adapter lifecycle state.
#[derive(Clone, Debug, PartialEq)]
pub enum AdapterState {
    Disabled { reason: String },
    Uninitialized,
    Ready,
    Degraded { reason: String },
}

impl AdapterState {
    pub fn kind(&self) -> StateKind {
        match self {
            AdapterState::Disabled { .. } => StateKind::Disabled,
            AdapterState::Uninitialized => StateKind::Uninitialized,
            AdapterState::Ready => StateKind::Ready,
            AdapterState::Degraded { .. } => StateKind::Degraded,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            AdapterState::Disabled { reason } | AdapterState::Degraded { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Fieldless view of `AdapterState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StateKind {
    Disabled,
    Uninitialized,
    Ready,
    Degraded,
}

impl StateKind {
    pub fn can_transition_to(self, next: StateKind) -> bool {
        matches!(
            (self, next),
            (StateKind::Disabled, StateKind::Uninitialized)
                | (StateKind::Uninitialized, StateKind::Ready)
                | (StateKind::Uninitialized, StateKind::Disabled)
                | (StateKind::Ready, StateKind::Degraded)
        )
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StateKind::Disabled => "Disabled",
            StateKind::Uninitialized => "Uninitialized",
            StateKind::Ready => "Ready",
            StateKind::Degraded => "Degraded",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: StateKind,
    pub to: StateKind,
}

/// Drives one external solver instance on behalf of one host aircraft.
pub struct FdmAdapter {
    config: AdapterConfig,
    state: AdapterState,
    solver: Option<Box<dyn FlightSolver>>,
    resolved: Option<ResolvedModel>,
    diagnostics: Diagnostics,
    transitions: Vec<Transition>,
}

impl fmt::Debug for FdmAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FdmAdapter")
            .field("state", &self.state)
            .field("solver", &self.solver.as_ref().map(|s| s.name().to_string()))
            .field("resolved", &self.resolved)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

impl FdmAdapter {
    /// Create an adapter and run initialization.
    ///
    /// Never fails: the outcome is visible through `state()`.
    pub fn new(config: AdapterConfig, library: &dyn SolverLibrary) -> Self {
        let mut adapter = Self {
            config,
            state: AdapterState::Disabled {
                reason: "not initialized".to_string(),
            },
            solver: None,
            resolved: None,
            diagnostics: Diagnostics::default(),
            transitions: Vec::new(),
        };

        if !adapter.config.enable_external_solver() {
            adapter.state = AdapterState::Disabled {
                reason: "external solver not requested".to_string(),
            };
            info!(
                alias = adapter.config.requested_model_alias(),
                "external solver disabled, using simplified physics"
            );
            return adapter;
        }

        let solver = match library.create_solver() {
            Ok(solver) => solver,
            Err(e) => {
                let e = AdapterError::from(e);
                warn!(library = library.name(), error = %e, "solver disabled");
                adapter.state = AdapterState::Disabled {
                    reason: e.to_string(),
                };
                return adapter;
            }
        };
        adapter.solver = Some(solver);
        adapter.set_state(AdapterState::Uninitialized);

        match adapter.initialize(&library.module_dir()) {
            Ok(resolved) => {
                info!(
                    model = resolved.canonical_id(),
                    root = %resolved.data_root_path().display(),
                    "solver ready"
                );
                adapter.resolved = Some(resolved);
                adapter.set_state(AdapterState::Ready);
            }
            Err(e) => {
                adapter.solver = None;
                adapter.set_state(AdapterState::Disabled {
                    reason: e.to_string(),
                });
            }
        }
        adapter
    }

    fn initialize(&mut self, module_dir: &Path) -> AdapterResult<ResolvedModel> {
        let solver = self
            .solver
            .as_deref_mut()
            .ok_or_else(|| AdapterError::Backend {
                message: "no solver instance".to_string(),
            })?;

        let resolver = ModelResolver::new(self.config.catalog());
        let resolved = resolver.resolve(solver, self.config.requested_model_alias(), module_dir)?;

        let ic = self.config.initial_conditions();
        ensure_positive(ic.dt_s, "initial dt").map_err(|_| AdapterError::InvalidConfig {
            what: format!("initial dt must be positive, got {}", ic.dt_s),
        })?;
        solver.set_dt(ic.dt_s);

        let initial_values = [
            (Property::IcLatitudeDeg, ic.latitude_deg),
            (Property::IcLongitudeDeg, ic.longitude_deg),
            (Property::IcAltitudeFt, ic.altitude_ft),
            (Property::IcUFps, ic.forward_velocity_fps()),
            (Property::IcVFps, ic.v_fps),
            (Property::IcWFps, ic.w_fps),
            (Property::IcRollDeg, ic.roll_deg),
            (Property::IcPitchDeg, ic.pitch_deg),
            (Property::IcHeadingDeg, ic.heading_deg),
        ];
        for (property, value) in initial_values {
            write(solver, property, value)?;
        }

        // Models without an engine do not expose this property.
        let diagnostics = &mut self.diagnostics;
        let running = if ic.engine_running { 1.0 } else { 0.0 };
        write(solver, Property::EngineSetRunning, running).or_default_with((), |_| {
            diagnostics.property_write_failures += 1
        })?;

        if !solver.run_ic()? {
            return Err(AdapterError::InitialConditionsRejected);
        }

        match read(solver, Property::NumEngines) {
            Ok(n) => info!(engines = n, "engine count"),
            Err(_) => info!("engine count: n/a"),
        }
        match read(solver, Property::AltitudeFt) {
            Ok(h) => info!(altitude_ft = h, "initial altitude"),
            Err(_) => info!(altitude_ft = ic.altitude_ft, "initial altitude (configured)"),
        }

        Ok(resolved)
    }

    fn set_state(&mut self, next: AdapterState) {
        let from = self.state.kind();
        let to = next.kind();
        if !from.can_transition_to(to) {
            warn!(%from, %to, "ignoring illegal adapter transition");
            return;
        }
        match next.reason() {
            Some(reason) => warn!(%from, %to, reason, "adapter state change"),
            None => info!(%from, %to, "adapter state change"),
        }
        self.transitions.push(Transition { from, to });
        self.state = next;
    }

    /// Advance the solver one frame.
    ///
    /// `None` means the host must use its simplified physics for this
    /// aircraft. Outside `Ready` that is permanent; for an invalid `dt` it
    /// applies to this frame only.
    pub fn update(&mut self, dt: f64, controls: &HostControlLevels) -> Option<StateSnapshot> {
        if self.state != AdapterState::Ready {
            return None;
        }
        if ensure_positive(dt, "dt").is_err() {
            self.diagnostics.frames_skipped += 1;
            warn!(dt, "skipping frame with invalid time step");
            return None;
        }

        match self.step_frame(dt, controls) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                self.set_state(AdapterState::Degraded {
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    fn step_frame(
        &mut self,
        dt: f64,
        controls: &HostControlLevels,
    ) -> AdapterResult<StateSnapshot> {
        let solver = self
            .solver
            .as_deref_mut()
            .ok_or_else(|| AdapterError::Backend {
                message: "no solver instance".to_string(),
            })?;
        let diagnostics = &mut self.diagnostics;

        solver.set_dt(dt);

        // Unsupported channels are normal (no flaps, no brakes): swallow every failure.
        let frame = ControlMapper::to_solver_controls(controls);
        for (property, value) in frame.channels() {
            if let Err(e) = write(solver, property, value) {
                diagnostics.property_write_failures += 1;
                debug!(property = property.path(), error = %e, "control write ignored");
            }
        }

        solver.step()?;

        let solver: &dyn FlightSolver = solver;
        let raw = RawState::try_from_fn(|field| {
            read(solver, field.property()).or_default_with(0.0, |_| {
                diagnostics.property_read_failures += 1
            })
        })?;

        let safe = StateSanitizer::sanitize(raw);
        diagnostics.record_non_finite(&safe.flagged);
        diagnostics.frames_stepped += 1;
        Ok(FrameConverter::to_snapshot(&safe.state))
    }

    /// Re-synchronize the solver's initial position. Ready only, best-effort.
    pub fn set_position(&mut self, position_m: &Vec3) {
        let geo = FrameConverter::host_position_to_geodetic(position_m);
        self.write_best_effort(
            "position",
            &[
                (Property::IcLatitudeDeg, geo.latitude_deg),
                (Property::IcLongitudeDeg, geo.longitude_deg),
                (Property::IcAltitudeFt, geo.altitude_ft),
            ],
        );
    }

    /// Re-synchronize the solver's initial body velocity. Ready only, best-effort.
    pub fn set_velocity(&mut self, velocity_mps: &Vec3) {
        let (u, v, w) = FrameConverter::host_velocity_to_body_fps(velocity_mps);
        self.write_best_effort(
            "velocity",
            &[
                (Property::IcUFps, u),
                (Property::IcVFps, v),
                (Property::IcWFps, w),
            ],
        );
    }

    /// Re-synchronize the solver's initial attitude from host-convention angles.
    pub fn set_orientation(&mut self, roll_deg: f64, pitch_deg: f64, yaw_deg: f64) {
        let att = FrameConverter::to_solver_attitude(&HostAttitude {
            roll_deg,
            pitch_deg,
            yaw_deg,
        });
        self.write_best_effort(
            "orientation",
            &[
                (Property::IcRollDeg, att.roll_deg),
                (Property::IcPitchDeg, att.pitch_deg),
                (Property::IcHeadingDeg, att.yaw_deg),
            ],
        );
    }

    fn write_best_effort(&mut self, what: &'static str, values: &[(Property, f64)]) {
        if self.state != AdapterState::Ready {
            return;
        }
        let Some(solver) = self.solver.as_deref_mut() else {
            return;
        };
        for &(property, value) in values {
            if let Err(e) = write(solver, property, value) {
                self.diagnostics.property_write_failures += 1;
                warn!(what, property = property.path(), error = %e, "re-sync write failed");
            }
        }
    }

    pub fn state(&self) -> &AdapterState {
        &self.state
    }

    /// False once initialization has failed or the solver was never requested.
    pub fn is_enabled(&self) -> bool {
        !matches!(self.state, AdapterState::Disabled { .. })
    }

    /// True once the solver has accepted initial conditions.
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, AdapterState::Ready | AdapterState::Degraded { .. })
    }

    pub fn resolved_model(&self) -> Option<&ResolvedModel> {
        self.resolved.as_ref()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn solver(&self) -> Option<&dyn FlightSolver> {
        self.solver.as_deref()
    }
}
