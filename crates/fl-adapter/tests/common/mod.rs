//! Scriptable solver stub shared by the integration tests.

#![allow(dead_code)]

use fl_solver::{FlightSolver, Property, SolverError, SolverLibrary, SolverResult};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Behavior of every solver the stub library creates.
#[derive(Clone, Debug, Default)]
pub struct StubScript {
    /// Model ids `load_model` accepts
    pub loadable: Vec<String>,
    /// Property that reads back as NaN
    pub nan_property: Option<Property>,
    /// Properties that are absent on the loaded model
    pub missing: Vec<Property>,
    /// Property whose read fails fatally
    pub fatal_read: Option<Property>,
    /// 1-based `step` call that fails
    pub fail_step_at: Option<u64>,
    /// `run_ic` returns false
    pub reject_ic: bool,
    /// `ic/*` writes fail once `run_ic` has succeeded
    pub lock_ic_after_run: bool,
    /// Climb per step [ft]
    pub climb_per_step_ft: f64,
}

impl StubScript {
    pub fn loading<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            loadable: models.into_iter().map(Into::into).collect(),
            climb_per_step_ft: 0.5,
            ..Self::default()
        }
    }
}

/// Call counters observable from the test after the solver is boxed.
#[derive(Clone, Debug, Default)]
pub struct StubCounters {
    pub steps: Rc<Cell<u64>>,
    pub load_attempts: Rc<Cell<u64>>,
}

pub struct StubSolver {
    script: StubScript,
    counters: StubCounters,
    loaded: Option<String>,
    root: Option<PathBuf>,
    properties: BTreeMap<Property, f64>,
    ic_locked: bool,
}

impl StubSolver {
    pub fn new(script: StubScript, counters: StubCounters) -> Self {
        Self {
            script,
            counters,
            loaded: None,
            root: None,
            properties: BTreeMap::new(),
            ic_locked: false,
        }
    }

    pub fn loaded_model(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    fn value(&self, property: Property) -> f64 {
        self.properties.get(&property).copied().unwrap_or(0.0)
    }

    fn publish(&mut self, altitude_ft: f64) {
        let u = self.value(Property::IcUFps);
        let outputs = [
            (Property::AltitudeFt, altitude_ft),
            (Property::RollRad, 0.0),
            (Property::PitchRad, 0.02),
            (Property::HeadingRad, 0.0),
            (Property::UFps, u),
            (Property::VFps, 0.0),
            (Property::WFps, 0.0),
            (Property::VNorthFps, u),
            (Property::VEastFps, 0.0),
            (Property::VDownFps, -self.script.climb_per_step_ft * 60.0),
            (Property::PRadSec, 0.0),
            (Property::QRadSec, 0.0),
            (Property::RRadSec, 0.0),
            (Property::UdotFtSec2, 0.0),
            (Property::VdotFtSec2, 0.0),
            (Property::WdotFtSec2, 0.0),
            (Property::AlphaDeg, 2.0),
            (Property::BetaDeg, 0.0),
            (Property::Mach, u / 1116.45),
            (Property::NumEngines, 1.0),
        ];
        self.properties.extend(outputs);
    }
}

impl FlightSolver for StubSolver {
    fn name(&self) -> &str {
        "stub"
    }

    fn set_root_dir(&mut self, root: &Path) {
        self.root = Some(root.to_path_buf());
    }

    fn load_model(&mut self, model_id: &str) -> bool {
        self.counters
            .load_attempts
            .set(self.counters.load_attempts.get() + 1);
        if self.script.loadable.iter().any(|m| m == model_id) {
            self.loaded = Some(model_id.to_string());
            true
        } else {
            false
        }
    }

    fn set_property(&mut self, path: &str, value: f64) -> SolverResult<()> {
        match Property::from_path(path) {
            Some(p) if self.ic_locked && p.is_initial_condition() => {
                Err(SolverError::rejected_property(path))
            }
            Some(p) if !self.script.missing.contains(&p) => {
                self.properties.insert(p, value);
                Ok(())
            }
            _ => Err(SolverError::rejected_property(path)),
        }
    }

    fn get_property(&self, path: &str) -> SolverResult<f64> {
        let property =
            Property::from_path(path).ok_or_else(|| SolverError::missing_property(path))?;
        if self.script.fatal_read == Some(property) {
            return Err(SolverError::Backend {
                message: format!("property tree corrupted at {}", path),
            });
        }
        if self.script.missing.contains(&property) {
            return Err(SolverError::missing_property(path));
        }
        if self.script.nan_property == Some(property) {
            return Ok(f64::NAN);
        }
        self.properties
            .get(&property)
            .copied()
            .ok_or_else(|| SolverError::missing_property(path))
    }

    fn set_dt(&mut self, _dt: f64) {}

    fn run_ic(&mut self) -> SolverResult<bool> {
        if self.script.reject_ic || self.loaded.is_none() {
            return Ok(false);
        }
        let h = self.value(Property::IcAltitudeFt);
        self.publish(h);
        self.ic_locked = self.script.lock_ic_after_run;
        Ok(true)
    }

    fn step(&mut self) -> SolverResult<()> {
        let n = self.counters.steps.get() + 1;
        self.counters.steps.set(n);
        if self.script.fail_step_at == Some(n) {
            return Err(SolverError::StepFailed {
                message: format!("integration diverged at step {}", n),
            });
        }
        let h = self.value(Property::AltitudeFt) + self.script.climb_per_step_ft;
        self.publish(h);
        Ok(())
    }

    fn reset_to_initial_conditions(&mut self) -> SolverResult<()> {
        let h = self.value(Property::IcAltitudeFt);
        self.publish(h);
        Ok(())
    }
}

pub struct StubLibrary {
    pub module_dir: PathBuf,
    pub script: StubScript,
    pub counters: StubCounters,
}

impl StubLibrary {
    pub fn new(script: StubScript) -> Self {
        Self {
            module_dir: PathBuf::from("/nonexistent/flightlink/stub"),
            script,
            counters: StubCounters::default(),
        }
    }
}

impl SolverLibrary for StubLibrary {
    fn name(&self) -> &str {
        "stub"
    }

    fn module_dir(&self) -> PathBuf {
        self.module_dir.clone()
    }

    fn create_solver(&self) -> SolverResult<Box<dyn FlightSolver>> {
        Ok(Box::new(StubSolver::new(
            self.script.clone(),
            self.counters.clone(),
        )))
    }
}

pub fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

/// Create `root/aircraft/<id>/<id>.xml` for each id.
pub fn install_aircraft(root: &Path, ids: &[&str]) {
    for id in ids {
        let dir = root.join("aircraft").join(id);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{}.xml", id)), "<fdm_config/>").unwrap();
    }
}
