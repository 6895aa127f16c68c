//! Adapter configuration: requested model, model catalog, initial conditions.
//!
//! The alias table and fallback list are installation-dependent data, so they
//! live in a serializable `ModelCatalog` that can be replaced from YAML. The
//! `Default` reproduces the models commonly bundled with the solver.

use crate::error::{AdapterError, AdapterResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Aircraft alias table, default model, and fallback chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelCatalog {
    /// Lower-case alias -> solver model id.
    pub aliases: BTreeMap<String, String>,
    /// Model used for aliases not in the table (a stable general-aviation model).
    pub default_model: String,
    /// Models tried, in order, when the resolved model fails to load.
    pub fallback_models: Vec<String>,
    /// Directory name of a sibling installation next to the library's module dir.
    pub sibling_install_dir: String,
    /// Additional data-root candidates probed after the built-in ones.
    pub extra_root_candidates: Vec<PathBuf>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        let aliases = [
            ("f16", "f16"),
            ("f-16", "f16"),
            ("c172", "c172p"),
            ("c172p", "c172p"),
            ("cessna", "c172p"),
            ("737", "737"),
            ("boeing", "737"),
            ("simple", "c172p"),
        ]
        .into_iter()
        .map(|(alias, id)| (alias.to_string(), id.to_string()))
        .collect();

        Self {
            aliases,
            default_model: "c172p".to_string(),
            fallback_models: ["c172p", "c172", "f16", "x15"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            sibling_install_dir: "JSBSim".to_string(),
            extra_root_candidates: Vec::new(),
        }
    }
}

impl ModelCatalog {
    /// Parse and validate a catalog from YAML text.
    ///
    /// Missing fields take their defaults; alias keys are normalized to lower case.
    pub fn from_yaml_str(text: &str) -> AdapterResult<Self> {
        let catalog: ModelCatalog = serde_yaml::from_str(text)?;
        catalog.normalized().validated()
    }

    /// Load a catalog from a YAML file.
    pub fn load(path: &Path) -> AdapterResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AdapterError::CatalogRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Serialize to YAML.
    pub fn to_yaml_string(&self) -> AdapterResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Map an alias to a model id; unknown or blank aliases map to `default_model`.
    pub fn canonical_id(&self, alias: &str) -> &str {
        let key = alias.trim().to_ascii_lowercase();
        self.aliases
            .get(&key)
            .map(String::as_str)
            .unwrap_or(&self.default_model)
    }

    fn normalized(mut self) -> Self {
        self.aliases = self
            .aliases
            .into_iter()
            .map(|(alias, id)| (alias.trim().to_ascii_lowercase(), id.trim().to_string()))
            .collect();
        self.default_model = self.default_model.trim().to_string();
        self.fallback_models = self
            .fallback_models
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        self
    }

    fn validated(self) -> AdapterResult<Self> {
        if self.default_model.is_empty() {
            return Err(AdapterError::InvalidConfig {
                what: "default_model must not be empty".to_string(),
            });
        }
        if let Some((alias, _)) = self.aliases.iter().find(|(_, id)| id.is_empty()) {
            return Err(AdapterError::InvalidConfig {
                what: format!("alias '{}' maps to an empty model id", alias),
            });
        }
        Ok(self)
    }
}

/// Solver initial conditions applied before the first step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    /// Geodetic latitude [deg]
    pub latitude_deg: f64,
    /// Longitude [deg]
    pub longitude_deg: f64,
    /// Altitude above sea level [ft]
    pub altitude_ft: f64,
    /// Body-axis forward velocity [ft/s]
    pub u_fps: f64,
    /// Body-axis lateral velocity [ft/s]
    pub v_fps: f64,
    /// Body-axis vertical velocity [ft/s]
    pub w_fps: f64,
    /// Calibrated airspeed [kts]; overrides `u_fps` when set.
    pub airspeed_kts: Option<f64>,
    /// Roll [deg], solver convention
    pub roll_deg: f64,
    /// Pitch [deg], solver convention
    pub pitch_deg: f64,
    /// Heading [deg]
    pub heading_deg: f64,
    /// Start with engine 0 running
    pub engine_running: bool,
    /// Initial solver time step [s]
    pub dt_s: f64,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_ft: 10_000.0,
            u_fps: 300.0,
            v_fps: 0.0,
            w_fps: 0.0,
            airspeed_kts: None,
            roll_deg: 0.0,
            pitch_deg: 0.0,
            heading_deg: 0.0,
            engine_running: true,
            dt_s: 1.0 / 60.0,
        }
    }
}

impl InitialConditions {
    /// Forward body velocity [ft/s], honoring `airspeed_kts` when present.
    pub fn forward_velocity_fps(&self) -> f64 {
        match self.airspeed_kts {
            Some(kts) => fl_core::convert::knots_to_fps(kts),
            None => self.u_fps,
        }
    }
}

/// Per-aircraft adapter configuration. Immutable once handed to the adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterConfig {
    requested_model_alias: String,
    enable_external_solver: bool,
    catalog: ModelCatalog,
    initial_conditions: InitialConditions,
}

impl AdapterConfig {
    pub fn new(requested_model_alias: impl Into<String>, enable_external_solver: bool) -> Self {
        Self {
            requested_model_alias: requested_model_alias.into(),
            enable_external_solver,
            catalog: ModelCatalog::default(),
            initial_conditions: InitialConditions::default(),
        }
    }

    pub fn with_catalog(mut self, catalog: ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_initial_conditions(mut self, initial_conditions: InitialConditions) -> Self {
        self.initial_conditions = initial_conditions;
        self
    }

    pub fn requested_model_alias(&self) -> &str {
        &self.requested_model_alias
    }

    pub fn enable_external_solver(&self) -> bool {
        self.enable_external_solver
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn initial_conditions(&self) -> &InitialConditions {
        &self.initial_conditions
    }
}
