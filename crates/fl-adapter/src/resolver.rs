//! Aircraft model resolution.
//!
//! Maps a requested alias to a model id, locates the solver's data root by
//! probing candidate directories, and walks the fallback list when the
//! preferred model fails to load.

use crate::config::ModelCatalog;
use crate::error::{AdapterError, AdapterResult};
use fl_solver::FlightSolver;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A model the solver has actually loaded, and the root it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    canonical_id: String,
    data_root_path: PathBuf,
}

impl ResolvedModel {
    pub fn canonical_id(&self) -> &str {
        &self.canonical_id
    }

    pub fn data_root_path(&self) -> &Path {
        &self.data_root_path
    }
}

/// Resolves aliases against a `ModelCatalog`.
#[derive(Debug, Clone, Copy)]
pub struct ModelResolver<'a> {
    catalog: &'a ModelCatalog,
}

impl<'a> ModelResolver<'a> {
    pub fn new(catalog: &'a ModelCatalog) -> Self {
        Self { catalog }
    }

    pub fn canonical_id(&self, alias: &str) -> &'a str {
        self.catalog.canonical_id(alias)
    }

    /// Candidate data roots, in probe order.
    pub fn candidate_roots(&self, module_dir: &Path) -> Vec<PathBuf> {
        let mut roots = vec![module_dir.to_path_buf(), module_dir.join("data")];
        if let Some(parent) = module_dir.parent().filter(|p| !p.as_os_str().is_empty()) {
            let sibling = &self.catalog.sibling_install_dir;
            if !sibling.is_empty() {
                roots.push(parent.join(sibling));
                roots.push(parent.join("share").join(sibling.to_ascii_lowercase()));
            }
        }
        roots.extend(self.catalog.extra_root_candidates.iter().cloned());
        roots
    }

    /// First candidate root containing an `aircraft` directory.
    pub fn probe_data_root(&self, module_dir: &Path) -> AdapterResult<PathBuf> {
        let candidates = self.candidate_roots(module_dir);
        for root in &candidates {
            if is_data_root(root) {
                debug!(root = %root.display(), "found solver data root");
                return Ok(root.clone());
            }
            debug!(root = %root.display(), "not a solver data root");
        }
        Err(AdapterError::DataRootNotFound {
            attempted: candidates,
        })
    }

    /// Load `model_id`, falling back through the catalog's fallback list.
    ///
    /// Returns the id that actually loaded.
    pub fn load_with_fallback(
        &self,
        solver: &mut dyn FlightSolver,
        model_id: &str,
        root: &Path,
    ) -> AdapterResult<String> {
        if solver.load_model(model_id) {
            return Ok(model_id.to_string());
        }
        warn!(model = model_id, "model failed to load, trying fallbacks");

        let mut attempted = vec![model_id.to_string()];
        for fallback in &self.catalog.fallback_models {
            if attempted.contains(fallback) {
                continue;
            }
            attempted.push(fallback.clone());
            debug!(model = %fallback, "trying fallback model");
            if solver.load_model(fallback) {
                info!(requested = model_id, loaded = %fallback, "loaded fallback model");
                return Ok(fallback.clone());
            }
        }

        if attempted.len() == 1 {
            return Err(AdapterError::ModelNotFound {
                model_id: model_id.to_string(),
            });
        }
        Err(AdapterError::NoAircraftModelAvailable {
            requested: model_id.to_string(),
            attempted,
            root: root.to_path_buf(),
        })
    }

    /// Resolve `alias` and load it into `solver`.
    ///
    /// A missing data root is not fatal: the solver is pointed at its own
    /// module directory and loading is attempted anyway.
    pub fn resolve(
        &self,
        solver: &mut dyn FlightSolver,
        alias: &str,
        module_dir: &Path,
    ) -> AdapterResult<ResolvedModel> {
        let model_id = self.canonical_id(alias);
        debug!(alias, model = model_id, "resolved alias");

        let root = match self.probe_data_root(module_dir) {
            Ok(root) => root,
            Err(e) => {
                warn!(error = %e, "using solver default root");
                module_dir.to_path_buf()
            }
        };
        solver.set_root_dir(&root);

        let canonical_id = self.load_with_fallback(solver, model_id, &root)?;
        Ok(ResolvedModel {
            canonical_id,
            data_root_path: root,
        })
    }
}

fn is_data_root(root: &Path) -> bool {
    root.join("aircraft").is_dir()
}

/// Aircraft ids installed under `root`: directories `aircraft/<id>/` holding `<id>.xml`.
pub fn list_available_aircraft(root: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(root.join("aircraft")) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(root = %root.display(), error = %e, "no aircraft directory");
            return Vec::new();
        }
    };

    let mut ids: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|id| root.join("aircraft").join(id).join(format!("{}.xml", id)).is_file())
        .collect();
    ids.sort();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_solver::{KinematicSolver, KinematicParams};

    fn solver_with(models: &[&str]) -> KinematicSolver {
        KinematicSolver::new(models.iter().copied(), KinematicParams::default())
    }

    #[test]
    fn candidate_order() {
        let catalog = ModelCatalog {
            extra_root_candidates: vec![PathBuf::from("/srv/fdm")],
            ..ModelCatalog::default()
        };
        let resolver = ModelResolver::new(&catalog);
        let roots = resolver.candidate_roots(Path::new("/usr/lib/site/jsbsim"));
        assert_eq!(
            roots,
            vec![
                PathBuf::from("/usr/lib/site/jsbsim"),
                PathBuf::from("/usr/lib/site/jsbsim/data"),
                PathBuf::from("/usr/lib/site/JSBSim"),
                PathBuf::from("/usr/lib/site/share/jsbsim"),
                PathBuf::from("/srv/fdm"),
            ]
        );
    }

    #[test]
    fn relative_module_dir_skips_parent_candidates() {
        let catalog = ModelCatalog::default();
        let resolver = ModelResolver::new(&catalog);
        assert_eq!(resolver.candidate_roots(Path::new("jsbsim")).len(), 2);
    }

    #[test]
    fn missing_root_reports_attempts() {
        let catalog = ModelCatalog::default();
        let resolver = ModelResolver::new(&catalog);
        let err = resolver
            .probe_data_root(Path::new("/nonexistent/flightlink/module"))
            .unwrap_err();
        match err {
            AdapterError::DataRootNotFound { attempted } => assert_eq!(attempted.len(), 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn primary_model_loads() {
        let catalog = ModelCatalog::default();
        let resolver = ModelResolver::new(&catalog);
        let mut solver = solver_with(&["f16", "c172p"]);
        let id = resolver
            .load_with_fallback(&mut solver, "f16", Path::new("/tmp"))
            .unwrap();
        assert_eq!(id, "f16");
    }

    #[test]
    fn falls_back_to_first_loadable() {
        let catalog = ModelCatalog::default();
        let resolver = ModelResolver::new(&catalog);
        let mut solver = solver_with(&["x15"]);
        let id = resolver
            .load_with_fallback(&mut solver, "737", Path::new("/tmp"))
            .unwrap();
        assert_eq!(id, "x15");
        assert_eq!(solver.loaded_model(), Some("x15"));
    }

    #[test]
    fn all_fallbacks_failing_lists_attempts() {
        let catalog = ModelCatalog::default();
        let resolver = ModelResolver::new(&catalog);
        let mut solver = solver_with(&[]);
        let err = resolver
            .load_with_fallback(&mut solver, "c172p", Path::new("/data"))
            .unwrap_err();
        match err {
            AdapterError::NoAircraftModelAvailable {
                requested,
                attempted,
                root,
            } => {
                assert_eq!(requested, "c172p");
                // The primary is not retried from the fallback list
                assert_eq!(attempted, vec!["c172p", "c172", "f16", "x15"]);
                assert_eq!(root, PathBuf::from("/data"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_fallback_list_is_model_not_found() {
        let catalog = ModelCatalog {
            fallback_models: vec!["c172p".to_string()],
            ..ModelCatalog::default()
        };
        let resolver = ModelResolver::new(&catalog);
        let mut solver = solver_with(&[]);
        let err = resolver
            .load_with_fallback(&mut solver, "c172p", Path::new("/data"))
            .unwrap_err();
        assert!(matches!(
            err,
            AdapterError::ModelNotFound { ref model_id } if model_id.as_str() == "c172p"
        ));
    }

    #[test]
    fn resolve_without_data_root_uses_module_dir() {
        let catalog = ModelCatalog::default();
        let resolver = ModelResolver::new(&catalog);
        let mut solver = solver_with(&["c172p"]);
        let module_dir = Path::new("/nonexistent/flightlink/module");
        let resolved = resolver.resolve(&mut solver, "Cessna", module_dir).unwrap();
        assert_eq!(resolved.canonical_id(), "c172p");
        assert_eq!(resolved.data_root_path(), module_dir);
        assert_eq!(solver.root_dir(), Some(module_dir));
    }
}
