use crate::commands::TrackerPaths;
use crate::config::{Backend, TrackerConfig};
use crate::engine::MaintenanceEngine;
use crate::error::{Result, TrackerError};
use crate::store::firestore::FirestoreStore;
use crate::store::fs::FileStore;
use crate::store::memory::InMemoryStore;
use crate::store::RecordStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Overrides the data directory (config and the file backend live here).
pub const HOME_ENV: &str = "OILTRACK_HOME";
/// Firestore API key used when the config file has none.
pub const API_KEY_ENV: &str = "OILTRACK_API_KEY";

pub type DynStore = Box<dyn RecordStore + Send>;

pub struct TrackerContext {
    pub engine: MaintenanceEngine<DynStore>,
    pub config: TrackerConfig,
    pub paths: TrackerPaths,
}

/// `$OILTRACK_HOME` if set, otherwise the platform data directory.
pub fn resolve_paths() -> Result<TrackerPaths> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(TrackerPaths::new(PathBuf::from(home)));
    }
    let proj_dirs = ProjectDirs::from("com", "oiltrack", "oiltrack").ok_or_else(|| {
        TrackerError::Config(format!(
            "Could not determine a data directory; set {}",
            HOME_ENV
        ))
    })?;
    Ok(TrackerPaths::new(proj_dirs.data_dir().to_path_buf()))
}

pub fn build_store(
    config: &TrackerConfig,
    backend: Backend,
    paths: &TrackerPaths,
) -> Result<DynStore> {
    let store: DynStore = match backend {
        Backend::File => Box::new(FileStore::new(paths.data_dir.clone())),
        Backend::Memory => Box::new(InMemoryStore::new()),
        Backend::Firestore => {
            let env_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
            Box::new(FirestoreStore::new(config.firestore_settings(env_key)?)?)
        }
    };
    debug!(store = %store.describe(), "store ready");
    Ok(store)
}

/// Loads config, builds the configured store and wires up the engine.
///
/// The engine is returned before its first refresh; call
/// [`MaintenanceEngine::init`] to load the snapshot.
pub fn initialize(
    paths: TrackerPaths,
    backend_override: Option<Backend>,
) -> Result<TrackerContext> {
    let config = TrackerConfig::load(&paths.data_dir)?;
    let backend = backend_override.unwrap_or(config.backend);
    let store = build_store(&config, backend, &paths)?;

    Ok(TrackerContext {
        engine: MaintenanceEngine::new(store),
        config,
        paths,
    })
}
