use crate::error::{Result, TrackerError};
use crate::store::firestore::{FirestoreSettings, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_COLLECTION: &str = "vehicles";
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 3;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Keys understood by [`TrackerConfig::get`] and [`TrackerConfig::set`], in display order.
pub const CONFIG_KEYS: [&str; 7] = [
    "backend",
    "firestore.project-id",
    "firestore.api-key",
    "firestore.collection",
    "firestore.base-url",
    "refresh-interval-secs",
    "request-timeout-secs",
];

/// Where vehicle records are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    File,
    Memory,
    Firestore,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::File => "file",
            Backend::Memory => "memory",
            Backend::Firestore => "firestore",
        };
        f.write_str(name)
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "file" => Ok(Backend::File),
            "memory" => Ok(Backend::Memory),
            "firestore" => Ok(Backend::Firestore),
            other => Err(format!(
                "Unknown backend: {} (expected file, memory or firestore)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FirestoreConfig {
    #[serde(default)]
    pub project_id: Option<String>,

    /// Falls back to the `OILTRACK_API_KEY` environment variable when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            api_key: None,
            collection: default_collection(),
            base_url: default_base_url(),
        }
    }
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_refresh_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Configuration for oiltrack, stored in `<data dir>/config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrackerConfig {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default)]
    pub firestore: FirestoreConfig,

    /// Seconds between snapshot reloads in `watch` mode
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Timeout for a single request to a remote store
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            firestore: FirestoreConfig::default(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl TrackerConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TrackerError::Io)?;
        let config: TrackerConfig =
            serde_json::from_str(&content).map_err(TrackerError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TrackerError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TrackerError::Serialization)?;
        fs::write(config_path, content).map_err(TrackerError::Io)?;
        Ok(())
    }

    pub fn exists_in<P: AsRef<Path>>(config_dir: P) -> bool {
        config_dir.as_ref().join(CONFIG_FILENAME).exists()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "backend" => self.backend.to_string(),
            "firestore.project-id" => self.firestore.project_id.clone().unwrap_or_default(),
            "firestore.api-key" => mask(self.firestore.api_key.as_deref()),
            "firestore.collection" => self.firestore.collection.clone(),
            "firestore.base-url" => self.firestore.base_url.clone(),
            "refresh-interval-secs" => self.refresh_interval_secs.to_string(),
            "request-timeout-secs" => self.request_timeout_secs.to_string(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "backend" => self.backend = value.parse()?,
            "firestore.project-id" => self.firestore.project_id = non_empty(value),
            "firestore.api-key" => self.firestore.api_key = non_empty(value),
            "firestore.collection" => {
                if value.trim().is_empty() {
                    return Err("firestore.collection cannot be empty".to_string());
                }
                self.firestore.collection = value.trim().to_string();
            }
            "firestore.base-url" => self.firestore.base_url = value.trim().to_string(),
            "refresh-interval-secs" => self.refresh_interval_secs = parse_seconds(key, value)?,
            "request-timeout-secs" => self.request_timeout_secs = parse_seconds(key, value)?,
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Connection settings for the Firestore backend.
    ///
    /// `env_api_key` is used when the config file has no key of its own.
    pub fn firestore_settings(&self, env_api_key: Option<String>) -> Result<FirestoreSettings> {
        let project_id = self.firestore.project_id.clone().ok_or_else(|| {
            TrackerError::Config("firestore.project-id is not set".to_string())
        })?;
        let api_key = self
            .firestore
            .api_key
            .clone()
            .or(env_api_key)
            .ok_or_else(|| {
                TrackerError::Config(
                    "firestore.api-key is not set (config or OILTRACK_API_KEY)".to_string(),
                )
            })?;

        Ok(FirestoreSettings {
            base_url: self.firestore.base_url.clone(),
            project_id,
            api_key,
            collection: self.firestore.collection.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_seconds(key: &str, value: &str) -> std::result::Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(format!("{} must be a positive number of seconds", key)),
        Ok(n) => Ok(n),
    }
}

fn mask(secret: Option<&str>) -> String {
    let Some(secret) = secret else {
        return String::new();
    };
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{}", tail)
}
