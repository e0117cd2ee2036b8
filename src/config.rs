//! Configuration loading.
//!
//! The default configuration file is `oxidized-registry.toml` in the current
//! working directory. Every field has a default, so the file can be omitted:
//!
//! ```toml
//! [registry]
//! root = "./registry"
//! icons_dir = "./.icons"
//!
//! [validation]
//! jobs = 0   # worker threads, 0 lets rayon decide
//! ```
//!
//! Command-line flags override whatever the file sets.

use crate::error::RegistryError;
use std::path::{Path, PathBuf};

/// Name of the configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "oxidized-registry.toml";

/// Main configuration for a validation run.
///
/// # Examples
///
/// ```
/// use oxidized_registry::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.registry.root.to_str(), Some("./registry"));
/// assert_eq!(config.validation.jobs, 0);
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    pub registry: RegistryConfig,
    pub validation: ValidationConfig,
}

/// Where the registry lives on disk.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Directory holding one sub-directory per namespace.
    pub root: PathBuf,
    /// Shared icons directory. Must exist, and relative resource icons may
    /// resolve into it.
    pub icons_dir: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            root: PathBuf::from("./registry"),
            icons_dir: PathBuf::from("./.icons"),
        }
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Size of the worker pool for per-document work. `0` uses rayon's
    /// default (one thread per CPU).
    pub jobs: usize,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. If `path` is `None`, try [`DEFAULT_CONFIG_FILE`] in the current directory.
    /// 3. If that file does not exist either, return [`Config::default()`].
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] when the explicit path does not exist, or
    /// the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Config, RegistryError> {
        let config_path = match path {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => return Err(RegistryError::ConfigNotFound(p.to_path_buf())),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        let Some(path) = config_path else {
            return Ok(Config::default());
        };
        let content = std::fs::read_to_string(&path).map_err(|source| RegistryError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| RegistryError::ConfigParse { path, source })
    }
}
