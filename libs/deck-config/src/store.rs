//! # Configuration Store
//!
//! Owns one [`DeckConfig`], remembers where it came from, and tracks whether
//! it changed since the last save.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ConfigError;
use crate::model::DeckConfig;
use crate::value::ParamValue;

/// A loaded configuration plus dirty tracking.
///
/// ## Example
///
/// ```rust
/// use deck_config::ConfigStore;
///
/// let mut store = ConfigStore::default();
/// assert!(!store.is_dirty());
/// store.set("visibility.buttons", false).unwrap();
/// assert!(store.is_dirty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    config: DeckConfig,
    source: Option<PathBuf>,
    dirty: bool,
}

impl ConfigStore {
    /// Wraps an in-memory configuration.
    pub fn new(config: DeckConfig) -> Self {
        Self {
            config,
            source: None,
            dirty: false,
        }
    }

    /// Loads a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
            dirty: false,
        })
    }

    /// Loads the file if it exists, otherwise starts from built-in defaults
    /// bound to that path.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        info!(path = %path.display(), "configuration file not found, using defaults");
        Ok(Self {
            config: DeckConfig::default(),
            source: Some(path.to_path_buf()),
            dirty: false,
        })
    }

    /// Serializes the configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(&self.config)?)
    }

    /// Writes the configuration back to the file it was loaded from.
    ///
    /// A store built with [`ConfigStore::new`] has no file and fails with
    /// [`ConfigError::Unbound`].
    pub fn save(&mut self) -> Result<(), ConfigError> {
        let path = self
            .source
            .clone()
            .ok_or(ConfigError::Unbound)?;
        self.save_to(&path)
    }

    /// Writes the configuration to `path` and binds the store to it.
    pub fn save_to(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let yaml = self.to_yaml()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, yaml).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.source = Some(path.to_path_buf());
        self.dirty = false;
        debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Reads a leaf value.
    pub fn get(&self, key: &str) -> Result<ParamValue, ConfigError> {
        self.config.get(key)
    }

    /// Writes a leaf value and marks the store dirty on success.
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) -> Result<(), ConfigError> {
        self.config.set(key, value)?;
        self.dirty = true;
        Ok(())
    }

    /// Records the time of a successful render. Leaves the dirty flag alone:
    /// a timestamp is not a geometry change.
    pub fn stamp_render(&mut self, timestamp: impl Into<String>) {
        self.config.project.last_render = Some(timestamp.into());
    }

    /// The current configuration.
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// A detached copy of the current configuration.
    pub fn snapshot(&self) -> DeckConfig {
        self.config.clone()
    }

    /// The file this store reads from and saves to.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Whether a `set` succeeded since the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag without saving.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
