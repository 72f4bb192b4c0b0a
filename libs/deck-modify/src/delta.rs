//! # Modification Deltas
//!
//! A delta is a set of parameter overrides keyed by short names (`scale`,
//! `gripOffset`) or dotted configuration keys (`visibility.buttons`).
//! Deltas are transient: the caller decides whether to apply them.

use std::collections::BTreeMap;

use deck_config::{ConfigError, ConfigStore, DeckConfig, ParamValue};
use serde::{Deserialize, Serialize};

/// Short delta keys and the configuration keys they stand for.
const ALIASES: &[(&str, &str)] = &[
    ("scale", "dimensions.scale"),
    ("gripOffset", "dimensions.grip_offset"),
];

/// Maps a delta key onto its dotted configuration key.
///
/// ## Example
///
/// ```rust
/// use deck_modify::config_path;
///
/// assert_eq!(config_path("gripOffset"), "dimensions.grip_offset");
/// assert_eq!(config_path("visibility.buttons"), "visibility.buttons");
/// ```
pub fn config_path(key: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or(key, |(_, path)| *path)
}

/// Ordered parameter overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModificationDelta(BTreeMap<String, ParamValue>);

impl ModificationDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one override; a later insert for the same key wins.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Merges another delta into this one. Keys in `other` win.
    pub fn merge(&mut self, other: ModificationDelta) {
        self.0.extend(other.0);
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Applies every override to the store, marking it dirty.
    ///
    /// Stops at the first rejected key; overrides before it stay applied.
    pub fn apply_to(&self, store: &mut ConfigStore) -> Result<(), ConfigError> {
        for (key, value) in self.iter() {
            store.set(config_path(key), value.clone())?;
        }
        Ok(())
    }

    /// Returns a copy of `config` with every override applied.
    pub fn applied(&self, config: &DeckConfig) -> Result<DeckConfig, ConfigError> {
        let mut out = config.clone();
        for (key, value) in self.iter() {
            out.set(config_path(key), value.clone())?;
        }
        Ok(out)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ModificationDelta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
