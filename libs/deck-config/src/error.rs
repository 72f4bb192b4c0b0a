//! # Configuration Errors
//!
//! Error types for configuration access and persistence.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::ValueKind;

/// Errors raised by the configuration store.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The key names an unknown section, an unknown fixed leaf, or has the
    /// wrong depth for its section.
    #[error("Unknown configuration key: {key}")]
    UnknownKey { key: String },

    /// The value kind does not match what the leaf stores.
    #[error("Type mismatch for {key}: expected {expected}, got {found}")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// The configuration file could not be read or written.
    #[error("Cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for this schema.
    #[error("Cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `save` was called on a store that was never bound to a file.
    #[error("Configuration has no backing file")]
    Unbound,

    /// The configuration could not be serialized.
    #[error("Cannot serialize configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Creates an unknown key error.
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(key: impl Into<String>, expected: ValueKind, found: ValueKind) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected,
            found,
        }
    }
}
