//! # Catalog Errors

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors reading a single mesh file. Every variant names the file.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The file could not be opened or read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The contents are not a valid STL.
    #[error("Invalid STL {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The STL is valid but holds no triangles.
    #[error("STL {path} contains no triangles")]
    Empty { path: PathBuf },
}

impl MeshError {
    /// Creates a parse error.
    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// The offending file.
    pub fn path(&self) -> &Path {
        match self {
            MeshError::Io { path, .. } | MeshError::Parse { path, .. } | MeshError::Empty { path } => {
                path
            }
        }
    }
}

/// Errors building or writing the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Cannot scan {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Catalog serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
