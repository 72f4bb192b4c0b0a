//! # Assembly Errors
//!
//! Per-component source failures and whole-assembly errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::asset::AssetError;

/// A component's geometry source could not be resolved.
///
/// Recovered locally: the component is skipped and the rest assemble.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeometrySourceError {
    #[error("Mesh file not found: {path}")]
    MissingMesh { path: PathBuf },

    #[error("Mesh file unreadable: {path}: {reason}")]
    UnreadableMesh { path: PathBuf, reason: String },

    #[error("Mesh file is empty: {path}")]
    EmptyMesh { path: PathBuf },

    /// A primitive names a dimension the configuration does not define.
    #[error("Dimension `{name}` is not configured")]
    MissingDimension { name: String },
}

impl From<AssetError> for GeometrySourceError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::NotFound { path } => Self::MissingMesh { path },
            AssetError::Unreadable { path, reason } => Self::UnreadableMesh { path, reason },
            AssetError::Empty { path } => Self::EmptyMesh { path },
        }
    }
}

/// Errors that stop a whole assembly.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AssemblyError {
    /// A layout entry names a component outside the static table while the
    /// reject policy is active.
    #[error("Layout names unknown component `{name}`")]
    UnknownComponent { name: String },
}
