//! Asset access used by the assembler.
//!
//! The assembler only needs to know that a mesh file exists, is readable and
//! is not empty. Tests use the in-memory implementation.

use std::collections::HashMap;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Probe for mesh files.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use deck_assembly::asset::{AssetSource, InMemoryAssets};
/// let mut assets = InMemoryAssets::default();
/// assets.insert("assets/front.stl", b"solid front".to_vec());
/// assert_eq!(assets.probe(Path::new("assets/front.stl")).unwrap(), 11);
/// ```
pub trait AssetSource {
    /// Returns the size in bytes of a readable, non-empty mesh file.
    fn probe(&self, path: &Path) -> Result<u64, AssetError>;
}

/// Error raised when a mesh file cannot be used.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AssetError {
    /// The path does not exist.
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },
    /// The path exists but cannot be opened as a file.
    #[error("cannot read {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },
    /// The file has no content.
    #[error("file is empty: {path}")]
    Empty { path: PathBuf },
}

/// Reads mesh files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskAssets;

impl AssetSource for DiskAssets {
    fn probe(&self, path: &Path) -> Result<u64, AssetError> {
        let file = File::open(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => AssetError::NotFound {
                path: path.to_path_buf(),
            },
            _ => AssetError::Unreadable {
                path: path.to_path_buf(),
                reason: err.to_string(),
            },
        })?;
        let metadata = file.metadata().map_err(|err| AssetError::Unreadable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        if !metadata.is_file() {
            return Err(AssetError::Unreadable {
                path: path.to_path_buf(),
                reason: "not a regular file".to_string(),
            });
        }
        if metadata.len() == 0 {
            return Err(AssetError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(metadata.len())
    }
}

/// In-memory asset set intended for tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAssets {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl InMemoryAssets {
    /// Inserts or replaces a file entry.
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Removes a file entry.
    pub fn remove(&mut self, path: impl AsRef<Path>) {
        self.files.remove(path.as_ref());
    }
}

impl AssetSource for InMemoryAssets {
    fn probe(&self, path: &Path) -> Result<u64, AssetError> {
        let contents = self.files.get(path).ok_or_else(|| AssetError::NotFound {
            path: path.to_path_buf(),
        })?;
        if contents.is_empty() {
            return Err(AssetError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(contents.len() as u64)
    }
}

impl<T: AssetSource + ?Sized> AssetSource for &T {
    fn probe(&self, path: &Path) -> Result<u64, AssetError> {
        (**self).probe(path)
    }
}
