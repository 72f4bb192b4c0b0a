//! # Render Errors
//!
//! Outcome classification for external tool invocations. None of these are
//! retried.

use std::io;
use std::path::{Path, PathBuf};

use deck_assembly::AssemblyError;
use deck_config::ConfigError;
use thiserror::Error;

/// Errors produced while driving the CAD tool.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The tool exited non-zero. `stderr` is the tool's own text, verbatim.
    #[error("OpenSCAD exited with {}:\n{stderr}", describe_status(*.status))]
    Process { status: Option<i32>, stderr: String },

    /// The tool reported success but the output file is missing or empty.
    #[error("OpenSCAD reported success but {path} {reason}")]
    Integrity { path: PathBuf, reason: &'static str },

    /// The tool could not be started.
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RenderError {
    /// Creates an I/O error for a path.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Output file absent after a successful exit.
    pub fn missing_output(path: impl Into<PathBuf>) -> Self {
        Self::Integrity {
            path: path.into(),
            reason: "was not created",
        }
    }

    /// Output file present but zero-length after a successful exit.
    pub fn empty_output(path: impl Into<PathBuf>) -> Self {
        Self::Integrity {
            path: path.into(),
            reason: "is empty",
        }
    }
}

fn describe_status(status: Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// An option value that names no known preset.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown {kind} `{value}` (expected one of: {expected})")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}
