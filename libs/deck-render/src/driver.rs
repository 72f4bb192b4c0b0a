//! # OpenSCAD Driver
//!
//! Builds tool command lines and classifies their outcomes.
//!
//! ## Classification
//!
//! | Exit | Output file       | Result                       |
//! |------|-------------------|------------------------------|
//! | 0    | present, non-empty| `Ok(Artifact)`               |
//! | 0    | missing or empty  | `RenderError::Integrity`     |
//! | != 0 | any               | `RenderError::Process`       |
//! | none | not started       | `RenderError::Spawn`         |

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use deck_config::OpenScadSettings;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::diagnostics::{parse_stderr, Diagnostic};
use crate::error::RenderError;
use crate::quality::{ExportFormat, Quality};
use crate::runner::{ToolOutput, ToolRunner};

/// A file the tool produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Result of parsing a script without rendering it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptCheck {
    pub status: Option<i32>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScriptCheck {
    pub fn passed(&self) -> bool {
        self.status == Some(0) && !self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Invokes the OpenSCAD binary through a [`ToolRunner`].
#[derive(Clone)]
pub struct OpenScad {
    runner: Arc<dyn ToolRunner>,
    binary: String,
    extra_args: Vec<String>,
}

impl std::fmt::Debug for OpenScad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenScad")
            .field("binary", &self.binary)
            .field("extra_args", &self.extra_args)
            .finish_non_exhaustive()
    }
}

impl OpenScad {
    pub fn new(runner: Arc<dyn ToolRunner>, settings: &OpenScadSettings) -> Self {
        Self {
            runner,
            binary: settings.binary.clone(),
            extra_args: settings.extra_args.clone(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// The tool's version line.
    pub fn version(&self) -> Result<String, RenderError> {
        let output = self.run(vec!["--version".to_string()])?;
        if !output.succeeded() {
            return Err(process_error(output));
        }
        // OpenSCAD prints its version on stderr.
        let text = if output.stderr.trim().is_empty() {
            output.stdout
        } else {
            output.stderr
        };
        Ok(text.trim().to_string())
    }

    /// Renders a PNG preview.
    pub fn render_png(
        &self,
        script: &Path,
        output: &Path,
        quality: Quality,
    ) -> Result<Artifact, RenderError> {
        info!(output = %output.display(), %quality, "rendering preview");
        let args = vec![
            "--render".to_string(),
            quality.imgsize_arg(),
            "-o".to_string(),
            path_arg(output),
            path_arg(script),
        ];
        self.produce(args, output)
    }

    /// Exports a mesh file.
    pub fn export(
        &self,
        script: &Path,
        output: &Path,
        format: ExportFormat,
    ) -> Result<Artifact, RenderError> {
        info!(output = %output.display(), %format, "exporting mesh");
        let args = vec![
            "--export-format".to_string(),
            format.extension().to_string(),
            "-o".to_string(),
            path_arg(output),
            path_arg(script),
        ];
        self.produce(args, output)
    }

    /// Parses a script by exporting its AST to `ast_output`.
    ///
    /// A non-zero exit is reported through [`ScriptCheck`] rather than as an
    /// error, so syntax problems come back as diagnostics.
    pub fn check(&self, script: &Path, ast_output: &Path) -> Result<ScriptCheck, RenderError> {
        remove_stale(ast_output)?;
        let args = vec!["-o".to_string(), path_arg(ast_output), path_arg(script)];
        let output = self.run(args)?;
        Ok(ScriptCheck {
            status: output.status,
            diagnostics: parse_stderr(&output.stderr),
        })
    }

    fn produce(&self, args: Vec<String>, output: &Path) -> Result<Artifact, RenderError> {
        remove_stale(output)?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RenderError::io(parent, e))?;
        }

        let result = self.run(args)?;
        if !result.succeeded() {
            warn!(status = ?result.status, "OpenSCAD failed");
            return Err(process_error(result));
        }

        let bytes = match fs::metadata(output) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RenderError::missing_output(output));
            }
            Err(e) => return Err(RenderError::io(output, e)),
        };
        if bytes == 0 {
            return Err(RenderError::empty_output(output));
        }

        info!(output = %output.display(), bytes, "OpenSCAD finished");
        Ok(Artifact {
            path: output.to_path_buf(),
            bytes,
        })
    }

    fn run(&self, mut args: Vec<String>) -> Result<ToolOutput, RenderError> {
        if !self.extra_args.is_empty() {
            let mut full = self.extra_args.clone();
            full.append(&mut args);
            args = full;
        }
        debug!(program = %self.binary, args = ?args, "invoking tool");
        self.runner
            .run(&self.binary, &args)
            .map_err(|source| RenderError::Spawn {
                program: self.binary.clone(),
                source,
            })
    }
}

fn process_error(output: ToolOutput) -> RenderError {
    RenderError::Process {
        status: output.status,
        stderr: output.stderr,
    }
}

fn remove_stale(path: &Path) -> Result<(), RenderError> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale output");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RenderError::io(path, e)),
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
