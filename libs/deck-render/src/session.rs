//! # Session
//!
//! One explicit context object per process or server: the configuration
//! store, the asset source, the tool runner and the interpreter.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use deck_assembly::InMemoryAssets;
//! use deck_config::ConfigStore;
//! use deck_render::runner::ScriptedRunner;
//! use deck_render::Session;
//!
//! let mut session = Session::new(ConfigStore::default(), Arc::new(ScriptedRunner::succeeding()))
//!     .with_assets(InMemoryAssets::default());
//! let result = session.modify("make it compact").unwrap();
//! assert_eq!(result.matched, vec!["shrink"]);
//! assert_eq!(session.config().dimension("scale"), Some(0.8));
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::constants::OUTPUT_PREFIX;
use deck_assembly::{
    emit_scad, Assembler, Assembly, AssemblyError, AssemblyOptions, AssetSource, DiskAssets,
    UnknownComponentPolicy,
};
use deck_config::{ConfigError, ConfigStore, DeckConfig, ParamValue};
use deck_modify::{Interpretation, KeywordInterpreter, ModificationDelta};
use tracing::{debug, info};

use crate::diagnostics::Diagnostic;
use crate::driver::OpenScad;
use crate::error::RenderError;
use crate::quality::{ExportFormat, Quality};
use crate::report::{failed_components, JobReport, ValidationReport};
use crate::runner::{SystemRunner, ToolRunner};

/// Configuration plus everything needed to turn it into artifacts.
pub struct Session {
    store: ConfigStore,
    assets: Box<dyn AssetSource + Send + Sync>,
    policy: UnknownComponentPolicy,
    runner: Arc<dyn ToolRunner>,
    interpreter: KeywordInterpreter,
    /// Configuration as of the last successful render.
    rendered: Option<DeckConfig>,
    /// Set by edits made through the session, cleared by a render. Survives
    /// a save.
    edited: bool,
}

impl Session {
    /// A session reading meshes from disk.
    pub fn new(store: ConfigStore, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            store,
            assets: Box::new(DiskAssets),
            policy: UnknownComponentPolicy::default(),
            runner,
            interpreter: KeywordInterpreter::default(),
            rendered: None,
            edited: false,
        }
    }

    /// Loads `path` (or defaults when absent) and drives the real binary.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let store = ConfigStore::load_or_default(path)?;
        Ok(Self::new(store, Arc::new(SystemRunner)))
    }

    pub fn with_assets(mut self, assets: impl AssetSource + Send + Sync + 'static) -> Self {
        self.assets = Box::new(assets);
        self
    }

    pub fn with_policy(mut self, policy: UnknownComponentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConfigStore {
        &mut self.store
    }

    pub fn config(&self) -> &DeckConfig {
        self.store.config()
    }

    /// Driver configured from the current `openscad` section.
    pub fn driver(&self) -> OpenScad {
        OpenScad::new(Arc::clone(&self.runner), &self.config().openscad)
    }

    pub fn tool_version(&self) -> Result<String, RenderError> {
        self.driver().version()
    }

    // =========================================================================
    // ASSEMBLY
    // =========================================================================

    pub fn assemble(&self) -> Result<Assembly, AssemblyError> {
        assemble_with(self.config(), self.assets.as_ref(), self.policy)
    }

    /// Assembles and writes the script to `paths.scad_output`.
    pub fn write_script(&self) -> Result<(Assembly, PathBuf), RenderError> {
        let path = PathBuf::from(&self.config().paths.scad_output);
        let assembly = write_script(self.config(), self.assets.as_ref(), self.policy, &path)?;
        Ok((assembly, path))
    }

    // =========================================================================
    // TOOL JOBS
    // =========================================================================

    /// Renders `<prefix>_preview_<quality>.png` and stamps `project.last_render`.
    pub fn render(&mut self, quality: Quality) -> Result<JobReport, RenderError> {
        let (assembly, script) = self.write_script()?;
        let output = self.output_path(&format!("{OUTPUT_PREFIX}_preview_{quality}.png"));
        let artifact = self.driver().render_png(&script, &output, quality)?;
        let report = JobReport::new(script, &assembly, vec![artifact]);
        self.stamp(&report.finished_at)?;
        Ok(report)
    }

    /// Exports the assembly as a mesh file and stamps `project.last_render`.
    pub fn export(&mut self, format: ExportFormat) -> Result<JobReport, RenderError> {
        let (assembly, script) = self.write_script()?;
        let file_name = format!("{OUTPUT_PREFIX}_assembly.{}", format.extension());
        let output = self.output_path(&file_name);
        let artifact = self.driver().export(&script, &output, format)?;
        let report = JobReport::new(script, &assembly, vec![artifact]);
        self.stamp(&report.finished_at)?;
        Ok(report)
    }

    /// Parses the generated script without rendering it.
    pub fn validate(&self) -> Result<ValidationReport, RenderError> {
        let (assembly, script) = self.write_script()?;
        let scratch = tempfile::tempdir().map_err(|e| RenderError::io(std::env::temp_dir(), e))?;
        let ast = scratch.path().join(format!("{OUTPUT_PREFIX}.ast"));

        let mut check = self.driver().check(&script, &ast)?;
        let mut diagnostics: Vec<Diagnostic> = self
            .config()
            .check()
            .into_iter()
            .map(|issue| Diagnostic::warning(format!("{}: {}", issue.key, issue.message)))
            .collect();
        diagnostics.append(&mut check.diagnostics);
        check.diagnostics = diagnostics;

        Ok(ValidationReport {
            script,
            check,
            failed: failed_components(&assembly),
        })
    }

    /// Renders again when auto-render is on and the configuration changed
    /// since the last render, saved or not.
    pub fn rerender_if_dirty(&mut self) -> Result<Option<JobReport>, RenderError> {
        if !self.config().ai.auto_render || !(self.store.is_dirty() || self.edited) {
            return Ok(None);
        }
        if self.rendered.as_ref() == Some(self.store.config()) {
            return Ok(None);
        }
        debug!("configuration changed, re-rendering");
        self.render(Quality::default()).map(Some)
    }

    // =========================================================================
    // MODIFICATION
    // =========================================================================

    pub fn interpret(&self, prompt: &str) -> Interpretation {
        self.interpreter.interpret(prompt)
    }

    /// Applies a delta to the store. Does not save.
    pub fn apply(&mut self, delta: &ModificationDelta) -> Result<(), ConfigError> {
        delta.apply_to(&mut self.store)?;
        self.edited |= !delta.is_empty();
        Ok(())
    }

    /// Interprets a prompt and applies the result.
    pub fn modify(&mut self, prompt: &str) -> Result<Interpretation, ConfigError> {
        let interpretation = self.interpret(prompt);
        self.apply(&interpretation.delta)?;
        Ok(interpretation)
    }

    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) -> Result<(), ConfigError> {
        self.store.set(key, value)?;
        self.edited = true;
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), ConfigError> {
        self.store.save()
    }

    pub(crate) fn assets(&self) -> &(dyn AssetSource + Send + Sync) {
        self.assets.as_ref()
    }

    pub(crate) fn policy(&self) -> UnknownComponentPolicy {
        self.policy
    }

    pub(crate) fn output_path(&self, file_name: &str) -> PathBuf {
        Path::new(&self.config().paths.output_dir).join(file_name)
    }

    /// Records the render time. Written back to the file only when there are
    /// no other unsaved changes.
    fn stamp(&mut self, timestamp: &str) -> Result<(), RenderError> {
        self.store.stamp_render(timestamp);
        if self.store.source().is_some() && !self.store.is_dirty() {
            self.store.save()?;
        }
        self.rendered = Some(self.store.snapshot());
        self.edited = false;
        info!(timestamp, "render stamped");
        Ok(())
    }
}

pub(crate) fn assemble_with(
    config: &DeckConfig,
    assets: &dyn AssetSource,
    policy: UnknownComponentPolicy,
) -> Result<Assembly, AssemblyError> {
    let options = AssemblyOptions::from_config(config).with_policy(policy);
    Assembler::new(assets, options).assemble(config)
}

pub(crate) fn write_script(
    config: &DeckConfig,
    assets: &dyn AssetSource,
    policy: UnknownComponentPolicy,
    path: &Path,
) -> Result<Assembly, RenderError> {
    let assembly = assemble_with(config, assets, policy)?;
    let script = emit_scad(&assembly, &config.project);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RenderError::io(parent, e))?;
    }
    fs::write(path, script).map_err(|e| RenderError::io(path, e))?;
    debug!(path = %path.display(), "wrote assembly script");
    Ok(assembly)
}
