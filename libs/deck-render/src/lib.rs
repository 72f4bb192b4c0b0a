//! # Deck Render
//!
//! Turns the session's configuration into artifacts by driving the external
//! OpenSCAD binary. No geometry is computed here.
//!
//! ## Architecture
//!
//! ```text
//! Session ─┬─ ConfigStore ──→ Assembler ──→ emit_scad ──→ paths.scad_output
//!          └─ OpenScad (ToolRunner) ──→ png / stl / 3mf / ast
//! ```
//!
//! ## Outcomes
//!
//! Missing assets make a job partial (`JobReport::failed`), never an error.
//! Tool failures surface as [`RenderError`] and are not retried.

pub mod batch;
pub mod design_report;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod quality;
pub mod report;
pub mod runner;
pub mod session;

pub use batch::{variants, BatchReport, BatchVariant, VariantOutcome};
pub use design_report::design_report;
pub use diagnostics::{Diagnostic, Severity};
pub use driver::{Artifact, OpenScad, ScriptCheck};
pub use error::{ParseOptionError, RenderError};
pub use quality::{ExportFormat, Quality};
pub use report::{FailedComponent, JobReport, ValidationReport};
pub use runner::{ScriptedRunner, SystemRunner, ToolOutput, ToolRunner};
pub use session::Session;
