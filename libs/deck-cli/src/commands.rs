//! One function per subcommand. Each writes its human-readable report to
//! `out` and returns whether the command succeeded.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use deck_assembly::emit_scad;
use deck_catalog::{build, inspect as inspect_mesh, Source};
use deck_config::ParamValue;
use deck_render::{
    Diagnostic, ExportFormat, FailedComponent, JobReport, Quality, Session, Severity,
};

/// Exit status of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

// =============================================================================
// TOOL JOBS
// =============================================================================

pub fn render(session: &mut Session, quality: Quality, out: &mut dyn Write) -> Result<Outcome> {
    let report = session
        .render(quality)
        .with_context(|| format!("{quality} quality render failed"))?;
    print_job(out, &report)?;
    Ok(Outcome::Success)
}

pub fn export(
    session: &mut Session,
    format: ExportFormat,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let report = session
        .export(format)
        .with_context(|| format!("{format} export failed"))?;
    print_job(out, &report)?;
    Ok(Outcome::Success)
}

pub fn validate(session: &Session, out: &mut dyn Write) -> Result<Outcome> {
    let report = session.validate().context("validation could not run")?;
    writeln!(out, "Script: {}", report.script.display())?;
    for diagnostic in &report.check.diagnostics {
        print_diagnostic(out, diagnostic)?;
    }
    print_failures(out, &report.failed)?;

    if report.passed() {
        writeln!(out, "Validation passed")?;
        Ok(Outcome::Success)
    } else {
        writeln!(out, "Validation failed")?;
        Ok(Outcome::Failure)
    }
}

pub fn batch(session: &Session, out: &mut dyn Write) -> Result<Outcome> {
    let report = session.batch();
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(job) => {
                writeln!(out, "[{}]", outcome.name)?;
                print_job(out, job)?;
            }
            Err(err) => writeln!(out, "[{}] failed: {err}", outcome.name)?,
        }
    }
    writeln!(
        out,
        "{} of {} variants rendered",
        report.succeeded(),
        report.outcomes.len()
    )?;
    let summary = session.write_design_report(&report.artifacts())?;
    writeln!(out, "Wrote {}", summary.display())?;

    if report.failed().next().is_some() {
        Ok(Outcome::Failure)
    } else {
        Ok(Outcome::Success)
    }
}

/// Writes the design report for the current configuration.
pub fn report(session: &Session, out: &mut dyn Write) -> Result<Outcome> {
    let path = session.write_design_report(&[])?;
    writeln!(out, "Wrote {}", path.display())?;
    Ok(Outcome::Success)
}

// =============================================================================
// SCRIPT
// =============================================================================

pub fn assemble(session: &Session, to_stdout: bool, out: &mut dyn Write) -> Result<Outcome> {
    if to_stdout {
        let assembly = session.assemble()?;
        out.write_all(emit_scad(&assembly, &session.config().project).as_bytes())?;
        return Ok(Outcome::Success);
    }

    let (assembly, path) = session.write_script()?;
    writeln!(
        out,
        "Wrote {} ({} components)",
        path.display(),
        assembly.operations().len()
    )?;
    for failure in &assembly.failures {
        writeln!(out, "  skipped {}: {}", failure.component, failure.error)?;
    }
    Ok(Outcome::Success)
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Prints the delta a prompt produces. With `apply`, applies and saves it,
/// then re-renders when auto-render is on. A failed re-render keeps the saved
/// change.
pub fn modify(
    session: &mut Session,
    prompt: &str,
    apply: bool,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let interpretation = session.interpret(prompt);
    if interpretation.is_empty() {
        writeln!(out, "No modification recognized")?;
        return Ok(Outcome::Success);
    }

    writeln!(out, "Rules: {}", interpretation.matched.join(", "))?;
    for (key, value) in interpretation.delta.iter() {
        writeln!(out, "  {key} = {value}")?;
    }
    if !apply {
        return Ok(Outcome::Success);
    }

    session.apply(&interpretation.delta)?;
    session.save()?;
    writeln!(out, "Configuration saved")?;
    if let Some(report) = session.rerender_if_dirty().context("auto-render failed")? {
        print_job(out, &report)?;
    }
    Ok(Outcome::Success)
}

pub fn config_get(session: &Session, key: &str, out: &mut dyn Write) -> Result<Outcome> {
    let value = session.store().get(key)?;
    writeln!(out, "{value}")?;
    Ok(Outcome::Success)
}

pub fn config_set(
    session: &mut Session,
    key: &str,
    raw: &str,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let value = ParamValue::parse(raw);
    session.set(key, value.clone())?;
    session.save()?;
    writeln!(out, "{key} = {value}")?;
    Ok(Outcome::Success)
}

pub fn status(session: &Session, out: &mut dyn Write) -> Result<Outcome> {
    let config = session.config();
    let tool = session
        .tool_version()
        .unwrap_or_else(|err| format!("unavailable ({err})"));

    writeln!(out, "Project:     {} {}", config.project.name, config.project.version)?;
    if let Some(source) = session.store().source() {
        writeln!(out, "Config:      {}", source.display())?;
    }
    writeln!(out, "OpenSCAD:    {tool}")?;
    writeln!(
        out,
        "Last render: {}",
        config.project.last_render.as_deref().unwrap_or("never")
    )?;
    writeln!(out, "Exploded:    {}", config.exploded.enabled)?;
    let hidden: Vec<&str> = config
        .visibility
        .iter()
        .filter(|(_, visible)| !**visible)
        .map(|(name, _)| name.as_str())
        .collect();
    if !hidden.is_empty() {
        writeln!(out, "Hidden:      {}", hidden.join(", "))?;
    }
    for issue in config.check() {
        writeln!(out, "warning: {}: {}", issue.key, issue.message)?;
    }
    Ok(Outcome::Success)
}

// =============================================================================
// MESHES
// =============================================================================

pub fn catalog(session: &Session, out: &mut dyn Write) -> Result<Outcome> {
    let paths = &session.config().paths;
    let catalog = build(&Source::from_paths(paths))?;
    let (catalog_path, imports_path) = catalog.write_to(Path::new(&paths.output_dir))?;

    for (group, models) in &catalog.groups {
        writeln!(out, "{group}: {} models", models.len())?;
        for model in models.iter().filter(|m| m.error.is_some()) {
            writeln!(
                out,
                "  unreadable {}: {}",
                model.name,
                model.error.as_deref().unwrap_or_default()
            )?;
        }
    }
    writeln!(out, "Wrote {}", catalog_path.display())?;
    writeln!(out, "Wrote {}", imports_path.display())?;
    Ok(Outcome::Success)
}

/// Summarizes each file. Keeps going past unreadable files and fails at the
/// end if there were any.
pub fn inspect(files: &[PathBuf], out: &mut dyn Write) -> Result<Outcome> {
    let mut outcome = Outcome::Success;
    for path in files {
        match inspect_mesh(path) {
            Ok(mesh) => {
                let size = mesh.size();
                writeln!(
                    out,
                    "{}: {} triangles, {} vertices, {:.2} x {:.2} x {:.2}",
                    path.display(),
                    mesh.triangles,
                    mesh.vertices,
                    size.x,
                    size.y,
                    size.z
                )?;
            }
            Err(err) => {
                writeln!(out, "{err}")?;
                outcome = Outcome::Failure;
            }
        }
    }
    Ok(outcome)
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_job(out: &mut dyn Write, report: &JobReport) -> std::io::Result<()> {
    for artifact in &report.artifacts {
        writeln!(out, "Wrote {} ({} bytes)", artifact.path.display(), artifact.bytes)?;
    }
    print_failures(out, &report.failed)?;
    for name in &report.ignored_layout {
        writeln!(out, "  ignored layout entry: {name}")?;
    }
    Ok(())
}

fn print_failures(out: &mut dyn Write, failed: &[FailedComponent]) -> std::io::Result<()> {
    if failed.is_empty() {
        return Ok(());
    }
    writeln!(out, "Partial assembly, {} component(s) skipped:", failed.len())?;
    for failure in failed {
        writeln!(out, "  {}: {}", failure.component, failure.error)?;
    }
    Ok(())
}

fn print_diagnostic(out: &mut dyn Write, diagnostic: &Diagnostic) -> std::io::Result<()> {
    let label = match diagnostic.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    match diagnostic.line {
        Some(line) => writeln!(out, "{label} (line {line}): {}", diagnostic.message)?,
        None => writeln!(out, "{label}: {}", diagnostic.message)?,
    }
    if let Some(hint) = &diagnostic.hint {
        writeln!(out, "  hint: {hint}")?;
    }
    Ok(())
}
