//! Argument parsing and command output, with a scripted OpenSCAD.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use deck_assembly::component::SourceRef;
use deck_assembly::{InMemoryAssets, COMPONENTS};
use deck_config::{ConfigStore, ParamValue};
use deck_render::runner::Scripted;
use deck_render::{ExportFormat, Quality, ScriptedRunner, Session};
use stl_io::{Normal, Triangle, Vertex};
use tempfile::TempDir;

use super::*;
use crate::commands::{self, Outcome};

// =============================================================================
// HELPERS
// =============================================================================

fn full_assets() -> InMemoryAssets {
    let mut assets = InMemoryAssets::default();
    for def in COMPONENTS {
        if let SourceRef::Mesh(relative) = def.source {
            assets.insert(Path::new("assets").join(relative), b"solid mesh".to_vec());
        }
    }
    assets
}

/// A session bound to `<dir>/config.yaml` writing into `<dir>/output`.
fn session_with(dir: &TempDir, runner: ScriptedRunner, assets: InMemoryAssets) -> Session {
    let mut store = ConfigStore::load_or_default(dir.path().join("config.yaml")).unwrap();
    let out = dir.path().join("output");
    store
        .set("paths.output_dir", out.display().to_string())
        .unwrap();
    store
        .set("paths.scad_output", out.join("deck.scad").display().to_string())
        .unwrap();
    store.save().unwrap();
    Session::new(store, Arc::new(runner)).with_assets(assets)
}

fn session(dir: &TempDir) -> Session {
    session_with(dir, ScriptedRunner::succeeding(), full_assets())
}

fn text(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).unwrap()
}

fn reload(dir: &TempDir) -> ConfigStore {
    ConfigStore::load(dir.path().join("config.yaml")).unwrap()
}

// =============================================================================
// ARGUMENTS
// =============================================================================

#[test]
fn test_parse_defaults() {
    let cli = Cli::try_parse_from(["deckforge", "render"]).unwrap();
    assert_eq!(cli.config, PathBuf::from("config.yaml"));
    assert_eq!(cli.verbose, 0);
    assert!(matches!(cli.command, Command::Render { quality: Quality::Medium }));

    let cli = Cli::try_parse_from(["deckforge", "export"]).unwrap();
    assert!(matches!(cli.command, Command::Export { format: ExportFormat::Stl }));

    let cli = Cli::try_parse_from(["deckforge", "serve"]).unwrap();
    assert!(matches!(cli.command, Command::Serve { port: 8080 }));
}

#[test]
fn test_parse_options() {
    let cli = Cli::try_parse_from([
        "deckforge", "export", "--format", "3mf", "--config", "deck.yaml", "-vv",
    ])
    .unwrap();
    assert!(matches!(cli.command, Command::Export { format: ExportFormat::ThreeMf }));
    assert_eq!(cli.config, PathBuf::from("deck.yaml"));
    assert_eq!(cli.verbose, 2);

    let cli = Cli::try_parse_from(["deckforge", "render", "-q", "high"]).unwrap();
    assert!(matches!(cli.command, Command::Render { quality: Quality::High }));
}

#[test]
fn test_parse_rejects_bad_values() {
    assert!(Cli::try_parse_from(["deckforge", "render", "--quality", "ultra"]).is_err());
    assert!(Cli::try_parse_from(["deckforge", "export", "--format", "obj"]).is_err());
    assert!(Cli::try_parse_from(["deckforge", "inspect"]).is_err());
    assert!(Cli::try_parse_from(["deckforge", "config", "set", "dimensions.scale"]).is_err());
}

#[test]
fn test_parse_modify_and_config() {
    let cli = Cli::try_parse_from(["deckforge", "modify", "make it compact", "--apply"]).unwrap();
    match cli.command {
        Command::Modify { prompt, apply } => {
            assert_eq!(prompt, "make it compact");
            assert!(apply);
        }
        other => panic!("unexpected command {other:?}"),
    }

    let cli =
        Cli::try_parse_from(["deckforge", "config", "set", "visibility.buttons", "false"]).unwrap();
    match cli.command {
        Command::Config {
            action: ConfigAction::Set { key, value },
        } => {
            assert_eq!(key, "visibility.buttons");
            assert_eq!(value, "false");
        }
        other => panic!("unexpected command {other:?}"),
    }
}

// =============================================================================
// TOOL JOBS
// =============================================================================

#[test]
fn test_export_partial_is_success() {
    let dir = TempDir::new().unwrap();
    let mut assets = full_assets();
    for def in COMPONENTS.iter().filter(|def| def.id == "housing_front") {
        if let SourceRef::Mesh(relative) = def.source {
            assets.remove(Path::new("assets").join(relative));
        }
    }
    let mut session = session_with(&dir, ScriptedRunner::succeeding(), assets);

    let mut out = Vec::new();
    let outcome = commands::export(&mut session, ExportFormat::Stl, &mut out).unwrap();
    assert_eq!(outcome, Outcome::Success);

    let out = text(out);
    assert!(out.contains("deckforge_assembly.stl"));
    assert!(out.contains("Partial assembly, 1 component(s) skipped"));
    assert!(out.contains("housing_front"));
}

#[test]
fn test_render_failure_is_error() {
    let dir = TempDir::new().unwrap();
    let runner = ScriptedRunner::new(Scripted::Exit {
        status: 1,
        stderr: "ERROR: CGAL error\n".to_string(),
    });
    let mut session = session_with(&dir, runner, full_assets());

    let err = commands::render(&mut session, Quality::Low, &mut Vec::new()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.starts_with("low quality render failed"));
    assert!(message.contains("CGAL error"));
}

#[test]
fn test_validate_passes() {
    let dir = TempDir::new().unwrap();
    let session = session(&dir);

    let mut out = Vec::new();
    assert_eq!(commands::validate(&session, &mut out).unwrap(), Outcome::Success);
    assert!(text(out).contains("Validation passed"));
}

#[test]
fn test_validate_reports_tool_errors() {
    let dir = TempDir::new().unwrap();
    let runner = ScriptedRunner::new(Scripted::Exit {
        status: 1,
        stderr: "ERROR: Parser error in file deck.scad, line 12: syntax error\n".to_string(),
    });
    let session = session_with(&dir, runner, full_assets());

    let mut out = Vec::new();
    assert_eq!(commands::validate(&session, &mut out).unwrap(), Outcome::Failure);
    let out = text(out);
    assert!(out.contains("error (line 12)"));
    assert!(out.contains("Validation failed"));
}

#[test]
fn test_batch_failure_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let session = session_with(&dir, ScriptedRunner::new(Scripted::NotFound), full_assets());

    let mut out = Vec::new();
    assert_eq!(commands::batch(&session, &mut out).unwrap(), Outcome::Failure);
    let out = text(out);
    assert!(out.contains("[standard] failed"));
    assert!(out.contains("0 of 4 variants rendered"));
}

#[test]
fn test_batch_success() {
    let dir = TempDir::new().unwrap();
    let session = session(&dir);

    let mut out = Vec::new();
    assert_eq!(commands::batch(&session, &mut out).unwrap(), Outcome::Success);
    let out = text(out);
    assert!(out.contains("4 of 4 variants rendered"));
    assert!(out.contains("design_report.md"));

    let summary = fs::read_to_string(dir.path().join("output/design_report.md")).unwrap();
    assert!(summary.contains("deckforge_housing_only.png"));
}

#[test]
fn test_report_writes_summary() {
    let dir = TempDir::new().unwrap();
    let session = session(&dir);

    let mut out = Vec::new();
    assert_eq!(commands::report(&session, &mut out).unwrap(), Outcome::Success);
    assert!(text(out).starts_with("Wrote"));
    assert!(dir.path().join("output/design_report.md").exists());
}

// =============================================================================
// SCRIPT
// =============================================================================

#[test]
fn test_assemble_to_stdout_does_not_write() {
    let dir = TempDir::new().unwrap();
    let session = session(&dir);

    let mut out = Vec::new();
    commands::assemble(&session, true, &mut out).unwrap();
    assert!(text(out).starts_with("// Generated by deckforge"));
    assert!(!dir.path().join("output/deck.scad").exists());
}

#[test]
fn test_assemble_writes_script() {
    let dir = TempDir::new().unwrap();
    let session = session(&dir);

    let mut out = Vec::new();
    commands::assemble(&session, false, &mut out).unwrap();
    assert!(text(out).starts_with("Wrote"));
    assert!(dir.path().join("output/deck.scad").exists());
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn test_modify_preview_leaves_config_alone() {
    let dir = TempDir::new().unwrap();
    let mut session = session(&dir);

    let mut out = Vec::new();
    commands::modify(&mut session, "make it compact", false, &mut out).unwrap();
    let out = text(out);
    assert!(out.contains("Rules: shrink"));
    assert!(out.contains("scale = 0.8"));
    assert!(!session.store().is_dirty());
    assert_eq!(reload(&dir).config().dimension("scale"), Some(1.0));
}

#[test]
fn test_modify_apply_saves() {
    let dir = TempDir::new().unwrap();
    let mut session = session(&dir);

    let mut out = Vec::new();
    commands::modify(
        &mut session,
        "Make the grips smaller and hide the buttons",
        true,
        &mut out,
    )
    .unwrap();
    assert!(text(out).contains("Configuration saved"));

    let saved = reload(&dir);
    assert_eq!(saved.config().dimension("scale"), Some(0.8));
    assert_eq!(saved.config().dimension("grip_offset"), Some(15.0));
    assert_eq!(saved.get("visibility.buttons").unwrap(), ParamValue::Bool(false));
}

#[test]
fn test_modify_nothing_recognized() {
    let dir = TempDir::new().unwrap();
    let mut session = session(&dir);

    let mut out = Vec::new();
    commands::modify(&mut session, "paint it blue", true, &mut out).unwrap();
    assert_eq!(text(out), "No modification recognized\n");
    assert!(!session.store().is_dirty());
}

#[test]
fn test_modify_auto_render() {
    let dir = TempDir::new().unwrap();
    let mut session = session(&dir);
    session.set("ai.auto_render", true).unwrap();

    let mut out = Vec::new();
    commands::modify(&mut session, "show an exploded view", true, &mut out).unwrap();
    assert!(text(out).contains("deckforge_preview_medium.png"));
    assert!(reload(&dir).config().project.last_render.is_some());
}

#[test]
fn test_modify_keeps_saved_change_when_auto_render_fails() {
    let dir = TempDir::new().unwrap();
    let runner = ScriptedRunner::new(Scripted::Exit {
        status: 1,
        stderr: "ERROR: CGAL error\n".to_string(),
    });
    let mut session = session_with(&dir, runner, full_assets());
    session.set("ai.auto_render", true).unwrap();

    let mut out = Vec::new();
    let err = commands::modify(&mut session, "hide the buttons", true, &mut out).unwrap_err();
    assert!(format!("{err:#}").starts_with("auto-render failed"));
    assert!(text(out).contains("Configuration saved"));

    let saved = reload(&dir);
    assert_eq!(saved.get("visibility.buttons").unwrap(), ParamValue::Bool(false));
    assert!(saved.config().project.last_render.is_none());
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();
    let mut session = session(&dir);

    let mut out = Vec::new();
    commands::config_set(&mut session, "dimensions.case_length", "300", &mut out).unwrap();
    assert_eq!(text(out), "dimensions.case_length = 300\n");
    assert_eq!(
        reload(&dir).get("dimensions.case_length").unwrap(),
        ParamValue::Number(300.0)
    );

    let mut out = Vec::new();
    commands::config_get(&session, "dimensions.case_length", &mut out).unwrap();
    assert_eq!(text(out), "300\n");
}

#[test]
fn test_config_errors() {
    let dir = TempDir::new().unwrap();
    let mut session = session(&dir);

    let err = commands::config_get(&session, "printing.colour", &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("printing.colour"));

    let err = commands::config_set(&mut session, "exploded.enabled", "very", &mut Vec::new())
        .unwrap_err();
    assert!(err.to_string().contains("Type mismatch"));
}

#[test]
fn test_status() {
    let dir = TempDir::new().unwrap();
    let mut session = session(&dir);
    session.set("visibility.buttons", false).unwrap();

    let mut out = Vec::new();
    commands::status(&session, &mut out).unwrap();
    let out = text(out);
    assert!(out.contains("OpenSCAD:    OpenSCAD version 2021.01"));
    assert!(out.contains("Last render: never"));
    assert!(out.contains("Hidden:      buttons"));
}

#[test]
fn test_status_without_tool() {
    let dir = TempDir::new().unwrap();
    let session = session_with(&dir, ScriptedRunner::new(Scripted::NotFound), full_assets());

    let mut out = Vec::new();
    assert_eq!(commands::status(&session, &mut out).unwrap(), Outcome::Success);
    assert!(text(out).contains("OpenSCAD:    unavailable"));
}

// =============================================================================
// MESHES
// =============================================================================

#[test]
fn test_inspect_reports_each_file() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("Panel.stl");
    let triangle = Triangle {
        normal: Normal::new([0.0, 0.0, 1.0]),
        vertices: [
            Vertex::new([0.0, 0.0, 0.0]),
            Vertex::new([4.0, 0.0, 0.0]),
            Vertex::new([0.0, 2.0, 1.0]),
        ],
    };
    let mut file = File::create(&good).unwrap();
    stl_io::write_stl(&mut file, [triangle].iter()).unwrap();
    let bad = dir.path().join("Broken.stl");
    fs::write(&bad, b"garbage").unwrap();

    let mut out = Vec::new();
    let outcome = commands::inspect(&[good, bad], &mut out).unwrap();
    assert_eq!(outcome, Outcome::Failure);

    let out = text(out);
    assert!(out.contains("1 triangles, 3 vertices, 4.00 x 2.00 x 1.00"));
    assert!(out.contains("Broken.stl"));
}

#[test]
fn test_catalog_writes_outputs() {
    let dir = TempDir::new().unwrap();
    let mut session = session(&dir);
    let housing = dir.path().join("assets/housing");
    fs::create_dir_all(&housing).unwrap();
    fs::write(housing.join("Back_Cover.STL"), b"").unwrap();
    session
        .set("paths.stl_import", housing.display().to_string())
        .unwrap();
    session
        .set(
            "paths.buttons_stl",
            dir.path().join("missing").display().to_string(),
        )
        .unwrap();

    let mut out = Vec::new();
    assert_eq!(commands::catalog(&session, &mut out).unwrap(), Outcome::Success);
    let out = text(out);
    assert!(out.contains("housing_stl: 1 models"));
    assert!(out.contains("buttons_stl: 0 models"));
    assert!(out.contains("unreadable Back_Cover"));
    assert!(dir.path().join("output/model_catalog.json").exists());
    assert!(dir.path().join("output/model_imports.scad").exists());
}
