//! DeckForge command line
//!
//! # Usage
//!
//! ```bash
//! deckforge render --quality high
//! deckforge export --format 3mf
//! deckforge modify "make the grips smaller and hide the buttons" --apply
//! deckforge config set dimensions.case_length 300
//! deckforge inspect assets/housing/*.STL
//! deckforge batch
//! deckforge serve --port 8080
//! ```
//!
//! Exit status is 0 on success, including assemblies with missing assets,
//! and 1 on any error.

mod commands;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::constants::{DEFAULT_CONFIG_FILE, DEFAULT_SERVER_PORT};
use deck_render::{ExportFormat, Quality, Session};
use tracing_subscriber::EnvFilter;

use crate::commands::Outcome;

#[derive(Debug, Parser)]
#[command(name = "deckforge")]
#[command(version)]
#[command(about = "Parametric CAD pipeline for a DIY handheld console case")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file
    #[arg(long, short, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a PNG preview of the assembly
    Render {
        /// Preview size: low, medium or high
        #[arg(long, short, default_value_t = Quality::Medium)]
        quality: Quality,
    },

    /// Export the assembly as a printable mesh
    Export {
        /// Mesh format: stl or 3mf
        #[arg(long, short, default_value_t = ExportFormat::Stl)]
        format: ExportFormat,
    },

    /// Catalog the housing and button meshes
    Catalog,

    /// Check the configuration and let OpenSCAD parse the script
    Validate,

    /// Generate the OpenSCAD script without running OpenSCAD
    Assemble {
        /// Print the script instead of writing `paths.scad_output`
        #[arg(long)]
        stdout: bool,
    },

    /// Interpret a plain-language modification
    Modify {
        prompt: String,

        /// Apply the changes and save the configuration
        #[arg(long)]
        apply: bool,
    },

    /// Read or write one configuration value
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Summarize STL files
    Inspect {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Render the standard, exploded, compact and housing-only variants
    Batch,

    /// Write a Markdown summary of the design parameters
    Report,

    /// Show the tool version and configuration summary
    Status,

    /// Serve the web viewer and the regenerate endpoint
    Serve {
        #[arg(long, short, default_value_t = DEFAULT_SERVER_PORT)]
        port: u16,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print a value, e.g. `dimensions.case_length`
    Get { key: String },
    /// Set a value and save (`true`/`false`, numbers, or text)
    Set { key: String, value: String },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli, &mut io::stdout().lock()) {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli, out: &mut dyn Write) -> Result<Outcome> {
    let open = || Session::open(&cli.config);
    match cli.command {
        Command::Inspect { files } => commands::inspect(&files, out),
        Command::Render { quality } => commands::render(&mut open()?, quality, out),
        Command::Export { format } => commands::export(&mut open()?, format, out),
        Command::Catalog => commands::catalog(&open()?, out),
        Command::Validate => commands::validate(&open()?, out),
        Command::Assemble { stdout } => commands::assemble(&open()?, stdout, out),
        Command::Modify { prompt, apply } => commands::modify(&mut open()?, &prompt, apply, out),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => commands::config_get(&open()?, &key, out),
            ConfigAction::Set { key, value } => {
                commands::config_set(&mut open()?, &key, &value, out)
            }
        },
        Command::Batch => commands::batch(&open()?, out),
        Command::Report => commands::report(&open()?, out),
        Command::Status => commands::status(&open()?, out),
        Command::Serve { port } => {
            let session = open()?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(deck_server::run_server(session, port))?;
            Ok(Outcome::Success)
        }
    }
}

#[cfg(test)]
mod tests;
