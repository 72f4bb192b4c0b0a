//! # Design Report
//!
//! A Markdown summary of the design parameters, the mockup dimensions and the
//! files a run produced, written to `<output_dir>/design_report.md`.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use config::constants::DESIGN_REPORT_FILE_NAME;
use deck_config::DeckConfig;
use tracing::info;

use crate::driver::Artifact;
use crate::error::RenderError;
use crate::session::Session;

/// Renders the report. `generated_at` is printed as given.
pub fn design_report(config: &DeckConfig, artifacts: &[Artifact], generated_at: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {} Design Report", config.project.name);
    let _ = writeln!(out, "Generated: {generated_at}");
    out.push('\n');

    out.push_str("## Design Parameters\n");
    for (name, value) in &config.dimensions {
        let _ = writeln!(out, "- **dimensions.{name}**: {value}");
    }
    let _ = writeln!(out, "- **exploded.enabled**: {}", config.exploded.enabled);
    for (name, shown) in config.visibility.iter().filter(|(_, shown)| !**shown) {
        let _ = writeln!(out, "- **visibility.{name}**: {shown}");
    }
    out.push('\n');

    let dim = |name: &str| config.dimension(name).unwrap_or(0.0);
    out.push_str("## Component Dimensions\n");
    let _ = writeln!(
        out,
        "- Phone: {:.1} x {:.1} x {:.1} mm",
        dim("phone_length"),
        dim("phone_width"),
        dim("phone_depth")
    );
    let _ = writeln!(
        out,
        "- Battery: {:.1} x {:.1} x {:.1} mm",
        dim("battery_length"),
        dim("battery_width"),
        dim("battery_height")
    );
    let _ = writeln!(out, "- Grip Extension: {:.1} mm", dim("grip_offset"));
    out.push('\n');

    out.push_str("## Files Generated\n");
    if artifacts.is_empty() {
        out.push_str("- none\n");
    }
    for artifact in artifacts {
        let _ = writeln!(
            out,
            "- {} ({} bytes)",
            artifact.path.display(),
            artifact.bytes
        );
    }
    out
}

impl Session {
    /// Writes the report for the current configuration.
    pub fn write_design_report(&self, artifacts: &[Artifact]) -> Result<PathBuf, RenderError> {
        let path = self.output_path(DESIGN_REPORT_FILE_NAME);
        let generated_at = chrono::Utc::now().to_rfc3339();
        let report = design_report(self.config(), artifacts, &generated_at);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RenderError::io(parent, e))?;
        }
        fs::write(&path, report).map_err(|e| RenderError::io(&path, e))?;
        info!(path = %path.display(), artifacts = artifacts.len(), "design report written");
        Ok(path)
    }
}
