//! # Batch Variants
//!
//! Renders a fixed set of design variants, each from the session's current
//! configuration plus a fixed delta. Every variant writes its own script,
//! exports an STL and renders a low-quality preview:
//!
//! ```text
//! output/deckforge_<variant>.scad
//! output/deckforge_<variant>.stl
//! output/deckforge_<variant>.png
//! ```
//!
//! A failing variant is reported and the batch moves on.

use config::constants::OUTPUT_PREFIX;
use deck_modify::ModificationDelta;
use tracing::{info, warn};

use crate::driver::Artifact;
use crate::error::RenderError;
use crate::quality::{ExportFormat, Quality};
use crate::report::JobReport;
use crate::session::{write_script, Session};

/// A named variant and the overrides that define it.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchVariant {
    pub name: &'static str,
    pub delta: ModificationDelta,
}

/// The built-in variants: standard, exploded, compact, housing_only.
pub fn variants() -> Vec<BatchVariant> {
    vec![
        BatchVariant {
            name: "standard",
            delta: ModificationDelta::new(),
        },
        BatchVariant {
            name: "exploded",
            delta: [("exploded.enabled", true)].into_iter().collect(),
        },
        BatchVariant {
            name: "compact",
            delta: [("gripOffset", 15.0), ("dimensions.phone_width", 62.0)]
                .into_iter()
                .collect(),
        },
        BatchVariant {
            name: "housing_only",
            delta: [
                "visibility.buttons",
                "visibility.left_joystick",
                "visibility.right_joystick",
                "visibility.trigger_mounts",
            ]
            .into_iter()
            .map(|key| (key, false))
            .collect(),
        },
    ]
}

/// Outcome of one variant.
#[derive(Debug)]
pub struct VariantOutcome {
    pub name: &'static str,
    pub result: Result<JobReport, RenderError>,
}

/// Outcomes of a whole batch, in variant order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<VariantOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &VariantOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// Files written by the variants that succeeded.
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .flat_map(|job| job.artifacts.iter().cloned())
            .collect()
    }
}

impl Session {
    /// Renders every built-in variant. Does not modify the store.
    pub fn batch(&self) -> BatchReport {
        self.batch_variants(&variants())
    }

    pub fn batch_variants(&self, variants: &[BatchVariant]) -> BatchReport {
        let mut report = BatchReport::default();
        for variant in variants {
            let result = self.render_variant(variant);
            match &result {
                Ok(job) => info!(
                    variant = variant.name,
                    artifacts = job.artifacts.len(),
                    "variant rendered"
                ),
                Err(error) => warn!(variant = variant.name, %error, "variant failed"),
            }
            report.outcomes.push(VariantOutcome {
                name: variant.name,
                result,
            });
        }
        report
    }

    fn render_variant(&self, variant: &BatchVariant) -> Result<JobReport, RenderError> {
        let config = variant.delta.applied(self.config())?;
        let stem = format!("{OUTPUT_PREFIX}_{}", variant.name);
        let script = self.output_path(&format!("{stem}.scad"));

        let assembly = write_script(&config, self.assets(), self.policy(), &script)?;
        let driver = self.driver();
        let mesh_path = self.output_path(&format!("{stem}.stl"));
        let mesh = driver.export(&script, &mesh_path, ExportFormat::Stl)?;
        let preview_path = self.output_path(&format!("{stem}.png"));
        let preview = driver.render_png(&script, &preview_path, Quality::Low)?;

        Ok(JobReport::new(script, &assembly, vec![mesh, preview]))
    }
}
