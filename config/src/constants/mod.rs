//! Centralized configuration values shared across the DeckForge crates.
//!
//! Each public item documents its purpose and, where useful, a minimal usage
//! example so downstream crates avoid scattering literals.

// =============================================================================
// FILES AND PATHS
// =============================================================================

/// Configuration file read when no `--config` flag is given.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_CONFIG_FILE;
/// assert!(DEFAULT_CONFIG_FILE.ends_with(".yaml"));
/// ```
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Directory receiving rendered previews, exports and generated scripts.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Path of the generated assembly script.
pub const DEFAULT_SCAD_OUTPUT: &str = "output/deckforge_assembly.scad";

/// Root directory that relative mesh paths in the component table resolve against.
pub const DEFAULT_ASSET_ROOT: &str = "assets";

/// Housing mesh directory scanned by the catalog, relative to the working directory.
pub const DEFAULT_STL_IMPORT_DIR: &str = "assets/housing";

/// Button mesh directory scanned by the catalog.
pub const DEFAULT_BUTTONS_STL_DIR: &str = "assets/buttons";

/// Static files served by the viewer endpoint.
pub const DEFAULT_WEB_ROOT: &str = "web_viewer";

/// File name of the JSON catalog written by `catalog`.
pub const CATALOG_FILE_NAME: &str = "model_catalog.json";

/// File name of the generated OpenSCAD import module written by `catalog`.
pub const IMPORTS_FILE_NAME: &str = "model_imports.scad";

/// File name of the Markdown design summary written after a batch.
pub const DESIGN_REPORT_FILE_NAME: &str = "design_report.md";

/// Prefix for every artifact written into the output directory.
///
/// # Examples
/// ```
/// use config::constants::OUTPUT_PREFIX;
/// let name = format!("{OUTPUT_PREFIX}_standard.stl");
/// assert_eq!(name, "deckforge_standard.stl");
/// ```
pub const OUTPUT_PREFIX: &str = "deckforge";

// =============================================================================
// EXTERNAL TOOL
// =============================================================================

/// Name of the OpenSCAD executable looked up on `PATH`.
pub const DEFAULT_OPENSCAD_BINARY: &str = "openscad";

/// `$fn` written at the top of generated scripts.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_SEGMENTS;
/// assert!(DEFAULT_SEGMENTS >= 12);
/// ```
pub const DEFAULT_SEGMENTS: u32 = 64;

/// Preview raster size for `--quality low`.
pub const PREVIEW_SIZE_LOW: [u32; 2] = [800, 600];

/// Preview raster size for `--quality medium`.
pub const PREVIEW_SIZE_MEDIUM: [u32; 2] = [1200, 900];

/// Preview raster size for `--quality high`.
pub const PREVIEW_SIZE_HIGH: [u32; 2] = [1920, 1440];

// =============================================================================
// ASSEMBLY
// =============================================================================

/// Multiplier applied to every placement offset when exploded view is on.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_EXPLODE_MULTIPLIER;
/// let base = [-80.0, -30.0, 0.0];
/// let exploded = base.map(|v| v * DEFAULT_EXPLODE_MULTIPLIER);
/// assert_eq!(exploded, [-160.0, -60.0, 0.0]);
/// ```
pub const DEFAULT_EXPLODE_MULTIPLIER: f64 = 2.0;

/// Uniform scale that leaves the assembly untouched.
pub const NEUTRAL_SCALE: f64 = 1.0;

/// Tolerance below which a scale factor counts as neutral.
///
/// # Examples
/// ```
/// use config::constants::{NEUTRAL_SCALE, SCALE_EPSILON};
/// let scale = 1.0 + 1e-12;
/// assert!((scale - NEUTRAL_SCALE).abs() < SCALE_EPSILON);
/// ```
pub const SCALE_EPSILON: f64 = 1e-9;

/// Grip extension beyond the centre body in the stock layout, in mm.
pub const DEFAULT_GRIP_OFFSET: f64 = 20.0;

// =============================================================================
// KEYWORD DELTAS
// =============================================================================

/// Scale applied by the "smaller"/"compact" rule.
pub const SHRINK_SCALE: f64 = 0.8;

/// Grip offset applied by the "smaller"/"compact" rule.
pub const COMPACT_GRIP_OFFSET: f64 = 15.0;

/// Scale applied by the "larger"/"bigger" rule.
pub const GROW_SCALE: f64 = 1.2;

/// Grip offset applied by the "larger"/"bigger" rule.
pub const EXTENDED_GRIP_OFFSET: f64 = 25.0;

// =============================================================================
// SERVER
// =============================================================================

/// Port the viewer server binds when `--port` is not given.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_SERVER_PORT;
/// assert_eq!(DEFAULT_SERVER_PORT, 8080);
/// ```
pub const DEFAULT_SERVER_PORT: u16 = 8080;

#[cfg(test)]
mod tests;
