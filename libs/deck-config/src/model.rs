//! # Configuration Model
//!
//! Typed sections of the case configuration. Open sections (`dimensions`,
//! `materials`, `layout`, `visibility`) are name-keyed maps; the rest are
//! fixed structs.

use std::collections::BTreeMap;

use config::constants::{
    DEFAULT_ASSET_ROOT, DEFAULT_BUTTONS_STL_DIR, DEFAULT_EXPLODE_MULTIPLIER, DEFAULT_GRIP_OFFSET,
    DEFAULT_OPENSCAD_BINARY, DEFAULT_OUTPUT_DIR, DEFAULT_SCAD_OUTPUT, DEFAULT_STL_IMPORT_DIR,
    DEFAULT_WEB_ROOT, NEUTRAL_SCALE,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// ROOT
// =============================================================================

/// The whole configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    #[serde(default)]
    pub project: ProjectInfo,
    pub dimensions: BTreeMap<String, f64>,
    #[serde(default)]
    pub layout: BTreeMap<String, Placement>,
    pub materials: BTreeMap<String, f64>,
    pub printing: PrintSettings,
    #[serde(default)]
    pub visibility: BTreeMap<String, bool>,
    #[serde(default)]
    pub exploded: ExplodedView,
    #[serde(default)]
    pub ai: AiSettings,
    #[serde(default)]
    pub openscad: OpenScadSettings,
    #[serde(default)]
    pub paths: PathSettings,
}

/// Names of every top-level section, in file order.
pub const SECTIONS: [&str; 10] = [
    "project",
    "dimensions",
    "layout",
    "materials",
    "printing",
    "visibility",
    "exploded",
    "ai",
    "openscad",
    "paths",
];

// =============================================================================
// SECTIONS
// =============================================================================

/// Project identity and the last render stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_render: Option<String>,
}

/// Placement offset of one component, in mm.
///
/// When `spacing` is set the component is placed as a mirrored pair at
/// `x ± spacing / 2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
}

impl Placement {
    /// Creates a placement without pair spacing.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            spacing: None,
        }
    }

    /// Returns the offset as an array.
    pub fn offset(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Slicer-facing print settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintSettings {
    pub layer_height: f64,
    pub infill: f64,
    pub supports: bool,
    pub brim: bool,
}

/// Exploded view toggle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplodedView {
    pub enabled: bool,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

/// Assistant settings. Only `auto_render` affects this pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSettings {
    #[serde(default)]
    pub auto_render: bool,
    #[serde(default = "default_ai_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

/// How the OpenSCAD binary is invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenScadSettings {
    #[serde(default = "default_binary")]
    pub binary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,
}

/// Filesystem locations, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub scad_output: String,
    pub output_dir: String,
    pub asset_root: String,
    pub stl_import: String,
    pub buttons_stl: String,
    pub web_root: String,
}

fn default_multiplier() -> f64 {
    DEFAULT_EXPLODE_MULTIPLIER
}

fn default_ai_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_binary() -> String {
    DEFAULT_OPENSCAD_BINARY.to_string()
}

// =============================================================================
// DEFAULTS
// =============================================================================

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: "DeckForge Handheld".to_string(),
            version: "1.0".to_string(),
            last_render: None,
        }
    }
}

impl Default for ExplodedView {
    fn default() -> Self {
        Self {
            enabled: false,
            multiplier: DEFAULT_EXPLODE_MULTIPLIER,
        }
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            auto_render: false,
            model: default_ai_model(),
            temperature: default_temperature(),
        }
    }
}

impl Default for OpenScadSettings {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            extra_args: Vec::new(),
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            scad_output: DEFAULT_SCAD_OUTPUT.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            asset_root: DEFAULT_ASSET_ROOT.to_string(),
            stl_import: DEFAULT_STL_IMPORT_DIR.to_string(),
            buttons_stl: DEFAULT_BUTTONS_STL_DIR.to_string(),
            web_root: DEFAULT_WEB_ROOT.to_string(),
        }
    }
}

impl Default for DeckConfig {
    /// Stock layout for a Galaxy S20 based build.
    fn default() -> Self {
        let dimensions = [
            ("case_length", 294.0),
            ("case_width", 115.0),
            ("case_depth", 19.0),
            ("phone_length", 151.7),
            ("phone_width", 69.1),
            ("phone_depth", 7.9),
            ("battery_length", 90.0),
            ("battery_width", 60.0),
            ("battery_height", 12.0),
            ("joystick_diameter", 32.0),
            ("joystick_height", 8.0),
            ("button_diameter", 12.0),
            ("grip_offset", DEFAULT_GRIP_OFFSET),
            ("scale", NEUTRAL_SCALE),
        ];

        let layout = [
            ("housing_front", Placement::new(0.0, 0.0, 10.0)),
            ("housing_back", Placement::new(0.0, 0.0, -10.0)),
            ("left_grip", Placement::new(-111.0, -10.0, 0.0)),
            ("right_grip", Placement::new(111.0, -10.0, 0.0)),
            ("phone_mockup", Placement::new(0.0, 0.0, 4.0)),
            ("battery_mockup", Placement::new(0.0, 0.0, -6.0)),
            ("left_joystick", Placement::new(-80.0, -30.0, 0.0)),
            ("right_joystick", Placement::new(80.0, -30.0, 0.0)),
            ("buttons", Placement::new(100.0, 20.0, 12.0)),
            (
                "trigger_mounts",
                Placement {
                    x: 0.0,
                    y: 55.0,
                    z: 0.0,
                    spacing: Some(230.0),
                },
            ),
            ("lcd_retainer", Placement::new(0.0, 0.0, 14.0)),
        ];

        let visibility = layout.iter().map(|(name, _)| (name.to_string(), true));

        Self {
            project: ProjectInfo::default(),
            dimensions: dimensions
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            layout: layout
                .iter()
                .map(|(name, placement)| (name.to_string(), *placement))
                .collect(),
            materials: [("wall_thickness", 2.5), ("tolerance", 0.5)]
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            printing: PrintSettings {
                layer_height: 0.2,
                infill: 20.0,
                supports: true,
                brim: false,
            },
            visibility: visibility.collect(),
            exploded: ExplodedView::default(),
            ai: AiSettings::default(),
            openscad: OpenScadSettings::default(),
            paths: PathSettings::default(),
        }
    }
}

// =============================================================================
// CHECKS
// =============================================================================

/// A non-fatal observation about configuration values.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub key: String,
    pub message: String,
}

impl DeckConfig {
    /// Returns the dimension, if present.
    pub fn dimension(&self, name: &str) -> Option<f64> {
        self.dimensions.get(name).copied()
    }

    /// Returns whether a component is shown. Absent entries are shown.
    pub fn is_visible(&self, component: &str) -> bool {
        self.visibility.get(component).copied().unwrap_or(true)
    }

    /// Reports dimensions that are not positive and materials that are
    /// negative. `set` accepts such values; this is the place they surface.
    pub fn check(&self) -> Vec<ConfigIssue> {
        let dimensions = self
            .dimensions
            .iter()
            .filter(|(_, value)| **value <= 0.0)
            .map(|(name, value)| ConfigIssue {
                key: format!("dimensions.{name}"),
                message: format!("dimension must be positive, got {value}"),
            });

        let materials = self
            .materials
            .iter()
            .filter(|(_, value)| **value < 0.0)
            .map(|(name, value)| ConfigIssue {
                key: format!("materials.{name}"),
                message: format!("material value must not be negative, got {value}"),
            });

        let mut issues: Vec<ConfigIssue> = dimensions.chain(materials).collect();
        if self.exploded.multiplier <= 0.0 {
            issues.push(ConfigIssue {
                key: "exploded.multiplier".to_string(),
                message: format!(
                    "multiplier must be positive, got {}",
                    self.exploded.multiplier
                ),
            });
        }
        issues
    }
}
