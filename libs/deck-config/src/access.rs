//! # Dotted-Key Access
//!
//! `get`/`set` over keys such as `dimensions.case_length`,
//! `layout.left_joystick.x` or `visibility.buttons`.
//!
//! ## Rules
//!
//! - An unknown first segment is an unknown key.
//! - Open sections (`dimensions`, `materials`, `layout`, `visibility`) accept
//!   new names on `set`; fixed sections only accept their own leaves.
//! - Numeric leaves take numbers, flag leaves take booleans. Text leaves
//!   accept any value and store its display form.
//! - No range checks are applied here; see [`DeckConfig::check`].

use crate::error::ConfigError;
use crate::model::{DeckConfig, Placement};
use crate::value::{ParamValue, ValueKind};

impl DeckConfig {
    /// Reads a leaf value.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use deck_config::{DeckConfig, ParamValue};
    ///
    /// let config = DeckConfig::default();
    /// let x = config.get("layout.left_joystick.x").unwrap();
    /// assert_eq!(x, ParamValue::Number(-80.0));
    /// ```
    pub fn get(&self, key: &str) -> Result<ParamValue, ConfigError> {
        let segments = split_key(key)?;
        let unknown = || ConfigError::unknown_key(key);

        let value = match segments.as_slice() {
            ["project", "name"] => ParamValue::Text(self.project.name.clone()),
            ["project", "version"] => ParamValue::Text(self.project.version.clone()),
            ["project", "last_render"] => {
                ParamValue::Text(self.project.last_render.clone().ok_or_else(unknown)?)
            }
            ["dimensions", name] => ParamValue::Number(self.dimension(name).ok_or_else(unknown)?),
            ["materials", name] => {
                ParamValue::Number(self.materials.get(*name).copied().ok_or_else(unknown)?)
            }
            ["layout", component, axis] => {
                let placement = self.layout.get(*component).ok_or_else(unknown)?;
                let value = match *axis {
                    "x" => placement.x,
                    "y" => placement.y,
                    "z" => placement.z,
                    "spacing" => placement.spacing.ok_or_else(unknown)?,
                    _ => return Err(unknown()),
                };
                ParamValue::Number(value)
            }
            ["printing", "layer_height"] => ParamValue::Number(self.printing.layer_height),
            ["printing", "infill"] => ParamValue::Number(self.printing.infill),
            ["printing", "supports"] => ParamValue::Bool(self.printing.supports),
            ["printing", "brim"] => ParamValue::Bool(self.printing.brim),
            ["visibility", component] => {
                ParamValue::Bool(self.visibility.get(*component).copied().ok_or_else(unknown)?)
            }
            ["exploded", "enabled"] => ParamValue::Bool(self.exploded.enabled),
            ["exploded", "multiplier"] => ParamValue::Number(self.exploded.multiplier),
            ["ai", "auto_render"] => ParamValue::Bool(self.ai.auto_render),
            ["ai", "model"] => ParamValue::Text(self.ai.model.clone()),
            ["ai", "temperature"] => ParamValue::Number(self.ai.temperature),
            ["openscad", "binary"] => ParamValue::Text(self.openscad.binary.clone()),
            ["paths", leaf] => ParamValue::Text(self.path_slot(leaf).ok_or_else(unknown)?.clone()),
            _ => return Err(unknown()),
        };
        Ok(value)
    }

    /// Writes a leaf value.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use deck_config::{ConfigError, DeckConfig};
    ///
    /// let mut config = DeckConfig::default();
    /// config.set("dimensions.case_length", 300.0).unwrap();
    /// assert_eq!(config.dimension("case_length"), Some(300.0));
    ///
    /// let err = config.set("dimensions.case_length", "long").unwrap_err();
    /// assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    /// ```
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) -> Result<(), ConfigError> {
        let value = value.into();
        let segments = split_key(key)?;
        let unknown = || ConfigError::unknown_key(key);

        match segments.as_slice() {
            ["project", "name"] => self.project.name = value.to_string(),
            ["project", "version"] => self.project.version = value.to_string(),
            ["project", "last_render"] => self.project.last_render = Some(value.to_string()),
            ["dimensions", name] => {
                let number = expect_number(key, &value)?;
                self.dimensions.insert(name.to_string(), number);
            }
            ["materials", name] => {
                let number = expect_number(key, &value)?;
                self.materials.insert(name.to_string(), number);
            }
            ["layout", component, axis] => {
                if !matches!(*axis, "x" | "y" | "z" | "spacing") {
                    return Err(unknown());
                }
                let number = expect_number(key, &value)?;
                let placement = self
                    .layout
                    .entry(component.to_string())
                    .or_insert_with(Placement::default);
                match *axis {
                    "x" => placement.x = number,
                    "y" => placement.y = number,
                    "z" => placement.z = number,
                    _ => placement.spacing = Some(number),
                }
            }
            ["printing", "layer_height"] => self.printing.layer_height = expect_number(key, &value)?,
            ["printing", "infill"] => self.printing.infill = expect_number(key, &value)?,
            ["printing", "supports"] => self.printing.supports = expect_bool(key, &value)?,
            ["printing", "brim"] => self.printing.brim = expect_bool(key, &value)?,
            ["visibility", component] => {
                let shown = expect_bool(key, &value)?;
                self.visibility.insert(component.to_string(), shown);
            }
            ["exploded", "enabled"] => self.exploded.enabled = expect_bool(key, &value)?,
            ["exploded", "multiplier"] => self.exploded.multiplier = expect_number(key, &value)?,
            ["ai", "auto_render"] => self.ai.auto_render = expect_bool(key, &value)?,
            ["ai", "model"] => self.ai.model = value.to_string(),
            ["ai", "temperature"] => self.ai.temperature = expect_number(key, &value)?,
            ["openscad", "binary"] => self.openscad.binary = value.to_string(),
            ["paths", leaf] => {
                let slot = self.path_slot_mut(leaf).ok_or_else(unknown)?;
                *slot = value.to_string();
            }
            _ => return Err(unknown()),
        }
        Ok(())
    }

    fn path_slot(&self, leaf: &str) -> Option<&String> {
        let paths = &self.paths;
        match leaf {
            "scad_output" => Some(&paths.scad_output),
            "output_dir" => Some(&paths.output_dir),
            "asset_root" => Some(&paths.asset_root),
            "stl_import" => Some(&paths.stl_import),
            "buttons_stl" => Some(&paths.buttons_stl),
            "web_root" => Some(&paths.web_root),
            _ => None,
        }
    }

    fn path_slot_mut(&mut self, leaf: &str) -> Option<&mut String> {
        let paths = &mut self.paths;
        match leaf {
            "scad_output" => Some(&mut paths.scad_output),
            "output_dir" => Some(&mut paths.output_dir),
            "asset_root" => Some(&mut paths.asset_root),
            "stl_import" => Some(&mut paths.stl_import),
            "buttons_stl" => Some(&mut paths.buttons_stl),
            "web_root" => Some(&mut paths.web_root),
            _ => None,
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn split_key(key: &str) -> Result<Vec<&str>, ConfigError> {
    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(ConfigError::unknown_key(key));
    }
    Ok(segments)
}

fn expect_number(key: &str, value: &ParamValue) -> Result<f64, ConfigError> {
    value
        .as_f64()
        .ok_or_else(|| ConfigError::type_mismatch(key, ValueKind::Number, value.kind()))
}

fn expect_bool(key: &str, value: &ParamValue) -> Result<bool, ConfigError> {
    value
        .as_bool()
        .ok_or_else(|| ConfigError::type_mismatch(key, ValueKind::Bool, value.kind()))
}
