//! Render quality presets and export formats.

use std::fmt;
use std::str::FromStr;

use config::constants::{PREVIEW_SIZE_HIGH, PREVIEW_SIZE_LOW, PREVIEW_SIZE_MEDIUM};
use serde::{Deserialize, Serialize};

use crate::error::ParseOptionError;

/// Preview image size preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    #[default]
    Medium,
    High,
}

impl Quality {
    /// Image size in pixels, `[width, height]`.
    pub fn image_size(self) -> [u32; 2] {
        match self {
            Quality::Low => PREVIEW_SIZE_LOW,
            Quality::Medium => PREVIEW_SIZE_MEDIUM,
            Quality::High => PREVIEW_SIZE_HIGH,
        }
    }

    /// The `--imgsize=W,H` argument.
    pub fn imgsize_arg(self) -> String {
        let [width, height] = self.image_size();
        format!("--imgsize={width},{height}")
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Low => "low",
            Quality::Medium => "medium",
            Quality::High => "high",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Quality::Low),
            "medium" => Ok(Quality::Medium),
            "high" => Ok(Quality::High),
            _ => Err(ParseOptionError {
                kind: "quality",
                value: s.to_string(),
                expected: "low, medium, high",
            }),
        }
    }
}

/// Mesh export format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    #[serde(rename = "stl")]
    Stl,
    #[serde(rename = "3mf")]
    ThreeMf,
}

impl ExportFormat {
    /// File extension, also the `--export-format` value.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Stl => "stl",
            ExportFormat::ThreeMf => "3mf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stl" => Ok(ExportFormat::Stl),
            "3mf" => Ok(ExportFormat::ThreeMf),
            _ => Err(ParseOptionError {
                kind: "export format",
                value: s.to_string(),
                expected: "stl, 3mf",
            }),
        }
    }
}
