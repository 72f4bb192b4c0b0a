//! Category assignment from a mesh's path and file name.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// What a mesh file depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HousingFront,
    HousingBack,
    HousingGrip,
    HousingTrigger,
    HousingMisc,
    ButtonAction,
    ButtonTrigger,
    ButtonShoulder,
    ButtonDpad,
    ButtonVolume,
    ButtonMisc,
    Unknown,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::HousingFront => "housing_front",
            Category::HousingBack => "housing_back",
            Category::HousingGrip => "housing_grip",
            Category::HousingTrigger => "housing_trigger",
            Category::HousingMisc => "housing_misc",
            Category::ButtonAction => "button_action",
            Category::ButtonTrigger => "button_trigger",
            Category::ButtonShoulder => "button_shoulder",
            Category::ButtonDpad => "button_dpad",
            Category::ButtonVolume => "button_volume",
            Category::ButtonMisc => "button_misc",
            Category::Unknown => "unknown",
        }
    }

    /// Human-readable description used in the catalog.
    pub fn description(self) -> Option<&'static str> {
        let text = match self {
            Category::HousingFront => "Front housing panel with screen cutout and button holes",
            Category::HousingBack => "Back cover with ventilation and port access",
            Category::HousingGrip => "Side grip for ergonomic handling",
            Category::HousingTrigger => "Trigger mount assembly",
            Category::ButtonAction => "Action button (A/B/X/Y)",
            Category::ButtonTrigger => "Trigger button assembly",
            Category::ButtonShoulder => "Shoulder button",
            Category::ButtonDpad => "Directional pad",
            Category::ButtonVolume => "Volume control button",
            Category::HousingMisc | Category::ButtonMisc | Category::Unknown => return None,
        };
        Some(text)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorizes a mesh. The full path decides housing versus button, the
/// file stem decides the part.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use deck_catalog::{categorize, Category};
/// let cat = categorize(Path::new("assets/housing/NucDeck_Left_Grip.STL"));
/// assert_eq!(cat, Category::HousingGrip);
/// ```
pub fn categorize(path: &Path) -> Category {
    let full = path.to_string_lossy().to_lowercase();
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if full.contains("housing") {
        if name.contains("front") {
            Category::HousingFront
        } else if name.contains("back") || name.contains("cover") {
            Category::HousingBack
        } else if name.contains("grip") {
            Category::HousingGrip
        } else if name.contains("trigger") {
            Category::HousingTrigger
        } else {
            Category::HousingMisc
        }
    } else if full.contains("button") {
        if name.contains("action") || name.contains("abxy") {
            Category::ButtonAction
        } else if name.contains("trigger") {
            Category::ButtonTrigger
        } else if name.contains("shoulder") {
            Category::ButtonShoulder
        } else if name.contains("dpad") || name.contains("d-pad") {
            Category::ButtonDpad
        } else if name.contains("volume") {
            Category::ButtonVolume
        } else {
            Category::ButtonMisc
        }
    } else {
        Category::Unknown
    }
}
