//! # Component Table
//!
//! The static association of component identifiers with geometry sources.
//! Only placement and visibility are data-driven; what a component *is*
//! lives here.
//!
//! ## Ordering
//!
//! Table order is emission order: shells first, then cavities, then parts.

use serde::Serialize;

// =============================================================================
// TYPES
// =============================================================================

/// How a component takes part in the CSG tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    /// Unioned into the outer hull.
    Shell,
    /// Subtracted from the hull.
    Cavity,
    /// Unioned alongside the hull.
    Part,
}

/// Which hand a grip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Direction along x that `grip_offset` pushes this side.
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Inline primitive whose sizes name `dimensions` keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Centered box `[x, y, z]`.
    Cuboid { size: [&'static str; 3] },
    /// Centered upright cylinder.
    Cylinder {
        height: &'static str,
        diameter: &'static str,
    },
}

/// Where a component's geometry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRef {
    /// Mesh file relative to the asset root.
    Mesh(&'static str),
    Primitive(Primitive),
}

/// A static component definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentDef {
    pub id: &'static str,
    pub role: Role,
    pub source: SourceRef,
    /// RGBA display color.
    pub color: [f32; 4],
    /// Grips move outward by `dimensions.grip_offset`.
    pub grip: Option<Side>,
}

// =============================================================================
// TABLE
// =============================================================================

const HOUSING: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
const GRIP: [f32; 4] = [0.3, 0.3, 0.35, 1.0];
const MOCKUP: [f32; 4] = [0.1, 0.1, 0.1, 0.5];
const BATTERY: [f32; 4] = [0.8, 0.6, 0.1, 0.5];
const CONTROL: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
const BUTTON: [f32; 4] = [0.8, 0.1, 0.1, 1.0];

const fn shell(id: &'static str, mesh: &'static str, grip: Option<Side>) -> ComponentDef {
    ComponentDef {
        id,
        role: Role::Shell,
        source: SourceRef::Mesh(mesh),
        color: if grip.is_some() { GRIP } else { HOUSING },
        grip,
    }
}

const fn part(id: &'static str, source: SourceRef, color: [f32; 4]) -> ComponentDef {
    ComponentDef {
        id,
        role: Role::Part,
        source,
        color,
        grip: None,
    }
}

const JOYSTICK_RING: SourceRef = SourceRef::Primitive(Primitive::Cylinder {
    height: "joystick_height",
    diameter: "joystick_diameter",
});

/// Every component the generator knows, in emission order.
pub const COMPONENTS: &[ComponentDef] = &[
    shell("housing_front", "housing/NucDeck_Front_Cover.STL", None),
    shell("housing_back", "housing/NucDeck_Back_Cover.STL", None),
    shell("left_grip", "housing/NucDeck_Left_Grip.STL", Some(Side::Left)),
    shell("right_grip", "housing/NucDeck_Right_Grip.STL", Some(Side::Right)),
    ComponentDef {
        id: "phone_mockup",
        role: Role::Cavity,
        source: SourceRef::Primitive(Primitive::Cuboid {
            size: ["phone_length", "phone_width", "phone_depth"],
        }),
        color: MOCKUP,
        grip: None,
    },
    ComponentDef {
        id: "battery_mockup",
        role: Role::Cavity,
        source: SourceRef::Primitive(Primitive::Cuboid {
            size: ["battery_length", "battery_width", "battery_height"],
        }),
        color: BATTERY,
        grip: None,
    },
    part("left_joystick", JOYSTICK_RING, CONTROL),
    part("right_joystick", JOYSTICK_RING, CONTROL),
    part("buttons", SourceRef::Mesh("buttons/ABXY_Buttons.STL"), BUTTON),
    part(
        "trigger_mounts",
        SourceRef::Mesh("housing/NucDeck_Trigger_Mount.STL"),
        CONTROL,
    ),
    part(
        "lcd_retainer",
        SourceRef::Mesh("housing/NucDeck_LCD_Retainer.STL"),
        HOUSING,
    ),
];

/// Looks up a component definition by identifier.
///
/// ## Example
///
/// ```rust
/// use deck_assembly::component::{find, Role};
///
/// assert_eq!(find("phone_mockup").unwrap().role, Role::Cavity);
/// assert!(find("speaker").is_none());
/// ```
pub fn find(id: &str) -> Option<&'static ComponentDef> {
    COMPONENTS.iter().find(|def| def.id == id)
}

/// Component identifiers in table order.
pub fn ids() -> impl Iterator<Item = &'static str> {
    COMPONENTS.iter().map(|def| def.id)
}
