//! # CSG Tree
//!
//! The assembled geometry as a tagged tree. Every value is resolved: sizes
//! are numbers, mesh paths are joined to the asset root, translations
//! include grip offsets and the exploded multiplier.

use std::path::PathBuf;

use glam::DVec3;
use serde::Serialize;

use crate::component::Role;

// =============================================================================
// LEAVES
// =============================================================================

/// Resolved geometry of one component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ResolvedSource {
    /// Imported mesh file.
    Mesh { path: PathBuf },
    /// Centered box.
    Cuboid { size: [f64; 3] },
    /// Centered upright cylinder.
    Cylinder { height: f64, diameter: f64 },
}

/// One positioned, colored, visibility-gated component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentOp {
    pub id: &'static str,
    pub role: Role,
    pub translation: DVec3,
    /// Mirrored-pair spacing along x, when the layout sets one.
    pub pair_spacing: Option<f64>,
    pub visible: bool,
    pub color: [f32; 4],
    pub source: ResolvedSource,
}

impl ComponentOp {
    /// Positions at which the geometry is placed: one, or a mirrored pair.
    pub fn instances(&self) -> Vec<DVec3> {
        match self.pair_spacing {
            Some(spacing) => {
                let half = DVec3::new(spacing / 2.0, 0.0, 0.0);
                vec![self.translation - half, self.translation + half]
            }
            None => vec![self.translation],
        }
    }
}

// =============================================================================
// TREE
// =============================================================================

/// Boolean operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BooleanOperation {
    Union,
    Difference,
    Intersection,
}

/// A node in the assembled CSG tree.
///
/// `Difference` keeps its base apart from its cutouts, so "hull first,
/// cutouts after" cannot be violated by reordering a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CsgNode {
    Union {
        operands: Vec<CsgNode>,
    },
    Intersection {
        operands: Vec<CsgNode>,
    },
    /// `base` minus every cutout.
    Difference {
        base: Box<CsgNode>,
        cutouts: Vec<CsgNode>,
    },
    /// Uniform scale about the origin.
    Scale {
        factor: f64,
        child: Box<CsgNode>,
    },
    Component(ComponentOp),
}

impl CsgNode {
    /// The boolean operation this node performs, if any.
    pub fn operation(&self) -> Option<BooleanOperation> {
        match self {
            CsgNode::Union { .. } => Some(BooleanOperation::Union),
            CsgNode::Intersection { .. } => Some(BooleanOperation::Intersection),
            CsgNode::Difference { .. } => Some(BooleanOperation::Difference),
            CsgNode::Scale { .. } | CsgNode::Component(_) => None,
        }
    }

    /// Direct children in CSG operand order (difference base first).
    pub fn operands(&self) -> Vec<&CsgNode> {
        match self {
            CsgNode::Union { operands } | CsgNode::Intersection { operands } => {
                operands.iter().collect()
            }
            CsgNode::Difference { base, cutouts } => {
                std::iter::once(base.as_ref()).chain(cutouts.iter()).collect()
            }
            CsgNode::Scale { child, .. } => vec![child.as_ref()],
            CsgNode::Component(_) => Vec::new(),
        }
    }

    /// All component leaves, depth-first in operand order.
    pub fn components(&self) -> Vec<&ComponentOp> {
        let mut out = Vec::new();
        self.collect_components(&mut out);
        out
    }

    fn collect_components<'a>(&'a self, out: &mut Vec<&'a ComponentOp>) {
        match self {
            CsgNode::Component(op) => out.push(op),
            _ => {
                for child in self.operands() {
                    child.collect_components(out);
                }
            }
        }
    }

    /// Finds a component leaf by identifier.
    pub fn find(&self, id: &str) -> Option<&ComponentOp> {
        self.components().into_iter().find(|op| op.id == id)
    }

    /// Whether any visible component lies under this node.
    pub fn has_visible(&self) -> bool {
        match self {
            CsgNode::Component(op) => op.visible,
            // Nothing survives a difference whose base is hidden.
            CsgNode::Difference { base, .. } => base.has_visible(),
            _ => self.operands().iter().any(|child| child.has_visible()),
        }
    }
}
