//! # Assembly Generator
//!
//! Maps a configuration snapshot onto the static component table and builds
//! the CSG tree.
//!
//! ## Tree Shape
//!
//! ```text
//! [Scale]                       (only when dimensions.scale != 1)
//!   Union
//!     Difference
//!       base:    Union[shells]
//!       cutouts: [cavities]
//!     parts...
//! ```
//!
//! ## Failure Policy
//!
//! A component whose source cannot be resolved is recorded in
//! [`Assembly::failures`] and skipped; everything else still assembles.

use std::path::PathBuf;

use config::constants::{NEUTRAL_SCALE, SCALE_EPSILON};
use deck_config::DeckConfig;
use glam::DVec3;
use tracing::{debug, warn};

use crate::asset::AssetSource;
use crate::component::{self, ComponentDef, Primitive, Role, SourceRef, COMPONENTS};
use crate::csg::{ComponentOp, CsgNode, ResolvedSource};
use crate::error::{AssemblyError, GeometrySourceError};

// =============================================================================
// OPTIONS
// =============================================================================

/// What to do with a layout entry that names no known component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownComponentPolicy {
    /// Log a warning, list the name in [`Assembly::ignored_layout`], continue.
    #[default]
    Warn,
    /// Fail the assembly with [`AssemblyError::UnknownComponent`].
    Reject,
}

/// Assembly settings that do not come from the configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyOptions {
    /// Directory that relative mesh paths are joined to.
    pub asset_root: PathBuf,
    pub unknown_components: UnknownComponentPolicy,
}

impl AssemblyOptions {
    /// Options rooted at the configuration's asset directory.
    pub fn from_config(config: &DeckConfig) -> Self {
        Self {
            asset_root: PathBuf::from(&config.paths.asset_root),
            unknown_components: UnknownComponentPolicy::default(),
        }
    }

    /// Replaces the unknown-component policy.
    pub fn with_policy(mut self, policy: UnknownComponentPolicy) -> Self {
        self.unknown_components = policy;
        self
    }
}

// =============================================================================
// RESULT
// =============================================================================

/// A component that was skipped, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentFailure {
    pub component: &'static str,
    pub error: GeometrySourceError,
}

/// Result of assembling one configuration snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub tree: CsgNode,
    pub failures: Vec<ComponentFailure>,
    /// Layout names with no component definition (warn policy only).
    pub ignored_layout: Vec<String>,
}

impl Assembly {
    /// Every emitted component in table order.
    pub fn operations(&self) -> Vec<&ComponentOp> {
        self.tree.components()
    }

    /// The failure recorded for a component, if any.
    pub fn failure(&self, component: &str) -> Option<&GeometrySourceError> {
        self.failures
            .iter()
            .find(|failure| failure.component == component)
            .map(|failure| &failure.error)
    }

    /// Whether every component in the table was emitted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

// =============================================================================
// ASSEMBLER
// =============================================================================

/// Builds [`Assembly`] values from configuration snapshots.
///
/// ## Example
///
/// ```rust
/// use deck_assembly::{Assembler, AssemblyOptions, InMemoryAssets};
/// use deck_config::DeckConfig;
///
/// let config = DeckConfig::default();
/// let assets = InMemoryAssets::default();
/// let assembler = Assembler::new(&assets, AssemblyOptions::from_config(&config));
/// let assembly = assembler.assemble(&config).unwrap();
///
/// // No mesh files exist, so only the primitives assemble.
/// assert!(assembly.tree.find("left_joystick").is_some());
/// assert!(assembly.failure("housing_front").is_some());
/// ```
pub struct Assembler<S: AssetSource> {
    assets: S,
    options: AssemblyOptions,
}

impl<S: AssetSource> Assembler<S> {
    pub fn new(assets: S, options: AssemblyOptions) -> Self {
        Self { assets, options }
    }

    pub fn options(&self) -> &AssemblyOptions {
        &self.options
    }

    /// Assembles a configuration snapshot.
    ///
    /// # Errors
    ///
    /// Only [`AssemblyError::UnknownComponent`] under the reject policy.
    /// Source failures are reported per component in the result.
    pub fn assemble(&self, config: &DeckConfig) -> Result<Assembly, AssemblyError> {
        let ignored_layout = self.check_layout(config)?;

        let mut shells = Vec::new();
        let mut cavities = Vec::new();
        let mut parts = Vec::new();
        let mut failures = Vec::new();

        for def in COMPONENTS {
            match self.build_op(def, config) {
                Ok(op) => {
                    let node = CsgNode::Component(op);
                    match def.role {
                        Role::Shell => shells.push(node),
                        Role::Cavity => cavities.push(node),
                        Role::Part => parts.push(node),
                    }
                }
                Err(error) => {
                    warn!(component = def.id, %error, "skipping component");
                    failures.push(ComponentFailure {
                        component: def.id,
                        error,
                    });
                }
            }
        }

        let mut operands = Vec::with_capacity(parts.len() + 1);
        if let Some(hull) = build_hull(shells, cavities) {
            operands.push(hull);
        }
        operands.extend(parts);

        let mut tree = CsgNode::Union { operands };
        let scale = config.dimension("scale").unwrap_or(NEUTRAL_SCALE);
        if (scale - NEUTRAL_SCALE).abs() >= SCALE_EPSILON {
            tree = CsgNode::Scale {
                factor: scale,
                child: Box::new(tree),
            };
        }

        debug!(
            emitted = tree.components().len(),
            failed = failures.len(),
            "assembled configuration"
        );

        Ok(Assembly {
            tree,
            failures,
            ignored_layout,
        })
    }

    fn check_layout(&self, config: &DeckConfig) -> Result<Vec<String>, AssemblyError> {
        let mut ignored = Vec::new();
        for name in config.layout.keys() {
            if component::find(name).is_some() {
                continue;
            }
            match self.options.unknown_components {
                UnknownComponentPolicy::Reject => {
                    return Err(AssemblyError::UnknownComponent { name: name.clone() });
                }
                UnknownComponentPolicy::Warn => {
                    warn!(component = %name, "layout entry has no component definition, ignoring");
                    ignored.push(name.clone());
                }
            }
        }
        Ok(ignored)
    }

    fn build_op(
        &self,
        def: &ComponentDef,
        config: &DeckConfig,
    ) -> Result<ComponentOp, GeometrySourceError> {
        let source = self.resolve_source(def.source, config)?;
        let placement = config.layout.get(def.id).copied().unwrap_or_default();

        Ok(ComponentOp {
            id: def.id,
            role: def.role,
            translation: translation(def, config),
            pair_spacing: placement.spacing,
            visible: config.is_visible(def.id),
            color: def.color,
            source,
        })
    }

    fn resolve_source(
        &self,
        source: SourceRef,
        config: &DeckConfig,
    ) -> Result<ResolvedSource, GeometrySourceError> {
        let dimension = |name: &str| {
            config
                .dimension(name)
                .ok_or_else(|| GeometrySourceError::MissingDimension {
                    name: name.to_string(),
                })
        };

        match source {
            SourceRef::Mesh(relative) => {
                let path = self.options.asset_root.join(relative);
                self.assets.probe(&path)?;
                Ok(ResolvedSource::Mesh { path })
            }
            SourceRef::Primitive(Primitive::Cuboid { size }) => Ok(ResolvedSource::Cuboid {
                size: [dimension(size[0])?, dimension(size[1])?, dimension(size[2])?],
            }),
            SourceRef::Primitive(Primitive::Cylinder { height, diameter }) => {
                Ok(ResolvedSource::Cylinder {
                    height: dimension(height)?,
                    diameter: dimension(diameter)?,
                })
            }
        }
    }
}

/// Base offset from the layout (origin when absent), grips pushed outward by
/// `grip_offset`, the whole vector scaled by the exploded multiplier when
/// exploded view is on.
pub fn translation(def: &ComponentDef, config: &DeckConfig) -> DVec3 {
    let placement = config.layout.get(def.id).copied().unwrap_or_default();
    let mut base = DVec3::from_array(placement.offset());

    if let Some(side) = def.grip {
        base.x += side.sign() * config.dimension("grip_offset").unwrap_or(0.0);
    }

    if config.exploded.enabled {
        base * config.exploded.multiplier
    } else {
        base
    }
}

fn build_hull(shells: Vec<CsgNode>, cavities: Vec<CsgNode>) -> Option<CsgNode> {
    if shells.is_empty() {
        if !cavities.is_empty() {
            warn!(
                cavities = cavities.len(),
                "no shell assembled, dropping cavities with nothing to cut"
            );
        }
        return None;
    }

    let base = CsgNode::Union { operands: shells };
    if cavities.is_empty() {
        return Some(base);
    }
    Some(CsgNode::Difference {
        base: Box::new(base),
        cutouts: cavities,
    })
}
