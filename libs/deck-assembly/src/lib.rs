//! # Deck Assembly
//!
//! Configuration to CSG tree to OpenSCAD source.
//!
//! ## Architecture
//!
//! ```text
//! DeckConfig + component table → Assembler → Assembly (CsgNode) → emit_scad → .scad
//! ```
//!
//! ## Example
//!
//! ```rust
//! use deck_assembly::{emit_scad, Assembler, AssemblyOptions, DiskAssets};
//! use deck_config::DeckConfig;
//!
//! let config = DeckConfig::default();
//! let assembler = Assembler::new(DiskAssets, AssemblyOptions::from_config(&config));
//! let assembly = assembler.assemble(&config).unwrap();
//! let script = emit_scad(&assembly, &config.project);
//! assert!(script.contains("union()"));
//! ```

pub mod asset;
pub mod assembly;
pub mod component;
pub mod csg;
pub mod error;
pub mod scad;

pub use asset::{AssetError, AssetSource, DiskAssets, InMemoryAssets};
pub use assembly::{
    translation, Assembler, Assembly, AssemblyOptions, ComponentFailure, UnknownComponentPolicy,
};
pub use component::{ComponentDef, Role, COMPONENTS};
pub use csg::{BooleanOperation, ComponentOp, CsgNode, ResolvedSource};
pub use error::{AssemblyError, GeometrySourceError};
pub use scad::emit_scad;

#[cfg(test)]
mod tests;
