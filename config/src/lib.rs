//! # Config Crate
//!
//! Centralized constants for the DeckForge pipeline. Every default that more
//! than one crate needs (file names, preview sizes, keyword deltas, exploded
//! view multiplier) is defined here so the crates stay declarative.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_EXPLODE_MULTIPLIER, PREVIEW_SIZE_MEDIUM};
//!
//! let offset = -80.0;
//! assert_eq!(offset * DEFAULT_EXPLODE_MULTIPLIER, -160.0);
//! assert_eq!(PREVIEW_SIZE_MEDIUM, [1200, 900]);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain values only, safe to depend on from any crate
//! - **OpenSCAD Compatible**: Preview sizes and segment counts are passed to
//!   the OpenSCAD binary unchanged

pub mod constants;

#[cfg(test)]
mod tests;
