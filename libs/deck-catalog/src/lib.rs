//! # Deck Catalog
//!
//! Inventory of the mesh libraries the case is built from.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use deck_catalog::{build, Source};
//! use deck_config::DeckConfig;
//!
//! let config = DeckConfig::default();
//! let catalog = build(&Source::from_paths(&config.paths)).unwrap();
//! catalog.write_to(Path::new(&config.paths.output_dir)).unwrap();
//! ```

pub mod catalog;
pub mod category;
pub mod error;
pub mod mesh;

pub use catalog::{build, scan, Catalog, ModelInfo, Source};
pub use category::{categorize, Category};
pub use error::{CatalogError, MeshError};
pub use mesh::{inspect, MeshSummary};
