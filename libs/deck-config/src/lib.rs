//! # Deck Config
//!
//! The single source of truth for case geometry parameters.
//!
//! ## Architecture
//!
//! ```text
//! config.yaml → ConfigStore (DeckConfig) → deck-assembly → deck-render
//! ```
//!
//! ## Example
//!
//! ```rust
//! use deck_config::{ConfigStore, ParamValue};
//!
//! let mut store = ConfigStore::default();
//! store.set("dimensions.case_length", ParamValue::parse("300")).unwrap();
//! assert_eq!(store.get("dimensions.case_length").unwrap(), ParamValue::Number(300.0));
//! ```

pub mod access;
pub mod error;
pub mod model;
pub mod store;
pub mod value;

pub use error::ConfigError;
pub use model::{
    AiSettings, ConfigIssue, DeckConfig, ExplodedView, OpenScadSettings, PathSettings, Placement,
    PrintSettings, ProjectInfo, SECTIONS,
};
pub use store::ConfigStore;
pub use value::{ParamValue, ValueKind};

#[cfg(test)]
mod tests;
