//! # Deck Modify
//!
//! Turns a free-text request such as "make the grips smaller and hide the
//! buttons" into a [`ModificationDelta`] by substring matching against a
//! fixed rule table.
//!
//! ```text
//! prompt → lower-case → every matching Rule → merged ModificationDelta → (caller) ConfigStore
//! ```

pub mod delta;
pub mod interpreter;
pub mod rules;

pub use delta::{config_path, ModificationDelta};
pub use interpreter::{Interpretation, KeywordInterpreter};
pub use rules::{Change, Rule, Trigger, RULES};
