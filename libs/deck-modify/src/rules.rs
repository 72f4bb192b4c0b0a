//! # Keyword Rules
//!
//! The fixed rule table. Rules are tested in order against the lower-cased
//! prompt and all matches apply; later rules win on key collisions.

use config::constants::{COMPACT_GRIP_OFFSET, EXTENDED_GRIP_OFFSET, GROW_SCALE, SHRINK_SCALE};
use deck_assembly::component;

use crate::delta::ModificationDelta;

// =============================================================================
// TRIGGERS
// =============================================================================

/// Substring predicate over a lower-cased prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Matches when any phrase occurs.
    AnyOf(&'static [&'static str]),
    /// Matches when every word occurs, anywhere.
    AllOf(&'static [&'static str]),
    /// Both triggers match.
    Both(&'static Trigger, &'static Trigger),
}

impl Trigger {
    pub fn matches(&self, prompt: &str) -> bool {
        match self {
            Trigger::AnyOf(phrases) => phrases.iter().any(|phrase| prompt.contains(phrase)),
            Trigger::AllOf(words) => words.iter().all(|word| prompt.contains(word)),
            Trigger::Both(first, second) => first.matches(prompt) && second.matches(prompt),
        }
    }
}

// =============================================================================
// CHANGES
// =============================================================================

/// One override a rule contributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change {
    Number(&'static str, f64),
    Flag(&'static str, bool),
    /// Sets `visibility.<id>` to false for every known component.
    HideAll,
}

impl Change {
    fn write(&self, delta: &mut ModificationDelta) {
        match *self {
            Change::Number(key, value) => delta.insert(key, value),
            Change::Flag(key, value) => delta.insert(key, value),
            Change::HideAll => {
                for id in component::ids() {
                    delta.insert(format!("visibility.{id}"), false);
                }
            }
        }
    }
}

/// A named trigger with the overrides it contributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub name: &'static str,
    pub trigger: Trigger,
    pub changes: &'static [Change],
}

impl Rule {
    /// The rule's delta, independent of any prompt.
    pub fn delta(&self) -> ModificationDelta {
        let mut delta = ModificationDelta::new();
        for change in self.changes {
            change.write(&mut delta);
        }
        delta
    }
}

// =============================================================================
// TABLE
// =============================================================================

const ISOLATE: Trigger = Trigger::AnyOf(&["show only", "isolate"]);

/// Built-in rules, in evaluation order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "shrink",
        trigger: Trigger::AnyOf(&["smaller", "compact"]),
        changes: &[
            Change::Number("scale", SHRINK_SCALE),
            Change::Number("gripOffset", COMPACT_GRIP_OFFSET),
        ],
    },
    Rule {
        name: "grow",
        trigger: Trigger::AnyOf(&["larger", "bigger"]),
        changes: &[
            Change::Number("scale", GROW_SCALE),
            Change::Number("gripOffset", EXTENDED_GRIP_OFFSET),
        ],
    },
    Rule {
        name: "exploded",
        trigger: Trigger::AnyOf(&["exploded", "assembly"]),
        changes: &[Change::Flag("exploded.enabled", true)],
    },
    Rule {
        name: "hide_buttons",
        trigger: Trigger::AllOf(&["hide", "button"]),
        changes: &[Change::Flag("visibility.buttons", false)],
    },
    Rule {
        name: "hide_grips",
        trigger: Trigger::AnyOf(&["hide the grip", "hide grip"]),
        changes: &[
            Change::Flag("visibility.left_grip", false),
            Change::Flag("visibility.right_grip", false),
        ],
    },
    Rule {
        name: "isolate",
        trigger: ISOLATE,
        changes: &[Change::HideAll],
    },
    Rule {
        name: "isolate_housing",
        trigger: Trigger::Both(&ISOLATE, &Trigger::AllOf(&["housing"])),
        changes: &[
            Change::Flag("visibility.housing_front", true),
            Change::Flag("visibility.housing_back", true),
        ],
    },
    Rule {
        name: "isolate_grips",
        trigger: Trigger::Both(&ISOLATE, &Trigger::AllOf(&["grip"])),
        changes: &[
            Change::Flag("visibility.left_grip", true),
            Change::Flag("visibility.right_grip", true),
        ],
    },
];
