//! # Keyword Interpreter
//!
//! Evaluates every rule against a prompt without short-circuiting. There is
//! no negation handling and no synonym expansion: "don't make it smaller"
//! still shrinks, and "small" does not.

use serde::Serialize;
use tracing::info;

use crate::delta::ModificationDelta;
use crate::rules::{Rule, RULES};

/// Outcome of interpreting one prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Interpretation {
    pub delta: ModificationDelta,
    /// Names of the rules that fired, in table order.
    pub matched: Vec<&'static str>,
}

impl Interpretation {
    pub fn is_empty(&self) -> bool {
        self.delta.is_empty()
    }
}

/// Rule-table interpreter.
///
/// ## Example
///
/// ```rust
/// use deck_modify::KeywordInterpreter;
///
/// let result = KeywordInterpreter::default().interpret("Show an EXPLODED view");
/// assert_eq!(result.matched, vec!["exploded"]);
/// assert_eq!(result.delta.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KeywordInterpreter {
    rules: &'static [Rule],
}

impl Default for KeywordInterpreter {
    fn default() -> Self {
        Self { rules: RULES }
    }
}

impl KeywordInterpreter {
    pub fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Interprets one line of text. Never touches configuration.
    pub fn interpret(&self, prompt: &str) -> Interpretation {
        let lowered = prompt.to_lowercase();
        let mut result = Interpretation::default();

        for rule in self.rules {
            if rule.trigger.matches(&lowered) {
                result.delta.merge(rule.delta());
                result.matched.push(rule.name);
            }
        }

        info!(
            prompt,
            matched = ?result.matched,
            changes = result.delta.len(),
            "interpreted modification prompt"
        );
        result
    }
}
