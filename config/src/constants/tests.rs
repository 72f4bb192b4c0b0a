//! Tests for the centralized configuration constants.

use super::*;

/// Preview sizes grow with quality.
#[test]
fn preview_sizes_are_ordered() {
    assert!(PREVIEW_SIZE_LOW[0] < PREVIEW_SIZE_MEDIUM[0]);
    assert!(PREVIEW_SIZE_MEDIUM[0] < PREVIEW_SIZE_HIGH[0]);
    assert!(PREVIEW_SIZE_LOW[1] < PREVIEW_SIZE_MEDIUM[1]);
    assert!(PREVIEW_SIZE_MEDIUM[1] < PREVIEW_SIZE_HIGH[1]);
}

/// Keyword deltas move in opposite directions around the stock values.
#[test]
fn keyword_deltas_bracket_defaults() {
    assert!(SHRINK_SCALE < NEUTRAL_SCALE);
    assert!(GROW_SCALE > NEUTRAL_SCALE);
    assert!(COMPACT_GRIP_OFFSET < DEFAULT_GRIP_OFFSET);
    assert!(EXTENDED_GRIP_OFFSET > DEFAULT_GRIP_OFFSET);
}
