//! # Tests for Config Constants
//!
//! Sanity checks on the values other crates build on.

use crate::constants::*;

// =============================================================================
// ASSEMBLY TESTS
// =============================================================================

#[test]
fn test_explode_multiplier_doubles() {
    assert_eq!(DEFAULT_EXPLODE_MULTIPLIER, 2.0);
}

#[test]
fn test_scale_epsilon_is_small() {
    assert!(SCALE_EPSILON > 0.0);
    assert!(SCALE_EPSILON < 1e-6, "SCALE_EPSILON should be small for precision");
}

#[test]
fn test_segments_form_smooth_circles() {
    assert!(DEFAULT_SEGMENTS >= 32);
}

// =============================================================================
// PATH TESTS
// =============================================================================

#[test]
fn test_scad_output_lives_in_output_dir() {
    assert!(DEFAULT_SCAD_OUTPUT.starts_with(DEFAULT_OUTPUT_DIR));
    assert!(DEFAULT_SCAD_OUTPUT.ends_with(".scad"));
}

#[test]
fn test_catalog_dirs_live_under_asset_root() {
    assert!(DEFAULT_STL_IMPORT_DIR.starts_with(DEFAULT_ASSET_ROOT));
    assert!(DEFAULT_BUTTONS_STL_DIR.starts_with(DEFAULT_ASSET_ROOT));
}

#[test]
fn test_generated_file_names() {
    assert!(CATALOG_FILE_NAME.ends_with(".json"));
    assert!(IMPORTS_FILE_NAME.ends_with(".scad"));
}
