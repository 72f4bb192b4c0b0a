//! Tests for the configuration store.

use super::*;

// =============================================================================
// GET / SET
// =============================================================================

#[test]
fn test_get_default_values() {
    let config = DeckConfig::default();
    assert_eq!(config.get("dimensions.case_length").unwrap(), ParamValue::Number(294.0));
    assert_eq!(config.get("visibility.buttons").unwrap(), ParamValue::Bool(true));
    assert_eq!(config.get("exploded.multiplier").unwrap(), ParamValue::Number(2.0));
    assert_eq!(
        config.get("layout.trigger_mounts.spacing").unwrap(),
        ParamValue::Number(230.0)
    );
}

#[test]
fn test_set_then_get() {
    let mut config = DeckConfig::default();
    config.set("dimensions.case_length", 300.0).unwrap();
    config.set("layout.left_joystick.y", -35.5).unwrap();
    config.set("printing.brim", true).unwrap();

    assert_eq!(config.dimension("case_length"), Some(300.0));
    assert_eq!(config.layout["left_joystick"].y, -35.5);
    assert!(config.printing.brim);
}

#[test]
fn test_unknown_section_is_key_error() {
    let mut config = DeckConfig::default();
    let err = config.set("electronics.fan", 1.0).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownKey { ref key } if key == "electronics.fan"));
    assert!(matches!(
        config.get("electronics.fan").unwrap_err(),
        ConfigError::UnknownKey { .. }
    ));
}

#[test]
fn test_malformed_keys_are_key_errors() {
    let mut config = DeckConfig::default();
    for key in [
        "dimensions",
        "dimensions..case_length",
        "dimensions.case_length.extra",
        "layout.left_joystick.w",
        "printing.colour",
        "",
    ] {
        let err = config.set(key, 1.0).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey { .. }), "key {key:?}");
    }
}

#[test]
fn test_text_into_number_is_type_error() {
    let mut config = DeckConfig::default();
    let err = config
        .set("dimensions.case_length", ParamValue::parse("long"))
        .unwrap_err();
    match err {
        ConfigError::TypeMismatch {
            key,
            expected,
            found,
        } => {
            assert_eq!(key, "dimensions.case_length");
            assert_eq!(expected, ValueKind::Number);
            assert_eq!(found, ValueKind::Text);
        }
        other => panic!("Expected TypeMismatch, got {other:?}"),
    }
    assert_eq!(config.dimension("case_length"), Some(294.0));
}

#[test]
fn test_flags_reject_numbers() {
    let mut config = DeckConfig::default();
    assert!(matches!(
        config.set("visibility.buttons", 0.0).unwrap_err(),
        ConfigError::TypeMismatch { .. }
    ));
    assert!(matches!(
        config.set("layout.left_joystick.x", true).unwrap_err(),
        ConfigError::TypeMismatch { .. }
    ));
}

#[test]
fn test_text_leaves_accept_any_value() {
    let mut config = DeckConfig::default();
    config.set("project.version", ParamValue::parse("2")).unwrap();
    assert_eq!(config.project.version, "2");
}

#[test]
fn test_open_sections_accept_new_names() {
    let mut config = DeckConfig::default();
    config.set("dimensions.shoulder_width", 11.0).unwrap();
    config.set("layout.speaker.z", 3.0).unwrap();

    assert_eq!(config.dimension("shoulder_width"), Some(11.0));
    assert_eq!(config.layout["speaker"], Placement::new(0.0, 0.0, 3.0));
}

#[test]
fn test_no_range_validation_on_set() {
    let mut config = DeckConfig::default();
    config.set("dimensions.case_depth", -4.0).unwrap();
    assert_eq!(config.dimension("case_depth"), Some(-4.0));

    let issues = config.check();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].key, "dimensions.case_depth");
}

#[test]
fn test_default_config_has_no_issues() {
    assert!(DeckConfig::default().check().is_empty());
}

// =============================================================================
// VALUES
// =============================================================================

#[test]
fn test_param_value_parse() {
    assert_eq!(ParamValue::parse("true"), ParamValue::Bool(true));
    assert_eq!(ParamValue::parse(" -80 "), ParamValue::Number(-80.0));
    assert_eq!(ParamValue::parse("1e3"), ParamValue::Number(1000.0));
    assert_eq!(ParamValue::parse("nan"), ParamValue::Text("nan".into()));
    assert_eq!(ParamValue::parse("inf"), ParamValue::Text("inf".into()));
}

// =============================================================================
// STORE
// =============================================================================

#[test]
fn test_store_dirty_tracking() {
    let mut store = ConfigStore::default();
    assert!(store.set("dimensions.case_length", "long").is_err());
    assert!(!store.is_dirty(), "failed set must not mark dirty");

    store.set("dimensions.case_length", 300.0).unwrap();
    assert!(store.is_dirty());

    store.stamp_render("2026-01-01T00:00:00Z");
    store.mark_clean();
    assert!(!store.is_dirty());
    assert_eq!(
        store.config().project.last_render.as_deref(),
        Some("2026-01-01T00:00:00Z")
    );
}

#[test]
fn test_save_without_file_is_unbound() {
    let mut store = ConfigStore::new(DeckConfig::default());
    assert!(matches!(store.save().unwrap_err(), ConfigError::Unbound));
}

#[test]
fn test_round_trip_is_bit_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    let mut store = ConfigStore::default();
    store.set("dimensions.case_length", 0.1 + 0.2).unwrap();
    store.set("dimensions.phone_width", 1.0 / 3.0).unwrap();
    store.set("dimensions.tiny", 1e-300).unwrap();
    store.set("materials.tolerance", 0.15000000000000002).unwrap();
    store.set("layout.left_joystick.x", -80.00000000000001).unwrap();
    store.set("printing.layer_height", 0.12).unwrap();
    store.set("exploded.multiplier", 2.5).unwrap();
    store.save_to(&path).unwrap();
    assert!(!store.is_dirty());

    let loaded = ConfigStore::load(&path).unwrap();
    let before = store.config();
    let after = loaded.config();

    for (name, value) in &before.dimensions {
        assert_eq!(value.to_bits(), after.dimensions[name].to_bits(), "dimensions.{name}");
    }
    for (name, value) in &before.materials {
        assert_eq!(value.to_bits(), after.materials[name].to_bits(), "materials.{name}");
    }
    for (name, placement) in &before.layout {
        let reloaded = after.layout[name];
        for (a, b) in placement.offset().iter().zip(reloaded.offset()) {
            assert_eq!(a.to_bits(), b.to_bits(), "layout.{name}");
        }
        assert_eq!(placement.spacing, reloaded.spacing);
    }
    assert_eq!(
        before.printing.layer_height.to_bits(),
        after.printing.layer_height.to_bits()
    );
    assert_eq!(before, after);
}

#[test]
fn test_optional_sections_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "dimensions:\n  case_length: 300\nmaterials:\n  tolerance: 0.5\nprinting:\n  layer_height: 0.2\n  infill: 20\n  supports: true\n  brim: false\n",
    )
    .unwrap();

    let store = ConfigStore::load(&path).unwrap();
    let config = store.config();
    assert_eq!(config.dimension("case_length"), Some(300.0));
    assert_eq!(config.ai, AiSettings::default());
    assert_eq!(config.openscad, OpenScadSettings::default());
    assert_eq!(config.exploded, ExplodedView::default());
    assert!(config.layout.is_empty());
}

#[test]
fn test_load_or_default_binds_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let mut store = ConfigStore::load_or_default(&path).unwrap();
    assert_eq!(store.config(), &DeckConfig::default());
    store.save().unwrap();
    assert!(path.exists());
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "dimensions: [1, 2\n").unwrap();
    assert!(matches!(
        ConfigStore::load(&path).unwrap_err(),
        ConfigError::Parse { .. }
    ));
}
