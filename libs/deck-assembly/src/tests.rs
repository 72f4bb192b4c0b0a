//! Tests for assembly generation and script emission.

use std::path::Path;

use approx::assert_relative_eq;
use deck_config::{DeckConfig, Placement};
use glam::DVec3;

use super::*;
use crate::component::SourceRef;

// =============================================================================
// HELPERS
// =============================================================================

/// Assets containing every mesh in the component table under `assets/`.
fn full_assets() -> InMemoryAssets {
    let mut assets = InMemoryAssets::default();
    for def in COMPONENTS {
        if let SourceRef::Mesh(relative) = def.source {
            assets.insert(Path::new("assets").join(relative), b"solid mesh".to_vec());
        }
    }
    assets
}

fn assemble(config: &DeckConfig, assets: &InMemoryAssets) -> Assembly {
    Assembler::new(assets, AssemblyOptions::from_config(config))
        .assemble(config)
        .unwrap()
}

// =============================================================================
// PLACEMENT
// =============================================================================

#[test]
fn test_left_joystick_scenario() {
    let mut config = DeckConfig::default();
    config.set("dimensions.case_length", 300.0).unwrap();
    config
        .layout
        .insert("left_joystick".into(), Placement::new(-80.0, -30.0, 0.0));
    let assets = full_assets();

    let assembly = assemble(&config, &assets);
    let op = assembly.tree.find("left_joystick").unwrap();
    assert_eq!(op.translation, DVec3::new(-80.0, -30.0, 0.0));

    config.set("exploded.enabled", true).unwrap();
    let assembly = assemble(&config, &assets);
    let op = assembly.tree.find("left_joystick").unwrap();
    assert_eq!(op.translation, DVec3::new(-160.0, -60.0, 0.0));
}

#[test]
fn test_exploded_doubles_and_restores_every_layout_component() {
    let mut config = DeckConfig::default();
    let assets = full_assets();
    let base = assemble(&config, &assets);

    config.set("exploded.enabled", true).unwrap();
    let exploded = assemble(&config, &assets);

    config.set("exploded.enabled", false).unwrap();
    let restored = assemble(&config, &assets);

    for name in config.layout.keys() {
        let before = base.tree.find(name).unwrap().translation;
        let after = exploded.tree.find(name).unwrap().translation;
        assert_eq!(after, before * 2.0, "{name}");
        assert_relative_eq!(after.length(), before.length() * 2.0);
        assert_eq!(restored.tree.find(name).unwrap().translation, before, "{name}");
    }
}

#[test]
fn test_custom_explode_multiplier() {
    let mut config = DeckConfig::default();
    config.set("exploded.enabled", true).unwrap();
    config.set("exploded.multiplier", 3.0).unwrap();
    let op_translation = translation(component::find("right_joystick").unwrap(), &config);
    assert_eq!(op_translation, DVec3::new(240.0, -90.0, 0.0));
}

#[test]
fn test_grip_offset_pushes_grips_outward() {
    let mut config = DeckConfig::default();
    config.set("dimensions.grip_offset", 15.0).unwrap();
    let left = translation(component::find("left_grip").unwrap(), &config);
    let right = translation(component::find("right_grip").unwrap(), &config);
    assert_eq!(left.x, -111.0 - 15.0);
    assert_eq!(right.x, 111.0 + 15.0);
}

#[test]
fn test_missing_layout_entry_sits_at_origin() {
    let mut config = DeckConfig::default();
    config.layout.remove("lcd_retainer");
    let assembly = assemble(&config, &full_assets());
    let op = assembly.tree.find("lcd_retainer").unwrap();
    assert_eq!(op.translation, DVec3::ZERO);
}

#[test]
fn test_pair_spacing_yields_two_instances() {
    let config = DeckConfig::default();
    let assembly = assemble(&config, &full_assets());
    let op = assembly.tree.find("trigger_mounts").unwrap();
    assert_eq!(
        op.instances(),
        vec![DVec3::new(-115.0, 55.0, 0.0), DVec3::new(115.0, 55.0, 0.0)]
    );
}

// =============================================================================
// VISIBILITY
// =============================================================================

#[test]
fn test_visibility_defaults_to_shown() {
    let mut config = DeckConfig::default();
    config.visibility.clear();
    config.set("visibility.buttons", false).unwrap();

    let assembly = assemble(&config, &full_assets());
    assert!(!assembly.tree.find("buttons").unwrap().visible);
    assert!(assembly.tree.find("left_joystick").unwrap().visible);
}

// =============================================================================
// TREE SHAPE
// =============================================================================

#[test]
fn test_operations_follow_table_order() {
    let config = DeckConfig::default();
    let assembly = assemble(&config, &full_assets());
    let emitted: Vec<&str> = assembly.operations().iter().map(|op| op.id).collect();
    let table: Vec<&str> = component::ids().collect();
    assert_eq!(emitted, table);
    assert!(assembly.is_complete());
}

#[test]
fn test_difference_cuts_cavities_from_hull() {
    let config = DeckConfig::default();
    let assembly = assemble(&config, &full_assets());

    let CsgNode::Union { operands } = &assembly.tree else {
        panic!("Expected Union, got {:?}", assembly.tree);
    };
    let CsgNode::Difference { base, cutouts } = &operands[0] else {
        panic!("Expected Difference first, got {:?}", operands[0]);
    };
    assert_eq!(operands[0].operation(), Some(BooleanOperation::Difference));

    let shells: Vec<Role> = base.components().iter().map(|op| op.role).collect();
    assert!(shells.iter().all(|role| *role == Role::Shell));
    assert_eq!(shells.len(), 4);

    let cut: Vec<&str> = cutouts
        .iter()
        .flat_map(|node| node.components())
        .map(|op| op.id)
        .collect();
    assert_eq!(cut, vec!["phone_mockup", "battery_mockup"]);

    let order = operands[0].operands();
    assert!(matches!(order[0], CsgNode::Union { .. }), "base comes first");
}

#[test]
fn test_scale_wraps_tree() {
    let mut config = DeckConfig::default();
    config.set("dimensions.scale", 0.8).unwrap();
    let assembly = assemble(&config, &full_assets());
    match &assembly.tree {
        CsgNode::Scale { factor, child } => {
            assert_eq!(*factor, 0.8);
            assert_eq!(child.operation(), Some(BooleanOperation::Union));
        }
        other => panic!("Expected Scale, got {other:?}"),
    }
}

// =============================================================================
// PARTIAL FAILURE
// =============================================================================

#[test]
fn test_missing_housing_front_is_partial_success() {
    let config = DeckConfig::default();
    let mut assets = full_assets();
    assets.remove(Path::new("assets/housing/NucDeck_Front_Cover.STL"));

    let assembly = assemble(&config, &assets);
    assert!(assembly.tree.find("housing_front").is_none());
    assert!(matches!(
        assembly.failure("housing_front"),
        Some(GeometrySourceError::MissingMesh { .. })
    ));
    assert_eq!(assembly.failures.len(), 1);
    assert_eq!(assembly.operations().len(), COMPONENTS.len() - 1);
}

#[test]
fn test_empty_mesh_is_source_error() {
    let config = DeckConfig::default();
    let mut assets = full_assets();
    assets.insert("assets/buttons/ABXY_Buttons.STL", Vec::new());

    let assembly = assemble(&config, &assets);
    assert!(matches!(
        assembly.failure("buttons"),
        Some(GeometrySourceError::EmptyMesh { .. })
    ));
}

#[test]
fn test_missing_dimension_fails_only_that_primitive() {
    let mut config = DeckConfig::default();
    config.dimensions.remove("battery_height");

    let assembly = assemble(&config, &full_assets());
    assert_eq!(
        assembly.failure("battery_mockup"),
        Some(&GeometrySourceError::MissingDimension {
            name: "battery_height".into()
        })
    );
    assert!(assembly.tree.find("phone_mockup").is_some());
}

#[test]
fn test_no_shells_drops_cavities() {
    let config = DeckConfig::default();
    let assembly = assemble(&config, &InMemoryAssets::default());
    assert!(assembly.tree.find("phone_mockup").is_none());
    assert!(assembly.tree.find("left_joystick").is_some());
    assert!(assembly.failure("phone_mockup").is_none());
}

// =============================================================================
// UNKNOWN LAYOUT NAMES
// =============================================================================

#[test]
fn test_unknown_layout_name_warns_and_ignores() {
    let mut config = DeckConfig::default();
    config.set("layout.speaker.x", 10.0).unwrap();

    let assembly = assemble(&config, &full_assets());
    assert_eq!(assembly.ignored_layout, vec!["speaker".to_string()]);
    assert!(assembly.tree.find("speaker").is_none());
    assert!(assembly.is_complete());
}

#[test]
fn test_unknown_layout_name_rejected_under_policy() {
    let mut config = DeckConfig::default();
    config.set("layout.speaker.x", 10.0).unwrap();
    let assets = full_assets();

    let options = AssemblyOptions::from_config(&config).with_policy(UnknownComponentPolicy::Reject);
    let err = Assembler::new(&assets, options).assemble(&config).unwrap_err();
    assert_eq!(
        err,
        AssemblyError::UnknownComponent {
            name: "speaker".into()
        }
    );
}

// =============================================================================
// SCRIPT EMISSION
// =============================================================================

#[test]
fn test_scad_emits_hull_before_cutouts() {
    let config = DeckConfig::default();
    let script = emit_scad(&assemble(&config, &full_assets()), &config.project);

    let difference = script.find("difference()").unwrap();
    let front = script.find("NucDeck_Front_Cover.STL").unwrap();
    let phone = script.find("// phone_mockup").unwrap();
    assert!(difference < front && front < phone);
    assert!(script.contains("cube([151.7, 69.1, 7.9], center = true);"));
    assert!(script.contains("translate([-80, -30, 0]) cylinder(h = 8, d = 32, center = true);"));
    assert!(script.starts_with("// Generated by deckforge"));
}

#[test]
fn test_scad_omits_hidden_and_failed_components() {
    let mut config = DeckConfig::default();
    config.set("visibility.buttons", false).unwrap();
    let mut assets = full_assets();
    assets.remove(Path::new("assets/housing/NucDeck_LCD_Retainer.STL"));

    let script = emit_scad(&assemble(&config, &assets), &config.project);
    assert!(!script.contains("// buttons"));
    assert!(!script.contains("// lcd_retainer"));
    assert!(script.contains("// Skipped lcd_retainer: Mesh file not found"));
}

#[test]
fn test_scad_header_stays_in_comments() {
    let mut config = DeckConfig::default();
    config.set("project.name", "Deck\ncube(1000);").unwrap();

    let script = emit_scad(&assemble(&config, &full_assets()), &config.project);
    assert!(script.contains("// Project: Deck cube(1000);"));
    assert!(!script.lines().any(|line| line.starts_with("cube(1000)")));
}

#[test]
fn test_scad_hidden_hull_removes_difference() {
    let mut config = DeckConfig::default();
    for shell in ["housing_front", "housing_back", "left_grip", "right_grip"] {
        config.set(&format!("visibility.{shell}"), false).unwrap();
    }
    let script = emit_scad(&assemble(&config, &full_assets()), &config.project);
    assert!(!script.contains("difference()"));
    assert!(!script.contains("// phone_mockup"));
    assert!(script.contains("// left_joystick"));
}

#[test]
fn test_scad_pair_and_scale() {
    let mut config = DeckConfig::default();
    config.set("dimensions.scale", 0.8).unwrap();
    let script = emit_scad(&assemble(&config, &full_assets()), &config.project);
    assert!(script.contains("scale([0.8, 0.8, 0.8]) {"));
    assert!(script.contains("translate([-115, 55, 0]) import(\"assets/housing/NucDeck_Trigger_Mount.STL\");"));
    assert!(script.contains("translate([115, 55, 0]) import(\"assets/housing/NucDeck_Trigger_Mount.STL\");"));
}
