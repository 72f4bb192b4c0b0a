//! # OpenSCAD Emission
//!
//! Renders an [`Assembly`] as OpenSCAD source. Hidden components are left
//! out; failed components never reached the tree.
//!
//! ## Example Output
//!
//! ```text
//! $fn = 64;
//!
//! union() {
//!     difference() {
//!         union() {
//!             // housing_front
//!             color([0.2, 0.2, 0.2, 1]) translate([0, 0, 10]) import("assets/housing/NucDeck_Front_Cover.STL");
//!         }
//!         // phone_mockup
//!         color([0.1, 0.1, 0.1, 0.5]) translate([0, 0, 4]) cube([151.7, 69.1, 7.9], center = true);
//!     }
//! }
//! ```

use std::fmt::Write;

use config::constants::DEFAULT_SEGMENTS;
use deck_config::ProjectInfo;
use glam::DVec3;

use crate::assembly::Assembly;
use crate::csg::{ComponentOp, CsgNode, ResolvedSource};

const INDENT: &str = "    ";

/// Renders the assembly as a complete OpenSCAD script.
pub fn emit_scad(assembly: &Assembly, project: &ProjectInfo) -> String {
    let mut out = String::new();
    out.push_str("// Generated by deckforge from the project configuration.\n");
    let _ = writeln!(
        out,
        "// Project: {} {}",
        single_line(&project.name),
        single_line(&project.version)
    );
    for failure in &assembly.failures {
        let _ = writeln!(
            out,
            "// Skipped {}: {}",
            failure.component,
            single_line(&failure.error.to_string())
        );
    }
    let _ = writeln!(out, "$fn = {DEFAULT_SEGMENTS};");
    out.push('\n');

    if assembly.tree.has_visible() {
        write_node(&mut out, &assembly.tree, 0);
    }
    out
}

/// Line breaks would end a `//` comment early.
fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

fn write_node(out: &mut String, node: &CsgNode, depth: usize) {
    let pad = INDENT.repeat(depth);
    match node {
        CsgNode::Component(op) => write_component(out, op, &pad),
        CsgNode::Union { operands } => write_block(out, "union()", operands.iter(), depth),
        CsgNode::Intersection { operands } => {
            write_block(out, "intersection()", operands.iter(), depth)
        }
        CsgNode::Difference { base, cutouts } => write_block(
            out,
            "difference()",
            std::iter::once(base.as_ref()).chain(cutouts.iter()),
            depth,
        ),
        CsgNode::Scale { factor, child } => {
            let f = num(*factor);
            let _ = writeln!(out, "{pad}scale([{f}, {f}, {f}]) {{");
            write_node(out, child, depth + 1);
            let _ = writeln!(out, "{pad}}}");
        }
    }
}

fn write_block<'a>(
    out: &mut String,
    header: &str,
    children: impl Iterator<Item = &'a CsgNode>,
    depth: usize,
) {
    let pad = INDENT.repeat(depth);
    let _ = writeln!(out, "{pad}{header} {{");
    for child in children.filter(|child| child.has_visible()) {
        write_node(out, child, depth + 1);
    }
    let _ = writeln!(out, "{pad}}}");
}

fn write_component(out: &mut String, op: &ComponentOp, pad: &str) {
    let _ = writeln!(out, "{pad}// {}", op.id);
    let [r, g, b, a] = op.color;
    let color = format!("[{r}, {g}, {b}, {a}]");
    let shape = shape(&op.source);
    for at in op.instances() {
        let _ = writeln!(out, "{pad}color({color}) translate({}) {shape}", vector(at));
    }
}

fn shape(source: &ResolvedSource) -> String {
    match source {
        ResolvedSource::Mesh { path } => {
            let path = path.to_string_lossy().replace('\\', "/").replace('"', "\\\"");
            format!("import(\"{path}\");")
        }
        ResolvedSource::Cuboid { size } => format!(
            "cube([{}, {}, {}], center = true);",
            num(size[0]),
            num(size[1]),
            num(size[2])
        ),
        ResolvedSource::Cylinder { height, diameter } => format!(
            "cylinder(h = {}, d = {}, center = true);",
            num(*height),
            num(*diameter)
        ),
    }
}

fn vector(v: DVec3) -> String {
    format!("[{}, {}, {}]", num(v.x), num(v.y), num(v.z))
}

/// Shortest round-trip decimal, with negative zero folded to zero.
fn num(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}
