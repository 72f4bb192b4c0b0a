//! # Mesh Inspection
//!
//! Reads an STL (ASCII or binary) and summarizes it. Geometry is never
//! modified here.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// Triangle count and axis-aligned bounds of one mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshSummary {
    pub triangles: usize,
    /// Distinct vertex positions.
    pub vertices: usize,
    pub min: DVec3,
    pub max: DVec3,
}

impl MeshSummary {
    /// Extent along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }
}

/// Reads and summarizes an STL file.
pub fn inspect(path: &Path) -> Result<MeshSummary, MeshError> {
    let file = File::open(path).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let mesh = stl_io::read_stl(&mut reader).map_err(|e| MeshError::parse(path, e.to_string()))?;

    if mesh.faces.is_empty() {
        return Err(MeshError::Empty {
            path: path.to_path_buf(),
        });
    }

    let mut positions = mesh
        .vertices
        .iter()
        .map(|v| DVec3::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2])));
    // Non-empty faces imply at least one vertex.
    let first = positions.next().unwrap_or(DVec3::ZERO);
    let (min, max) = positions.fold((first, first), |(min, max), v| (min.min(v), max.max(v)));

    Ok(MeshSummary {
        triangles: mesh.faces.len(),
        vertices: mesh.vertices.len(),
        min,
        max,
    })
}
