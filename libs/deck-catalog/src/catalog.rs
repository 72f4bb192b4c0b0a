//! # Catalog
//!
//! Scans the housing and button directories, categorizes every STL found and
//! inspects the meshes in parallel.
//!
//! ## Output
//!
//! ```text
//! <output_dir>/model_catalog.json   groups → [ModelInfo]
//! <output_dir>/model_imports.scad   module <category>_<n>() { import("..."); }
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use config::constants::{CATALOG_FILE_NAME, IMPORTS_FILE_NAME};
use deck_config::PathSettings;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::category::{categorize, Category};
use crate::error::CatalogError;
use crate::mesh::{inspect, MeshSummary};

// =============================================================================
// TYPES
// =============================================================================

/// A directory to scan and the catalog group it fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub group: &'static str,
    pub root: PathBuf,
}

impl Source {
    /// The housing and button directories from the `paths` section.
    pub fn from_paths(paths: &PathSettings) -> Vec<Source> {
        vec![
            Source {
                group: "housing_stl",
                root: PathBuf::from(&paths.stl_import),
            },
            Source {
                group: "buttons_stl",
                root: PathBuf::from(&paths.buttons_stl),
            },
        ]
    }
}

/// One catalogued mesh file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: u64,
    pub category: Category,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshSummary>,
    /// Why the mesh could not be inspected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Scanned models by group, each group sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub groups: BTreeMap<String, Vec<ModelInfo>>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn models(&self) -> impl Iterator<Item = &ModelInfo> {
        self.groups.values().flatten()
    }

    /// Models in one category, across groups.
    pub fn by_category(&self, category: Category) -> Vec<&ModelInfo> {
        self.models().filter(|m| m.category == category).collect()
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// OpenSCAD source with one import module per model.
    ///
    /// Module names are `<category>_<n>`, numbered per category in catalog
    /// order.
    pub fn imports_scad(&self) -> String {
        let mut out = String::from("// Auto-generated model imports\n");
        let mut counters: BTreeMap<Category, usize> = BTreeMap::new();

        for (group, models) in &self.groups {
            if models.is_empty() {
                continue;
            }
            let _ = writeln!(out, "\n// {group}");
            for model in models {
                let index = counters.entry(model.category).or_insert(0);
                let path = model.path.to_string_lossy().replace('\\', "/");
                let _ = writeln!(out, "module {}_{}() {{", model.category, index);
                let _ = writeln!(out, "    import(\"{}\");", path.replace('"', "\\\""));
                out.push_str("}\n");
                *index += 1;
            }
        }
        out
    }

    /// Writes the JSON catalog and the import module into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<(PathBuf, PathBuf), CatalogError> {
        fs::create_dir_all(dir).map_err(|source| CatalogError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let catalog_path = dir.join(CATALOG_FILE_NAME);
        write(&catalog_path, self.to_json()?)?;
        let imports_path = dir.join(IMPORTS_FILE_NAME);
        write(&imports_path, self.imports_scad())?;

        info!(
            models = self.len(),
            catalog = %catalog_path.display(),
            imports = %imports_path.display(),
            "catalog written"
        );
        Ok((catalog_path, imports_path))
    }
}

// =============================================================================
// BUILD
// =============================================================================

/// Scans every source and inspects the meshes found.
///
/// A missing directory yields an empty group. An unreadable mesh is kept in
/// the catalog with its `error` set.
pub fn build(sources: &[Source]) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::default();
    for source in sources {
        let files = scan(&source.root)?;
        debug!(group = source.group, files = files.len(), "scanned");
        let models: Vec<ModelInfo> = files.par_iter().map(|path| describe(path)).collect();
        catalog.groups.insert(source.group.to_string(), models);
    }
    Ok(catalog)
}

/// Lists `.stl` files (any case) under `root`, recursively, sorted.
pub fn scan(root: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let mut found = Vec::new();
    if !root.exists() {
        warn!(root = %root.display(), "asset directory not found");
        return Ok(found);
    }
    walk(root, &mut found).map_err(|source| CatalogError::Scan {
        path: root.to_path_buf(),
        source,
    })?;
    found.sort();
    Ok(found)
}

/// Symlinked directories are not followed.
fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            walk(&path, found)?;
        } else if is_stl(&path) {
            found.push(path);
        }
    }
    Ok(())
}

fn is_stl(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("stl"))
}

fn describe(path: &Path) -> ModelInfo {
    let category = categorize(path);
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let description = category
        .description()
        .map_or_else(|| format!("3D model component: {name}"), str::to_string);
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    let (mesh, error) = match inspect(path) {
        Ok(summary) => (Some(summary), None),
        Err(err) => {
            warn!(%err, "mesh inspection failed");
            (None, Some(err.to_string()))
        }
    };

    ModelInfo {
        name,
        path: path.to_path_buf(),
        kind: "stl".to_string(),
        size,
        category,
        description,
        mesh,
        error,
    }
}

fn write(path: &Path, contents: String) -> Result<(), CatalogError> {
    fs::write(path, contents).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })
}
