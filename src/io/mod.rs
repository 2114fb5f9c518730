//! Mesh file input.
//!
//! The half-edge builder only needs a flat polygon soup. This module reads one
//! from disk and hands it to the builder.
//!
//! # Supported Formats
//!
//! | Format | Extension | Notes |
//! |--------|-----------|-------|
//! | Wavefront OBJ | `.obj` | Faces only, no triangulation |
//!
//! # Usage
//!
//! ```no_run
//! use hedge::io::load;
//!
//! let mesh = load("model.obj").unwrap();
//! println!("{} edges", mesh.num_edges());
//! ```

pub mod obj;

use std::path::Path;

pub use obj::PolygonSoup;

use crate::error::{MeshError, Result};
use crate::mesh::{build_with_options, BuildOptions, HalfEdgeMesh};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

/// Read the polygon soup of a file with automatic format detection.
pub fn load_faces<P: AsRef<Path>>(path: P) -> Result<PolygonSoup> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    match format {
        Format::Obj => obj::load_faces(path),
    }
}

/// Load a file and build its half-edge topology.
///
/// # Example
///
/// ```no_run
/// use hedge::io::load;
/// use hedge::mesh::HalfEdgeMesh;
///
/// let mesh: HalfEdgeMesh = load("model.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<HalfEdgeMesh<u32>> {
    load_with_options(path, &BuildOptions::default())
}

/// Load a file and build its half-edge topology with explicit options.
pub fn load_with_options<P: AsRef<Path>>(
    path: P,
    options: &BuildOptions,
) -> Result<HalfEdgeMesh<u32>> {
    let soup = load_faces(path)?;
    build_with_options(&soup.indices, &soup.counts, options)
}
