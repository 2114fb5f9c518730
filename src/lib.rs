//! # Hedge
//!
//! Half-edge topology construction for polygon meshes.
//!
//! Hedge turns a polygon soup (a flat list of face-corner vertex indices plus a
//! vertex count per face) into a half-edge structure: the unique undirected
//! edges, one half-edge per face corner linked to the next half-edge of its
//! face and to its opposite on the neighbouring face, and one outgoing
//! half-edge per vertex. Only integer topology is involved; vertex positions
//! never enter the structure.
//!
//! ## Features
//!
//! - **Strict validation**: short faces, repeated vertices, length mismatches
//!   and non-manifold edges are rejected with a classified [`MeshError`](error::MeshError)
//! - **Deterministic output**: identical input gives identical indices, with or
//!   without parallel extraction
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit indices
//! - **OBJ input**: read faces straight from Wavefront OBJ files
//!
//! ## Quick Start
//!
//! ```
//! use hedge::prelude::*;
//!
//! // A quad and a triangle sharing the edge (1, 2)
//! let indices: Vec<u32> = vec![0, 1, 2, 3, 1, 4, 2];
//! let counts: Vec<u32> = vec![4, 3];
//!
//! let mesh: HalfEdgeMesh = build_from_polygons(&indices, &counts).unwrap();
//! assert_eq!(mesh.num_edges(), 6);
//! assert_eq!(mesh.num_halfedges(), 7);
//! ```
//!
//! ## Mesh Traversal
//!
//! ```
//! use hedge::prelude::*;
//!
//! # let indices: Vec<u32> = vec![0, 1, 2, 3, 1, 4, 2];
//! # let counts: Vec<u32> = vec![4, 3];
//! # let mesh: HalfEdgeMesh = build_from_polygons(&indices, &counts).unwrap();
//! // Walk the loop of a face
//! for he in mesh.face_halfedges(FaceId::new(0)) {
//!     println!("{:?} -> {:?}", mesh.origin(he), mesh.dest(he));
//! }
//!
//! // Walk the fan around a vertex, starting at its anchor
//! let v = VertexId::new(1);
//! for neighbor in mesh.vertex_neighbors(v) {
//!     println!("Neighbor: {:?}", neighbor);
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use hedge::prelude::*;
//!
//! // Two faces with the same winding over the same edges
//! let indices: Vec<u32> = vec![0, 1, 2, 0, 1, 2];
//! let counts: Vec<u32> = vec![3, 3];
//!
//! let result: Result<HalfEdgeMesh> = build_from_polygons(&indices, &counts);
//! assert!(matches!(result, Err(MeshError::NonManifoldTopology { .. })));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use hedge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{FaceDefect, MeshError, NonManifoldViolation, Result};
    pub use crate::mesh::{
        build_from_polygons, build_from_quads, build_from_triangles, build_with_options,
        to_face_vertex, BuildOptions, Edge, EdgeId, Face, FaceId, HalfEdge, HalfEdgeId,
        HalfEdgeMesh, MeshIndex, VertexId,
    };
}
