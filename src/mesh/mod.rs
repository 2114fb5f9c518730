//! Core mesh data structures.
//!
//! This module provides the half-edge topology and the builder that derives
//! it from a polygon soup.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`], which stores the unique undirected
//! edges of a polygon mesh, one half-edge per face corner linked into face
//! loops and to its opposite, and one outgoing half-edge per vertex. Only
//! topology is stored; vertex positions never enter the structure.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//! - [`EdgeId`] - Identifies a full edge
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! ```
//! use hedge::mesh::{build_from_polygons, HalfEdgeMesh};
//!
//! let indices: Vec<u32> = vec![0, 1, 2, 3];
//! let counts: Vec<u32> = vec![4];
//!
//! let mesh: HalfEdgeMesh = build_from_polygons(&indices, &counts).unwrap();
//! assert_eq!(mesh.num_edges(), 4);
//! assert!(!mesh.is_closed());
//! ```

mod builder;
mod halfedge;
mod index;

pub use builder::{
    build_from_polygons, build_from_quads, build_from_triangles, build_with_options,
    to_face_vertex, BuildOptions,
};
pub use halfedge::{Edge, Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, VertexFanIter};
pub use index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
