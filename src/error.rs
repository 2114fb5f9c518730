//! Error types for hedge.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building or loading a half-edge mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The face-vertex counts and the index array disagree in length.
    #[error("face vertex counts sum to {expected} but {actual} indices were supplied")]
    MalformedInput {
        /// Sum of all face vertex counts (saturated on overflow).
        expected: usize,
        /// Length of the index array.
        actual: usize,
    },

    /// A single face is unusable on its own.
    #[error("face {face} is invalid: {defect}")]
    InvalidFace {
        /// The face index.
        face: usize,
        /// What is wrong with the face.
        defect: FaceDefect,
    },

    /// Faces that are individually fine combine into a non-manifold surface.
    #[error("non-manifold topology at edge ({v0}, {v1}) in face {face}: {violation}")]
    NonManifoldTopology {
        /// The face whose half-edge exposed the conflict.
        face: usize,
        /// Smaller vertex of the conflicting edge.
        v0: usize,
        /// Larger vertex of the conflicting edge.
        v1: usize,
        /// The kind of conflict.
        violation: NonManifoldViolation,
    },

    /// The chosen index type or the vertex slot limit cannot address every
    /// element.
    #[error("mesh needs {count} {element} but at most {max} can be addressed")]
    IndexOverflow {
        /// Element kind ("half-edges", "vertices", ...).
        element: &'static str,
        /// Number of elements required.
        count: usize,
        /// Largest supported count.
        max: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A mesh file could not be parsed.
    #[error("failed to parse {path} at line {line}: {message}")]
    Parse {
        /// The file path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },
}

/// Reason a face was rejected by [`MeshError::InvalidFace`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceDefect {
    /// The face has fewer than three vertices.
    #[error("has {count} vertices, at least 3 are required")]
    TooFewVertices {
        /// The declared vertex count.
        count: usize,
    },
    /// The same vertex appears twice in the face loop.
    #[error("uses vertex {vertex} more than once")]
    RepeatedVertex {
        /// The repeated vertex index.
        vertex: usize,
    },
}

/// Reason an edge was rejected by [`MeshError::NonManifoldTopology`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonManifoldViolation {
    /// Two faces traverse the edge in the same direction.
    #[error("directed edge leaving vertex {origin} is already used by another face")]
    DuplicateDirectedEdge {
        /// Origin vertex of both half-edges.
        origin: usize,
    },
    /// More than two faces share the edge.
    #[error("edge is shared by more than two faces")]
    TooManyFaces,
}

impl MeshError {
    /// Create a parse error for the given file and line.
    pub fn parse<P: Into<PathBuf>, M: Into<String>>(path: P, line: usize, message: M) -> Self {
        MeshError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Whether this error is one of the three topology classifications
    /// produced by the builder.
    pub fn is_topology_error(&self) -> bool {
        matches!(
            self,
            MeshError::MalformedInput { .. }
                | MeshError::InvalidFace { .. }
                | MeshError::NonManifoldTopology { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_offenders() {
        let err = MeshError::InvalidFace {
            face: 3,
            defect: FaceDefect::RepeatedVertex { vertex: 7 },
        };
        assert_eq!(err.to_string(), "face 3 is invalid: uses vertex 7 more than once");

        let err = MeshError::NonManifoldTopology {
            face: 1,
            v0: 0,
            v1: 2,
            violation: NonManifoldViolation::TooManyFaces,
        };
        assert_eq!(
            err.to_string(),
            "non-manifold topology at edge (0, 2) in face 1: edge is shared by more than two faces"
        );
    }

    #[test]
    fn test_defect_messages() {
        let err = MeshError::InvalidFace {
            face: 0,
            defect: FaceDefect::TooFewVertices { count: 2 },
        };
        assert_eq!(err.to_string(), "face 0 is invalid: has 2 vertices, at least 3 are required");

        let violation = NonManifoldViolation::DuplicateDirectedEdge { origin: 4 };
        assert_eq!(
            violation.to_string(),
            "directed edge leaving vertex 4 is already used by another face"
        );

        let err = MeshError::IndexOverflow {
            element: "vertices",
            count: 1001,
            max: 1000,
        };
        assert_eq!(err.to_string(), "mesh needs 1001 vertices but at most 1000 can be addressed");
    }

    #[test]
    fn test_topology_classification() {
        assert!(MeshError::MalformedInput { expected: 4, actual: 3 }.is_topology_error());
        assert!(!MeshError::UnsupportedFormat { extension: "stl".into() }.is_topology_error());
    }
}
