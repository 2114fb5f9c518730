//! Half-edge mesh data structure.
//!
//! This module provides the read-only half-edge topology produced by the
//! builder. The structure enables O(1) adjacency queries and is the foundation
//! for downstream algorithms (boundary detection, one-ring traversal,
//! subdivision, simplification).
//!
//! # Structure
//!
//! - Each undirected **edge** `(v0, v1)` is stored once, with `v0 < v1`
//! - Each face corner produces one **half-edge** that knows its edge, the
//!   **next** and **previous** half-edge around its face, its **origin** vertex,
//!   its face, and its **opposite** half-edge on the neighbouring face
//! - Each vertex stores one outgoing half-edge (its *anchor*)
//! - Each face stores its first half-edge and its vertex count
//!
//! # Boundary Handling
//!
//! There are no phantom half-edges outside the surface. A boundary half-edge
//! is simply one whose `opposite` is `None`. A vertex on the boundary is
//! anchored at an outgoing boundary half-edge, so fan traversal from the
//! anchor starts at one end of the fan and walks to the other.
//!
//! Half-edge `i` always corresponds to corner `i` of the input index array.

use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};

/// An undirected edge, stored with its endpoints in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<I: MeshIndex = u32> {
    /// The smaller endpoint.
    pub v0: VertexId<I>,
    /// The larger endpoint.
    pub v1: VertexId<I>,
}

impl<I: MeshIndex> Edge<I> {
    /// Create an edge from two endpoints in any order.
    pub fn new(a: VertexId<I>, b: VertexId<I>) -> Self {
        if a <= b {
            Self { v0: a, v1: b }
        } else {
            Self { v0: b, v1: a }
        }
    }

    /// Check whether `v` is an endpoint of this edge.
    #[inline]
    pub fn contains(&self, v: VertexId<I>) -> bool {
        self.v0 == v || self.v1 == v
    }

    /// Get the endpoint opposite `v`, if `v` is an endpoint.
    pub fn other(&self, v: VertexId<I>) -> Option<VertexId<I>> {
        if v == self.v0 {
            Some(self.v1)
        } else if v == self.v1 {
            Some(self.v0)
        } else {
            None
        }
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The undirected edge this half-edge traverses.
    pub edge: EdgeId<I>,

    /// The next half-edge around the face.
    pub next: HalfEdgeId<I>,

    /// The previous half-edge around the face.
    pub prev: HalfEdgeId<I>,

    /// The half-edge traversing the same edge in the other direction.
    /// `None` on the boundary.
    pub opposite: Option<HalfEdgeId<I>>,

    /// The vertex this half-edge leaves.
    pub origin: VertexId<I>,

    /// The face this half-edge belongs to.
    pub face: FaceId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Check if this half-edge is on the boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.opposite.is_none()
    }
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face<I: MeshIndex = u32> {
    /// The half-edge leaving the face's first vertex.
    pub halfedge: HalfEdgeId<I>,

    /// Number of vertices (and half-edges) in the face loop.
    pub count: usize,
}

/// A half-edge topology over a polygon mesh.
///
/// Built once by [`build_from_polygons`](super::build_from_polygons) and never
/// mutated afterwards, so it can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    /// All unique undirected edges.
    pub(crate) edges: Vec<Edge<I>>,

    /// All half-edges, one per face corner.
    pub(crate) halfedges: Vec<HalfEdge<I>>,

    /// All faces.
    pub(crate) faces: Vec<Face<I>>,

    /// One outgoing half-edge per vertex index, `None` if unreferenced.
    pub(crate) vertex_halfedges: Vec<Option<HalfEdgeId<I>>>,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
            vertex_halfedges: Vec::new(),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertex slots (largest referenced index + 1).
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertex_halfedges.len()
    }

    /// Get the number of undirected edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of edges used by only one face.
    pub fn num_boundary_edges(&self) -> usize {
        self.halfedges.iter().filter(|he| he.is_boundary()).count()
    }

    /// Check whether every edge is shared by two faces.
    pub fn is_closed(&self) -> bool {
        self.halfedges.iter().all(|he| !he.is_boundary())
    }

    /// Get an edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId<I>) -> &Edge<I> {
        &self.edges[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get the anchor (one outgoing half-edge) of a vertex.
    ///
    /// Returns `None` for vertex indices that no face references, including
    /// indices past the end of the anchor table.
    #[inline]
    pub fn vertex_halfedge(&self, v: VertexId<I>) -> Option<HalfEdgeId<I>> {
        self.vertex_halfedges.get(v.index()).copied().flatten()
    }

    /// All edges, indexed by [`EdgeId`].
    #[inline]
    pub fn edges(&self) -> &[Edge<I>] {
        &self.edges
    }

    /// All half-edges, indexed by [`HalfEdgeId`].
    #[inline]
    pub fn halfedges(&self) -> &[HalfEdge<I>] {
        &self.halfedges
    }

    /// All faces, indexed by [`FaceId`].
    #[inline]
    pub fn faces(&self) -> &[Face<I>] {
        &self.faces
    }

    /// The per-vertex anchor table, indexed by vertex.
    #[inline]
    pub fn vertex_halfedges_table(&self) -> &[Option<HalfEdgeId<I>>] {
        &self.vertex_halfedges
    }

    // ==================== Topology Queries ====================

    /// Get the opposite half-edge, `None` on the boundary.
    #[inline]
    pub fn opposite(&self, he: HalfEdgeId<I>) -> Option<HalfEdgeId<I>> {
        self.halfedge(he).opposite
    }

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the face.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Get the origin vertex of a half-edge.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).origin
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.origin(self.next(he))
    }

    /// Get the undirected edge of a half-edge.
    #[inline]
    pub fn edge_of(&self, he: HalfEdgeId<I>) -> EdgeId<I> {
        self.halfedge(he).edge
    }

    /// Get the face of a half-edge.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Check if a half-edge is on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Check if a vertex is on the boundary.
    ///
    /// Unreferenced vertex indices are not considered boundary vertices.
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> bool {
        self.vertex_fan(v)
            .any(|he| self.is_boundary_halfedge(he) || self.is_boundary_halfedge(self.prev(he)))
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs, including unreferenced slots.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertex_halfedges.len()).map(VertexId::new)
    }

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.edges.len()).map(EdgeId::new)
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over the outgoing half-edges around a vertex.
    ///
    /// Starts at the vertex anchor and rotates via `opposite(prev(he))`. The
    /// walk stops when it returns to the anchor (interior vertex) or reaches a
    /// half-edge whose previous edge is on the boundary. For a vertex where
    /// several fans meet only the anchor's fan is visited.
    pub fn vertex_fan(&self, v: VertexId<I>) -> VertexFanIter<'_, I> {
        VertexFanIter::new(self, v)
    }

    /// Iterate over vertices adjacent to a vertex, in fan order.
    pub fn vertex_neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        // An open fan has one more neighbour than outgoing half-edges: the
        // origin of the incoming boundary half-edge that ends the walk.
        let closing = self
            .vertex_fan(v)
            .last()
            .map(|he| self.prev(he))
            .filter(|&p| self.is_boundary_halfedge(p))
            .map(|p| self.origin(p));

        self.vertex_fan(v).map(move |he| self.dest(he)).chain(closing)
    }

    /// Compute the valence (number of neighbours) of a vertex.
    pub fn valence(&self, v: VertexId<I>) -> usize {
        self.vertex_neighbors(v).count()
    }

    /// Iterate over half-edges around a face.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, I> {
        FaceHalfEdgeIter::new(self, f)
    }

    /// Iterate over vertices of a face, in input order.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_halfedges(f).map(move |he| self.origin(he))
    }

    /// Get the number of vertices in a face.
    #[inline]
    pub fn face_vertex_count(&self, f: FaceId<I>) -> usize {
        self.face(f).count
    }

    /// Check whether every face is a triangle.
    pub fn is_triangle_mesh(&self) -> bool {
        self.faces.iter().all(|f| f.count == 3)
    }

    /// Check whether every face is a quad.
    pub fn is_quad_mesh(&self) -> bool {
        self.faces.iter().all(|f| f.count == 4)
    }

    // ==================== Validation ====================

    /// Check if the mesh is valid (all connectivity is consistent).
    ///
    /// Re-derives every link from scratch: face loops, `next`/`prev`
    /// agreement, canonical edges, opposite symmetry, at most two half-edges
    /// per edge, and vertex anchors. A mesh returned by the builder always
    /// passes.
    pub fn is_valid(&self) -> bool {
        let n = self.halfedges.len();
        if self.halfedges.iter().any(|he| {
            he.next.index() >= n
                || he.prev.index() >= n
                || he.opposite.is_some_and(|o| o.index() >= n)
        }) {
            return false;
        }

        let mut claims = vec![0u8; self.edges.len()];
        let mut loop_total = 0;

        // Faces: closed loops of the declared length
        for (fi, f) in self.faces.iter().enumerate() {
            if f.halfedge.index() >= n {
                return false;
            }
            let mut he = f.halfedge;
            for _ in 0..f.count {
                if self.face_of(he).index() != fi {
                    return false;
                }
                he = self.next(he);
            }
            if he != f.halfedge {
                return false;
            }
            loop_total += f.count;
        }
        if loop_total != n {
            return false;
        }

        // Half-edges
        for (i, he) in self.halfedges.iter().enumerate() {
            let id = HalfEdgeId::<I>::new(i);

            if self.prev(he.next) != id || self.next(he.prev) != id {
                return false;
            }

            let Some(edge) = self.edges.get(he.edge.index()) else {
                return false;
            };
            if *edge != Edge::new(he.origin, self.dest(id)) {
                return false;
            }
            claims[he.edge.index()] = claims[he.edge.index()].saturating_add(1);

            if let Some(opp) = he.opposite {
                let twin = self.halfedge(opp);
                if twin.opposite != Some(id)
                    || twin.edge != he.edge
                    || twin.origin != self.dest(id)
                    || twin.face == he.face
                {
                    return false;
                }
            }
        }

        if claims.iter().any(|&n| n == 0 || n > 2) {
            return false;
        }
        // Boundary edges have exactly one claimant, interior edges two
        for he in &self.halfedges {
            let shared = claims[he.edge.index()] == 2;
            if shared != he.opposite.is_some() {
                return false;
            }
        }

        // Vertex anchors
        for (vi, anchor) in self.vertex_halfedges.iter().enumerate() {
            if let Some(he) = anchor {
                if self.origin(*he).index() != vi {
                    return false;
                }
            }
        }
        self.halfedges
            .iter()
            .all(|he| self.vertex_halfedge(he.origin).is_some())
    }
}

/// Iterator over outgoing half-edges around a vertex.
pub struct VertexFanIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: Option<HalfEdgeId<I>>,
    current: Option<HalfEdgeId<I>>,
}

impl<'a, I: MeshIndex> VertexFanIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, v: VertexId<I>) -> Self {
        let start = mesh.vertex_halfedge(v);
        Self {
            mesh,
            start,
            current: start,
        }
    }
}

impl<'a, I: MeshIndex> Iterator for VertexFanIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.current?;

        // If he goes v -> w, prev(he) goes u -> v in the same face and its
        // opposite goes v -> u in the neighbouring face.
        self.current = self
            .mesh
            .opposite(self.mesh.prev(result))
            .filter(|&he| Some(he) != self.start);

        Some(result)
    }
}

/// Iterator over half-edges around a face.
pub struct FaceHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    current: HalfEdgeId<I>,
    remaining: usize,
}

impl<'a, I: MeshIndex> FaceHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, f: FaceId<I>) -> Self {
        let face = mesh.face(f);
        Self {
            mesh,
            current: face.halfedge,
            remaining: face.count,
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.next(self.current);
        self.remaining -= 1;

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, I: MeshIndex> ExactSizeIterator for FaceHalfEdgeIter<'a, I> {}
