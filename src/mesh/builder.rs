//! Mesh construction utilities.
//!
//! This module builds a [`HalfEdgeMesh`] from a polygon soup given as a flat
//! index array plus a per-face vertex count, as commonly produced by mesh file
//! readers. Construction is a single batch pass:
//!
//! 1. validate the face table and split it into faces
//! 2. extract each face's directed edges (parallel when enabled)
//! 3. deduplicate edges and reject conflicting claims (sequential, in
//!    half-edge order, so the result never depends on thread scheduling)
//! 4. link opposite half-edges
//! 5. pick one outgoing half-edge per vertex
//!
//! Any failure returns an error and no structure.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use rayon::prelude::*;

use super::halfedge::{Edge, Face, HalfEdge, HalfEdgeMesh};
use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{FaceDefect, MeshError, NonManifoldViolation, Result};

/// Options for half-edge construction.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Whether to validate faces and extract directed edges in parallel
    /// (default: true). The output is identical either way.
    pub parallel: bool,
    /// Minimum number of vertex anchor slots allowed (default: `1 << 24`).
    ///
    /// The anchor table holds one slot per vertex index up to the largest
    /// one referenced. Construction fails with [`MeshError::IndexOverflow`]
    /// when that exceeds both this value and the half-edge count.
    pub max_vertex_slots: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            max_vertex_slots: 1 << 24,
        }
    }
}

impl BuildOptions {
    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the minimum vertex anchor slot limit.
    pub fn with_max_vertex_slots(mut self, slots: usize) -> Self {
        self.max_vertex_slots = slots;
        self
    }
}

/// A face's slice of the index array.
#[derive(Debug, Clone, Copy)]
struct FaceRange {
    start: usize,
    count: usize,
}

/// Half-edges that have claimed one undirected edge so far.
#[derive(Debug, Clone, Copy)]
struct Claim<I: MeshIndex> {
    first: HalfEdgeId<I>,
    second: Option<HalfEdgeId<I>>,
}

/// Build a half-edge mesh from a flat polygon soup.
///
/// # Arguments
/// * `indices` - Vertex indices of every face corner, concatenated face by face
/// * `counts` - Number of vertices in each face
///
/// # Returns
/// A half-edge mesh, or an error if the input is malformed, contains an
/// invalid face, or describes non-manifold topology.
///
/// # Example
/// ```
/// use hedge::mesh::{build_from_polygons, HalfEdgeMesh};
///
/// // A quad and a triangle sharing the edge (1, 2)
/// let indices: Vec<u32> = vec![0, 1, 2, 3, 1, 4, 2];
/// let counts: Vec<u32> = vec![4, 3];
///
/// let mesh: HalfEdgeMesh = build_from_polygons(&indices, &counts).unwrap();
/// assert_eq!(mesh.num_edges(), 6);
/// assert_eq!(mesh.num_halfedges(), 7);
/// assert_eq!(mesh.num_boundary_edges(), 5);
/// ```
pub fn build_from_polygons<I: MeshIndex>(indices: &[I], counts: &[I]) -> Result<HalfEdgeMesh<I>> {
    build_with_options(indices, counts, &BuildOptions::default())
}

/// Build a half-edge mesh from a flat polygon soup with explicit options.
///
/// See [`build_from_polygons`].
pub fn build_with_options<I: MeshIndex>(
    indices: &[I],
    counts: &[I],
    options: &BuildOptions,
) -> Result<HalfEdgeMesh<I>> {
    let ranges = face_ranges(indices, counts)?;
    check_capacity::<I>("half-edges", indices.len())?;

    let directed = if options.parallel {
        ranges
            .par_iter()
            .enumerate()
            .map(|(fi, range)| directed_edges(fi, *range, indices))
            .collect::<Vec<_>>()
    } else {
        ranges
            .iter()
            .enumerate()
            .map(|(fi, range)| directed_edges(fi, *range, indices))
            .collect::<Vec<_>>()
    };
    // Report the first offending face in input order, whatever the schedule.
    let directed: Vec<Vec<(VertexId<I>, VertexId<I>)>> =
        directed.into_iter().collect::<Result<_>>()?;

    let mut edges: Vec<Edge<I>> = Vec::with_capacity(indices.len() / 2 + 1);
    let mut claims: Vec<Claim<I>> = Vec::with_capacity(indices.len() / 2 + 1);
    let mut table: HashMap<Edge<I>, EdgeId<I>> = HashMap::with_capacity(indices.len() / 2 + 1);
    let mut halfedges: Vec<HalfEdge<I>> = Vec::with_capacity(indices.len());
    let mut faces: Vec<Face<I>> = Vec::with_capacity(ranges.len());

    for (fi, (range, pairs)) in ranges.iter().zip(&directed).enumerate() {
        let face_id = FaceId::<I>::new(fi);
        faces.push(Face {
            halfedge: HalfEdgeId::new(range.start),
            count: range.count,
        });

        for (k, &(origin, dest)) in pairs.iter().enumerate() {
            let id = HalfEdgeId::<I>::new(range.start + k);
            let key = Edge::new(origin, dest);

            let edge = match table.entry(key) {
                Entry::Occupied(entry) => {
                    let edge = *entry.get();
                    let claim = &mut claims[edge.index()];
                    if claim.second.is_some() {
                        return Err(conflict(fi, key, NonManifoldViolation::TooManyFaces));
                    }
                    if halfedges[claim.first.index()].origin == origin {
                        return Err(conflict(
                            fi,
                            key,
                            NonManifoldViolation::DuplicateDirectedEdge {
                                origin: origin.index(),
                            },
                        ));
                    }
                    claim.second = Some(id);
                    edge
                }
                Entry::Vacant(entry) => {
                    let edge = EdgeId::<I>::new(edges.len());
                    edges.push(key);
                    claims.push(Claim {
                        first: id,
                        second: None,
                    });
                    entry.insert(edge);
                    edge
                }
            };

            halfedges.push(HalfEdge {
                edge,
                next: HalfEdgeId::new(range.start + (k + 1) % range.count),
                prev: HalfEdgeId::new(range.start + (k + range.count - 1) % range.count),
                opposite: None,
                origin,
                face: face_id,
            });
        }
    }

    link_opposites(&mut halfedges, &claims);
    let slot_limit = options.max_vertex_slots.max(halfedges.len());
    let vertex_halfedges = assign_vertex_anchors(&halfedges, slot_limit)?;

    log::debug!(
        "built half-edge mesh: {} faces, {} edges, {} half-edges, {} vertex slots (parallel: {})",
        faces.len(),
        edges.len(),
        halfedges.len(),
        vertex_halfedges.len(),
        options.parallel
    );

    Ok(HalfEdgeMesh {
        edges,
        halfedges,
        faces,
        vertex_halfedges,
    })
}

/// Split the index array into faces, checking the count table.
///
/// Face sizes are checked before the length sum so that a short face is
/// reported as an invalid face even when it also breaks the sum.
fn face_ranges<I: MeshIndex>(indices: &[I], counts: &[I]) -> Result<Vec<FaceRange>> {
    let mut ranges = Vec::with_capacity(counts.len());
    let mut total = Some(0usize);

    for (fi, &count) in counts.iter().enumerate() {
        let count = count.to_usize();
        if count < 3 {
            log::trace!("face {} rejected: {} vertices", fi, count);
            return Err(MeshError::InvalidFace {
                face: fi,
                defect: FaceDefect::TooFewVertices { count },
            });
        }
        if let Some(start) = total {
            ranges.push(FaceRange { start, count });
        }
        total = total.and_then(|t| t.checked_add(count));
    }

    match total {
        Some(expected) if expected == indices.len() => Ok(ranges),
        expected => Err(MeshError::MalformedInput {
            expected: expected.unwrap_or(usize::MAX),
            actual: indices.len(),
        }),
    }
}

/// Validate one face and list its directed edges in loop order.
fn directed_edges<I: MeshIndex>(
    fi: usize,
    range: FaceRange,
    indices: &[I],
) -> Result<Vec<(VertexId<I>, VertexId<I>)>> {
    let face = &indices[range.start..range.start + range.count];

    if let Some(&vertex) = face
        .iter()
        .enumerate()
        .find(|&(k, v)| face[..k].contains(v))
        .map(|(_, v)| v)
    {
        log::trace!("face {} rejected: vertex {:?} repeats", fi, vertex);
        return Err(MeshError::InvalidFace {
            face: fi,
            defect: FaceDefect::RepeatedVertex {
                vertex: vertex.to_usize(),
            },
        });
    }

    Ok((0..range.count)
        .map(|k| {
            (
                VertexId::from_raw(face[k]),
                VertexId::from_raw(face[(k + 1) % range.count]),
            )
        })
        .collect())
}

/// Set `opposite` on both half-edges of every shared edge.
fn link_opposites<I: MeshIndex>(halfedges: &mut [HalfEdge<I>], claims: &[Claim<I>]) {
    for claim in claims {
        if let Some(second) = claim.second {
            halfedges[claim.first.index()].opposite = Some(second);
            halfedges[second.index()].opposite = Some(claim.first);
        }
    }
}

/// Pick one outgoing half-edge per vertex.
///
/// The first boundary half-edge leaving a vertex wins; a vertex with no
/// outgoing boundary half-edge keeps the first half-edge leaving it.
/// Fails when the table would need more than `slot_limit` slots.
fn assign_vertex_anchors<I: MeshIndex>(
    halfedges: &[HalfEdge<I>],
    slot_limit: usize,
) -> Result<Vec<Option<HalfEdgeId<I>>>> {
    let num_vertices = match halfedges.iter().map(|he| he.origin.index()).max() {
        Some(max) => max.checked_add(1),
        None => Some(0),
    };
    let num_vertices = match num_vertices {
        Some(n) if n <= slot_limit => n,
        n => {
            log::trace!("vertex anchor table of {:?} slots exceeds {}", n, slot_limit);
            return Err(MeshError::IndexOverflow {
                element: "vertices",
                count: n.unwrap_or(usize::MAX),
                max: slot_limit,
            });
        }
    };
    let mut anchors: Vec<Option<HalfEdgeId<I>>> = vec![None; num_vertices];

    for (i, he) in halfedges.iter().enumerate() {
        let slot = &mut anchors[he.origin.index()];
        let replace = match *slot {
            None => true,
            Some(current) => he.is_boundary() && !halfedges[current.index()].is_boundary(),
        };
        if replace {
            *slot = Some(HalfEdgeId::new(i));
        }
    }

    Ok(anchors)
}

fn conflict<I: MeshIndex>(face: usize, key: Edge<I>, violation: NonManifoldViolation) -> MeshError {
    log::trace!("face {} conflicts on edge {:?}: {}", face, key, violation);
    MeshError::NonManifoldTopology {
        face,
        v0: key.v0.index(),
        v1: key.v1.index(),
        violation,
    }
}

fn check_capacity<I: MeshIndex>(element: &'static str, count: usize) -> Result<()> {
    if count == 0 || I::try_from_usize(count - 1).is_some() {
        Ok(())
    } else {
        Err(MeshError::IndexOverflow {
            element,
            count,
            max: I::MAX.to_usize().saturating_add(1),
        })
    }
}

/// Build a half-edge mesh from triangle faces.
///
/// # Example
/// ```
/// use hedge::mesh::{build_from_triangles, HalfEdgeMesh};
///
/// let faces: Vec<[u32; 3]> = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
/// let mesh: HalfEdgeMesh = build_from_triangles(&faces).unwrap();
/// assert!(mesh.is_closed());
/// assert_eq!(mesh.num_edges(), 6);
/// ```
pub fn build_from_triangles<I: MeshIndex>(faces: &[[I; 3]]) -> Result<HalfEdgeMesh<I>> {
    build_from_fixed(faces)
}

/// Build a half-edge mesh from quad faces.
pub fn build_from_quads<I: MeshIndex>(faces: &[[I; 4]]) -> Result<HalfEdgeMesh<I>> {
    build_from_fixed(faces)
}

fn build_from_fixed<I: MeshIndex, const N: usize>(faces: &[[I; N]]) -> Result<HalfEdgeMesh<I>> {
    let indices: Vec<I> = faces.iter().flatten().copied().collect();
    let counts: Vec<I> = vec![I::from_usize(N); faces.len()];
    build_from_polygons(&indices, &counts)
}

/// Convert a half-edge mesh back to a flat polygon soup.
///
/// Returns `(indices, counts)`; building from them again yields an identical
/// mesh.
pub fn to_face_vertex<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> (Vec<I>, Vec<I>) {
    let indices: Vec<I> = mesh
        .face_ids()
        .flat_map(|f| mesh.face_vertices(f))
        .map(|v| v.raw())
        .collect();

    let counts: Vec<I> = mesh
        .face_ids()
        .map(|f| I::from_usize(mesh.face_vertex_count(f)))
        .collect();

    (indices, counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(indices: &[u32], counts: &[u32]) -> Result<HalfEdgeMesh<u32>> {
        build_from_polygons(indices, counts)
    }

    fn cube() -> (Vec<u32>, Vec<u32>) {
        let indices = vec![
            0, 3, 2, 1, // bottom
            4, 5, 6, 7, // top
            0, 1, 5, 4, // front
            1, 2, 6, 5, // right
            2, 3, 7, 6, // back
            3, 0, 4, 7, // left
        ];
        (indices, vec![4; 6])
    }

    fn grid(n: u32) -> (Vec<u32>, Vec<u32>) {
        let mut indices = Vec::new();
        let mut counts = Vec::new();
        for j in 0..n {
            for i in 0..n {
                let v00 = j * (n + 1) + i;
                let v10 = v00 + 1;
                let v01 = v00 + (n + 1);
                let v11 = v01 + 1;
                if (i + j) % 2 == 0 {
                    indices.extend_from_slice(&[v00, v10, v11, v01]);
                    counts.push(4);
                } else {
                    indices.extend_from_slice(&[v00, v10, v11, v00, v11, v01]);
                    counts.extend_from_slice(&[3, 3]);
                }
            }
        }
        (indices, counts)
    }

    fn assert_invariants(mesh: &HalfEdgeMesh<u32>, indices: &[u32], counts: &[u32]) {
        assert!(mesh.is_valid());
        assert_eq!(mesh.num_halfedges(), indices.len());
        assert_eq!(mesh.num_faces(), counts.len());

        for f in mesh.face_ids() {
            let start = mesh.face(f).halfedge;
            let mut he = start;
            for _ in 0..counts[f.index()] {
                assert_eq!(mesh.face_of(he), f);
                he = mesh.next(he);
            }
            assert_eq!(he, start);
        }

        for he in mesh.halfedge_ids() {
            if let Some(opp) = mesh.opposite(he) {
                assert_eq!(mesh.opposite(opp), Some(he));
                assert_eq!(mesh.origin(opp), mesh.dest(he));
                assert_eq!(mesh.dest(opp), mesh.origin(he));
            }
        }

        for v in mesh.vertex_ids() {
            if let Some(he) = mesh.vertex_halfedge(v) {
                assert_eq!(mesh.origin(he), v);
            }
        }
    }

    #[test]
    fn test_single_quad() {
        let mesh = build(&[0, 1, 2, 3], &[4]).unwrap();

        assert_eq!(mesh.num_edges(), 4);
        assert_eq!(mesh.num_halfedges(), 4);
        for he in mesh.halfedge_ids() {
            assert_eq!(mesh.opposite(he), None);
        }

        // One 4-cycle through every half-edge
        let h0 = HalfEdgeId::new(0);
        let cycle: Vec<usize> = std::iter::successors(Some(h0), |&h| Some(mesh.next(h)))
            .take(5)
            .map(|h| h.index())
            .collect();
        assert_eq!(cycle, vec![0, 1, 2, 3, 0]);

        assert!(mesh.is_quad_mesh());
        assert!(!mesh.is_closed());
        assert_invariants(&mesh, &[0, 1, 2, 3], &[4]);
    }

    #[test]
    fn test_quad_and_triangle_share_edge() {
        let indices = [0, 1, 2, 3, 1, 4, 2];
        let counts = [4, 3];
        let mesh = build(&indices, &counts).unwrap();

        assert_eq!(mesh.num_edges(), 6);
        assert_eq!(mesh.num_halfedges(), 7);

        // Half-edge 1 is 1 -> 2 in the quad, half-edge 6 is 2 -> 1 in the triangle
        let h1 = HalfEdgeId::new(1);
        let h6 = HalfEdgeId::new(6);
        assert_eq!(mesh.opposite(h1), Some(h6));
        assert_eq!(mesh.opposite(h6), Some(h1));
        assert_eq!(mesh.edge_of(h1), mesh.edge_of(h6));
        let shared = mesh.edge(mesh.edge_of(h1));
        assert_eq!((shared.v0.index(), shared.v1.index()), (1, 2));

        assert_eq!(mesh.num_boundary_edges(), 5);
        assert_invariants(&mesh, &indices, &counts);
    }

    #[test]
    fn test_face_with_two_vertices_is_invalid() {
        let result = build(&[0, 1, 2, 3], &[2, 3]);
        assert!(matches!(
            result,
            Err(MeshError::InvalidFace {
                face: 0,
                defect: FaceDefect::TooFewVertices { count: 2 }
            })
        ));
    }

    #[test]
    fn test_same_winding_twice_is_non_manifold() {
        let result = build(&[0, 1, 2, 0, 1, 2], &[3, 3]);
        assert!(matches!(
            result,
            Err(MeshError::NonManifoldTopology {
                face: 1,
                v0: 0,
                v1: 1,
                violation: NonManifoldViolation::DuplicateDirectedEdge { origin: 0 }
            })
        ));
    }

    #[test]
    fn test_edge_shared_by_three_faces() {
        let result = build(&[0, 1, 2, 1, 0, 3, 0, 1, 4], &[3, 3, 3]);
        assert!(matches!(
            result,
            Err(MeshError::NonManifoldTopology {
                face: 2,
                violation: NonManifoldViolation::TooManyFaces,
                ..
            })
        ));
    }

    #[test]
    fn test_repeated_vertex_in_face() {
        let result = build(&[0, 1, 2, 3, 2, 4, 2], &[3, 4]);
        assert!(matches!(
            result,
            Err(MeshError::InvalidFace {
                face: 1,
                defect: FaceDefect::RepeatedVertex { vertex: 2 }
            })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let result = build(&[0, 1, 2, 3], &[3]);
        assert!(matches!(
            result,
            Err(MeshError::MalformedInput {
                expected: 3,
                actual: 4
            })
        ));

        let result = build(&[0, 1, 2], &[3, 3]);
        assert!(matches!(
            result,
            Err(MeshError::MalformedInput {
                expected: 6,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_empty_input() {
        let mesh = build(&[], &[]).unwrap();
        assert_eq!(mesh, HalfEdgeMesh::new());
    }

    #[test]
    fn test_index_overflow() {
        // 21846 triangles need 65538 half-edges, one more than u16 can address
        let faces: Vec<[u16; 3]> = vec![[0, 1, 2]; 21_846];
        let result = build_from_triangles(&faces);
        assert!(matches!(
            result,
            Err(MeshError::IndexOverflow {
                count: 65_538,
                max: 65_536,
                ..
            })
        ));
    }

    #[test]
    fn test_vertex_id_at_type_max() {
        let result = build_from_polygons::<u64>(&[0, 1, u64::MAX], &[3]);
        assert!(matches!(
            result,
            Err(MeshError::IndexOverflow {
                element: "vertices",
                count: usize::MAX,
                ..
            })
        ));
    }

    #[test]
    fn test_sparse_vertex_id_exceeds_slot_limit() {
        let result = build_from_polygons::<u64>(&[0, 1, 1 << 40], &[3]);
        assert!(matches!(
            result,
            Err(MeshError::IndexOverflow {
                element: "vertices",
                max,
                ..
            }) if max == 1 << 24
        ));

        // The limit is configurable, and the half-edge count always fits
        let options = BuildOptions::default().with_max_vertex_slots(0);
        let mesh = build_with_options::<u32>(&[0, 1, 2], &[3], &options).unwrap();
        assert_eq!(mesh.num_vertices(), 3);

        let result = build_with_options::<u32>(&[0, 1, 3], &[3], &options);
        assert!(matches!(
            result,
            Err(MeshError::IndexOverflow {
                element: "vertices",
                count: 4,
                max: 3
            })
        ));
    }

    #[test]
    fn test_sparse_vertex_id_within_limit() {
        let mesh = build(&[0, 1, 1000], &[3]).unwrap();
        assert_eq!(mesh.num_vertices(), 1001);
        assert_eq!(mesh.vertex_halfedge(VertexId::new(500)), None);
        assert_eq!(mesh.vertex_halfedge(VertexId::new(1000)), Some(HalfEdgeId::new(2)));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_closed_cube() {
        let (indices, counts) = cube();
        let mesh = build(&indices, &counts).unwrap();

        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_edges(), 12);
        assert_eq!(mesh.num_halfedges(), 24);
        assert!(mesh.is_closed());
        assert_invariants(&mesh, &indices, &counts);

        for v in mesh.vertex_ids() {
            assert!(!mesh.is_boundary_vertex(v));
            assert_eq!(mesh.valence(v), 3);
            assert_eq!(mesh.vertex_fan(v).count(), 3);
        }
    }

    #[test]
    fn test_interior_anchor_is_first_outgoing() {
        let (indices, counts) = cube();
        let mesh = build(&indices, &counts).unwrap();

        for v in mesh.vertex_ids() {
            let first = indices.iter().position(|&i| i as usize == v.index()).unwrap();
            assert_eq!(mesh.vertex_halfedge(v), Some(HalfEdgeId::new(first)));
        }
    }

    #[test]
    fn test_boundary_vertices_anchor_on_boundary() {
        let mesh = build(&[0, 1, 2, 3, 1, 4, 2], &[4, 3]).unwrap();

        let anchors: Vec<Option<usize>> = mesh
            .vertex_halfedges_table()
            .iter()
            .map(|a| a.map(|h| h.index()))
            .collect();
        // Vertex 1 first leaves through the shared edge, then through 1 -> 4
        assert_eq!(anchors, vec![Some(0), Some(4), Some(2), Some(3), Some(5)]);

        for v in mesh.vertex_ids() {
            let anchor = mesh.vertex_halfedge(v).unwrap();
            assert!(mesh.is_boundary_halfedge(anchor));
            assert!(mesh.is_boundary_vertex(v));
        }
    }

    #[test]
    fn test_unreferenced_vertex_has_no_anchor() {
        let mesh = build(&[0, 2, 3], &[3]).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.vertex_halfedge(VertexId::new(1)), None);
        assert_eq!(mesh.valence(VertexId::new(1)), 0);
    }

    #[test]
    fn test_boundary_fan() {
        let mesh = build(&[0, 1, 2, 3, 1, 4, 2], &[4, 3]).unwrap();
        let v1 = VertexId::new(1);

        let fan: Vec<usize> = mesh.vertex_fan(v1).map(|h| h.index()).collect();
        assert_eq!(fan, vec![4, 1]);

        let neighbors: Vec<usize> = mesh.vertex_neighbors(v1).map(|v| v.index()).collect();
        assert_eq!(neighbors, vec![4, 2, 0]);
    }

    #[test]
    fn test_bowtie_vertex_builds() {
        // Two triangles touching only at vertex 0
        let mesh = build(&[0, 1, 2, 0, 3, 4], &[3, 3]).unwrap();
        assert!(mesh.is_valid());
        assert_eq!(mesh.num_boundary_edges(), 6);
        // Only the anchor's fan is visited
        assert_eq!(mesh.vertex_fan(VertexId::new(0)).count(), 1);
    }

    #[test]
    fn test_grids() {
        for n in 1..6 {
            let (indices, counts) = grid(n);
            let mesh = build(&indices, &counts).unwrap();
            assert_invariants(&mesh, &indices, &counts);

            // Euler characteristic of a disk
            let v = ((n + 1) * (n + 1)) as i64;
            let e = mesh.num_edges() as i64;
            let f = mesh.num_faces() as i64;
            assert_eq!(v - e + f, 1);
            assert_eq!(mesh.num_boundary_edges(), (4 * n) as usize);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (indices, counts) = grid(12);
        let parallel = build_with_options(&indices, &counts, &BuildOptions::default()).unwrap();
        let sequential =
            build_with_options(&indices, &counts, &BuildOptions::default().sequential()).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_parallel_reports_first_bad_face() {
        let (mut indices, counts) = grid(12);
        let last = indices.len() - 1;
        indices[1] = indices[0];
        indices[last] = indices[last - 1];

        let result = build_with_options(&indices, &counts, &BuildOptions::default());
        assert!(matches!(result, Err(MeshError::InvalidFace { face: 0, .. })));
    }

    #[test]
    fn test_idempotent() {
        let (indices, counts) = grid(4);
        let a = build(&indices, &counts).unwrap();
        let b = build(&indices, &counts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_roundtrip() {
        let (indices, counts) = grid(3);
        let mesh = build(&indices, &counts).unwrap();

        let (out_indices, out_counts) = to_face_vertex(&mesh);
        assert_eq!(out_indices, indices);
        assert_eq!(out_counts, counts);
    }

    #[test]
    fn test_build_from_quads() {
        let faces: Vec<[u32; 4]> = vec![[0, 1, 2, 3], [1, 4, 5, 2]];
        let mesh: HalfEdgeMesh<u32> = build_from_quads(&faces).unwrap();

        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_edges(), 7);
        assert_eq!(mesh.num_halfedges(), 8);
        assert_eq!(mesh.face_vertex_count(FaceId::new(1)), 4);
        let verts: Vec<usize> = mesh.face_vertices(FaceId::new(1)).map(|v| v.index()).collect();
        assert_eq!(verts, vec![1, 4, 5, 2]);
    }

    #[test]
    fn test_small_index_type() {
        let faces: Vec<[u16; 3]> = vec![[0, 1, 2], [2, 1, 3]];
        let mesh: HalfEdgeMesh<u16> = build_from_triangles(&faces).unwrap();
        assert!(mesh.is_triangle_mesh());
        assert_eq!(mesh.num_edges(), 5);
        assert!(mesh.is_valid());
    }
}
