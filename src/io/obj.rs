//! Wavefront OBJ face reader.
//!
//! Only the topology is read: `v` records are counted so relative indices can
//! be resolved, and `f` records are collected without triangulation. Every
//! other record (`vt`, `vn`, `g`, `o`, `usemtl`, ...) is skipped.
//!
//! Corners may be written as `v`, `v/vt`, `v//vn` or `v/vt/vn`; positive
//! indices are 1-based and negative indices count back from the most recent
//! vertex.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{MeshError, Result};

/// Faces read from a mesh file, ready for
/// [`build_from_polygons`](crate::mesh::build_from_polygons).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolygonSoup {
    /// 0-based vertex index of every face corner, face by face.
    pub indices: Vec<u32>,
    /// Number of corners in each face.
    pub counts: Vec<u32>,
    /// Number of `v` records in the file.
    pub num_vertices: usize,
}

impl PolygonSoup {
    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.counts.len()
    }
}

/// Read the faces of an OBJ file.
pub fn load_faces<P: AsRef<Path>>(path: P) -> Result<PolygonSoup> {
    let path = path.as_ref();
    let file = File::open(path)?;
    parse_faces(BufReader::new(file), path)
}

/// Read OBJ faces from any buffered reader.
///
/// `path` is only used in error messages.
pub fn parse_faces<R: BufRead, P: AsRef<Path>>(reader: R, path: P) -> Result<PolygonSoup> {
    let path = path.as_ref();
    let mut soup = PolygonSoup::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => soup.num_vertices += 1,
            Some("f") => {
                let mut count = 0u32;
                for token in tokens {
                    let index = parse_corner(token, soup.num_vertices)
                        .map_err(|message| MeshError::parse(path, line_no, message))?;
                    soup.indices.push(index);
                    count += 1;
                }
                soup.counts.push(count);
            }
            _ => {}
        }
    }

    log::debug!(
        "read {} faces and {} vertices from {}",
        soup.num_faces(),
        soup.num_vertices,
        path.display()
    );

    Ok(soup)
}

/// Resolve the vertex part of one face corner to a 0-based index.
fn parse_corner(token: &str, num_vertices: usize) -> std::result::Result<u32, String> {
    let vertex = token.split('/').next().unwrap_or_default();
    let raw: i64 = vertex
        .parse()
        .map_err(|_| format!("invalid vertex index '{}'", token))?;

    let index = match raw {
        0 => return Err("vertex index 0 is not allowed".to_string()),
        r if r > 0 => r - 1,
        r => num_vertices as i64 + r,
    };

    if index < 0 {
        return Err(format!(
            "relative index {} points before the first vertex",
            raw
        ));
    }
    u32::try_from(index).map_err(|_| format!("vertex index {} is too large", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE: &str = "\
# unit cube
o cube
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
vn 0 0 1
f 1 4 3 2
f 5/1 6/1 7/1 8/1
f 1//1 2//1 6//1 5//1
f 2/1/1 3/1/1 7/1/1 6/1/1
f 3 4 8 7
f -5 -8 -4 -1
";

    #[test]
    fn test_parse_cube() {
        let soup = parse_faces(CUBE.as_bytes(), "cube.obj").unwrap();

        assert_eq!(soup.num_vertices, 8);
        assert_eq!(soup.num_faces(), 6);
        assert_eq!(soup.counts, vec![4; 6]);
        assert_eq!(&soup.indices[..8], &[0, 3, 2, 1, 4, 5, 6, 7]);
        // Relative indices resolve against the 8 vertices seen so far
        assert_eq!(&soup.indices[20..], &[3, 0, 4, 7]);
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let err = parse_faces("v 0 0 0\nf 1 x 2\n".as_bytes(), "bad.obj").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 2, .. }));

        let err = parse_faces("f 0 1 2\n".as_bytes(), "zero.obj").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 1, .. }));

        let err = parse_faces("v 0 0 0\nf -2 1 1\n".as_bytes(), "rel.obj").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_short_faces_are_kept() {
        // Validation belongs to the builder
        let soup = parse_faces("v 0 0 0\nv 1 0 0\nf 1 2\n".as_bytes(), "line.obj").unwrap();
        assert_eq!(soup.counts, vec![2]);
    }
}
