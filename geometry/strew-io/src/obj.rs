//! OBJ (Wavefront) file format support.
//!
//! ASCII only. Supports `v` position records and `f` face records with
//! 1-based (or negative, relative) indices. Faces with more than three
//! vertices are fan-triangulated. Texture/normal references (`v/vt/vn`)
//! are accepted and ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use strew_types::{TriMesh, Vertex};

use crate::error::{IoError, IoResult};

/// Load a mesh from an OBJ file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a coordinate fails to
/// parse, or a face references a vertex that does not exist.
///
/// # Example
///
/// ```no_run
/// use strew_io::load_obj;
///
/// let mesh = load_obj("model.obj").unwrap();
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<TriMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    load_obj_from(BufReader::new(file))
}

fn load_obj_from<R: BufRead>(reader: R) -> IoResult<TriMesh> {
    let mut mesh = TriMesh::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        match parts.next() {
            Some("v") => {
                let coords: Vec<&str> = parts.collect();
                if coords.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "vertex record with {} coordinates",
                        coords.len()
                    )));
                }
                let x: f64 = coords[0].parse()?;
                let y: f64 = coords[1].parse()?;
                let z: f64 = coords[2].parse()?;
                mesh.vertices.push(Vertex::from_coords(x, y, z));
            }
            Some("f") => {
                let mut indices = Vec::new();
                for part in parts {
                    indices.push(parse_face_index(part, mesh.vertices.len())?);
                }
                if indices.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "face record with {} vertices",
                        indices.len()
                    )));
                }
                // Fan triangulation for quads and larger polygons
                for i in 1..indices.len() - 1 {
                    mesh.faces.push([indices[0], indices[i], indices[i + 1]]);
                }
            }
            _ => {
                // vn, vt, usemtl, o, g, s and friends are ignored
            }
        }
    }

    Ok(mesh)
}

/// Parse one face vertex reference (`7`, `7/2`, `7//3`, `-1`).
fn parse_face_index(part: &str, vertex_count: usize) -> IoResult<u32> {
    let index_str = part.split('/').next().unwrap_or(part);
    let raw: i64 = index_str.parse()?;

    let resolved = if raw > 0 {
        (raw - 1) as usize
    } else if raw < 0 {
        // Negative indices count back from the most recent vertex
        let back = raw.unsigned_abs() as usize;
        if back > vertex_count {
            return Err(IoError::BadVertexIndex {
                index: 0,
                vertex_count,
            });
        }
        vertex_count - back
    } else {
        return Err(IoError::invalid_content("face index 0 is not valid OBJ"));
    };

    if resolved >= vertex_count {
        return Err(IoError::BadVertexIndex {
            index: resolved,
            vertex_count,
        });
    }

    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, meshes with >4B vertices unsupported
    Ok(resolved as u32)
}

/// Save a mesh to an OBJ file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_obj<P: AsRef<Path>>(mesh: &TriMesh, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# OBJ generated by strew-io")?;
    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v.position.x, v.position.y, v.position.z)?;
    }
    for &[i0, i1, i2] in &mesh.faces {
        writeln!(writer, "f {} {} {}", i0 + 1, i1 + 1, i2 + 1)?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use strew_types::MeshTopology;

    #[test]
    fn parse_simple_obj() {
        let obj = b"# comment\n\
            v 0 0 0\n\
            v 1 0 0\n\
            v 0 1 0\n\
            f 1 2 3\n";

        let mesh = load_obj_from(BufReader::new(&obj[..])).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.faces[0], [0, 1, 2]);
    }

    #[test]
    fn quad_is_fan_triangulated() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";

        let mesh = load_obj_from(BufReader::new(&obj[..])).unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces[0], [0, 1, 2]);
        assert_eq!(mesh.faces[1], [0, 2, 3]);
    }

    #[test]
    fn slash_and_negative_indices() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2//2 -1\n";

        let mesh = load_obj_from(BufReader::new(&obj[..])).unwrap();
        assert_eq!(mesh.faces[0], [0, 1, 2]);
    }

    #[test]
    fn out_of_range_index_fails() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n";

        let result = load_obj_from(BufReader::new(&obj[..]));
        assert!(matches!(result, Err(IoError::BadVertexIndex { .. })));
    }

    #[test]
    fn roundtrip_through_file() {
        let mut mesh = TriMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(2.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 2.0, 0.0));
        mesh.faces.push([0, 1, 2]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.obj");
        save_obj(&mesh, &path).unwrap();
        let loaded = load_obj(&path).unwrap();

        assert_eq!(loaded.vertex_count(), 3);
        assert_eq!(loaded.faces[0], [0, 1, 2]);
        assert!((loaded.vertices[1].position.x - 2.0).abs() < 1e-12);
    }
}
