//! Face-winding repair.
//!
//! Mesh assets arrive from arbitrary exporters and frequently mix winding
//! directions. Sampling orientations from face normals only works when
//! every normal points outward, so the pipelines run this pass right after
//! the placement transform.

use std::collections::VecDeque;

use strew_types::TriMesh;
use tracing::debug;

use crate::adjacency::EdgeAdjacency;

/// Repair face-normal consistency across the whole mesh.
///
/// Two steps per connected shell:
///
/// 1. **Propagation** - breadth-first walk over face adjacency; two faces
///    sharing an edge are consistently wound when they traverse that edge
///    in opposite directions, so any neighbor traversing it in the same
///    direction is flipped before the walk continues.
/// 2. **Orientation** - a consistently wound closed shell has a signed
///    volume whose sign tells inside from outside; shells with negative
///    volume are flipped wholesale so normals point outward.
///
/// Boundary and non-manifold edges do not propagate. Open shells keep the
/// orientation the propagation step chose (their signed volume is not
/// meaningful).
///
/// Returns the number of faces flipped.
///
/// # Example
///
/// ```
/// use strew_transform::unify_windings;
/// use strew_types::axis_cube;
///
/// let mut cube = axis_cube(1.0);
/// cube.flip_face(0);
/// cube.flip_face(7);
///
/// assert_eq!(unify_windings(&mut cube), 2);
/// assert!(cube.signed_volume() > 0.0);
/// ```
pub fn unify_windings(mesh: &mut TriMesh) -> usize {
    if mesh.faces.is_empty() {
        return 0;
    }

    let adjacency = EdgeAdjacency::build(&mesh.faces);
    let face_count = mesh.faces.len();
    let mut flip = vec![false; face_count];
    let mut visited = vec![false; face_count];
    let mut shell_count = 0usize;

    for start in 0..face_count {
        if visited[start] {
            continue;
        }
        shell_count += 1;

        // Breadth-first winding propagation from this seed face
        let mut shell = Vec::new();
        let mut queue = VecDeque::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(face_idx) = queue.pop_front() {
            shell.push(face_idx);
            let face = oriented(mesh.faces[face_idx], flip[face_idx]);

            for (a, b) in directed_edges(face) {
                let Some(neighbors) = adjacency.faces_for_edge(a, b) else {
                    continue;
                };
                // Boundary and non-manifold edges are not reliable carriers
                // of winding information
                if neighbors.len() != 2 {
                    continue;
                }
                for &other in neighbors {
                    if other == face_idx || visited[other] {
                        continue;
                    }
                    let other_face = oriented(mesh.faces[other], flip[other]);
                    if has_directed_edge(other_face, a, b) {
                        // Neighbor walks the shared edge the same way we do,
                        // so its winding disagrees with ours
                        flip[other] = true;
                    }
                    visited[other] = true;
                    queue.push_back(other);
                }
            }
        }

        // Point the shell outward
        if shell_signed_volume(mesh, &shell, &flip) < 0.0 {
            for &f in &shell {
                flip[f] = !flip[f];
            }
        }
    }

    let mut flipped = 0;
    for (idx, should_flip) in flip.iter().enumerate() {
        if *should_flip {
            mesh.flip_face(idx);
            flipped += 1;
        }
    }

    if flipped > 0 {
        debug!(flipped, shells = shell_count, "Repaired face windings");
    }

    flipped
}

/// A face's vertex triple with any pending flip applied.
#[inline]
fn oriented(face: [u32; 3], flipped: bool) -> [u32; 3] {
    if flipped {
        [face[0], face[2], face[1]]
    } else {
        face
    }
}

/// The three directed edges of a face, in winding order.
#[inline]
fn directed_edges(face: [u32; 3]) -> [(u32, u32); 3] {
    [
        (face[0], face[1]),
        (face[1], face[2]),
        (face[2], face[0]),
    ]
}

/// Check whether a face traverses the directed edge `a -> b`.
#[inline]
fn has_directed_edge(face: [u32; 3], a: u32, b: u32) -> bool {
    directed_edges(face).contains(&(a, b))
}

/// Signed volume of one shell with pending flips applied.
fn shell_signed_volume(mesh: &TriMesh, shell: &[usize], flip: &[bool]) -> f64 {
    let mut volume = 0.0;

    for &face_idx in shell {
        let [i0, i1, i2] = oriented(mesh.faces[face_idx], flip[face_idx]);
        let v0 = &mesh.vertices[i0 as usize].position;
        let v1 = &mesh.vertices[i1 as usize].position;
        let v2 = &mesh.vertices[i2 as usize].position;
        volume += v0.coords.dot(&v1.coords.cross(&v2.coords));
    }

    volume / 6.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use strew_types::{axis_cube, TriMesh};

    #[test]
    fn consistent_cube_is_untouched() {
        let mut cube = axis_cube(1.0);
        assert_eq!(unify_windings(&mut cube), 0);
        assert!((cube.signed_volume() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn single_bad_face_is_flipped_back() {
        let mut cube = axis_cube(1.0);
        cube.flip_face(5);

        assert_eq!(unify_windings(&mut cube), 1);
        assert!((cube.signed_volume() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn inverted_cube_is_turned_outward() {
        let mut cube = axis_cube(1.0);
        cube.flip_faces();
        assert!(cube.is_inside_out());

        assert_eq!(unify_windings(&mut cube), 12);
        assert!((cube.signed_volume() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn shells_are_repaired_independently() {
        // Two disjoint cubes, the second inverted
        let mut mesh = axis_cube(1.0);
        let mut second = axis_cube(1.0);
        second.translate(nalgebra::Vector3::new(10.0, 0.0, 0.0));
        second.flip_faces();
        mesh.merge(&second);

        assert_eq!(unify_windings(&mut mesh), 12);
        assert!((mesh.signed_volume() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn empty_mesh_is_a_noop() {
        let mut mesh = TriMesh::new();
        assert_eq!(unify_windings(&mut mesh), 0);
    }
}
