//! Face adjacency over mesh edges.

use hashbrown::HashMap;

/// Edge-to-face adjacency for a triangle mesh.
///
/// Edges are keyed undirected (`v0 < v1`); each entry lists the faces that
/// share the edge. Used by the winding repair pass to walk connected shells
/// and compare edge traversal directions between neighboring faces.
#[derive(Debug, Clone)]
pub struct EdgeAdjacency {
    edge_to_faces: HashMap<(u32, u32), Vec<usize>>,
}

impl EdgeAdjacency {
    /// Build adjacency information from a list of faces.
    ///
    /// # Example
    ///
    /// ```
    /// use strew_transform::EdgeAdjacency;
    ///
    /// let faces = vec![[0, 1, 2], [1, 3, 2]];
    /// let adj = EdgeAdjacency::build(&faces);
    ///
    /// assert_eq!(adj.faces_for_edge(1, 2).map(<[usize]>::len), Some(2));
    /// ```
    #[must_use]
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut edge_to_faces: HashMap<(u32, u32), Vec<usize>> = HashMap::new();

        for (face_idx, face) in faces.iter().enumerate() {
            let edges = [
                undirected(face[0], face[1]),
                undirected(face[1], face[2]),
                undirected(face[2], face[0]),
            ];

            for edge in edges {
                edge_to_faces.entry(edge).or_default().push(face_idx);
            }
        }

        Self { edge_to_faces }
    }

    /// Get faces adjacent to an edge.
    ///
    /// Returns `None` if the edge does not exist in the mesh.
    #[must_use]
    pub fn faces_for_edge(&self, v0: u32, v1: u32) -> Option<&[usize]> {
        self.edge_to_faces.get(&undirected(v0, v1)).map(Vec::as_slice)
    }

    /// Check if the triangulation is manifold (every edge has at most two
    /// adjacent faces).
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.edge_to_faces.values().all(|faces| faces.len() <= 2)
    }

    /// Check if the triangulation is watertight (no boundary edges).
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.edge_to_faces.values().all(|faces| faces.len() >= 2)
    }

    /// Get the total number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_to_faces.len()
    }
}

/// Normalize edge direction so v0 < v1.
#[inline]
fn undirected(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_triangle() {
        let adj = EdgeAdjacency::build(&[[0, 1, 2]]);
        assert_eq!(adj.edge_count(), 3);
        assert!(adj.is_manifold());
        assert!(!adj.is_watertight());
    }

    #[test]
    fn shared_edge_has_two_faces() {
        let adj = EdgeAdjacency::build(&[[0, 1, 2], [1, 3, 2]]);
        assert_eq!(adj.faces_for_edge(1, 2).map(<[usize]>::len), Some(2));
        assert_eq!(adj.faces_for_edge(2, 1), adj.faces_for_edge(1, 2));
        assert_eq!(adj.faces_for_edge(0, 1).map(<[usize]>::len), Some(1));
    }

    #[test]
    fn non_manifold_edge_detected() {
        let adj = EdgeAdjacency::build(&[[0, 1, 2], [0, 1, 3], [0, 1, 4]]);
        assert!(!adj.is_manifold());
    }

    #[test]
    fn missing_edge_is_none() {
        let adj = EdgeAdjacency::build(&[[0, 1, 2]]);
        assert!(adj.faces_for_edge(0, 7).is_none());
    }
}
