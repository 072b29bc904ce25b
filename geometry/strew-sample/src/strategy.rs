//! Point generation strategies.
//!
//! Two ways to cover a mesh surface with placement points: one point per
//! triangle centroid, or area-weighted random surface sampling under a
//! global budget. A closed set of exactly two variants, so this is an enum
//! rather than a trait object.

use nalgebra::{Point3, UnitQuaternion};
use rand::prelude::*;
use strew_types::{MeshTopology, TriMesh};
use tracing::debug;

use crate::orientation::orientation_from_normal;

/// A generated placement: position plus optional orientation.
///
/// `orientation == None` means the record writer keeps its template
/// orientation (the identity fallback for degenerate faces).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementPoint {
    /// World position.
    pub position: Point3<f64>,
    /// Orientation derived from the surface normal, if one exists.
    pub orientation: Option<UnitQuaternion<f64>>,
}

/// Budget configuration for [`PointStrategy::AreaWeighted`].
///
/// The global budget is shared across all meshes of a batch in proportion
/// to surface area; no single mesh may exceed the per-mesh cap even if its
/// area share would imply more.
///
/// # Example
///
/// ```
/// use strew_sample::SampleBudget;
///
/// let budget = SampleBudget::default()
///     .with_global(10_000)
///     .with_seed(42);
/// assert_eq!(budget.global, 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleBudget {
    /// Total samples across all meshes in the batch.
    pub global: usize,
    /// Hard per-mesh sample ceiling.
    pub per_mesh_cap: usize,
    /// Optional seed for reproducible sampling.
    ///
    /// Unseeded runs draw from the thread RNG and are non-deterministic;
    /// that is the default behavior, not an oversight.
    pub seed: Option<u64>,
}

impl Default for SampleBudget {
    fn default() -> Self {
        Self {
            global: 200_000,
            per_mesh_cap: 80_000,
            seed: None,
        }
    }
}

impl SampleBudget {
    /// Set the global sample budget.
    #[must_use]
    pub const fn with_global(mut self, global: usize) -> Self {
        self.global = global;
        self
    }

    /// Set the per-mesh sample cap.
    #[must_use]
    pub const fn with_per_mesh_cap(mut self, cap: usize) -> Self {
        self.per_mesh_cap = cap;
        self
    }

    /// Set a random seed for reproducibility.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Strategy for generating placement points over mesh surfaces.
///
/// # Example
///
/// ```
/// use strew_sample::PointStrategy;
/// use strew_types::{axis_cube, MeshTopology};
///
/// let cube = axis_cube(10.0);
/// let points = PointStrategy::Centroid.generate(&[cube.clone()]);
/// assert_eq!(points[0].len(), cube.face_count());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointStrategy {
    /// One point per triangle at the centroid, oriented by the face normal.
    /// Deterministic.
    Centroid,
    /// Monte-Carlo surface sampling weighted by triangle area, budgeted
    /// across the batch. Non-deterministic unless the budget carries a seed.
    AreaWeighted(SampleBudget),
}

impl PointStrategy {
    /// Generate placement points for a batch of meshes.
    ///
    /// Returns one point list per input mesh, in input order. Empty meshes
    /// produce empty lists.
    #[must_use]
    pub fn generate(&self, meshes: &[TriMesh]) -> Vec<Vec<PlacementPoint>> {
        match self {
            Self::Centroid => meshes.iter().map(centroid_points).collect(),
            Self::AreaWeighted(budget) => area_weighted_points(meshes, budget),
        }
    }
}

/// One placement per triangle: centroid position, face-normal orientation.
fn centroid_points(mesh: &TriMesh) -> Vec<PlacementPoint> {
    mesh.triangles()
        .map(|tri| PlacementPoint {
            position: tri.centroid(),
            orientation: tri.normal().map(|n| orientation_from_normal(&n)),
        })
        .collect()
}

/// Area-weighted random sampling over the whole batch.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Casts: sample counts are far below 2^52, and the floor() result is non-negative
fn area_weighted_points(meshes: &[TriMesh], budget: &SampleBudget) -> Vec<Vec<PlacementPoint>> {
    let total_area: f64 = meshes.iter().map(TriMesh::surface_area).sum();

    let mut rng: Box<dyn RngCore> = if let Some(seed) = budget.seed {
        Box::new(StdRng::seed_from_u64(seed))
    } else {
        Box::new(thread_rng())
    };

    let mut batch = Vec::with_capacity(meshes.len());
    for mesh in meshes {
        let area = mesh.surface_area();
        if mesh.is_empty() || area <= 0.0 || total_area <= 0.0 {
            batch.push(Vec::new());
            continue;
        }

        let share = area / total_area;
        let requested = ((budget.global as f64 * share).floor() as usize).min(budget.per_mesh_cap);
        debug!(
            requested,
            share = format!("{:.3}", share),
            "Sampling mesh surface"
        );

        batch.push(sample_mesh(mesh, requested, rng.as_mut()));
    }

    batch
}

/// Draw `count` area-weighted samples from one mesh.
fn sample_mesh(mesh: &TriMesh, count: usize, rng: &mut dyn RngCore) -> Vec<PlacementPoint> {
    // Cumulative area table for weighted triangle selection
    let mut cumulative = Vec::with_capacity(mesh.faces.len());
    let mut running = 0.0;
    for tri in mesh.triangles() {
        running += tri.area();
        cumulative.push(running);
    }
    if running <= 0.0 {
        return Vec::new();
    }

    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        let target = rng.gen::<f64>() * running;
        let face_index = cumulative
            .partition_point(|&c| c < target)
            .min(cumulative.len() - 1);

        // Index is in range by construction
        let Some(tri) = mesh.triangle(face_index) else {
            continue;
        };
        points.push(PlacementPoint {
            position: tri.sample_uniform(rng.gen(), rng.gen()),
            orientation: tri.normal().map(|n| orientation_from_normal(&n)),
        });
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use strew_types::{axis_cube, MeshBounds, Vertex};

    fn flat_quad(size: f64) -> TriMesh {
        let mut mesh = TriMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(size, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(size, size, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, size, 0.0));
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([0, 2, 3]);
        mesh
    }

    #[test]
    fn centroid_yields_one_point_per_triangle() {
        let cube = axis_cube(10.0);
        let points = PointStrategy::Centroid.generate(&[cube.clone(), flat_quad(1.0)]);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].len(), 12);
        assert_eq!(points[1].len(), 2);
    }

    #[test]
    fn centroid_orientation_matches_face_normal() {
        let quad = flat_quad(2.0);
        let points = PointStrategy::Centroid.generate(&[quad]);

        // Flat quad in the XY plane: normals are +Z, so the solver falls
        // back to identity
        for p in &points[0] {
            assert_eq!(p.orientation, Some(UnitQuaternion::identity()));
        }
    }

    #[test]
    fn area_weighted_respects_budget_and_cap() {
        let budget = SampleBudget::default()
            .with_global(1000)
            .with_per_mesh_cap(100)
            .with_seed(7);

        // Two meshes with a 9:1 area ratio
        let big = flat_quad(3.0); // area 9
        let small = flat_quad(1.0); // area 1
        let points = PointStrategy::AreaWeighted(budget).generate(&[big, small]);

        // Big mesh's share would be 900 but the cap clamps it
        assert_eq!(points[0].len(), 100);
        assert_eq!(points[1].len(), 100);

        let total: usize = points.iter().map(Vec::len).sum();
        assert!(total <= budget.global);
    }

    #[test]
    fn area_weighted_total_never_exceeds_global() {
        let budget = SampleBudget::default().with_global(500).with_seed(3);
        let meshes = vec![flat_quad(1.0), flat_quad(2.0), flat_quad(4.0)];
        let points = PointStrategy::AreaWeighted(budget).generate(&meshes);

        let total: usize = points.iter().map(Vec::len).sum();
        assert!(total <= 500);
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let budget = SampleBudget::default().with_global(200).with_seed(99);
        let mesh = flat_quad(5.0);

        let a = PointStrategy::AreaWeighted(budget).generate(&[mesh.clone()]);
        let b = PointStrategy::AreaWeighted(budget).generate(&[mesh]);
        assert_eq!(a, b);
    }

    #[test]
    fn samples_stay_on_surface() {
        let budget = SampleBudget::default().with_global(500).with_seed(1);
        let cube = axis_cube(10.0);
        let bounds = cube.bounds();
        let points = PointStrategy::AreaWeighted(budget).generate(&[cube]);

        for p in &points[0] {
            assert!(bounds.contains(&p.position));
        }
    }

    #[test]
    fn empty_mesh_yields_empty_list() {
        let budget = SampleBudget::default().with_seed(5);
        let points =
            PointStrategy::AreaWeighted(budget).generate(&[TriMesh::new(), flat_quad(1.0)]);
        assert!(points[0].is_empty());
        assert!(!points[1].is_empty());
    }
}
