//! Composed placement transform.

use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use strew_types::TriMesh;

/// A placement transform for positioning a mesh in the game world.
///
/// Composed from per-axis scale, Euler rotation (degrees, XYZ order), and
/// translation into one 4x4 affine matrix. The composition order is the
/// invariant **scale → rotate → translate**: the mesh is scaled in its own
/// model space, rotated about the origin, then moved to the world anchor.
///
/// # Example
///
/// ```
/// use strew_transform::Placement;
/// use nalgebra::Vector3;
///
/// let placement = Placement::uniform_scale(200.0)
///     .with_rotation_deg(Vector3::new(0.0, 0.0, 90.0))
///     .with_translation(Vector3::new(-183_178.0, -71_177.0, 34_282.0));
///
/// let p = placement.transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
/// // Scaled to 200, rotated onto +Y, then translated
/// assert!((p.y - (-71_177.0 + 200.0)).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Per-axis scale factors.
    pub scale: Vector3<f64>,
    /// Euler rotation in degrees, applied in X, Y, Z order.
    pub rotation_deg: Vector3<f64>,
    /// World translation.
    pub translation: Vector3<f64>,
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

impl Placement {
    /// The identity placement (unit scale, no rotation, no translation).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation_deg: Vector3::zeros(),
            translation: Vector3::zeros(),
        }
    }

    /// Create a placement with a uniform scale factor.
    #[must_use]
    pub fn uniform_scale(factor: f64) -> Self {
        Self {
            scale: Vector3::new(factor, factor, factor),
            ..Self::identity()
        }
    }

    /// Set per-axis scale factors.
    #[must_use]
    pub const fn with_scale(mut self, scale: Vector3<f64>) -> Self {
        self.scale = scale;
        self
    }

    /// Set the Euler rotation in degrees (XYZ order).
    #[must_use]
    pub const fn with_rotation_deg(mut self, rotation_deg: Vector3<f64>) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    /// Set the world translation.
    #[must_use]
    pub const fn with_translation(mut self, translation: Vector3<f64>) -> Self {
        self.translation = translation;
        self
    }

    /// Compose the placement into a single 4x4 matrix.
    ///
    /// Multiplication order puts scale innermost and translation outermost,
    /// so a transformed point is `T * Rz * Ry * Rx * S * p`.
    #[must_use]
    pub fn matrix(&self) -> Matrix4<f64> {
        let scale = Matrix4::new_nonuniform_scaling(&self.scale);

        let rx = rotation_x(self.rotation_deg.x.to_radians());
        let ry = rotation_y(self.rotation_deg.y.to_radians());
        let rz = rotation_z(self.rotation_deg.z.to_radians());

        let translate = Matrix4::new_translation(&self.translation);

        translate * rz * ry * rx * scale
    }

    /// Transform a single point.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let p = self.matrix() * Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(p.x, p.y, p.z)
    }

    /// Transform a direction vector (ignores translation).
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        let v = self.matrix() * Vector4::new(vector.x, vector.y, vector.z, 0.0);
        Vector3::new(v.x, v.y, v.z)
    }

    /// Apply the placement to every vertex of a mesh, in place.
    ///
    /// Meshes are pipeline-local, so in-place mutation is safe; the same
    /// placement is applied to every mesh of a batch.
    pub fn apply(&self, mesh: &mut TriMesh) {
        let matrix = self.matrix();
        for vertex in &mut mesh.vertices {
            let p = matrix
                * Vector4::new(vertex.position.x, vertex.position.y, vertex.position.z, 1.0);
            vertex.position = Point3::new(p.x, p.y, p.z);
        }
    }
}

fn rotation_x(angle: f64) -> Matrix4<f64> {
    let (sin_a, cos_a) = angle.sin_cos();
    #[rustfmt::skip]
    let matrix = Matrix4::new(
        1.0,   0.0,    0.0, 0.0,
        0.0, cos_a, -sin_a, 0.0,
        0.0, sin_a,  cos_a, 0.0,
        0.0,   0.0,    0.0, 1.0,
    );
    matrix
}

fn rotation_y(angle: f64) -> Matrix4<f64> {
    let (sin_a, cos_a) = angle.sin_cos();
    #[rustfmt::skip]
    let matrix = Matrix4::new(
         cos_a, 0.0, sin_a, 0.0,
           0.0, 1.0,   0.0, 0.0,
        -sin_a, 0.0, cos_a, 0.0,
           0.0, 0.0,   0.0, 1.0,
    );
    matrix
}

fn rotation_z(angle: f64) -> Matrix4<f64> {
    let (sin_a, cos_a) = angle.sin_cos();
    #[rustfmt::skip]
    let matrix = Matrix4::new(
        cos_a, -sin_a, 0.0, 0.0,
        sin_a,  cos_a, 0.0, 0.0,
          0.0,    0.0, 1.0, 0.0,
          0.0,    0.0, 0.0, 1.0,
    );
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strew_types::{axis_cube, MeshBounds};

    #[test]
    fn identity_leaves_points_alone() {
        let p = Placement::identity().transform_point(&Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn scale_applies_before_translation() {
        let placement = Placement::uniform_scale(10.0)
            .with_translation(Vector3::new(100.0, 0.0, 0.0));
        let p = placement.transform_point(&Point3::new(1.0, 0.0, 0.0));
        // If translation were scaled too, this would be 1010
        assert_relative_eq!(p.x, 110.0, epsilon = 1e-9);
    }

    #[test]
    fn rotation_applies_after_scale() {
        // Scale x by 2, then rotate 90 deg around Z: +X lands on +Y
        let placement = Placement::identity()
            .with_scale(Vector3::new(2.0, 1.0, 1.0))
            .with_rotation_deg(Vector3::new(0.0, 0.0, 90.0));
        let p = placement.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn euler_order_is_xyz() {
        // 90 deg about X then 90 deg about Y: +Y -> +Z (by X) -> +X (by Y)
        let placement =
            Placement::identity().with_rotation_deg(Vector3::new(90.0, 90.0, 0.0));
        let p = placement.transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn vectors_ignore_translation() {
        let placement =
            Placement::identity().with_translation(Vector3::new(10.0, 20.0, 30.0));
        let v = placement.transform_vector(&Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn apply_moves_whole_mesh() {
        let mut cube = axis_cube(1.0);
        Placement::uniform_scale(3.0)
            .with_translation(Vector3::new(5.0, 0.0, 0.0))
            .apply(&mut cube);

        let bounds = cube.bounds();
        assert_relative_eq!(bounds.min.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(bounds.max.x, 8.0, epsilon = 1e-9);
        assert_relative_eq!(bounds.max.z, 3.0, epsilon = 1e-9);
    }
}
