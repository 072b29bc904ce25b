//! Surface normal to placement orientation.

use nalgebra::{Unit, UnitQuaternion, Vector3};

/// Convert a surface normal into a placement orientation.
///
/// Returns the unit quaternion that rotates the +Z reference axis onto the
/// input vector: rotation axis = input x +Z (normalized), rotation angle =
/// -arccos(dot(normalized input, +Z)). The input does not need to be unit
/// length.
///
/// Degenerate inputs - a zero or non-finite vector, or one parallel or
/// anti-parallel to +Z (near-zero cross product) - return the identity
/// quaternion. That is the intended fallback for placements that should
/// keep their template orientation, not an error.
///
/// Pure and stateless.
///
/// # Example
///
/// ```
/// use strew_sample::orientation_from_normal;
/// use nalgebra::Vector3;
///
/// let q = orientation_from_normal(&Vector3::new(1.0, 0.0, 0.0));
/// let rotated = q * Vector3::z();
/// assert!((rotated - Vector3::x()).norm() < 1e-10);
///
/// // Parallel to the reference axis: identity
/// let q = orientation_from_normal(&Vector3::new(0.0, 0.0, 3.0));
/// assert_eq!(q, nalgebra::UnitQuaternion::identity());
/// ```
#[must_use]
pub fn orientation_from_normal(normal: &Vector3<f64>) -> UnitQuaternion<f64> {
    let len = normal.norm();
    if !len.is_finite() || len < f64::EPSILON {
        return UnitQuaternion::identity();
    }
    let n = normal / len;

    let up = Vector3::z();
    let axis = n.cross(&up);
    let axis_len = axis.norm();
    if !axis_len.is_finite() || axis_len < 1e-12 {
        // Parallel or anti-parallel to the reference axis
        return UnitQuaternion::identity();
    }

    let angle = -n.dot(&up).clamp(-1.0, 1.0).acos();
    let axis = Unit::new_unchecked(axis / axis_len);
    UnitQuaternion::from_axis_angle(&axis, angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn aligns_reference_axis_with_input() {
        let inputs = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-0.3, 0.8, -0.5),
        ];

        for v in inputs {
            let q = orientation_from_normal(&v);
            let rotated = q * Vector3::z();
            let expected = v.normalize();
            assert_relative_eq!((rotated - expected).norm(), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn result_is_unit() {
        let q = orientation_from_normal(&Vector3::new(2.0, -7.0, 0.5));
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn unnormalized_input_is_accepted() {
        let q1 = orientation_from_normal(&Vector3::new(1.0, 2.0, 3.0));
        let q2 = orientation_from_normal(&Vector3::new(10.0, 20.0, 30.0));
        assert_relative_eq!(q1.angle_to(&q2), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn parallel_and_antiparallel_fall_back_to_identity() {
        assert_eq!(
            orientation_from_normal(&Vector3::new(0.0, 0.0, 1.0)),
            UnitQuaternion::identity()
        );
        assert_eq!(
            orientation_from_normal(&Vector3::new(0.0, 0.0, -4.0)),
            UnitQuaternion::identity()
        );
    }

    #[test]
    fn zero_and_non_finite_fall_back_to_identity() {
        assert_eq!(
            orientation_from_normal(&Vector3::zeros()),
            UnitQuaternion::identity()
        );
        assert_eq!(
            orientation_from_normal(&Vector3::new(f64::NAN, 0.0, 0.0)),
            UnitQuaternion::identity()
        );
        assert_eq!(
            orientation_from_normal(&Vector3::new(f64::INFINITY, 1.0, 0.0)),
            UnitQuaternion::identity()
        );
    }
}
