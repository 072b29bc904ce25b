//! Spline tangent estimation for polyline curves.

use nalgebra::{Point3, Vector3};

/// Compute per-vertex arrive/leave tangents for a polyline.
///
/// Centered finite differences, halved:
///
/// - `leave[i] = (p[i+1] - p[i]) / 2` for all but the last point, which
///   gets the zero vector
/// - `arrive[i] = (p[i] - p[i-1]) / 2` for all but the first point, which
///   gets the zero vector
///
/// The zero boundary tangents encode the open-curve policy: no wraparound,
/// even for curves that geometrically close on themselves. Both output
/// vectors always have the same length as the input.
///
/// # Example
///
/// ```
/// use strew_slice::curve_tangents;
/// use nalgebra::{Point3, Vector3};
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(2.0, 2.0, 0.0),
/// ];
/// let (arrive, leave) = curve_tangents(&points);
///
/// assert_eq!(arrive[0], Vector3::zeros());
/// assert_eq!(leave[2], Vector3::zeros());
/// assert_eq!(leave[0], Vector3::new(1.0, 0.0, 0.0));
/// assert_eq!(arrive[1], Vector3::new(1.0, 0.0, 0.0));
/// ```
#[must_use]
pub fn curve_tangents(points: &[Point3<f64>]) -> (Vec<Vector3<f64>>, Vec<Vector3<f64>>) {
    let n = points.len();
    let mut arrive = vec![Vector3::zeros(); n];
    let mut leave = vec![Vector3::zeros(); n];

    for i in 0..n.saturating_sub(1) {
        let half_step = (points[i + 1] - points[i]) / 2.0;
        leave[i] = half_step;
        arrive[i + 1] = half_step;
    }

    (arrive, leave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_match_input() {
        for n in 1..6 {
            let points: Vec<_> = (0..n)
                .map(|i| Point3::new(f64::from(i), 0.0, 0.0))
                .collect();
            let (arrive, leave) = curve_tangents(&points);
            assert_eq!(arrive.len(), n as usize);
            assert_eq!(leave.len(), n as usize);
        }
    }

    #[test]
    fn boundary_tangents_are_zero() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(4.0, 4.0, 4.0),
            Point3::new(9.0, 0.0, 1.0),
        ];
        let (arrive, leave) = curve_tangents(&points);

        assert_eq!(arrive[0], Vector3::zeros());
        assert_eq!(leave[3], Vector3::zeros());
    }

    #[test]
    fn interior_tangents_are_half_differences() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 6.0, 0.0),
        ];
        let (arrive, leave) = curve_tangents(&points);

        assert_eq!(leave[0], Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(arrive[1], Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(leave[1], Vector3::new(0.0, 3.0, 0.0));
        assert_eq!(arrive[2], Vector3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn single_point_curve() {
        let points = vec![Point3::new(1.0, 1.0, 1.0)];
        let (arrive, leave) = curve_tangents(&points);
        assert_eq!(arrive, vec![Vector3::zeros()]);
        assert_eq!(leave, vec![Vector3::zeros()]);
    }

    #[test]
    fn empty_curve() {
        let (arrive, leave) = curve_tangents(&[]);
        assert!(arrive.is_empty());
        assert!(leave.is_empty());
    }
}
