//! Planar cross-section slicing.
//!
//! Intersects a mesh with a ladder of parallel planes and chains the
//! resulting edge-intersection segments into discrete polyline curves, one
//! per (plane, connected component).

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Plane counts stay far below 2^52; floor() of a non-negative ratio is non-negative

use nalgebra::{Point3, Vector3};
use strew_types::{MeshTopology, TriMesh};
use tracing::{debug, info};

/// Endpoint-matching tolerance when chaining segments into curves.
const CHAIN_EPSILON: f64 = 1e-6;

/// Parameters for cross-section slicing.
///
/// # Example
///
/// ```
/// use strew_slice::SliceParams;
///
/// let params = SliceParams::default().with_step(25.0);
/// assert_eq!(params.step, 25.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceParams {
    /// Slicing axis: planes are perpendicular to this direction.
    pub axis: Vector3<f64>,
    /// Height step between consecutive planes, in spatial units.
    pub step: f64,
}

impl Default for SliceParams {
    /// Horizontal planes every 50 spatial units.
    fn default() -> Self {
        Self {
            axis: Vector3::z(),
            step: 50.0,
        }
    }
}

impl SliceParams {
    /// Set the slicing axis.
    #[must_use]
    pub const fn with_axis(mut self, axis: Vector3<f64>) -> Self {
        self.axis = axis;
        self
    }

    /// Set the height step.
    #[must_use]
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }
}

/// One connected intersection curve on one slicing plane.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionCurve {
    /// Index of the plane (0 = lowest plane of the ladder).
    pub plane_index: usize,
    /// Scalar height of the plane along the slicing axis.
    pub height: f64,
    /// Ordered polyline points. Closed curves do not repeat the first
    /// point at the end.
    pub points: Vec<Point3<f64>>,
    /// Whether the curve closes back on itself.
    pub closed: bool,
}

impl SectionCurve {
    /// Number of polyline points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the curve has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Arithmetic mean of the curve points.
    ///
    /// Spline actors placed on a curve use this point as their local
    /// origin. Returns the origin for an empty curve.
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        if self.points.is_empty() {
            return Point3::origin();
        }
        let sum: Vector3<f64> = self.points.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.points.len() as f64)
    }
}

/// Result of slicing one mesh.
#[derive(Debug, Clone, Default)]
pub struct SliceResult {
    /// All curves, ordered by plane index then discovery order.
    pub curves: Vec<SectionCurve>,
    /// Number of planes in the ladder.
    pub plane_count: usize,
    /// Planes that intersected nothing (skipped, not an error).
    pub empty_planes: usize,
}

/// Slice a mesh with parallel planes at a fixed height step.
///
/// The plane ladder spans the mesh's extent `[h0, h1]` along the axis at
/// heights `h0 + k * step` for `k = 1..=floor((h1 - h0) / step)` - half-open
/// at the bottom, so a solid resting on its lowest plane never produces a
/// degenerate coplanar section. Planes that do not intersect the mesh are
/// skipped silently.
///
/// # Example
///
/// ```
/// use strew_slice::{slice_mesh, SliceParams};
/// use strew_types::axis_cube;
///
/// let cube = axis_cube(10.0);
/// let result = slice_mesh(&cube, &SliceParams::default().with_step(2.5));
///
/// // 4 planes, one closed square each
/// assert_eq!(result.curves.len(), 4);
/// assert!(result.curves.iter().all(|c| c.closed));
/// ```
#[must_use]
pub fn slice_mesh(mesh: &TriMesh, params: &SliceParams) -> SliceResult {
    let axis_len = params.axis.norm();
    if mesh.is_empty() || params.step <= 0.0 || axis_len < f64::EPSILON {
        return SliceResult::default();
    }
    let axis = params.axis / axis_len;

    let (h0, h1) = extent_along(mesh, &axis);
    let span = h1 - h0;
    if span <= 0.0 {
        return SliceResult::default();
    }

    let plane_count = (span / params.step).floor() as usize;
    info!(
        plane_count,
        span = format!("{:.1}", span),
        step = params.step,
        "Slicing mesh into cross-sections"
    );

    let mut result = SliceResult {
        curves: Vec::new(),
        plane_count,
        empty_planes: 0,
    };

    for k in 1..=plane_count {
        let height = (k as f64).mul_add(params.step, h0);
        let plane_index = k - 1;

        let segments = intersect_plane(mesh, &axis, height);
        if segments.is_empty() {
            result.empty_planes += 1;
            continue;
        }

        let mut curve_count = 0;
        for contour in chain_segments(&segments) {
            if let Some(curve) = finish_contour(contour, plane_index, height) {
                result.curves.push(curve);
                curve_count += 1;
            }
        }
        if curve_count == 0 {
            result.empty_planes += 1;
        } else {
            debug!(plane_index, height, curves = curve_count, "Sliced plane");
        }
    }

    result
}

/// Scalar min/max extent of the mesh vertices along a unit direction.
fn extent_along(mesh: &TriMesh, axis: &Vector3<f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in &mesh.vertices {
        let d = v.position.coords.dot(axis);
        lo = lo.min(d);
        hi = hi.max(d);
    }
    (lo, hi)
}

/// Collect all triangle-plane intersection segments for one plane.
fn intersect_plane(
    mesh: &TriMesh,
    axis: &Vector3<f64>,
    height: f64,
) -> Vec<(Point3<f64>, Point3<f64>)> {
    let plane_point = Point3::from(axis * height);
    let mut segments = Vec::new();

    for triangle in mesh.triangles() {
        let mut intersections: Vec<Point3<f64>> = Vec::new();

        for (a, b) in [
            (triangle.v0, triangle.v1),
            (triangle.v1, triangle.v2),
            (triangle.v2, triangle.v0),
        ] {
            if let Some(p) = plane_edge_intersection(plane_point, axis, a, b) {
                // A vertex lying exactly on the plane is reported by both
                // of its edges; collapse coincident hits so a triangle that
                // crosses through such a vertex still yields its segment
                if intersections.iter().all(|q| (p - q).norm() > CHAIN_EPSILON) {
                    intersections.push(p);
                }
            }
        }

        // Two distinct crossings make a segment; a single point is a
        // grazing touch and carries no curve information
        if intersections.len() == 2 {
            segments.push((intersections[0], intersections[1]));
        }
    }

    segments
}

fn plane_edge_intersection(
    plane_point: Point3<f64>,
    plane_normal: &Vector3<f64>,
    a: Point3<f64>,
    b: Point3<f64>,
) -> Option<Point3<f64>> {
    let d_a = (a - plane_point).dot(plane_normal);
    let d_b = (b - plane_point).dot(plane_normal);

    if d_a * d_b > 0.0 {
        return None; // Same side of plane
    }

    if (d_a - d_b).abs() < 1e-10 {
        return None; // Edge parallel to (or inside) the plane
    }

    let t = d_a / (d_a - d_b);
    Some(Point3::from(a.coords + (b - a) * t))
}

/// Chain unordered segments into connected polylines.
fn chain_segments(segments: &[(Point3<f64>, Point3<f64>)]) -> Vec<Vec<Point3<f64>>> {
    let mut remaining: Vec<_> = segments.to_vec();
    let mut contours = Vec::new();

    while !remaining.is_empty() {
        let mut contour = Vec::new();
        let first = remaining.remove(0);
        contour.push(first.0);
        contour.push(first.1);

        let mut changed = true;
        while changed {
            changed = false;

            let start = contour[0];
            let end = contour[contour.len() - 1];

            for i in (0..remaining.len()).rev() {
                let seg = &remaining[i];

                if (seg.0 - end).norm() < CHAIN_EPSILON {
                    contour.push(seg.1);
                    remaining.remove(i);
                    changed = true;
                } else if (seg.1 - end).norm() < CHAIN_EPSILON {
                    contour.push(seg.0);
                    remaining.remove(i);
                    changed = true;
                } else if (seg.0 - start).norm() < CHAIN_EPSILON {
                    contour.insert(0, seg.1);
                    remaining.remove(i);
                    changed = true;
                } else if (seg.1 - start).norm() < CHAIN_EPSILON {
                    contour.insert(0, seg.0);
                    remaining.remove(i);
                    changed = true;
                }

                if changed {
                    break;
                }
            }
        }

        contours.push(contour);
    }

    contours
}

/// Detect closure, strip the duplicate closing point, and discard contours
/// too small to be curves.
fn finish_contour(
    mut points: Vec<Point3<f64>>,
    plane_index: usize,
    height: f64,
) -> Option<SectionCurve> {
    let closed = points.len() > 2
        && (points[0] - points[points.len() - 1]).norm() < CHAIN_EPSILON;
    if closed {
        points.pop();
    }

    if points.len() < 2 || (closed && points.len() < 3) {
        return None;
    }

    Some(SectionCurve {
        plane_index,
        height,
        points,
        closed,
    })
}
