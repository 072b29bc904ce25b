//! Planar cross-sectioning of meshes into ordered polyline curves.
//!
//! This crate intersects a triangle mesh with a ladder of parallel planes
//! and chains the resulting segments into contours, each an ordered list of
//! 3D points ready to be traced by a spline.
//!
//! # Features
//!
//! - **Slicing**: Cut a mesh with evenly spaced parallel planes
//! - **Contour chaining**: Assemble intersection segments into polylines
//! - **Closure detection**: Distinguish closed loops from open curves
//! - **Tangent estimation**: Half-difference arrive/leave spline tangents
//!
//! # Example
//!
//! ```
//! use strew_types::axis_cube;
//! use strew_slice::{slice_mesh, curve_tangents, SliceParams};
//!
//! let cube = axis_cube(10.0);
//! let result = slice_mesh(&cube, &SliceParams::default().with_step(4.0));
//!
//! for curve in &result.curves {
//!     assert!(curve.closed);
//!     let (arrive, leave) = curve_tangents(&curve.points);
//!     assert_eq!(arrive.len(), curve.len());
//!     assert_eq!(leave.len(), curve.len());
//! }
//! ```
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system** with Z up. The default slicing
//! axis is +Z, so planes are horizontal and curves are level contours.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod slicer;
mod tangent;

pub use slicer::{SectionCurve, SliceParams, SliceResult, slice_mesh};
pub use tangent::curve_tangents;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
