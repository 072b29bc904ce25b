//! Mesh placement transforms and winding repair for Strew.
//!
//! This crate covers the two geometry-mutation steps that run between
//! loading a mesh asset and handing it to the sampling or slicing stages:
//!
//! - [`Placement`] - a single composed affine transform (scale, then Euler
//!   XYZ rotation in degrees, then translation) applied in place
//! - [`unify_windings`] - face-winding repair so all face normals point
//!   consistently outward per connected shell
//!
//! # Example
//!
//! ```
//! use strew_transform::{Placement, unify_windings};
//! use strew_types::{axis_cube, MeshBounds};
//! use nalgebra::Vector3;
//!
//! let mut cube = axis_cube(1.0);
//! let placement = Placement::uniform_scale(200.0)
//!     .with_translation(Vector3::new(-1000.0, 500.0, 0.0));
//! placement.apply(&mut cube);
//! unify_windings(&mut cube);
//!
//! assert!((cube.bounds().size().x - 200.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod placement;
mod repair;

pub use adjacency::EdgeAdjacency;
pub use placement::Placement;
pub use repair::unify_windings;
