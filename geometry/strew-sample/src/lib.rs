//! Surface point generation for Strew.
//!
//! Turns transformed meshes into placement points: a position on (or
//! derived from) the mesh surface plus an orientation aligned with the
//! local surface normal.
//!
//! Two strategies exist, as a closed set:
//!
//! - [`PointStrategy::Centroid`] - one point per triangle, deterministic
//! - [`PointStrategy::AreaWeighted`] - Monte-Carlo surface sampling under a
//!   shared [`SampleBudget`], non-deterministic unless seeded
//!
//! # Example
//!
//! ```
//! use strew_sample::{PointStrategy, SampleBudget};
//! use strew_types::axis_cube;
//!
//! let meshes = vec![axis_cube(100.0)];
//! let budget = SampleBudget::default().with_global(1_000).with_seed(42);
//! let per_mesh = PointStrategy::AreaWeighted(budget).generate(&meshes);
//!
//! assert_eq!(per_mesh.len(), 1);
//! assert!(per_mesh[0].len() <= 1_000);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod orientation;
mod strategy;

pub use orientation::orientation_from_normal;
pub use strategy::{PlacementPoint, PointStrategy, SampleBudget};
