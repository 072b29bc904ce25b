//! Typed entity record model and record builders.
//!
//! This crate reads and extends an externally produced entity collection
//! document (a JSON export of a game save). It types exactly the fields the
//! placement tools touch and preserves everything else opaquely, so a
//! document that passes through unchanged is byte-for-byte equivalent.
//!
//! # Features
//!
//! - **Document model**: Actor/component lists with lossless round-trip
//! - **Id allocation**: Next free instance id per blueprint class
//! - **Point records**: Pickup actor construction, one per placement point
//! - **Spline records**: Spline actor + component pairs from waypoint lists
//!
//! # Example
//!
//! ```
//! use strew_save::{PointRecordWriter, PointTemplate, SaveDocument, ScatterStats, PICKUP_CLASS};
//! use nalgebra::Point3;
//!
//! let mut doc = SaveDocument::default();
//! let mut stats = ScatterStats::new();
//! let writer = PointRecordWriter::new(PointTemplate::pickup("Desc_IronPlate_C"));
//!
//! let id = doc.next_path_id(PICKUP_CLASS)?;
//! writer.write(&mut doc, &mut stats, Point3::new(0.0, 0.0, 100.0), None, id);
//!
//! assert_eq!(stats.total(), 1);
//! # Ok::<(), strew_save::SaveError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod document;
mod error;
mod point;
mod spline;

pub use document::{Actor, ActorTransform, Component, SaveDocument};
pub use error::{SaveError, SaveResult};
pub use point::{PointRecordWriter, PointTemplate, ScatterStats, PERSISTENT_LEVEL, PICKUP_CLASS};
pub use spline::{
    SplineActorBuilder, SplinePointData, SplineTemplate, PIPELINE_CLASS, SPLINE_COMPONENT_CLASS,
};
