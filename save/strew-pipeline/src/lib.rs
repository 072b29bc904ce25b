//! Batch pipelines that turn meshes into placed entity records.
//!
//! Two flows are provided, both appending to an externally produced entity
//! collection document:
//!
//! - **Scatter**: sample points over one or more mesh surfaces and place
//!   one pickup record per point, oriented by the local surface normal.
//! - **Trace**: slice a single mesh into planar contours and place one
//!   spline actor per contour, reproducing the shape as curves.
//!
//! # Example
//!
//! ```no_run
//! use strew_pipeline::{run_scatter, ScatterJob, ScatterSource};
//! use strew_save::SaveDocument;
//! use strew_transform::Placement;
//!
//! let mut doc = SaveDocument::default();
//! let job = ScatterJob::new(vec![ScatterSource::new(
//!     "teapot.stl",
//!     "/Game/FactoryGame/Resource/Parts/IronPlate/Desc_IronPlate.Desc_IronPlate_C",
//! )])
//! .with_placement(Placement::uniform_scale(200.0));
//!
//! let stats = run_scatter(&mut doc, &job)?;
//! println!("placed {} records", stats.total());
//! # Ok::<(), strew_pipeline::PipelineError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod scatter;
mod trace;

pub use error::{PipelineError, PipelineResult};
pub use scatter::{run_scatter, ScatterJob, ScatterSource};
pub use trace::{run_trace, TraceJob};
