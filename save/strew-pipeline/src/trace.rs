//! The trace pipeline: one mesh in, spline actors along its contours out.

use std::path::PathBuf;

use nalgebra::Point3;
use tracing::{debug, info};

use strew_save::{SaveDocument, SplineActorBuilder, SplinePointData, SplineTemplate};
use strew_slice::{curve_tangents, slice_mesh, SliceParams};
use strew_transform::Placement;

use crate::error::PipelineResult;

/// Configuration of one trace run.
///
/// The mesh is rezeroed before the placement is applied, so the placement
/// typically carries only scale and rotation; `anchor` positions the whole
/// traced shape in the world. Each spline actor is translated to the anchor
/// offset by its section curve's centroid, with waypoints kept relative to
/// that centroid.
#[derive(Debug, Clone)]
pub struct TraceJob {
    /// Path to the mesh file (STL or OBJ).
    pub source: PathBuf,

    /// Placement applied to the rezeroed mesh before slicing.
    pub placement: Placement,

    /// World position of the traced shape.
    pub anchor: Point3<f64>,

    /// Cross-section parameters.
    pub slice: SliceParams,

    /// Record template for the emitted spline actors.
    pub template: SplineTemplate,
}

impl TraceJob {
    /// Creates a job with an identity placement, origin anchor, default
    /// slice parameters, and the pipeline record template.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            placement: Placement::identity(),
            anchor: Point3::origin(),
            slice: SliceParams::default(),
            template: SplineTemplate::pipeline(),
        }
    }

    /// Sets the mesh placement.
    #[must_use]
    pub const fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Sets the world anchor of the traced shape.
    #[must_use]
    pub const fn with_anchor(mut self, anchor: Point3<f64>) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the cross-section parameters.
    #[must_use]
    pub const fn with_slice(mut self, slice: SliceParams) -> Self {
        self.slice = slice;
        self
    }
}

/// Runs a trace job against a document, returning the number of spline
/// actors placed.
///
/// Loads the mesh, rezeros it, applies the placement, slices it into
/// section curves, and builds one spline actor pair per curve. Each curve
/// consumes exactly [`SplineActorBuilder::ID_SPAN`] ids, so a run that
/// places `n` curves consumes the id range `[first, first + 2n)`.
///
/// # Errors
///
/// Returns [`crate::PipelineError::MeshIo`] if the mesh cannot be loaded
/// and [`crate::PipelineError::Save`] if id allocation finds a malformed
/// record.
pub fn run_trace(doc: &mut SaveDocument, job: &TraceJob) -> PipelineResult<usize> {
    let mut mesh = strew_io::load_mesh(&job.source)?;
    mesh.rezero();
    job.placement.apply(&mut mesh);

    let sections = slice_mesh(&mesh, &job.slice);
    debug!(
        curves = sections.curves.len(),
        planes = sections.plane_count,
        "sliced mesh"
    );

    let mut next_id = doc.next_path_id(&job.template.actor_class)?;
    for curve in &sections.curves {
        let (arrive, leave) = curve_tangents(&curve.points);

        // Each actor sits at the anchor offset by its section's centroid,
        // with waypoints stored relative to that centroid
        let centroid = curve.centroid();
        let waypoints: Vec<SplinePointData> = curve
            .points
            .iter()
            .zip(arrive.iter().zip(&leave))
            .map(|(&p, (&a, &l))| SplinePointData::new(Point3::from(p - centroid), a, l))
            .collect();

        let actor_position = job.anchor + centroid.coords;
        SplineActorBuilder::new(&job.template, next_id, actor_position, &waypoints)
            .append_to(doc);
        next_id += SplineActorBuilder::ID_SPAN;
    }

    info!(
        path = %job.source.display(),
        placed = sections.curves.len(),
        "traced mesh into spline actors"
    );
    Ok(sections.curves.len())
}
