//! The scatter pipeline: meshes in, pickup point records out.

use std::path::PathBuf;

use tracing::{debug, info};

use strew_sample::PointStrategy;
use strew_save::{PointRecordWriter, PointTemplate, SaveDocument, ScatterStats, PICKUP_CLASS};
use strew_transform::{unify_windings, Placement};

use crate::error::PipelineResult;

/// One source mesh of a scatter batch, paired with the material tag its
/// records carry.
#[derive(Debug, Clone)]
pub struct ScatterSource {
    /// Path to the mesh file (STL or OBJ).
    pub mesh: PathBuf,

    /// Material tag for every record generated from this mesh.
    pub material: String,
}

impl ScatterSource {
    /// Creates a source from a path and material tag.
    pub fn new(mesh: impl Into<PathBuf>, material: impl Into<String>) -> Self {
        Self {
            mesh: mesh.into(),
            material: material.into(),
        }
    }
}

/// Configuration of one scatter run.
#[derive(Debug, Clone)]
pub struct ScatterJob {
    /// Source meshes with their material tags.
    pub sources: Vec<ScatterSource>,

    /// Placement applied to every source mesh before sampling.
    pub placement: Placement,

    /// Point generation strategy.
    pub strategy: PointStrategy,
}

impl ScatterJob {
    /// Creates a job with an identity placement and the centroid strategy.
    #[must_use]
    pub fn new(sources: Vec<ScatterSource>) -> Self {
        Self {
            sources,
            placement: Placement::identity(),
            strategy: PointStrategy::Centroid,
        }
    }

    /// Sets the shared mesh placement.
    #[must_use]
    pub const fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Sets the point generation strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: PointStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Runs a scatter job against a document.
///
/// Loads every source mesh, applies the shared placement, repairs face
/// windings, generates placement points per mesh, and appends one pickup
/// record per point. Ids are allocated once up front and assigned strictly
/// sequentially in emission order, so a run that places `n` records
/// consumes exactly the id range `[first, first + n)`.
///
/// # Errors
///
/// Returns [`crate::PipelineError::MeshIo`] if a source mesh cannot be
/// loaded and [`crate::PipelineError::Save`] if id allocation finds a
/// malformed record. Any failure aborts the whole run.
pub fn run_scatter(doc: &mut SaveDocument, job: &ScatterJob) -> PipelineResult<ScatterStats> {
    let mut meshes = Vec::with_capacity(job.sources.len());
    for source in &job.sources {
        let mut mesh = strew_io::load_mesh(&source.mesh)?;
        job.placement.apply(&mut mesh);
        let flipped = unify_windings(&mut mesh);
        debug!(
            path = %source.mesh.display(),
            flipped,
            "loaded and placed source mesh"
        );
        meshes.push(mesh);
    }

    let mut next_id = doc.next_path_id(PICKUP_CLASS)?;
    let point_lists = job.strategy.generate(&meshes);

    let mut stats = ScatterStats::new();
    for (source, points) in job.sources.iter().zip(&point_lists) {
        let writer = PointRecordWriter::new(PointTemplate::pickup(&source.material));
        for point in points {
            writer.write(
                doc,
                &mut stats,
                point.position,
                point.orientation.as_ref(),
                next_id,
            );
            next_id += 1;
        }
        info!(
            material = %source.material,
            placed = points.len(),
            "scattered mesh"
        );
    }

    Ok(stats)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use std::path::Path;
    use strew_sample::SampleBudget;
    use strew_save::{Actor, ActorTransform};
    use strew_types::{axis_cube, MeshTopology};

    const IRON: &str = "/Game/FactoryGame/Resource/Parts/IronPlate/Desc_IronPlate.Desc_IronPlate_C";

    fn write_cube(dir: &Path, size: f64) -> PathBuf {
        let path = dir.join("cube.stl");
        strew_io::save_mesh(&axis_cube(size), &path).unwrap();
        path
    }

    fn path_suffix(path_name: &str) -> u64 {
        path_name.rsplit('_').next().unwrap().parse().unwrap()
    }

    #[test]
    fn centroid_scatter_places_one_record_per_face() {
        let dir = tempfile::tempdir().unwrap();
        let cube = write_cube(dir.path(), 10.0);

        let mut doc = SaveDocument::default();
        let job = ScatterJob::new(vec![ScatterSource::new(cube, IRON)]);
        let stats = run_scatter(&mut doc, &job).unwrap();

        assert_eq!(stats.total(), axis_cube(10.0).face_count());
        assert_eq!(doc.actors.len(), 12);
        for (i, actor) in doc.actors.iter().enumerate() {
            assert_eq!(path_suffix(&actor.path_name), 1 + i as u64);
        }
    }

    #[test]
    fn ids_continue_after_existing_records() {
        let dir = tempfile::tempdir().unwrap();
        let cube = write_cube(dir.path(), 10.0);

        let mut doc = SaveDocument::default();
        doc.actors.push(Actor {
            class_name: PICKUP_CLASS.to_owned(),
            path_name: "Persistent_Level:PersistentLevel.BP_ItemPickup_Spawnable_C_41".to_owned(),
            transform: ActorTransform::identity(),
            entity: serde_json::Value::Null,
            extra: serde_json::Map::new(),
        });

        let job = ScatterJob::new(vec![ScatterSource::new(cube, IRON)]);
        run_scatter(&mut doc, &job).unwrap();

        assert_eq!(path_suffix(&doc.actors[1].path_name), 42);
        assert_eq!(path_suffix(&doc.actors[12].path_name), 53);
    }

    #[test]
    fn ids_stay_sequential_across_sources() {
        let dir = tempfile::tempdir().unwrap();
        let cube = write_cube(dir.path(), 10.0);

        let mut doc = SaveDocument::default();
        let job = ScatterJob::new(vec![
            ScatterSource::new(&cube, "mat_a"),
            ScatterSource::new(&cube, "mat_b"),
        ]);
        let stats = run_scatter(&mut doc, &job).unwrap();

        assert_eq!(stats.count("mat_a"), 12);
        assert_eq!(stats.count("mat_b"), 12);
        for (i, actor) in doc.actors.iter().enumerate() {
            assert_eq!(path_suffix(&actor.path_name), 1 + i as u64);
        }
    }

    #[test]
    fn area_weighted_scatter_respects_the_cap() {
        let dir = tempfile::tempdir().unwrap();
        let cube = write_cube(dir.path(), 10.0);

        let mut doc = SaveDocument::default();
        let budget = SampleBudget::default()
            .with_global(100)
            .with_per_mesh_cap(30)
            .with_seed(7);
        let job = ScatterJob::new(vec![ScatterSource::new(cube, IRON)])
            .with_strategy(PointStrategy::AreaWeighted(budget));

        let stats = run_scatter(&mut doc, &job).unwrap();
        assert_eq!(stats.total(), 30);
        assert_eq!(doc.actors.len(), 30);
    }

    #[test]
    fn placement_scales_positions_into_world_space() {
        let dir = tempfile::tempdir().unwrap();
        let cube = write_cube(dir.path(), 1.0);

        let mut doc = SaveDocument::default();
        let job = ScatterJob::new(vec![ScatterSource::new(cube, IRON)])
            .with_placement(Placement::uniform_scale(100.0));
        run_scatter(&mut doc, &job).unwrap();

        let max_coord = doc
            .actors
            .iter()
            .flat_map(|a| a.transform.translation)
            .fold(f64::MIN, f64::max);
        assert!(max_coord > 50.0);
        assert!(max_coord <= 100.0);
    }

    #[test]
    fn missing_mesh_aborts_the_run() {
        let mut doc = SaveDocument::default();
        let job = ScatterJob::new(vec![ScatterSource::new("no_such_mesh.stl", IRON)]);

        let result = run_scatter(&mut doc, &job);
        assert!(matches!(result, Err(PipelineError::MeshIo(_))));
        assert!(doc.actors.is_empty());
    }
}
