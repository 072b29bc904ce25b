//! Error types for strew-pipeline operations.

use thiserror::Error;

/// Errors that can abort a pipeline run.
///
/// Pipelines are single-pass batch jobs: the first failure aborts the run
/// and leaves the document as it was at that point.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Failed to load a source mesh.
    #[error("mesh IO error: {0}")]
    MeshIo(#[from] strew_io::IoError),

    /// Failed to read, extend, or allocate ids in the document.
    #[error(transparent)]
    Save(#[from] strew_save::SaveError),
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
