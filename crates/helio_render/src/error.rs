//! Error taxonomy for configuration, scene generation, and rendering.

use thiserror::Error;

/// Configuration errors, reported before any rendering work begins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("image dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    #[error("samples per pixel must be non-zero")]
    ZeroSamples,

    #[error("worker count must be non-zero")]
    ZeroWorkers,
}

/// Scene generation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error(
        "placed {placed} of {requested} spheres before exhausting {budget} attempts; \
         relax the placement constraints or lower the sphere count"
    )]
    AttemptBudgetExhausted {
        placed: usize,
        requested: usize,
        budget: u32,
    },
}

/// Render-level failures surfaced by the scheduler.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("failed to build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("render worker for row band starting at row {first_row} panicked")]
    WorkerPanicked { first_row: u32 },
}
