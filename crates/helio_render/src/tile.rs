//! Row-interleaved parallel scheduling.
//!
//! The image is split into bands of interleaved rows: band `k` of `n` owns
//! rows `k, k + n, k + 2n, ...`. Interleaving spreads expensive regions
//! (lots of geometry near the horizon) across workers instead of handing
//! one worker a contiguous hot stripe.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::error::RenderError;
use crate::framebuffer::Framebuffer;
use crate::renderer::{render_pixel, RenderConfig};
use crate::scene::Scene;

/// One worker's share of the image: every `stride`-th row starting at
/// `first_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    pub first_row: u32,
    pub stride: u32,
    pub image_height: u32,
}

impl RowBand {
    /// The rows this band owns, in increasing order.
    pub fn rows(&self) -> impl Iterator<Item = u32> {
        (self.first_row..self.image_height).step_by(self.stride as usize)
    }

    /// Number of rows in the band.
    pub fn row_count(&self) -> u32 {
        if self.first_row >= self.image_height {
            0
        } else {
            (self.image_height - self.first_row).div_ceil(self.stride)
        }
    }
}

/// Partition `height` rows into `workers` interleaved bands.
///
/// Together the bands cover every row exactly once; bands past the image
/// height come out empty rather than being dropped, so the band list
/// always has `workers` entries.
pub fn generate_bands(height: u32, workers: usize) -> Vec<RowBand> {
    let stride = workers as u32;
    (0..stride)
        .map(|first_row| RowBand {
            first_row,
            stride,
            image_height: height,
        })
        .collect()
}

/// Completed rows for one band, tagged with their y coordinates.
#[derive(Debug)]
pub struct BandResult {
    pub band: RowBand,
    pub rows: Vec<(u32, Vec<[u8; 4]>)>,
}

/// Per-row generator seed. Rows own their randomness, so the rendered
/// bytes do not depend on how rows are grouped into bands.
fn row_seed(seed: u64, row: u32) -> u64 {
    seed ^ (u64::from(row) + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

/// Render every row of one band.
pub fn render_band(
    band: RowBand,
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
) -> BandResult {
    let mut rows = Vec::with_capacity(band.row_count() as usize);

    for y in band.rows() {
        let mut rng = StdRng::seed_from_u64(row_seed(config.seed, y));
        let mut pixels = Vec::with_capacity(config.width as usize);
        for x in 0..config.width {
            pixels.push(render_pixel(scene, camera, x, y, config, &mut rng));
        }
        rows.push((y, pixels));
    }

    BandResult { band, rows }
}

/// Render the full image across `config.workers` threads.
///
/// The configuration is validated up front; a failed render never yields
/// a partial framebuffer. A panicking worker is caught at the join point
/// and surfaced as [`RenderError::WorkerPanicked`] naming its band.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
) -> Result<Framebuffer, RenderError> {
    config.validate()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()?;

    let bands = generate_bands(config.height, config.workers);
    info!(
        "rendering {}x{} at {} spp across {} workers",
        config.width, config.height, config.samples_per_pixel, config.workers
    );
    let start = Instant::now();

    let results: Vec<BandResult> = pool.install(|| {
        bands
            .into_par_iter()
            .map(|band| {
                catch_unwind(AssertUnwindSafe(|| render_band(band, scene, camera, config)))
                    .map_err(|_| RenderError::WorkerPanicked {
                        first_row: band.first_row,
                    })
            })
            .collect::<Result<_, _>>()
    })?;

    let mut framebuffer = Framebuffer::new(config.width, config.height);
    let mut rows_written: u32 = 0;
    for result in results {
        for (y, pixels) in result.rows {
            framebuffer.write_row(y, &pixels);
            rows_written += 1;
        }
    }
    debug_assert_eq!(rows_written, config.height);

    info!("render finished in {:.2?}", start.elapsed());
    Ok(framebuffer)
}
