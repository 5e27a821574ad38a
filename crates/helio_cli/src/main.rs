//! Command-line front end: parse arguments, generate the scene, render,
//! and encode the framebuffer as a PNG.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};

use helio_render::{
    render, Camera, CameraConfig, RenderConfig, Scene, SceneConfig, SkyGradient,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Sky {
    Day,
    Night,
}

impl From<Sky> for SkyGradient {
    fn from(sky: Sky) -> Self {
        match sky {
            Sky::Day => SkyGradient::DAY,
            Sky::Night => SkyGradient::NIGHT,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "helio", about = "CPU Monte Carlo sphere path tracer", version)]
struct Args {
    /// Output image width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Output image height in pixels
    #[arg(long, default_value_t = 512)]
    height: u32,

    /// Samples per pixel
    #[arg(short, long, default_value_t = 128)]
    samples: u32,

    /// Maximum path bounces
    #[arg(long, default_value_t = 50)]
    max_bounces: u32,

    /// Sphere count, including the ground sphere
    #[arg(long, default_value_t = 64)]
    spheres: usize,

    /// Seed for scene generation and sampling
    #[arg(long, default_value_t = 46557)]
    seed: u64,

    /// Worker thread count (defaults to the available parallelism)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Background gradient
    #[arg(long, value_enum, default_value_t = Sky::Day)]
    sky: Sky,

    /// Log verbosity
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .init();

    let workers = args.workers.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });

    let camera_config = CameraConfig {
        aspect: args.width as f32 / args.height as f32,
        ..CameraConfig::default()
    };
    let camera = Camera::new(&camera_config);

    let scene_config = SceneConfig {
        sphere_count: args.spheres,
        ..SceneConfig::default()
    };
    let scene = Scene::generate(&scene_config, camera.position(), args.seed)
        .context("scene generation failed")?;

    info!(
        "settings: {}x{}, {} spp, {} bounces, {} spheres, seed {}, {:?} sky",
        args.width, args.height, args.samples, args.max_bounces, args.spheres, args.seed, args.sky
    );

    let render_config = RenderConfig {
        width: args.width,
        height: args.height,
        samples_per_pixel: args.samples,
        max_bounces: args.max_bounces,
        workers,
        seed: args.seed,
        sky: args.sky.into(),
    };

    let framebuffer = render(&scene, &camera, &render_config)?;

    let image = image::RgbaImage::from_raw(args.width, args.height, framebuffer.into_bytes())
        .context("framebuffer size does not match the image dimensions")?;
    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!("wrote {}", args.output.display());
    Ok(())
}
