//! Helio - CPU Monte Carlo path tracing
//!
//! Renders a procedurally generated field of spheres with depth-bounded
//! recursive light transport and a row-interleaved parallel scheduler.
//! Scene and camera are built once, immutably, from a seed; rendering is
//! deterministic for a given configuration regardless of worker count.

mod camera;
mod error;
mod framebuffer;
mod material;
mod random;
mod renderer;
mod scene;
mod sphere;
mod tile;

pub use camera::{Camera, CameraConfig};
pub use error::{ConfigError, RenderError, SceneError};
pub use framebuffer::Framebuffer;
pub use material::{Color, Material};
pub use renderer::{color_to_rgba, linear_to_gamma, trace, RenderConfig, SkyGradient};
pub use scene::{MaterialWeights, Scene, SceneConfig};
pub use sphere::{Hit, Sphere};
pub use tile::{generate_bands, render, render_band, BandResult, RowBand};

/// Re-export Vec3 and common math types from helio_math
pub use helio_math::{Interval, Ray, Vec3};
