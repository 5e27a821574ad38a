//! Core path tracing: radiance estimation and pixel sampling.

use helio_math::{normalized, Interval, Ray, Vec3};
use rand::RngCore;

use crate::camera::Camera;
use crate::error::ConfigError;
use crate::material::Color;
use crate::random::gen_f32;
use crate::scene::Scene;

/// Intersection lower bound; suppresses self-intersection ("shadow acne")
/// on bounce rays that start exactly on a surface.
const T_MIN: f32 = 1e-4;

/// Background gradient endpoints, blended on the ray's vertical component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyGradient {
    pub horizon: Color,
    pub zenith: Color,
}

impl SkyGradient {
    /// Daytime white-to-blue gradient.
    pub const DAY: SkyGradient = SkyGradient {
        horizon: Vec3::new(1.0, 1.0, 1.0),
        zenith: Vec3::new(0.5, 0.7, 1.0),
    };

    /// Dim warm horizon fading into a near-black sky.
    pub const NIGHT: SkyGradient = SkyGradient {
        horizon: Vec3::new(0.27, 0.211, 0.184),
        zenith: Vec3::new(0.02, 0.02, 0.02),
    };

    /// Ambient radiance for a ray that escaped the scene.
    pub fn sample(&self, direction: Vec3) -> Color {
        let dir = normalized(direction);
        let t = 0.5 * (dir.y + 1.0);
        (1.0 - t) * self.horizon + t * self.zenith
    }
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Antialiasing samples accumulated per pixel
    pub samples_per_pixel: u32,
    /// Bounce budget per path; the sole recursion bound
    pub max_bounces: u32,
    /// Worker thread count
    pub workers: usize,
    /// Master seed; row generators derive from it
    pub seed: u64,
    /// Background gradient
    pub sky: SkyGradient,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 512,
            samples_per_pixel: 128,
            max_bounces: 50,
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            seed: 46557,
            sky: SkyGradient::DAY,
        }
    }
}

impl RenderConfig {
    /// Reject configurations that cannot produce an image. Called before
    /// any rendering work begins; a failed render never emits pixels.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}

/// Estimate radiance along a camera ray.
///
/// Depth-bounded walk carrying an attenuation accumulator; equivalent to
/// the recursive formulation but with constant stack use at any bounce
/// budget. Termination: sky miss, emissive hit, absorption, or an
/// exhausted bounce budget (which contributes nothing).
pub fn trace(
    ray: &Ray,
    scene: &Scene,
    max_bounces: u32,
    sky: &SkyGradient,
    rng: &mut dyn RngCore,
) -> Color {
    let mut attenuation = Color::ONE;
    let mut current = *ray;
    let mut remaining = max_bounces;

    loop {
        let hit = match scene.hit(&current, Interval::new(T_MIN, f32::INFINITY)) {
            Some(hit) => hit,
            None => return attenuation * sky.sample(current.direction),
        };

        if remaining == 0 {
            return Color::ZERO;
        }

        match hit.material.scatter(&current, &hit, rng) {
            Some((albedo, scattered)) => {
                attenuation *= albedo;
                current = scattered;
                remaining -= 1;
            }
            // Absorbed: emitters contribute their radiance, everything else black
            None => return attenuation * hit.material.emitted(),
        }
    }
}

/// Render one pixel: average the jittered samples, gamma-correct, and
/// quantize to RGBA8.
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> [u8; 4] {
    let mut color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) / config.width as f32;
        // Row 0 is the top of the image; t runs bottom-up on the image plane
        let t = 1.0 - (y as f32 + gen_f32(rng)) / config.height as f32;

        let ray = camera.get_ray(s, t, rng);
        color += trace(&ray, scene, config.max_bounces, &config.sky, rng);
    }

    color_to_rgba(color / config.samples_per_pixel as f32)
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Quantize an averaged sample color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.999 * linear_to_gamma(color.x)).clamp(0.0, 255.0) as u8;
    let g = (255.999 * linear_to_gamma(color.y)).clamp(0.0, 255.0) as u8;
    let b = (255.999 * linear_to_gamma(color.z)).clamp(0.0, 255.0) as u8;
    [r, g, b, 255]
}
