//! Camera model: image-plane ray generation with lens defocus.

use helio_math::{normalized, Ray, Vec3};
use rand::RngCore;

use crate::random::random_in_unit_disk;

/// User-facing camera parameters.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub look_at: Vec3,
    /// Camera-relative "up" direction
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub vfov_degrees: f32,
    /// Image aspect ratio (width / height)
    pub aspect: f32,
    /// Lens aperture diameter (0 disables defocus blur)
    pub aperture: f32,
    /// Distance to the plane of perfect focus
    pub focus_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let position = Vec3::new(0.0, 0.7, -1.45);
        let look_at = Vec3::new(0.0, 0.47, 0.0);
        Self {
            position,
            look_at,
            up: Vec3::Y,
            vfov_degrees: 50.0,
            aspect: 2.0,
            aperture: 0.05,
            focus_distance: (position - look_at).length(),
        }
    }
}

/// Precomputed camera basis. Immutable during rendering.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Derive the orthonormal basis and image-plane frame from the config.
    pub fn new(config: &CameraConfig) -> Self {
        let theta = config.vfov_degrees.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = config.aspect * half_height;

        let w = normalized(config.position - config.look_at);
        let u = normalized(config.up.cross(w));
        let v = w.cross(u);

        let focus = config.focus_distance;
        let lower_left = config.position - focus * (half_width * u + half_height * v + w);

        Self {
            origin: config.position,
            lower_left,
            horizontal: 2.0 * focus * half_width * u,
            vertical: 2.0 * focus * half_height * v,
            u,
            v,
            lens_radius: config.aperture / 2.0,
        }
    }

    /// Ray through normalized image-plane coordinates (s, t) in [0, 1]^2.
    ///
    /// The origin is jittered on the lens disk for depth of field; the
    /// direction passes through the matching point on the focal plane.
    /// This jitter is the only stochastic origin variance per sample.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let lens = self.lens_radius * random_in_unit_disk(rng);
        let origin = self.origin + self.u * lens.x + self.v * lens.y;
        let direction = self.lower_left + s * self.horizontal + t * self.vertical - origin;

        Ray::new(origin, direction)
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.origin
    }
}
