//! Scene model and seeded procedural generation.

use helio_math::{Interval, Ray, Vec3};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::SceneError;
use crate::material::{Color, Material};
use crate::random::{gen_f32, gen_range};
use crate::sphere::{Hit, Sphere};

/// Albedo palette for generated spheres.
const PALETTE: [Color; 5] = [
    Vec3::new(1.0, 0.42, 0.42),
    Vec3::new(0.33, 0.38, 0.44),
    Vec3::new(0.31, 0.80, 0.78),
    Vec3::new(0.78, 0.30, 0.35),
    Vec3::new(0.78, 0.96, 0.39),
];

const GROUND_CENTER: Vec3 = Vec3::new(0.0, -1000.0, 0.0);
const GROUND_RADIUS: f32 = 1000.0;
const GROUND_ALBEDO: Color = Vec3::new(0.2, 0.2, 0.2);

/// Relative material selection weights, normalized by their sum at draw time.
#[derive(Debug, Clone, Copy)]
pub struct MaterialWeights {
    pub lambertian: f32,
    pub metal: f32,
    pub checker: f32,
    pub light: f32,
}

impl Default for MaterialWeights {
    fn default() -> Self {
        Self {
            lambertian: 0.55,
            metal: 0.15,
            checker: 0.10,
            light: 0.20,
        }
    }
}

impl MaterialWeights {
    /// Draw a material kind; `albedo` and `fuzz` feed the variants that use them.
    fn pick(&self, rng: &mut dyn RngCore, albedo: Color, fuzz: f32) -> Material {
        let total = self.lambertian + self.metal + self.checker + self.light;
        let roll = gen_f32(rng) * total;

        if roll < self.lambertian {
            Material::Lambertian { albedo }
        } else if roll < self.lambertian + self.metal {
            // Metals keep a neutral bright albedo so reflections stay uncolored
            Material::Metal {
                albedo: Vec3::ONE,
                fuzz,
            }
        } else if roll < self.lambertian + self.metal + self.checker {
            Material::Checker
        } else {
            Material::Light { albedo }
        }
    }
}

/// Placement parameters for the procedural scene generator.
///
/// The historical renderer hard-coded these per variant; here they are
/// explicit with documented defaults.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Total sphere count, including the ground sphere.
    pub sphere_count: usize,
    /// Horizontal placement extent for sphere centers.
    pub x_extent: (f32, f32),
    /// Depth placement extent for sphere centers.
    pub z_extent: (f32, f32),
    /// Sphere radius range; y is derived so spheres rest on the ground.
    pub radius_range: (f32, f32),
    /// Accepted [min, max] distance from the camera position.
    pub annulus: (f32, f32),
    /// Material selection weights.
    pub weights: MaterialWeights,
    /// Total candidate draws allowed before generation fails.
    pub max_attempts: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sphere_count: 64,
            x_extent: (-2.5, 2.5),
            z_extent: (0.0, 2.5),
            radius_range: (0.05, 0.30),
            annulus: (0.0, 4.05),
            weights: MaterialWeights::default(),
            max_attempts: 100_000,
        }
    }
}

/// An immutable list of spheres. Read-only during rendering.
#[derive(Debug, Clone)]
pub struct Scene {
    spheres: Vec<Sphere>,
}

impl Scene {
    /// Create a scene from an explicit sphere list.
    pub fn new(spheres: Vec<Sphere>) -> Self {
        Self { spheres }
    }

    /// Deterministically generate a scene from a seed.
    ///
    /// The first sphere is always the oversized ground sphere; the rest are
    /// placed by rejection sampling. A candidate is rejected if it overlaps
    /// any accepted sphere or falls outside the camera-distance annulus.
    /// Every draw consumes one attempt from the budget; exhausting it fails
    /// fast instead of spinning on an over-constrained configuration.
    pub fn generate(
        config: &SceneConfig,
        camera_position: Vec3,
        seed: u64,
    ) -> Result<Scene, SceneError> {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut spheres = Vec::with_capacity(config.sphere_count);
        spheres.push(Sphere::new(
            GROUND_CENTER,
            GROUND_RADIUS,
            Material::Lambertian {
                albedo: GROUND_ALBEDO,
            },
        ));

        let mut attempts: u32 = 0;
        while spheres.len() < config.sphere_count {
            if attempts >= config.max_attempts {
                return Err(SceneError::AttemptBudgetExhausted {
                    placed: spheres.len(),
                    requested: config.sphere_count,
                    budget: config.max_attempts,
                });
            }
            attempts += 1;

            let radius = gen_range(&mut rng, config.radius_range.0, config.radius_range.1);
            let center = Vec3::new(
                gen_range(&mut rng, config.x_extent.0, config.x_extent.1),
                radius,
                gen_range(&mut rng, config.z_extent.0, config.z_extent.1),
            );
            let albedo = PALETTE[(gen_f32(&mut rng) * PALETTE.len() as f32) as usize % PALETTE.len()];
            let fuzz = gen_range(&mut rng, 0.0, 0.25);
            let material = config.weights.pick(&mut rng, albedo, fuzz);

            let candidate = Sphere::new(center, radius, material);
            if accepts(&spheres, &candidate, camera_position, config) {
                spheres.push(candidate);
            } else {
                debug!("rejected candidate at {:?} (attempt {})", center, attempts);
            }
        }

        info!(
            "generated {} spheres in {} attempts (seed {})",
            spheres.len(),
            attempts,
            seed
        );
        Ok(Scene { spheres })
    }

    /// Number of spheres in the scene.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// True if the scene holds no spheres.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// The sphere list, in insertion order (ground sphere first).
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Nearest intersection along the ray, if any.
    ///
    /// Brute-force linear scan, shrinking the upper bound to the closest
    /// accepted hit as the scan progresses.
    pub fn hit(&self, ray: &Ray, t_range: Interval) -> Option<Hit> {
        let mut closest_so_far = t_range.max;
        let mut nearest = None;

        for sphere in &self.spheres {
            if let Some(hit) = sphere.hit(ray, Interval::new(t_range.min, closest_so_far)) {
                closest_so_far = hit.t;
                nearest = Some(hit);
            }
        }

        nearest
    }
}

/// Placement constraints: no overlap with accepted spheres, and the center
/// must sit inside the camera-distance annulus.
fn accepts(spheres: &[Sphere], candidate: &Sphere, camera_position: Vec3, config: &SceneConfig) -> bool {
    let camera_distance = (candidate.center - camera_position).length();
    if camera_distance < config.annulus.0 || camera_distance > config.annulus.1 {
        return false;
    }

    spheres
        .iter()
        .all(|s| (candidate.center - s.center).length() >= candidate.radius + s.radius)
}
