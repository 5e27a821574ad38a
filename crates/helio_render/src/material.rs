//! Surface materials and their scattering rules.

use helio_math::{normalized, Ray, Vec3};
use rand::RngCore;

use crate::random::random_in_unit_sphere;
use crate::sphere::Hit;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

const CHECKER_DARK: Color = Vec3::new(0.1, 0.1, 0.1);
const CHECKER_LIGHT: Color = Vec3::new(0.9, 0.9, 0.9);
const CHECKER_SCALE: f32 = 10.0;

/// Surface material attached to a sphere.
///
/// A tagged sum type: each variant carries only the fields its scattering
/// rule actually needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Ideal diffuse surface.
    Lambertian { albedo: Color },
    /// Reflective surface; `fuzz` perturbs the reflection direction,
    /// simulating roughness (0.0 = perfect mirror).
    Metal { albedo: Color, fuzz: f32 },
    /// Diffuse surface whose albedo is a procedural 3D checker pattern.
    Checker,
    /// Emitter: contributes its albedo as radiance and never scatters.
    Light { albedo: Color },
}

impl Material {
    /// Scatter an incoming ray at a hit point.
    ///
    /// Returns the attenuation and the scattered ray, or `None` if the ray
    /// is absorbed (fuzzy reflections below the surface, emitters).
    pub fn scatter(&self, ray_in: &Ray, hit: &Hit, rng: &mut dyn RngCore) -> Option<(Color, Ray)> {
        match *self {
            Material::Lambertian { albedo } => Some((albedo, diffuse_bounce(hit, rng))),
            Material::Checker => Some((checker_albedo(hit.point), diffuse_bounce(hit, rng))),
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(normalized(ray_in.direction), hit.normal);
                let direction = reflected + fuzz * random_in_unit_sphere(rng);

                // Only scatter if the perturbed ray stays above the surface
                if direction.dot(hit.normal) > 0.0 {
                    Some((albedo, Ray::new(hit.point, direction)))
                } else {
                    None
                }
            }
            Material::Light { .. } => None,
        }
    }

    /// Radiance emitted by the surface itself. Black for non-emitters.
    pub fn emitted(&self) -> Color {
        match *self {
            Material::Light { albedo } => albedo,
            _ => Color::ZERO,
        }
    }
}

/// Diffuse bounce: the normal plus a point inside the unit sphere.
fn diffuse_bounce(hit: &Hit, rng: &mut dyn RngCore) -> Ray {
    let mut direction = hit.normal + random_in_unit_sphere(rng);

    // Catch degenerate scatter direction
    if direction.length_squared() < 1e-8 {
        direction = hit.normal;
    }

    Ray::new(hit.point, direction)
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Checker albedo from the sign pattern of the hit point's coordinates.
fn checker_albedo(p: Vec3) -> Color {
    let sines =
        (CHECKER_SCALE * p.x).sin() * (CHECKER_SCALE * p.y).sin() * (CHECKER_SCALE * p.z).sin();
    if sines < 0.0 {
        CHECKER_DARK
    } else {
        CHECKER_LIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit_at(point: Vec3, normal: Vec3, material: Material) -> Hit {
        Hit {
            t: 1.0,
            point,
            normal,
            material,
        }
    }

    #[test]
    fn test_light_emits_and_never_scatters() {
        let albedo = Color::new(0.9, 0.8, 0.2);
        let light = Material::Light { albedo };
        let hit = hit_at(Vec3::ZERO, Vec3::Y, light);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(light.scatter(&ray, &hit, &mut rng).is_none());
        assert_eq!(light.emitted(), albedo);
    }

    #[test]
    fn test_non_emitters_emit_black() {
        let lambertian = Material::Lambertian {
            albedo: Color::ONE,
        };
        assert_eq!(lambertian.emitted(), Color::ZERO);
        assert_eq!(Material::Checker.emitted(), Color::ZERO);
    }

    #[test]
    fn test_mirror_metal_reflects() {
        let metal = Material::Metal {
            albedo: Color::ONE,
            fuzz: 0.0,
        };
        let hit = hit_at(Vec3::ZERO, Vec3::Y, metal);
        let mut rng = StdRng::seed_from_u64(0);

        // 45 degree incoming ray reflects to 45 degrees outgoing
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let (attenuation, scattered) = metal.scatter(&ray, &hit, &mut rng).unwrap();

        assert_eq!(attenuation, Color::ONE);
        let dir = normalized(scattered.direction);
        assert!((dir - normalized(Vec3::new(1.0, 1.0, 0.0))).length() < 1e-5);
    }

    #[test]
    fn test_lambertian_scatters_above_surface() {
        let material = Material::Lambertian {
            albedo: Color::new(0.5, 0.5, 0.5),
        };
        let hit = hit_at(Vec3::ZERO, Vec3::Y, material);
        let mut rng = StdRng::seed_from_u64(7);

        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        for _ in 0..100 {
            let (_, scattered) = material.scatter(&ray, &hit, &mut rng).unwrap();
            // Normal plus a unit-sphere point always leans into the hemisphere
            assert!(scattered.direction.dot(hit.normal) > -1.0);
            assert_eq!(scattered.origin, hit.point);
        }
    }

    #[test]
    fn test_checker_albedo_alternates() {
        let checker = Material::Checker;
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));

        // sin(0.5)^3 > 0 at (0.05, 0.05, 0.05)
        let hit = hit_at(Vec3::splat(0.05), Vec3::Y, checker);
        let (attenuation, _) = checker.scatter(&ray, &hit, &mut rng).unwrap();
        assert_eq!(attenuation, CHECKER_LIGHT);

        // Flipping one coordinate flips the sign
        let hit = hit_at(Vec3::new(-0.05, 0.05, 0.05), Vec3::Y, checker);
        let (attenuation, _) = checker.scatter(&ray, &hit, &mut rng).unwrap();
        assert_eq!(attenuation, CHECKER_DARK);
    }
}
