//! Sphere primitive and analytic ray intersection.

use helio_math::{Interval, Ray, Vec3};

use crate::material::Material;

/// Record of a ray-sphere intersection. Transient; produced per query.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Ray parameter at the intersection
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Outward surface normal at the intersection
    pub normal: Vec3,
    /// Material of the sphere that was hit
    pub material: Material,
}

/// A sphere in the scene. Immutable after scene setup.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Analytic ray-sphere intersection over the open interval `t_range`.
    ///
    /// Uses the half-b form of the quadratic: with `oc = origin - center`,
    /// `a = dir.dir`, `b = oc.dir`, `c = oc.oc - r^2`, the discriminant is
    /// `b^2 - a*c` and the roots are `(-b -+ sqrt(disc)) / a`.
    pub fn hit(&self, ray: &Ray, t_range: Interval) -> Option<Hit> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Nearest root first
        let mut root = (-b - sqrtd) / a;
        if !t_range.surrounds(root) {
            root = (-b + sqrtd) / a;
            if !t_range.surrounds(root) {
                return None;
            }
        }

        let point = ray.at(root);
        Some(Hit {
            t: root,
            point,
            normal: (point - self.center) / self.radius,
            material: self.material,
        })
    }
}
