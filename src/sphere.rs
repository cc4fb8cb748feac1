//! Sphere primitive.

use std::sync::Arc;

use glam::Vec3A;

use crate::hittable::HitRecord;
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// A sphere defined by center point and radius
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere
    pub center: Vec3A,
    /// Radius of the sphere, clamped to be non-negative
    pub radius: f32,
    /// Material of the sphere surface
    pub material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere. A negative radius is clamped to zero.
    pub fn new(center: Vec3A, radius: f32, material: Arc<Material>) -> Self {
        Sphere {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Intersect `r` with the sphere.
    ///
    /// Solves the intersection quadratic in its half-b form and reports the
    /// smallest root strictly inside `ray_t`, trying the near surface before
    /// falling back to the far one.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - r.origin;
        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Prefer the nearest root in range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = r.at(root);
        let mut rec = HitRecord {
            p,
            normal: Vec3A::ZERO,
            t: root,
            front_face: false,
            material: Arc::clone(&self.material),
        };
        rec.set_face_normal(r, (p - self.center) / self.radius);
        Some(rec)
    }
}
