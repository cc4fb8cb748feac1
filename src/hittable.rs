//! Ray-object intersection records and the scene aggregate.

use std::sync::Arc;

use glam::Vec3A;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::sphere::Sphere;

/// Stores information about a ray-object intersection
#[derive(Debug, Clone)]
pub struct HitRecord {
    /// Intersection point in world space
    pub p: Vec3A,
    /// Surface normal at the hit, always opposing the incoming ray
    pub normal: Vec3A,
    /// Ray parameter of the hit
    pub t: f32,
    /// Whether the ray struck the surface from outside
    pub front_face: bool,
    /// Surface material at the hit, shared with the scene
    pub material: Arc<Material>,
}

impl HitRecord {
    /// Orient the stored normal so it opposes the incoming ray.
    ///
    /// `outward_normal` must have unit length. The hit counts as front-face
    /// when the ray arrives from outside the surface.
    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: Vec3A) {
        self.front_face = r.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Any geometry a ray can intersect.
///
/// The set of shapes is closed, so intersection dispatches with a `match`
/// rather than through a vtable.
#[derive(Debug, Clone)]
pub enum Hittable {
    /// A single sphere
    Sphere(Sphere),
    /// A collection of objects searched for the closest hit
    List(HittableList),
}

impl Hittable {
    /// Intersect `r` with this geometry.
    ///
    /// Returns the record of the closest hit whose parameter lies strictly
    /// inside `ray_t`, or `None` when the geometry is missed entirely.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Hittable::Sphere(sphere) => sphere.hit(r, ray_t),
            Hittable::List(list) => list.hit(r, ray_t),
        }
    }
}

impl From<Sphere> for Hittable {
    fn from(sphere: Sphere) -> Self {
        Hittable::Sphere(sphere)
    }
}

impl From<HittableList> for Hittable {
    fn from(list: HittableList) -> Self {
        Hittable::List(list)
    }
}

/// A list of hittable objects
#[derive(Debug, Clone, Default)]
pub struct HittableList {
    /// The objects in the list
    pub objects: Vec<Hittable>,
}

impl HittableList {
    /// Create an empty list
    pub fn new() -> Self {
        HittableList {
            objects: Vec::new(),
        }
    }

    /// Remove all objects from the list
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Add an object to the list
    pub fn add(&mut self, object: impl Into<Hittable>) {
        self.objects.push(object.into());
    }

    /// Find the closest hit among all members of the list.
    ///
    /// The search interval's upper bound shrinks to each accepted hit, so a
    /// later object only produces a record when it is strictly closer.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(r, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray() -> Arc<Material> {
        Arc::new(Material::lambertian(Vec3A::splat(0.5)))
    }

    fn sphere_at(z: f32) -> Sphere {
        Sphere::new(Vec3A::new(0.0, 0.0, z), 0.5, gray())
    }

    #[test]
    fn closest_hit_wins_regardless_of_insertion_order() {
        let r = Ray::new(Vec3A::ZERO, Vec3A::NEG_Z);

        for order in [[-1.0, -3.0], [-3.0, -1.0]] {
            let mut world = HittableList::new();
            for z in order {
                world.add(sphere_at(z));
            }

            let rec = world.hit(&r, Interval::new(0.001, f32::INFINITY)).unwrap();
            assert_eq!(rec.t, 0.5);
        }
    }

    #[test]
    fn a_hit_from_inside_flips_the_normal() {
        let world = Hittable::Sphere(sphere_at(0.0));
        let r = Ray::new(Vec3A::ZERO, Vec3A::NEG_Z);

        let rec = world.hit(&r, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3A::Z);
    }

    #[test]
    fn missing_every_object_returns_none() {
        let mut world = HittableList::new();
        world.add(sphere_at(-2.0));

        let r = Ray::new(Vec3A::ZERO, Vec3A::Y);
        assert!(world.hit(&r, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn cleared_lists_no_longer_hit() {
        let mut world = HittableList::new();
        world.add(sphere_at(-1.0));
        world.clear();

        let r = Ray::new(Vec3A::ZERO, Vec3A::NEG_Z);
        assert!(world.hit(&r, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn nested_lists_are_searched_recursively() {
        let mut inner = HittableList::new();
        inner.add(sphere_at(-1.0));

        let mut outer = HittableList::new();
        outer.add(inner);

        let r = Ray::new(Vec3A::ZERO, Vec3A::NEG_Z);
        assert!(outer.hit(&r, Interval::new(0.001, f32::INFINITY)).is_some());
    }

    #[test]
    fn set_face_normal_tracks_the_ray_side() {
        let mut rec = HitRecord {
            p: Vec3A::ZERO,
            normal: Vec3A::ZERO,
            t: 1.0,
            front_face: false,
            material: gray(),
        };
        let r = Ray::new(Vec3A::new(0.0, 2.0, 0.0), Vec3A::NEG_Y);

        rec.set_face_normal(&r, Vec3A::Y);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3A::Y);

        rec.set_face_normal(&r, Vec3A::NEG_Y);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3A::Y);
    }
}
