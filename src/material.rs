//! Material system for path tracing.
//!
//! Implements three material kinds as a closed enum: Lambertian (diffuse),
//! Metal (specular), and Dielectric (transparent). The variant set is fixed,
//! so scattering dispatches with a plain `match` instead of a vtable.

use glam::Vec3A;
use rand::RngCore;

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Material kinds for path tracing.
///
/// A material answers one question: given an incoming ray and a hit record,
/// does the ray scatter, and if so with what attenuation and direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Color,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Surface roughness (0.0 = mirror, 1.0 = rough).
        fuzz: f32,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, etc.).
        refraction_index: f32,
    },
}

impl Material {
    /// Create a Lambertian material with the given albedo.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a Metal material.
    ///
    /// The fuzz factor is clamped into [0, 1] here, at construction.
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Create a Dielectric material with the given index of refraction.
    pub fn dielectric(refraction_index: f32) -> Self {
        Material::Dielectric { refraction_index }
    }

    /// Compute ray scattering for this material.
    ///
    /// Returns the attenuation color and the scattered ray, or `None` if the
    /// ray is absorbed.
    pub fn scatter(
        &self,
        r_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        match *self {
            Material::Lambertian { albedo } => scatter_lambertian(albedo, rec, rng),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, r_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                scatter_dielectric(refraction_index, r_in, rec)
            }
        }
    }
}

/// Lambertian diffuse scattering: offset the normal by a random unit vector.
fn scatter_lambertian(
    albedo: Color,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> Option<(Color, Ray)> {
    let mut scatter_direction = rec.normal + random::random_unit_vector(rng);

    // Catch the degenerate case where the random vector cancels the normal
    if random::near_zero(scatter_direction) {
        scatter_direction = rec.normal;
    }

    Some((albedo, Ray::new(rec.p, scatter_direction)))
}

/// Metallic reflection with optional surface roughness.
///
/// Fuzzed reflections that end up below the surface count as absorbed.
fn scatter_metal(
    albedo: Color,
    fuzz: f32,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> Option<(Color, Ray)> {
    let reflected = reflect(r_in.direction, rec.normal);
    let direction = reflected.normalize() + fuzz * random::random_unit_vector(rng);

    if direction.dot(rec.normal) > 0.0 {
        Some((albedo, Ray::new(rec.p, direction)))
    } else {
        None
    }
}

/// Dielectric scattering: refract when Snell's law allows it, reflect when
/// total internal reflection forces it. Glass absorbs nothing.
fn scatter_dielectric(refraction_index: f32, r_in: &Ray, rec: &HitRecord) -> Option<(Color, Ray)> {
    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = ri * sin_theta > 1.0;

    let direction = if cannot_refract {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, ri)
    };

    Some((Vec3A::ONE, Ray::new(rec.p, direction)))
}

/// Reflect a vector off a surface using the law of reflection.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through an interface using Snell's law.
fn refract(uv: Vec3A, n: Vec3A, etai_over_etat: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
