//! Random sampling for path tracing.
//!
//! Every helper takes an explicit `&mut dyn RngCore` handle instead of
//! touching global state, so a render driven by a seeded `ChaCha20Rng` is
//! fully deterministic and a future parallel loop can hand each worker its
//! own stream.

use glam::Vec3A;
use rand::{Rng, RngCore};

/// Smallest accepted squared length when rejection-sampling unit vectors.
///
/// Guards against `f32` underflow: anything shorter would normalize into
/// garbage. The threshold carries no physical meaning.
const MIN_UNIT_SAMPLE_LEN_SQ: f32 = 1e-18;

/// Generate a random f32 in [0.0, 1.0)
pub fn random_f32(rng: &mut dyn RngCore) -> f32 {
    rng.random()
}

/// Generate a random f32 in [min, max)
pub fn random_f32_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32(rng)
}

/// Generate a random vector inside the axis-aligned cube [min, max)³.
pub fn random_vec3a_range(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3A {
    Vec3A::new(
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
    )
}

/// Generate a random unit vector uniformly distributed on the unit sphere.
///
/// Rejection sampling: draw from the [-1, 1]³ cube and keep the first point
/// whose squared length lies in (MIN_UNIT_SAMPLE_LEN_SQ, 1], then normalize.
/// Restricting to the unit ball is what makes the directions uniform.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3A {
    loop {
        let p = random_vec3a_range(rng, -1.0, 1.0);
        let len_sq = p.length_squared();
        if len_sq > MIN_UNIT_SAMPLE_LEN_SQ && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Generate a random unit vector on the hemisphere around the given normal.
pub fn random_on_hemisphere(rng: &mut dyn RngCore, normal: Vec3A) -> Vec3A {
    let on_unit_sphere = random_unit_vector(rng);
    if on_unit_sphere.dot(normal) > 0.0 {
        // Already in the same hemisphere as the normal
        on_unit_sphere
    } else {
        -on_unit_sphere
    }
}

/// Generate a random RGB color with components in [0.0, 1.0).
pub fn random_color(rng: &mut dyn RngCore) -> Vec3A {
    Vec3A::new(random_f32(rng), random_f32(rng), random_f32(rng))
}

/// Generate a random RGB color with components in [min, max).
pub fn random_color_range(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3A {
    random_vec3a_range(rng, min, max)
}

/// Test whether a vector is close to zero in every component.
///
/// Catches the degenerate cancellation case where a scatter direction sums
/// to (almost) nothing; the threshold matches the one the scattering code
/// relies on (1e-8 per component).
pub fn near_zero(v: Vec3A) -> bool {
    const EPS: f32 = 1e-8;
    v.x.abs() < EPS && v.y.abs() < EPS && v.z.abs() < EPS
}
