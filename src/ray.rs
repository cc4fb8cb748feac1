//! Ray representation for path tracing.
//!
//! A ray is the half-line r(t) = origin + t * direction; every intersection
//! query and every bounce in the renderer is phrased in terms of one.

use glam::Vec3A;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The camera center for primary rays, or a surface hit point for
    /// scattered rays.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized; intersection code works with the
    /// squared length directly, and scatter directions are used as produced.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Compute the point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_walks_along_the_direction() {
        let r = Ray::new(Vec3A::new(1.0, 2.0, 3.0), Vec3A::new(0.0, 0.0, -1.0));

        assert_eq!(r.at(0.0), Vec3A::new(1.0, 2.0, 3.0));
        assert_eq!(r.at(2.5), Vec3A::new(1.0, 2.0, 0.5));
        // Negative parameters walk backwards; nothing clamps them here.
        assert_eq!(r.at(-1.0), Vec3A::new(1.0, 2.0, 4.0));
    }

    #[test]
    fn direction_is_not_normalized_by_construction() {
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 3.0, 4.0));
        assert_eq!(r.direction.length(), 5.0);
        assert_eq!(r.at(1.0), Vec3A::new(0.0, 3.0, 4.0));
    }
}
