//! Interval arithmetic for ray parameter ranges.
//!
//! Provides closed intervals [min, max] used to gate valid hit distances and
//! to clamp color components before quantization.

/// Closed interval [min, max] for range checking.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    /// Minimum value of the interval
    pub min: f32,
    /// Maximum value of the interval
    pub max: f32,
}

impl Interval {
    /// Create a new interval with given min and max values
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Calculate the size (width) of the interval
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Check if the interval contains the given value (inclusive bounds)
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Check if the interval surrounds the given value (exclusive bounds)
    ///
    /// Hit-distance searches use this test so a scattered ray can never
    /// re-select its own originating surface at the interval boundary.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamp the given value to be within this interval's bounds
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }
}

/// Commonly used interval constants
impl Interval {
    /// Empty interval (min > max, contains nothing)
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Universe interval (contains all real numbers)
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let interval = Interval::new(0.0, 10.0);

        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn surrounds_is_exclusive() {
        let interval = Interval::new(0.0, 10.0);

        // Endpoints are NOT surrounded
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));

        assert!(interval.surrounds(0.1));
        assert!(interval.surrounds(9.9));

        assert!(!interval.surrounds(-0.1));
        assert!(!interval.surrounds(10.1));
    }

    #[test]
    fn clamp_clips_into_range() {
        let interval = Interval::new(0.0, 0.999);

        assert_eq!(interval.clamp(-5.0), 0.0);
        assert_eq!(interval.clamp(0.5), 0.5);
        assert_eq!(interval.clamp(1.7), 0.999);
    }

    #[test]
    fn size_spans_the_bounds() {
        assert_eq!(Interval::new(2.0, 7.0).size(), 5.0);
        assert_eq!(Interval::new(-5.0, 5.0).size(), 10.0);
    }

    #[test]
    fn empty_contains_nothing() {
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(!Interval::EMPTY.surrounds(0.0));
    }

    #[test]
    fn universe_contains_everything() {
        assert!(Interval::UNIVERSE.contains(0.0));
        assert!(Interval::UNIVERSE.contains(-1e30));
        assert!(Interval::UNIVERSE.contains(1e30));
    }
}
