//! Stat - a single modifiable numeric attribute

use serde::{Deserialize, Serialize};

/// Lower clamp for every stat multiplier
pub const MIN_STAT_MULTIPLIER: f64 = 0.5;
/// Upper clamp for every stat multiplier
pub const MAX_STAT_MULTIPLIER: f64 = 10.0;

/// A numeric attribute (attack, defence, speed) with a fixed standard value
/// and a clamped multiplier.
///
/// The effective value is `clamp(floor(standard * multiplier), min, max)`,
/// recomputed on every read rather than cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    standard_value: i32,
    multiplier: f64,
    min_value: i32,
    max_value: i32,
}

impl Stat {
    /// Create a stat at its standard value (multiplier 1.0). Swapped bounds
    /// are normalized so `min <= max` always holds.
    pub fn new(standard_value: i32, min_value: i32, max_value: i32) -> Self {
        let (min_value, max_value) = if min_value <= max_value {
            (min_value, max_value)
        } else {
            (max_value, min_value)
        };
        Stat {
            standard_value,
            multiplier: 1.0,
            min_value,
            max_value,
        }
    }

    /// Effective value: `clamp(floor(standard * multiplier), min, max)`.
    pub fn current_value(&self) -> i32 {
        let scaled = (self.standard_value as f64 * self.multiplier).floor() as i32;
        scaled.clamp(self.min_value, self.max_value)
    }

    /// Replace the multiplier, clamped to the allowed range.
    pub fn set_multiplier(&mut self, multiplier: f64) {
        self.multiplier = multiplier.clamp(MIN_STAT_MULTIPLIER, MAX_STAT_MULTIPLIER);
    }

    /// Multiply the current multiplier by `factor` (then clamp). This is how
    /// temporary and permanent modifications stack multiplicatively.
    pub fn scale_multiplier(&mut self, factor: f64) {
        self.set_multiplier(self.multiplier * factor);
    }

    /// Set the multiplier back to exactly 1.0, discarding every stacked
    /// modification. Only used by full resets.
    pub fn reset(&mut self) {
        self.multiplier = 1.0;
    }

    pub fn standard_value(&self) -> i32 {
        self.standard_value
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn min_value(&self) -> i32 {
        self.min_value
    }

    pub fn max_value(&self) -> i32 {
        self.max_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_current_value_floors() {
        let mut stat = Stat::new(10, 0, 100);
        stat.set_multiplier(1.25);
        // floor(10 * 1.25) = 12
        assert_eq!(stat.current_value(), 12);

        stat.set_multiplier(0.59);
        // floor(10 * 0.59) = 5
        assert_eq!(stat.current_value(), 5);
    }

    #[test]
    fn test_multiplier_clamped() {
        let mut stat = Stat::new(10, 0, 1000);
        stat.set_multiplier(100.0);
        assert!((stat.multiplier() - MAX_STAT_MULTIPLIER).abs() < f64::EPSILON);

        stat.set_multiplier(0.0);
        assert!((stat.multiplier() - MIN_STAT_MULTIPLIER).abs() < f64::EPSILON);
    }

    #[test]
    fn test_value_respects_bounds() {
        let mut stat = Stat::new(10, 2, 50);
        stat.set_multiplier(10.0);
        assert_eq!(stat.current_value(), 50);

        stat.set_multiplier(0.5);
        // floor(10 * 0.5) = 5, above the minimum
        assert_eq!(stat.current_value(), 5);

        let mut low = Stat::new(2, 3, 50);
        low.set_multiplier(0.5);
        // floor(2 * 0.5) = 1, pulled up to the minimum
        assert_eq!(low.current_value(), 3);
    }

    #[test]
    fn test_swapped_bounds_normalized() {
        let stat = Stat::new(10, 50, 2);
        assert_eq!(stat.min_value(), 2);
        assert_eq!(stat.max_value(), 50);
        assert_eq!(stat.current_value(), 10);
    }

    #[test]
    fn test_reset() {
        let mut stat = Stat::new(10, 0, 100);
        stat.set_multiplier(3.0);
        stat.scale_multiplier(2.0);
        stat.reset();
        assert!((stat.multiplier() - 1.0).abs() < f64::EPSILON);
        assert_eq!(stat.current_value(), 10);
    }

    #[test]
    fn test_scale_stacks_multiplicatively() {
        let mut stat = Stat::new(10, 0, 1000);
        stat.scale_multiplier(2.0);
        stat.scale_multiplier(3.0);
        assert!((stat.multiplier() - 6.0).abs() < f64::EPSILON);
        assert_eq!(stat.current_value(), 60);
    }

    proptest! {
        #[test]
        fn prop_current_value_always_within_bounds(
            standard in -1000i32..1000,
            min in -500i32..500,
            max in -500i32..500,
            multiplier in -100.0f64..100.0,
        ) {
            let mut stat = Stat::new(standard, min, max);
            stat.set_multiplier(multiplier);
            let value = stat.current_value();
            prop_assert!(value >= stat.min_value());
            prop_assert!(value <= stat.max_value());
        }

        #[test]
        fn prop_multiplier_always_within_range(multiplier in -100.0f64..100.0) {
            let mut stat = Stat::new(10, 0, 100);
            stat.set_multiplier(multiplier);
            prop_assert!(stat.multiplier() >= MIN_STAT_MULTIPLIER);
            prop_assert!(stat.multiplier() <= MAX_STAT_MULTIPLIER);
        }
    }
}
