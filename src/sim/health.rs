//! Bounded health counter

/// Health clamped to `0..=max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    pub fn new(start: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: start.clamp(0, max),
            max,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Add `amount` (negative for damage). Returns true when health hits zero.
    pub fn apply_delta(&mut self, amount: i32) -> bool {
        self.current = self.current.saturating_add(amount).clamp(0, self.max);
        self.current == 0
    }

    /// Set health outright. Always true once clamped; call sites read it as
    /// "still valid".
    pub fn set(&mut self, amount: i32) -> bool {
        self.current = amount.clamp(0, self.max);
        self.current >= 0
    }

    /// Fill fraction for the health bar
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_damage_to_zero_reports_death() {
        let mut health = Health::new(20, 100);
        assert!(!health.apply_delta(-10));
        assert_eq!(health.current(), 10);
        assert!(health.apply_delta(-10));
        assert_eq!(health.current(), 0);
    }

    #[test]
    fn test_overkill_clamps_at_zero() {
        let mut health = Health::new(5, 100);
        assert!(health.apply_delta(-50));
        assert_eq!(health.current(), 0);
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut health = Health::new(95, 100);
        assert!(!health.apply_delta(30));
        assert_eq!(health.current(), 100);
        assert_eq!(health.fraction(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_apply_delta_clamps(max in 0i32..1000, start in 0i32..1000, d in -2000i32..2000) {
            let start = start.min(max);
            let mut health = Health::new(start, max);
            let dead = health.apply_delta(d);
            let expected = (start + d).clamp(0, max);
            prop_assert_eq!(health.current(), expected);
            prop_assert_eq!(dead, expected == 0);
        }

        #[test]
        fn prop_set_clamps(max in 0i32..1000, a in i32::MIN..i32::MAX) {
            let mut health = Health::new(max, max);
            prop_assert!(health.set(a));
            prop_assert_eq!(health.current(), a.clamp(0, max));
        }
    }
}
