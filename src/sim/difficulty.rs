//! Difficulty ramp
//!
//! Speed multiplier and spawn rate climb a fixed amount per Playing tick
//! and stop exactly at their caps. Only a new run lowers them.

use crate::tuning::Tuning;

/// Next speed multiplier, clamped to the cap
#[inline]
pub fn next_speed(current: f32, tuning: &Tuning) -> f32 {
    (current + tuning.speed_increase).min(tuning.max_speed_multiplier)
}

/// Next spawn rate, clamped to the cap
#[inline]
pub fn next_spawn_rate(current: f32, tuning: &Tuning) -> f32 {
    (current + tuning.spawn_rate_increase).min(tuning.max_spawn_rate)
}

/// Advance both curves one tick. Values already past a cap are left alone
/// so the curves never decrease.
pub fn ramp(speed_multiplier: &mut f32, spawn_rate: &mut f32, tuning: &Tuning) {
    *speed_multiplier = speed_multiplier.max(next_speed(*speed_multiplier, tuning));
    *spawn_rate = spawn_rate.max(next_spawn_rate(*spawn_rate, tuning));
}

/// Fraction of the speed range covered, 0..1 (for the speed meter)
pub fn speed_progress(speed_multiplier: f32, tuning: &Tuning) -> f32 {
    let span = tuning.max_speed_multiplier - 1.0;
    if span <= 0.0 {
        return 1.0;
    }
    ((speed_multiplier - 1.0) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_speed_hits_cap_exactly() {
        let t = Tuning::default();
        let mut speed = 2.4999;
        let mut rate = t.spawn_rate;
        for _ in 0..1000 {
            ramp(&mut speed, &mut rate, &t);
            assert!(speed <= t.max_speed_multiplier);
        }
        assert_eq!(speed, 2.5);
    }

    #[test]
    fn test_spawn_rate_hits_cap_exactly() {
        let t = Tuning::default();
        let mut speed = 1.0;
        let mut rate = t.spawn_rate;
        // Speed needs 1.5 / 0.0001 = 15000 ticks, rate 4000; plus slack
        for _ in 0..20_000 {
            ramp(&mut speed, &mut rate, &t);
        }
        assert_eq!(rate, t.max_spawn_rate);
        assert_eq!(speed, t.max_speed_multiplier);
    }

    #[test]
    fn test_speed_progress() {
        let t = Tuning::default();
        assert_eq!(speed_progress(1.0, &t), 0.0);
        assert_eq!(speed_progress(2.5, &t), 1.0);
        assert!((speed_progress(1.75, &t) - 0.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_ramp_monotonic_and_capped(start in 1.0f32..3.0, rate0 in 0.0f32..0.05, ticks in 0usize..500) {
            let t = Tuning::default();
            let mut speed = start.min(t.max_speed_multiplier);
            let mut rate = rate0.min(t.max_spawn_rate);
            for _ in 0..ticks {
                let (s0, r0) = (speed, rate);
                ramp(&mut speed, &mut rate, &t);
                prop_assert!(speed >= s0);
                prop_assert!(rate >= r0);
                prop_assert!(speed <= t.max_speed_multiplier);
                prop_assert!(rate <= t.max_spawn_rate);
            }
        }
    }
}
