//! Procedural obstacle spawning
//!
//! One attempt per Playing tick. The random draws are taken up front as a
//! [`SpawnRolls`] so the decision itself is a pure function.

use rand::Rng;

use super::state::{Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Relative weights of the obstacle kinds (car, barrier, oil)
pub const KIND_WEIGHTS: [u32; 3] = [3, 1, 1];

/// Random draws for a single spawn attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRolls {
    /// Uniform in [0, 1); attempt proceeds if below the spawn rate
    pub chance: f32,
    pub lane: usize,
    /// Uniform in [0, sum of KIND_WEIGHTS)
    pub kind: u32,
}

impl SpawnRolls {
    pub fn draw<R: Rng>(rng: &mut R, lane_count: usize) -> Self {
        Self {
            chance: rng.random::<f32>(),
            lane: rng.random_range(0..lane_count.max(1)),
            kind: rng.random_range(0..KIND_WEIGHTS.iter().sum::<u32>()),
        }
    }
}

/// Why an attempt produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSkip {
    /// Chance roll at or above the spawn rate
    NoRoll,
    /// Lane still has an obstacle near the top
    LaneBlocked,
}

/// Map a weighted roll onto a kind
pub fn kind_for_roll(roll: u32, lane: usize) -> ObstacleKind {
    let mut acc = 0;
    for (i, w) in KIND_WEIGHTS.iter().enumerate() {
        acc += w;
        if roll < acc {
            return match i {
                0 => ObstacleKind::car_for_lane(lane),
                1 => ObstacleKind::Barrier,
                _ => ObstacleKind::Oil,
            };
        }
    }
    ObstacleKind::Oil
}

/// True if some obstacle in `lane` is still within the guard distance of the top
pub fn lane_blocked(obstacles: &[Obstacle], lane: usize, guard: f32) -> bool {
    obstacles.iter().any(|o| o.lane == lane && o.y < guard)
}

/// Decide one spawn attempt. Does not mutate anything.
pub fn attempt(
    rolls: SpawnRolls,
    spawn_rate: f32,
    speed_multiplier: f32,
    obstacles: &[Obstacle],
    tuning: &Tuning,
) -> Result<Obstacle, SpawnSkip> {
    if rolls.chance >= spawn_rate {
        return Err(SpawnSkip::NoRoll);
    }
    let lane = rolls.lane.min(tuning.lane_count.saturating_sub(1));
    if lane_blocked(obstacles, lane, tuning.spawn_guard_distance) {
        return Err(SpawnSkip::LaneBlocked);
    }
    let kind = kind_for_roll(rolls.kind, lane);
    Ok(Obstacle::new(kind, lane, speed_multiplier, tuning))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rolls(chance: f32, lane: usize) -> SpawnRolls {
        SpawnRolls {
            chance,
            lane,
            kind: 0,
        }
    }

    #[test]
    fn test_low_roll_spawns_high_roll_does_not() {
        let t = Tuning::default();
        assert!(attempt(rolls(0.01, 0), 0.02, 1.0, &[], &t).is_ok());
        assert_eq!(
            attempt(rolls(0.5, 0), 0.02, 1.0, &[], &t),
            Err(SpawnSkip::NoRoll)
        );
    }

    #[test]
    fn test_spawn_captures_speed_multiplier() {
        let t = Tuning::default();
        let o = attempt(rolls(0.0, 2), 0.02, 1.5, &[], &t).unwrap();
        assert_eq!(o.lane, 2);
        assert_eq!(o.speed, t.obstacle_speed * 1.5);
        assert_eq!(o.y, -o.height);
    }

    #[test]
    fn test_lane_fairness_guard() {
        let t = Tuning::default();
        let mut existing = Obstacle::new(ObstacleKind::Barrier, 1, 1.0, &t);
        existing.y = 50.0;
        let blocked = attempt(rolls(0.0, 1), 0.02, 1.0, std::slice::from_ref(&existing), &t);
        assert_eq!(blocked, Err(SpawnSkip::LaneBlocked));

        // A different lane is unaffected
        assert!(attempt(rolls(0.0, 0), 0.02, 1.0, std::slice::from_ref(&existing), &t).is_ok());

        // Once it has moved past the guard distance the lane reopens
        existing.y = t.spawn_guard_distance;
        assert!(attempt(rolls(0.0, 1), 0.02, 1.0, &[existing], &t).is_ok());
    }

    #[test]
    fn test_kind_weights() {
        assert!(matches!(kind_for_roll(0, 0), ObstacleKind::Car { .. }));
        assert!(matches!(kind_for_roll(2, 0), ObstacleKind::Car { .. }));
        assert_eq!(kind_for_roll(3, 0), ObstacleKind::Barrier);
        assert_eq!(kind_for_roll(4, 0), ObstacleKind::Oil);
    }

    #[test]
    fn test_drawn_rolls_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let total: u32 = KIND_WEIGHTS.iter().sum();
        for _ in 0..1000 {
            let r = SpawnRolls::draw(&mut rng, 3);
            assert!((0.0..1.0).contains(&r.chance));
            assert!(r.lane < 3);
            assert!(r.kind < total);
        }
    }
}
