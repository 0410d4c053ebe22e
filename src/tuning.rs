//! Data-driven game balance
//!
//! Every constant the simulation reads lives here so a JSON file can
//! rebalance the game without a rebuild. Missing keys fall back to the
//! shipped defaults.

use serde::{Deserialize, Serialize};

/// Largest crash burst a tuning file may ask for
pub const MAX_BURST_COUNT: usize = 512;

/// Balance and geometry constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Track ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub lane_count: usize,
    pub lane_width: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Gap between the car's bottom edge and the canvas bottom
    pub player_bottom_margin: f32,
    /// Horizontal step per tick while changing lanes
    pub player_step: f32,
    /// Initial vertical velocity of a jump (negative = up)
    pub jump_power: f32,
    pub gravity: f32,
    /// Height above baseline at which obstacles are cleared
    pub jump_clearance: f32,

    // === Obstacles ===
    pub obstacle_speed: f32,
    pub spawn_rate: f32,
    pub max_spawn_rate: f32,
    pub spawn_rate_increase: f32,
    /// No spawn in a lane while another obstacle there is above this y
    pub spawn_guard_distance: f32,

    // === Difficulty ===
    pub speed_increase: f32,
    pub max_speed_multiplier: f32,

    // === Scoring ===
    pub pass_award: f64,
    /// Per-tick survival award, scaled by the speed multiplier
    pub survival_rate: f64,

    // === Particles ===
    pub burst_count: usize,
    pub particle_life: u32,
    pub particle_speed: f32,
    pub particle_min_size: f32,
    pub particle_max_size: f32,
    /// Upper bound of the warm hue band (degrees)
    pub particle_max_hue: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: 600.0,
            canvas_height: 600.0,
            lane_count: 3,
            lane_width: 150.0,

            player_width: 40.0,
            player_height: 60.0,
            player_bottom_margin: 40.0,
            player_step: 10.0,
            jump_power: -15.0,
            gravity: 0.8,
            jump_clearance: 50.0,

            obstacle_speed: 6.5,
            spawn_rate: 0.02,
            max_spawn_rate: 0.04,
            spawn_rate_increase: 0.000_005,
            spawn_guard_distance: 100.0,

            speed_increase: 0.0001,
            max_speed_multiplier: 2.5,

            pass_award: 1.0,
            survival_rate: 0.1,

            burst_count: 20,
            particle_life: 30,
            particle_speed: 2.0,
            particle_min_size: 2.0,
            particle_max_size: 8.0,
            particle_max_hue: 60.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, keeping defaults for absent keys
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Replace values that would break the simulation with defaults
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };

        self.canvas_width = positive(self.canvas_width, d.canvas_width);
        self.canvas_height = positive(self.canvas_height, d.canvas_height);
        if self.lane_count == 0 {
            self.lane_count = d.lane_count;
        }
        self.lane_width = positive(self.lane_width, d.lane_width);
        self.player_width = positive(self.player_width, d.player_width);
        self.player_height = positive(self.player_height, d.player_height);
        self.player_step = positive(self.player_step, d.player_step);
        self.gravity = positive(self.gravity, d.gravity);
        if !(self.jump_power.is_finite() && self.jump_power < 0.0) {
            self.jump_power = d.jump_power;
        }
        self.obstacle_speed = positive(self.obstacle_speed, d.obstacle_speed);

        if !(self.spawn_rate.is_finite() && (0.0..=1.0).contains(&self.spawn_rate)) {
            self.spawn_rate = d.spawn_rate;
        }
        if !self.max_spawn_rate.is_finite() || self.max_spawn_rate < self.spawn_rate {
            self.max_spawn_rate = self.spawn_rate.max(d.max_spawn_rate.min(1.0));
        }
        if !self.max_speed_multiplier.is_finite() || self.max_speed_multiplier < 1.0 {
            self.max_speed_multiplier = d.max_speed_multiplier;
        }
        if !(self.speed_increase.is_finite() && self.speed_increase >= 0.0) {
            self.speed_increase = d.speed_increase;
        }
        if !(self.spawn_rate_increase.is_finite() && self.spawn_rate_increase >= 0.0) {
            self.spawn_rate_increase = d.spawn_rate_increase;
        }
        self.jump_clearance = positive(self.jump_clearance, d.jump_clearance);

        // Awards only ever add to the score
        if !(self.pass_award.is_finite() && self.pass_award >= 0.0) {
            self.pass_award = d.pass_award;
        }
        if !(self.survival_rate.is_finite() && self.survival_rate >= 0.0) {
            self.survival_rate = d.survival_rate;
        }

        if !(1..=MAX_BURST_COUNT).contains(&self.burst_count) {
            self.burst_count = d.burst_count;
        }
        self.particle_speed = positive(self.particle_speed, d.particle_speed);
        self.particle_min_size = positive(self.particle_min_size, d.particle_min_size);
        self.particle_max_size = positive(self.particle_max_size, d.particle_max_size);
        if self.particle_max_size < self.particle_min_size {
            self.particle_min_size = d.particle_min_size;
            self.particle_max_size = d.particle_max_size;
        }
        if !(self.particle_max_hue.is_finite() && self.particle_max_hue >= 0.0) {
            self.particle_max_hue = d.particle_max_hue;
        }
        self
    }

    /// Left edge of the paved road
    #[inline]
    pub fn road_left(&self) -> f32 {
        (self.canvas_width - self.road_width()) / 2.0
    }

    #[inline]
    pub fn road_width(&self) -> f32 {
        self.lane_count as f32 * self.lane_width
    }

    /// X coordinate that centers an entity of `width` in `lane`
    pub fn lane_x(&self, lane: usize, width: f32) -> f32 {
        self.road_left() + lane as f32 * self.lane_width + (self.lane_width - width) / 2.0
    }

    /// Lane the player starts in and returns to on restart
    #[inline]
    pub fn center_lane(&self) -> usize {
        self.lane_count / 2
    }

    /// Resting y coordinate of the player's top edge
    #[inline]
    pub fn player_baseline(&self) -> f32 {
        self.canvas_height - self.player_height - self.player_bottom_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let t = Tuning::default();
        assert_eq!(t.road_left(), 75.0);
        assert_eq!(t.center_lane(), 1);
        assert_eq!(t.player_baseline(), 500.0);
        // Player centered in lane 0: 75 + (150 - 40) / 2
        assert_eq!(t.lane_x(0, 40.0), 130.0);
        assert_eq!(t.lane_x(2, 40.0), 430.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "lane_count": 4, "obstacle_speed": 8.0 }"#).unwrap();
        assert_eq!(t.lane_count, 4);
        assert_eq!(t.obstacle_speed, 8.0);
        assert_eq!(t.gravity, Tuning::default().gravity);
    }

    #[test]
    fn test_sanitize_repairs_bad_values() {
        let t = Tuning {
            lane_count: 0,
            gravity: -1.0,
            jump_power: 4.0,
            spawn_rate: 3.0,
            max_speed_multiplier: 0.5,
            ..Default::default()
        }
        .sanitized();
        let d = Tuning::default();
        assert_eq!(t.lane_count, d.lane_count);
        assert_eq!(t.gravity, d.gravity);
        assert_eq!(t.jump_power, d.jump_power);
        assert_eq!(t.spawn_rate, d.spawn_rate);
        assert_eq!(t.max_speed_multiplier, d.max_speed_multiplier);
        assert!(t.max_spawn_rate >= t.spawn_rate);
    }

    #[test]
    fn test_oversized_burst_falls_back() {
        let t = Tuning::from_json(r#"{ "burst_count": 18446744073709551615 }"#).unwrap();
        assert_eq!(t.burst_count, Tuning::default().burst_count);

        let t = Tuning::from_json(r#"{ "burst_count": 0 }"#).unwrap();
        assert_eq!(t.burst_count, Tuning::default().burst_count);

        let t = Tuning::from_json(r#"{ "burst_count": 512 }"#).unwrap();
        assert_eq!(t.burst_count, MAX_BURST_COUNT);

        // Session setup sizes its particle buffer from this value
        let state = crate::sim::GameState::new(1, 0, &t);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_non_finite_particles_repaired() {
        let t = Tuning {
            particle_speed: f32::NAN,
            particle_min_size: f32::NEG_INFINITY,
            particle_max_size: f32::INFINITY,
            particle_max_hue: f32::NAN,
            jump_clearance: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        let d = Tuning::default();
        assert_eq!(t.particle_speed, d.particle_speed);
        assert_eq!(t.particle_min_size, d.particle_min_size);
        assert_eq!(t.particle_max_size, d.particle_max_size);
        assert_eq!(t.particle_max_hue, d.particle_max_hue);
        assert_eq!(t.jump_clearance, d.jump_clearance);
    }

    #[test]
    fn test_negative_awards_repaired() {
        use crate::sim::{Command, GameState, tick};

        let t = Tuning::from_json(r#"{ "survival_rate": -1.0, "pass_award": -5.0 }"#).unwrap();
        let d = Tuning::default();
        assert_eq!(t.survival_rate, d.survival_rate);
        assert_eq!(t.pass_award, d.pass_award);

        let t = Tuning {
            survival_rate: f64::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t.survival_rate, d.survival_rate);

        // Score only climbs while the run lasts
        let t = Tuning::from_json(r#"{ "survival_rate": -1.0 }"#).unwrap();
        let mut state = GameState::new(5, 0, &t);
        let mut events = Vec::new();
        tick(&mut state, &mut vec![Command::Start], &t, &mut events);
        let mut last = state.score;
        for _ in 0..120 {
            tick(&mut state, &mut Vec::new(), &t, &mut events);
            assert!(state.score >= last);
            last = state.score;
        }
        assert!(last > 0.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ lanes: ").is_err());
    }
}
