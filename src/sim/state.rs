//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]. Entities are plain
//! values; a restart rebuilds them wholesale.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::color::Rgba;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Not started yet, start prompt showing
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended, summary showing
    GameOver,
}

/// Lateral direction of a lane change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// The player's car
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub lane: usize,
    pub x: f32,
    pub target_x: f32,
    /// Resting y of the car's top edge
    pub base_y: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub is_jumping: bool,
    pub jump_velocity: f32,
}

impl Player {
    /// Grounded car in the center lane
    pub fn new(tuning: &Tuning) -> Self {
        let lane = tuning.center_lane();
        let x = tuning.lane_x(lane, tuning.player_width);
        let base_y = tuning.player_baseline();
        Self {
            lane,
            x,
            target_x: x,
            base_y,
            y: base_y,
            width: tuning.player_width,
            height: tuning.player_height,
            is_jumping: false,
            jump_velocity: 0.0,
        }
    }

    /// Change lane by one. Returns false at the road edge (no-op).
    pub fn shift_lane(&mut self, dir: Direction, tuning: &Tuning) -> bool {
        let lane = match dir {
            Direction::Left if self.lane > 0 => self.lane - 1,
            Direction::Right if self.lane + 1 < tuning.lane_count => self.lane + 1,
            _ => return false,
        };
        self.lane = lane;
        self.target_x = tuning.lane_x(lane, self.width);
        true
    }

    /// Start a jump. Returns false if already airborne.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.is_jumping {
            return false;
        }
        self.is_jumping = true;
        self.jump_velocity = tuning.jump_power;
        true
    }

    /// Advance lateral easing and jump arc by one tick.
    /// Returns true on the tick the car lands.
    pub fn update(&mut self, tuning: &Tuning) -> bool {
        let step = tuning.player_step;
        let remaining = self.target_x - self.x;
        if remaining.abs() <= step {
            self.x = self.target_x;
        } else {
            self.x += step.copysign(remaining);
        }

        if !self.is_jumping {
            return false;
        }
        self.jump_velocity += tuning.gravity;
        self.y += self.jump_velocity;
        if self.y >= self.base_y {
            self.y = self.base_y;
            self.is_jumping = false;
            self.jump_velocity = 0.0;
            return true;
        }
        false
    }

    /// Height above the resting baseline
    #[inline]
    pub fn lift(&self) -> f32 {
        self.base_y - self.y
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

/// Obstacle variants. Cars carry their lane paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleKind {
    /// Oncoming car, the common hazard
    Car { paint: Rgba },
    /// Striped road barrier
    Barrier,
    /// Wide, flat oil slick
    Oil,
}

impl ObstacleKind {
    /// Car paint for a lane (red, orange, purple, repeating)
    pub fn car_for_lane(lane: usize) -> Self {
        let paint = match lane % 3 {
            0 => Rgba::from_rgb8(0xff, 0x44, 0x44),
            1 => Rgba::from_rgb8(0xff, 0x88, 0x00),
            _ => Rgba::from_rgb8(0x99, 0x00, 0xff),
        };
        ObstacleKind::Car { paint }
    }

    /// (width, height) of this kind
    pub fn size(&self) -> (f32, f32) {
        match self {
            ObstacleKind::Car { .. } | ObstacleKind::Barrier => (40.0, 60.0),
            ObstacleKind::Oil => (60.0, 30.0),
        }
    }
}

/// An obstacle scrolling down one lane
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub lane: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Fixed at spawn; obstacles never accelerate
    pub speed: f32,
    /// Pass award already granted
    pub passed: bool,
}

impl Obstacle {
    /// New obstacle just above the visible track
    pub fn new(kind: ObstacleKind, lane: usize, speed_multiplier: f32, tuning: &Tuning) -> Self {
        let (width, height) = kind.size();
        Self {
            kind,
            lane,
            x: tuning.lane_x(lane, width),
            y: -height,
            width,
            height,
            speed: tuning.obstacle_speed * speed_multiplier,
            passed: false,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.y += self.speed;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_off_screen(&self, tuning: &Tuning) -> bool {
        self.y > tuning.canvas_height
    }
}

/// A crash debris particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    pub color: Rgba,
}

impl Particle {
    /// Linear fade from 1 at spawn to 0 at death
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life == 0
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Float accumulator; displayed truncated
    pub score: f64,
    /// Best truncated score seen, seeded from storage
    pub high_score: u64,
    /// Score at the moment the last run ended
    pub final_score: u64,
    /// Scroll distance for the lane markings
    pub road_offset: f32,
    pub speed_multiplier: f32,
    pub spawn_rate: f32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh idle session
    pub fn new(seed: u64, high_score: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0.0,
            high_score,
            final_score: 0,
            road_offset: 0.0,
            speed_multiplier: 1.0,
            spawn_rate: tuning.spawn_rate,
            player: Player::new(tuning),
            obstacles: Vec::with_capacity(16),
            particles: Vec::with_capacity(tuning.burst_count),
            time_ticks: 0,
        }
    }

    /// Reset everything a run owns and enter Playing.
    /// Collections are cleared in place so their storage is reused.
    pub fn begin_run(&mut self, tuning: &Tuning) {
        self.phase = GamePhase::Playing;
        self.score = 0.0;
        self.final_score = 0;
        self.road_offset = 0.0;
        self.speed_multiplier = 1.0;
        self.spawn_rate = tuning.spawn_rate;
        self.player = Player::new(tuning);
        self.obstacles.clear();
        self.particles.clear();
        self.time_ticks = 0;
    }

    /// Truncated score shown to the player
    #[inline]
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0) as u64
    }
}
