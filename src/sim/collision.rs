//! Collision detection for the track
//!
//! Everything is an axis-aligned box in canvas space (y grows downward).
//! A car high enough in the air clears whatever it overlaps.

use glam::Vec2;

use super::state::{Obstacle, Player};

/// Axis-aligned bounding box, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict overlap; touching edges do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// True when the player is airborne and above the clearance height
#[inline]
pub fn clears_obstacles(player: &Player, clearance: f32) -> bool {
    player.is_jumping && player.lift() > clearance
}

/// Index of the first obstacle the player actually hits, if any.
/// Stops at the first unsuppressed overlap.
pub fn first_hit(player: &Player, obstacles: &[Obstacle], clearance: f32) -> Option<usize> {
    if clears_obstacles(player, clearance) {
        return None;
    }
    let bounds = player.bounds();
    obstacles.iter().position(|o| bounds.overlaps(&o.bounds()))
}
