//! Simulation module
//!
//! Per-frame simulation of the track: entities, collisions, spawning,
//! difficulty and the Idle/Playing/GameOver state machine.

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod particles;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_hit};
pub use spawner::SpawnRolls;
pub use state::{Direction, GamePhase, GameState, Obstacle, ObstacleKind, Particle, Player};
pub use tick::{Command, SimEvent, tick};
