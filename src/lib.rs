//! Pixel Racer - a lane-dodging arcade racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, state machine)
//! - `game`: Session orchestration with audio, storage and reward collaborators
//! - `frame_loop`: Update-then-render loop with cancellation
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: High score storage
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod color;
pub mod frame_loop;
pub mod game;
pub mod highscores;
pub mod logging;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod reward;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use audio::{AudioHooks, SilentAudio};
pub use frame_loop::{FrameLoop, FrameRenderer, FrameScheduler};
pub use game::{Game, GameView};
pub use highscores::HighScores;
pub use persistence::HighScoreStore;
pub use reward::{RewardDispatcher, RewardNotice, RewardPipeline};
pub use settings::Settings;
pub use tuning::Tuning;
