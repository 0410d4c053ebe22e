//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names to game commands)
//! - Frame scheduling (requestAnimationFrame on web)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::command_for_key;
