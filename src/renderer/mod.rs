//! WebGPU rendering module
//!
//! The scene is rebuilt every frame as flat-colored rectangles from a
//! read-only view of the game state, then uploaded in one draw call.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

use thiserror::Error;

pub use pipeline::RenderState;
pub use vertex::Vertex;

use crate::frame_loop::FrameRenderer;
use crate::settings::Settings;
use crate::sim::GameState;
use crate::tuning::Tuning;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface reports no usable texture format")]
    NoAdapterFormat,
    #[error("could not create GPU device: {0}")]
    Device(String),
}

/// GPU-backed [`FrameRenderer`]
pub struct SceneRenderer {
    state: RenderState,
    settings: Settings,
}

impl SceneRenderer {
    pub fn new(state: RenderState, settings: Settings) -> Self {
        Self { state, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl FrameRenderer for SceneRenderer {
    fn render(&mut self, state: &GameState, tuning: &Tuning, _time: f64) {
        let vertices = scene::build(state, tuning, &self.settings);
        match self.state.render(&vertices) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let (w, h) = self.state.size;
                self.state.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}
