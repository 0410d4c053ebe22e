//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for scene elements
pub mod colors {
    use crate::color::Rgba;

    pub const GRASS: Rgba = Rgba::new(0x22 as f32 / 255.0, 0x8b as f32 / 255.0, 0x22 as f32 / 255.0, 1.0);
    pub const ROAD: Rgba = Rgba::new(0x2c as f32 / 255.0, 0x2c as f32 / 255.0, 0x2c as f32 / 255.0, 1.0);
    pub const ROAD_LINE: Rgba = Rgba::new(1.0, 1.0, 0.0, 1.0);

    pub const CAR_ROOF: Rgba = Rgba::new(0x66 as f32 / 255.0, 0.0, 0.0, 1.0);
    pub const WINDOW: Rgba = Rgba::WHITE;
    pub const WHEEL: Rgba = Rgba::BLACK;
    pub const HEADLIGHT: Rgba = Rgba::new(1.0, 1.0, 0.0, 1.0);
    pub const SHADOW: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.3);

    pub const BARRIER: Rgba = Rgba::new(1.0, 0x88 as f32 / 255.0, 0.0, 1.0);
    pub const BARRIER_STRIPE: Rgba = Rgba::WHITE;

    pub const OIL_RIM: Rgba = Rgba::new(0x33 as f32 / 255.0, 0x33 as f32 / 255.0, 0x33 as f32 / 255.0, 1.0);
    pub const OIL_POOL: Rgba = Rgba::new(0x1a as f32 / 255.0, 0x1a as f32 / 255.0, 0x1a as f32 / 255.0, 1.0);
    pub const OIL_SHEEN: Rgba = Rgba::new(100.0 / 255.0, 100.0 / 255.0, 150.0 / 255.0, 0.3);

    pub const METER_BOX: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.5);
    pub const METER_TRACK: Rgba = Rgba::new(1.0, 1.0, 1.0, 0.3);
    pub const METER_SLOW: Rgba = Rgba::new(0.0, 1.0, 0x88 as f32 / 255.0, 1.0);
    pub const METER_MID: Rgba = Rgba::new(1.0, 1.0, 0.0, 1.0);
    pub const METER_FAST: Rgba = Rgba::new(1.0, 0x44 as f32 / 255.0, 0x44 as f32 / 255.0, 1.0);

    pub const BACKGROUND: Rgba = Rgba::new(0.02, 0.02, 0.05, 1.0);
}
