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

/// Colors for game elements (linear RGB)
pub mod colors {
    /// #fafafa
    pub const BACKGROUND: [f32; 4] = [0.955, 0.955, 0.955, 1.0];
    pub const GROUND: [f32; 4] = [0.25, 0.45, 0.2, 1.0];
    pub const GROUND_EDGE: [f32; 4] = [0.15, 0.3, 0.1, 1.0];
    pub const HERO: [f32; 4] = [0.15, 0.35, 0.85, 1.0];
    pub const HERO_AIR: [f32; 4] = [0.3, 0.55, 1.0, 1.0];
    pub const HERO_HURT: [f32; 4] = [0.95, 0.3, 0.25, 1.0];
    pub const HERO_DEFEAT: [f32; 4] = [0.45, 0.45, 0.5, 1.0];
    pub const HERO_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const ROCK_SHADES: [[f32; 4]; 3] = [
        [0.35, 0.25, 0.18, 1.0],
        [0.42, 0.31, 0.22, 1.0],
        [0.3, 0.22, 0.17, 1.0],
    ];
    pub const ROCK_RIM: [f32; 4] = [0.18, 0.12, 0.08, 1.0];
    pub const COIN: [f32; 4] = [1.0, 0.78, 0.1, 1.0];
    pub const COIN_EDGE: [f32; 4] = [0.8, 0.55, 0.05, 1.0];
    pub const HEALTH_BG: [f32; 4] = [0.85, 0.1, 0.1, 1.0];
    pub const HEALTH_FILL: [f32; 4] = [0.1, 0.8, 0.2, 1.0];
    pub const DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
}
