//! WebGPU rendering module
//!
//! Scenes are tessellated into flat-colored triangles on the CPU each frame
//! and drawn with a single pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, view_to_ndc};
pub use shapes::scene_vertices;
pub use vertex::Vertex;
