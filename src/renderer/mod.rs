//! WebGPU rendering module
//!
//! The scene is rebuilt each frame as a flat-colored triangle list in viewport
//! pixels and uploaded in one draw call.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, viewport_to_ndc};
pub use scene::{Draw, build_scene};
pub use vertex::Vertex;
