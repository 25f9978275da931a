//! WebGPU rendering module
//!
//! The board is drawn as one flat quad per lit cell over a clear color.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{board_to_ndc, grid_quads};
pub use vertex::Vertex;
