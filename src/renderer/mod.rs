//! CPU-side shape tessellation
//!
//! Produces `bytemuck`-compatible triangle lists the host can upload as-is.

pub mod shapes;
pub mod vertex;

pub use shapes::{Mesh, MeshFactory};
pub use vertex::Vertex;
