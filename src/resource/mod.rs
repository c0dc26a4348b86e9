//! GPU resources.

pub use crate::resource::gpu_mesh::{GpuMesh, VertexIndex, VERTEX_INDEX_FORMAT};
pub use crate::resource::render_context::RenderContext;

mod gpu_mesh;
mod render_context;
