//! Procedural mesh generation.

pub use self::cube::cube;
pub use self::render_mesh::RenderMesh;

mod cube;
mod render_mesh;
