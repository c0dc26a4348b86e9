//! Structures responsible for drawing into a window.

pub use self::cube_renderer::CubeRenderer;
pub use self::renderer::Renderer3d;

mod cube_renderer;
mod renderer;
