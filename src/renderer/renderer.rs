use crate::camera::Camera3d;
use crate::render_mode::RenderMode;
use crate::resource::RenderContext;

/// Trait for the objects a [`Window`](crate::window::Window) draws each frame.
///
/// Rendering happens in two steps: [`prepare`](Renderer3d::prepare) runs before
/// the render pass is opened so that uniforms can be uploaded, then
/// [`render`](Renderer3d::render) records the draw calls.
pub trait Renderer3d {
    /// Uploads the per-frame state.
    ///
    /// # Arguments
    /// * `camera` - The camera used for this frame
    /// * `time` - Seconds elapsed since the first frame
    fn prepare(&mut self, camera: &dyn Camera3d, time: f32);

    /// Records the draw calls for this frame.
    ///
    /// # Arguments
    /// * `mode` - How primitives are rasterized for this frame
    /// * `render_pass` - The active wgpu render pass to draw into
    /// * `context` - The render target description
    fn render(
        &mut self,
        mode: RenderMode,
        render_pass: &mut wgpu::RenderPass<'_>,
        context: &RenderContext,
    );
}
