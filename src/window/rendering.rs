//! Rendering functionality.

use crate::camera::Camera3d;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::event::WindowEvent;
use crate::renderer::Renderer3d;

use super::Window;

impl Window {
    /// Renders one frame.
    ///
    /// Handles the pending events, updates the camera, draws `renderer` with the
    /// current [`RenderMode`](crate::render_mode::RenderMode) and presents the frame.
    ///
    /// # Returns
    /// `Ok(true)` if rendering should continue, `Ok(false)` if the window should close.
    ///
    /// # Errors
    /// Any error reported by the graphics API while recording or submitting the
    /// frame is returned as [`Error::Gpu`]. A failed screenshot is returned as is.
    pub async fn render_3d(
        &mut self,
        renderer: &mut dyn Renderer3d,
        camera: &mut dyn Camera3d,
    ) -> Result<bool> {
        self.handle_events(camera)?;
        if self.should_close() {
            return Ok(false);
        }
        self.canvas.apply_pending_resize().await?;

        let (w, h) = self.canvas.size();
        camera.handle_event(&self.canvas, &WindowEvent::FramebufferSize(w, h));
        camera.update(&self.canvas);

        let frame = match self.canvas.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, skipping frame");
                self.canvas.reconfigure().await?;
                return Ok(!self.should_close());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("timed out acquiring the surface texture, skipping frame");
                return Ok(!self.should_close());
            }
            Err(e) => return Err(Error::Surface(e.to_string())),
        };
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let ctxt = Context::get();
        let render_context = self.render_context();
        let time = self.clock.elapsed_secs();

        ctxt.push_error_scope();

        renderer.prepare(camera, time);

        let mut encoder = ctxt.create_command_encoder(Some("cubeview_frame_encoder"));
        {
            // With MSAA, draw into the multisampled texture and resolve into the frame.
            let (view, resolve_target) = match self.canvas.msaa_view() {
                Some(msaa_view) => (msaa_view, Some(&frame_view)),
                None => (&frame_view, None),
            };

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.canvas.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            renderer.render(self.render_mode, &mut render_pass, &render_context);
        }

        ctxt.submit(std::iter::once(encoder.finish()));

        // Keep a copy of the frame for snap/snap_rect before it is handed to the compositor.
        self.canvas.copy_frame_to_readback(&frame);
        self.canvas.present(frame);

        ctxt.check_error().await?;

        Ok(!self.should_close())
    }
}
