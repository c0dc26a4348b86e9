use crate::builtin::{CubeMaterial, CubeUniforms};
use crate::camera::Camera3d;
use crate::error::Result;
use crate::procedural::{self, RenderMesh};
use crate::render_mode::RenderMode;
use crate::renderer::Renderer3d;
use crate::resource::{GpuMesh, RenderContext};

/// Renders a single static mesh at the world origin.
pub struct CubeRenderer {
    mesh: GpuMesh,
    material: CubeMaterial,
}

impl CubeRenderer {
    /// Creates a renderer for the unit cube using the given WGSL shader.
    pub async fn new(context: &RenderContext, shader_source: &str) -> Result<CubeRenderer> {
        Self::from_mesh(&procedural::cube(), context, shader_source).await
    }

    /// Creates a renderer for an arbitrary mesh.
    pub async fn from_mesh(
        mesh: &RenderMesh,
        context: &RenderContext,
        shader_source: &str,
    ) -> Result<CubeRenderer> {
        let material = CubeMaterial::new(shader_source, context).await?;
        let mesh = GpuMesh::from_render_mesh(mesh);

        log::debug!(
            "uploaded mesh: {} vertices, {} triangles, {} edges",
            mesh.num_vertices(),
            mesh.num_indices() / 3,
            mesh.num_edge_indices() / 2
        );

        Ok(CubeRenderer { mesh, material })
    }

    /// The GPU-side mesh drawn by this renderer.
    pub fn mesh(&self) -> &GpuMesh {
        &self.mesh
    }
}

impl Renderer3d for CubeRenderer {
    fn prepare(&mut self, camera: &dyn Camera3d, time: f32) {
        self.material.prepare(&CubeUniforms::new(camera, time));
    }

    fn render(
        &mut self,
        mode: RenderMode,
        render_pass: &mut wgpu::RenderPass<'_>,
        _context: &RenderContext,
    ) {
        self.material.render(mode, &self.mesh, render_pass);
    }
}
