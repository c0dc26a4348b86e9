use crate::camera::Camera3d;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::render_mode::RenderMode;
use crate::resource::{GpuMesh, RenderContext, VERTEX_INDEX_FORMAT};
use bytemuck::{Pod, Zeroable};

/// WGSL source of the built-in cube shader.
pub static CUBE_SHADER_SRC: &str = include_str!("cube.wgsl");

/// The uniforms uploaded every frame.
///
/// Matches the WGSL layout `{ mvp_matrix: mat4x4<f32>, camera: vec3<f32>, time: f32 }`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CubeUniforms {
    /// Model-view-projection matrix.
    pub mvp_matrix: [[f32; 4]; 4],
    /// Camera position in world space.
    pub camera: [f32; 3],
    /// Seconds since the first frame.
    pub time: f32,
}

impl CubeUniforms {
    /// The uniforms for an object at the world origin seen from `camera`.
    pub fn new(camera: &dyn Camera3d, time: f32) -> Self {
        CubeUniforms {
            mvp_matrix: camera.transformation().to_cols_array_2d(),
            camera: camera.eye().to_array(),
            time,
        }
    }
}

/// The material drawing a mesh with the cube shader.
///
/// One pipeline per [`RenderMode`] is built from the same shader module and
/// layout. Back faces are never culled.
pub struct CubeMaterial {
    pipeline_fill: wgpu::RenderPipeline,
    pipeline_wireframe: wgpu::RenderPipeline,
    pipeline_points: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl CubeMaterial {
    /// Compiles `shader_source` (WGSL with `vs_main` and `fs_main` entry points)
    /// and creates the pipelines for the given render target.
    ///
    /// Returns [`Error::ShaderCompilation`] if the shader or a pipeline is rejected.
    pub async fn new(shader_source: &str, context: &RenderContext) -> Result<CubeMaterial> {
        let ctxt = Context::get();
        ctxt.push_error_scope();

        let bind_group_layout = ctxt.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("cube_material_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = ctxt.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cube_material_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = ctxt.create_shader_module(Some("cube_material_shader"), shader_source);

        let vertex_buffer_layouts = [
            // Vertex positions
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                }],
            },
            // Normals
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                }],
            },
        ];

        let create_pipeline = |topology: wgpu::PrimitiveTopology, label: &str| {
            ctxt.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &vertex_buffer_layouts,
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: Context::depth_format(),
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: context.sample_count,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
        };

        let pipeline_fill = create_pipeline(
            wgpu::PrimitiveTopology::TriangleList,
            "cube_material_pipeline_fill",
        );
        let pipeline_wireframe = create_pipeline(
            wgpu::PrimitiveTopology::LineList,
            "cube_material_pipeline_wireframe",
        );
        let pipeline_points = create_pipeline(
            wgpu::PrimitiveTopology::PointList,
            "cube_material_pipeline_points",
        );

        let uniform_buffer = ctxt.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cube_material_uniform_buffer"),
            size: std::mem::size_of::<CubeUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctxt.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cube_material_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        if let Some(e) = ctxt.pop_error_scope().await {
            return Err(Error::ShaderCompilation(e.to_string()));
        }

        log::debug!("cube material pipelines created");

        Ok(CubeMaterial {
            pipeline_fill,
            pipeline_wireframe,
            pipeline_points,
            uniform_buffer,
            bind_group,
        })
    }

    /// Uploads the uniforms for this frame.
    pub fn prepare(&self, uniforms: &CubeUniforms) {
        Context::get().write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Draws `mesh` into `render_pass` with the pipeline of `mode`.
    pub fn render(&self, mode: RenderMode, mesh: &GpuMesh, render_pass: &mut wgpu::RenderPass<'_>) {
        let pipeline = match mode {
            RenderMode::Fill => &self.pipeline_fill,
            RenderMode::Wireframe => &self.pipeline_wireframe,
            RenderMode::Points => &self.pipeline_points,
        };

        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.coords().slice(..));
        render_pass.set_vertex_buffer(1, mesh.normals().slice(..));

        match mode {
            RenderMode::Fill => {
                render_pass.set_index_buffer(mesh.faces().slice(..), VERTEX_INDEX_FORMAT);
                render_pass.draw_indexed(0..mesh.num_indices(), 0, 0..1);
            }
            RenderMode::Wireframe => {
                render_pass.set_index_buffer(mesh.edges().slice(..), VERTEX_INDEX_FORMAT);
                render_pass.draw_indexed(0..mesh.num_edge_indices(), 0, 0..1);
            }
            RenderMode::Points => render_pass.draw(0..mesh.num_vertices(), 0..1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_match_the_wgsl_layout() {
        // mat4x4 (64 bytes) followed by a vec3 + f32 packed into 16 bytes.
        assert_eq!(std::mem::size_of::<CubeUniforms>(), 80);
        assert_eq!(std::mem::offset_of!(CubeUniforms, camera), 64);
        assert_eq!(std::mem::offset_of!(CubeUniforms, time), 76);
    }

    #[test]
    fn builtin_shader_declares_the_expected_interface() {
        for needle in ["fn vs_main", "fn fs_main", "mvp_matrix", "camera", "time"] {
            assert!(CUBE_SHADER_SRC.contains(needle), "missing `{}`", needle);
        }
    }
}
