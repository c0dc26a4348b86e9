//! A mesh uploaded to the GPU.

use crate::context::Context;
use crate::procedural::RenderMesh;

/// Index type of the face and edge buffers.
pub type VertexIndex = u32;
/// The matching [`wgpu::IndexFormat`].
pub const VERTEX_INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;

// Meshes are uploaded once and never written again.
const VERTEX_USAGE: wgpu::BufferUsages = wgpu::BufferUsages::VERTEX;
const INDEX_USAGE: wgpu::BufferUsages = wgpu::BufferUsages::INDEX;

/// A static mesh stored in GPU buffers.
///
/// Besides the positions, normals and triangle indices, the mesh keeps a line
/// list of its edges so it can be drawn as a wireframe.
pub struct GpuMesh {
    coords: wgpu::Buffer,
    normals: wgpu::Buffer,
    faces: wgpu::Buffer,
    edges: wgpu::Buffer,
    num_vertices: u32,
    num_indices: u32,
    num_edge_indices: u32,
}

impl GpuMesh {
    /// Uploads a mesh to the GPU.
    pub fn from_render_mesh(mesh: &RenderMesh) -> GpuMesh {
        let ctxt = Context::get();

        let coords: Vec<[f32; 3]> = mesh.coords.iter().map(|c| c.to_array()).collect();
        let normals: Vec<[f32; 3]> = mesh.normals.iter().map(|n| n.to_array()).collect();
        let faces = mesh.flat_indices();
        let edges: Vec<VertexIndex> = mesh.edges().into_iter().flatten().collect();


        GpuMesh {
            coords: ctxt.create_buffer_init(
                Some("mesh_coords_buffer"),
                bytemuck::cast_slice(&coords),
                VERTEX_USAGE,
            ),
            normals: ctxt.create_buffer_init(
                Some("mesh_normals_buffer"),
                bytemuck::cast_slice(&normals),
                VERTEX_USAGE,
            ),
            faces: ctxt.create_buffer_init(
                Some("mesh_faces_buffer"),
                bytemuck::cast_slice(&faces),
                INDEX_USAGE,
            ),
            edges: ctxt.create_buffer_init(
                Some("mesh_edges_buffer"),
                bytemuck::cast_slice(&edges),
                INDEX_USAGE,
            ),
            num_vertices: coords.len() as u32,
            num_indices: faces.len() as u32,
            num_edge_indices: edges.len() as u32,
        }
    }

    /// The vertex position buffer (`Float32x3` per vertex).
    #[inline]
    pub fn coords(&self) -> &wgpu::Buffer {
        &self.coords
    }

    /// The vertex normal buffer (`Float32x3` per vertex).
    #[inline]
    pub fn normals(&self) -> &wgpu::Buffer {
        &self.normals
    }

    /// The triangle-list index buffer.
    #[inline]
    pub fn faces(&self) -> &wgpu::Buffer {
        &self.faces
    }

    /// The line-list index buffer of the mesh edges.
    #[inline]
    pub fn edges(&self) -> &wgpu::Buffer {
        &self.edges
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> u32 {
        self.num_vertices
    }

    /// Number of triangle indices (three per face).
    #[inline]
    pub fn num_indices(&self) -> u32 {
        self.num_indices
    }

    /// Number of edge indices (two per edge).
    #[inline]
    pub fn num_edge_indices(&self) -> u32 {
        self.num_edge_indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_buffers_are_immutable_after_upload() {
        for usage in [VERTEX_USAGE, INDEX_USAGE] {
            assert!(!usage.contains(wgpu::BufferUsages::COPY_DST));
        }
        assert!(VERTEX_USAGE.contains(wgpu::BufferUsages::VERTEX));
        assert!(INDEX_USAGE.contains(wgpu::BufferUsages::INDEX));
    }
}
