use crate::resource::VertexIndex;
use glamx::Vec3;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Geometric description of a mesh, as stored in RAM.
///
/// Positions and normals share the same indices.
pub struct RenderMesh {
    /// Coordinates of the mesh vertices.
    pub coords: Vec<Vec3>,
    /// Normals of the mesh vertices.
    pub normals: Vec<Vec3>,
    /// Triangles, as indices into `coords` and `normals`.
    pub faces: Vec<[VertexIndex; 3]>,
}

impl RenderMesh {
    /// Creates a new mesh.
    ///
    /// # Panics
    /// If `coords` and `normals` have different lengths, or if a face refers
    /// to a vertex that does not exist.
    pub fn new(coords: Vec<Vec3>, normals: Vec<Vec3>, faces: Vec<[VertexIndex; 3]>) -> RenderMesh {
        assert_eq!(
            coords.len(),
            normals.len(),
            "Every vertex must have exactly one normal."
        );
        assert!(
            faces
                .iter()
                .flatten()
                .all(|&i| (i as usize) < coords.len()),
            "Face index out of bounds."
        );

        RenderMesh {
            coords,
            normals,
            faces,
        }
    }

    /// The number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.coords.len()
    }

    /// The faces flattened into a triangle-list index buffer.
    pub fn flat_indices(&self) -> Vec<VertexIndex> {
        self.faces.iter().flatten().copied().collect()
    }

    /// The unique undirected edges of the triangles, in order of first appearance.
    ///
    /// Shared edges of adjacent triangles appear once, so a quad split in two
    /// triangles yields its four sides and its diagonal.
    pub fn edges(&self) -> Vec<[VertexIndex; 2]> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();

        for &[a, b, c] in &self.faces {
            for (i, j) in [(a, b), (b, c), (c, a)] {
                let key = if i < j { (i, j) } else { (j, i) };
                if seen.insert(key) {
                    edges.push([i, j]);
                }
            }
        }

        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> RenderMesh {
        RenderMesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![Vec3::Z; 4],
            vec![[0, 1, 2], [2, 3, 0]],
        )
    }

    #[test]
    fn shared_edges_are_emitted_once() {
        let edges = quad().edges();
        assert_eq!(edges, vec![[0, 1], [1, 2], [2, 0], [2, 3], [3, 0]]);
    }

    #[test]
    fn flat_indices_follow_face_order() {
        assert_eq!(quad().flat_indices(), vec![0, 1, 2, 2, 3, 0]);
    }

    #[test]
    #[should_panic(expected = "Face index out of bounds.")]
    fn rejects_dangling_faces() {
        let _ = RenderMesh::new(vec![Vec3::ZERO], vec![Vec3::Z], vec![[0, 0, 1]]);
    }
}
