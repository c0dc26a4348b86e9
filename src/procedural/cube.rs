use super::RenderMesh;
use glamx::Vec3;

// Four vertices per face so each face gets a flat normal.
#[rustfmt::skip]
const POSITIONS: [[f32; 3]; 24] = [
    [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], // front
    [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], // right
    [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], // top
    [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], // left
    [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0], // bottom
    [ 1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], // back
];

const FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, -1.0],
];

/// Generates the cube mesh: side 2, centered at the origin.
///
/// It has 24 vertices (4 per face, sharing the face normal) and 12 triangles.
///
/// # Example
/// ```
/// # use cubeview::procedural::cube;
/// let mesh = cube();
/// assert_eq!(mesh.num_vertices(), 24);
/// assert_eq!(mesh.faces.len(), 12);
/// ```
pub fn cube() -> RenderMesh {
    let coords = POSITIONS.iter().map(|&p| Vec3::from(p)).collect();
    let normals = FACE_NORMALS
        .iter()
        .flat_map(|&n| std::iter::repeat(Vec3::from(n)).take(4))
        .collect();
    let faces = (0..6)
        .flat_map(|face| {
            let v = face * 4;
            [[v, v + 1, v + 2], [v + 2, v + 3, v]]
        })
        .collect();

    RenderMesh::new(coords, normals, faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quads_are_split_along_one_diagonal() {
        let mesh = cube();
        assert_eq!(&mesh.flat_indices()[..12], &[0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]);
        assert_eq!(*mesh.faces.last().unwrap(), [22, 23, 20]);
    }

    #[test]
    fn vertices_lie_on_the_face_of_their_normal() {
        let mesh = cube();
        for (p, n) in mesh.coords.iter().zip(mesh.normals.iter()) {
            assert_eq!(p.dot(*n), 1.0);
            assert_eq!(p.abs().max_element(), 1.0);
        }
    }

    #[test]
    fn triangles_wind_counter_clockwise_seen_from_outside() {
        let mesh = cube();
        for &[a, b, c] in &mesh.faces {
            let (pa, pb, pc) = (
                mesh.coords[a as usize],
                mesh.coords[b as usize],
                mesh.coords[c as usize],
            );
            let n = (pb - pa).cross(pc - pa);
            assert!(n.dot(mesh.normals[a as usize]) > 0.0);
        }
    }

    #[test]
    fn wireframe_has_four_sides_and_a_diagonal_per_face() {
        assert_eq!(cube().edges().len(), 30);
    }
}
