use quadrant_engine::coords::Vec2;
use quadrant_engine::paint::Color;
use quadrant_engine::render::Vertex;

/// Half the quad's side length in NDC.
const HALF_EXTENT: f32 = 0.5;

/// Corner offsets and texture coordinates, ordered top-left, top-right,
/// bottom-right, bottom-left to match `QUAD_INDICES`.
const CORNERS: [([f32; 2], [f32; 2]); 4] = [
    ([-HALF_EXTENT, HALF_EXTENT], [0.0, 0.0]),
    ([HALF_EXTENT, HALF_EXTENT], [1.0, 0.0]),
    ([HALF_EXTENT, -HALF_EXTENT], [1.0, 1.0]),
    ([-HALF_EXTENT, -HALF_EXTENT], [0.0, 1.0]),
];

/// CPU copy of the quad's four vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadMesh {
    vertices: [Vertex; 4],
}

impl QuadMesh {
    /// A unit quad centered on the origin, tinted `color`.
    pub fn new(color: Color) -> Self {
        let color = color.to_array();
        let vertices = CORNERS.map(|([x, y], uv)| Vertex {
            position: [x, y, 0.0],
            uv,
            color,
        });
        Self { vertices }
    }

    /// Moves every corner so the quad is centered on `center`.
    ///
    /// Only x/y change; depth, UVs and colors are left alone.
    pub fn set_center(&mut self, center: Vec2) {
        for (vertex, ([x, y], _)) in self.vertices.iter_mut().zip(CORNERS) {
            vertex.position[0] = x + center.x;
            vertex.position[1] = y + center.y;
        }
    }

    pub fn vertices(&self) -> &[Vertex; 4] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(mesh: &QuadMesh) -> Vec<[f32; 2]> {
        mesh.vertices()
            .iter()
            .map(|v| [v.position[0], v.position[1]])
            .collect()
    }

    #[test]
    fn initial_quad_spans_half_unit_around_origin() {
        let mesh = QuadMesh::new(Color::WHITE);
        assert_eq!(
            positions(&mesh),
            vec![[-0.5, 0.5], [0.5, 0.5], [0.5, -0.5], [-0.5, -0.5]]
        );
        assert!(mesh.vertices().iter().all(|v| v.position[2] == 0.0));
        assert!(mesh.vertices().iter().all(|v| v.color == [1.0, 1.0, 1.0, 1.0]));
    }

    #[test]
    fn uvs_map_top_left_to_origin() {
        let mesh = QuadMesh::new(Color::WHITE);
        let uvs: Vec<[f32; 2]> = mesh.vertices().iter().map(|v| v.uv).collect();
        assert_eq!(uvs, vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    }

    #[test]
    fn set_center_offsets_every_corner() {
        let mut mesh = QuadMesh::new(Color::WHITE);
        mesh.set_center(Vec2::new(0.25, -0.125));
        assert_eq!(
            positions(&mesh),
            vec![[-0.25, 0.375], [0.75, 0.375], [0.75, -0.625], [-0.25, -0.625]]
        );
    }

    #[test]
    fn set_center_is_absolute_not_cumulative() {
        let mut mesh = QuadMesh::new(Color::WHITE);
        mesh.set_center(Vec2::new(0.3, 0.3));
        mesh.set_center(Vec2::zero());
        assert_eq!(mesh, QuadMesh::new(Color::WHITE));
    }
}
