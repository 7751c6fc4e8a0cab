//! Flat grid mesh for the water plane.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Square grid in the XZ plane centered on the origin.
pub struct PlaneMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl PlaneMesh {
    /// `segments` cells per side, each `extent / segments` wide.
    pub fn new(extent: f32, segments: u32) -> Self {
        let segments = segments.max(1);
        let row = segments + 1;
        let step = extent / segments as f32;
        let half = extent * 0.5;

        let mut vertices = Vec::with_capacity((row * row) as usize);
        for iz in 0..row {
            for ix in 0..row {
                vertices.push(Vertex {
                    position: [ix as f32 * step - half, 0.0, iz as f32 * step - half],
                });
            }
        }

        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for iz in 0..segments {
            for ix in 0..segments {
                let a = iz * row + ix;
                let b = a + 1;
                let c = a + row;
                let d = c + 1;
                // Counter-clockwise seen from +Y
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn counts_match_segments() {
        let mesh = PlaneMesh::new(100.0, 4);
        assert_eq!(mesh.vertices.len(), 25);
        assert_eq!(mesh.index_count(), 4 * 4 * 6);
    }

    #[test]
    fn spans_extent_centered() {
        let mesh = PlaneMesh::new(10000.0, 256);
        let first = mesh.vertices[0].position;
        let last = mesh.vertices[mesh.vertices.len() - 1].position;
        assert_eq!(first, [-5000.0, 0.0, -5000.0]);
        assert_eq!(last, [5000.0, 0.0, 5000.0]);
    }

    #[test]
    fn indices_stay_in_bounds() {
        let mesh = PlaneMesh::new(10.0, 7);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn triangles_face_up() {
        let mesh = PlaneMesh::new(10.0, 3);
        for tri in mesh.indices.chunks(3) {
            let p = |i: u32| Vec3::from_array(mesh.vertices[i as usize].position);
            let normal = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
            assert!(normal.y > 0.0);
        }
    }

    #[test]
    fn zero_segments_still_builds_a_quad() {
        let mesh = PlaneMesh::new(1.0, 0);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.index_count(), 6);
    }
}
