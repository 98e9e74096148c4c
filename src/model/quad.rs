use glam::{Vec2, Vec3};

use super::tangent::{compute_tangent_basis, QUAD_TRIANGLES};
use super::vertex::{NormalMappedVertex, FLOATS_PER_VERTEX};
use crate::error::Result;

pub const QUAD_VERTEX_COUNT: usize = 6;

/// A planar quad: corners ordered top-left, bottom-left, bottom-right, top-right.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    pub positions: [Vec3; 4],
    pub tex_coords: [Vec2; 4],
    pub normal: Vec3,
}

impl Quad {
    /// Unit square in the XY plane facing +Z, UVs tiled `uv_repeat` times.
    pub fn unit(uv_repeat: f32) -> Self {
        Self {
            positions: [
                Vec3::new(-1.0, 1.0, 0.0),
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
            ],
            tex_coords: [
                Vec2::new(0.0, 1.0) * uv_repeat,
                Vec2::new(0.0, 0.0) * uv_repeat,
                Vec2::new(1.0, 0.0) * uv_repeat,
                Vec2::new(1.0, 1.0) * uv_repeat,
            ],
            normal: Vec3::Z,
        }
    }

    /// Two unindexed triangles, each vertex carrying its triangle's basis.
    pub fn build_vertices(&self) -> Result<[NormalMappedVertex; QUAD_VERTEX_COUNT]> {
        let bases = compute_tangent_basis(&self.positions, &self.tex_coords, self.normal)?;

        let mut vertices: [NormalMappedVertex; QUAD_VERTEX_COUNT] = bytemuck::Zeroable::zeroed();
        for (triangle, (corners, basis)) in QUAD_TRIANGLES.iter().zip(bases.iter()).enumerate() {
            for (slot, &corner) in corners.iter().enumerate() {
                vertices[triangle * 3 + slot] = NormalMappedVertex {
                    position: self.positions[corner].to_array(),
                    normal: self.normal.to_array(),
                    tex_coords: self.tex_coords[corner].to_array(),
                    tangent: basis.tangent.to_array(),
                    bitangent: basis.bitangent.to_array(),
                };
            }
        }

        log::debug!("Built quad vertices with bases {:?}", bases);
        Ok(vertices)
    }
}

/// Row-major 6x14 view of a vertex set, as uploaded.
pub fn flatten(vertices: &[NormalMappedVertex; QUAD_VERTEX_COUNT]) -> [[f32; FLOATS_PER_VERTEX]; QUAD_VERTEX_COUNT] {
    vertices.map(|v| v.to_array())
}
