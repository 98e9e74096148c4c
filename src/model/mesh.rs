use wgpu::util::DeviceExt;

use super::quad::{Quad, QUAD_VERTEX_COUNT};
use crate::error::Result;

/// GPU copy of the quad. Uploaded once, never rewritten.
pub struct QuadMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub num_vertices: u32,
}

impl QuadMesh {
    pub fn upload(device: &wgpu::Device, quad: &Quad) -> Result<Self> {
        let vertices = quad.build_vertices()?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::info!("Uploaded quad mesh ({} vertices)", QUAD_VERTEX_COUNT);
        Ok(Self {
            vertex_buffer,
            num_vertices: QUAD_VERTEX_COUNT as u32,
        })
    }

    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.num_vertices, 0..1);
    }

    pub fn destroy(&self) {
        self.vertex_buffer.destroy();
    }
}
