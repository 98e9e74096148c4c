/// Number of `f32` components in one interleaved vertex record.
pub const FLOATS_PER_VERTEX: usize = 14;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NormalMappedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

impl NormalMappedVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x3,  // a_pos
        1 => Float32x3,  // a_normal
        2 => Float32x2,  // a_tex_coords
        3 => Float32x3,  // a_tangent
        4 => Float32x3,  // a_bitangent
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<NormalMappedVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    pub fn to_array(&self) -> [f32; FLOATS_PER_VERTEX] {
        let mut out = [0.0; FLOATS_PER_VERTEX];
        out.copy_from_slice(bytemuck::cast_slice(std::slice::from_ref(self)));
        out
    }
}
