pub mod context;
pub mod draw_call;
pub mod globals;
pub mod mesh;
pub mod shader;

/// Interleaved vertex as uploaded to the GPU: position, normal, color.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3 {
    pub a_position: [f32; 3],
    pub a_normal: [f32; 3],
    pub a_color: [f32; 3],
}

impl Vertex3 {
    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            a_position: position,
            a_normal: normal,
            a_color: color,
        }
    }
}

const VERTEX_FORMAT: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x3,
];

pub type MeshIndex = u32;

pub type Size2D = [u32; 2];

pub const DEPTH_BUFFER_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
