use anyhow::{ensure, Result};
use wgpu::util::DeviceExt;

use super::context::GpuContext;
use super::{MeshIndex, Vertex3};

/// Vertex data resident on the GPU, optionally indexed.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    pub index_buffer: Option<wgpu::Buffer>,
    pub index_count: u32,
}

impl Mesh {
    pub fn try_new(
        context: &GpuContext,
        label: &str,
        vertices: &[Vertex3],
        indices: Option<&[MeshIndex]>,
    ) -> Result<Mesh> {
        ensure!(!vertices.is_empty(), "Mesh '{label}' has no vertices");

        let vertex_buffer = context.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let (index_buffer, index_count) = if let Some(indices) = indices {
            ensure!(
                indices.iter().all(|&i| (i as usize) < vertices.len()),
                "Mesh '{label}' has out of range indices"
            );
            let buffer = context.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            (Some(buffer), indices.len() as u32)
        } else {
            (None, 0)
        };

        Ok(Mesh {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            index_buffer,
            index_count,
        })
    }
}
