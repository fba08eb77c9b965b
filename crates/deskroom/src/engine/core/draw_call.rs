use std::mem::size_of;

use anyhow::Result;
use wgpu::CompareFunction;

use super::context::GpuContext;
use super::globals::{FrameUniforms, ObjectUniforms};
use super::shader::{Shader, FRAGMENT_ENTRY_POINT, VERTEX_ENTRY_POINT};
use super::{Vertex3, DEPTH_BUFFER_FORMAT, VERTEX_FORMAT};

/// Bind group 0 holds per-frame uniforms, bind group 1 the per-object uniforms addressed
/// with a dynamic offset.
pub struct UniformLayouts {
    pub frame: wgpu::BindGroupLayout,
    pub object: wgpu::BindGroupLayout,
}

impl UniformLayouts {
    pub fn new(context: &GpuContext) -> Self {
        let frame = context.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame uniforms"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(size_of::<FrameUniforms>() as u64),
                },
                count: None,
            }],
        });
        let object = context.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object uniforms"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(size_of::<ObjectUniforms>() as u64),
                },
                count: None,
            }],
        });
        UniformLayouts { frame, object }
    }
}

pub struct DrawCallProps {
    pub id: String,
    pub shader: Shader,
    pub depth_test: bool,
    pub depth_write: bool,
}

/// A render pipeline: one shader program with the shared vertex layout and depth state.
pub struct DrawCall {
    pub id: String,
    pub shader: Shader,
    pipeline: wgpu::RenderPipeline,
}

impl DrawCall {
    pub fn new(
        context: &GpuContext,
        props: DrawCallProps,
        layouts: &UniformLayouts,
    ) -> Result<DrawCall> {
        let pipeline_layout =
            context.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&props.id),
                bind_group_layouts: &[&layouts.frame, &layouts.object],
                push_constant_ranges: &[],
            });

        let vertex_buffer_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex3>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_FORMAT,
        };

        let fragment_targets = [Some(wgpu::ColorTargetState {
            format: context.surface_format(),
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        let depth_compare =
            if props.depth_test { CompareFunction::Less } else { CompareFunction::Always };
        let depth_stencil = wgpu::DepthStencilState {
            format: DEPTH_BUFFER_FORMAT,
            depth_write_enabled: props.depth_write,
            depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        };

        let pipeline = context.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&props.id),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &props.shader.shader_module,
                entry_point: Some(VERTEX_ENTRY_POINT),
                buffers: &[vertex_buffer_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &props.shader.shader_module,
                entry_point: Some(FRAGMENT_ENTRY_POINT),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &fragment_targets,
            }),
            // Authored faces don't share a winding order, so nothing is culled.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(depth_stencil),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(DrawCall {
            id: props.id,
            shader: props.shader,
            pipeline,
        })
    }

    pub fn bind(&self, pass: &mut wgpu::RenderPass) {
        pass.set_pipeline(&self.pipeline);
    }
}
