use std::mem::size_of;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::engine::{
    DrawCall, DrawCallProps, FrameUniforms, GpuContext, Material, ObjectUniforms, Scene,
    SceneDefinition, Shader, ShaderProgram, Size2D, UniformLayouts, DEPTH_BUFFER_FORMAT,
};
use crate::tool::frame_state::FrameState;

/// Owns the GPU side of the scene and records one render pass per frame.
pub struct SceneRenderer {
    lit: DrawCall,
    emissive: DrawCall,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    object_stride: u64,
    depth_view: wgpu::TextureView,
    depth_size: Size2D,
    scene: Scene,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    pub fn new(
        context: &GpuContext,
        definition: SceneDefinition,
        clear_color: wgpu::Color,
    ) -> Result<Self> {
        let layouts = UniformLayouts::new(context);
        let make_draw_call = |id: &str, program: ShaderProgram| -> Result<DrawCall> {
            let props = DrawCallProps {
                id: id.to_string(),
                shader: Shader::new(context, program)?,
                depth_test: true,
                depth_write: true,
            };
            let draw_call = DrawCall::new(context, props, &layouts)
                .with_context(|| format!("Failed to create draw call '{id}'"))?;
            debug!(
                "Draw call '{}' uses shader '{}'",
                draw_call.id,
                draw_call.shader.program.name()
            );
            Ok(draw_call)
        };
        let lit = make_draw_call("lit", ShaderProgram::Phong)?;
        let emissive = make_draw_call("emissive", ShaderProgram::Lamp)?;

        let scene = Scene::new(context, definition)?;

        let frame_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame uniforms"),
            size: size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame uniforms"),
            layout: &layouts.frame,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        // Every object gets its own slot, addressed with a dynamic offset.
        let alignment = context.device.limits().min_uniform_buffer_offset_alignment as u64;
        let object_stride = wgpu::util::align_to(size_of::<ObjectUniforms>() as u64, alignment);
        let object_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object uniforms"),
            size: object_stride * scene.objects.len().max(1) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let object_bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object uniforms"),
            layout: &layouts.object,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(size_of::<ObjectUniforms>() as u64),
                }),
            }],
        });

        let depth_size = context.surface_size();
        let depth_view = create_depth_view(context, depth_size);

        Ok(SceneRenderer {
            lit,
            emissive,
            frame_buffer,
            frame_bind_group,
            object_buffer,
            object_bind_group,
            object_stride,
            depth_view,
            depth_size,
            scene,
            clear_color,
        })
    }

    /// Recreates the depth buffer if the surface changed size.
    pub fn resize(&mut self, context: &GpuContext) {
        let size = context.surface_size();
        if size != self.depth_size {
            debug!("Resizing depth buffer to {}x{}", size[0], size[1]);
            self.depth_view = create_depth_view(context, size);
            self.depth_size = size;
        }
    }

    fn draw_call(&self, material: Material) -> &DrawCall {
        match material {
            Material::Lit => &self.lit,
            Material::Emissive => &self.emissive,
        }
    }

    fn write_uniforms(&self, context: &GpuContext, state: &FrameState) {
        let mut globals = state.globals(self.depth_size);
        context.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&globals.frame_uniforms()),
        );

        let stride = self.object_stride as usize;
        let mut staging = vec![0u8; stride * self.scene.objects.len()];
        for (slot, object) in staging.chunks_exact_mut(stride).zip(&self.scene.objects) {
            globals.world_from_model = object.world_from_model(state.light_position);
            globals.update_compound_matrices();
            let uniforms = globals.object_uniforms(object.tint);
            slot[..size_of::<ObjectUniforms>()].copy_from_slice(bytemuck::bytes_of(&uniforms));
        }
        context.queue.write_buffer(&self.object_buffer, 0, &staging);
    }

    pub fn render(&mut self, context: &GpuContext, state: &FrameState) -> Result<()> {
        let frame = match context.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                debug!("Surface is outdated, reconfiguring");
                context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out waiting for the next frame");
                return Ok(());
            }
            Err(err) => return Err(err).context("Failed to acquire next swapchain texture"),
        };
        self.resize(context);
        self.write_uniforms(context, state);

        let screen_view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut command_encoder =
            context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor::default());
        {
            let mut pass = command_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &screen_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            let mut bound_material = None;
            for (index, object) in self.scene.objects.iter().enumerate() {
                let Some(mesh) = self.scene.mesh(object.object) else {
                    continue;
                };
                if bound_material != Some(object.material) {
                    self.draw_call(object.material).bind(&mut pass);
                    bound_material = Some(object.material);
                }
                let offset = (index as u64 * self.object_stride) as wgpu::DynamicOffset;
                pass.set_bind_group(1, &self.object_bind_group, &[offset]);
                mesh.draw(&mut pass);
            }
        }

        context.queue.submit(Some(command_encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_depth_view(context: &GpuContext, size: Size2D) -> wgpu::TextureView {
    let texture = context.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth buffer"),
        size: wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_BUFFER_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
