use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};
use winit::window::Window;

use super::Size2D;

pub struct GpuContext {
    #[allow(dead_code)]
    pub adapter: wgpu::Adapter,
    pub queue: wgpu::Queue,
    pub device: wgpu::Device,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    pub async fn new_for_window(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create window surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .context("No suitable adapter found")?;

        let adapter_info = adapter.get_info();
        info!("WGPU adapter: {:?} on {}", adapter_info.backend, adapter_info.name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default(), None)
            .await
            .context("Failed to create GPU device")?;

        let size = window.inner_size();
        let mut surface_config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .context("Surface is not supported by the adapter")?;
        surface_config.present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        surface.configure(&device, &surface_config);
        debug!("Surface format: {:?}", surface_config.format);

        Ok(GpuContext {
            adapter,
            queue,
            device,
            surface,
            surface_config,
        })
    }

    /// Reconfigures the swapchain. Zero-sized windows (minimized) are ignored.
    pub fn resize(&mut self, size: Size2D) -> bool {
        if size[0] == 0 || size[1] == 0 {
            return false;
        }
        self.surface_config.width = size[0];
        self.surface_config.height = size[1];
        self.surface.configure(&self.device, &self.surface_config);
        true
    }

    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn surface_size(&self) -> Size2D {
        [self.surface_config.width, self.surface_config.height]
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }
}

