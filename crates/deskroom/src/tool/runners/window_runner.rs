use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use glam::Vec2;
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorGrabMode, Window, WindowId};

use crate::content;
use crate::engine::GpuContext;
use crate::tool::app_config::AppConfig;
use crate::tool::frame_state::FrameState;
use crate::tool::scene_renderer::SceneRenderer;

pub struct WindowRunner {
    config: AppConfig,
    runtime: tokio::runtime::Runtime,
    frame_state: FrameState,
    focus: FocusState,

    // Fields drop in declaration order: GPU resources go before the window they present to.
    renderer: Option<SceneRenderer>,
    gpu_context: Option<GpuContext>,
    window: Option<Arc<Window>>,

    error: Option<anyhow::Error>,
}

impl WindowRunner {
    pub fn run(config: AppConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("Failed to initialize the windowing system")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = Self {
            runtime: tokio::runtime::Runtime::new()?,
            frame_state: FrameState::new(&config),
            focus: FocusState::default(),
            renderer: None,
            gpu_context: None,
            window: None,
            error: None,
            config,
        };
        event_loop.run_app(&mut runner).context("Event loop failed")?;

        match runner.error.take() {
            Some(err) => Err(err),
            None => {
                info!("Exiting");
                Ok(())
            }
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window =
            Arc::new(event_loop.create_window(attributes).context("Failed to create window")?);

        grab_cursor(&window);
        self.focus.set_focused(true);
        let size = window.inner_size();
        self.frame_state.set_cursor_origin(Vec2::new(size.width as f32, size.height as f32) / 2.0);

        let gpu_context = self
            .runtime
            .block_on(GpuContext::new_for_window(window.clone(), self.config.vsync))?;
        let definition = content::study_room(&self.config.scene_settings())?;
        let renderer = SceneRenderer::new(&gpu_context, definition, self.config.clear_color())?;

        window.request_redraw();
        self.renderer = Some(renderer);
        self.gpu_context = Some(gpu_context);
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{err:?}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let (Some(context), Some(renderer)) = (&mut self.gpu_context, &mut self.renderer) else {
            return;
        };
        if context.resize([size.width, size.height]) {
            renderer.resize(context);
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let (Some(window), Some(context), Some(renderer)) =
            (&self.window, &self.gpu_context, &mut self.renderer)
        else {
            return Ok(());
        };
        self.frame_state.update(Instant::now());
        if self.frame_state.should_close {
            return Ok(());
        }

        // Nothing to draw into while minimized.
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        window.pre_present_notify();
        renderer.render(context, &self.frame_state)
    }
}

/// Tracks window focus. Raw mouse motion only turns the camera while focused, and the cursor
/// grab, which the OS drops on focus loss, has to be taken again when focus returns.
#[derive(Debug, Default)]
struct FocusState {
    focused: bool,
}

impl FocusState {
    /// Returns true if the cursor needs to be grabbed again.
    fn set_focused(&mut self, focused: bool) -> bool {
        let regained = focused && !self.focused;
        self.focused = focused;
        regained
    }

    fn accepts_motion(&self) -> bool {
        self.focused
    }
}

/// Hides the cursor and keeps it inside the window. Look input comes from raw device motion,
/// so the grab mode only decides where the invisible cursor stays.
fn grab_cursor(window: &Window) {
    window.set_cursor_visible(false);
    if window.set_cursor_grab(CursorGrabMode::Locked).is_ok() {
        debug!("Cursor locked");
        return;
    }
    // X11 and Windows don't implement locking.
    match window.set_cursor_grab(CursorGrabMode::Confined) {
        Ok(()) => debug!("Cursor confined"),
        Err(err) => warn!("Cursor can't be grabbed: {err}"),
    }
}

impl ApplicationHandler for WindowRunner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.resize(size);
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                } else if self.frame_state.should_close {
                    info!("Exiting on user request");
                    event_loop.exit();
                }
            }
            WindowEvent::Focused(focused) => {
                if self.focus.set_focused(focused) {
                    if let Some(window) = &self.window {
                        grab_cursor(window);
                    }
                }
                self.frame_state.handle_window_event(&event);
            }
            event => self.frame_state.handle_window_event(&event),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.focus.accepts_motion() {
                self.frame_state.apply_mouse_delta(Vec2::new(dx as f32, dy as f32));
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
