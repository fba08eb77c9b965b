use std::time::Instant;

use glam::{Vec2, Vec3};
use tracing::trace;
use winit::event::WindowEvent;

use crate::engine::{FlyCamera, Globals, Size2D};
use crate::tool::app_config::AppConfig;
use crate::tool::input::InputState;
use crate::tool::timer::FrameTimer;

pub const START_POSITION: Vec3 = Vec3::new(0.0, 1.0, 3.0);
pub const START_YAW: f32 = -90.0;
pub const START_PITCH: f32 = 0.0;

/// Everything that changes from one frame to the next.
pub struct FrameState {
    pub camera: FlyCamera,
    pub timer: FrameTimer,
    pub input: InputState,
    pub light_position: Vec3,
    pub light_color: Vec3,
    pub should_close: bool,
    /// Unbounded cursor position accumulated from raw mouse motion.
    virtual_cursor: Vec2,
}

impl FrameState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            camera: FlyCamera::new(
                START_POSITION,
                START_YAW,
                START_PITCH,
                config.camera_settings(),
            ),
            timer: FrameTimer::new(),
            input: InputState::default(),
            light_position: Vec3::from(config.light_position),
            light_color: Vec3::from(config.light_color),
            should_close: false,
            virtual_cursor: Vec2::ZERO,
        }
    }

    /// Feeds keyboard, focus and scroll events to the input state. Look input arrives
    /// separately through `apply_mouse_delta`.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        self.input.handle_window_event(event);
    }

    /// Starting point of the virtual cursor, usually the window centre.
    pub fn set_cursor_origin(&mut self, origin: Vec2) {
        self.virtual_cursor = origin;
        self.camera.set_last_mouse(origin);
    }

    /// Raw mouse motion in pixels. The motion moves a virtual cursor that is never stopped
    /// by the window edges, and the camera follows that cursor.
    pub fn apply_mouse_delta(&mut self, delta: Vec2) {
        self.virtual_cursor += delta;
        self.camera.process_mouse(self.virtual_cursor);
        trace!("Yaw {:.1}, pitch {:.1}", self.camera.yaw(), self.camera.pitch());
    }

    /// Advances time and moves the camera along the held directions. Returns the delta time.
    pub fn update(&mut self, now: Instant) -> f32 {
        let delta_time = self.timer.tick(now);
        for movement in self.input.movements() {
            self.camera.translate(movement, delta_time);
        }
        if self.input.quit_requested() {
            self.should_close = true;
        }
        let scroll = self.input.take_scroll();
        if scroll != Vec2::ZERO {
            trace!("Scroll {scroll}");
        }
        delta_time
    }

    pub fn globals(&self, canvas_size: Size2D) -> Globals {
        let mut globals = Globals {
            light_position: self.light_position,
            light_color: self.light_color,
            ..Default::default()
        };
        self.camera.set_globals(&mut globals, canvas_size);
        globals
    }
}
