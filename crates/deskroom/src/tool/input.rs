//! Keyboard and scroll wheel state fed from window events.

use ahash::AHashSet;
use glam::Vec2;
use smallvec::SmallVec;
use strum::IntoEnumIterator;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::engine::Movement;

/// Physical key bound to each camera movement.
pub fn key_for_movement(movement: Movement) -> KeyCode {
    match movement {
        Movement::Forward => KeyCode::KeyW,
        Movement::Backward => KeyCode::KeyS,
        Movement::Left => KeyCode::KeyA,
        Movement::Right => KeyCode::KeyD,
        Movement::Up => KeyCode::Space,
        Movement::Down => KeyCode::ControlLeft,
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    held: AHashSet<KeyCode>,
    quit_requested: bool,
    scroll: Vec2,
}

impl InputState {
    pub fn press(&mut self, key: KeyCode) {
        if key == KeyCode::Escape {
            self.quit_requested = true;
        }
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Drops every held key, e.g. when the window loses focus and won't see the releases.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Movements whose keys are currently held.
    pub fn movements(&self) -> SmallVec<[Movement; 6]> {
        Movement::iter().filter(|movement| self.is_held(key_for_movement(*movement))).collect()
    }

    pub fn add_scroll(&mut self, delta: Vec2) {
        self.scroll += delta;
    }

    /// Scroll accumulated since the last call, in lines.
    pub fn take_scroll(&mut self) -> Vec2 {
        std::mem::take(&mut self.scroll)
    }

    /// Returns true if the event was consumed.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return false;
                };
                match event.state {
                    ElementState::Pressed => self.press(key),
                    ElementState::Released => self.release(key),
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
                    // Roughly one line per 20 pixels.
                    MouseScrollDelta::PixelDelta(position) => {
                        Vec2::new(position.x as f32, position.y as f32) / 20.0
                    }
                };
                self.add_scroll(delta);
                true
            }
            WindowEvent::Focused(false) => {
                self.release_all();
                false
            }
            _ => false,
        }
    }
}
