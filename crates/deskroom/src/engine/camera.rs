use glam::{Mat4, Vec2, Vec3};
use strum::EnumIter;

use super::core::globals::Globals;
use super::core::Size2D;

/// Looking further up or down than this would flip the view around the up axis.
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraSettings {
    /// Degrees of rotation per pixel of mouse movement.
    pub mouse_sensitivity: f32,
    /// Units per second.
    pub speed: f32,
    /// Vertical field of view in radians.
    pub field_of_view: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.1,
            speed: 2.5,
            field_of_view: 45f32.to_radians(),
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Unit direction for the given yaw and pitch, both in degrees.
/// Yaw -90° with zero pitch looks down the negative Z axis.
pub fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
}

/// Free-fly camera steered by yaw/pitch mouse look.
#[derive(Clone, Debug)]
pub struct FlyCamera {
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    last_mouse: Vec2,
    first_mouse: bool,
    pub settings: CameraSettings,
}

impl FlyCamera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32, settings: CameraSettings) -> Self {
        let pitch = pitch.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        Self {
            position,
            front: front_from_angles(yaw, pitch),
            up: Vec3::Y,
            yaw,
            pitch,
            last_mouse: Vec2::ZERO,
            first_mouse: true,
            settings,
        }
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(self.up()).normalize()
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Places the reference point for the first mouse sample, e.g. the window centre.
    pub fn set_last_mouse(&mut self, position: Vec2) {
        self.last_mouse = position;
    }

    /// Feeds an absolute cursor position. The first sample only records the position so the
    /// view doesn't jump when the cursor enters the window.
    pub fn process_mouse(&mut self, position: Vec2) {
        if self.first_mouse {
            self.last_mouse = position;
            self.first_mouse = false;
        }

        // Window Y grows downwards.
        let offset = Vec2::new(position.x - self.last_mouse.x, self.last_mouse.y - position.y);
        self.last_mouse = position;
        self.rotate(offset * self.settings.mouse_sensitivity);
    }

    /// Turns the camera by the given yaw and pitch deltas in degrees.
    pub fn rotate(&mut self, delta_degrees: Vec2) {
        self.yaw += delta_degrees.x;
        self.pitch =
            (self.pitch + delta_degrees.y).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        self.front = front_from_angles(self.yaw, self.pitch);
    }

    pub fn translate(&mut self, movement: Movement, delta_time: f32) {
        let distance = self.settings.speed * delta_time;
        let direction = match movement {
            Movement::Forward => self.front,
            Movement::Backward => -self.front,
            Movement::Left => -self.right(),
            Movement::Right => self.right(),
            Movement::Up => self.up,
            Movement::Down => -self.up,
        };
        self.position += direction * distance;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.up())
    }

    /// Right-handed perspective with wgpu's [0, 1] depth range.
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.settings.field_of_view,
            aspect_ratio,
            self.settings.z_near,
            self.settings.z_far,
        )
    }

    pub fn set_globals(&self, globals: &mut Globals, canvas_size: Size2D) {
        let canvas_size = [canvas_size[0].max(1) as f32, canvas_size[1].max(1) as f32];
        globals.aspect_ratio = canvas_size[0] / canvas_size[1];
        globals.field_of_view = self.settings.field_of_view;
        globals.z_near = self.settings.z_near;
        globals.z_far = self.settings.z_far;
        globals.projection_from_camera = self.projection_matrix(globals.aspect_ratio);
        globals.camera_from_world = self.view_matrix();
        globals.view_position = self.position;

        // Render objects should take care of their model-to-world transformation
        globals.world_from_model = Mat4::IDENTITY;

        globals.update_compound_matrices();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPSILON: f32 = 1e-5;

    fn camera() -> FlyCamera {
        FlyCamera::new(Vec3::new(0.0, 1.0, 3.0), -90.0, 0.0, CameraSettings::default())
    }

    /// Look-at built from its definition rather than through glam.
    fn textbook_look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
        let f = (center - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);
        Mat4::from_cols(
            Vec4::new(s.x, u.x, -f.x, 0.0),
            Vec4::new(s.y, u.y, -f.y, 0.0),
            Vec4::new(s.z, u.z, -f.z, 0.0),
            Vec4::new(-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0),
        )
    }

    #[test]
    fn initial_front_looks_down_negative_z() {
        let camera = camera();
        assert!(camera.front().abs_diff_eq(Vec3::NEG_Z, EPSILON), "{}", camera.front());
    }

    #[test]
    fn front_is_unit_length_for_all_angles() {
        for yaw in (-1080..=1080).step_by(15) {
            for pitch in -89..=89 {
                let front = front_from_angles(yaw as f32, pitch as f32);
                assert!(
                    (front.length() - 1.0).abs() < EPSILON,
                    "yaw {yaw}, pitch {pitch}: {}",
                    front.length()
                );
            }
        }
    }

    #[test]
    fn pitch_stays_clamped_under_cumulative_input() {
        let mut camera = camera();
        camera.process_mouse(Vec2::new(400.0, 300.0));
        let mut y = 300.0;
        for _ in 0..500 {
            y -= 37.0;
            camera.process_mouse(Vec2::new(400.0, y));
            assert!(camera.pitch() <= PITCH_LIMIT_DEGREES);
        }
        assert_eq!(camera.pitch(), PITCH_LIMIT_DEGREES);
        for _ in 0..1000 {
            y += 53.0;
            camera.process_mouse(Vec2::new(400.0, y));
            assert!(camera.pitch() >= -PITCH_LIMIT_DEGREES);
        }
        assert_eq!(camera.pitch(), -PITCH_LIMIT_DEGREES);
        assert!((camera.front().length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn first_mouse_sample_does_not_rotate() {
        let mut camera = camera();
        camera.set_last_mouse(Vec2::new(400.0, 300.0));
        camera.process_mouse(Vec2::new(10.0, 20.0));
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);

        camera.process_mouse(Vec2::new(20.0, 10.0));
        assert!((camera.yaw() - -89.0).abs() < EPSILON);
        assert!((camera.pitch() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn movement_scales_with_delta_time() {
        let mut camera = camera();
        let start = camera.position;
        camera.translate(Movement::Forward, 0.5);
        assert!(camera.position.abs_diff_eq(start + Vec3::NEG_Z * 1.25, EPSILON));

        camera.position = start;
        camera.translate(Movement::Right, 1.0);
        assert!(camera.position.abs_diff_eq(start + Vec3::X * 2.5, EPSILON));

        camera.position = start;
        camera.translate(Movement::Down, 0.2);
        assert!(camera.position.abs_diff_eq(start - Vec3::Y * 0.5, EPSILON));
    }

    #[test]
    fn zero_delta_time_keeps_position() {
        let mut camera = camera();
        let start = camera.position;
        for movement in <Movement as strum::IntoEnumIterator>::iter() {
            camera.translate(movement, 0.0);
        }
        assert_eq!(camera.position, start);
    }

    #[test]
    fn view_matrix_matches_textbook_look_at() {
        let mut camera = camera();
        camera.rotate(Vec2::new(33.0, -12.0));
        camera.position = Vec3::new(-2.0, 0.5, 4.0);
        let expected = textbook_look_at(
            camera.position,
            camera.position + camera.front(),
            camera.up(),
        );
        assert!(camera.view_matrix().abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn globals_carry_camera_state() {
        let camera = camera();
        let mut globals = Globals::default();
        camera.set_globals(&mut globals, [800, 600]);
        assert!((globals.aspect_ratio - 800.0 / 600.0).abs() < EPSILON);
        assert_eq!(globals.view_position, camera.position);
        assert!(globals.camera_from_world.abs_diff_eq(camera.view_matrix(), EPSILON));

        // A point in front of the camera lands inside the depth range.
        let clip = globals.projection_from_world * Vec4::new(0.0, 1.0, 0.0, 1.0);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth), "{depth}");
    }
}
