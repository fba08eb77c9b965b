use glam::{EulerRot, Mat4, Quat, Vec3};

use super::scene::{Material, ObjectId};

/// One placement of a registered mesh in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderObject {
    pub object: ObjectId,
    pub material: Material,
    pub position: Vec3,
    /// Euler angles in radians, applied in Z, X, Y order.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub tint: [f32; 4],
    /// When set, `position` is ignored and the object is drawn at the light position.
    pub attached_to_light: bool,
}

impl RenderObject {
    pub fn new(object: ObjectId, position: Vec3) -> Self {
        Self {
            object,
            material: Material::Lit,
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            tint: [1.0; 4],
            attached_to_light: false,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_tint(mut self, tint: [f32; 4]) -> Self {
        self.tint = tint;
        self
    }

    pub fn emissive_at_light(mut self) -> Self {
        self.material = Material::Emissive;
        self.attached_to_light = true;
        self
    }

    pub fn world_from_model(&self, light_position: Vec3) -> Mat4 {
        let position = if self.attached_to_light { light_position } else { self.position };
        let rotation =
            Quat::from_euler(EulerRot::ZXY, self.rotation.z, self.rotation.x, self.rotation.y);
        Mat4::from_scale_rotation_translation(self.scale, rotation, position)
    }
}
