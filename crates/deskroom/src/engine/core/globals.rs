use glam::{Mat4, Vec3};

/// Ambient term of the Phong model.
pub const AMBIENT_STRENGTH: f32 = 0.3;
/// Scale of the specular highlight.
pub const SPECULAR_STRENGTH: f32 = 0.5;
/// Specular exponent.
pub const SHININESS: f32 = 32.0;

/// Values shared by every draw call of a frame, plus the transform of the object
/// currently being drawn.
#[derive(Copy, Clone, Debug)]
pub struct Globals {
    pub projection_from_camera: Mat4,
    pub camera_from_world: Mat4,
    pub world_from_model: Mat4,
    pub projection_from_world: Mat4,
    pub projection_from_model: Mat4,
    pub aspect_ratio: f32,
    pub field_of_view: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub light_position: Vec3,
    pub light_color: Vec3,
    pub view_position: Vec3,
}

impl Default for Globals {
    fn default() -> Self {
        Self {
            projection_from_camera: Mat4::IDENTITY,
            camera_from_world: Mat4::IDENTITY,
            world_from_model: Mat4::IDENTITY,
            projection_from_world: Mat4::IDENTITY,
            projection_from_model: Mat4::IDENTITY,
            aspect_ratio: 1.0,
            field_of_view: 45f32.to_radians(),
            z_near: 0.1,
            z_far: 100.0,
            light_position: Vec3::ZERO,
            light_color: Vec3::ONE,
            view_position: Vec3::ZERO,
        }
    }
}

impl Globals {
    pub fn update_compound_matrices(&mut self) {
        self.projection_from_world = self.projection_from_camera * self.camera_from_world;
        self.projection_from_model = self.projection_from_world * self.world_from_model;
    }

    pub fn frame_uniforms(&self) -> FrameUniforms {
        FrameUniforms {
            projection_from_camera: self.projection_from_camera.to_cols_array_2d(),
            camera_from_world: self.camera_from_world.to_cols_array_2d(),
            light_position: self.light_position.to_array(),
            ambient_strength: AMBIENT_STRENGTH,
            view_position: self.view_position.to_array(),
            specular_strength: SPECULAR_STRENGTH,
            light_color: self.light_color.to_array(),
            shininess: SHININESS,
        }
    }

    pub fn object_uniforms(&self, tint: [f32; 4]) -> ObjectUniforms {
        // Normals need the inverse transpose once the model matrix carries non-uniform scale.
        let normal_from_model = self.world_from_model.inverse().transpose();
        ObjectUniforms {
            world_from_model: self.world_from_model.to_cols_array_2d(),
            normal_from_model: normal_from_model.to_cols_array_2d(),
            tint,
        }
    }
}

/// Layout of `FrameUniforms` in the WGSL sources, bind group 0.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub projection_from_camera: [[f32; 4]; 4],
    pub camera_from_world: [[f32; 4]; 4],
    pub light_position: [f32; 3],
    pub ambient_strength: f32,
    pub view_position: [f32; 3],
    pub specular_strength: f32,
    pub light_color: [f32; 3],
    pub shininess: f32,
}

/// Layout of `ObjectUniforms` in the WGSL sources, bind group 1 with a dynamic offset.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub world_from_model: [[f32; 4]; 4],
    pub normal_from_model: [[f32; 4]; 4],
    pub tint: [f32; 4],
}
