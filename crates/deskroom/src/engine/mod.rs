pub mod camera;
pub mod core;
pub mod geometry;
pub mod render_object;
pub mod scene;

pub use self::core::context::GpuContext;
pub use self::core::draw_call::DrawCall;
pub use self::core::draw_call::DrawCallProps;
pub use self::core::draw_call::UniformLayouts;
pub use self::core::globals::FrameUniforms;
pub use self::core::globals::Globals;
pub use self::core::globals::ObjectUniforms;
pub use self::core::shader::Shader;
pub use self::core::shader::ShaderProgram;
pub use self::core::Size2D;
pub use self::core::DEPTH_BUFFER_FORMAT;

pub use camera::CameraSettings;
pub use camera::FlyCamera;
pub use camera::Movement;
pub use geometry::CpuMesh;
pub use render_object::RenderObject;
pub use scene::Material;
pub use scene::ObjectId;
pub use scene::Scene;
pub use scene::SceneDefinition;
