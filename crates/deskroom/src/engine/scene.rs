use ahash::AHashMap;
use anyhow::{bail, Context, Result};
use itertools::Itertools;
use strum::{EnumIter, IntoStaticStr};
use tracing::{debug, info};

use super::core::context::GpuContext;
use super::core::mesh::Mesh;
use super::geometry::{CpuMesh, DrawMode};
use super::render_object::RenderObject;

/// Identifies one piece of authored geometry. Each id owns exactly one mesh, which may be
/// placed any number of times.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ObjectId {
    Room,
    Desk,
    DeskLeg,
    Monitor,
    Laptop,
    Keyboard,
    Mouse,
    Book,
    Bed,
    Pyramid,
    Lamp,
}

impl ObjectId {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Selects the pipeline an object is drawn with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Material {
    /// Phong shaded with vertex colors.
    Lit,
    /// Flat light color, used for the lamp.
    Emissive,
}

/// CPU-side description of a scene: the meshes and where they are placed.
#[derive(Clone, Debug, Default)]
pub struct SceneDefinition {
    pub meshes: Vec<(ObjectId, CpuMesh)>,
    pub objects: Vec<RenderObject>,
}

impl SceneDefinition {
    pub fn add_mesh(&mut self, id: ObjectId, mesh: CpuMesh) {
        self.meshes.push((id, mesh));
    }

    pub fn place(&mut self, object: RenderObject) {
        self.objects.push(object);
    }

    pub fn mesh(&self, id: ObjectId) -> Option<&CpuMesh> {
        self.meshes.iter().find(|(mesh_id, _)| *mesh_id == id).map(|(_, mesh)| mesh)
    }

    /// Checks that meshes are unique, well formed and that every placement refers to one.
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = self.meshes.iter().map(|(id, _)| id).duplicates().next() {
            bail!("Mesh '{}' is registered twice", id.name());
        }
        for (id, mesh) in &self.meshes {
            if mesh.vertices.is_empty() {
                bail!("Mesh '{}' has no vertices", id.name());
            }
            if mesh.element_count() % 3 != 0 {
                bail!("Mesh '{}' is not a triangle list", id.name());
            }
        }
        for object in &self.objects {
            if self.mesh(object.object).is_none() {
                bail!("Object '{}' is placed but has no mesh", object.object.name());
            }
        }
        Ok(())
    }
}

/// A mesh uploaded to the GPU together with how to draw it.
pub struct SceneMesh {
    pub mesh: Mesh,
    pub draw_mode: DrawMode,
}

impl SceneMesh {
    /// Issues the draw. Pipeline and bind groups must already be set on the pass.
    pub fn draw(&self, pass: &mut wgpu::RenderPass) {
        pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        match (self.draw_mode, &self.mesh.index_buffer) {
            (DrawMode::Indexed, Some(index_buffer)) => {
                pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.mesh.index_count, 0, 0..1);
            }
            _ => {
                pass.draw(0..self.mesh.vertex_count, 0..1);
            }
        }
    }
}

/// The uploaded scene. Render objects are kept sorted by material so pipelines switch once.
pub struct Scene {
    meshes: AHashMap<ObjectId, SceneMesh>,
    pub objects: Vec<RenderObject>,
}

impl Scene {
    pub fn new(context: &GpuContext, definition: SceneDefinition) -> Result<Scene> {
        definition.validate()?;

        let mut meshes = AHashMap::new();
        for (id, cpu_mesh) in &definition.meshes {
            let mesh =
                Mesh::try_new(context, id.name(), &cpu_mesh.vertices, cpu_mesh.indices.as_deref())
                    .with_context(|| format!("Failed to upload mesh '{}'", id.name()))?;
            debug!(
                "Uploaded '{}': {} vertices, {} triangles ({:?})",
                id.name(),
                cpu_mesh.vertex_count(),
                cpu_mesh.triangle_count(),
                cpu_mesh.draw_mode(),
            );
            meshes.insert(
                *id,
                SceneMesh {
                    mesh,
                    draw_mode: cpu_mesh.draw_mode(),
                },
            );
        }

        let mut objects = definition.objects;
        objects.sort_by_key(|object| object.material);
        info!("Scene has {} meshes and {} objects", meshes.len(), objects.len());

        Ok(Scene { meshes, objects })
    }

    pub fn mesh(&self, id: ObjectId) -> Option<&SceneMesh> {
        self.meshes.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::Vertex3;
    use glam::Vec3;

    fn triangle() -> CpuMesh {
        CpuMesh::from_vertices(vec![Vertex3::default(); 3])
    }

    #[test]
    fn placement_without_mesh_is_rejected() {
        let mut definition = SceneDefinition::default();
        definition.add_mesh(ObjectId::Desk, triangle());
        definition.place(RenderObject::new(ObjectId::Desk, Vec3::ZERO));
        assert!(definition.validate().is_ok());

        definition.place(RenderObject::new(ObjectId::Bed, Vec3::ZERO));
        let err = definition.validate().unwrap_err();
        assert!(err.to_string().contains("bed"), "{err}");
    }

    #[test]
    fn duplicate_mesh_is_rejected() {
        let mut definition = SceneDefinition::default();
        definition.add_mesh(ObjectId::Book, triangle());
        definition.add_mesh(ObjectId::Book, triangle());
        assert!(definition.validate().is_err());
    }

    #[test]
    fn partial_triangle_is_rejected() {
        let mut definition = SceneDefinition::default();
        definition.add_mesh(ObjectId::Mouse, CpuMesh::from_vertices(vec![Vertex3::default(); 4]));
        assert!(definition.validate().is_err());
    }

    #[test]
    fn object_names_are_snake_case() {
        assert_eq!(ObjectId::DeskLeg.name(), "desk_leg");
        assert_eq!(ObjectId::Room.name(), "room");
    }
}
