//! The fixed study room: mesh registration and where every piece is placed.

mod furniture;
mod room;

use anyhow::Result;
use glam::Vec3;
use tracing::warn;

use crate::engine::geometry::sphere::UvSphere;
use crate::engine::{ObjectId, RenderObject, SceneDefinition};

pub const LAMP_RADIUS: f32 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneSettings {
    pub sphere_sectors: u32,
    pub sphere_stacks: u32,
    pub light_position: Vec3,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            sphere_sectors: 36,
            sphere_stacks: 18,
            light_position: Vec3::new(1.2, 1.0, 2.0),
        }
    }
}

fn register_meshes(definition: &mut SceneDefinition, settings: &SceneSettings) -> Result<()> {
    definition.add_mesh(ObjectId::Room, room::room());
    definition.add_mesh(ObjectId::Desk, furniture::desk());
    definition.add_mesh(ObjectId::DeskLeg, furniture::desk_leg());
    definition.add_mesh(ObjectId::Monitor, furniture::monitor());
    definition.add_mesh(ObjectId::Laptop, furniture::laptop());
    definition.add_mesh(ObjectId::Keyboard, furniture::keyboard());
    definition.add_mesh(ObjectId::Mouse, furniture::mouse());
    definition.add_mesh(ObjectId::Book, furniture::book());
    definition.add_mesh(ObjectId::Bed, furniture::bed());
    definition.add_mesh(ObjectId::Pyramid, furniture::ornament());

    let lamp = UvSphere::new(LAMP_RADIUS, settings.sphere_sectors, settings.sphere_stacks)?;
    definition.add_mesh(ObjectId::Lamp, lamp.build([1.0; 3]));
    Ok(())
}

fn place_objects(definition: &mut SceneDefinition) {
    let at = RenderObject::new;
    definition.place(at(ObjectId::Room, Vec3::ZERO));
    definition.place(at(ObjectId::Desk, Vec3::ZERO));
    for (x, z) in [(-1.3, 0.6), (1.3, 0.6), (-1.3, -0.6), (1.3, -0.6)] {
        definition.place(at(ObjectId::DeskLeg, Vec3::new(x, 0.0, z)));
    }
    definition.place(at(ObjectId::Monitor, Vec3::new(0.0, 0.0, -0.45)));
    definition.place(at(ObjectId::Laptop, Vec3::new(0.9, 0.0, 0.3)));
    definition.place(at(ObjectId::Keyboard, Vec3::new(0.0, 0.0, 0.45)));
    definition.place(at(ObjectId::Mouse, Vec3::new(0.3, 0.0, 0.45)));
    definition.place(at(ObjectId::Book, Vec3::new(-0.9, 0.0, 0.0)));
    definition.place(
        at(ObjectId::Book, Vec3::new(-0.9, 0.05, 0.0))
            .with_rotation(Vec3::new(0.0, 0.3, 0.0))
            .with_scale(Vec3::new(0.9, 1.0, 0.9))
            .with_tint([0.6, 0.7, 1.0, 1.0]),
    );
    definition.place(at(ObjectId::Bed, Vec3::new(-2.8, furniture::FLOOR, -1.9)));
    definition.place(at(ObjectId::Pyramid, Vec3::new(2.8, furniture::FLOOR, -2.0)));
    definition.place(at(ObjectId::Lamp, Vec3::ZERO).emissive_at_light());
}

/// Builds the study room scene and checks it is consistent.
pub fn study_room(settings: &SceneSettings) -> Result<SceneDefinition> {
    let mut definition = SceneDefinition::default();
    register_meshes(&mut definition, settings)?;
    place_objects(&mut definition);
    definition.validate()?;
    if !room::contains(settings.light_position) {
        warn!("Light at {} is outside the room", settings.light_position);
    }
    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::DrawMode;
    use strum::IntoEnumIterator;

    #[test]
    fn every_object_is_registered_and_placed() {
        let definition = study_room(&SceneSettings::default()).unwrap();
        for id in ObjectId::iter() {
            assert!(definition.mesh(id).is_some(), "{} has no mesh", id.name());
            assert!(
                definition.objects.iter().any(|o| o.object == id),
                "{} is never placed",
                id.name()
            );
        }
        let legs = definition.objects.iter().filter(|o| o.object == ObjectId::DeskLeg);
        assert_eq!(legs.count(), 4);
    }

    #[test]
    fn meshes_are_triangle_lists_with_unit_normals() {
        let definition = study_room(&SceneSettings::default()).unwrap();
        for (id, mesh) in &definition.meshes {
            if mesh.draw_mode() == DrawMode::Triangles {
                assert_eq!(mesh.vertex_count() % 3, 0, "{}", id.name());
            }
            for v in &mesh.vertices {
                let length = Vec3::from(v.a_normal).length();
                assert!((length - 1.0).abs() < 1e-5, "{}: {length}", id.name());
            }
        }
    }

    #[test]
    fn everything_fits_inside_the_room() {
        let settings = SceneSettings::default();
        let definition = study_room(&settings).unwrap();
        for object in &definition.objects {
            let world_from_model = object.world_from_model(settings.light_position);
            let mesh = definition.mesh(object.object).unwrap();
            for v in &mesh.vertices {
                let p = world_from_model.transform_point3(Vec3::from(v.a_position));
                assert!(room::contains(p), "{} sticks out at {p}", object.object.name());
            }
        }
    }

    #[test]
    fn only_the_lamp_is_emissive() {
        let definition = study_room(&SceneSettings::default()).unwrap();
        for object in &definition.objects {
            assert_eq!(object.attached_to_light, object.object == ObjectId::Lamp);
        }
    }

    #[test]
    fn lamp_resolution_follows_settings() {
        let settings = SceneSettings {
            sphere_sectors: 8,
            sphere_stacks: 4,
            ..Default::default()
        };
        let definition = study_room(&settings).unwrap();
        let lamp = definition.mesh(ObjectId::Lamp).unwrap();
        assert_eq!(lamp.vertex_count(), 5 * 8);
        assert!(study_room(&SceneSettings { sphere_sectors: 2, ..settings }).is_err());
        let oversized = SceneSettings {
            sphere_sectors: 100_000,
            sphere_stacks: 100_000,
            ..settings
        };
        assert!(study_room(&oversized).is_err());
    }
}
