use glam::Vec3;

use super::furniture::FLOOR;
use crate::engine::geometry::shapes::{closed_cuboid, inverted, FaceColors};
use crate::engine::CpuMesh;

pub const ROOM_MIN: Vec3 = Vec3::new(-4.0, FLOOR, -3.0);
pub const ROOM_MAX: Vec3 = Vec3::new(4.0, 2.2, 4.0);

/// Floor, ceiling and walls as one box seen from inside.
pub fn room() -> CpuMesh {
    let colors = FaceColors {
        top: [0.9, 0.9, 0.85],
        bottom: [0.4, 0.3, 0.2],
        sides: [0.75, 0.72, 0.65],
    };
    inverted(closed_cuboid(ROOM_MIN, ROOM_MAX, colors)).into_iter().collect()
}

pub fn contains(point: Vec3) -> bool {
    const EPSILON: f32 = 1e-4;
    point.cmpge(ROOM_MIN - EPSILON).all() && point.cmple(ROOM_MAX + EPSILON).all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_faces_up_and_ceiling_faces_down() {
        let mesh = room();
        assert_eq!(mesh.vertex_count(), 36);
        for v in &mesh.vertices {
            let normal = Vec3::from(v.a_normal);
            let position = Vec3::from(v.a_position);
            if position.y == FLOOR && normal.y != 0.0 {
                assert_eq!(normal, Vec3::Y);
                assert_eq!(v.a_color, [0.4, 0.3, 0.2]);
            }
            if position.y == ROOM_MAX.y && normal.y != 0.0 {
                assert_eq!(normal, Vec3::NEG_Y);
            }
        }
    }

    #[test]
    fn camera_start_is_inside() {
        assert!(contains(Vec3::new(0.0, 1.0, 3.0)));
        assert!(!contains(Vec3::new(0.0, 1.0, 5.0)));
    }
}
