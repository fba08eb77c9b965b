use glam::Vec3;
use itertools::Itertools;
use strum::EnumIter;

use crate::engine::core::Vertex3;

pub type Rgb = [f32; 3];

/// Faces of an axis-aligned box, named by their outward normal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Face {
    pub fn normal(&self) -> Vec3 {
        match self {
            Face::PosX => Vec3::X,
            Face::NegX => Vec3::NEG_X,
            Face::PosY => Vec3::Y,
            Face::NegY => Vec3::NEG_Y,
            Face::PosZ => Vec3::Z,
            Face::NegZ => Vec3::NEG_Z,
        }
    }

    pub const ALL: [Face; 6] =
        [Face::PosX, Face::NegX, Face::PosY, Face::NegY, Face::PosZ, Face::NegZ];
    pub const SIDES: [Face; 4] = [Face::PosX, Face::NegX, Face::PosZ, Face::NegZ];

    /// Corners counter-clockwise when seen from outside the box.
    fn corners(&self, min: Vec3, max: Vec3) -> [Vec3; 4] {
        let (x0, y0, z0) = min.into();
        let (x1, y1, z1) = max.into();
        let v = Vec3::new;
        match self {
            Face::PosX => [v(x1, y0, z1), v(x1, y0, z0), v(x1, y1, z0), v(x1, y1, z1)],
            Face::NegX => [v(x0, y0, z0), v(x0, y0, z1), v(x0, y1, z1), v(x0, y1, z0)],
            Face::PosY => [v(x0, y1, z1), v(x1, y1, z1), v(x1, y1, z0), v(x0, y1, z0)],
            Face::NegY => [v(x0, y0, z0), v(x1, y0, z0), v(x1, y0, z1), v(x0, y0, z1)],
            Face::PosZ => [v(x0, y0, z1), v(x1, y0, z1), v(x1, y1, z1), v(x0, y1, z1)],
            Face::NegZ => [v(x1, y0, z0), v(x0, y0, z0), v(x0, y1, z0), v(x1, y1, z0)],
        }
    }
}

/// Per-face colors of a box: top, bottom and the four sides.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FaceColors {
    pub top: Rgb,
    pub bottom: Rgb,
    pub sides: Rgb,
}

impl FaceColors {
    pub fn uniform(color: Rgb) -> Self {
        Self {
            top: color,
            bottom: color,
            sides: color,
        }
    }

    pub fn get(&self, face: Face) -> Rgb {
        match face {
            Face::PosY => self.top,
            Face::NegY => self.bottom,
            _ => self.sides,
        }
    }
}

/// Two triangles (a, b, c) and (c, d, a) sharing one flat normal and color.
pub fn quad(corners: [[f32; 3]; 4], normal: [f32; 3], color: Rgb) -> [Vertex3; 6] {
    let [a, b, c, d] = corners;
    [a, b, c, c, d, a].map(|position| Vertex3::new(position, normal, color))
}

/// Like [`quad`], with the normal taken from the winding of a, b, c.
pub fn flat_quad(corners: [[f32; 3]; 4], color: Rgb) -> [Vertex3; 6] {
    let [a, b, c, _] = corners.map(Vec3::from);
    let normal = (b - a).cross(c - a).normalize();
    quad(corners, normal.to_array(), color)
}

/// Turns geometry inside out: flips normals and the winding of every triangle.
/// Used for enclosures seen from within, such as the room.
pub fn inverted(mut vertices: Vec<Vertex3>) -> Vec<Vertex3> {
    for triangle in vertices.chunks_exact_mut(3) {
        triangle.swap(1, 2);
        for vertex in triangle.iter_mut() {
            vertex.a_normal = vertex.a_normal.map(|c| -c);
        }
    }
    vertices
}

/// Axis-aligned box between `min` and `max`, emitting only `faces`.
pub fn cuboid(min: Vec3, max: Vec3, faces: &[Face], colors: FaceColors) -> Vec<Vertex3> {
    faces
        .iter()
        .flat_map(|face| {
            let corners = face.corners(min, max).map(|corner| corner.to_array());
            quad(corners, face.normal().to_array(), colors.get(*face))
        })
        .collect_vec()
}

/// Closed box with all six faces.
pub fn closed_cuboid(min: Vec3, max: Vec3, colors: FaceColors) -> Vec<Vertex3> {
    cuboid(min, max, &Face::ALL, colors)
}

/// Square-based pyramid standing on the XZ plane at the origin, apex on +Y.
pub fn pyramid(half_extent: f32, height: f32, color: Rgb) -> Vec<Vertex3> {
    let h = half_extent;
    let apex = Vec3::new(0.0, height, 0.0);
    // Base corners counter-clockwise seen from above.
    let base = [
        Vec3::new(-h, 0.0, h),
        Vec3::new(h, 0.0, h),
        Vec3::new(h, 0.0, -h),
        Vec3::new(-h, 0.0, -h),
    ];

    let mut vertices = Vec::with_capacity(18);
    for (a, b) in base.iter().circular_tuple_windows() {
        let normal = (*b - *a).cross(apex - *a).normalize();
        for position in [*a, *b, apex] {
            vertices.push(Vertex3::new(position.to_array(), normal.to_array(), color));
        }
    }

    let [a, b, c, d] = base;
    vertices.extend(quad(
        [d, c, b, a].map(|corner| corner.to_array()),
        Vec3::NEG_Y.to_array(),
        color,
    ));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn triangle_normal(vertices: &[Vertex3]) -> Vec3 {
        let [a, b, c] = [0, 1, 2].map(|i| Vec3::from(vertices[i].a_position));
        (b - a).cross(c - a).normalize()
    }

    #[test]
    fn quad_repeats_the_diagonal() {
        let corners = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]];
        let vertices = quad(corners, [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let positions = vertices.map(|v| v.a_position);
        assert_eq!(positions[2], positions[3]);
        assert_eq!(positions[0], positions[5]);
        assert!(vertices.iter().all(|v| v.a_color == [1.0, 0.0, 0.0]));
    }

    #[test]
    fn cuboid_faces_wind_towards_their_normals() {
        let min = Vec3::new(-1.0, -0.5, -0.25);
        let max = Vec3::new(2.0, 0.5, 0.75);
        for face in Face::iter() {
            let vertices = cuboid(min, max, &[face], FaceColors::uniform([0.5; 3]));
            assert_eq!(vertices.len(), 6);
            let winding = triangle_normal(&vertices[0..3]);
            assert!(winding.abs_diff_eq(face.normal(), 1e-6), "{face:?}: {winding}");
            assert!(vertices.iter().all(|v| Vec3::from(v.a_normal) == face.normal()));
        }
    }

    #[test]
    fn cuboid_colors_top_bottom_and_sides() {
        let colors = FaceColors {
            top: [1.0, 0.0, 0.0],
            bottom: [0.0, 1.0, 0.0],
            sides: [0.0, 0.0, 1.0],
        };
        let vertices = closed_cuboid(Vec3::ZERO, Vec3::ONE, colors);
        assert_eq!(vertices.len(), 36);
        for v in &vertices {
            let expected = if v.a_normal == [0.0, 1.0, 0.0] {
                colors.top
            } else if v.a_normal == [0.0, -1.0, 0.0] {
                colors.bottom
            } else {
                colors.sides
            };
            assert_eq!(v.a_color, expected);
        }
    }

    #[test]
    fn flat_quad_normal_follows_winding() {
        let corners = [[0.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, -1.0], [0.0, 1.0, 0.0]];
        let vertices = flat_quad(corners, [1.0; 3]);
        assert_eq!(vertices[0].a_normal, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn inverted_box_faces_inwards() {
        let colors = FaceColors::uniform([1.0; 3]);
        let vertices = inverted(closed_cuboid(-Vec3::ONE, Vec3::ONE, colors));
        for triangle in vertices.chunks(3) {
            let normal = Vec3::from(triangle[0].a_normal);
            let centroid = triangle.iter().map(|v| Vec3::from(v.a_position)).sum::<Vec3>() / 3.0;
            assert!(normal.dot(centroid) < 0.0);
            assert!(triangle_normal(triangle).abs_diff_eq(normal, 1e-6));
        }
    }

    #[test]
    fn pyramid_side_normals_point_outwards_and_up() {
        let vertices = pyramid(0.5, 1.0, [0.9, 0.7, 0.2]);
        assert_eq!(vertices.len(), 18);
        for side in vertices[..12].chunks(3) {
            let normal = Vec3::from(side[0].a_normal);
            assert!((normal.length() - 1.0).abs() < 1e-6);
            assert!(normal.y > 0.0);
            let centroid = side.iter().map(|v| Vec3::from(v.a_position)).sum::<Vec3>() / 3.0;
            assert!(normal.dot(centroid - Vec3::new(0.0, 0.25, 0.0)) > 0.0);
            assert!(triangle_normal(side).abs_diff_eq(normal, 1e-6));
        }
        assert!(vertices[12..].iter().all(|v| v.a_normal == [0.0, -1.0, 0.0]));
    }
}
