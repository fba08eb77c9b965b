use std::f32::consts::{FRAC_PI_2, PI, TAU};

use anyhow::{ensure, Result};

use super::shapes::Rgb;
use super::CpuMesh;
use crate::engine::core::{MeshIndex, Vertex3};

/// Upper bound on the index buffer of a single sphere.
pub const MAX_SPHERE_INDICES: u32 = 1 << 24;

/// Latitude/longitude tessellated sphere centred at the origin, poles on the Z axis.
///
/// Stack `i` runs from +90° (i = 0) to -90° (i = stacks), sector `j` from 0° up to but
/// excluding 360°, so every ring holds `sectors` vertices and the seam is closed by wrapping
/// indices rather than duplicating a column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UvSphere {
    radius: f32,
    sectors: u32,
    stacks: u32,
}

impl UvSphere {
    pub fn new(radius: f32, sectors: u32, stacks: u32) -> Result<Self> {
        ensure!(radius > 0.0, "Sphere radius must be positive, got {radius}");
        ensure!(sectors >= 3, "A sphere needs at least 3 sectors, got {sectors}");
        ensure!(stacks >= 2, "A sphere needs at least 2 stacks, got {stacks}");
        // Index count bounds the vertex count too: 6·S·(T−1) ≥ S·(T+1) for T ≥ 2.
        let index_count = sectors.checked_mul(stacks - 1).and_then(|quads| quads.checked_mul(6));
        ensure!(
            index_count.is_some_and(|count| count <= MAX_SPHERE_INDICES),
            "Sphere with {sectors} sectors and {stacks} stacks is too detailed"
        );
        Ok(Self {
            radius,
            sectors,
            stacks,
        })
    }

    pub fn vertex_count(&self) -> u32 {
        (self.stacks + 1) * self.sectors
    }

    /// The first and last stacks contribute one triangle per sector, the others two.
    pub fn triangle_count(&self) -> u32 {
        2 * self.sectors * (self.stacks - 1)
    }

    pub fn vertices(&self, color: Rgb) -> Vec<Vertex3> {
        let stack_step = PI / self.stacks as f32;
        let sector_step = TAU / self.sectors as f32;
        let inverse_radius = 1.0 / self.radius;

        let mut vertices = Vec::with_capacity(self.vertex_count() as usize);
        for i in 0..=self.stacks {
            let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
            let xy = self.radius * stack_angle.cos();
            let z = self.radius * stack_angle.sin();
            for j in 0..self.sectors {
                let sector_angle = j as f32 * sector_step;
                let position = [xy * sector_angle.cos(), xy * sector_angle.sin(), z];
                let normal = position.map(|c| c * inverse_radius);
                vertices.push(Vertex3::new(position, normal, color));
            }
        }
        vertices
    }

    pub fn indices(&self) -> Vec<MeshIndex> {
        let mut indices = Vec::with_capacity(self.triangle_count() as usize * 3);
        for i in 0..self.stacks {
            let k1 = i * self.sectors;
            let k2 = k1 + self.sectors;
            for j in 0..self.sectors {
                let next = (j + 1) % self.sectors;
                // Skip the triangle that would collapse onto the pole.
                if i != 0 {
                    indices.extend([k1 + j, k2 + j, k1 + next]);
                }
                if i != self.stacks - 1 {
                    indices.extend([k1 + next, k2 + j, k2 + next]);
                }
            }
        }
        indices
    }

    pub fn build(&self, color: Rgb) -> CpuMesh {
        CpuMesh::indexed(self.vertices(color), self.indices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::DrawMode;
    use glam::Vec3;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn vertex_count_and_radius() {
        for (radius, sectors, stacks) in [(1.0, 36, 18), (0.25, 3, 2), (7.5, 17, 9)] {
            let sphere = UvSphere::new(radius, sectors, stacks).unwrap();
            let vertices = sphere.vertices([1.0; 3]);
            assert_eq!(vertices.len() as u32, (stacks + 1) * sectors);
            for v in &vertices {
                let p = Vec3::from(v.a_position);
                assert!((p.length() - radius).abs() < EPSILON * radius, "{p}");
                let n = Vec3::from(v.a_normal);
                assert!(n.abs_diff_eq(p / radius, EPSILON), "{n} vs {p}");
            }
        }
    }

    #[test]
    fn index_range_and_triangle_count() {
        for (sectors, stacks) in [(36, 18), (3, 2), (8, 3), (64, 32)] {
            let sphere = UvSphere::new(1.0, sectors, stacks).unwrap();
            let indices = sphere.indices();
            assert_eq!(indices.len() % 3, 0);
            assert_eq!(indices.len() as u32 / 3, 2 * sectors * (stacks - 1));
            let max_index = (stacks + 1) * sectors - 1;
            assert!(indices.iter().all(|&i| i <= max_index));
        }
    }

    #[test]
    fn no_degenerate_triangles() {
        let sphere = UvSphere::new(2.0, 12, 6).unwrap();
        let vertices = sphere.vertices([1.0; 3]);
        for triangle in sphere.indices().chunks(3) {
            let [a, b, c] =
                [0, 1, 2].map(|k| Vec3::from(vertices[triangle[k] as usize].a_position));
            let area = (b - a).cross(c - a).length() * 0.5;
            assert!(area > 1e-4, "degenerate triangle {triangle:?}");
        }
    }

    #[test]
    fn poles_sit_on_the_z_axis() {
        let sphere = UvSphere::new(1.5, 10, 5).unwrap();
        let vertices = sphere.vertices([1.0; 3]);
        let north = Vec3::from(vertices[0].a_position);
        let south = Vec3::from(vertices.last().unwrap().a_position);
        assert!(north.abs_diff_eq(Vec3::new(0.0, 0.0, 1.5), EPSILON), "{north}");
        assert!(south.abs_diff_eq(Vec3::new(0.0, 0.0, -1.5), EPSILON), "{south}");
    }

    #[test]
    fn build_is_indexed() {
        let mesh = UvSphere::new(1.0, 8, 4).unwrap().build([0.5; 3]);
        assert_eq!(mesh.draw_mode(), DrawMode::Indexed);
        assert_eq!(mesh.triangle_count(), 2 * 8 * 3);
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(UvSphere::new(1.0, 2, 8).is_err());
        assert!(UvSphere::new(1.0, 8, 1).is_err());
        assert!(UvSphere::new(0.0, 8, 8).is_err());
    }

    #[test]
    fn rejects_oversized_tessellation() {
        assert!(UvSphere::new(1.0, 100_000, 100_000).is_err());
        assert!(UvSphere::new(1.0, u32::MAX, u32::MAX).is_err());
        assert!(UvSphere::new(1.0, 3, u32::MAX).is_err());
        assert!(UvSphere::new(1.0, 4096, 4096).is_err());
        assert!(UvSphere::new(1.0, 1024, 512).is_ok());
    }
}
