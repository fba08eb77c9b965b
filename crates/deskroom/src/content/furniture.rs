//! Hand-authored furniture. Every piece is modelled around its own origin with the desk
//! surface at y = -0.1, so pieces standing on the desk only need an XZ offset.

use glam::Vec3;

use crate::engine::geometry::shapes::{
    closed_cuboid, cuboid, flat_quad, pyramid, quad, Face, FaceColors, Rgb,
};
use crate::engine::CpuMesh;

/// Height of the desk surface in model space.
pub const DESK_SURFACE: f32 = -0.1;
/// Height of the desk underside, where the legs end.
pub const DESK_UNDERSIDE: f32 = -0.15;
/// Height of the room floor.
pub const FLOOR: f32 = -0.8;

const WOOD: FaceColors = FaceColors {
    top: [0.55, 0.27, 0.07],
    bottom: [0.45, 0.20, 0.05],
    sides: [0.50, 0.25, 0.06],
};
const LEG: Rgb = [0.35, 0.18, 0.04];
const BEZEL: Rgb = [0.3, 0.3, 0.3];
const SCREEN: Rgb = [0.05, 0.05, 0.05];
const SILVER: FaceColors = FaceColors {
    top: [0.8, 0.8, 0.8],
    bottom: [0.7, 0.7, 0.7],
    sides: [0.7, 0.7, 0.7],
};
const COVER: Rgb = [0.8, 0.1, 0.1];
const PAGES: Rgb = [0.9, 0.9, 0.9];
const GOLD: Rgb = [0.85, 0.65, 0.13];

fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

pub fn desk() -> CpuMesh {
    closed_cuboid(v(-1.5, DESK_UNDERSIDE, -0.8), v(1.5, DESK_SURFACE, 0.8), WOOD)
        .into_iter()
        .collect()
}

/// Open-ended square post from the floor to the desk underside.
pub fn desk_leg() -> CpuMesh {
    let colors = FaceColors::uniform(LEG);
    cuboid(v(-0.05, FLOOR, -0.05), v(0.05, DESK_UNDERSIDE, 0.05), &Face::SIDES, colors)
        .into_iter()
        .collect()
}

/// Bezel with a screen facing +Z, on a stand and base plate.
pub fn monitor() -> CpuMesh {
    let mut mesh = CpuMesh::default();
    let bezel = FaceColors::uniform(BEZEL);
    mesh.extend(closed_cuboid(v(-0.32, -0.02, -0.05), v(0.32, 0.42, -0.03), bezel));
    mesh.extend(quad(
        [[-0.3, 0.0, -0.029], [0.3, 0.0, -0.029], [0.3, 0.4, -0.029], [-0.3, 0.4, -0.029]],
        [0.0, 0.0, 1.0],
        SCREEN,
    ));
    let stand = FaceColors::uniform([0.2, 0.2, 0.2]);
    mesh.extend(cuboid(v(-0.05, DESK_SURFACE, -0.07), v(0.05, -0.02, -0.05), &Face::SIDES, stand));
    mesh.extend(closed_cuboid(v(-0.15, DESK_SURFACE, -0.15), v(0.15, -0.09, 0.05), stand));
    mesh
}

/// Base on the desk with the lid hinged at the back edge and tilted away from the viewer.
pub fn laptop() -> CpuMesh {
    let mut mesh = CpuMesh::default();
    let (hinge_y, hinge_z) = (-0.08, -0.55);
    let (top_y, top_z) = (0.25, -0.7);
    mesh.extend(closed_cuboid(v(-0.25, DESK_SURFACE, hinge_z), v(0.25, hinge_y, -0.35), SILVER));
    // Screen side of the lid faces the user.
    mesh.extend(flat_quad(
        [
            [-0.25, hinge_y, hinge_z],
            [0.25, hinge_y, hinge_z],
            [0.25, top_y, top_z],
            [-0.25, top_y, top_z],
        ],
        SCREEN,
    ));
    let back = -0.01;
    mesh.extend(flat_quad(
        [
            [0.25, hinge_y, hinge_z + back],
            [-0.25, hinge_y, hinge_z + back],
            [-0.25, top_y, top_z + back],
            [0.25, top_y, top_z + back],
        ],
        SILVER.top,
    ));
    mesh
}

pub fn keyboard() -> CpuMesh {
    let colors = FaceColors {
        top: [0.15, 0.15, 0.15],
        bottom: [0.1, 0.1, 0.1],
        sides: [0.12, 0.12, 0.12],
    };
    closed_cuboid(v(-0.15, DESK_SURFACE, -0.35), v(0.15, -0.09, -0.15), colors)
        .into_iter()
        .collect()
}

pub fn mouse() -> CpuMesh {
    let colors = FaceColors {
        top: [0.2, 0.2, 0.2],
        bottom: [0.1, 0.1, 0.1],
        sides: [0.15, 0.15, 0.15],
    };
    closed_cuboid(v(-0.03, DESK_SURFACE, -0.08), v(0.03, -0.085, -0.03), colors)
        .into_iter()
        .collect()
}

/// Closed book lying flat: cover on top, bottom and spine, pages on the other sides.
pub fn book() -> CpuMesh {
    let (min, max) = (v(-0.15, DESK_SURFACE, 0.2), v(0.15, -0.05, 0.4));
    let cover = FaceColors::uniform(COVER);
    let pages = FaceColors::uniform(PAGES);
    let mut mesh = CpuMesh::default();
    mesh.extend(cuboid(min, max, &[Face::PosY, Face::NegY, Face::NegX], cover));
    mesh.extend(cuboid(min, max, &[Face::PosX, Face::PosZ, Face::NegZ], pages));
    mesh
}

/// Single bed standing on the floor at its origin, headboard towards -Z.
pub fn bed() -> CpuMesh {
    let frame = FaceColors::uniform([0.4, 0.25, 0.12]);
    let mattress = FaceColors {
        top: [0.85, 0.85, 0.9],
        bottom: [0.7, 0.7, 0.75],
        sides: [0.8, 0.8, 0.85],
    };
    let pillow = FaceColors::uniform([0.95, 0.95, 0.95]);
    let mut mesh = CpuMesh::default();
    mesh.extend(closed_cuboid(v(-1.0, 0.0, -1.0), v(1.0, 0.3, 1.0), frame));
    mesh.extend(closed_cuboid(v(-0.95, 0.3, -0.95), v(0.95, 0.5, 0.95), mattress));
    mesh.extend(closed_cuboid(v(-0.6, 0.5, -0.9), v(0.6, 0.6, -0.6), pillow));
    mesh.extend(closed_cuboid(v(-1.0, 0.0, -1.08), v(1.0, 0.9, -1.0), frame));
    mesh
}

pub fn ornament() -> CpuMesh {
    pyramid(0.4, 0.8, GOLD).into_iter().collect()
}
