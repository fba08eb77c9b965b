//! CPU-side meshes and the builders used to author them.
//!
//! Everything here is plain data; `engine::core::mesh::Mesh` uploads it.

pub mod shapes;
pub mod sphere;

use super::core::{MeshIndex, Vertex3};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawMode {
    /// Every three vertices form a triangle.
    Triangles,
    /// Triangle list addressed through the index buffer.
    Indexed,
}

#[derive(Clone, Debug, Default)]
pub struct CpuMesh {
    pub vertices: Vec<Vertex3>,
    pub indices: Option<Vec<MeshIndex>>,
}

impl CpuMesh {
    pub fn from_vertices(vertices: Vec<Vertex3>) -> Self {
        Self {
            vertices,
            indices: None,
        }
    }

    pub fn indexed(vertices: Vec<Vertex3>, indices: Vec<MeshIndex>) -> Self {
        Self {
            vertices,
            indices: Some(indices),
        }
    }

    pub fn draw_mode(&self) -> DrawMode {
        if self.indices.is_some() {
            DrawMode::Indexed
        } else {
            DrawMode::Triangles
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Number of elements a draw call consumes: indices for indexed meshes, vertices otherwise.
    pub fn element_count(&self) -> u32 {
        match &self.indices {
            Some(indices) => indices.len() as u32,
            None => self.vertex_count(),
        }
    }

    pub fn triangle_count(&self) -> u32 {
        self.element_count() / 3
    }

    /// Appends raw triangle-list vertices. Only valid for non-indexed meshes.
    pub fn extend(&mut self, vertices: impl IntoIterator<Item = Vertex3>) {
        debug_assert!(self.indices.is_none(), "extend on an indexed mesh");
        self.vertices.extend(vertices);
    }
}

impl FromIterator<Vertex3> for CpuMesh {
    fn from_iter<T: IntoIterator<Item = Vertex3>>(iter: T) -> Self {
        CpuMesh::from_vertices(iter.into_iter().collect())
    }
}
