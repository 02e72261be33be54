//! Triangle mesh as handed over by the mesh library.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::types::KernelError;

/// Indexed triangle mesh. May be non-watertight and may hold several bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriMesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f64>,
    /// Triangle indices into the vertex array, three per triangle.
    pub indices: Vec<u32>,
}

impl TriMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit position and triangle lists.
    pub fn from_triangles(positions: &[[f64; 3]], triangles: &[[u32; 3]]) -> Self {
        Self {
            vertices: positions.iter().flatten().copied().collect(),
            indices: triangles.iter().flatten().copied().collect(),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn vertex(&self, idx: u32) -> Vector3<f64> {
        let i = idx as usize * 3;
        Vector3::new(self.vertices[i], self.vertices[i + 1], self.vertices[i + 2])
    }

    /// Corner positions of triangle `t`.
    pub fn triangle(&self, t: usize) -> [Vector3<f64>; 3] {
        let i = t * 3;
        [
            self.vertex(self.indices[i]),
            self.vertex(self.indices[i + 1]),
            self.vertex(self.indices[i + 2]),
        ]
    }

    pub fn triangle_area(&self, t: usize) -> f64 {
        let [a, b, c] = self.triangle(t);
        0.5 * (b - a).cross(&(c - a)).norm()
    }

    pub fn surface_area(&self) -> f64 {
        (0..self.num_triangles()).map(|t| self.triangle_area(t)).sum()
    }

    /// Append another mesh, re-basing its indices.
    pub fn merge(&mut self, other: &TriMesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Concatenate several bodies into one mesh.
    pub fn concatenate<'a>(meshes: impl IntoIterator<Item = &'a TriMesh>) -> TriMesh {
        let mut out = TriMesh::new();
        for m in meshes {
            out.merge(m);
        }
        out
    }

    /// Copy translated by `offset`.
    pub fn translated(&self, offset: [f64; 3]) -> TriMesh {
        let mut out = self.clone();
        for (i, v) in out.vertices.iter_mut().enumerate() {
            *v += offset[i % 3];
        }
        out
    }

    /// Check array shapes, index ranges and coordinate finiteness.
    pub fn validate(&self) -> Result<(), KernelError> {
        if self.vertices.len() % 3 != 0 {
            return Err(KernelError::InvalidMesh {
                reason: format!("vertex array length {} is not a multiple of 3", self.vertices.len()),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(KernelError::InvalidMesh {
                reason: format!("index array length {} is not a multiple of 3", self.indices.len()),
            });
        }
        let vertex_count = self.num_vertices();
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(KernelError::InvalidMesh {
                reason: format!("index {} out of range (vertex count = {})", bad, vertex_count),
            });
        }
        if self.vertices.iter().any(|v| !v.is_finite()) {
            return Err(KernelError::InvalidMesh {
                reason: "non-finite vertex coordinate".to_string(),
            });
        }
        Ok(())
    }

    /// Axis-aligned bounds of all referenced vertices, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for p in self.vertices.chunks(3) {
            for k in 0..3 {
                min[k] = min[k].min(p[k]);
                max[k] = max[k].max(p[k]);
            }
        }
        Some((min, max))
    }
}
