//! Closed triangle meshes of simple shapes, for mesh-distance tests and demos.

use std::f64::consts::TAU;

use crate::mesh::TriMesh;

/// Axis-aligned box with outward-facing triangles (12 triangles).
pub fn box_mesh(min: [f64; 3], max: [f64; 3]) -> TriMesh {
    let [x0, y0, z0] = min;
    let [x1, y1, z1] = max;
    let positions = [
        [x0, y0, z0],
        [x1, y0, z0],
        [x1, y1, z0],
        [x0, y1, z0],
        [x0, y0, z1],
        [x1, y0, z1],
        [x1, y1, z1],
        [x0, y1, z1],
    ];
    let triangles = [
        [0, 2, 1], [0, 3, 2], // bottom
        [4, 5, 6], [4, 6, 7], // top
        [0, 1, 5], [0, 5, 4], // front
        [2, 3, 7], [2, 7, 6], // back
        [0, 4, 7], [0, 7, 3], // left
        [1, 2, 6], [1, 6, 5], // right
    ];
    TriMesh::from_triangles(&positions, &triangles)
}

/// Capped cylinder standing on `base` along +Z.
pub fn cylinder_mesh(base: [f64; 3], radius: f64, height: f64, segments: u32) -> TriMesh {
    let segments = segments.max(3);
    let [cx, cy, cz] = base;
    let mut positions = Vec::with_capacity(2 * segments as usize + 2);
    for ring in 0..2 {
        let z = cz + height * ring as f64;
        for i in 0..segments {
            let a = TAU * i as f64 / segments as f64;
            positions.push([cx + radius * a.cos(), cy + radius * a.sin(), z]);
        }
    }
    let bottom_center = positions.len() as u32;
    positions.push([cx, cy, cz]);
    let top_center = bottom_center + 1;
    positions.push([cx, cy, cz + height]);

    let mut triangles = Vec::with_capacity(4 * segments as usize);
    for i in 0..segments {
        let j = (i + 1) % segments;
        let (b0, b1) = (i, j);
        let (t0, t1) = (i + segments, j + segments);
        triangles.push([b0, b1, t1]);
        triangles.push([b0, t1, t0]);
        triangles.push([bottom_center, b1, b0]);
        triangles.push([top_center, t0, t1]);
    }
    TriMesh::from_triangles(&positions, &triangles)
}
