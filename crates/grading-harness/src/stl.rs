//! STL import into [`TriMesh`] and export back out, binary and ASCII formats.
//!
//! Every facet becomes its own three vertices; no welding is done. Several
//! bodies in one file simply end up in the same mesh.

use std::path::Path;

use kernel_query::TriMesh;
use tracing::debug;

use crate::helpers::HarnessError;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

fn stl_err(reason: impl Into<String>) -> HarnessError {
    HarnessError::StlError { reason: reason.into() }
}

/// Read an STL file from disk.
pub fn load_stl(path: &Path) -> Result<TriMesh, HarnessError> {
    let data = std::fs::read(path).map_err(|e| HarnessError::io(path, e))?;
    let mesh = read_stl(&data)?;
    debug!(path = %path.display(), triangles = mesh.num_triangles(), "STL loaded");
    Ok(mesh)
}

/// Parse STL bytes, picking the format from the content.
pub fn read_stl(data: &[u8]) -> Result<TriMesh, HarnessError> {
    if is_ascii_stl(data) {
        read_ascii_stl(data)
    } else {
        read_binary_stl(data)
    }
}

/// A binary header may also start with `solid`, so the facet keyword and
/// the exact binary length are checked too.
fn is_ascii_stl(data: &[u8]) -> bool {
    let trimmed = data.iter().position(|b| !b.is_ascii_whitespace()).map_or(data, |i| &data[i..]);
    if !trimmed.starts_with(b"solid") {
        return false;
    }
    if data.len() >= HEADER_LEN + 4 {
        let count = u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize;
        if data.len() == HEADER_LEN + 4 + count * FACET_LEN {
            return false;
        }
    }
    let window = &data[..data.len().min(1024)];
    window.windows(5).any(|w| w == b"facet") || window.windows(8).any(|w| w == b"endsolid")
}

/// Parse a binary STL.
///
/// Binary STL format:
/// - 80-byte header (arbitrary text)
/// - u32 triangle count (little-endian)
/// - For each triangle: 3×f32 normal + 3×(3×f32 vertex) + u16 attribute = 50 bytes
pub fn read_binary_stl(data: &[u8]) -> Result<TriMesh, HarnessError> {
    if data.len() < HEADER_LEN + 4 {
        return Err(stl_err(format!("binary STL too short ({} bytes)", data.len())));
    }
    let tri_count = u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize;
    let expected = HEADER_LEN + 4 + tri_count * FACET_LEN;
    if data.len() < expected {
        return Err(stl_err(format!(
            "binary STL truncated: {} triangles need {} bytes, got {}",
            tri_count,
            expected,
            data.len()
        )));
    }

    let mut mesh = TriMesh {
        vertices: Vec::with_capacity(tri_count * 9),
        indices: Vec::with_capacity(tri_count * 3),
    };
    for facet in data[HEADER_LEN + 4..expected].chunks_exact(FACET_LEN) {
        // skip the stored normal, it is recomputed on export
        for corner in facet[12..48].chunks_exact(12) {
            for coord in corner.chunks_exact(4) {
                let value = f32::from_le_bytes([coord[0], coord[1], coord[2], coord[3]]);
                mesh.vertices.push(value as f64);
            }
            mesh.indices.push(mesh.indices.len() as u32);
        }
    }
    mesh.validate().map_err(|e| stl_err(e.to_string()))?;
    Ok(mesh)
}

/// Parse an ASCII STL. Multiple `solid ... endsolid` blocks are accepted.
pub fn read_ascii_stl(data: &[u8]) -> Result<TriMesh, HarnessError> {
    let text = std::str::from_utf8(data).map_err(|_| stl_err("ASCII STL is not valid UTF-8"))?;
    let mut mesh = TriMesh::new();
    let mut corners = 0usize;

    for (line_no, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("vertex") => {
                let coords: Vec<&str> = parts.collect();
                if coords.len() != 3 {
                    return Err(stl_err(format!("line {}: vertex needs 3 coordinates", line_no + 1)));
                }
                for c in coords {
                    let value: f64 = c
                        .parse()
                        .map_err(|_| stl_err(format!("line {}: bad coordinate {:?}", line_no + 1, c)))?;
                    mesh.vertices.push(value);
                }
                mesh.indices.push(mesh.indices.len() as u32);
                corners += 1;
            }
            Some("endloop") => {
                if corners != 3 {
                    return Err(stl_err(format!(
                        "line {}: facet has {} vertices, expected 3",
                        line_no + 1,
                        corners
                    )));
                }
                corners = 0;
            }
            _ => {}
        }
    }
    if corners != 0 {
        return Err(stl_err("ASCII STL ends inside a facet"));
    }
    mesh.validate().map_err(|e| stl_err(e.to_string()))?;
    Ok(mesh)
}

fn check_exportable(mesh: &TriMesh) -> Result<(), HarnessError> {
    if mesh.num_triangles() == 0 {
        return Err(stl_err("mesh has no triangles"));
    }
    mesh.validate().map_err(|e| stl_err(e.to_string()))
}

fn facet_normal(mesh: &TriMesh, t: usize) -> [f64; 3] {
    let [a, b, c] = mesh.triangle(t);
    let n = (b - a).cross(&(c - a));
    let len = n.norm();
    if len > 1e-12 {
        [n.x / len, n.y / len, n.z / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

/// Export a mesh as binary STL bytes.
pub fn export_binary_stl(mesh: &TriMesh, name: &str) -> Result<Vec<u8>, HarnessError> {
    check_exportable(mesh)?;
    let tri_count = mesh.num_triangles();
    let mut buf = Vec::with_capacity(HEADER_LEN + 4 + tri_count * FACET_LEN);

    let header = format!("binary STL: {}", name);
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(HEADER_LEN)]);
    buf.resize(HEADER_LEN, 0u8);
    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for t in 0..tri_count {
        for n in facet_normal(mesh, t) {
            buf.extend_from_slice(&(n as f32).to_le_bytes());
        }
        for v in mesh.triangle(t) {
            for coord in [v.x, v.y, v.z] {
                buf.extend_from_slice(&(coord as f32).to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }
    Ok(buf)
}

/// Export a mesh as ASCII STL text.
pub fn export_ascii_stl(mesh: &TriMesh, name: &str) -> Result<String, HarnessError> {
    check_exportable(mesh)?;
    let mut out = format!("solid {}\n", name);
    for t in 0..mesh.num_triangles() {
        let [nx, ny, nz] = facet_normal(mesh, t);
        out.push_str(&format!("  facet normal {:e} {:e} {:e}\n", nx, ny, nz));
        out.push_str("    outer loop\n");
        for v in mesh.triangle(t) {
            out.push_str(&format!("      vertex {:e} {:e} {:e}\n", v.x, v.y, v.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    out.push_str(&format!("endsolid {}\n", name));
    Ok(out)
}
