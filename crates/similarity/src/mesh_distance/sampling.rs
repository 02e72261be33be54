use kernel_query::TriMesh;
use nalgebra::Vector3;

use crate::error::ScoreError;

/// SplitMix64: small, seedable and stable across platforms.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// `count` points distributed uniformly by area over the mesh surface.
pub fn sample_surface(mesh: &TriMesh, count: usize, seed: u64) -> Result<Vec<Vector3<f64>>, ScoreError> {
    let mut cumulative = Vec::with_capacity(mesh.num_triangles());
    let mut total = 0.0;
    for t in 0..mesh.num_triangles() {
        total += mesh.triangle_area(t);
        cumulative.push(total);
    }
    if total <= 0.0 || !total.is_finite() {
        return Err(ScoreError::Geometry {
            reason: format!("cannot sample a mesh with surface area {}", total),
        });
    }

    let mut rng = SplitMix64::new(seed);
    let last = cumulative.len() - 1;
    let points = (0..count)
        .map(|_| {
            let target = rng.next_f64() * total;
            let t = cumulative.partition_point(|&c| c <= target).min(last);
            let [a, b, c] = mesh.triangle(t);
            let (mut r1, mut r2) = (rng.next_f64(), rng.next_f64());
            if r1 + r2 > 1.0 {
                r1 = 1.0 - r1;
                r2 = 1.0 - r2;
            }
            a + (b - a) * r1 + (c - a) * r2
        })
        .collect();
    Ok(points)
}
