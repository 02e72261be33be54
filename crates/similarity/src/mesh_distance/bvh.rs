//! Bounding volume hierarchy over mesh triangles for closest-point queries.
//!
//! Built top-down by median split along the longest centroid axis. Queries
//! descend nearer children first and prune boxes farther than the best
//! distance found so far.

use kernel_query::TriMesh;
use nalgebra::Vector3;

type Triangle = [Vector3<f64>; 3];

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl Aabb {
    fn empty() -> Self {
        Self {
            min: Vector3::repeat(f64::INFINITY),
            max: Vector3::repeat(f64::NEG_INFINITY),
        }
    }

    fn grow(&mut self, p: &Vector3<f64>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    fn of_triangle(tri: &Triangle) -> Self {
        let mut b = Self::empty();
        for p in tri {
            b.grow(p);
        }
        b
    }

    fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Squared distance from `p` to the box (zero inside).
    pub fn distance_squared(&self, p: &Vector3<f64>) -> f64 {
        let d = (self.min - p).sup(&Vector3::zeros()).sup(&(p - self.max));
        d.norm_squared()
    }
}

/// A BVH node: a leaf owns a run of triangles, an internal node two children.
#[derive(Debug, Clone)]
pub enum BvhNode {
    Leaf {
        aabb: Aabb,
        start: usize,
        count: usize,
    },
    Internal {
        aabb: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    fn aabb(&self) -> &Aabb {
        match self {
            BvhNode::Leaf { aabb, .. } | BvhNode::Internal { aabb, .. } => aabb,
        }
    }
}

/// Triangle hierarchy answering unsigned closest-point distance queries.
#[derive(Debug, Clone)]
pub struct TriangleBvh {
    root: Option<BvhNode>,
    triangles: Vec<Triangle>,
}

impl TriangleBvh {
    pub fn build(mesh: &TriMesh, leaf_size: usize) -> Self {
        let leaf_size = leaf_size.max(1);
        let mut items: Vec<(Triangle, Aabb, Vector3<f64>)> = (0..mesh.num_triangles())
            .map(|t| {
                let tri = mesh.triangle(t);
                let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
                (tri, Aabb::of_triangle(&tri), centroid)
            })
            .collect();

        let root = if items.is_empty() {
            None
        } else {
            let n = items.len();
            Some(build_node(&mut items, 0, n, leaf_size))
        };
        let triangles = items.into_iter().map(|(tri, _, _)| tri).collect();
        Self { root, triangles }
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Distance from `p` to the nearest point on any triangle.
    /// `None` for an empty hierarchy.
    pub fn closest_distance(&self, p: &Vector3<f64>) -> Option<f64> {
        let root = self.root.as_ref()?;
        let mut best = f64::INFINITY;
        self.visit(root, p, &mut best);
        Some(best.sqrt())
    }

    fn visit(&self, node: &BvhNode, p: &Vector3<f64>, best: &mut f64) {
        match node {
            BvhNode::Leaf { start, count, .. } => {
                for tri in &self.triangles[*start..*start + *count] {
                    let q = closest_point_on_triangle(p, tri);
                    let d = (q - p).norm_squared();
                    if d < *best {
                        *best = d;
                    }
                }
            }
            BvhNode::Internal { left, right, .. } => {
                let dl = left.aabb().distance_squared(p);
                let dr = right.aabb().distance_squared(p);
                let (near, d_near, far, d_far) = if dl <= dr {
                    (left, dl, right, dr)
                } else {
                    (right, dr, left, dl)
                };
                if d_near < *best {
                    self.visit(near, p, best);
                }
                if d_far < *best {
                    self.visit(far, p, best);
                }
            }
        }
    }
}

fn build_node(items: &mut [(Triangle, Aabb, Vector3<f64>)], start: usize, end: usize, leaf_size: usize) -> BvhNode {
    let slice = &mut items[start..end];
    let aabb = slice
        .iter()
        .skip(1)
        .fold(slice[0].1, |acc, (_, b, _)| acc.union(b));

    if slice.len() <= leaf_size {
        return BvhNode::Leaf {
            aabb,
            start,
            count: slice.len(),
        };
    }

    let mut centroids = Aabb::empty();
    for (_, _, c) in slice.iter() {
        centroids.grow(c);
    }
    let extent = centroids.max - centroids.min;
    let axis = extent.imax();

    let mid = slice.len() / 2;
    slice.select_nth_unstable_by(mid, |a, b| a.2[axis].total_cmp(&b.2[axis]));

    let left = build_node(items, start, start + mid, leaf_size);
    let right = build_node(items, start + mid, end, leaf_size);
    BvhNode::Internal {
        aabb,
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// Closest point to `p` on triangle `tri` (Voronoi-region walk).
pub fn closest_point_on_triangle(p: &Vector3<f64>, tri: &Triangle) -> Vector3<f64> {
    let [a, b, c] = tri;
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return *a;
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return *b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return *c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = va + vb + vc;
    if denom.abs() < f64::MIN_POSITIVE {
        // degenerate triangle: fall back to the nearest corner
        return *[a, b, c]
            .into_iter()
            .min_by(|x, y| (*x - p).norm_squared().total_cmp(&(*y - p).norm_squared()))
            .unwrap_or(a);
    }
    let v = vb / denom;
    let w = vc / denom;
    a + ab * v + ac * w
}
