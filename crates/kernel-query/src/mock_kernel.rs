//! MockSolid: deterministic analytic test double implementing SolidQuery.
//!
//! Solids are assembled from planar, cylindrical and spherical face patches
//! with known parameters, volume and bounds. Used by the extractor and the
//! end-to-end grading tests in place of a real BREP kernel.

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::traits::{SolidQuery, SurfaceQuery};
use crate::types::*;

const EPS: f64 = 1e-12;

/// Analytic surface underneath a mock face.
#[derive(Debug, Clone)]
pub enum MockSurface {
    /// `P(u, v) = origin + u * u_axis + v * v_axis`.
    Plane {
        origin: Vector3<f64>,
        u_axis: Vector3<f64>,
        v_axis: Vector3<f64>,
    },
    /// `P(u, v) = location + r * (cos u * ref_dir + sin u * (axis x ref_dir)) + v * axis`.
    Cylinder {
        location: Vector3<f64>,
        axis: Vector3<f64>,
        ref_dir: Vector3<f64>,
        radius: f64,
    },
    /// `P(u, v) = center + r * (cos v cos u, cos v sin u, sin v)`.
    Sphere { center: Vector3<f64>, radius: f64 },
}

/// A mock face: surface, orientation and trimmed parameter domain.
#[derive(Debug, Clone)]
pub struct MockFace {
    pub id: FaceId,
    pub surface: MockSurface,
    pub orientation: FaceOrientation,
    pub bounds: ParamBounds,
}

impl SurfaceQuery for MockFace {
    fn surface_kind(&self) -> SurfaceKind {
        match self.surface {
            MockSurface::Plane { .. } => SurfaceKind::Plane,
            MockSurface::Cylinder { .. } => SurfaceKind::Cylinder,
            MockSurface::Sphere { .. } => SurfaceKind::Sphere,
        }
    }

    fn cylinder(&self) -> Option<CylinderFrame> {
        match &self.surface {
            MockSurface::Cylinder {
                location,
                axis,
                radius,
                ..
            } => Some(CylinderFrame {
                radius: *radius,
                location: (*location).into(),
                direction: (*axis).into(),
            }),
            _ => None,
        }
    }

    fn parametric_bounds(&self) -> ParamBounds {
        self.bounds
    }

    fn point_at(&self, u: f64, v: f64) -> [f64; 3] {
        let p = match &self.surface {
            MockSurface::Plane {
                origin,
                u_axis,
                v_axis,
            } => origin + u_axis * u + v_axis * v,
            MockSurface::Cylinder {
                location,
                axis,
                ref_dir,
                radius,
            } => {
                let y_dir = axis.cross(ref_dir);
                location + (ref_dir * u.cos() + y_dir * u.sin()) * *radius + axis * v
            }
            MockSurface::Sphere { center, radius } => {
                center
                    + Vector3::new(v.cos() * u.cos(), v.cos() * u.sin(), v.sin()) * *radius
            }
        };
        p.into()
    }

    fn normal_at(&self, u: f64, v: f64) -> Option<[f64; 3]> {
        let n = match &self.surface {
            MockSurface::Plane { u_axis, v_axis, .. } => u_axis.cross(v_axis),
            MockSurface::Cylinder {
                axis,
                ref_dir,
                radius,
                ..
            } => {
                if *radius < EPS {
                    return None;
                }
                let y_dir = axis.cross(ref_dir);
                ref_dir * u.cos() + y_dir * u.sin()
            }
            MockSurface::Sphere { radius, .. } => {
                if *radius < EPS {
                    return None;
                }
                Vector3::new(v.cos() * u.cos(), v.cos() * u.sin(), v.sin())
            }
        };
        let len = n.norm();
        if len < EPS {
            None
        } else {
            Some((n / len).into())
        }
    }

    fn orientation(&self) -> FaceOrientation {
        self.orientation
    }
}

/// A synthetic solid with deterministic faces, volume and bounds.
#[derive(Debug, Clone)]
pub struct MockSolid {
    name: String,
    faces: Vec<MockFace>,
    volume: f64,
    bbox: Option<([f64; 3], [f64; 3])>,
}

impl MockSolid {
    pub fn builder(name: &str) -> MockSolidBuilder {
        MockSolidBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn faces(&self) -> &[MockFace] {
        &self.faces
    }
}

impl SolidQuery for MockSolid {
    fn list_faces(&self) -> Vec<FaceId> {
        self.faces.iter().map(|f| f.id).collect()
    }

    fn face_surface(&self, face: FaceId) -> Result<Box<dyn SurfaceQuery + '_>, KernelError> {
        self.faces
            .iter()
            .find(|f| f.id == face)
            .map(|f| Box::new(f.clone()) as Box<dyn SurfaceQuery + '_>)
            .ok_or(KernelError::FaceNotFound { id: face })
    }

    fn volume(&self) -> Result<f64, KernelError> {
        if self.faces.is_empty() {
            return Err(KernelError::EmptySolid {
                name: self.name.clone(),
            });
        }
        Ok(self.volume)
    }

    fn bounding_box(&self) -> Result<([f64; 3], [f64; 3]), KernelError> {
        if self.faces.is_empty() {
            return Err(KernelError::EmptySolid {
                name: self.name.clone(),
            });
        }
        self.bbox.ok_or_else(|| KernelError::MassPropertiesFailed {
            reason: format!("no bounded faces in {}", self.name),
        })
    }
}

/// Fluent builder for [`MockSolid`].
#[derive(Debug, Clone)]
pub struct MockSolidBuilder {
    name: String,
    next_id: u64,
    faces: Vec<MockFace>,
    volume: f64,
    volume_override: Option<f64>,
    bbox: Option<([f64; 3], [f64; 3])>,
}

impl MockSolidBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            next_id: 1,
            faces: Vec::new(),
            volume: 0.0,
            volume_override: None,
            bbox: None,
        }
    }

    fn push_face(&mut self, surface: MockSurface, orientation: FaceOrientation, bounds: ParamBounds) {
        let id = FaceId(self.next_id);
        self.next_id += 1;
        self.faces.push(MockFace {
            id,
            surface,
            orientation,
            bounds,
        });
    }

    fn grow_bbox(&mut self, min: [f64; 3], max: [f64; 3]) {
        self.bbox = Some(match self.bbox {
            None => (min, max),
            Some((lo, hi)) => (
                [lo[0].min(min[0]), lo[1].min(min[1]), lo[2].min(min[2])],
                [hi[0].max(max[0]), hi[1].max(max[1]), hi[2].max(max[2])],
            ),
        });
    }

    fn plane(&mut self, origin: [f64; 3], u_axis: [f64; 3], v_axis: [f64; 3], u_len: f64, v_len: f64) {
        self.push_face(
            MockSurface::Plane {
                origin: origin.into(),
                u_axis: u_axis.into(),
                v_axis: v_axis.into(),
            },
            FaceOrientation::Forward,
            ParamBounds::new((0.0, u_len), (0.0, v_len)),
        );
    }

    /// Axis-aligned block: six planar faces with outward normals.
    pub fn block(mut self, min: [f64; 3], max: [f64; 3]) -> Self {
        let [x0, y0, z0] = min;
        let [x1, y1, z1] = max;
        let (dx, dy, dz) = (x1 - x0, y1 - y0, z1 - z0);
        // u x v points outward on every face
        self.plane([x0, y0, z0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0], dy, dx); // bottom
        self.plane([x0, y0, z1], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], dx, dy); // top
        self.plane([x0, y0, z0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0], dx, dz); // front
        self.plane([x0, y1, z0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0], dz, dx); // back
        self.plane([x0, y0, z0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0], dz, dy); // left
        self.plane([x1, y0, z0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], dy, dz); // right
        self.volume += dx * dy * dz;
        self.grow_bbox(min, max);
        self
    }

    /// Raw cylindrical face patch. `direction` is stored as given so
    /// degenerate axes can be modeled.
    pub fn cylinder_face(
        mut self,
        location: [f64; 3],
        direction: [f64; 3],
        radius: f64,
        u_range: (f64, f64),
        v_range: (f64, f64),
        orientation: FaceOrientation,
    ) -> Self {
        let axis: Vector3<f64> = direction.into();
        let ref_dir = perpendicular(&axis);
        let face_idx = self.faces.len();
        self.push_face(
            MockSurface::Cylinder {
                location: location.into(),
                axis,
                ref_dir,
                radius,
            },
            orientation,
            ParamBounds::new(u_range, v_range),
        );
        if let Some((lo, hi)) = sampled_bounds(&self.faces[face_idx]) {
            self.grow_bbox(lo, hi);
        }
        self
    }

    /// Concave cylindrical hole of `depth` along `axis` starting at `location`.
    ///
    /// Split into two half-cylinder faces the way periodic surfaces come out
    /// of real kernels; the second half's frame sits further along the axis.
    pub fn hole(mut self, location: [f64; 3], axis: [f64; 3], diameter: f64, depth: f64) -> Self {
        let r = diameter / 2.0;
        let a = unit(axis);
        let half_loc: [f64; 3] = (Vector3::from(location) + a * (depth / 2.0)).into();
        self = self.cylinder_face(location, a.into(), r, (0.0, PI), (0.0, depth), FaceOrientation::Reversed);
        self = self.cylinder_face(
            half_loc,
            a.into(),
            r,
            (PI, 2.0 * PI),
            (-depth / 2.0, depth / 2.0),
            FaceOrientation::Reversed,
        );
        self.volume -= PI * r * r * depth;
        self
    }

    /// Convex cylindrical pin of `height` along `axis` standing on `location`.
    pub fn pin(mut self, location: [f64; 3], axis: [f64; 3], diameter: f64, height: f64) -> Self {
        let r = diameter / 2.0;
        let a = unit(axis);
        self = self.cylinder_face(location, a.into(), r, (0.0, PI), (0.0, height), FaceOrientation::Forward);
        self = self.cylinder_face(location, a.into(), r, (PI, 2.0 * PI), (0.0, height), FaceOrientation::Forward);
        let top: [f64; 3] = (Vector3::from(location) + a * height).into();
        let ref_dir = perpendicular(&a);
        let y_dir = a.cross(&ref_dir);
        self.plane(
            (Vector3::from(top) - ref_dir * r - y_dir * r).into(),
            ref_dir.into(),
            y_dir.into(),
            diameter,
            diameter,
        );
        self.volume += PI * r * r * height;
        self
    }

    /// Edge rounding: a single cylindrical patch sweeping `sweep` radians.
    /// `concave` rounds an interior corner (adds material), otherwise an
    /// exterior edge (removes material).
    #[allow(clippy::too_many_arguments)]
    pub fn fillet(
        mut self,
        location: [f64; 3],
        axis: [f64; 3],
        radius: f64,
        length: f64,
        start_angle: f64,
        sweep: f64,
        concave: bool,
    ) -> Self {
        let orientation = if concave {
            FaceOrientation::Reversed
        } else {
            FaceOrientation::Forward
        };
        self = self.cylinder_face(
            location,
            unit(axis).into(),
            radius,
            (start_angle, start_angle + sweep),
            (0.0, length),
            orientation,
        );
        // area between the arc and its two tangent lines
        let web = radius * radius * ((sweep / 2.0).tan() - sweep / 2.0) * length;
        if concave {
            self.volume += web;
        } else {
            self.volume -= web;
        }
        self
    }

    /// Spherical patch (never a cylinder; ignored by feature extraction).
    pub fn sphere_face(mut self, center: [f64; 3], radius: f64) -> Self {
        self.push_face(
            MockSurface::Sphere {
                center: center.into(),
                radius,
            },
            FaceOrientation::Forward,
            ParamBounds::new((0.0, 2.0 * PI), (-PI / 2.0, PI / 2.0)),
        );
        self.grow_bbox(
            [center[0] - radius, center[1] - radius, center[2] - radius],
            [center[0] + radius, center[1] + radius, center[2] + radius],
        );
        self
    }

    /// Force the reported volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume_override = Some(volume);
        self
    }

    pub fn build(self) -> MockSolid {
        MockSolid {
            name: self.name,
            faces: self.faces,
            volume: self.volume_override.unwrap_or(self.volume),
            bbox: self.bbox,
        }
    }
}

fn unit(v: [f64; 3]) -> Vector3<f64> {
    let v = Vector3::from(v);
    let n = v.norm();
    if n < EPS {
        v
    } else {
        v / n
    }
}

/// A unit vector perpendicular to `axis` (X unless nearly parallel, then Y).
fn perpendicular(axis: &Vector3<f64>) -> Vector3<f64> {
    let n = axis.norm();
    if n < EPS {
        return Vector3::x();
    }
    let a = axis / n;
    let seed = if a.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
    (seed - a * seed.dot(&a)).normalize()
}

/// Bounds of a face from a parameter-grid sample.
fn sampled_bounds(face: &MockFace) -> Option<([f64; 3], [f64; 3])> {
    const STEPS: usize = 64;
    let b = face.bounds;
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for i in 0..=STEPS {
        let u = b.u_min + (b.u_max - b.u_min) * i as f64 / STEPS as f64;
        for v in [b.v_min, b.v_max] {
            let p = face.point_at(u, v);
            for k in 0..3 {
                min[k] = min[k].min(p[k]);
                max[k] = max[k].max(p[k]);
            }
        }
    }
    if min.iter().chain(max.iter()).all(|c| c.is_finite()) {
        Some((min, max))
    } else {
        None
    }
}
