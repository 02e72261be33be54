use serde::{Deserialize, Serialize};

/// Transient face identifier within one solid.
/// Stable for the lifetime of the solid handle, NEVER persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceId(pub u64);

/// Orientation of a face relative to its underlying surface.
/// A reversed face's outward normal is the negated surface normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceOrientation {
    Forward,
    Reversed,
}

impl FaceOrientation {
    pub fn is_reversed(self) -> bool {
        self == FaceOrientation::Reversed
    }
}

/// Underlying surface type of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    Plane,
    Cylinder,
    Cone,
    Sphere,
    Torus,
    BSpline,
    Other,
}

/// The cylinder primitive behind a cylindrical face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderFrame {
    pub radius: f64,
    /// A point on the cylinder axis.
    pub location: [f64; 3],
    /// Axis direction. Kernels report unit vectors but callers must not rely on it.
    pub direction: [f64; 3],
}

/// Parametric domain of a trimmed face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamBounds {
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

impl ParamBounds {
    pub fn new(u: (f64, f64), v: (f64, f64)) -> Self {
        Self {
            u_min: u.0,
            u_max: u.1,
            v_min: v.0,
            v_max: v.1,
        }
    }

    pub fn mid(&self) -> (f64, f64) {
        (
            (self.u_min + self.u_max) / 2.0,
            (self.v_min + self.v_max) / 2.0,
        )
    }

    pub fn u_span(&self) -> f64 {
        (self.u_max - self.u_min).abs()
    }
}

/// Errors surfaced by kernel and mesh queries.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("solid has no faces: {name}")]
    EmptySolid { name: String },

    #[error("mass properties failed: {reason}")]
    MassPropertiesFailed { reason: String },

    #[error("face not found: {id:?}")]
    FaceNotFound { id: FaceId },

    #[error("invalid mesh: {reason}")]
    InvalidMesh { reason: String },

    #[error("kernel error: {message}")]
    Other { message: String },
}
