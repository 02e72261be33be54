use crate::mesh::TriMesh;
use crate::types::*;

/// Read-only queries on the surface underneath one face.
///
/// This is the only view of kernel geometry the feature extractor needs;
/// each concrete kernel adapts its own face/surface adaptor to it.
pub trait SurfaceQuery {
    /// Underlying surface type.
    fn surface_kind(&self) -> SurfaceKind;

    /// Cylinder primitive, `None` unless the surface is cylindrical.
    fn cylinder(&self) -> Option<CylinderFrame>;

    /// Trimmed parametric domain. For cylinders `u` is the angle in radians.
    fn parametric_bounds(&self) -> ParamBounds;

    /// Evaluate the surface point at `(u, v)`.
    fn point_at(&self, u: f64, v: f64) -> [f64; 3];

    /// Unit surface normal at `(u, v)`, ignoring face orientation.
    /// `None` where the normal is undefined (singular point).
    fn normal_at(&self, u: f64, v: f64) -> Option<[f64; 3]>;

    /// Orientation of the face relative to the surface.
    fn orientation(&self) -> FaceOrientation;
}

/// Read-only queries on a loaded solid.
pub trait SolidQuery {
    /// List all faces of the solid in kernel discovery order.
    fn list_faces(&self) -> Vec<FaceId>;

    /// Surface view of one face.
    fn face_surface(&self, face: FaceId) -> Result<Box<dyn SurfaceQuery + '_>, KernelError>;

    /// Enclosed volume, treating the solid as a uniform-density body.
    fn volume(&self) -> Result<f64, KernelError>;

    /// Minimal axis-aligned bounding box over all faces as `(min, max)`.
    fn bounding_box(&self) -> Result<([f64; 3], [f64; 3]), KernelError>;
}

/// Anything that can hand over a triangulated surface.
pub trait MeshSource {
    fn tri_mesh(&self) -> Result<TriMesh, KernelError>;
}

impl MeshSource for TriMesh {
    fn tri_mesh(&self) -> Result<TriMesh, KernelError> {
        self.validate()?;
        Ok(self.clone())
    }
}

/// Multi-body sources are concatenated into one mesh.
impl MeshSource for [TriMesh] {
    fn tri_mesh(&self) -> Result<TriMesh, KernelError> {
        let mesh = TriMesh::concatenate(self);
        mesh.validate()?;
        Ok(mesh)
    }
}
