//! Cylindrical-face extraction, concave/convex classification and co-axial
//! merging.
//!
//! Every cylindrical face becomes a [`RawCylinder`]. Faces that share an axis
//! line and a radius are merged into one [`MergedFeature`] whose swept angles
//! add up; the accumulated angle is what separates a real hole from a rounded
//! corner.

use grading_types::{round_to, Feature, FeatureClass};
use kernel_query::{CylinderFrame, Deadline, FaceId, SolidQuery, SurfaceKind, SurfaceQuery};
use nalgebra::Vector3;
use tracing::{debug, instrument, warn};

use crate::config::ExtractionConfig;
use crate::error::ExtractError;

const DEGENERATE: f64 = 1e-12;

/// Side of the surface the material lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CylinderKind {
    /// Concave: material surrounds the axis.
    Hole,
    /// Convex: material lies inside the cylinder.
    Pin,
    /// Normal undefined at the sample point.
    Unknown,
}

/// One cylindrical face.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCylinder {
    pub face: FaceId,
    pub radius: f64,
    pub location: Vector3<f64>,
    /// Unit axis direction.
    pub direction: Vector3<f64>,
    pub kind: CylinderKind,
    /// Parametric arc of this face, in radians.
    pub swept_angle: f64,
}

/// A group of co-axial, same-radius, same-kind cylinders.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedFeature {
    /// The first face of the group; its frame represents the feature.
    pub base: RawCylinder,
    pub total_swept_angle: f64,
    pub face_count: usize,
}

/// Classified features of one solid, in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CylindricalFeatures {
    pub holes: Vec<Feature>,
    pub pins: Vec<Feature>,
    pub fillets: Vec<Feature>,
}

/// Concave/convex classification of a cylindrical face.
///
/// The surface normal at the parametric midpoint, flipped for reversed
/// faces, is compared against the outward radial direction from the axis.
pub fn classify_face(surface: &dyn SurfaceQuery, location: &Vector3<f64>, direction: &Vector3<f64>) -> CylinderKind {
    let (u, v) = surface.parametric_bounds().mid();
    let Some(normal) = surface.normal_at(u, v) else {
        return CylinderKind::Unknown;
    };
    let mut normal = Vector3::from(normal);
    if surface.orientation().is_reversed() {
        normal = -normal;
    }

    let to_point = Vector3::from(surface.point_at(u, v)) - location;
    let radial = to_point - direction * to_point.dot(direction);

    if normal.dot(&radial) > 0.0 {
        CylinderKind::Pin
    } else {
        CylinderKind::Hole
    }
}

/// Build the raw cylinder record for one face, `None` if it is not cylindrical.
pub fn raw_cylinder(face: FaceId, surface: &dyn SurfaceQuery) -> Result<Option<RawCylinder>, ExtractError> {
    if surface.surface_kind() != SurfaceKind::Cylinder {
        return Ok(None);
    }
    let Some(CylinderFrame {
        radius,
        location,
        direction,
    }) = surface.cylinder()
    else {
        return Ok(None);
    };

    let location = Vector3::from(location);
    let direction = Vector3::from(direction);
    let len = direction.norm();
    if !len.is_finite() || len < DEGENERATE {
        return Err(ExtractError::DegenerateAxis { face });
    }
    if !radius.is_finite() || !location.iter().all(|c| c.is_finite()) {
        return Err(ExtractError::NonFinite {
            what: format!("cylinder frame on face {:?}", face),
        });
    }
    let direction = direction / len;

    let kind = classify_face(surface, &location, &direction);
    let swept_angle = surface.parametric_bounds().u_span();

    Ok(Some(RawCylinder {
        face,
        radius,
        location,
        direction,
        kind,
        swept_angle,
    }))
}

/// All cylindrical faces of `solid`, in face discovery order.
#[instrument(skip(solid))]
pub fn collect_raw_cylinders(solid: &dyn SolidQuery) -> Result<Vec<RawCylinder>, ExtractError> {
    let mut out = Vec::new();
    for face in solid.list_faces() {
        let surface = solid.face_surface(face)?;
        if let Some(raw) = raw_cylinder(face, surface.as_ref())? {
            if raw.kind == CylinderKind::Unknown {
                warn!(?face, "cylinder normal undefined, face left unclassified");
            }
            out.push(raw);
        }
    }
    debug!(count = out.len(), "collected cylindrical faces");
    Ok(out)
}

/// Whether two unit axis directions are parallel, in either sense.
pub fn axes_parallel(a: &Vector3<f64>, b: &Vector3<f64>, angular_tolerance: f64) -> bool {
    let angle = a.dot(b).clamp(-1.0, 1.0).acos();
    angle <= angular_tolerance || angle >= std::f64::consts::PI - angular_tolerance
}

/// Co-axiality: parallel axes and the second location on the first axis line.
pub fn is_coaxial(a: &RawCylinder, b: &RawCylinder, config: &ExtractionConfig) -> bool {
    if !axes_parallel(&a.direction, &b.direction, config.angular_tolerance) {
        return false;
    }
    let offset = b.location - a.location;
    offset.cross(&a.direction).norm() < config.location_tolerance
}

fn same_radius(a: &RawCylinder, b: &RawCylinder, config: &ExtractionConfig) -> bool {
    (a.radius - b.radius).abs() < config.radius_tolerance
}

/// Greedy merge in discovery order: each cylinder joins the first earlier
/// group with the same kind, radius and axis line, or starts a new group.
///
/// `Unknown` cylinders never join or absorb another group.
pub fn merge_cylinders(
    raw: &[RawCylinder],
    config: &ExtractionConfig,
    deadline: &Deadline,
) -> Result<Vec<MergedFeature>, ExtractError> {
    let mut merged: Vec<MergedFeature> = Vec::new();
    for cyl in raw {
        deadline.check("cylinder merge")?;

        let target = if cyl.kind == CylinderKind::Unknown {
            None
        } else {
            merged.iter_mut().find(|m| {
                m.base.kind == cyl.kind && same_radius(&m.base, cyl, config) && is_coaxial(&m.base, cyl, config)
            })
        };

        match target {
            Some(group) => {
                group.total_swept_angle += cyl.swept_angle;
                group.face_count += 1;
            }
            None => merged.push(MergedFeature {
                base: cyl.clone(),
                total_swept_angle: cyl.swept_angle,
                face_count: 1,
            }),
        }
    }
    Ok(merged)
}

impl MergedFeature {
    /// Final hole / pin / fillet decision. `None` for unclassified faces.
    pub fn classify(&self, config: &ExtractionConfig) -> Option<FeatureClass> {
        match self.base.kind {
            CylinderKind::Hole if self.total_swept_angle > config.hole_min_swept_angle => Some(FeatureClass::Hole),
            CylinderKind::Hole => Some(FeatureClass::Fillet),
            CylinderKind::Pin if self.base.radius > config.pin_min_radius => Some(FeatureClass::Pin),
            CylinderKind::Pin => Some(FeatureClass::Fillet),
            CylinderKind::Unknown => None,
        }
    }

    /// Persisted form, rounded per `config`.
    pub fn to_feature(&self, config: &ExtractionConfig) -> Feature {
        let len = |v: &Vector3<f64>| [v.x, v.y, v.z].map(|c| round_to(c, config.length_decimals));
        Feature::new(
            round_to(2.0 * self.base.radius, config.length_decimals),
            len(&self.base.location),
            len(&self.base.direction),
            round_to(self.total_swept_angle.to_degrees(), config.angle_decimals),
        )
    }
}

/// Extract, merge and classify the cylindrical features of `solid`.
///
/// A solid without cylindrical faces yields three empty lists.
#[instrument(skip(solid, config, deadline))]
pub fn extract_cylindrical_features(
    solid: &dyn SolidQuery,
    config: &ExtractionConfig,
    deadline: &Deadline,
) -> Result<CylindricalFeatures, ExtractError> {
    let raw = collect_raw_cylinders(solid)?;
    let merged = merge_cylinders(&raw, config, deadline)?;

    let mut out = CylindricalFeatures::default();
    for group in &merged {
        let feature = group.to_feature(config);
        match group.classify(config) {
            Some(FeatureClass::Hole) => out.holes.push(feature),
            Some(FeatureClass::Pin) => out.pins.push(feature),
            Some(FeatureClass::Fillet) => out.fillets.push(feature),
            None => {}
        }
    }

    debug!(
        faces = raw.len(),
        groups = merged.len(),
        holes = out.holes.len(),
        pins = out.pins.len(),
        fillets = out.fillets.len(),
        "classified cylindrical features"
    );
    Ok(out)
}
