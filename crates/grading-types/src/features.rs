use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Round `value` to `decimals` decimal places (half away from zero).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Mass-property volume and axis-aligned bounds of a solid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalGeometry {
    pub volume: f64,
    /// Extent along each axis (`bbox_max - bbox_min`).
    #[serde(default)]
    pub bbox_dims: [f64; 3],
    pub bbox_min: [f64; 3],
    pub bbox_max: [f64; 3],
}

impl GlobalGeometry {
    pub fn new(volume: f64, bbox_min: [f64; 3], bbox_max: [f64; 3]) -> Self {
        Self {
            volume,
            bbox_dims: [
                bbox_max[0] - bbox_min[0],
                bbox_max[1] - bbox_min[1],
                bbox_max[2] - bbox_min[2],
            ],
            bbox_min,
            bbox_max,
        }
    }

    /// Copy with every value rounded to `decimals` places.
    pub fn rounded(&self, decimals: u32) -> Self {
        let r = |v: [f64; 3]| v.map(|x| round_to(x, decimals));
        Self {
            volume: round_to(self.volume, decimals),
            bbox_dims: r(self.bbox_dims),
            bbox_min: r(self.bbox_min),
            bbox_max: r(self.bbox_max),
        }
    }
}

/// Final classification of a merged cylindrical feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureClass {
    Hole,
    Pin,
    Fillet,
}

/// A cylindrical feature as persisted in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub diameter: f64,
    /// A point on the feature axis.
    pub location: [f64; 3],
    /// Unit axis direction. Undirected: `a` and `-a` describe the same axis.
    pub axis: [f64; 3],
    /// Accumulated swept angle of all merged faces, in degrees.
    pub angle_deg: f64,
}

impl Feature {
    pub fn new(diameter: f64, location: [f64; 3], axis: [f64; 3], angle_deg: f64) -> Self {
        Self {
            diameter,
            location,
            axis,
            angle_deg,
        }
    }

    /// Full-circle hole with the given diameter, location and axis.
    pub fn hole(diameter: f64, location: [f64; 3], axis: [f64; 3]) -> Self {
        Self::new(diameter, location, axis, 360.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub filename: String,
}

/// Feature block of a report. Only holes and the histogram are scored;
/// pins and fillets are kept for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureBlock {
    #[serde(alias = "hole_count_unique")]
    pub hole_count: usize,
    #[serde(alias = "pin_count_unique")]
    pub pin_count: usize,
    #[serde(alias = "fillet_count_unique")]
    pub fillet_count: usize,
    /// Hole count per diameter bucket (diameter formatted to fixed decimals).
    pub hole_histogram: BTreeMap<String, usize>,
    pub holes_details: Vec<Feature>,
    #[serde(default)]
    pub pins_details: Vec<Feature>,
    #[serde(default)]
    pub fillets_details: Vec<Feature>,
}

impl FeatureBlock {
    /// Sum of all histogram bucket counts.
    pub fn histogram_total(&self) -> usize {
        self.hole_histogram.values().sum()
    }
}

/// Canonical description of one solid: geometry block plus feature lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureReport {
    pub meta: ReportMeta,
    pub geometry: GlobalGeometry,
    pub features: FeatureBlock,
}

impl FeatureReport {
    pub fn holes(&self) -> &[Feature] {
        &self.features.holes_details
    }
}
