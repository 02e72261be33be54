use serde::{Deserialize, Serialize};

/// One scored dimension on the internal points scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore<D> {
    pub score: f64,
    pub max_score: f64,
    pub details: D,
}

impl<D> DimensionScore<D> {
    pub fn new(score: f64, max_score: f64, details: D) -> Self {
        Self {
            score,
            max_score,
            details,
        }
    }

    /// Fraction of the available points that were earned.
    pub fn ratio(&self) -> f64 {
        if self.max_score > 0.0 {
            self.score / self.max_score
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalDetails {
    /// `|V_candidate - V_reference| / V_reference`.
    pub volume_error_ratio: f64,
    /// Euclidean distance between the two `bbox_min` corners.
    pub origin_deviation: f64,
    pub volume_score: f64,
    pub origin_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityDetails {
    Counted {
        missing: Vec<String>,
        extra: Vec<String>,
    },
    Note(String),
}

impl QuantityDetails {
    pub fn missing(&self) -> &[String] {
        match self {
            QuantityDetails::Counted { missing, .. } => missing,
            QuantityDetails::Note(_) => &[],
        }
    }
}

/// An accepted reference/candidate hole pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleMatch {
    pub gt_idx: usize,
    pub stu_idx: usize,
    pub pos_error: f64,
    /// Undirected axis deviation in degrees.
    pub axis_error: f64,
    /// Points earned by this match.
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrecisionDetails {
    Matched {
        total_gt_features: usize,
        matched_features: usize,
        avg_position_error: f64,
        avg_axis_error: f64,
        matches: Vec<HoleMatch>,
    },
    Note(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub global_geometry: DimensionScore<GlobalDetails>,
    pub feature_quantity: DimensionScore<QuantityDetails>,
    pub feature_precision: DimensionScore<PrecisionDetails>,
}

/// Points earned per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub global: f64,
    pub quantity: f64,
    pub precision: f64,
}

/// Result of comparing two feature reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureGraphScore {
    /// Final score in [0, 1].
    pub score: f64,
    /// Sum of the dimension scores on the 0-100 scale.
    pub raw_score_100: f64,
    pub volume_error_ratio: f64,
    pub origin_deviation: f64,
    pub matched_features: Option<usize>,
    pub total_gt_features: Option<usize>,
    pub breakdown: Breakdown,
}

impl FeatureGraphScore {
    pub fn sub_scores(&self) -> SubScores {
        SubScores {
            global: self.breakdown.global_geometry.score,
            quantity: self.breakdown.feature_quantity.score,
            precision: self.breakdown.feature_precision.score,
        }
    }
}

/// Result of comparing two triangle meshes by surface distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshScore {
    pub score: f64,
    pub mean_dist: f64,
    pub median_dist: f64,
    pub max_dist: f64,
    pub ratio_perfect: f64,
    pub ratio_acceptable: f64,
    pub n_sample_points: usize,
    pub tolerance_perfect: f64,
    pub tolerance_acceptable: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GradeStatus {
    Pass,
    Fail,
}

/// Human-facing verdict derived from a feature-graph score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeSummary {
    /// Total on the 0-100 scale, one decimal.
    pub total_score: f64,
    pub status: GradeStatus,
    pub feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_note_serializes_as_plain_string() {
        let d = QuantityDetails::Note("No holes in GT".into());
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"No holes in GT\"");
        assert!(d.missing().is_empty());
    }

    #[test]
    fn status_is_uppercase() {
        let json = serde_json::to_string(&GradeStatus::Pass).unwrap();
        assert_eq!(json, "\"PASS\"");
    }

    #[test]
    fn zero_max_dimension_counts_as_full() {
        let d = DimensionScore::new(0.0, 0.0, ());
        assert_eq!(d.ratio(), 1.0);
    }
}
