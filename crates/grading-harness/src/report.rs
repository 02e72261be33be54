//! Structured text reports of grading results.
//!
//! The `grade` binary prints JSON; these reports are for people reading a
//! terminal or a log.

use std::fmt;

use grading_types::{GradeStatus, MeshScore, PrecisionDetails, QuantityDetails};

use crate::helpers::FeatureGrade;

/// Text view of one feature-graph comparison.
pub struct FeatureGradeReport {
    pub agent: String,
    pub reference: String,
    pub grade: FeatureGrade,
}

impl FeatureGradeReport {
    pub fn new(agent: impl Into<String>, reference: impl Into<String>, grade: FeatureGrade) -> Self {
        Self {
            agent: agent.into(),
            reference: reference.into(),
            grade,
        }
    }

    pub fn to_text(&self) -> String {
        let result = &self.grade.result;
        let summary = &self.grade.summary;
        let breakdown = &result.breakdown;
        let mut out = String::new();
        out.push_str("=== Feature Graph Grade ===\n\n");
        out.push_str(&format!("Agent:     {}\n", self.agent));
        out.push_str(&format!("Reference: {}\n\n", self.reference));

        let status = match summary.status {
            GradeStatus::Pass => "PASS",
            GradeStatus::Fail => "FAIL",
        };
        out.push_str(&format!("Total: {:.1} / 100 ({})\n", summary.total_score, status));
        if !summary.feedback.is_empty() {
            out.push_str(&format!("  {}\n", summary.feedback));
        }
        out.push('\n');

        let global = &breakdown.global_geometry;
        out.push_str(&format!(
            "Global geometry: {:.2} / {:.0}\n",
            global.score, global.max_score
        ));
        out.push_str(&format!(
            "  volume error {:.2}% ({:.2} pts), origin deviation {:.4} ({:.2} pts)\n",
            global.details.volume_error_ratio * 100.0,
            global.details.volume_score,
            global.details.origin_deviation,
            global.details.origin_score,
        ));

        let quantity = &breakdown.feature_quantity;
        out.push_str(&format!(
            "Feature quantity: {:.2} / {:.0}\n",
            quantity.score, quantity.max_score
        ));
        match &quantity.details {
            QuantityDetails::Counted { missing, extra } => {
                for line in missing.iter().chain(extra) {
                    out.push_str(&format!("  {}\n", line));
                }
            }
            QuantityDetails::Note(note) => out.push_str(&format!("  {}\n", note)),
        }

        let precision = &breakdown.feature_precision;
        out.push_str(&format!(
            "Feature precision: {:.2} / {:.0}\n",
            precision.score, precision.max_score
        ));
        match &precision.details {
            PrecisionDetails::Matched {
                total_gt_features,
                matched_features,
                avg_position_error,
                avg_axis_error,
                matches,
            } => {
                out.push_str(&format!(
                    "  matched {}/{} holes, avg position error {:.4}, avg axis error {:.2} deg\n",
                    matched_features, total_gt_features, avg_position_error, avg_axis_error,
                ));
                for m in matches {
                    out.push_str(&format!(
                        "    ref #{} -> agent #{}: pos {:.4}, axis {:.2} deg, {:.2} pts\n",
                        m.gt_idx, m.stu_idx, m.pos_error, m.axis_error, m.points,
                    ));
                }
            }
            PrecisionDetails::Note(note) => out.push_str(&format!("  {}\n", note)),
        }
        out
    }
}

impl fmt::Display for FeatureGradeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// Text view of one mesh-distance comparison.
pub struct MeshGradeReport {
    pub agent: String,
    pub reference: String,
    pub score: MeshScore,
}

impl MeshGradeReport {
    pub fn new(agent: impl Into<String>, reference: impl Into<String>, score: MeshScore) -> Self {
        Self {
            agent: agent.into(),
            reference: reference.into(),
            score,
        }
    }

    pub fn to_text(&self) -> String {
        let s = &self.score;
        let mut out = String::new();
        out.push_str("=== Mesh Distance Grade ===\n\n");
        out.push_str(&format!("Agent:     {}\n", self.agent));
        out.push_str(&format!("Reference: {}\n\n", self.reference));
        out.push_str(&format!("Score: {:.4}\n", s.score));
        out.push_str(&format!("Samples: {}\n", s.n_sample_points));
        out.push_str(&format!(
            "Distance: mean {:.4}, median {:.4}, max {:.4}\n",
            s.mean_dist, s.median_dist, s.max_dist
        ));
        out.push_str(&format!(
            "Within {} (perfect): {:.1}%\n",
            s.tolerance_perfect,
            s.ratio_perfect * 100.0
        ));
        out.push_str(&format!(
            "Within {} (acceptable): {:.1}%\n",
            s.tolerance_acceptable,
            s.ratio_acceptable * 100.0
        ));
        out
    }
}

impl fmt::Display for MeshGradeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
