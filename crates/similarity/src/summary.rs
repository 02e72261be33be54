use grading_types::{round_to, FeatureGraphScore, GradeStatus, GradeSummary};

use crate::config::ScoringConfig;

/// Pass/fail verdict and feedback for a feature-graph result.
pub fn summarize(result: &FeatureGraphScore, config: &ScoringConfig) -> GradeSummary {
    let total = result.raw_score_100;
    let mut feedback = Vec::new();

    if total >= config.excellent_threshold {
        feedback.push("Excellent work! High precision.".to_string());
    }
    if result.origin_deviation > config.origin_warning {
        feedback.push("Warning: Coordinate origin is misaligned.".to_string());
    }
    let missing = result.breakdown.feature_quantity.details.missing();
    if !missing.is_empty() {
        feedback.push(format!("Missing features detected: {}", missing.join(", ")));
    }

    GradeSummary {
        total_score: round_to(total, 1),
        status: if total >= config.pass_threshold {
            GradeStatus::Pass
        } else {
            GradeStatus::Fail
        },
        feedback: feedback.join(" "),
    }
}
