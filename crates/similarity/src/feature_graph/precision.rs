use grading_types::{DimensionScore, Feature, HoleMatch, PrecisionDetails};

use super::matching::HoleMatcher;
use crate::config::ScoringConfig;

/// Position credit in `[0, 1]`: full inside the perfect band, linear to zero
/// at the acceptance limit.
pub fn position_score(distance: f64, config: &ScoringConfig) -> f64 {
    if distance <= config.position_perfect {
        1.0
    } else {
        (1.0 - (distance - config.position_perfect) / (config.position_max - config.position_perfect)).max(0.0)
    }
}

/// Axis credit in `[0, 1]`.
pub fn axis_score(angle_deg: f64, config: &ScoringConfig) -> f64 {
    (1.0 - angle_deg / config.axis_angle_max_deg).max(0.0)
}

/// Location and axis accuracy of the reference holes.
pub fn score_precision(
    candidate: &[Feature],
    reference: &[Feature],
    matcher: &dyn HoleMatcher,
    config: &ScoringConfig,
) -> DimensionScore<PrecisionDetails> {
    let max = config.weights.precision;
    if reference.is_empty() {
        return DimensionScore::new(max, max, PrecisionDetails::Note("No holes to check".to_string()));
    }
    if candidate.is_empty() {
        return DimensionScore::new(
            0.0,
            max,
            PrecisionDetails::Note("No holes found in student file".to_string()),
        );
    }

    let unit = max / reference.len() as f64;
    // credits are summed in [0, 1] per hole and scaled once, so a perfect
    // match on every hole yields exactly `max`
    let mut credit = 0.0;
    let mut matches = Vec::new();

    for (gt_idx, pairing) in matcher.pair(reference, candidate, config).into_iter().enumerate() {
        let Some(p) = pairing else { continue };
        if p.distance >= config.position_max || p.angle_deg >= config.axis_angle_max_deg {
            continue;
        }
        let hole_credit = config.position_weight * position_score(p.distance, config)
            + config.axis_weight * axis_score(p.angle_deg, config);
        credit += hole_credit;
        let points = unit * hole_credit;
        matches.push(HoleMatch {
            gt_idx,
            stu_idx: p.candidate,
            pos_error: p.distance,
            axis_error: p.angle_deg,
            points,
        });
    }

    let n = matches.len();
    let (avg_position_error, avg_axis_error) = if n > 0 {
        (
            matches.iter().map(|m| m.pos_error).sum::<f64>() / n as f64,
            matches.iter().map(|m| m.axis_error).sum::<f64>() / n as f64,
        )
    } else {
        (0.0, 0.0)
    };

    DimensionScore::new(
        max * credit / reference.len() as f64,
        max,
        PrecisionDetails::Matched {
            total_gt_features: reference.len(),
            matched_features: n,
            avg_position_error,
            avg_axis_error,
            matches,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_graph::matching::GreedyNearestMatcher;
    use approx::assert_relative_eq;

    const Z: [f64; 3] = [0.0, 0.0, 1.0];

    #[test]
    fn position_band() {
        let cfg = ScoringConfig::default();
        assert_eq!(position_score(0.05, &cfg), 1.0);
        assert_relative_eq!(position_score(1.05, &cfg), 0.5, epsilon = 1e-12);
        assert_eq!(position_score(3.0, &cfg), 0.0);
    }

    #[test]
    fn near_hole_earns_full_unit() {
        let cfg = ScoringConfig::default();
        let reference = [Feature::hole(10.0, [0.0; 3], Z)];
        let candidate = [Feature::hole(10.05, [0.05, 0.0, 0.0], Z)];
        let s = score_precision(&candidate, &reference, &GreedyNearestMatcher, &cfg);
        assert_relative_eq!(s.score, 50.0, epsilon = 1e-12);
    }

    #[test]
    fn far_hole_is_rejected() {
        let cfg = ScoringConfig::default();
        let reference = [Feature::hole(10.0, [0.0; 3], Z), Feature::hole(10.0, [50.0, 0.0, 0.0], Z)];
        let candidate = [Feature::hole(10.0, [0.0; 3], Z), Feature::hole(10.0, [52.5, 0.0, 0.0], Z)];
        let s = score_precision(&candidate, &reference, &GreedyNearestMatcher, &cfg);
        assert_relative_eq!(s.score, 25.0, epsilon = 1e-12);
        match s.details {
            PrecisionDetails::Matched {
                matched_features,
                total_gt_features,
                ..
            } => {
                assert_eq!(matched_features, 1);
                assert_eq!(total_gt_features, 2);
            }
            other => panic!("unexpected details {:?}", other),
        }
    }

    #[test]
    fn steep_axis_is_rejected() {
        let cfg = ScoringConfig::default();
        let tilt = 20f64.to_radians();
        let reference = [Feature::hole(6.0, [0.0; 3], Z)];
        let candidate = [Feature::hole(6.0, [0.0; 3], [tilt.sin(), 0.0, tilt.cos()])];
        let s = score_precision(&candidate, &reference, &GreedyNearestMatcher, &cfg);
        assert_eq!(s.score, 0.0);
    }

    #[test]
    fn empty_lists() {
        let cfg = ScoringConfig::default();
        let holes = [Feature::hole(6.0, [0.0; 3], Z)];
        let none = score_precision(&holes, &[], &GreedyNearestMatcher, &cfg);
        assert_eq!(none.score, 50.0);
        let missing = score_precision(&[], &holes, &GreedyNearestMatcher, &cfg);
        assert_eq!(missing.score, 0.0);
        assert_eq!(
            missing.details,
            PrecisionDetails::Note("No holes found in student file".to_string())
        );
    }
}
