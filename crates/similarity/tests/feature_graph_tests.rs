//! Scoring properties of the feature-graph path.

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use grading_types::*;
use similarity::*;

const Z: [f64; 3] = [0.0, 0.0, 1.0];

fn report(volume: f64, bbox_min: [f64; 3], holes: Vec<Feature>) -> FeatureReport {
    let mut hole_histogram = BTreeMap::new();
    for h in &holes {
        *hole_histogram.entry(format!("{:.2}", h.diameter)).or_insert(0) += 1;
    }
    FeatureReport {
        meta: ReportMeta {
            filename: "part.json".to_string(),
        },
        geometry: GlobalGeometry::new(
            volume,
            bbox_min,
            [bbox_min[0] + 100.0, bbox_min[1] + 60.0, bbox_min[2] + 10.0],
        ),
        features: FeatureBlock {
            hole_count: holes.len(),
            hole_histogram,
            holes_details: holes,
            ..Default::default()
        },
    }
}

fn bracket() -> FeatureReport {
    report(
        52_000.0,
        [0.0; 3],
        vec![
            Feature::hole(6.0, [10.0, 10.0, 0.0], Z),
            Feature::hole(6.0, [90.0, 10.0, 0.0], Z),
            Feature::hole(6.0, [10.0, 50.0, 0.0], Z),
            Feature::hole(12.5, [50.0, 30.0, 0.0], Z),
        ],
    )
}

fn score(candidate: &FeatureReport, reference: &FeatureReport) -> FeatureGraphScore {
    score_feature_graph(candidate, reference, &ScoringConfig::default()).unwrap()
}

#[test]
fn self_comparison_is_exactly_one() {
    let r = bracket();
    let s = score(&r, &r);
    assert_eq!(s.score, 1.0);
    assert_eq!(s.raw_score_100, 100.0);
    assert_eq!(s.volume_error_ratio, 0.0);
    assert_eq!(s.origin_deviation, 0.0);
    assert_eq!(s.matched_features, Some(4));
    assert_eq!(s.total_gt_features, Some(4));
}

#[test]
fn far_reference_hole_costs_exactly_one_unit() {
    let candidate = bracket();
    let mut reference = bracket();
    reference.features.holes_details[1].location = [90.0, 10.0, 25.0];

    let baseline = score(&reference, &reference).sub_scores().precision;
    let perturbed = score(&candidate, &reference).sub_scores().precision;
    assert_relative_eq!(baseline - perturbed, 50.0 / 4.0, epsilon = 1e-9);
}

#[test]
fn extra_hole_costs_half_of_a_missing_hole() {
    let reference = bracket();

    let mut extra = bracket();
    extra.features.holes_details.push(Feature::hole(6.0, [50.0, 50.0, 0.0], Z));
    *extra.features.hole_histogram.get_mut("6.00").unwrap() += 1;

    let mut missing = bracket();
    missing.features.holes_details.remove(2);
    *missing.features.hole_histogram.get_mut("6.00").unwrap() -= 1;

    let extra_loss = 30.0 - score(&extra, &reference).sub_scores().quantity;
    let missing_loss = 30.0 - score(&missing, &reference).sub_scores().quantity;
    assert_relative_eq!(missing_loss, 2.0 * extra_loss, epsilon = 1e-9);
}

#[test]
fn volume_error_boundaries() {
    let reference = report(1000.0, [0.0; 3], vec![]);
    for (volume, expected) in [(1010.0, 10.0), (1050.0, 0.0), (1030.0, 5.0)] {
        let s = score(&report(volume, [0.0; 3], vec![]), &reference);
        assert_relative_eq!(s.breakdown.global_geometry.details.volume_score, expected, epsilon = 1e-9);
    }
}

#[test]
fn bucket_precision_couples_quantity_to_diameter_rounding() {
    let reference = report(1000.0, [0.0; 3], vec![Feature::hole(10.0, [0.0; 3], Z)]);
    let candidate = report(1000.0, [0.0; 3], vec![Feature::hole(10.05, [0.05, 0.0, 0.0], Z)]);
    let s = score(&candidate, &reference);
    let sub = s.sub_scores();
    assert_eq!(sub.quantity, 0.0);
    assert_relative_eq!(sub.precision, 50.0, epsilon = 1e-12);
    assert_relative_eq!(s.score, 0.7, epsilon = 1e-12);
}

#[test]
fn no_reference_holes_gives_full_feature_credit() {
    let reference = report(1000.0, [0.0; 3], vec![]);
    let candidate = report(1000.0, [0.0; 3], vec![Feature::hole(4.0, [1.0, 1.0, 0.0], Z)]);
    let s = score(&candidate, &reference);
    assert_eq!(s.sub_scores().precision, 50.0);
    assert_eq!(s.sub_scores().quantity, 30.0);
    assert_eq!(s.matched_features, None);
}

#[test]
fn candidate_without_holes_loses_precision() {
    let reference = bracket();
    let candidate = report(52_000.0, [0.0; 3], vec![]);
    let s = score(&candidate, &reference);
    assert_eq!(s.sub_scores().precision, 0.0);
    assert_eq!(s.sub_scores().quantity, 0.0);
    assert_relative_eq!(s.score, 0.2, epsilon = 1e-12);
}

#[test]
fn zero_volume_reference_is_an_error() {
    let reference = report(0.0, [0.0; 3], vec![]);
    let err = score_feature_graph(&bracket(), &reference, &ScoringConfig::default()).unwrap_err();
    assert!(matches!(err, ScoreError::Geometry { .. }));
}

#[test]
fn non_finite_hole_is_input_error() {
    let mut candidate = bracket();
    candidate.features.holes_details[0].location[0] = f64::NAN;
    let err = score_feature_graph(&candidate, &bracket(), &ScoringConfig::default()).unwrap_err();
    assert!(matches!(err, ScoreError::Input { .. }));
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let cfg = ScoringConfig {
        axis_weight: 0.5,
        ..Default::default()
    };
    assert!(matches!(FeatureGraphScorer::new(cfg), Err(ScoreError::ToleranceConfig { .. })));
}

#[test]
fn custom_matcher_is_used() {
    struct NeverMatch;
    impl HoleMatcher for NeverMatch {
        fn pair(&self, reference: &[Feature], _: &[Feature], _: &ScoringConfig) -> Vec<Option<Pairing>> {
            vec![None; reference.len()]
        }
    }
    let scorer = FeatureGraphScorer::new(ScoringConfig::default())
        .unwrap()
        .with_matcher(NeverMatch);
    let r = bracket();
    let s = scorer.score(&r, &r).unwrap();
    assert_eq!(s.sub_scores().precision, 0.0);
    assert_eq!(s.matched_features, Some(0));
}

#[test]
fn summary_for_perfect_and_poor_results() {
    let cfg = ScoringConfig::default();
    let r = bracket();
    let perfect = summarize(&score(&r, &r), &cfg);
    assert_eq!(perfect.status, GradeStatus::Pass);
    assert_eq!(perfect.total_score, 100.0);
    assert_eq!(perfect.feedback, "Excellent work! High precision.");

    let shifted = report(40_000.0, [1.0, 1.0, 0.0], vec![]);
    let poor = summarize(&score(&shifted, &r), &cfg);
    assert_eq!(poor.status, GradeStatus::Fail);
    assert!(poor.feedback.contains("Warning: Coordinate origin is misaligned."));
    assert!(poor
        .feedback
        .contains("Missing features detected: Missing 1 holes of Dia 12.50mm, Missing 3 holes of Dia 6.00mm"));
}

#[test]
fn breakdown_json_shape() {
    let r = bracket();
    let json = serde_json::to_value(score(&r, &r)).unwrap();
    assert_eq!(json["breakdown"]["global_geometry"]["max_score"], 20.0);
    assert_eq!(json["breakdown"]["feature_quantity"]["max_score"], 30.0);
    assert_eq!(json["breakdown"]["feature_precision"]["details"]["matched_features"], 4);
}
