//! File-level grading: reports and meshes written to disk, then scored.

use std::path::PathBuf;

use approx::assert_relative_eq;

use feature_extract::{ExtractionConfig, FeatureExtractor};
use grading_harness::io::{load_report, load_scoring_config, save_json, save_report};
use grading_harness::stl::export_binary_stl;
use grading_harness::*;
use grading_types::{FeatureReport, GradeStatus};
use kernel_query::primitives::plate_with_holes;
use kernel_query::tessellation::box_mesh;
use similarity::{MeshScoringConfig, ScoreError, ScoringConfig};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("grading-harness-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn plate(holes: &[([f64; 2], f64)], filename: &str) -> FeatureReport {
    let extractor = FeatureExtractor::new(ExtractionConfig::default()).unwrap();
    extractor
        .extract(&plate_with_holes([80.0, 50.0], 6.0, holes), filename)
        .unwrap()
}

const HOLES: [([f64; 2], f64); 3] = [([10.0, 10.0], 5.0), ([70.0, 10.0], 5.0), ([40.0, 25.0], 12.0)];

#[test]
fn report_survives_a_trip_through_disk() {
    let report = plate(&HOLES, "reference.step");
    let path = scratch("saved_report.json");
    save_report(&report, &path).unwrap();
    let back = load_report(&path).unwrap();
    assert_eq!(back.meta, report.meta);
    assert_eq!(back.features.hole_histogram, report.features.hole_histogram);
    assert_eq!(back.features.holes_details.len(), 3);
    assert_relative_eq!(back.geometry.volume, report.geometry.volume, epsilon = 1e-9);
}

#[test]
fn extracted_plate_graded_against_itself_passes() {
    let reference = scratch("plate_ref.json");
    let agent = scratch("plate_agent.json");
    save_report(&plate(&HOLES, "reference.step"), &reference).unwrap();
    save_report(&plate(&HOLES, "agent.step"), &agent).unwrap();

    let grade = grade_feature_files(&agent, &reference, &ScoringConfig::default()).unwrap();
    assert_eq!(grade.result.score, 1.0);
    assert_eq!(grade.summary.status, GradeStatus::Pass);
    assert_eq!(grade.summary.feedback, "Excellent work! High precision.");
}

#[test]
fn missing_hole_shows_up_in_feedback() {
    let reference = scratch("missing_ref.json");
    let agent = scratch("missing_agent.json");
    save_report(&plate(&HOLES, "reference.step"), &reference).unwrap();
    save_report(&plate(&HOLES[..2], "agent.step"), &agent).unwrap();

    let grade = grade_feature_files(&agent, &reference, &ScoringConfig::default()).unwrap();
    assert!(grade.result.score < 1.0);
    assert!(grade
        .summary
        .feedback
        .contains("Missing features detected: Missing 1 holes of Dia 12.00mm"));

    let json = serde_json::to_value(&grade).unwrap();
    assert!(json["score"].is_number());
    assert_eq!(json["summary"]["status"], "PASS");
}

#[test]
fn partial_config_file_keeps_defaults() {
    let path = scratch("strict.json");
    std::fs::write(&path, r#"{ "pass_threshold": 95.0 }"#).unwrap();
    let config = load_scoring_config(&path).unwrap();
    assert_eq!(config.pass_threshold, 95.0);
    assert_eq!(config.diameter_tolerance, ScoringConfig::default().diameter_tolerance);
}

#[test]
fn invalid_config_file_is_rejected() {
    let path = scratch("broken_weights.json");
    save_json(&serde_json::json!({ "position_weight": 0.9 }), &path).unwrap();
    assert!(matches!(
        load_scoring_config(&path),
        Err(HarnessError::Score(ScoreError::ToleranceConfig { .. }))
    ));
}

#[test]
fn missing_file_and_bad_json_are_reported() {
    let missing = scratch("does_not_exist.json");
    let err = grade_feature_files(&missing, &missing, &ScoringConfig::default()).unwrap_err();
    assert!(matches!(err, HarnessError::Io { .. }));

    let garbage = scratch("garbage.json");
    std::fs::write(&garbage, "{ not json").unwrap();
    assert!(matches!(load_report(&garbage), Err(HarnessError::Json { .. })));
}

#[test]
fn stl_files_graded_by_surface_distance() {
    let reference = scratch("block_ref.stl");
    let near = scratch("block_near.stl");
    let far = scratch("block_far.stl");
    let stock = box_mesh([0.0; 3], [40.0, 20.0, 10.0]);
    std::fs::write(&reference, export_binary_stl(&stock, "ref").unwrap()).unwrap();
    std::fs::write(&near, export_binary_stl(&stock.translated([0.1, 0.0, 0.0]), "near").unwrap()).unwrap();
    std::fs::write(&far, export_binary_stl(&stock.translated([0.0, 0.0, 60.0]), "far").unwrap()).unwrap();

    let config = MeshScoringConfig {
        n_samples: 1_000,
        ..Default::default()
    };
    let good = grade_mesh_files(&near, &reference, &config).unwrap();
    assert_eq!(good.score, 1.0);
    assert_eq!(good.n_sample_points, 1_000);

    let bad = grade_mesh_files(&far, &reference, &config).unwrap();
    assert_eq!(bad.score, 0.0);
}

#[test]
fn text_reports_name_every_section() {
    let reference = scratch("text_ref.json");
    let agent = scratch("text_agent.json");
    save_report(&plate(&HOLES, "reference.step"), &reference).unwrap();
    save_report(&plate(&HOLES[1..], "agent.step"), &agent).unwrap();
    let grade = grade_feature_files(&agent, &reference, &ScoringConfig::default()).unwrap();

    let text = FeatureGradeReport::new("agent.json", "ref.json", grade).to_text();
    assert!(text.starts_with("=== Feature Graph Grade ==="));
    assert!(text.contains("Global geometry:"));
    assert!(text.contains("Feature quantity:"));
    assert!(text.contains("Missing 1 holes of Dia 5.00mm"));
    assert!(text.contains("Feature precision:"));
    assert!(text.contains("matched 2/3 holes"));

    let stock = box_mesh([0.0; 3], [1.0; 3]);
    let score = similarity::score_mesh_distance(&stock, &stock, &MeshScoringConfig::default()).unwrap();
    let mesh_text = MeshGradeReport::new("a.stl", "b.stl", score).to_string();
    assert!(mesh_text.contains("Score: 1.0000"));
    assert!(mesh_text.contains("Samples: 10000"));
}
