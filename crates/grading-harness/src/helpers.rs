//! Helper functions: error type and file-to-score entry points.

use std::path::{Path, PathBuf};

use grading_types::{FeatureGraphScore, GradeSummary, MeshScore};
use serde::Serialize;
use similarity::{score_feature_graph, summarize, MeshDistanceScorer, MeshScoringConfig, ScoreError, ScoringConfig};
use tracing::info;

use crate::io::load_report;
use crate::stl::load_stl;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the grading harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("STL error: {reason}")]
    StlError { reason: String },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    Extract(#[from] feature_extract::ExtractError),
}

impl HarnessError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        HarnessError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        HarnessError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ── Single comparisons ──────────────────────────────────────────────────────

/// Feature-graph result together with its human-facing verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureGrade {
    #[serde(flatten)]
    pub result: FeatureGraphScore,
    pub summary: GradeSummary,
}

/// Score the feature report at `agent` against the one at `reference`.
pub fn grade_feature_files(agent: &Path, reference: &Path, config: &ScoringConfig) -> Result<FeatureGrade, HarnessError> {
    let candidate = load_report(agent)?;
    let reference = load_report(reference)?;
    let result = score_feature_graph(&candidate, &reference, config)?;
    let summary = summarize(&result, config);
    info!(
        agent = %candidate.meta.filename,
        reference = %reference.meta.filename,
        total = summary.total_score,
        "feature reports graded"
    );
    Ok(FeatureGrade { result, summary })
}

/// Score the STL mesh at `agent` against the one at `reference`.
pub fn grade_mesh_files(agent: &Path, reference: &Path, config: &MeshScoringConfig) -> Result<MeshScore, HarnessError> {
    let candidate = load_stl(agent)?;
    let reference = load_stl(reference)?;
    let score = MeshDistanceScorer::new(*config)?.score(&candidate, &reference)?;
    info!(score = score.score, mean = score.mean_dist, "meshes graded");
    Ok(score)
}
