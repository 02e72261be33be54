//! JSON artifacts on disk: feature reports and scorer configs.

use std::path::Path;

use grading_types::FeatureReport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use similarity::{MeshScoringConfig, ScoringConfig};
use tracing::debug;

use crate::helpers::HarnessError;

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, HarnessError> {
    let text = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| HarnessError::json(path, e))
}

pub fn load_report(path: &Path) -> Result<FeatureReport, HarnessError> {
    let report: FeatureReport = load_json(path)?;
    debug!(path = %path.display(), holes = report.holes().len(), "feature report loaded");
    Ok(report)
}

/// Write `value` as pretty-printed JSON.
pub fn save_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), HarnessError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| HarnessError::json(path, e))?;
    std::fs::write(path, text).map_err(|e| HarnessError::io(path, e))
}

pub fn save_report(report: &FeatureReport, path: &Path) -> Result<(), HarnessError> {
    save_json(report, path)
}

/// Scoring constants from JSON. Missing keys keep their defaults; the
/// result is validated before it is returned.
pub fn load_scoring_config(path: &Path) -> Result<ScoringConfig, HarnessError> {
    let config: ScoringConfig = load_json(path)?;
    Ok(config.validated()?)
}

pub fn load_mesh_config(path: &Path) -> Result<MeshScoringConfig, HarnessError> {
    let config: MeshScoringConfig = load_json(path)?;
    Ok(config.validated()?)
}
