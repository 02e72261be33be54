//! Calibrated scoring constants, overridable per task.
//!
//! Both configs deserialize from partial JSON (missing keys take the
//! defaults) and are checked by `validated()` before use. Invalid values are
//! rejected, never clamped.

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// Points available per dimension. Must add up to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionWeights {
    pub global: f64,
    pub quantity: f64,
    pub precision: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            global: 20.0,
            quantity: 30.0,
            precision: 50.0,
        }
    }
}

impl DimensionWeights {
    pub fn total(&self) -> f64 {
        self.global + self.quantity + self.precision
    }
}

/// Constants of the feature-graph scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: DimensionWeights,
    /// Relative volume error earning full volume credit.
    pub volume_error_perfect: f64,
    /// Relative volume error at and beyond which volume credit is zero.
    pub volume_error_zero: f64,
    /// `bbox_min` deviation earning full origin credit.
    pub origin_perfect: f64,
    /// `bbox_min` deviation at and beyond which origin credit is zero.
    pub origin_zero: f64,
    /// Fraction of a unit deducted per extra candidate hole.
    pub extra_penalty: f64,
    /// Max diameter difference for a candidate to be considered.
    pub diameter_tolerance: f64,
    /// A match is accepted only below this location distance.
    pub position_max: f64,
    /// Location distance earning full position credit.
    pub position_perfect: f64,
    /// A match is accepted only below this axis angle, in degrees.
    pub axis_angle_max_deg: f64,
    pub position_weight: f64,
    pub axis_weight: f64,
    /// Total points (0-100) needed for a pass.
    pub pass_threshold: f64,
    /// Total points (0-100) for the "high precision" remark.
    pub excellent_threshold: f64,
    /// Origin deviation above which the summary warns.
    pub origin_warning: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: DimensionWeights::default(),
            volume_error_perfect: 0.01,
            volume_error_zero: 0.05,
            origin_perfect: 0.1,
            origin_zero: 2.0,
            extra_penalty: 0.5,
            diameter_tolerance: 0.2,
            position_max: 2.0,
            position_perfect: 0.1,
            axis_angle_max_deg: 15.0,
            position_weight: 0.7,
            axis_weight: 0.3,
            pass_threshold: 60.0,
            excellent_threshold: 90.0,
            origin_warning: 0.5,
        }
    }
}

const WEIGHT_EPS: f64 = 1e-9;

fn config_error(reason: String) -> ScoreError {
    ScoreError::ToleranceConfig { reason }
}

fn require_non_negative(fields: &[(&str, f64)]) -> Result<(), ScoreError> {
    for &(name, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(config_error(format!("{} must be finite and >= 0, got {}", name, value)));
        }
    }
    Ok(())
}

fn require_band(name: &str, perfect: f64, zero: f64) -> Result<(), ScoreError> {
    if perfect >= zero {
        return Err(config_error(format!(
            "{}: perfect band {} must be below the zero cut-off {}",
            name, perfect, zero
        )));
    }
    Ok(())
}

impl ScoringConfig {
    /// Return `self` if every constant is usable.
    pub fn validated(self) -> Result<Self, ScoreError> {
        require_non_negative(&[
            ("weights.global", self.weights.global),
            ("weights.quantity", self.weights.quantity),
            ("weights.precision", self.weights.precision),
            ("volume_error_perfect", self.volume_error_perfect),
            ("volume_error_zero", self.volume_error_zero),
            ("origin_perfect", self.origin_perfect),
            ("origin_zero", self.origin_zero),
            ("extra_penalty", self.extra_penalty),
            ("diameter_tolerance", self.diameter_tolerance),
            ("position_max", self.position_max),
            ("position_perfect", self.position_perfect),
            ("axis_angle_max_deg", self.axis_angle_max_deg),
            ("position_weight", self.position_weight),
            ("axis_weight", self.axis_weight),
            ("pass_threshold", self.pass_threshold),
            ("excellent_threshold", self.excellent_threshold),
            ("origin_warning", self.origin_warning),
        ])?;
        if (self.weights.total() - 100.0).abs() > WEIGHT_EPS {
            return Err(config_error(format!(
                "dimension weights must sum to 100, got {}",
                self.weights.total()
            )));
        }
        if (self.position_weight + self.axis_weight - 1.0).abs() > WEIGHT_EPS {
            return Err(config_error(format!(
                "position_weight + axis_weight must be 1, got {}",
                self.position_weight + self.axis_weight
            )));
        }
        require_band("volume error", self.volume_error_perfect, self.volume_error_zero)?;
        require_band("origin deviation", self.origin_perfect, self.origin_zero)?;
        require_band("position", self.position_perfect, self.position_max)?;
        if self.axis_angle_max_deg <= 0.0 {
            return Err(config_error("axis_angle_max_deg must be positive".to_string()));
        }
        Ok(self)
    }
}

/// Constants of the mesh-distance scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshScoringConfig {
    pub n_samples: usize,
    /// Distance band counted as perfect (inclusive).
    pub tolerance_perfect: f64,
    /// Distance band counted as acceptable (inclusive).
    pub tolerance_acceptable: f64,
    pub weight_perfect: f64,
    pub weight_acceptable: f64,
    /// Seed of the surface sampler.
    pub seed: u64,
    /// Max triangles per BVH leaf.
    pub bvh_leaf_size: usize,
}

impl Default for MeshScoringConfig {
    fn default() -> Self {
        Self {
            n_samples: 10_000,
            tolerance_perfect: 0.3,
            tolerance_acceptable: 2.0,
            weight_perfect: 0.7,
            weight_acceptable: 0.3,
            seed: 0x5eed_cafe,
            bvh_leaf_size: 4,
        }
    }
}

impl MeshScoringConfig {
    pub fn validated(self) -> Result<Self, ScoreError> {
        require_non_negative(&[
            ("tolerance_perfect", self.tolerance_perfect),
            ("tolerance_acceptable", self.tolerance_acceptable),
            ("weight_perfect", self.weight_perfect),
            ("weight_acceptable", self.weight_acceptable),
        ])?;
        if self.n_samples == 0 {
            return Err(config_error("n_samples must be at least 1".to_string()));
        }
        if self.bvh_leaf_size == 0 {
            return Err(config_error("bvh_leaf_size must be at least 1".to_string()));
        }
        if self.tolerance_perfect > self.tolerance_acceptable {
            return Err(config_error(format!(
                "tolerance_perfect {} exceeds tolerance_acceptable {}",
                self.tolerance_perfect, self.tolerance_acceptable
            )));
        }
        if (self.weight_perfect + self.weight_acceptable - 1.0).abs() > WEIGHT_EPS {
            return Err(config_error(format!(
                "mesh weights must sum to 1, got {}",
                self.weight_perfect + self.weight_acceptable
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(ScoringConfig::default().validated().is_ok());
        assert!(MeshScoringConfig::default().validated().is_ok());
    }

    #[test]
    fn weights_must_sum_to_100() {
        let cfg = ScoringConfig {
            weights: DimensionWeights {
                global: 25.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(cfg.validated(), Err(ScoreError::ToleranceConfig { .. })));
    }

    #[test]
    fn negative_tolerance_rejected() {
        let cfg = ScoringConfig {
            diameter_tolerance: -0.2,
            ..Default::default()
        };
        assert!(matches!(cfg.validated(), Err(ScoreError::ToleranceConfig { .. })));
    }

    #[test]
    fn inverted_band_rejected() {
        let cfg = ScoringConfig {
            volume_error_perfect: 0.05,
            volume_error_zero: 0.01,
            ..Default::default()
        };
        assert!(cfg.validated().is_err());

        let mesh = MeshScoringConfig {
            tolerance_perfect: 3.0,
            ..Default::default()
        };
        assert!(mesh.validated().is_err());
    }

    #[test]
    fn partial_json_overrides() {
        let cfg: ScoringConfig = serde_json::from_str(r#"{"diameter_tolerance": 0.5}"#).unwrap();
        assert_eq!(cfg.diameter_tolerance, 0.5);
        assert_eq!(cfg.weights, DimensionWeights::default());
    }
}
