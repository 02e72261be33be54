use grading_types::{DimensionScore, GlobalDetails, GlobalGeometry};
use nalgebra::Vector3;

use crate::config::ScoringConfig;
use crate::error::ScoreError;

/// Linear falloff: `max` at or below `perfect`, zero at or above `zero`.
pub(crate) fn banded(value: f64, perfect: f64, zero: f64, max: f64) -> f64 {
    if value <= perfect {
        max
    } else if value >= zero {
        0.0
    } else {
        max * (1.0 - (value - perfect) / (zero - perfect))
    }
}

/// Origin credit: full inside the perfect band, then `max * (1 - d / zero)`
/// down to the cut-off.
fn origin_points(deviation: f64, config: &ScoringConfig, max: f64) -> f64 {
    if deviation <= config.origin_perfect {
        max
    } else if deviation >= config.origin_zero {
        0.0
    } else {
        max * (1.0 - deviation / config.origin_zero)
    }
}

/// Volume and origin agreement, each worth half of the global weight.
pub fn score_global(
    candidate: &GlobalGeometry,
    reference: &GlobalGeometry,
    config: &ScoringConfig,
) -> Result<DimensionScore<GlobalDetails>, ScoreError> {
    if !reference.volume.is_finite() || !candidate.volume.is_finite() {
        return Err(ScoreError::Input {
            reason: "non-finite volume in report".to_string(),
        });
    }
    if reference.volume <= 0.0 {
        return Err(ScoreError::Geometry {
            reason: format!("reference volume must be positive, got {}", reference.volume),
        });
    }

    let half = config.weights.global / 2.0;
    let volume_error_ratio = (candidate.volume - reference.volume).abs() / reference.volume;
    let volume_score = banded(
        volume_error_ratio,
        config.volume_error_perfect,
        config.volume_error_zero,
        half,
    );

    let origin_deviation = (Vector3::from(candidate.bbox_min) - Vector3::from(reference.bbox_min)).norm();
    if !origin_deviation.is_finite() {
        return Err(ScoreError::Input {
            reason: "non-finite bounding box in report".to_string(),
        });
    }
    let origin_score = origin_points(origin_deviation, config, half);

    Ok(DimensionScore::new(
        volume_score + origin_score,
        config.weights.global,
        GlobalDetails {
            volume_error_ratio,
            origin_deviation,
            volume_score,
            origin_score,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn geom(volume: f64, min: [f64; 3]) -> GlobalGeometry {
        GlobalGeometry::new(volume, min, [min[0] + 10.0, min[1] + 10.0, min[2] + 10.0])
    }

    #[test]
    fn volume_band_edges() {
        let cfg = ScoringConfig::default();
        let reference = geom(1000.0, [0.0; 3]);
        for (candidate, expected) in [(1010.0, 10.0), (1050.0, 0.0), (1030.0, 5.0), (970.0, 5.0)] {
            let s = score_global(&geom(candidate, [0.0; 3]), &reference, &cfg).unwrap();
            assert_relative_eq!(s.details.volume_score, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn origin_falloff() {
        let cfg = ScoringConfig::default();
        let reference = geom(1000.0, [0.0; 3]);
        let at = |d: f64| {
            score_global(&geom(1000.0, [d, 0.0, 0.0]), &reference, &cfg)
                .unwrap()
                .details
                .origin_score
        };
        assert_relative_eq!(at(0.05), 10.0);
        assert_relative_eq!(at(1.0), 5.0);
        assert_relative_eq!(at(2.0), 0.0);
        assert_relative_eq!(at(5.0), 0.0);
    }

    #[test]
    fn zero_reference_volume_is_geometry_error() {
        let cfg = ScoringConfig::default();
        let err = score_global(&geom(10.0, [0.0; 3]), &geom(0.0, [0.0; 3]), &cfg).unwrap_err();
        assert!(matches!(err, ScoreError::Geometry { .. }));
    }
}
