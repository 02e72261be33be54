use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Tolerances and thresholds for cylinder merging and classification.
///
/// All lengths are in model units, angles in radians unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Two radii are the same when they differ by less than this.
    pub radius_tolerance: f64,
    /// Max distance of one axis location from the other axis line.
    pub location_tolerance: f64,
    /// Max angle between two axis directions treated as parallel.
    pub angular_tolerance: f64,
    /// A concave feature sweeping more than this is a hole, otherwise a fillet.
    pub hole_min_swept_angle: f64,
    /// A convex feature with a radius above this is a pin, otherwise a fillet.
    pub pin_min_radius: f64,
    /// Decimal places kept for diameters, locations, axes and geometry.
    pub length_decimals: u32,
    /// Decimal places kept for `angle_deg`.
    pub angle_decimals: u32,
    /// Decimal places of the hole-histogram bucket key.
    pub bucket_decimals: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            radius_tolerance: 0.01,
            location_tolerance: 0.1,
            angular_tolerance: 0.02,
            hole_min_swept_angle: 5.0,
            pin_min_radius: 2.1,
            length_decimals: 4,
            angle_decimals: 1,
            bucket_decimals: 2,
        }
    }
}

impl ExtractionConfig {
    /// Reject non-finite or negative tolerances.
    pub fn validate(&self) -> Result<(), ExtractError> {
        let checks = [
            ("radius_tolerance", self.radius_tolerance),
            ("location_tolerance", self.location_tolerance),
            ("angular_tolerance", self.angular_tolerance),
            ("hole_min_swept_angle", self.hole_min_swept_angle),
            ("pin_min_radius", self.pin_min_radius),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ExtractError::Config {
                    reason: format!("{} must be a finite non-negative number, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ExtractionConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_tolerance_rejected() {
        let cfg = ExtractionConfig {
            location_tolerance: -0.1,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ExtractError::Config { .. })));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: ExtractionConfig = serde_json::from_str(r#"{"bucket_decimals": 1}"#).unwrap();
        assert_eq!(cfg.bucket_decimals, 1);
        assert_eq!(cfg.pin_min_radius, 2.1);
    }
}
