use std::collections::BTreeMap;
use std::time::Duration;

use grading_types::{Feature, FeatureBlock, FeatureReport, GlobalGeometry, ReportMeta};
use kernel_query::{Deadline, SolidQuery};
use tracing::{info, instrument};

use crate::config::ExtractionConfig;
use crate::cylinders::{extract_cylindrical_features, CylindricalFeatures};
use crate::error::ExtractError;
use crate::global::extract_global_geometry;

/// Count holes per diameter bucket; the key is the diameter printed with
/// `decimals` places.
pub fn hole_histogram(holes: &[Feature], decimals: u32) -> BTreeMap<String, usize> {
    let mut histogram = BTreeMap::new();
    for hole in holes {
        let key = format!("{:.*}", decimals as usize, hole.diameter);
        *histogram.entry(key).or_insert(0) += 1;
    }
    histogram
}

/// Assemble the canonical report from already-extracted parts.
pub fn build_report(
    filename: &str,
    geometry: &GlobalGeometry,
    features: CylindricalFeatures,
    config: &ExtractionConfig,
) -> FeatureReport {
    let CylindricalFeatures { holes, pins, fillets } = features;
    FeatureReport {
        meta: ReportMeta {
            filename: filename.to_string(),
        },
        geometry: geometry.rounded(config.length_decimals),
        features: FeatureBlock {
            hole_count: holes.len(),
            pin_count: pins.len(),
            fillet_count: fillets.len(),
            hole_histogram: hole_histogram(&holes, config.bucket_decimals),
            holes_details: holes,
            pins_details: pins,
            fillets_details: fillets,
        },
    }
}

/// One-call extraction of a [`FeatureReport`] from a solid.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: ExtractionConfig,
    timeout: Option<Duration>,
}

impl FeatureExtractor {
    pub fn new(config: ExtractionConfig) -> Result<Self, ExtractError> {
        config.validate()?;
        Ok(Self {
            config,
            timeout: None,
        })
    }

    /// Fail with [`ExtractError::Timeout`] once `timeout` has elapsed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    #[instrument(skip(self, solid))]
    pub fn extract(&self, solid: &dyn SolidQuery, filename: &str) -> Result<FeatureReport, ExtractError> {
        let deadline = Deadline::from_option(self.timeout);
        let geometry = extract_global_geometry(solid)?;
        let features = extract_cylindrical_features(solid, &self.config, &deadline)?;
        let report = build_report(filename, &geometry, features, &self.config);
        info!(
            holes = report.features.hole_count,
            pins = report.features.pin_count,
            fillets = report.features.fillet_count,
            "feature report built"
        );
        Ok(report)
    }
}
