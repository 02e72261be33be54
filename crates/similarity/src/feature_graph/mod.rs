//! Feature-graph comparison of two feature reports.
//!
//! Three independent dimensions are scored on a 0-100 point scale
//! (global geometry, feature quantity, feature precision), summed, and
//! divided by 100.

pub mod global;
pub mod matching;
pub mod precision;
pub mod quantity;

use grading_types::{Breakdown, Feature, FeatureGraphScore, FeatureReport, PrecisionDetails};
use tracing::{debug, instrument};

pub use global::score_global;
pub use matching::{axis_angle_deg, GreedyNearestMatcher, HoleMatcher, Pairing};
pub use precision::score_precision;
pub use quantity::score_quantity;

use crate::config::ScoringConfig;
use crate::error::ScoreError;

/// Scores candidate reports against reference reports.
pub struct FeatureGraphScorer {
    config: ScoringConfig,
    matcher: Box<dyn HoleMatcher>,
}

impl std::fmt::Debug for FeatureGraphScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureGraphScorer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FeatureGraphScorer {
    /// Scorer with the greedy nearest-candidate matcher.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoreError> {
        Ok(Self {
            config: config.validated()?,
            matcher: Box::new(GreedyNearestMatcher),
        })
    }

    /// Replace the hole matcher.
    pub fn with_matcher(mut self, matcher: impl HoleMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    #[instrument(skip_all, fields(candidate = %candidate.meta.filename, reference = %reference.meta.filename))]
    pub fn score(&self, candidate: &FeatureReport, reference: &FeatureReport) -> Result<FeatureGraphScore, ScoreError> {
        check_holes("candidate", candidate.holes())?;
        check_holes("reference", reference.holes())?;

        let global = score_global(&candidate.geometry, &reference.geometry, &self.config)?;
        let quantity = score_quantity(
            &candidate.features.hole_histogram,
            &reference.features.hole_histogram,
            &self.config,
        );
        let precision = score_precision(candidate.holes(), reference.holes(), self.matcher.as_ref(), &self.config);

        let raw_score_100 = global.score + quantity.score + precision.score;
        let score = (raw_score_100 / 100.0).clamp(0.0, 1.0);

        let (matched_features, total_gt_features) = match &precision.details {
            PrecisionDetails::Matched {
                matched_features,
                total_gt_features,
                ..
            } => (Some(*matched_features), Some(*total_gt_features)),
            PrecisionDetails::Note(_) => (None, None),
        };

        debug!(
            global = global.score,
            quantity = quantity.score,
            precision = precision.score,
            score,
            "feature graph scored"
        );

        Ok(FeatureGraphScore {
            score,
            raw_score_100,
            volume_error_ratio: global.details.volume_error_ratio,
            origin_deviation: global.details.origin_deviation,
            matched_features,
            total_gt_features,
            breakdown: Breakdown {
                global_geometry: global,
                feature_quantity: quantity,
                feature_precision: precision,
            },
        })
    }
}

/// Score `candidate` against `reference` with the greedy matcher.
pub fn score_feature_graph(
    candidate: &FeatureReport,
    reference: &FeatureReport,
    config: &ScoringConfig,
) -> Result<FeatureGraphScore, ScoreError> {
    FeatureGraphScorer::new(*config)?.score(candidate, reference)
}

fn check_holes(side: &str, holes: &[Feature]) -> Result<(), ScoreError> {
    for (i, h) in holes.iter().enumerate() {
        let finite = h.diameter.is_finite()
            && h.location.iter().all(|c| c.is_finite())
            && h.axis.iter().all(|c| c.is_finite());
        if !finite {
            return Err(ScoreError::Input {
                reason: format!("{} hole {} has non-finite fields", side, i),
            });
        }
    }
    Ok(())
}
