use std::collections::BTreeMap;

use grading_types::{DimensionScore, QuantityDetails};

use crate::config::ScoringConfig;

/// Histogram agreement. Each reference hole is worth an equal share;
/// missing holes cost a full share, extra holes `extra_penalty` of one.
/// Floored at zero.
pub fn score_quantity(
    candidate: &BTreeMap<String, usize>,
    reference: &BTreeMap<String, usize>,
    config: &ScoringConfig,
) -> DimensionScore<QuantityDetails> {
    let max = config.weights.quantity;
    let total: usize = reference.values().sum();
    if total == 0 {
        return DimensionScore::new(max, max, QuantityDetails::Note("No holes in GT".to_string()));
    }

    let unit = max / total as f64;
    let mut score = max;
    let mut missing = Vec::new();
    let mut extra = Vec::new();

    for (bucket, &want) in reference {
        let have = candidate.get(bucket).copied().unwrap_or(0);
        if want > have {
            let diff = want - have;
            score -= diff as f64 * unit;
            missing.push(format!("Missing {} holes of Dia {}mm", diff, bucket));
        }
    }
    for (bucket, &have) in candidate {
        let want = reference.get(bucket).copied().unwrap_or(0);
        if have > want {
            let diff = have - want;
            score -= diff as f64 * unit * config.extra_penalty;
            extra.push(format!("Extra {} holes of Dia {}mm", diff, bucket));
        }
    }

    DimensionScore::new(score.max(0.0), max, QuantityDetails::Counted { missing, extra })
}
