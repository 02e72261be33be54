//! Reference-to-candidate hole pairing.
//!
//! The scorer only needs, for every reference hole, the candidate that
//! credits it (if any). How that candidate is chosen sits behind
//! [`HoleMatcher`] so the greedy rule can be swapped for a global
//! assignment without touching the point arithmetic.

use grading_types::Feature;
use nalgebra::Vector3;

use crate::config::ScoringConfig;

/// Undirected angle between two axes in degrees, in `[0, 90]`.
///
/// Axes `a` and `-a` are the same axis. A zero-length axis compares at 90.
pub fn axis_angle_deg(a: [f64; 3], b: [f64; 3]) -> f64 {
    let a = Vector3::from(a);
    let b = Vector3::from(b);
    let (na, nb) = (a.norm(), b.norm());
    if na == 0.0 || nb == 0.0 {
        return 90.0;
    }
    // atan2 of |a x b| against |a . b| folds theta and 180 - theta together
    a.cross(&b).norm().atan2(a.dot(&b).abs()).to_degrees()
}

pub fn location_distance(a: &Feature, b: &Feature) -> f64 {
    (Vector3::from(a.location) - Vector3::from(b.location)).norm()
}

/// The candidate chosen for one reference hole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pairing {
    pub candidate: usize,
    pub distance: f64,
    pub angle_deg: f64,
}

/// Chooses, per reference hole, which candidate hole credits it.
///
/// Returns one entry per reference hole, in reference order. Acceptance
/// limits (distance, angle) are applied by the caller.
pub trait HoleMatcher: Send + Sync {
    fn pair(&self, reference: &[Feature], candidate: &[Feature], config: &ScoringConfig) -> Vec<Option<Pairing>>;
}

/// Nearest same-diameter candidate per reference hole, chosen independently.
///
/// Two reference holes may pick the same candidate; ties go to the lowest
/// candidate index.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyNearestMatcher;

impl HoleMatcher for GreedyNearestMatcher {
    fn pair(&self, reference: &[Feature], candidate: &[Feature], config: &ScoringConfig) -> Vec<Option<Pairing>> {
        reference
            .iter()
            .map(|gt| {
                let mut best: Option<(usize, f64)> = None;
                for (j, stu) in candidate.iter().enumerate() {
                    if (gt.diameter - stu.diameter).abs() >= config.diameter_tolerance {
                        continue;
                    }
                    let d = location_distance(gt, stu);
                    if best.map_or(true, |(_, bd)| d < bd) {
                        best = Some((j, d));
                    }
                }
                best.map(|(j, distance)| Pairing {
                    candidate: j,
                    distance,
                    angle_deg: axis_angle_deg(gt.axis, candidate[j].axis),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn opposite_axes_are_parallel() {
        assert_eq!(axis_angle_deg([0.0, 0.0, 1.0], [0.0, 0.0, -1.0]), 0.0);
    }

    #[test]
    fn perpendicular_and_degenerate_axes() {
        assert_relative_eq!(axis_angle_deg([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), 90.0);
        assert_eq!(axis_angle_deg([0.0; 3], [0.0, 0.0, 1.0]), 90.0);
    }

    #[test]
    fn tilted_axis_angle() {
        let tilt = 10f64.to_radians();
        let angle = axis_angle_deg([0.0, 0.0, 1.0], [tilt.sin(), 0.0, -tilt.cos()]);
        assert_relative_eq!(angle, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn greedy_picks_nearest_within_diameter_tolerance() {
        let reference = [Feature::hole(5.0, [0.0; 3], [0.0, 0.0, 1.0])];
        let candidate = [
            Feature::hole(8.0, [0.0; 3], [0.0, 0.0, 1.0]),
            Feature::hole(5.1, [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            Feature::hole(4.95, [0.5, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ];
        let pairs = GreedyNearestMatcher.pair(&reference, &candidate, &ScoringConfig::default());
        let p = pairs[0].unwrap();
        assert_eq!(p.candidate, 2);
        assert_relative_eq!(p.distance, 0.5);
    }

    #[test]
    fn ties_go_to_first_candidate() {
        let reference = [Feature::hole(5.0, [0.0; 3], [0.0, 0.0, 1.0])];
        let candidate = [
            Feature::hole(5.0, [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            Feature::hole(5.0, [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ];
        let pairs = GreedyNearestMatcher.pair(&reference, &candidate, &ScoringConfig::default());
        assert_eq!(pairs[0].unwrap().candidate, 0);
    }

    #[test]
    fn shared_best_candidate_is_allowed() {
        let reference = [
            Feature::hole(5.0, [0.0; 3], [0.0, 0.0, 1.0]),
            Feature::hole(5.0, [0.4, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ];
        let candidate = [Feature::hole(5.0, [0.2, 0.0, 0.0], [0.0, 0.0, 1.0])];
        let pairs = GreedyNearestMatcher.pair(&reference, &candidate, &ScoringConfig::default());
        assert_eq!(pairs[0].unwrap().candidate, 0);
        assert_eq!(pairs[1].unwrap().candidate, 0);
    }

    #[test]
    fn no_diameter_match_gives_none() {
        let reference = [Feature::hole(5.0, [0.0; 3], [0.0, 0.0, 1.0])];
        let candidate = [Feature::hole(5.2, [0.0; 3], [0.0, 0.0, 1.0])];
        let pairs = GreedyNearestMatcher.pair(&reference, &candidate, &ScoringConfig::default());
        assert!(pairs[0].is_none());
    }
}
