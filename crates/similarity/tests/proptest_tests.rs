//! Property-based tests for the scorers.

use std::collections::BTreeMap;

use grading_types::*;
use proptest::prelude::*;
use similarity::*;

fn arb_axis() -> impl Strategy<Value = [f64; 3]> {
    [-1.0f64..1.0, -1.0f64..1.0, 0.1f64..1.0]
}

fn arb_hole(slot: usize) -> impl Strategy<Value = Feature> {
    // one hole per 10-unit grid slot keeps every hole its own nearest neighbour
    (1.0f64..8.0, 0.0f64..3.0, 0.0f64..3.0, arb_axis()).prop_map(move |(d, x, y, axis)| {
        Feature::hole(d, [10.0 * slot as f64 + x, y, 0.0], axis)
    })
}

fn arb_report() -> impl Strategy<Value = FeatureReport> {
    (1.0f64..1e6, prop::collection::vec(any::<bool>(), 0..10))
        .prop_flat_map(|(volume, slots)| {
            let holes: Vec<_> = slots
                .iter()
                .enumerate()
                .filter(|(_, used)| **used)
                .map(|(i, _)| arb_hole(i))
                .collect();
            (Just(volume), holes)
        })
        .prop_map(|(volume, holes)| {
            let mut hole_histogram = BTreeMap::new();
            for h in &holes {
                *hole_histogram.entry(format!("{:.2}", h.diameter)).or_insert(0) += 1;
            }
            FeatureReport {
                meta: ReportMeta::default(),
                geometry: GlobalGeometry::new(volume, [0.0; 3], [100.0, 10.0, 10.0]),
                features: FeatureBlock {
                    hole_count: holes.len(),
                    hole_histogram,
                    holes_details: holes,
                    ..Default::default()
                },
            }
        })
}

proptest! {
    #[test]
    fn self_comparison_is_one(report in arb_report()) {
        let s = score_feature_graph(&report, &report, &ScoringConfig::default()).unwrap();
        prop_assert_eq!(s.score, 1.0);
    }

    #[test]
    fn score_stays_in_unit_interval(a in arb_report(), b in arb_report()) {
        let s = score_feature_graph(&a, &b, &ScoringConfig::default()).unwrap();
        prop_assert!((0.0..=1.0).contains(&s.score));
        let sub = s.sub_scores();
        prop_assert!((0.0..=20.0).contains(&sub.global));
        prop_assert!((0.0..=30.0).contains(&sub.quantity));
        prop_assert!((0.0..=50.0 + 1e-9).contains(&sub.precision));
    }

    #[test]
    fn axis_angle_is_undirected_and_symmetric(a in arb_axis(), b in arb_axis()) {
        let neg = [-b[0], -b[1], -b[2]];
        let ab = axis_angle_deg(a, b);
        prop_assert!((ab - axis_angle_deg(b, a)).abs() < 1e-9);
        prop_assert!((ab - axis_angle_deg(a, neg)).abs() < 1e-9);
        prop_assert!((0.0..=90.0 + 1e-9).contains(&ab));
    }

    #[test]
    fn axis_against_itself_is_zero(a in arb_axis()) {
        prop_assert_eq!(axis_angle_deg(a, a), 0.0);
    }
}
