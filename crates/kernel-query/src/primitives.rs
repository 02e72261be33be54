//! Canned mock parts used across the test suites.

use std::f64::consts::FRAC_PI_2;

use crate::mock_kernel::MockSolid;

const Z: [f64; 3] = [0.0, 0.0, 1.0];

/// Rectangular plate `size` x `thickness` on the XY plane with vertical
/// through holes given as `(center_xy, diameter)`.
pub fn plate_with_holes(size: [f64; 2], thickness: f64, holes: &[([f64; 2], f64)]) -> MockSolid {
    let mut b = MockSolid::builder("plate").block([0.0, 0.0, 0.0], [size[0], size[1], thickness]);
    for &([x, y], d) in holes {
        b = b.hole([x, y, 0.0], Z, d, thickness);
    }
    b.build()
}

/// Square flange with a central shaft standing on it.
pub fn flanged_shaft(flange: f64, flange_thickness: f64, shaft_diameter: f64, shaft_height: f64) -> MockSolid {
    let c = flange / 2.0;
    MockSolid::builder("flanged_shaft")
        .block([0.0, 0.0, 0.0], [flange, flange, flange_thickness])
        .pin([c, c, flange_thickness], Z, shaft_diameter, shaft_height)
        .build()
}

/// Block with its four vertical edges rounded by `radius`.
pub fn filleted_block(size: [f64; 3], radius: f64) -> MockSolid {
    let [sx, sy, sz] = size;
    let r = radius;
    // (axis location, start angle) for each corner; each fillet sweeps a quarter turn
    let corners = [
        ([sx - r, sy - r, 0.0], 0.0),
        ([r, sy - r, 0.0], FRAC_PI_2),
        ([r, r, 0.0], 2.0 * FRAC_PI_2),
        ([sx - r, r, 0.0], 3.0 * FRAC_PI_2),
    ];
    let mut b = MockSolid::builder("filleted_block").block([0.0, 0.0, 0.0], size);
    for (loc, start) in corners {
        b = b.fillet(loc, Z, r, sz, start, FRAC_PI_2, false);
    }
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{SolidQuery, SurfaceQuery};
    use crate::types::SurfaceKind;

    fn cylinder_count(solid: &MockSolid) -> usize {
        solid
            .faces()
            .iter()
            .filter(|f| f.surface_kind() == SurfaceKind::Cylinder)
            .count()
    }

    #[test]
    fn plate_has_two_faces_per_hole() {
        let p = plate_with_holes([40.0, 20.0], 5.0, &[([10.0, 10.0], 6.0), ([30.0, 10.0], 6.0)]);
        assert_eq!(cylinder_count(&p), 4);
        assert!(p.volume().unwrap() < 40.0 * 20.0 * 5.0);
    }

    #[test]
    fn filleted_block_has_four_convex_quarters() {
        let b = filleted_block([20.0, 10.0, 5.0], 1.0);
        assert_eq!(cylinder_count(&b), 4);
        assert!(b
            .faces()
            .iter()
            .filter(|f| f.surface_kind() == SurfaceKind::Cylinder)
            .all(|f| !f.orientation().is_reversed()));
    }

    #[test]
    fn flanged_shaft_reaches_shaft_top() {
        let s = flanged_shaft(30.0, 4.0, 10.0, 20.0);
        let (_, max) = s.bounding_box().unwrap();
        assert!((max[2] - 24.0).abs() < 1e-9);
    }
}
