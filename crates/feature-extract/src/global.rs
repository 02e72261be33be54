use grading_types::GlobalGeometry;
use kernel_query::SolidQuery;
use tracing::{debug, instrument};

use crate::error::ExtractError;

/// Volume and axis-aligned bounding box of `solid`, unrounded.
///
/// An empty solid or a non-positive volume is an error rather than a zero
/// result, since the scorer divides by the reference volume.
#[instrument(skip(solid))]
pub fn extract_global_geometry(solid: &dyn SolidQuery) -> Result<GlobalGeometry, ExtractError> {
    let volume = solid.volume()?;
    if !volume.is_finite() {
        return Err(ExtractError::NonFinite {
            what: "volume".to_string(),
        });
    }
    if volume <= 0.0 {
        return Err(ExtractError::ZeroVolume { volume });
    }

    let (min, max) = solid.bounding_box()?;
    if min.iter().chain(max.iter()).any(|c| !c.is_finite()) {
        return Err(ExtractError::NonFinite {
            what: "bounding box".to_string(),
        });
    }

    debug!(volume, ?min, ?max, "global geometry");
    Ok(GlobalGeometry::new(volume, min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kernel_query::MockSolid;

    #[test]
    fn block_geometry() {
        let solid = MockSolid::builder("blk")
            .block([1.0, 2.0, 3.0], [4.0, 6.0, 8.0])
            .build();
        let g = extract_global_geometry(&solid).unwrap();
        assert_relative_eq!(g.volume, 60.0);
        assert_eq!(g.bbox_min, [1.0, 2.0, 3.0]);
        assert_eq!(g.bbox_dims, [3.0, 4.0, 5.0]);
    }

    #[test]
    fn empty_solid_is_kernel_error() {
        let solid = MockSolid::builder("none").build();
        assert!(matches!(
            extract_global_geometry(&solid),
            Err(ExtractError::Kernel(_))
        ));
    }

    #[test]
    fn zero_volume_rejected() {
        let solid = MockSolid::builder("flat")
            .block([0.0; 3], [1.0, 1.0, 1.0])
            .with_volume(0.0)
            .build();
        assert!(matches!(
            extract_global_geometry(&solid),
            Err(ExtractError::ZeroVolume { .. })
        ));
    }
}
