//! Feature extraction: turns a solid into a [`grading_types::FeatureReport`].
//!
//! The global extractor reads volume and bounds, the cylinder extractor
//! finds holes, pins and fillets, and the report builder assembles both
//! with a diameter histogram.

pub mod config;
pub mod cylinders;
pub mod error;
pub mod global;
pub mod report;

pub use config::ExtractionConfig;
pub use cylinders::{
    extract_cylindrical_features, merge_cylinders, CylinderKind, CylindricalFeatures, MergedFeature, RawCylinder,
};
pub use error::ExtractError;
pub use global::extract_global_geometry;
pub use report::{build_report, hole_histogram, FeatureExtractor};
