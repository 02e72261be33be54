//! Harness around the scoring core.
//!
//! Loads the artifacts the scorers consume and renders what they produce.
//!
//! # Key Components
//!
//! - [`stl`]: binary and ASCII STL reading into [`kernel_query::TriMesh`], plus export
//! - [`io`]: JSON feature reports and scoring configs on disk
//! - [`report`]: structured text rendering of score results
//! - [`helpers`]: error type and the single-comparison entry points used by `grade`

pub mod helpers;
pub mod io;
pub mod report;
pub mod stl;

pub use helpers::{grade_feature_files, grade_mesh_files, FeatureGrade, HarnessError};
pub use report::{FeatureGradeReport, MeshGradeReport};
