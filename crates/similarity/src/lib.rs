//! Similarity scoring of CAD artifacts against a reference.
//!
//! Two independent paths:
//! - [`feature_graph`] compares two feature reports (volume, bounding box,
//!   hole histogram, hole locations and axes);
//! - [`mesh_distance`] compares two triangle meshes by sampled
//!   closest-point distances.
//!
//! Both are pure functions of their inputs. [`batch`] runs many
//! comparisons on a worker pool.

pub mod batch;
pub mod config;
pub mod error;
pub mod feature_graph;
pub mod mesh_distance;
pub mod summary;

pub use batch::{grade_batch, BatchGrader, ComparisonJob, ComparisonOutcome};
pub use config::{DimensionWeights, MeshScoringConfig, ScoringConfig};
pub use error::ScoreError;
pub use feature_graph::{
    axis_angle_deg, score_feature_graph, FeatureGraphScorer, GreedyNearestMatcher, HoleMatcher, Pairing,
};
pub use kernel_query::{Deadline, DeadlineExceeded};
pub use mesh_distance::{score_mesh_distance, MeshDistanceScorer};
pub use summary::summarize;
