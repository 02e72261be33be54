//! Mesh-distance comparison.
//!
//! Points are sampled by area over the candidate surface; each is scored by
//! its unsigned distance to the closest point of the reference surface.
//! Non-watertight and multi-body meshes are fine.

pub mod bvh;
pub mod sampling;
pub mod stats;

use std::time::Duration;

use grading_types::MeshScore;
use kernel_query::{Deadline, MeshSource, TriMesh};
use tracing::{debug, info, instrument};

pub use bvh::{closest_point_on_triangle, TriangleBvh};
pub use sampling::{sample_surface, SplitMix64};
pub use stats::DistanceStats;

use crate::config::MeshScoringConfig;
use crate::error::ScoreError;

/// How many nearest-point queries run between deadline checks.
const DEADLINE_STRIDE: usize = 256;

#[derive(Debug, Clone)]
pub struct MeshDistanceScorer {
    config: MeshScoringConfig,
    timeout: Option<Duration>,
}

impl MeshDistanceScorer {
    pub fn new(config: MeshScoringConfig) -> Result<Self, ScoreError> {
        Ok(Self {
            config: config.validated()?,
            timeout: None,
        })
    }

    /// Fail with [`ScoreError::Timeout`] once `timeout` has elapsed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn config(&self) -> &MeshScoringConfig {
        &self.config
    }

    /// Score any two mesh sources; multi-body sources are concatenated.
    pub fn score_sources<C, R>(&self, candidate: &C, reference: &R) -> Result<MeshScore, ScoreError>
    where
        C: MeshSource + ?Sized,
        R: MeshSource + ?Sized,
    {
        let candidate = candidate.tri_mesh()?;
        let reference = reference.tri_mesh()?;
        self.score(&candidate, &reference)
    }

    #[instrument(skip_all, fields(candidate_tris = candidate.num_triangles(), reference_tris = reference.num_triangles()))]
    pub fn score(&self, candidate: &TriMesh, reference: &TriMesh) -> Result<MeshScore, ScoreError> {
        let deadline = Deadline::from_option(self.timeout);
        candidate.validate()?;
        reference.validate()?;
        if candidate.is_empty() {
            return Err(ScoreError::Input {
                reason: "candidate mesh has no triangles".to_string(),
            });
        }
        if reference.is_empty() {
            return Err(ScoreError::Input {
                reason: "reference mesh has no triangles".to_string(),
            });
        }

        let cfg = &self.config;
        let samples = sample_surface(candidate, cfg.n_samples, cfg.seed)?;
        let bvh = TriangleBvh::build(reference, cfg.bvh_leaf_size);
        debug!(samples = samples.len(), "reference hierarchy built");

        let mut distances = Vec::with_capacity(samples.len());
        for (i, p) in samples.iter().enumerate() {
            if i % DEADLINE_STRIDE == 0 {
                deadline.check("nearest-point query")?;
            }
            let d = bvh.closest_distance(p).ok_or_else(|| ScoreError::Input {
                reason: "reference mesh has no triangles".to_string(),
            })?;
            distances.push(d);
        }

        let stats = DistanceStats::compute(&distances, cfg.tolerance_perfect, cfg.tolerance_acceptable).ok_or_else(
            || ScoreError::Input {
                reason: "no surface samples".to_string(),
            },
        )?;
        let score = (cfg.weight_perfect * stats.ratio_perfect + cfg.weight_acceptable * stats.ratio_acceptable)
            .clamp(0.0, 1.0);

        info!(
            score,
            mean = stats.mean,
            ratio_perfect = stats.ratio_perfect,
            ratio_acceptable = stats.ratio_acceptable,
            "mesh distance scored"
        );

        Ok(MeshScore {
            score,
            mean_dist: stats.mean,
            median_dist: stats.median,
            max_dist: stats.max,
            ratio_perfect: stats.ratio_perfect,
            ratio_acceptable: stats.ratio_acceptable,
            n_sample_points: distances.len(),
            tolerance_perfect: cfg.tolerance_perfect,
            tolerance_acceptable: cfg.tolerance_acceptable,
        })
    }
}

/// Score `candidate` against `reference` with `config`.
pub fn score_mesh_distance(
    candidate: &TriMesh,
    reference: &TriMesh,
    config: &MeshScoringConfig,
) -> Result<MeshScore, ScoreError> {
    MeshDistanceScorer::new(*config)?.score(candidate, reference)
}
