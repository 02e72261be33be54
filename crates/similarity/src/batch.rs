//! Many independent comparisons on a worker pool, one comparison per task.

use std::time::Duration;

use grading_types::{FeatureGraphScore, FeatureReport, MeshScore};
use kernel_query::TriMesh;
use rayon::prelude::*;
use tracing::{info, instrument};

use crate::config::{MeshScoringConfig, ScoringConfig};
use crate::error::ScoreError;
use crate::feature_graph::FeatureGraphScorer;
use crate::mesh_distance::MeshDistanceScorer;

/// One candidate/reference pair.
#[derive(Debug, Clone)]
pub enum ComparisonJob {
    Features {
        candidate: FeatureReport,
        reference: FeatureReport,
    },
    Mesh {
        candidate: TriMesh,
        reference: TriMesh,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonOutcome {
    Features(FeatureGraphScore),
    Mesh(MeshScore),
}

impl ComparisonOutcome {
    /// Final score in [0, 1].
    pub fn score(&self) -> f64 {
        match self {
            ComparisonOutcome::Features(s) => s.score,
            ComparisonOutcome::Mesh(s) => s.score,
        }
    }
}

/// Runs [`ComparisonJob`]s in parallel with shared, read-only scorers.
#[derive(Debug)]
pub struct BatchGrader {
    features: FeatureGraphScorer,
    mesh: MeshDistanceScorer,
    threads: Option<usize>,
}

impl BatchGrader {
    pub fn new(scoring: ScoringConfig, mesh: MeshScoringConfig) -> Result<Self, ScoreError> {
        Ok(Self {
            features: FeatureGraphScorer::new(scoring)?,
            mesh: MeshDistanceScorer::new(mesh)?,
            threads: None,
        })
    }

    /// Worker count; defaults to rayon's choice (one per core).
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Per-comparison timeout for mesh jobs.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.mesh = self.mesh.with_timeout(timeout);
        self
    }

    pub fn grade_one(&self, job: &ComparisonJob) -> Result<ComparisonOutcome, ScoreError> {
        match job {
            ComparisonJob::Features { candidate, reference } => {
                self.features.score(candidate, reference).map(ComparisonOutcome::Features)
            }
            ComparisonJob::Mesh { candidate, reference } => {
                self.mesh.score(candidate, reference).map(ComparisonOutcome::Mesh)
            }
        }
    }

    /// Grade every job; results come back in input order. A failing job
    /// does not stop the others.
    #[instrument(skip_all, fields(jobs = jobs.len()))]
    pub fn grade(&self, jobs: &[ComparisonJob]) -> Result<Vec<Result<ComparisonOutcome, ScoreError>>, ScoreError> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = self.threads {
            builder = builder.num_threads(n);
        }
        let pool = builder.build().map_err(|e| ScoreError::WorkerPool { reason: e.to_string() })?;

        let results: Vec<_> = pool.install(|| jobs.par_iter().map(|job| self.grade_one(job)).collect());
        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(total = results.len(), failed, "batch graded");
        Ok(results)
    }
}

/// Grade `jobs` with fresh scorers built from `scoring` and `mesh`.
pub fn grade_batch(
    jobs: &[ComparisonJob],
    scoring: &ScoringConfig,
    mesh: &MeshScoringConfig,
    threads: Option<usize>,
) -> Result<Vec<Result<ComparisonOutcome, ScoreError>>, ScoreError> {
    let mut grader = BatchGrader::new(*scoring, *mesh)?;
    if let Some(n) = threads {
        grader = grader.with_threads(n);
    }
    grader.grade(jobs)
}
