use kernel_query::{DeadlineExceeded, KernelError};

/// Errors raised by the scorers.
///
/// Dissimilar but well-formed inputs never produce an error; they score low.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// Missing or malformed input. No partial score is possible.
    #[error("invalid input: {reason}")]
    Input { reason: String },

    /// Well-formed input that the scoring formula cannot use.
    #[error("geometry error: {reason}")]
    Geometry { reason: String },

    #[error("invalid scoring config: {reason}")]
    ToleranceConfig { reason: String },

    #[error("comparison timed out: {0}")]
    Timeout(#[from] DeadlineExceeded),

    #[error("worker pool error: {reason}")]
    WorkerPool { reason: String },
}

impl From<KernelError> for ScoreError {
    fn from(err: KernelError) -> Self {
        ScoreError::Input {
            reason: err.to_string(),
        }
    }
}
