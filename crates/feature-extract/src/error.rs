use kernel_query::{DeadlineExceeded, FaceId, KernelError};

/// Errors raised while extracting a feature report from a solid.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("solid has non-positive volume {volume}")]
    ZeroVolume { volume: f64 },

    #[error("non-finite {what} reported by kernel")]
    NonFinite { what: String },

    #[error("degenerate cylinder axis on face {face:?}")]
    DegenerateAxis { face: FaceId },

    #[error("invalid extraction config: {reason}")]
    Config { reason: String },

    #[error("extraction timed out: {0}")]
    Timeout(#[from] DeadlineExceeded),
}
