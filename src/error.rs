use thiserror::Error;

/// Error type returned by a [`Normalizer`](crate::Normalizer)
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, VsmError>;

#[derive(Debug, Error)]
pub enum VsmError {
    /// The normalizer rejected the sentence.
    /// Nothing was trained and no ranking was produced.
    #[error("failed to normalize sentence: {0}")]
    Normalize(#[source] BoxError),
    /// The training stream was cancelled.
    /// Emitted once as the last outcome of the stream.
    #[error("training stream cancelled")]
    Cancelled,
}

impl VsmError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, VsmError::Cancelled)
    }
}
