/// Result alias used throughout the crate.
pub type DebandResult<T> = Result<T, DebandError>;

/// Errors surfaced by buffer construction, option validation and frame dispatch.
///
/// Cancellation is not an error: an aborted frame returns `Ok` with
/// [`RenderStats::aborted`](crate::RenderStats::aborted) set.
#[derive(thiserror::Error, Debug)]
pub enum DebandError {
    /// Invalid options, geometry or buffer layout.
    #[error("validation error: {0}")]
    Validation(String),

    /// Source, destination and mask pixel layouts do not agree.
    #[error("image format error: {0}")]
    Format(String),

    /// Failure while running a frame (worker pool, internal invariants).
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DebandError {
    /// Build a [`DebandError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DebandError::Format`].
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`DebandError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
