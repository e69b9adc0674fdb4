//! Error types for layout and playback operations.

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors raised by the core.
///
/// Missing crops and unmounted media handles are absorbed locally and never
/// appear here.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Invalid styling: {0}")]
    InvalidStyling(String),

    #[error("Invalid segment: {0}")]
    InvalidSegment(String),

    #[error("Segment index {index} out of range ({count} segments)")]
    SegmentOutOfRange { index: usize, count: usize },

    #[error("Invalid source dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

impl MediaError {
    /// Create an invalid styling error.
    pub fn invalid_styling(message: impl Into<String>) -> Self {
        Self::InvalidStyling(message.into())
    }

    /// Create an invalid segment error.
    pub fn invalid_segment(message: impl Into<String>) -> Self {
        Self::InvalidSegment(message.into())
    }
}
