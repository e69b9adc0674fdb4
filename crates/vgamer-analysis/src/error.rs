//! Analysis error types.

use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Notice shown to the user for any analysis failure.
pub const ANALYSIS_FAILED_NOTICE: &str = "Failed to analyze video. Please try again.";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gemini request failed: {0}")]
    Request(String),

    #[error("Gemini API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("No content in Gemini response")]
    EmptyResponse,

    #[error("Failed to parse segments JSON: {0}")]
    Parse(String),

    #[error("Analysis returned no segments")]
    NoSegments,
}

impl AnalysisError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Single user-facing notice; details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::NoSegments => {
                "No highlight segments were found in this video.".to_string()
            }
            _ => ANALYSIS_FAILED_NOTICE.to_string(),
        }
    }

    /// Whether a retry by the user could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            AnalysisError::Request(_) => true,
            AnalysisError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
