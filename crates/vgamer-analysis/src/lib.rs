//! Highlight analysis for the VClip Gamer editor.
//!
//! The editor hands a video to a [`SegmentAnalyzer`] and receives the
//! highlight segments, subtitles and crop regions. [`GeminiAnalyzer`] talks to
//! the Gemini API; [`FixtureAnalyzer`] answers with the built-in sample.

pub mod config;
pub mod error;
pub mod fixture;
pub mod gemini;
pub mod metrics;

use async_trait::async_trait;
use vgamer_models::VideoSegment;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, AnalysisResult, ANALYSIS_FAILED_NOTICE};
pub use fixture::FixtureAnalyzer;
pub use gemini::{AnalysisOutcome, GeminiAnalyzer};

/// Turns a video into highlight segments.
#[async_trait]
pub trait SegmentAnalyzer: Send + Sync {
    async fn analyze(&self, video: &[u8], mime_type: &str) -> AnalysisResult<Vec<VideoSegment>>;
}
