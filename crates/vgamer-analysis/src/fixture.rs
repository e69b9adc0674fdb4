//! Canned analyzer returning the built-in sample segment.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;
use vgamer_models::fixtures::sample_segments;
use vgamer_models::VideoSegment;

use crate::error::AnalysisResult;
use crate::SegmentAnalyzer;

/// Analyzer used for URL submissions and offline runs.
#[derive(Debug, Clone, Default)]
pub struct FixtureAnalyzer {
    delay: Option<Duration>,
}

impl FixtureAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate analysis latency before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl SegmentAnalyzer for FixtureAnalyzer {
    async fn analyze(&self, video: &[u8], mime_type: &str) -> AnalysisResult<Vec<VideoSegment>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        info!(bytes = video.len(), mime_type, "Returning fixture segments");
        Ok(sample_segments())
    }
}
