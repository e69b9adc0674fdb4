//! Gemini client for gameplay highlight extraction.
//!
//! Sends the whole video inline with a structured-output schema and parses
//! the returned segment array. One attempt per call; retrying is left to the
//! user.

use async_trait::async_trait;
use base64::Engine;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use vgamer_models::VideoSegment;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::metrics;
use crate::SegmentAnalyzer;

const ANALYSIS_PROMPT: &str = "Analyze this gaming video.
1. Find the best 60s viral segment.
2. Generate subtitles with timing.
3. IMPORTANT: Identify the region of the \"Gameplay\" and the \"Facecam/Webcam\" of the gamer.
4. Return the coordinates as normalized percentages (0-100) for 'gameplayCrop' and 'faceCamCrop' (x, y, width, height).
If no facecam is detected, only return gameplayCrop.";

/// Gemini API request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Segments plus provenance of one analysis call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub segments: Vec<VideoSegment>,
    pub model: String,
    pub analyzed_at: DateTime<Utc>,
}

/// Gemini-backed segment analyzer.
pub struct GeminiAnalyzer {
    config: AnalysisConfig,
    client: Client,
}

impl GeminiAnalyzer {
    pub fn new(config: AnalysisConfig) -> AnalysisResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AnalysisError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create an analyzer from environment variables.
    pub fn from_env() -> AnalysisResult<Self> {
        Self::new(AnalysisConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Analyze `video` and report which model answered and when.
    pub async fn analyze_with_details(
        &self,
        video: &[u8],
        mime_type: &str,
    ) -> AnalysisResult<AnalysisOutcome> {
        info!(
            model = %self.config.model,
            bytes = video.len(),
            mime_type,
            "Requesting segment analysis"
        );
        metrics::record_request(&self.config.model);

        match self.request_segments(video, mime_type).await {
            Ok(segments) => {
                info!(segments = segments.len(), "Segment analysis completed");
                Ok(AnalysisOutcome {
                    segments,
                    model: self.config.model.clone(),
                    analyzed_at: Utc::now(),
                })
            }
            Err(e) => {
                warn!(model = %self.config.model, error = %e, "Segment analysis failed");
                metrics::record_failure(&self.config.model);
                Err(e)
            }
        }
    }

    async fn request_segments(&self, video: &[u8], mime_type: &str) -> AnalysisResult<Vec<VideoSegment>> {
        let request = build_request(video, mime_type);

        let response = self
            .client
            .post(self.config.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::parse(format!("Failed to parse Gemini response: {}", e)))?;

        let text = gemini_response
            .candidates
            .into_iter()
            .find_map(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .filter(|text| !text.trim().is_empty())
            .ok_or(AnalysisError::EmptyResponse)?;

        debug!(chars = text.len(), "Received analysis text");
        parse_segments(&text)
    }
}

#[async_trait]
impl SegmentAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, video: &[u8], mime_type: &str) -> AnalysisResult<Vec<VideoSegment>> {
        self.analyze_with_details(video, mime_type)
            .await
            .map(|outcome| outcome.segments)
    }
}

fn build_request(video: &[u8], mime_type: &str) -> GeminiRequest {
    let data = base64::engine::general_purpose::STANDARD.encode(video);

    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part {
                    inline_data: Some(InlineData {
                        mime_type: mime_type.to_string(),
                        data,
                    }),
                    text: None,
                },
                Part {
                    inline_data: None,
                    text: Some(ANALYSIS_PROMPT.to_string()),
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    }
}

/// Structured-output schema for the segment array.
pub fn response_schema() -> Value {
    let crop = json!({
        "type": "OBJECT",
        "properties": {
            "x": { "type": "NUMBER" },
            "y": { "type": "NUMBER" },
            "width": { "type": "NUMBER" },
            "height": { "type": "NUMBER" }
        }
    });

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "startTime": { "type": "NUMBER" },
                "endTime": { "type": "NUMBER" },
                "summary": { "type": "STRING" },
                "gameplayCrop": crop.clone(),
                "faceCamCrop": crop,
                "subtitles": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "id": { "type": "STRING" },
                            "startTime": { "type": "NUMBER" },
                            "endTime": { "type": "NUMBER" },
                            "text": { "type": "STRING" }
                        },
                        "required": ["id", "startTime", "endTime", "text"]
                    }
                }
            },
            "required": ["startTime", "endTime", "summary", "subtitles"]
        }
    })
}

/// Remove a surrounding Markdown code fence, with or without a language tag.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // drop the info string ("json") up to the first newline
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest.trim_start_matches("json"),
    };
    rest.trim_end().trim_end_matches("```").trim()
}

/// Parse the model's JSON text into segments.
pub fn parse_segments(text: &str) -> AnalysisResult<Vec<VideoSegment>> {
    let segments: Vec<VideoSegment> = serde_json::from_str(strip_code_fences(text))
        .map_err(|e| AnalysisError::parse(format!("Failed to parse segments JSON: {}", e)))?;

    if segments.is_empty() {
        return Err(AnalysisError::NoSegments);
    }
    Ok(segments)
}
