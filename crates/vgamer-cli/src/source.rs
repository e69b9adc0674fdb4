//! Where segments come from.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::warn;
use vgamer_models::VideoSegment;

/// Resolved shell input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Built-in sample segment
    Fixture,
    /// Remote link; answered with the sample segment
    Url(String),
    /// Previously saved analysis result
    SegmentsFile(PathBuf),
    /// Local video sent for analysis
    Video { path: PathBuf, mime_type: &'static str },
}

impl InputSource {
    pub fn resolve(input: Option<&str>, force_fixture: bool) -> anyhow::Result<Self> {
        let Some(input) = input.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::Fixture);
        };
        if force_fixture {
            return Ok(Self::Fixture);
        }
        if input.starts_with("http://") || input.starts_with("https://") {
            return Ok(Self::Url(input.to_string()));
        }

        let path = PathBuf::from(input);
        if has_extension(&path, "json") {
            return Ok(Self::SegmentsFile(path));
        }
        match mime_type_for_path(&path) {
            Some(mime_type) => Ok(Self::Video { path, mime_type }),
            None => bail!("Unsupported input {}: expected a video, a .json segments file or a URL", input),
        }
    }

    /// Label recorded as the editor's source.
    pub fn describe(&self) -> String {
        match self {
            InputSource::Fixture => vgamer_models::fixtures::SAMPLE_VIDEO_URL.to_string(),
            InputSource::Url(url) => url.clone(),
            InputSource::SegmentsFile(path) | InputSource::Video { path, .. } => {
                path.display().to_string()
            }
        }
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// MIME type sent with inline video data.
pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "mp4" => "video/mp4",
        "m4v" => "video/x-m4v",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mpeg" | "mpg" => "video/mpeg",
        _ => return None,
    };
    Some(mime)
}

/// Load segments saved as the analysis JSON array.
pub async fn load_segments(path: &Path) -> anyhow::Result<Vec<VideoSegment>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let segments: Vec<VideoSegment> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse segments in {}", path.display()))?;

    for (index, segment) in segments.iter().enumerate() {
        if let Err(e) = segment.validate() {
            warn!(index, error = %e, "Segment failed validation");
        }
        let crops = [("gameplay", segment.gameplay_crop), ("facecam", segment.face_cam_crop)];
        for (pane, crop) in crops {
            if crop.is_some_and(|rect| !rect.is_within_frame()) {
                warn!(index, pane, "Crop extends past the source frame");
            }
        }
    }
    Ok(segments)
}
