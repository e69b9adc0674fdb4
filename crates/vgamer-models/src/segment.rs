//! Highlight segment models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rect::CropRect;
use crate::subtitle::Subtitle;

/// One candidate highlight window of the source video.
///
/// Subtitles are kept in the order the analysis produced them (ascending
/// `start_time` is assumed, never re-sorted). Missing crops mean "use the
/// full frame" and are resolved by the crop mapper, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoSegment {
    /// Window start in seconds (absolute source time)
    pub start_time: f64,
    /// Window end in seconds (absolute source time)
    pub end_time: f64,
    /// Short description of the moment
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub subtitles: Vec<Subtitle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gameplay_crop: Option<CropRect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_cam_crop: Option<CropRect>,
}

impl VideoSegment {
    /// Create a segment without subtitles or crops.
    pub fn new(start_time: f64, end_time: f64, summary: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            summary: summary.into(),
            subtitles: Vec::new(),
            gameplay_crop: None,
            face_cam_crop: None,
        }
    }

    pub fn with_subtitles(mut self, subtitles: Vec<Subtitle>) -> Self {
        self.subtitles = subtitles;
        self
    }

    pub fn with_crops(mut self, gameplay: Option<CropRect>, face_cam: Option<CropRect>) -> Self {
        self.gameplay_crop = gameplay;
        self.face_cam_crop = face_cam;
        self
    }

    /// Window length in seconds (never negative).
    pub fn duration(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }

    /// Whether `time` lies inside the window (inclusive).
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.end_time
    }

    /// Clamp a time into the window. Non-finite input maps to the window start.
    pub fn clamp_time(&self, time: f64) -> f64 {
        if !time.is_finite() {
            return self.start_time;
        }
        time.max(self.start_time).min(self.end_time)
    }

    /// Validate the segment window and subtitle timings.
    pub fn validate(&self) -> Result<(), String> {
        if !self.start_time.is_finite() || !self.end_time.is_finite() {
            return Err("Segment times must be finite".to_string());
        }

        if self.end_time <= self.start_time {
            return Err(format!(
                "Segment end ({}) must be after start ({})",
                self.end_time, self.start_time
            ));
        }

        for sub in &self.subtitles {
            if sub.start_time > sub.end_time {
                return Err(format!("Subtitle {} ends before it starts", sub.id));
            }
            if sub.start_time < self.start_time || sub.end_time > self.end_time {
                return Err(format!(
                    "Subtitle {} ({}) lies outside the segment window",
                    sub.id,
                    sub.time_label()
                ));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for sub in &self.subtitles {
            if !seen.insert(sub.id.as_str()) {
                return Err(format!("Duplicate subtitle id: {}", sub.id));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analysis_payload() {
        let json = r#"{
            "startTime": 12,
            "endTime": 72,
            "summary": "Clutch 1v4",
            "gameplayCrop": {"x": 0, "y": 0, "width": 100, "height": 70},
            "subtitles": [{"id": "a", "startTime": 13, "endTime": 15, "text": "no way"}]
        }"#;
        let seg: VideoSegment = serde_json::from_str(json).unwrap();
        assert_eq!(seg.duration(), 60.0);
        assert_eq!(seg.gameplay_crop, Some(CropRect::new(0.0, 0.0, 100.0, 70.0)));
        assert!(seg.face_cam_crop.is_none());
        assert!(seg.validate().is_ok());
    }

    #[test]
    fn test_clamp_time() {
        let seg = VideoSegment::new(10.0, 20.0, "x");
        assert_eq!(seg.clamp_time(5.0), 10.0);
        assert_eq!(seg.clamp_time(25.0), 20.0);
        assert_eq!(seg.clamp_time(12.5), 12.5);
        assert_eq!(seg.clamp_time(f64::NAN), 10.0);
    }

    #[test]
    fn test_validate_rejects_bad_windows() {
        assert!(VideoSegment::new(5.0, 5.0, "x").validate().is_err());

        let dup = VideoSegment::new(0.0, 10.0, "x").with_subtitles(vec![
            Subtitle::new("1", 0.0, 1.0, "a"),
            Subtitle::new("1", 2.0, 3.0, "b"),
        ]);
        assert!(dup.validate().is_err());
    }

    #[test]
    fn test_validate_subtitles_inside_window() {
        let inside = VideoSegment::new(10.0, 20.0, "x")
            .with_subtitles(vec![Subtitle::new("1", 10.0, 20.0, "edges are inclusive")]);
        assert!(inside.validate().is_ok());

        let early = VideoSegment::new(10.0, 20.0, "x")
            .with_subtitles(vec![Subtitle::new("1", 9.5, 12.0, "too early")]);
        assert!(early.validate().is_err());

        let late = VideoSegment::new(10.0, 20.0, "x")
            .with_subtitles(vec![Subtitle::new("1", 18.0, 20.5, "too late")]);
        assert!(late.validate().unwrap_err().contains("outside the segment window"));
    }
}
