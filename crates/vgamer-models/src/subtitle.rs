//! Timed subtitle captions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::format_seconds_label;

/// A caption shown over the composite during `[start_time, end_time]`.
///
/// `id` is unique within the owning segment and survives text edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subtitle {
    pub id: String,
    /// Absolute source-video time in seconds
    pub start_time: f64,
    /// Absolute source-video time in seconds
    pub end_time: f64,
    pub text: String,
}

impl Subtitle {
    /// Create a new subtitle.
    pub fn new(id: impl Into<String>, start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time,
            text: text.into(),
        }
    }

    /// Whether `time` falls inside the caption interval (inclusive on both ends).
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.end_time
    }

    /// Timing label as shown in the transcript list, e.g. `1.0s - 3.0s`.
    pub fn time_label(&self) -> String {
        format!(
            "{} - {}",
            format_seconds_label(self.start_time),
            format_seconds_label(self.end_time)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let sub = Subtitle::new("1", 1.0, 3.0, "GG");
        assert!(sub.contains(1.0));
        assert!(sub.contains(3.0));
        assert!(!sub.contains(3.01));
        assert!(!sub.contains(f64::NAN));
    }

    #[test]
    fn test_time_label() {
        assert_eq!(Subtitle::new("2", 3.5, 6.0, "x").time_label(), "3.5s - 6.0s");
    }

    #[test]
    fn test_wire_names() {
        let sub: Subtitle = serde_json::from_str(
            r#"{"id": "7", "startTime": 1.5, "endTime": 2, "text": "nice"}"#,
        )
        .unwrap();
        assert_eq!(sub.start_time, 1.5);
        assert_eq!(sub.end_time, 2.0);
    }
}
