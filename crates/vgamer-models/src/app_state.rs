//! Editor lifecycle state.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the editor is in its submit → analyze → edit → export lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppState {
    /// Waiting for a video
    #[default]
    Idle,
    /// Video bytes are being read
    Uploading,
    /// Analysis request in flight
    Analyzing,
    /// Segments loaded, preview and editing available
    Editing,
    /// Export dialog open
    Exporting,
}

impl AppState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Idle => "IDLE",
            AppState::Uploading => "UPLOADING",
            AppState::Analyzing => "ANALYZING",
            AppState::Editing => "EDITING",
            AppState::Exporting => "EXPORTING",
        }
    }

    /// Whether segments are loaded and previewable.
    pub fn has_segments(&self) -> bool {
        matches!(self, AppState::Editing | AppState::Exporting)
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
