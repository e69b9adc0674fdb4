//! Subtitle styling and layout mode definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Composite layout of the vertical frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Single pane, fixed center-crop zoom, no facecam
    Standard,
    /// Gameplay pane stacked above the facecam pane
    #[default]
    GamingSplit,
}

impl LayoutMode {
    pub const ALL: &'static [LayoutMode] = &[LayoutMode::Standard, LayoutMode::GamingSplit];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Standard => "standard",
            LayoutMode::GamingSplit => "gaming-split",
        }
    }

    /// Whether this layout renders a facecam pane.
    pub fn has_facecam(&self) -> bool {
        matches!(self, LayoutMode::GamingSplit)
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = LayoutModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        LayoutMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| LayoutModeParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown layout mode: {0}")]
pub struct LayoutModeParseError(String);

/// Minimum facecam zoom.
pub const MIN_FACE_ZOOM: f64 = 1.0;

/// Maximum facecam zoom.
pub const MAX_FACE_ZOOM: f64 = 2.0;

/// Smallest caption size the styling panel offers, in pixels.
pub const MIN_FONT_SIZE: u32 = 12;

/// Largest caption size the styling panel offers, in pixels.
pub const MAX_FONT_SIZE: u32 = 64;

/// Flat styling configuration owned by the editing shell.
///
/// Colors and font family are CSS strings applied verbatim by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StylingConfig {
    pub font_family: String,
    /// Font size in pixels
    pub font_size: u32,
    pub font_color: String,
    pub background_color: String,
    pub shadow_color: String,
    /// Subtitle position from the bottom of the frame, 0-100
    pub position_y: f64,
    pub is_uppercase: bool,
    pub layout: LayoutMode,
    /// Facecam zoom multiplier, 1-2
    pub face_zoom: f64,
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            font_family: "'Montserrat', sans-serif".to_string(),
            font_size: 24,
            font_color: "#ffffff".to_string(),
            background_color: "rgba(0, 0, 0, 0.5)".to_string(),
            shadow_color: "rgba(0, 0, 0, 0.8)".to_string(),
            position_y: 20.0,
            is_uppercase: true,
            layout: LayoutMode::GamingSplit,
            face_zoom: 1.2,
        }
    }
}

impl StylingConfig {
    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_face_zoom(mut self, zoom: f64) -> Self {
        self.face_zoom = zoom;
        self
    }

    /// Validate the configuration ranges.
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_FACE_ZOOM..=MAX_FACE_ZOOM).contains(&self.face_zoom) {
            return Err(format!(
                "Face zoom must be between {} and {}, got {}",
                MIN_FACE_ZOOM, MAX_FACE_ZOOM, self.face_zoom
            ));
        }

        if !(0.0..=100.0).contains(&self.position_y) {
            return Err(format!(
                "Subtitle position must be between 0 and 100, got {}",
                self.position_y
            ));
        }

        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.font_size) {
            return Err(format!(
                "Font size must be between {} and {}, got {}",
                MIN_FONT_SIZE, MAX_FONT_SIZE, self.font_size
            ));
        }

        Ok(())
    }

    /// CSS `text-shadow` value derived from the shadow color.
    pub fn text_shadow(&self) -> String {
        format!("0 3px 6px {}", self.shadow_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_parse() {
        assert_eq!("standard".parse::<LayoutMode>().unwrap(), LayoutMode::Standard);
        assert_eq!(
            "Gaming-Split".parse::<LayoutMode>().unwrap(),
            LayoutMode::GamingSplit
        );
        assert_eq!("gaming_split".parse::<LayoutMode>().unwrap(), LayoutMode::GamingSplit);
        assert!("pip".parse::<LayoutMode>().is_err());
        for mode in LayoutMode::ALL {
            assert_eq!(mode.as_str().parse::<LayoutMode>().unwrap(), *mode);
        }
    }

    #[test]
    fn test_layout_wire_format() {
        let json = serde_json::to_string(&LayoutMode::GamingSplit).unwrap();
        assert_eq!(json, "\"gaming-split\"");
    }

    #[test]
    fn test_default_styling_is_valid() {
        let styling = StylingConfig::default();
        assert!(styling.validate().is_ok());
        assert_eq!(styling.layout, LayoutMode::GamingSplit);
        assert!((styling.face_zoom - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_ranges() {
        assert!(StylingConfig::default().with_face_zoom(2.5).validate().is_err());
        assert!(StylingConfig::default().with_face_zoom(0.9).validate().is_err());

        let mut styling = StylingConfig::default();
        styling.position_y = 101.0;
        assert!(styling.validate().is_err());
    }

    #[test]
    fn test_validate_font_size_bounds() {
        let mut styling = StylingConfig::default();
        styling.font_size = MIN_FONT_SIZE;
        assert!(styling.validate().is_ok());
        styling.font_size = MAX_FONT_SIZE;
        assert!(styling.validate().is_ok());

        for size in [0, MIN_FONT_SIZE - 1, MAX_FONT_SIZE + 1, 3_000_000] {
            styling.font_size = size;
            assert!(styling.validate().is_err(), "font size {} accepted", size);
        }
    }

    #[test]
    fn test_styling_roundtrip_names() {
        let value = serde_json::to_value(StylingConfig::default()).unwrap();
        assert_eq!(value["positionY"], 20.0);
        assert_eq!(value["isUppercase"], true);
        assert_eq!(value["faceZoom"], 1.2);
    }
}
