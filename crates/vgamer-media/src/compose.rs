//! Composite frame description.
//!
//! Produces what the vertical preview shows at a given time cursor: the pane
//! stack for the active layout, each pane's crop transform, and the subtitle
//! overlay when a caption is active. The output is a plain description; any
//! UI layer (or the export plan) turns it into pixels.
//!
//! ```text
//! gaming-split                standard
//! ┌──────────────┐            ┌──────────────┐
//! │   gameplay   │ 3          │              │
//! │  (zoom 1.2)  │            │  full frame  │
//! ├──────────────┤            │  (zoom 1.5)  │
//! │   facecam    │ 2          │              │
//! │ (face zoom)  │            │   subtitle   │
//! │   subtitle   │            │              │
//! └──────────────┘            └──────────────┘
//! ```

use serde::Serialize;
use vgamer_models::{LayoutMode, StylingConfig, Subtitle, VideoSegment};

use crate::crop::{map_crop, CropTransform};
use crate::output_format::{FACECAM_PANE_WEIGHT, GAMEPLAY_PANE_WEIGHT, GAMEPLAY_ZOOM, STANDARD_ZOOM};
use crate::subtitles::resolve_active_subtitle;

/// Which part of the source a pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneRole {
    /// Whole frame, standard layout
    Full,
    Gameplay,
    Facecam,
}

impl PaneRole {
    /// Badge shown on the pane in the preview.
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            PaneRole::Full => None,
            PaneRole::Gameplay => Some("Gameplay"),
            PaneRole::Facecam => Some("Facecam"),
        }
    }
}

/// One viewport of the composite, top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pane {
    pub role: PaneRole,
    /// Label drawn in the pane corner
    pub badge: Option<&'static str>,
    /// Share of the frame height relative to the other panes
    pub flex_weight: u32,
    pub transform: CropTransform,
}

impl Pane {
    fn new(role: PaneRole, flex_weight: u32, transform: CropTransform) -> Self {
        Self {
            role,
            badge: role.badge(),
            flex_weight,
            transform,
        }
    }

    /// Fraction of the frame height this pane occupies among `panes`.
    pub fn height_fraction(&self, panes: &[Pane]) -> f64 {
        let total: u32 = panes.iter().map(|p| p.flex_weight).sum();
        if total == 0 {
            return 0.0;
        }
        self.flex_weight as f64 / total as f64
    }
}

/// Caption drawn above all panes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleOverlay {
    pub subtitle_id: String,
    /// Text after case transformation
    pub text: String,
    /// Distance of the caption box from the frame bottom, in percent
    pub bottom_percent: f64,
    pub font_family: String,
    pub font_size_px: u32,
    pub font_color: String,
    pub background_color: String,
    pub text_shadow: String,
    /// Thin light border, used in the gaming-split layout
    pub bordered: bool,
}

impl SubtitleOverlay {
    fn from_subtitle(subtitle: &Subtitle, styling: &StylingConfig) -> Self {
        let text = if styling.is_uppercase {
            subtitle.text.to_uppercase()
        } else {
            subtitle.text.clone()
        };

        Self {
            subtitle_id: subtitle.id.clone(),
            text,
            bottom_percent: styling.position_y,
            font_family: styling.font_family.clone(),
            font_size_px: styling.font_size,
            font_color: styling.font_color.clone(),
            background_color: styling.background_color.clone(),
            text_shadow: styling.text_shadow(),
            bordered: styling.layout == LayoutMode::GamingSplit,
        }
    }
}

/// Everything needed to draw the preview at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeFrame {
    pub time: f64,
    pub layout: LayoutMode,
    pub panes: Vec<Pane>,
    pub overlay: Option<SubtitleOverlay>,
}

impl CompositeFrame {
    pub fn pane(&self, role: PaneRole) -> Option<&Pane> {
        self.panes.iter().find(|p| p.role == role)
    }
}

/// Builds composite frames from a segment, styling and time cursor.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeRenderer;

impl CompositeRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Describe the frame at `time`. Does not touch the segment or styling.
    pub fn render(&self, segment: &VideoSegment, styling: &StylingConfig, time: f64) -> CompositeFrame {
        let panes = match styling.layout {
            LayoutMode::Standard => vec![Pane::new(PaneRole::Full, 1, map_crop(None, STANDARD_ZOOM))],
            LayoutMode::GamingSplit => vec![
                Pane::new(
                    PaneRole::Gameplay,
                    GAMEPLAY_PANE_WEIGHT,
                    map_crop(segment.gameplay_crop, GAMEPLAY_ZOOM),
                ),
                Pane::new(
                    PaneRole::Facecam,
                    FACECAM_PANE_WEIGHT,
                    map_crop(segment.face_cam_crop, styling.face_zoom),
                ),
            ],
        };

        let overlay = resolve_active_subtitle(time, &segment.subtitles)
            .map(|sub| SubtitleOverlay::from_subtitle(sub, styling));

        CompositeFrame {
            time,
            layout: styling.layout,
            panes,
            overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgamer_models::fixtures::sample_segments;
    use vgamer_models::CropRect;

    #[test]
    fn test_gaming_split_panes() {
        let segment = sample_segments().remove(0);
        let styling = StylingConfig::default().with_face_zoom(1.5);
        let frame = CompositeRenderer::new().render(&segment, &styling, 2.0);

        assert_eq!(frame.panes.len(), 2);
        let gameplay = frame.pane(PaneRole::Gameplay).unwrap();
        let facecam = frame.pane(PaneRole::Facecam).unwrap();
        assert_eq!(gameplay.flex_weight, 3);
        assert_eq!(facecam.flex_weight, 2);
        assert!((gameplay.height_fraction(&frame.panes) - 0.6).abs() < 1e-9);
        assert_eq!(gameplay.transform.width_scale, GAMEPLAY_ZOOM);
        assert_eq!(facecam.transform.width_scale, 1.5);
        assert_eq!(facecam.transform.offset_x_percent, -75.0);
        assert_eq!(gameplay.badge, Some("Gameplay"));
        assert_eq!(facecam.badge, Some("Facecam"));
    }

    #[test]
    fn test_standard_layout_has_single_pane() {
        let segment = sample_segments().remove(0);
        let styling = StylingConfig::default().with_layout(LayoutMode::Standard);
        let frame = CompositeRenderer::new().render(&segment, &styling, 2.0);

        assert_eq!(frame.panes.len(), 1);
        assert_eq!(frame.panes[0].role, PaneRole::Full);
        assert_eq!(frame.panes[0].transform.width_scale, STANDARD_ZOOM);
        assert!(frame.pane(PaneRole::Facecam).is_none());
        assert!(frame.panes[0].badge.is_none());
        assert!(!frame.overlay.unwrap().bordered);
    }

    #[test]
    fn test_overlay_only_when_subtitle_active() {
        let segment = sample_segments().remove(0);
        let styling = StylingConfig::default();
        let renderer = CompositeRenderer::new();

        assert!(renderer.render(&segment, &styling, 3.2).overlay.is_none());

        let overlay = renderer.render(&segment, &styling, 4.0).overlay.unwrap();
        assert_eq!(overlay.subtitle_id, "2");
        assert_eq!(overlay.text, "NGGAK NYANGKA BANGET BISA DAPET MOMEN INI.");
        assert_eq!(overlay.bottom_percent, 20.0);
        assert_eq!(overlay.text_shadow, "0 3px 6px rgba(0, 0, 0, 0.8)");
        assert!(overlay.bordered);
    }

    #[test]
    fn test_overlay_keeps_case_when_not_uppercase() {
        let segment = sample_segments().remove(0);
        let mut styling = StylingConfig::default();
        styling.is_uppercase = false;
        let overlay = CompositeRenderer::new()
            .render(&segment, &styling, 4.0)
            .overlay
            .unwrap();
        assert_eq!(overlay.text, "Nggak nyangka banget bisa dapet momen ini.");
    }

    #[test]
    fn test_missing_crops_render_full_frame() {
        let segment = VideoSegment::new(0.0, 30.0, "no crops");
        let frame = CompositeRenderer::new().render(&segment, &StylingConfig::default(), 1.0);

        for pane in &frame.panes {
            assert_eq!(pane.transform.media_width_percent, 100.0);
            assert_eq!(pane.transform.offset_x_percent, 0.0);
        }
    }

    #[test]
    fn test_render_does_not_mutate_inputs() {
        let segment = sample_segments()
            .remove(0)
            .with_crops(Some(CropRect::new(0.0, 0.0, 0.0, 0.0)), None);
        let before = segment.clone();
        let _ = CompositeRenderer::new().render(&segment, &StylingConfig::default(), 1.0);
        assert_eq!(segment, before);
    }
}
