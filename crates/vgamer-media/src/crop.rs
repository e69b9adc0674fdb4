//! Crop mapping.
//!
//! Maps a normalized crop rectangle onto a viewport transform. The source
//! media is displayed oversized by the inverse of the crop size and shifted
//! so the crop's top-left corner sits at the viewport origin; the viewport's
//! own overflow clipping hides everything outside the crop.
//!
//! ```text
//! media width  = 100 / (crop.width / 100) %   × width_scale
//! media height = 100 / (crop.height / 100) %  × height_scale
//! left         = -crop.x %
//! top          = -crop.y %
//! ```
//!
//! All defaulting of missing or unusable crops happens in [`normalize_crop`].

use serde::{Deserialize, Serialize};
use vgamer_models::CropRect;

/// Rendering transform for one pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropTransform {
    /// Extra horizontal scale on top of the crop fill (the pane zoom)
    pub width_scale: f64,
    /// Extra vertical scale on top of the crop fill (the pane zoom)
    pub height_scale: f64,
    /// Horizontal media offset in viewport percent (`-crop.x`)
    pub offset_x_percent: f64,
    /// Vertical media offset in viewport percent (`-crop.y`)
    pub offset_y_percent: f64,
    /// Media width needed for the crop to fill the viewport, in viewport percent
    pub media_width_percent: f64,
    /// Media height needed for the crop to fill the viewport, in viewport percent
    pub media_height_percent: f64,
}

impl CropTransform {
    /// Transform showing the whole frame unscaled.
    pub const FULL_FRAME: CropTransform = CropTransform {
        width_scale: 1.0,
        height_scale: 1.0,
        offset_x_percent: 0.0,
        offset_y_percent: 0.0,
        media_width_percent: 100.0,
        media_height_percent: 100.0,
    };

    /// Media width after the zoom is applied.
    pub fn scaled_width_percent(&self) -> f64 {
        self.media_width_percent * self.width_scale
    }

    /// Media height after the zoom is applied.
    pub fn scaled_height_percent(&self) -> f64 {
        self.media_height_percent * self.height_scale
    }

    /// Inline CSS for an absolutely positioned media element inside a clipping viewport.
    pub fn css_style(&self) -> String {
        format!(
            "position: absolute; max-width: none; width: {}%; height: {}%; left: {}%; top: {}%; transform: scale({}, {})",
            fmt_num(self.media_width_percent),
            fmt_num(self.media_height_percent),
            fmt_num(self.offset_x_percent),
            fmt_num(self.offset_y_percent),
            fmt_num(self.width_scale),
            fmt_num(self.height_scale),
        )
    }
}

impl Default for CropTransform {
    fn default() -> Self {
        Self::FULL_FRAME
    }
}

/// Resolve an optional crop into one the mapper can divide by.
///
/// Missing crops and crops without usable area become [`CropRect::FULL_FRAME`].
/// Out-of-range but positive-area crops pass through untouched.
pub fn normalize_crop(rect: Option<CropRect>) -> CropRect {
    match rect {
        Some(rect) if !rect.is_degenerate() => rect,
        _ => CropRect::FULL_FRAME,
    }
}

/// Resolve a zoom multiplier; non-finite or non-positive values mean no zoom.
pub fn normalize_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() && zoom > 0.0 {
        zoom
    } else {
        1.0
    }
}

/// Map a crop rectangle and zoom multiplier to a viewport transform.
///
/// Pure: identical inputs always give identical output.
pub fn map_crop(rect: Option<CropRect>, zoom: f64) -> CropTransform {
    let rect = normalize_crop(rect);
    let zoom = normalize_zoom(zoom);

    CropTransform {
        width_scale: zoom,
        height_scale: zoom,
        offset_x_percent: -rect.x,
        offset_y_percent: -rect.y,
        media_width_percent: 100.0 / (rect.width / 100.0),
        media_height_percent: 100.0 / (rect.height / 100.0),
    }
}

fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_scale_and_offsets() {
        let rects = [
            CropRect::new(0.0, 0.0, 100.0, 70.0),
            CropRect::new(75.0, 10.0, 20.0, 25.0),
            CropRect::new(33.3, 66.6, 10.0, 5.0),
        ];
        for rect in rects {
            let t = map_crop(Some(rect), 1.0);
            assert_eq!(t.width_scale, 1.0);
            assert_eq!(t.height_scale, 1.0);
            assert_eq!(t.offset_x_percent, -rect.x);
            assert_eq!(t.offset_y_percent, -rect.y);
        }
    }

    #[test]
    fn test_media_size_fills_viewport() {
        let t = map_crop(Some(CropRect::new(75.0, 10.0, 20.0, 25.0)), 1.0);
        assert!((t.media_width_percent - 500.0).abs() < 1e-9);
        assert!((t.media_height_percent - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_width_falls_back_to_full_frame() {
        let t = map_crop(Some(CropRect::new(10.0, 10.0, 0.0, 50.0)), 1.0);
        assert_eq!(t, CropTransform::FULL_FRAME);
        assert!(t.media_width_percent.is_finite());
    }

    #[test]
    fn test_missing_crop_falls_back_to_full_frame() {
        assert_eq!(map_crop(None, 1.0), CropTransform::FULL_FRAME);
    }

    #[test]
    fn test_zoom_scales_both_axes() {
        let t = map_crop(Some(CropRect::new(70.0, 10.0, 30.0, 30.0)), 1.5);
        assert_eq!(t.width_scale, 1.5);
        assert_eq!(t.height_scale, 1.5);
        assert!((t.scaled_width_percent() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_zoom_means_no_zoom() {
        assert_eq!(map_crop(None, 0.0).width_scale, 1.0);
        assert_eq!(map_crop(None, f64::NAN).height_scale, 1.0);
        assert_eq!(map_crop(None, -2.0).width_scale, 1.0);
    }

    #[test]
    fn test_out_of_range_crop_is_tolerated() {
        let t = map_crop(Some(CropRect::new(90.0, 95.0, 30.0, 20.0)), 1.0);
        assert_eq!(t.offset_x_percent, -90.0);
        assert!(t.media_width_percent.is_finite());
    }

    #[test]
    fn test_map_crop_is_idempotent() {
        let rect = Some(CropRect::new(12.5, 40.0, 45.0, 30.0));
        assert_eq!(map_crop(rect, 1.3), map_crop(rect, 1.3));
    }

    #[test]
    fn test_css_style() {
        let css = map_crop(Some(CropRect::new(75.0, 10.0, 20.0, 25.0)), 1.2).css_style();
        assert!(css.contains("width: 500%"));
        assert!(css.contains("left: -75%"));
        assert!(css.contains("scale(1.2, 1.2)"));

        let full = CropTransform::FULL_FRAME.css_style();
        assert!(full.contains("left: 0%"));
    }
}
