//! Export plan for an external encoder.
//!
//! The editor never encodes video itself. Export hands an encoder a plan
//! that reproduces the composite in pixel space: the segment window, a
//! single-pass FFmpeg `filter_complex` and the output mapping.
//!
//! Gaming-split:
//! ```text
//! [0:v]crop=gameplay,scale=1080:1152[top];
//! [0:v]crop=facecam,scale=1080:768[bottom];
//! [top][bottom]vstack=inputs=2[stack];
//! [stack]drawtext=...,drawtext=...[vout]
//! ```
//!
//! Pane zoom shrinks the pixel crop around the crop centre, which is what
//! the preview's scale transform shows inside the clipping viewport.

use serde::Serialize;
use std::path::Path;
use tracing::info;
use vgamer_models::{CropRect, LayoutMode, StylingConfig, Subtitle, VideoSegment};

use crate::crop::{normalize_crop, normalize_zoom};
use crate::error::{MediaError, MediaResult};
use crate::output_format::{
    clamp_crop_to_frame, facecam_pane_height, gameplay_pane_height, GAMEPLAY_ZOOM,
    PORTRAIT_HEIGHT, PORTRAIT_WIDTH, STANDARD_ZOOM,
};

/// Preview frame height subtitle font sizes are authored against.
pub const PREVIEW_FRAME_HEIGHT: u32 = 720;

/// Label of the final video stream in the filter graph.
pub const OUTPUT_LABEL: &str = "vout";

/// Pixel crop within the source frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelCrop {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelCrop {
    fn filter(&self) -> String {
        format!("crop={}:{}:{}:{}", self.width, self.height, self.x, self.y)
    }
}

/// Encoder settings passed through to the export command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportEncoding {
    pub codec: String,
    pub preset: String,
    pub crf: u8,
    pub audio_bitrate: String,
}

impl Default for ExportEncoding {
    fn default() -> Self {
        Self {
            codec: "libx264".to_string(),
            preset: "veryfast".to_string(),
            crf: 23,
            audio_bitrate: "128k".to_string(),
        }
    }
}

/// Everything an encoder needs to render the vertical short.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportPlan {
    pub start_secs: f64,
    pub duration_secs: f64,
    pub width: u32,
    pub height: u32,
    pub layout: LayoutMode,
    pub filter_complex: String,
    pub encoding: ExportEncoding,
}

impl ExportPlan {
    /// Build the plan for `segment` as styled, from a source of the given pixel size.
    pub fn build(
        segment: &VideoSegment,
        styling: &StylingConfig,
        source_width: u32,
        source_height: u32,
    ) -> MediaResult<Self> {
        if source_width < 2 || source_height < 2 {
            return Err(MediaError::InvalidDimensions {
                width: source_width,
                height: source_height,
            });
        }
        segment.validate().map_err(MediaError::invalid_segment)?;
        styling.validate().map_err(MediaError::invalid_styling)?;

        let video_chain = match styling.layout {
            LayoutMode::GamingSplit => {
                let gameplay = pixel_crop(segment.gameplay_crop, GAMEPLAY_ZOOM, source_width, source_height);
                let facecam = pixel_crop(segment.face_cam_crop, styling.face_zoom, source_width, source_height);
                format!(
                    "[0:v]{},scale={pw}:{gh}:flags=lanczos,setsar=1[top];\
                     [0:v]{},scale={pw}:{fh}:flags=lanczos,setsar=1[bottom];\
                     [top][bottom]vstack=inputs=2",
                    gameplay.filter(),
                    facecam.filter(),
                    pw = PORTRAIT_WIDTH,
                    gh = gameplay_pane_height(),
                    fh = facecam_pane_height(),
                )
            }
            LayoutMode::Standard => {
                let crop = cover_crop(STANDARD_ZOOM, source_width, source_height);
                format!(
                    "[0:v]{},scale={}:{}:flags=lanczos,setsar=1",
                    crop.filter(),
                    PORTRAIT_WIDTH,
                    PORTRAIT_HEIGHT
                )
            }
        };

        let captions: Vec<String> = segment
            .subtitles
            .iter()
            .filter_map(|sub| drawtext_filter(sub, segment, styling))
            .collect();

        let filter_complex = if captions.is_empty() {
            format!("{}[{}]", video_chain, OUTPUT_LABEL)
        } else {
            format!(
                "{}[stack];[stack]{}[{}]",
                video_chain,
                captions.join(","),
                OUTPUT_LABEL
            )
        };

        info!(
            layout = %styling.layout,
            start = segment.start_time,
            duration = segment.duration(),
            captions = captions.len(),
            "Built export plan"
        );

        Ok(Self {
            start_secs: segment.start_time,
            duration_secs: segment.duration(),
            width: PORTRAIT_WIDTH,
            height: PORTRAIT_HEIGHT,
            layout: styling.layout,
            filter_complex,
            encoding: ExportEncoding::default(),
        })
    }

    pub fn with_encoding(mut self, encoding: ExportEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// FFmpeg argument vector for rendering `input` into `output`.
    pub fn args(&self, input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-ss".to_string(),
            format!("{:.3}", self.start_secs),
            "-t".to_string(),
            format!("{:.3}", self.duration_secs),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-filter_complex".to_string(),
            self.filter_complex.clone(),
            "-map".to_string(),
            format!("[{}]", OUTPUT_LABEL),
            "-map".to_string(),
            "0:a?".to_string(),
            "-c:v".to_string(),
            self.encoding.codec.clone(),
            "-preset".to_string(),
            self.encoding.preset.clone(),
            "-crf".to_string(),
            self.encoding.crf.to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-b:a".to_string(),
            self.encoding.audio_bitrate.clone(),
            "-movflags".to_string(),
            "+faststart".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }
}

/// Pixel crop for a pane: the normalized crop shrunk by `zoom` around its centre.
pub fn pixel_crop(rect: Option<CropRect>, zoom: f64, frame_width: u32, frame_height: u32) -> PixelCrop {
    let rect = normalize_crop(rect);
    let zoom = normalize_zoom(zoom);

    let width = rect.width / 100.0 * frame_width as f64 / zoom;
    let height = rect.height / 100.0 * frame_height as f64 / zoom;
    let (cx, cy) = rect.center();
    let x = cx / 100.0 * frame_width as f64 - width / 2.0;
    let y = cy / 100.0 * frame_height as f64 - height / 2.0;

    to_pixel_crop(x, y, width, height, frame_width, frame_height)
}

/// Centre crop filling a 9:16 frame (object-fit cover), shrunk by `zoom`.
pub fn cover_crop(zoom: f64, frame_width: u32, frame_height: u32) -> PixelCrop {
    let zoom = normalize_zoom(zoom);
    let target = PORTRAIT_WIDTH as f64 / PORTRAIT_HEIGHT as f64;
    let (fw, fh) = (frame_width as f64, frame_height as f64);

    let (width, height) = if fw / fh > target {
        (fh * target, fh)
    } else {
        (fw, fw / target)
    };
    let (width, height) = (width / zoom, height / zoom);

    to_pixel_crop(
        (fw - width) / 2.0,
        (fh - height) / 2.0,
        width,
        height,
        frame_width,
        frame_height,
    )
}

fn to_pixel_crop(x: f64, y: f64, width: f64, height: f64, frame_width: u32, frame_height: u32) -> PixelCrop {
    let (x, y, w, h) = clamp_crop_to_frame(
        x.round() as i32,
        y.round() as i32,
        width.round() as i32,
        height.round() as i32,
        frame_width,
        frame_height,
    );
    PixelCrop {
        x: x as u32,
        y: y as u32,
        width: w as u32,
        height: h as u32,
    }
}

fn drawtext_filter(subtitle: &Subtitle, segment: &VideoSegment, styling: &StylingConfig) -> Option<String> {
    let start = (subtitle.start_time - segment.start_time).max(0.0);
    let end = (subtitle.end_time - segment.start_time).min(segment.duration());
    if end < start || subtitle.text.trim().is_empty() {
        return None;
    }

    let text = if styling.is_uppercase {
        subtitle.text.to_uppercase()
    } else {
        subtitle.text.clone()
    };
    let font_size = scaled_font_size(styling.font_size);

    Some(format!(
        "drawtext=font='{font}':text='{text}':fontsize={size}:fontcolor={color}:\
         box=1:boxcolor={bg}:boxborderw={pad}:shadowcolor={shadow}:shadowy=3:\
         x=(w-text_w)/2:y=h-h*{pos}/100-text_h:enable='between(t,{start:.3},{end:.3})'",
        font = primary_font_family(&styling.font_family),
        text = escape_drawtext(&text),
        size = font_size,
        color = css_to_ffmpeg_color(&styling.font_color),
        bg = css_to_ffmpeg_color(&styling.background_color),
        pad = font_size / 3,
        shadow = css_to_ffmpeg_color(&styling.shadow_color),
        pos = styling.position_y,
    ))
}

/// Preview font size scaled to the exported frame height.
fn scaled_font_size(preview_px: u32) -> u32 {
    let scaled = u64::from(preview_px) * u64::from(PORTRAIT_HEIGHT) / u64::from(PREVIEW_FRAME_HEIGHT);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// First family of a CSS font stack, unquoted: `'Bebas Neue', cursive` → `Bebas Neue`.
pub fn primary_font_family(stack: &str) -> String {
    stack
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .to_string()
}

/// Convert a CSS color to FFmpeg color syntax.
///
/// `#rrggbb` becomes `0xrrggbb`, `rgb()`/`rgba()` become `0xRRGGBB[@alpha]`.
/// Anything else (named colors) passes through.
pub fn css_to_ffmpeg_color(css: &str) -> String {
    let css = css.trim();
    if let Some(hex) = css.strip_prefix('#') {
        return format!("0x{}", hex);
    }

    let inner = css
        .strip_prefix("rgba(")
        .or_else(|| css.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'));
    let Some(inner) = inner else {
        return css.to_string();
    };

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let channels: Option<Vec<u8>> = parts
        .iter()
        .take(3)
        .map(|p| p.parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8))
        .collect();
    match (channels, parts.len()) {
        (Some(c), 3) if c.len() == 3 => format!("0x{:02X}{:02X}{:02X}", c[0], c[1], c[2]),
        (Some(c), 4) if c.len() == 3 => {
            let alpha = parts[3].parse::<f64>().unwrap_or(1.0).clamp(0.0, 1.0);
            format!("0x{:02X}{:02X}{:02X}@{}", c[0], c[1], c[2], alpha)
        }
        _ => css.to_string(),
    }
}

/// Escape caption text for a single-quoted drawtext value.
pub fn escape_drawtext(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            // a straight quote cannot appear inside the quoted value
            '\'' => escaped.push('\u{2019}'),
            ':' => escaped.push_str("\\:"),
            '%' => escaped.push_str("\\%"),
            '\n' | '\r' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}
