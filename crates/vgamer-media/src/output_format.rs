//! Output geometry for the vertical composite.
//!
//! Single source of truth for the 9:16 frame size, the fixed gaming-split
//! pane ratio and the fixed zoom constants. The preview describes panes in
//! flex weights; the export plan uses the pixel sizes derived here.
//!
//! # FFmpeg Constraints
//!
//! - libx264 requires width/height to be divisible by 2

/// Target width for portrait (9:16) output.
pub const PORTRAIT_WIDTH: u32 = 1080;

/// Target height for portrait (9:16) output.
pub const PORTRAIT_HEIGHT: u32 = 1920;

/// Gameplay share of the gaming-split layout (3 of 3:2).
pub const GAMEPLAY_PANE_WEIGHT: u32 = 3;

/// Facecam share of the gaming-split layout (2 of 3:2).
pub const FACECAM_PANE_WEIGHT: u32 = 2;

/// Zoom applied to the gameplay pane in gaming-split.
pub const GAMEPLAY_ZOOM: f64 = 1.2;

/// Center-crop zoom of the standard layout.
pub const STANDARD_ZOOM: f64 = 1.5;

/// Pixel height of the gameplay pane in the exported frame.
pub fn gameplay_pane_height() -> u32 {
    let total = GAMEPLAY_PANE_WEIGHT + FACECAM_PANE_WEIGHT;
    make_even((PORTRAIT_HEIGHT * GAMEPLAY_PANE_WEIGHT / total) as i32) as u32
}

/// Pixel height of the facecam pane; together with the gameplay pane it fills the frame.
pub fn facecam_pane_height() -> u32 {
    PORTRAIT_HEIGHT - gameplay_pane_height()
}

/// Rounds down to the nearest even number.
#[inline]
pub fn make_even(value: i32) -> i32 {
    (value / 2) * 2
}

/// Clamps a pixel crop so it stays within the frame.
///
/// Returns (x, y, width, height) with even dimensions of at least 2 pixels.
pub fn clamp_crop_to_frame(
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    frame_width: u32,
    frame_height: u32,
) -> (i32, i32, i32, i32) {
    let w = make_even(width.min(frame_width as i32)).max(2);
    let h = make_even(height.min(frame_height as i32)).max(2);

    let x = x.min(frame_width as i32 - w).max(0);
    let y = y.min(frame_height as i32 - h).max(0);

    (x, y, w, h)
}
