//! Core layout and playback logic for the VClip Gamer editor.
//!
//! This crate provides:
//! - Crop mapping from normalized crop rectangles to viewport transforms
//! - Playback synchronization of the gameplay and facecam media handles
//! - Active subtitle resolution for a time cursor
//! - Composite frame description for the standard and gaming-split layouts
//! - Export plans describing the composite for an external encoder
//! - The editor state reducer driving all of the above

pub mod compose;
pub mod crop;
pub mod editor;
pub mod error;
pub mod export;
pub mod metrics;
pub mod output_format;
pub mod subtitles;
pub mod sync;

pub use compose::{CompositeFrame, CompositeRenderer, Pane, PaneRole, SubtitleOverlay};
pub use crop::{map_crop, normalize_crop, CropTransform};
pub use editor::{EditorEvent, EditorState};
pub use error::{MediaError, MediaResult};
pub use export::{ExportEncoding, ExportPlan};
pub use subtitles::{resolve_active_subtitle, update_subtitle_text};
pub use sync::{
    sync_playback, ClockHandle, MediaHandle, PlaybackSynchronizer, SegmentWindow, SyncAction,
    DRIFT_TOLERANCE_SECS,
};
