//! Shared data models for the VClip Gamer editor.
//!
//! This crate provides Serde-serializable types for:
//! - Highlight segments and their timed subtitles
//! - Normalized crop rectangles for the gameplay and facecam panes
//! - Subtitle styling and layout configuration
//! - The editor lifecycle state

pub mod app_state;
pub mod fixtures;
pub mod rect;
pub mod segment;
pub mod style;
pub mod subtitle;
pub mod timestamp;

// Re-export common types
pub use app_state::AppState;
pub use rect::CropRect;
pub use segment::VideoSegment;
pub use style::{LayoutMode, LayoutModeParseError, StylingConfig};
pub use subtitle::Subtitle;
