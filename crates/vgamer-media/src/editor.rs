//! Editor state reducer.
//!
//! All shell state lives in [`EditorState`] and changes only through
//! [`EditorState::apply`]. Derived values (active subtitle, composite frame,
//! export plan) are recomputed from the latest cursor on every read, so they
//! can never lag behind it.

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;
use vgamer_models::{AppState, StylingConfig, Subtitle, VideoSegment};

use crate::compose::{CompositeFrame, CompositeRenderer};
use crate::error::{MediaError, MediaResult};
use crate::export::ExportPlan;
use crate::subtitles::{resolve_active_subtitle, update_subtitle_text};
use crate::sync::SegmentWindow;

/// Notice shown when analysis produced nothing usable.
pub const NO_SEGMENTS_NOTICE: &str = "No highlight segments were found in this video.";

/// Inputs to the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Video bytes are being read from `source`
    UploadStarted { source: String },
    /// Video handed to the analysis collaborator
    VideoSubmitted { source: String },
    AnalysisCompleted(Vec<VideoSegment>),
    /// Analysis failed; carries the user-facing notice
    AnalysisFailed(String),
    SegmentSelected(usize),
    /// Native time update from the primary media handle
    TimeUpdated(f64),
    /// Explicit seek from the scrub bar or the transcript list
    Scrubbed(f64),
    SetPlaying(bool),
    TogglePlay,
    SubtitleEdited { id: String, text: String },
    StylingChanged(StylingConfig),
    ExportRequested,
    ExportClosed,
    Reset,
}

/// Snapshot of the editing shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    session_id: Option<Uuid>,
    app_state: AppState,
    source: Option<String>,
    segments: Vec<VideoSegment>,
    selected: usize,
    styling: StylingConfig,
    cursor: f64,
    playing: bool,
    error: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(StylingConfig::default())
    }
}

impl EditorState {
    /// Idle editor with the given styling.
    pub fn new(styling: StylingConfig) -> Self {
        Self {
            session_id: None,
            app_state: AppState::Idle,
            source: None,
            segments: Vec::new(),
            selected: 0,
            styling,
            cursor: 0.0,
            playing: false,
            error: None,
        }
    }

    /// Apply one event, returning the next state.
    pub fn apply(mut self, event: EditorEvent) -> Self {
        match event {
            EditorEvent::UploadStarted { source } => {
                if self.app_state == AppState::Analyzing {
                    warn!("Upload started while analysis is pending; ignoring");
                    return self;
                }
                self = self.discard_session(AppState::Uploading);
                self.source = Some(source);
            }
            EditorEvent::VideoSubmitted { source } => {
                if self.app_state == AppState::Analyzing {
                    warn!("Analysis already pending; ignoring new submission");
                    return self;
                }
                self = self.discard_session(AppState::Analyzing);
                self.session_id = Some(Uuid::new_v4());
                info!(session_id = ?self.session_id, source = %source, "Video submitted for analysis");
                self.source = Some(source);
            }
            EditorEvent::AnalysisCompleted(segments) => {
                if self.app_state != AppState::Analyzing {
                    debug!("Analysis result arrived outside analysis; ignoring");
                    return self;
                }
                if segments.is_empty() {
                    self.app_state = AppState::Idle;
                    self.error = Some(NO_SEGMENTS_NOTICE.to_string());
                    return self;
                }
                info!(segments = segments.len(), "Analysis completed");
                self.cursor = segments[0].start_time;
                self.segments = segments;
                self.selected = 0;
                self.playing = false;
                self.app_state = AppState::Editing;
            }
            EditorEvent::AnalysisFailed(notice) => {
                if self.app_state != AppState::Analyzing {
                    return self;
                }
                warn!(notice = %notice, "Analysis failed");
                self.app_state = AppState::Idle;
                self.error = Some(notice);
            }
            EditorEvent::SegmentSelected(index) => {
                if !self.app_state.has_segments() {
                    return self;
                }
                match self.segments.get(index) {
                    Some(segment) => {
                        self.cursor = segment.start_time;
                        self.selected = index;
                        self.playing = false;
                    }
                    None => warn!(index, count = self.segments.len(), "Segment index out of range"),
                }
            }
            EditorEvent::TimeUpdated(time) => {
                if self.app_state.has_segments() && time.is_finite() {
                    self.cursor = time;
                }
            }
            EditorEvent::Scrubbed(time) => {
                if let Some(clamped) = self.selected_segment().map(|s| s.clamp_time(time)) {
                    self.cursor = clamped;
                }
            }
            EditorEvent::SetPlaying(playing) => {
                if self.app_state.has_segments() {
                    self.playing = playing;
                }
            }
            EditorEvent::TogglePlay => {
                if self.app_state.has_segments() {
                    self.playing = !self.playing;
                }
            }
            EditorEvent::SubtitleEdited { id, text } => {
                if self.app_state != AppState::Editing {
                    return self;
                }
                let selected = self.selected;
                if let Some(segment) = self.segments.get_mut(selected) {
                    update_subtitle_text(&mut segment.subtitles, &id, text);
                }
            }
            EditorEvent::StylingChanged(styling) => match styling.validate() {
                Ok(()) => self.styling = styling,
                Err(e) => warn!(error = %e, "Rejected styling change"),
            },
            EditorEvent::ExportRequested => {
                if self.app_state == AppState::Editing {
                    self.app_state = AppState::Exporting;
                }
            }
            EditorEvent::ExportClosed => {
                if self.app_state == AppState::Exporting {
                    self.app_state = AppState::Editing;
                }
            }
            EditorEvent::Reset => {
                self = self.discard_session(AppState::Idle);
            }
        }
        self
    }

    /// Drop everything tied to the current video. Styling is shell configuration and survives.
    fn discard_session(self, app_state: AppState) -> Self {
        Self {
            app_state,
            ..Self::new(self.styling)
        }
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn app_state(&self) -> AppState {
        self.app_state
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn segments(&self) -> &[VideoSegment] {
        &self.segments
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The segment being edited, once analysis has completed.
    pub fn selected_segment(&self) -> Option<&VideoSegment> {
        if self.app_state.has_segments() {
            self.segments.get(self.selected)
        } else {
            None
        }
    }

    pub fn styling(&self) -> &StylingConfig {
        &self.styling
    }

    /// The time cursor in absolute source seconds.
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// User-facing notice from the last failed analysis.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn window(&self) -> Option<SegmentWindow> {
        self.selected_segment().map(SegmentWindow::from)
    }

    /// Caption showing at the cursor.
    pub fn active_subtitle(&self) -> Option<&Subtitle> {
        self.selected_segment()
            .and_then(|segment| resolve_active_subtitle(self.cursor, &segment.subtitles))
    }

    /// Composite frame at the cursor.
    pub fn frame(&self) -> Option<CompositeFrame> {
        self.selected_segment()
            .map(|segment| CompositeRenderer::new().render(segment, &self.styling, self.cursor))
    }

    /// Export plan for the selected segment.
    pub fn export_plan(&self, source_width: u32, source_height: u32) -> MediaResult<ExportPlan> {
        let segment = self
            .selected_segment()
            .ok_or(MediaError::SegmentOutOfRange {
                index: self.selected,
                count: self.segments.len(),
            })?;
        ExportPlan::build(segment, &self.styling, source_width, source_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgamer_models::fixtures::sample_segments;
    use vgamer_models::LayoutMode;

    fn editing() -> EditorState {
        EditorState::default()
            .apply(EditorEvent::VideoSubmitted {
                source: "clip.mp4".to_string(),
            })
            .apply(EditorEvent::AnalysisCompleted(sample_segments()))
    }

    #[test]
    fn test_submit_then_complete_enters_editing() {
        let state = EditorState::default().apply(EditorEvent::VideoSubmitted {
            source: "clip.mp4".to_string(),
        });
        assert_eq!(state.app_state(), AppState::Analyzing);
        assert!(state.session_id().is_some());
        assert!(state.frame().is_none());

        let state = state.apply(EditorEvent::AnalysisCompleted(sample_segments()));
        assert_eq!(state.app_state(), AppState::Editing);
        assert_eq!(state.cursor(), 0.0);
        assert_eq!(state.source(), Some("clip.mp4"));
        assert!(state.frame().is_some());
    }

    #[test]
    fn test_upload_then_submit() {
        let state = EditorState::default().apply(EditorEvent::UploadStarted {
            source: "clip.mp4".to_string(),
        });
        assert_eq!(state.app_state(), AppState::Uploading);
        assert_eq!(state.source(), Some("clip.mp4"));
        assert!(state.session_id().is_none());

        let state = state.apply(EditorEvent::VideoSubmitted {
            source: "clip.mp4".to_string(),
        });
        assert_eq!(state.app_state(), AppState::Analyzing);
        assert!(state.session_id().is_some());
    }

    #[test]
    fn test_upload_ignored_while_analyzing() {
        let analyzing = EditorState::default().apply(EditorEvent::VideoSubmitted {
            source: "a.mp4".to_string(),
        });
        let after = analyzing.clone().apply(EditorEvent::UploadStarted {
            source: "b.mp4".to_string(),
        });
        assert_eq!(after, analyzing);
        assert_eq!(after.source(), Some("a.mp4"));
    }

    #[test]
    fn test_upload_discards_previous_session() {
        let state = editing().apply(EditorEvent::UploadStarted {
            source: "next.mp4".to_string(),
        });
        assert_eq!(state.app_state(), AppState::Uploading);
        assert!(state.segments().is_empty());
        assert!(state.frame().is_none());
    }

    #[test]
    fn test_failure_returns_to_idle_with_notice() {
        let state = EditorState::default()
            .apply(EditorEvent::VideoSubmitted {
                source: "clip.mp4".to_string(),
            })
            .apply(EditorEvent::AnalysisFailed("Failed to analyze video.".to_string()));
        assert_eq!(state.app_state(), AppState::Idle);
        assert_eq!(state.error(), Some("Failed to analyze video."));
    }

    #[test]
    fn test_empty_analysis_is_a_failure() {
        let state = EditorState::default()
            .apply(EditorEvent::VideoSubmitted {
                source: "clip.mp4".to_string(),
            })
            .apply(EditorEvent::AnalysisCompleted(Vec::new()));
        assert_eq!(state.app_state(), AppState::Idle);
        assert_eq!(state.error(), Some(NO_SEGMENTS_NOTICE));
    }

    #[test]
    fn test_resubmission_discards_segments_and_error() {
        let failed = EditorState::default()
            .apply(EditorEvent::VideoSubmitted {
                source: "a.mp4".to_string(),
            })
            .apply(EditorEvent::AnalysisFailed("boom".to_string()));
        let resubmitted = failed.apply(EditorEvent::VideoSubmitted {
            source: "b.mp4".to_string(),
        });
        assert!(resubmitted.error().is_none());

        let state = editing().apply(EditorEvent::VideoSubmitted {
            source: "c.mp4".to_string(),
        });
        assert!(state.segments().is_empty());
        assert_eq!(state.app_state(), AppState::Analyzing);
    }

    #[test]
    fn test_time_update_drives_active_subtitle() {
        let state = editing().apply(EditorEvent::TimeUpdated(4.0));
        assert_eq!(state.active_subtitle().unwrap().id, "2");

        let state = state.apply(EditorEvent::TimeUpdated(3.2));
        assert!(state.active_subtitle().is_none());
        assert!(state.frame().unwrap().overlay.is_none());
    }

    #[test]
    fn test_scrub_is_clamped_to_window() {
        let state = editing().apply(EditorEvent::Scrubbed(90.0));
        assert_eq!(state.cursor(), 45.0);
        let state = state.apply(EditorEvent::Scrubbed(-5.0));
        assert_eq!(state.cursor(), 0.0);
    }

    #[test]
    fn test_play_toggle() {
        let state = editing().apply(EditorEvent::TogglePlay);
        assert!(state.is_playing());
        let state = state.apply(EditorEvent::SetPlaying(false));
        assert!(!state.is_playing());

        // no segments, no playback
        let idle = EditorState::default().apply(EditorEvent::TogglePlay);
        assert!(!idle.is_playing());
    }

    #[test]
    fn test_subtitle_edit_updates_text_only() {
        let state = editing().apply(EditorEvent::SubtitleEdited {
            id: "1".to_string(),
            text: "HEADSHOT!!".to_string(),
        });
        let sub = &state.selected_segment().unwrap().subtitles[0];
        assert_eq!(sub.id, "1");
        assert_eq!(sub.text, "HEADSHOT!!");
        assert_eq!((sub.start_time, sub.end_time), (1.0, 3.0));
    }

    #[test]
    fn test_invalid_styling_is_rejected() {
        let state = editing().apply(EditorEvent::StylingChanged(
            StylingConfig::default().with_face_zoom(5.0),
        ));
        assert_eq!(state.styling(), &StylingConfig::default());

        let state = state.apply(EditorEvent::StylingChanged(
            StylingConfig::default().with_layout(LayoutMode::Standard),
        ));
        assert_eq!(state.styling().layout, LayoutMode::Standard);
    }

    #[test]
    fn test_segment_selection() {
        let mut segments = sample_segments();
        segments.push(VideoSegment::new(60.0, 90.0, "second"));
        let state = EditorState::default()
            .apply(EditorEvent::VideoSubmitted {
                source: "clip.mp4".to_string(),
            })
            .apply(EditorEvent::AnalysisCompleted(segments))
            .apply(EditorEvent::TogglePlay)
            .apply(EditorEvent::SegmentSelected(1));
        assert_eq!(state.selected_index(), 1);
        assert_eq!(state.cursor(), 60.0);
        assert!(!state.is_playing());

        let state = state.apply(EditorEvent::SegmentSelected(9));
        assert_eq!(state.selected_index(), 1);
    }

    #[test]
    fn test_export_round_trip() {
        let state = editing().apply(EditorEvent::ExportRequested);
        assert_eq!(state.app_state(), AppState::Exporting);
        assert!(state.export_plan(1920, 1080).is_ok());

        let state = state.apply(EditorEvent::ExportClosed);
        assert_eq!(state.app_state(), AppState::Editing);
    }

    #[test]
    fn test_reset_keeps_styling() {
        let styling = StylingConfig::default().with_face_zoom(1.8);
        let state = EditorState::new(styling.clone())
            .apply(EditorEvent::VideoSubmitted {
                source: "clip.mp4".to_string(),
            })
            .apply(EditorEvent::AnalysisCompleted(sample_segments()))
            .apply(EditorEvent::Reset);
        assert_eq!(state.app_state(), AppState::Idle);
        assert!(state.segments().is_empty());
        assert_eq!(state.styling(), &styling);
        assert!(state.export_plan(1920, 1080).is_err());
    }
}
