//! Headless preview: drives the editor with clock handles instead of decoders.

use serde::Serialize;
use tracing::{debug, warn};
use vgamer_media::{
    ClockHandle, CompositeFrame, EditorEvent, EditorState, PlaybackSynchronizer, SyncAction,
};

/// Upper bound on simulated time updates per preview.
pub const MAX_PREVIEW_STEPS: usize = 10_000;

/// One simulated time update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewFrame {
    pub time: f64,
    pub sync: SyncAction,
    pub frame: CompositeFrame,
}

/// Play the selected segment for `duration` seconds in `step` increments.
///
/// Returns the editor state after playback (paused) and one frame per step.
pub fn run_preview(state: EditorState, step: f64, duration: f64) -> (EditorState, Vec<PreviewFrame>) {
    let Some(window) = state.window() else {
        return (state, Vec::new());
    };

    let mut sync = PlaybackSynchronizer::new();
    sync.mount_primary(ClockHandle::new(window.start));
    if state.styling().layout.has_facecam() {
        sync.mount_secondary(ClockHandle::new(window.start));
    }
    sync.on_loaded_metadata(window);

    let mut state = state.apply(EditorEvent::SetPlaying(true));
    sync.set_playing(state.is_playing());

    let steps = step_count(step, duration);
    let mut frames = Vec::new();
    for _ in 0..steps {
        if let Some(primary) = sync.primary_mut() {
            primary.advance(step);
        }
        if let Some(secondary) = sync.secondary_mut() {
            secondary.advance(step);
        }
        let action = sync.tick(window);
        let Some(time) = sync.current_time() else {
            break;
        };
        state = state.apply(EditorEvent::TimeUpdated(time));

        if let Some(frame) = state.frame() {
            frames.push(PreviewFrame {
                time,
                sync: action,
                frame,
            });
        }
    }

    sync.set_playing(false);
    let state = state.apply(EditorEvent::SetPlaying(false));
    debug!(frames = frames.len(), "Preview finished");
    (state, frames)
}

/// Number of `step`-second updates covering `duration`, capped at [`MAX_PREVIEW_STEPS`].
fn step_count(step: f64, duration: f64) -> usize {
    if !(step.is_finite() && step > 0.0 && duration.is_finite() && duration > 0.0) {
        return 0;
    }
    let steps = (duration / step).ceil();
    if steps > MAX_PREVIEW_STEPS as f64 {
        warn!(step, duration, max = MAX_PREVIEW_STEPS, "Preview step count capped");
        return MAX_PREVIEW_STEPS;
    }
    steps as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgamer_models::fixtures::sample_segments;
    use vgamer_models::{LayoutMode, StylingConfig};

    fn editing(styling: StylingConfig) -> EditorState {
        EditorState::new(styling)
            .apply(EditorEvent::VideoSubmitted {
                source: "clip.mp4".to_string(),
            })
            .apply(EditorEvent::AnalysisCompleted(sample_segments()))
    }

    #[test]
    fn test_preview_covers_duration_and_loops() {
        let (state, frames) = run_preview(editing(StylingConfig::default()), 0.5, 46.0);
        assert_eq!(frames.len(), 92);
        assert!(!state.is_playing());
        assert!(frames
            .iter()
            .any(|f| matches!(f.sync, SyncAction::LoopReset { to } if to == 0.0)));
        assert!(frames.iter().all(|f| f.time < 45.0));
    }

    #[test]
    fn test_standard_layout_has_no_secondary() {
        let styling = StylingConfig::default().with_layout(LayoutMode::Standard);
        let (_, frames) = run_preview(editing(styling), 1.0, 5.0);
        assert_eq!(frames.len(), 5);
        assert!(frames
            .iter()
            .all(|f| !matches!(f.sync, SyncAction::CorrectSecondary { .. })));
        assert_eq!(frames[1].frame.overlay.as_ref().unwrap().subtitle_id, "1");
    }

    #[test]
    fn test_step_count_bounds() {
        assert_eq!(step_count(0.25, 10.0), 40);
        assert_eq!(step_count(0.25, f64::INFINITY), 0);
        assert_eq!(step_count(f64::NAN, 10.0), 0);
        assert_eq!(step_count(0.0, 10.0), 0);
        assert_eq!(step_count(1e-9, 45.0), MAX_PREVIEW_STEPS);
    }

    #[test]
    fn test_unbounded_duration_does_not_allocate() {
        let (_, frames) = run_preview(editing(StylingConfig::default()), 0.25, f64::INFINITY);
        assert!(frames.is_empty());

        let (_, frames) = run_preview(editing(StylingConfig::default()), 1e-9, 45.0);
        assert_eq!(frames.len(), MAX_PREVIEW_STEPS);
    }

    #[test]
    fn test_idle_state_yields_nothing() {
        let (_, frames) = run_preview(EditorState::default(), 0.25, 10.0);
        assert!(frames.is_empty());
    }
}
