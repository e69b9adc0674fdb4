//! Playback synchronization.
//!
//! The gameplay and facecam panes render the same source media through two
//! independent handles. The gameplay (primary) handle is the clock: on each
//! of its time updates the facecam (secondary) handle is pulled back into
//! line when it drifts past [`DRIFT_TOLERANCE_SECS`], and playback loops to
//! the segment start once the primary reaches the segment end.
//!
//! An unmounted handle turns every operation on it into a no-op for that
//! cycle; the next time update re-attempts.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vgamer_models::VideoSegment;

use crate::metrics;

/// Allowed gap between the two handles before the secondary is forced back.
pub const DRIFT_TOLERANCE_SECS: f64 = 0.1;

/// Capability over a single rendered view of the source media.
pub trait MediaHandle {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Jump to `time` seconds.
    fn set_current_time(&mut self, time: f64);

    fn play(&mut self);

    fn pause(&mut self);

    fn is_paused(&self) -> bool;
}

/// The `[start, end]` window playback is confined to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentWindow {
    pub start: f64,
    pub end: f64,
}

impl SegmentWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

impl From<&VideoSegment> for SegmentWindow {
    fn from(segment: &VideoSegment) -> Self {
        Self::new(segment.start_time, segment.end_time)
    }
}

/// What a time update did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SyncAction {
    /// Handles within tolerance and inside the window
    InSync,
    /// Secondary forced to the primary's time
    CorrectSecondary { to: f64 },
    /// Both handles sent back to the window start
    LoopReset { to: f64 },
    /// Primary handle not mounted; nothing done this cycle
    HandleUnavailable,
}

/// Decide what a time update from the primary requires.
///
/// A loop reset supersedes drift correction since it moves both handles.
/// A missing secondary time skips the drift check.
pub fn sync_playback(
    primary_time: f64,
    secondary_time: Option<f64>,
    window: SegmentWindow,
) -> SyncAction {
    if primary_time >= window.end {
        return SyncAction::LoopReset { to: window.start };
    }

    match secondary_time {
        Some(secondary) if (primary_time - secondary).abs() > DRIFT_TOLERANCE_SECS => {
            SyncAction::CorrectSecondary { to: primary_time }
        }
        _ => SyncAction::InSync,
    }
}

/// Keeps the gameplay and facecam handles in lockstep.
#[derive(Debug)]
pub struct PlaybackSynchronizer<H: MediaHandle> {
    primary: Option<H>,
    secondary: Option<H>,
    playing: bool,
}

impl<H: MediaHandle> Default for PlaybackSynchronizer<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: MediaHandle> PlaybackSynchronizer<H> {
    /// Create a synchronizer with no handles mounted, paused.
    pub fn new() -> Self {
        Self {
            primary: None,
            secondary: None,
            playing: false,
        }
    }

    /// Mount the gameplay handle. It adopts the current play state.
    pub fn mount_primary(&mut self, mut handle: H) {
        apply_play_state(&mut handle, self.playing);
        self.primary = Some(handle);
    }

    /// Mount the facecam handle. It adopts the current play state and the primary's time.
    pub fn mount_secondary(&mut self, mut handle: H) {
        if let Some(primary) = &self.primary {
            handle.set_current_time(primary.current_time());
        }
        apply_play_state(&mut handle, self.playing);
        self.secondary = Some(handle);
    }

    pub fn unmount_primary(&mut self) -> Option<H> {
        self.primary.take()
    }

    pub fn unmount_secondary(&mut self) -> Option<H> {
        self.secondary.take()
    }

    pub fn primary(&self) -> Option<&H> {
        self.primary.as_ref()
    }

    pub fn secondary(&self) -> Option<&H> {
        self.secondary.as_ref()
    }

    pub fn primary_mut(&mut self) -> Option<&mut H> {
        self.primary.as_mut()
    }

    pub fn secondary_mut(&mut self) -> Option<&mut H> {
        self.secondary.as_mut()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The primary's position, which is the time cursor.
    pub fn current_time(&self) -> Option<f64> {
        self.primary.as_ref().map(|h| h.current_time())
    }

    /// Start or stop both handles together.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        for handle in self.handles_mut() {
            apply_play_state(handle, playing);
        }
    }

    /// Send both handles to `time` immediately, outside the tick cycle.
    pub fn seek(&mut self, time: f64) {
        for handle in self.handles_mut() {
            handle.set_current_time(time);
        }
        metrics::record_seek();
    }

    /// Media metadata became available: start from the window start.
    pub fn on_loaded_metadata(&mut self, window: SegmentWindow) {
        for handle in self.handles_mut() {
            handle.set_current_time(window.start);
        }
    }

    /// Handle a time update from the primary handle.
    pub fn tick(&mut self, window: SegmentWindow) -> SyncAction {
        let Some(primary_time) = self.current_time() else {
            debug!("Primary handle not mounted, skipping sync");
            return SyncAction::HandleUnavailable;
        };
        let secondary_time = self.secondary.as_ref().map(|h| h.current_time());

        let action = sync_playback(primary_time, secondary_time, window);
        match action {
            SyncAction::LoopReset { to } => {
                debug!(from = primary_time, to, "Looping to segment start");
                for handle in self.handles_mut() {
                    handle.set_current_time(to);
                }
                metrics::record_loop_reset();
            }
            SyncAction::CorrectSecondary { to } => {
                debug!(
                    primary = primary_time,
                    secondary = ?secondary_time,
                    "Correcting facecam drift"
                );
                if let Some(secondary) = self.secondary.as_mut() {
                    secondary.set_current_time(to);
                }
                metrics::record_drift_correction();
            }
            SyncAction::InSync | SyncAction::HandleUnavailable => {}
        }
        action
    }

    fn handles_mut(&mut self) -> impl Iterator<Item = &mut H> {
        self.primary.iter_mut().chain(self.secondary.iter_mut())
    }
}

fn apply_play_state<H: MediaHandle>(handle: &mut H, playing: bool) {
    if playing {
        handle.play();
    } else {
        handle.pause();
    }
}

/// In-memory media handle driven by an explicit clock.
///
/// Used for headless previews and as a test double.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockHandle {
    time: f64,
    paused: bool,
    rate: f64,
}

impl Default for ClockHandle {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ClockHandle {
    /// Create a paused handle at `time`.
    pub fn new(time: f64) -> Self {
        Self {
            time,
            paused: true,
            rate: 1.0,
        }
    }

    /// Playback speed relative to real time. Lets tests simulate drift.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Advance the clock by `elapsed` seconds if playing.
    pub fn advance(&mut self, elapsed: f64) {
        if !self.paused {
            self.time += elapsed * self.rate;
        }
    }
}

impl MediaHandle for ClockHandle {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, time: f64) {
        self.time = time;
    }

    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
