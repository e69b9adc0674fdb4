//! Metric names emitted through the `metrics` facade.
//!
//! Nothing here installs a recorder; counters are no-ops until the embedding
//! application installs one.

use metrics::counter;

/// Metric names as constants for consistency.
pub mod names {
    pub const DRIFT_CORRECTIONS_TOTAL: &str = "vgamer_drift_corrections_total";
    pub const LOOP_RESETS_TOTAL: &str = "vgamer_loop_resets_total";
    pub const SEEKS_TOTAL: &str = "vgamer_seeks_total";
    pub const SUBTITLE_EDITS_TOTAL: &str = "vgamer_subtitle_edits_total";
}

/// Record a facecam drift correction.
pub fn record_drift_correction() {
    counter!(names::DRIFT_CORRECTIONS_TOTAL).increment(1);
}

/// Record a loop back to the segment start.
pub fn record_loop_reset() {
    counter!(names::LOOP_RESETS_TOTAL).increment(1);
}

/// Record an explicit scrub.
pub fn record_seek() {
    counter!(names::SEEKS_TOTAL).increment(1);
}

/// Record a subtitle text edit.
pub fn record_subtitle_edit() {
    counter!(names::SUBTITLE_EDITS_TOTAL).increment(1);
}
