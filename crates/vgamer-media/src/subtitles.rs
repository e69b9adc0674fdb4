//! Subtitle resolution and editing.

use tracing::debug;
use vgamer_models::Subtitle;

use crate::metrics;

/// Find the caption showing at `time`.
///
/// Intervals are inclusive on both ends. When intervals overlap the first
/// match in list order wins; the list is never re-sorted.
pub fn resolve_active_subtitle(time: f64, subtitles: &[Subtitle]) -> Option<&Subtitle> {
    subtitles.iter().find(|sub| sub.contains(time))
}

/// Index of the caption showing at `time`, for list highlighting.
pub fn active_subtitle_index(time: f64, subtitles: &[Subtitle]) -> Option<usize> {
    subtitles.iter().position(|sub| sub.contains(time))
}

/// Replace the text of the subtitle with `id`, keeping id and timing.
///
/// Returns false when no subtitle has that id.
pub fn update_subtitle_text(subtitles: &mut [Subtitle], id: &str, text: impl Into<String>) -> bool {
    match subtitles.iter_mut().find(|sub| sub.id == id) {
        Some(sub) => {
            sub.text = text.into();
            metrics::record_subtitle_edit();
            true
        }
        None => {
            debug!(id, "Ignoring edit for unknown subtitle");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_lines() -> Vec<Subtitle> {
        vec![
            Subtitle::new("a", 0.0, 3.0, "A"),
            Subtitle::new("b", 3.5, 6.0, "B"),
        ]
    }

    #[test]
    fn test_resolves_containing_interval() {
        let subs = two_lines();
        assert_eq!(resolve_active_subtitle(1.0, &subs).unwrap().text, "A");
        assert_eq!(resolve_active_subtitle(5.0, &subs).unwrap().text, "B");
    }

    #[test]
    fn test_gap_resolves_to_none() {
        let subs = two_lines();
        assert!(resolve_active_subtitle(3.2, &subs).is_none());
        assert!(resolve_active_subtitle(-1.0, &subs).is_none());
        assert!(resolve_active_subtitle(6.01, &subs).is_none());
        assert!(resolve_active_subtitle(f64::NAN, &subs).is_none());
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let subs = two_lines();
        assert_eq!(resolve_active_subtitle(3.0, &subs).unwrap().id, "a");
        assert_eq!(resolve_active_subtitle(3.5, &subs).unwrap().id, "b");
    }

    #[test]
    fn test_overlap_takes_first_in_list_order() {
        let subs = vec![
            Subtitle::new("late", 2.0, 8.0, "second"),
            Subtitle::new("early", 0.0, 5.0, "first"),
        ];
        assert_eq!(resolve_active_subtitle(4.0, &subs).unwrap().id, "late");
        assert_eq!(active_subtitle_index(1.0, &subs), Some(1));
    }

    #[test]
    fn test_empty_list() {
        assert!(resolve_active_subtitle(1.0, &[]).is_none());
    }

    #[test]
    fn test_update_text_keeps_identity() {
        let mut subs = two_lines();
        assert!(update_subtitle_text(&mut subs, "b", "edited"));
        assert_eq!(subs[1].id, "b");
        assert_eq!(subs[1].text, "edited");
        assert_eq!(subs[1].start_time, 3.5);
        assert_eq!(subs[0].text, "A");

        assert!(!update_subtitle_text(&mut subs, "zzz", "nope"));
    }
}
