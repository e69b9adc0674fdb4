//! Time formatting helpers for segment and subtitle labels.

/// Format seconds with one decimal and a unit suffix, e.g. `3.5s`.
pub fn format_seconds_label(secs: f64) -> String {
    format!("{:.1}s", secs)
}

/// Format seconds into `MM:SS.s`, or `HH:MM:SS.s` past one hour.
///
/// # Examples
/// ```
/// use vgamer_models::timestamp::format_clock;
/// assert_eq!(format_clock(65.3), "01:05.3");
/// assert_eq!(format_clock(3723.0), "01:02:03.0");
/// ```
pub fn format_clock(total_secs: f64) -> String {
    let total_secs = total_secs.max(0.0);
    let hours = (total_secs / 3600.0).floor() as u32;
    let mins = ((total_secs % 3600.0) / 60.0).floor() as u32;
    let secs = total_secs % 60.0;

    if hours > 0 {
        format!("{:02}:{:02}:{:04.1}", hours, mins, secs)
    } else {
        format!("{:02}:{:04.1}", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds_label() {
        assert_eq!(format_seconds_label(1.0), "1.0s");
        assert_eq!(format_seconds_label(6.54), "6.5s");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00.0");
        assert_eq!(format_clock(44.5), "00:44.5");
        assert_eq!(format_clock(-3.0), "00:00.0");
    }
}
