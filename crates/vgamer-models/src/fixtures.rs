//! Built-in fallback segments used when no analysis result is available.

use crate::rect::CropRect;
use crate::segment::VideoSegment;
use crate::subtitle::Subtitle;

/// Public sample video the fallback segments were authored against.
pub const SAMPLE_VIDEO_URL: &str =
    "https://storage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

/// The fallback highlight: a 45 second window with a facecam in the top-right corner.
pub fn sample_segments() -> Vec<VideoSegment> {
    vec![VideoSegment::new(0.0, 45.0, "Epic Gaming Moment")
        .with_crops(
            Some(CropRect::new(0.0, 0.0, 100.0, 70.0)),
            Some(CropRect::new(75.0, 10.0, 20.0, 25.0)),
        )
        .with_subtitles(vec![
            Subtitle::new("1", 1.0, 3.0, "GILA COY! HEADSHOT!"),
            Subtitle::new("2", 3.5, 6.0, "Nggak nyangka banget bisa dapet momen ini."),
            Subtitle::new(
                "3",
                6.5,
                10.0,
                "Jangan lupa subscribe buat konten gaming seru lainnya!",
            ),
        ])]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_segments_are_valid() {
        let segments = sample_segments();
        assert_eq!(segments.len(), 1);
        assert!(segments[0].validate().is_ok());
        assert!(segments[0]
            .subtitles
            .iter()
            .all(|s| segments[0].contains(s.start_time) && segments[0].contains(s.end_time)));
    }
}
