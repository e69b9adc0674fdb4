//! Shell configuration.

use vgamer_media::ExportEncoding;

/// Headless shell configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Simulated seconds between primary time updates
    pub preview_step_secs: f64,
    /// Source pixel size the export plan is built for
    pub source_width: u32,
    pub source_height: u32,
    /// Skip analysis and use the built-in sample segment
    pub use_fixture: bool,
    /// Print a Prometheus snapshot of the counters on exit
    pub print_metrics: bool,
    /// Encoder settings written into the export arguments
    pub encoding: ExportEncoding,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            preview_step_secs: 0.25,
            source_width: 1920,
            source_height: 1080,
            use_fixture: false,
            print_metrics: false,
            encoding: ExportEncoding::default(),
        }
    }
}

impl CliConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            preview_step_secs: lookup("VGAMER_PREVIEW_STEP_SECS")
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|step| step.is_finite() && *step > 0.0)
                .unwrap_or(defaults.preview_step_secs),
            source_width: lookup("VGAMER_SOURCE_WIDTH")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.source_width),
            source_height: lookup("VGAMER_SOURCE_HEIGHT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.source_height),
            use_fixture: lookup("VGAMER_USE_FIXTURE")
                .map(|v| is_truthy(&v))
                .unwrap_or(defaults.use_fixture),
            print_metrics: lookup("VGAMER_PRINT_METRICS")
                .map(|v| is_truthy(&v))
                .unwrap_or(defaults.print_metrics),
            encoding: ExportEncoding {
                preset: lookup("VGAMER_EXPORT_PRESET")
                    .filter(|p| !p.trim().is_empty())
                    .unwrap_or(defaults.encoding.preset),
                crf: lookup("VGAMER_EXPORT_CRF")
                    .and_then(|s| s.parse::<u8>().ok())
                    .filter(|crf| *crf <= 51)
                    .unwrap_or(defaults.encoding.crf),
                ..defaults.encoding
            },
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}
