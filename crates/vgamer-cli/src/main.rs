//! Headless VClip Gamer editing shell.
//!
//! Obtains highlight segments for a video, plays the selected segment through
//! the composite renderer with simulated clocks, and prints the frames and the
//! encoder arguments for the vertical short.

mod config;
mod metrics;
mod preview;
mod source;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vgamer_analysis::{FixtureAnalyzer, GeminiAnalyzer, SegmentAnalyzer};
use vgamer_media::{EditorEvent, EditorState};
use vgamer_models::timestamp::format_clock;
use vgamer_models::{AppState, LayoutMode, StylingConfig, VideoSegment};

use crate::config::CliConfig;
use crate::preview::run_preview;
use crate::source::{load_segments, InputSource};

#[derive(Debug, Parser)]
#[command(name = "vgamer", version, about = "Turn gameplay videos into vertical shorts")]
struct Cli {
    /// Video file, saved segments (.json) or URL; the built-in sample when omitted
    input: Option<String>,

    /// Composite layout
    #[arg(short, long, default_value = "gaming-split")]
    layout: LayoutMode,

    /// Facecam zoom (1.0 - 2.0)
    #[arg(long, default_value_t = 1.2)]
    face_zoom: f64,

    /// Caption position from the bottom, in percent
    #[arg(long, default_value_t = 20.0)]
    position_y: f64,

    /// Keep caption case as written
    #[arg(long)]
    no_uppercase: bool,

    /// Segment to preview and export
    #[arg(short, long, default_value_t = 0)]
    segment: usize,

    /// Seconds of playback to simulate; the segment duration when omitted
    #[arg(long, value_parser = parse_duration)]
    duration: Option<f64>,

    /// Print every preview frame as JSON lines
    #[arg(long)]
    frames: bool,

    /// Output path used in the printed encoder arguments
    #[arg(short, long, default_value = "short.mp4")]
    output: PathBuf,
}

impl Cli {
    fn styling(&self) -> anyhow::Result<StylingConfig> {
        let mut styling = StylingConfig::default()
            .with_layout(self.layout)
            .with_face_zoom(self.face_zoom);
        styling.position_y = self.position_y;
        styling.is_uppercase = !self.no_uppercase;
        styling.validate().map_err(|e| anyhow!("Invalid styling: {}", e))?;
        Ok(styling)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install rustls crypto provider"))?;

    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();
    let config = CliConfig::from_env();
    info!(?config, "Starting vgamer");
    let metrics_handle = if config.print_metrics {
        Some(metrics::init_metrics()?)
    } else {
        None
    };

    let source = InputSource::resolve(cli.input.as_deref(), config.use_fixture)?;
    let mut state = EditorState::new(cli.styling()?);
    if let InputSource::Video { .. } = source {
        state = state.apply(EditorEvent::UploadStarted {
            source: source.describe(),
        });
    }
    let state = state.apply(EditorEvent::VideoSubmitted {
        source: source.describe(),
    });

    let state = match obtain_segments(&source).await {
        Ok(segments) => state.apply(EditorEvent::AnalysisCompleted(segments)),
        Err(SegmentsError::Analysis(notice)) => state.apply(EditorEvent::AnalysisFailed(notice)),
        Err(SegmentsError::Other(e)) => return Err(e),
    };
    if state.app_state() != AppState::Editing {
        bail!(state.error().unwrap_or("Analysis failed").to_string());
    }

    let state = state.apply(EditorEvent::SegmentSelected(cli.segment));
    if state.selected_index() != cli.segment {
        bail!(
            "Segment {} out of range ({} segments)",
            cli.segment,
            state.segments().len()
        );
    }
    let Some(segment) = state.selected_segment() else {
        bail!("No segment selected");
    };
    info!(
        summary = %segment.summary,
        start = %format_clock(segment.start_time),
        end = %format_clock(segment.end_time),
        subtitles = segment.subtitles.len(),
        "Previewing segment"
    );

    let duration = cli.duration.unwrap_or_else(|| segment.duration());
    let (state, frames) = run_preview(state, config.preview_step_secs, duration);
    if cli.frames {
        for frame in &frames {
            println!("{}", serde_json::to_string(frame)?);
        }
    } else {
        let captions = frames.iter().filter(|f| f.frame.overlay.is_some()).count();
        info!(frames = frames.len(), with_captions = captions, "Preview complete");
    }

    let state = state.apply(EditorEvent::ExportRequested);
    let plan = state
        .export_plan(config.source_width, config.source_height)
        .context("Failed to build export plan")?
        .with_encoding(config.encoding.clone());
    let input = match &source {
        InputSource::Video { path, .. } => path.clone(),
        other => PathBuf::from(other.describe()),
    };
    let args = plan.args(&input, &cli.output);
    println!("{}", serde_json::to_string_pretty(&serde_json::json!({
        "program": "ffmpeg",
        "args": args,
        "plan": plan,
    }))?);

    let state = state.apply(EditorEvent::ExportClosed);
    info!(state = %state.app_state(), "Done");
    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }
    Ok(())
}

/// Positive, finite seconds.
fn parse_duration(raw: &str) -> Result<f64, String> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number of seconds", raw))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("duration must be a positive, finite number of seconds, got {}", raw));
    }
    Ok(secs)
}

fn init_tracing() -> anyhow::Result<()> {
    // Colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("vgamer=info".parse()?);

    // stdout carries frames and the plan; logs go to stderr
    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(env_filter)
            .init();
    }
    Ok(())
}

enum SegmentsError {
    /// Analysis failed; carries the user-facing notice
    Analysis(String),
    Other(anyhow::Error),
}

async fn obtain_segments(source: &InputSource) -> Result<Vec<VideoSegment>, SegmentsError> {
    let result = match source {
        InputSource::Fixture | InputSource::Url(_) => {
            FixtureAnalyzer::new().analyze(&[], "").await
        }
        InputSource::SegmentsFile(path) => {
            return load_segments(path).await.map_err(SegmentsError::Other);
        }
        InputSource::Video { path, mime_type } => {
            let video = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))
                .map_err(SegmentsError::Other)?;
            let analyzer = GeminiAnalyzer::from_env().map_err(|e| SegmentsError::Other(e.into()))?;
            log_while_pending(analyzer.analyze(&video, mime_type)).await
        }
    };

    result.map_err(|e| {
        warn!(error = %e, "Analysis failed");
        SegmentsError::Analysis(e.user_message())
    })
}

/// Log progress while a long analysis is pending.
async fn log_while_pending<F, T>(fut: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::pin!(fut);
    let mut ticker = tokio::time::interval(Duration::from_secs(15));
    ticker.tick().await;
    loop {
        tokio::select! {
            out = &mut fut => return out,
            _ = ticker.tick() => info!("Still analyzing..."),
        }
    }
}
