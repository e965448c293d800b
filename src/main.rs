//! OPSIGHT - Surgical Training Performance Intelligence
//!
//! Batch analyzer for wearable sensor session recordings.
//!
//! # Usage
//!
//! ```bash
//! # Analyze one extracted session dump
//! opsight --recording data/recordings/session1.json
//!
//! # Analyze every dump in a directory, isolating per-session failures
//! opsight --mode batch --recordings-dir data/recordings
//!
//! # Run the pipeline on synthetic data (no device required)
//! opsight --simulate --seed 42
//! ```
//!
//! # Environment Variables
//!
//! - `OPSIGHT_CONFIG`: Path to an analysis config TOML
//! - `RUST_LOG`: Logging level (default: info)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use opsight::acquisition::{self, companion, simulation};
use opsight::analysis;
use opsight::config::AnalysisConfig;
use opsight::report::{self, SessionInfo, SessionReport};
use opsight::types::SessionMetrics;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Process a single recording
    Single,
    /// Process every recording in the recordings directory
    Batch,
}

#[derive(Parser, Debug)]
#[command(name = "opsight")]
#[command(about = "OPSIGHT Surgical Training Performance Analyzer")]
#[command(version)]
struct CliArgs {
    /// Path to an extracted session dump (.json)
    #[arg(long)]
    recording: Option<PathBuf>,

    /// Directory containing multiple session dumps
    #[arg(long, default_value = "data/recordings")]
    recordings_dir: PathBuf,

    /// Directory for output reports
    #[arg(long, default_value = "outputs/reports")]
    output_dir: PathBuf,

    /// Directory holding per-session companion data (hand/gaze CSVs),
    /// one sub-directory per recording name
    #[arg(long, default_value = "data/companion")]
    companion_dir: PathBuf,

    /// Process single file or batch process a directory
    #[arg(long, value_enum, default_value = "single")]
    mode: Mode,

    /// Path to an analysis config TOML (overrides OPSIGHT_CONFIG)
    #[arg(long, env = "OPSIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Analyze a synthetic session instead of a recording
    #[arg(long)]
    simulate: bool,

    /// Seed for the simulated data and stress-proxy fallback
    #[arg(long)]
    seed: Option<u64>,
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    let config = AnalysisConfig::load(args.config.as_deref()).context("loading config")?;
    config.filter.validate()?;
    config.weights.warn_if_unnormalized();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match args.mode {
        Mode::Single => {
            if args.recording.is_none() && !args.simulate {
                anyhow::bail!(
                    "--recording is required for single mode (or pass --simulate); \
                     example: opsight --recording data/recordings/session1.json"
                );
            }
            let report_path = process_recording(&args, args.recording.as_deref(), &config, &mut rng)?;
            info!(report = %report_path.display(), "Analysis complete");
        }
        Mode::Batch => process_batch(&args, &config, &mut rng)?,
    }

    Ok(())
}

// ============================================================================
// Single Recording
// ============================================================================

/// Load, analyze and report one recording. Returns the HTML report path.
fn process_recording<R: Rng + ?Sized>(
    args: &CliArgs,
    recording: Option<&Path>,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<PathBuf> {
    let (session, session_name) = match recording {
        Some(path) => {
            info!(path = %path.display(), "Loading session dump");
            let session = acquisition::load_session(path, &config.sampling)
                .with_context(|| format!("loading recording {}", path.display()))?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "session".to_string());
            (session, name)
        }
        None => (simulation::simulated_session(rng), "simulation".to_string()),
    };

    // Session-level metrics are always computable; companion categories
    // attach only when their tracks exist.
    let mut metrics = analysis::compute_session_metrics(&session, config, rng);
    attach_companion_metrics(&mut metrics, &args.companion_dir.join(&session_name), config)?;

    let recommendations = analysis::compute_benchmark_gaps(&metrics, &config.benchmarks);
    info!(count = recommendations.len(), "Computed benchmark gaps");

    let session_report = SessionReport::new(
        SessionInfo {
            session_name: session_name.clone(),
            duration_s: session.duration_s(),
            num_frames: session.num_frames,
            recording_path: session.recording_path.clone(),
        },
        metrics,
        recommendations,
    );

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let output_dir = args.output_dir.join(format!("{session_name}_{timestamp}"));
    let report_path = report::write_report(&session_report, &output_dir)
        .with_context(|| format!("writing report to {}", output_dir.display()))?;

    print_metrics_summary(&session_report.metrics);
    Ok(report_path)
}

/// Attach hand/gaze metrics from a per-session companion directory.
///
/// A missing directory is the normal no-companion-data case; a malformed
/// file inside an existing directory is a real error.
fn attach_companion_metrics(
    metrics: &mut SessionMetrics,
    companion_dir: &Path,
    config: &AnalysisConfig,
) -> Result<()> {
    if !companion_dir.is_dir() {
        info!(dir = %companion_dir.display(), "No companion data directory");
        return Ok(());
    }

    let data = companion::load_companion_dir(companion_dir)
        .with_context(|| format!("loading companion data from {}", companion_dir.display()))?;

    if let Some(track) = data.hand {
        metrics.hand_tracking = analysis::compute_hand_metrics(&track, config);
    }
    if let Some(track) = data.gaze {
        metrics.eye_tracking = analysis::compute_gaze_metrics(&track, config);
    }
    Ok(())
}

// ============================================================================
// Batch Processing
// ============================================================================

/// Process every `.json` dump in the recordings directory.
///
/// One failed session is logged and skipped; the batch always runs to
/// completion.
fn process_batch<R: Rng + ?Sized>(
    args: &CliArgs,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<()> {
    let mut recordings: Vec<PathBuf> = std::fs::read_dir(&args.recordings_dir)
        .with_context(|| format!("scanning {}", args.recordings_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    recordings.sort();

    if recordings.is_empty() {
        warn!(
            dir = %args.recordings_dir.display(),
            "No .json session dumps found — place extracted recordings in this directory"
        );
        return Ok(());
    }

    info!(count = recordings.len(), "Batch processing recordings");

    let mut succeeded = 0usize;
    for (i, recording) in recordings.iter().enumerate() {
        info!(
            recording = %recording.display(),
            progress = %format!("{}/{}", i + 1, recordings.len()),
            "Processing recording"
        );
        match process_recording(args, Some(recording), config, rng) {
            Ok(report_path) => {
                succeeded += 1;
                info!(report = %report_path.display(), "Session analyzed");
            }
            Err(err) => {
                error!(
                    recording = %recording.display(),
                    error = %format!("{err:#}"),
                    "Session analysis failed, continuing with next recording"
                );
            }
        }
    }

    info!(succeeded, total = recordings.len(), "Batch processing complete");
    Ok(())
}

// ============================================================================
// Summary Output
// ============================================================================

/// Print a quick human-readable summary of the key metrics.
fn print_metrics_summary(metrics: &SessionMetrics) {
    println!("Key Metrics Summary:");
    println!("  Head Stability: {:.2}/10", metrics.motion.head_stability_score);
    println!("  Head Tremor (IMU): {:.3}", metrics.motion.avg_tremor);

    if let Some(kin) = metrics.hand_tracking.as_ref().and_then(|h| h.kinematics.as_ref()) {
        println!("  Path Length: {:.2}m", kin.path_length_m);
        println!("  Hand Smoothness: {:.1}/10", kin.smoothness_score);
        println!("  Hand Tremor (tracking): {:.4}", kin.hand_tremor);
    }

    if let Some(eye) = metrics.eye_tracking.as_ref() {
        println!("  Gaze Stability: {:.1}/10", eye.gaze_stability);
    }

    println!(
        "  Estimated Heart Rate: {} bpm{}",
        metrics.stress.avg_heart_rate,
        if metrics.stress.simulated { " (simulated)" } else { "" }
    );
    println!("  Peak Stress: {:.1}/10", metrics.stress.peak_stress_level);
    println!("  Overall Score: {:.1}/100", metrics.performance.overall_score);
}
