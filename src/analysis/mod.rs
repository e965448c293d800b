//! Metrics derivation pipeline
//!
//! One module per analyzer, each a pure function over its slice of the
//! session:
//! - `motion`: head stability and tremor from the IMU stream
//! - `visual`: frame-to-frame jitter from sampled frames
//! - `gaze`: gaze stability and saccade rate from eye tracking
//! - `hand`: wrist kinematics from hand-landmark tracks
//! - `stress`: heuristic stress proxies from motion variability
//! - `performance`: weighted overall score and expert benchmark gaps
//!
//! Analyzers never fail on missing input — they degrade to defaults or
//! omit their block — so one bad stream cannot abort a session.

pub mod gaze;
pub mod hand;
pub mod motion;
pub mod performance;
pub mod stress;
pub mod visual;

use rand::Rng;
use tracing::info;

use crate::config::AnalysisConfig;
use crate::types::{GazeMetrics, GazeTrack, HandMetrics, HandTrack, SensorSession, SessionMetrics};

pub use performance::compute_benchmark_gaps;

/// Run every session-level analyzer and aggregate the result.
///
/// The motion, stability, stress and performance categories are always
/// present (degraded to defaults when their input stream is absent);
/// companion-data categories start empty and are attached by the caller
/// when tracks exist.
///
/// `rng` feeds the stress estimator's simulated fallback; pass a seeded
/// generator for reproducible output.
pub fn compute_session_metrics<R: Rng + ?Sized>(
    session: &SensorSession,
    config: &AnalysisConfig,
    rng: &mut R,
) -> SessionMetrics {
    info!(
        imu_samples = session.imu_samples.len(),
        frames = session.frames.len(),
        num_frames = session.num_frames,
        "Analyzing session"
    );

    let motion = motion::analyze(&session.imu_samples, session.num_frames, &config.filter);
    info!(
        head_stability = motion.head_stability_score,
        avg_tremor = motion.avg_tremor,
        "Motion analysis complete"
    );

    let stability = visual::analyze(&session.frames);
    info!(
        visual_stability = stability.visual_stability,
        "Visual stability analysis complete"
    );

    let stress = stress::analyze(&session.imu_samples, rng);
    info!(
        avg_heart_rate = stress.avg_heart_rate,
        peak_stress = stress.peak_stress_level,
        simulated = stress.simulated,
        "Stress estimation complete (motion-derived proxy, not a measurement)"
    );

    let performance = performance::score(&motion, &stability, &stress, &config.weights);
    info!(
        overall_score = performance.overall_score,
        "Performance aggregation complete"
    );

    SessionMetrics {
        motion,
        stability,
        stress,
        performance,
        hand_tracking: None,
        eye_tracking: None,
    }
}

/// Hand-kinematics metrics for a companion track. `None` when empty.
pub fn compute_hand_metrics(track: &HandTrack, config: &AnalysisConfig) -> Option<HandMetrics> {
    hand::analyze(track, &config.sampling, &config.filter)
}

/// Eye-gaze metrics for a companion track. `None` when empty.
pub fn compute_gaze_metrics(track: &GazeTrack, config: &AnalysisConfig) -> Option<GazeMetrics> {
    gaze::analyze(track, &config.sampling)
}
