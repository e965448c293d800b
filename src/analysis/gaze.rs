//! Eye-gaze stability and saccade analysis

use crate::config::defaults::SACCADE_THRESHOLD_RAD;
use crate::config::SamplingConfig;
use crate::signal;
use crate::types::{GazeMetrics, GazeTrack};

/// Derive gaze-stability, focus-consistency and saccade-rate metrics.
///
/// Returns `None` for an empty track — absent eye-tracking data is a
/// normal condition, not an error.
///
/// The track carries no timestamps, so the saccade rate is converted
/// from an event count using the assumed gaze sampling rate.
pub fn analyze(track: &GazeTrack, sampling: &SamplingConfig) -> Option<GazeMetrics> {
    if track.is_empty() {
        return None;
    }

    let samples = &track.samples;
    let pitch: Vec<f64> = samples.iter().map(|s| s.pitch_rad).collect();
    let left_yaw: Vec<f64> = samples.iter().map(|s| s.left_yaw_rad).collect();
    let right_yaw: Vec<f64> = samples.iter().map(|s| s.right_yaw_rad).collect();
    let depth: Vec<f64> = samples.iter().map(|s| s.depth_m).collect();

    // Lower direction variance = steadier gaze
    let gaze_variance = (signal::variance(&pitch)
        + signal::variance(&left_yaw)
        + signal::variance(&right_yaw))
        / 3.0;
    let gaze_stability = (10.0 - gaze_variance * 100.0).max(0.0);

    let avg_gaze_depth_m = signal::mean(&depth);
    // Depth consistency in (0, 1]; 1 = fixated at a constant distance
    let gaze_focus_consistency = 1.0 / (1.0 + signal::std_dev(&depth));

    // Frame-to-frame direction changes
    let pitch_diffs: Vec<f64> = pitch.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    let combined_yaw: Vec<f64> = samples.iter().map(|s| s.combined_yaw()).collect();
    let yaw_diffs: Vec<f64> = combined_yaw.windows(2).map(|w| (w[1] - w[0]).abs()).collect();

    let avg_gaze_shift = (signal::mean(&pitch_diffs) + signal::mean(&yaw_diffs)) / 2.0;

    let saccade_events = pitch_diffs.iter().filter(|&&d| d > SACCADE_THRESHOLD_RAD).count();
    let observed_seconds = samples.len() as f64 / sampling.gaze_rate_hz;
    let saccades_per_second = saccade_events as f64 / observed_seconds;

    Some(GazeMetrics {
        gaze_stability,
        avg_gaze_depth_m,
        gaze_focus_consistency,
        avg_gaze_shift,
        saccades_per_second,
    })
}
