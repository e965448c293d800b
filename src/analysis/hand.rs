//! Hand kinematics analysis from wrist-landmark tracks

use tracing::debug;

use crate::config::defaults::MIN_VALID_HAND_SAMPLES;
use crate::config::{FilterConfig, SamplingConfig};
use crate::signal;
use crate::types::{HandKinematics, HandMetrics, HandTrack, Vec3};

/// Derive hand kinematics from a wrist track.
///
/// Returns `None` for an empty track. With fewer than
/// [`MIN_VALID_HAND_SAMPLES`] valid positions the kinematics block is
/// omitted — not zero-filled — so the output never implies a measurement
/// that wasn't made; confidence and duration are still reported when
/// their source fields exist.
pub fn analyze(
    track: &HandTrack,
    sampling: &SamplingConfig,
    filter: &FilterConfig,
) -> Option<HandMetrics> {
    if track.is_empty() {
        return None;
    }

    // Duration and confidence come from the whole track, independent of
    // position validity.
    let timestamps: Vec<u64> = track.samples.iter().filter_map(|s| s.timestamp_us).collect();
    let task_duration_s = match (timestamps.first(), timestamps.last()) {
        (Some(&first), Some(&last)) if last > first => Some((last - first) as f64 / 1e6),
        _ => None,
    };

    let confidences: Vec<f64> = track.samples.iter().filter_map(|s| s.confidence).collect();
    let avg_confidence = (!confidences.is_empty()).then(|| signal::mean(&confidences));

    let positions = track.valid_positions();
    let kinematics = if positions.len() < MIN_VALID_HAND_SAMPLES {
        debug!(
            valid = positions.len(),
            total = track.samples.len(),
            "Too few valid wrist positions, omitting kinematics"
        );
        None
    } else {
        Some(kinematics_from_positions(&positions, sampling, filter))
    };

    Some(HandMetrics { kinematics, task_duration_s, avg_confidence })
}

/// Position-derived kinematics over the valid sub-sequence.
fn kinematics_from_positions(
    positions: &[Vec3],
    sampling: &SamplingConfig,
    filter: &FilterConfig,
) -> HandKinematics {
    // Per-step 3-D displacements between consecutive valid samples
    let distances: Vec<f64> = positions.windows(2).map(|w| (w[1] - w[0]).norm()).collect();
    let velocities: Vec<f64> =
        distances.iter().map(|d| d * sampling.hand_rate_hz).collect();

    let path_length_m = distances.iter().sum::<f64>();
    let avg_speed_m_s = signal::mean(&distances) * sampling.hand_rate_hz;

    let velocity_variance = signal::variance(&velocities);
    let smoothness_score = (10.0 - velocity_variance * 1000.0).max(0.0);

    // High-frequency velocity component; zero below the filter floor
    let hand_tremor = signal::mean_abs(&signal::highpass(&velocities, filter.hand_tremor_cutoff));

    let workspace_volume_m3 = bounding_box_volume(positions);

    // Straight-line distance over path length. Zero-length path: defined
    // as 0, a NaN must never escape into the result.
    let efficiency = if path_length_m > 0.0 {
        let first = positions[0];
        let last = positions[positions.len() - 1];
        (last - first).norm() / path_length_m
    } else {
        0.0
    };

    HandKinematics {
        path_length_m,
        avg_speed_m_s,
        velocity_variance,
        smoothness_score,
        hand_tremor,
        workspace_volume_m3,
        efficiency,
    }
}

/// Product of the per-axis extents of the positions.
fn bounding_box_volume(positions: &[Vec3]) -> f64 {
    let mut min = positions[0];
    let mut max = positions[0];
    for p in positions {
        min = Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
        max = Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
    }
    (max.x - min.x) * (max.y - min.y) * (max.z - min.z)
}
