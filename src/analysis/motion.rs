//! Head motion and tremor analysis from the IMU stream

use tracing::debug;

use crate::config::defaults::GRAVITY_Z_MPS2;
use crate::config::FilterConfig;
use crate::signal;
use crate::types::{ImuSample, MotionMetrics, Vec3};

/// Derive head-movement, stability and tremor metrics from IMU samples.
///
/// `num_frames` is the full recording's frame count; `tremor_per_frame`
/// is downsampled to that length so reporting can plot it against video.
///
/// Absent IMU data degrades to the all-default result — this analyzer
/// never fails on missing input.
pub fn analyze(samples: &[ImuSample], num_frames: usize, filter: &FilterConfig) -> MotionMetrics {
    if samples.is_empty() {
        debug!("No IMU data available, using default motion metrics");
        return MotionMetrics::default();
    }

    let gravity = Vec3::new(0.0, 0.0, GRAVITY_Z_MPS2);

    let gyro_magnitudes: Vec<f64> = samples.iter().map(|s| s.gyro.norm()).collect();
    // Linear acceleration magnitude with gravity removed componentwise
    let accel_magnitudes: Vec<f64> = samples.iter().map(|s| (s.accel - gravity).norm()).collect();

    let head_movement_total = gyro_magnitudes.iter().sum::<f64>();

    // Still head: std = 0 scores exactly 10; clamped so a violently
    // moving head never goes negative.
    let gyro_std = signal::std_dev(&gyro_magnitudes);
    let head_stability_score = (10.0 - gyro_std * 10.0).max(0.0);

    // Tremor is the high-frequency component of the acceleration
    // magnitude. Below the filter floor the metrics stay at zero.
    let tremor_signal = signal::highpass(&accel_magnitudes, filter.imu_tremor_cutoff);
    let (avg_tremor, tremor_per_frame) = if tremor_signal.is_empty() {
        (0.0, Vec::new())
    } else {
        let avg = signal::mean_abs(&tremor_signal);
        let per_frame = if num_frames == 0 {
            Vec::new()
        } else {
            let window = (tremor_signal.len() / num_frames).max(1);
            signal::fit_to_length(signal::windowed_mean_abs(&tremor_signal, window), num_frames)
        };
        (avg, per_frame)
    };

    MotionMetrics {
        head_movement_total,
        head_stability_score,
        avg_tremor,
        tremor_per_frame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stationary_sample(ts: u64) -> ImuSample {
        ImuSample {
            timestamp_ns: ts,
            accel: Vec3::new(0.0, 0.0, GRAVITY_Z_MPS2),
            gyro: Vec3::ZERO,
        }
    }

    #[test]
    fn test_no_imu_data_defaults() {
        let metrics = analyze(&[], 300, &FilterConfig::default());
        assert_eq!(metrics.head_movement_total, 0.0);
        assert_eq!(metrics.head_stability_score, 0.0);
        assert_eq!(metrics.avg_tremor, 0.0);
        assert!(metrics.tremor_per_frame.is_empty());
    }

    #[test]
    fn test_stationary_sensor_scores_perfectly() {
        // 150 identical samples: no rotation, gravity-only acceleration
        let samples: Vec<ImuSample> = (0..150).map(|i| stationary_sample(i as u64)).collect();
        let metrics = analyze(&samples, 30, &FilterConfig::default());

        assert_eq!(metrics.head_movement_total, 0.0);
        assert_eq!(metrics.head_stability_score, 10.0, "std = 0 must score exactly 10");
        assert!(metrics.avg_tremor.abs() < 1e-12, "gravity-only accel has zero tremor");
        assert_eq!(metrics.tremor_per_frame.len(), 30);
        assert!(metrics.tremor_per_frame.iter().all(|&t| t.abs() < 1e-12));
    }

    #[test]
    fn test_stability_score_never_negative() {
        // Wildly alternating gyro magnitudes give a large std
        let samples: Vec<ImuSample> = (0..200)
            .map(|i| ImuSample {
                timestamp_ns: i as u64,
                accel: Vec3::new(0.0, 0.0, GRAVITY_Z_MPS2),
                gyro: if i % 2 == 0 { Vec3::new(50.0, 0.0, 0.0) } else { Vec3::ZERO },
            })
            .collect();
        let metrics = analyze(&samples, 10, &FilterConfig::default());
        assert_eq!(metrics.head_stability_score, 0.0);
    }

    #[test]
    fn test_stability_monotone_in_gyro_std() {
        let make = |amplitude: f64| -> f64 {
            let samples: Vec<ImuSample> = (0..200)
                .map(|i| ImuSample {
                    timestamp_ns: i as u64,
                    accel: Vec3::new(0.0, 0.0, GRAVITY_Z_MPS2),
                    gyro: if i % 2 == 0 { Vec3::new(amplitude, 0.0, 0.0) } else { Vec3::ZERO },
                })
                .collect();
            analyze(&samples, 10, &FilterConfig::default()).head_stability_score
        };
        let calm = make(0.1);
        let shaky = make(0.5);
        assert!(
            calm > shaky,
            "larger gyro std must not raise the score: calm={} shaky={}",
            calm,
            shaky
        );
    }

    #[test]
    fn test_short_series_skips_tremor() {
        // 50 samples is below the filter floor: stability still computed,
        // tremor metrics stay zero.
        let samples: Vec<ImuSample> = (0..50)
            .map(|i| ImuSample {
                timestamp_ns: i as u64,
                accel: Vec3::new(0.3, 0.1, GRAVITY_Z_MPS2 + 0.2),
                gyro: Vec3::new(0.01, 0.0, 0.0),
            })
            .collect();
        let metrics = analyze(&samples, 30, &FilterConfig::default());
        assert!(metrics.head_stability_score > 9.9);
        assert_eq!(metrics.avg_tremor, 0.0);
        assert!(metrics.tremor_per_frame.is_empty());
    }

    #[test]
    fn test_tremor_per_frame_matches_frame_count() {
        let samples: Vec<ImuSample> = (0..1000)
            .map(|i| ImuSample {
                timestamp_ns: i as u64,
                accel: Vec3::new(
                    (i as f64 * 1.3).sin() * 0.5,
                    0.0,
                    GRAVITY_Z_MPS2 + (i as f64 * 2.1).sin() * 0.5,
                ),
                gyro: Vec3::ZERO,
            })
            .collect();
        let metrics = analyze(&samples, 300, &FilterConfig::default());
        assert_eq!(metrics.tremor_per_frame.len(), 300);
        assert!(metrics.avg_tremor > 0.0, "oscillating accel should register tremor");
    }
}
