//! Sensor data acquisition module
//!
//! Loads extracted session dumps and companion perception files into the
//! in-memory shapes the analyzers consume:
//! - session dumps: JSON-serialized [`SensorSession`] exports
//! - companion data: column-keyed CSV hand/gaze tracks (`companion`)
//! - simulation: synthetic sessions for running without a device (`simulation`)
//!
//! Loaders surface clear errors for malformed files; they never pass a
//! malformed shape into the core. Cost is bounded with fixed-ratio
//! sub-sampling (keep every Nth record), trading fidelity for bounded
//! work rather than time-limiting the analysis.

pub mod companion;
pub mod simulation;

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::config::SamplingConfig;
use crate::types::SensorSession;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed session dump {path}: {source}")]
    MalformedSession {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed companion file {path} (line {line}): {reason}")]
    MalformedCompanion { path: String, line: usize, reason: String },

    #[error("Missing column '{column}' in {path}")]
    MissingColumn { column: String, path: String },
}

// ============================================================================
// Session Dump Loading
// ============================================================================

/// Load an extracted session dump (JSON [`SensorSession`]).
///
/// Restores the sorted-by-timestamp invariant and applies fixed-ratio
/// sub-sampling down to the configured frame and IMU targets.
pub fn load_session(
    path: &Path,
    sampling: &SamplingConfig,
) -> Result<SensorSession, AcquisitionError> {
    let raw = std::fs::read_to_string(path)?;
    let mut session: SensorSession =
        serde_json::from_str(&raw).map_err(|source| AcquisitionError::MalformedSession {
            path: path.display().to_string(),
            source,
        })?;

    session.recording_path = path.display().to_string();
    session.normalize();

    let frames_before = session.frames.len();
    let imu_before = session.imu_samples.len();
    session.frames = subsample(session.frames, sampling.frame_sample_target);
    session.imu_samples = subsample(session.imu_samples, sampling.imu_sample_target);

    info!(
        path = %path.display(),
        frames = session.frames.len(),
        frames_total = frames_before,
        imu_samples = session.imu_samples.len(),
        imu_total = imu_before,
        num_frames = session.num_frames,
        "Loaded session dump"
    );

    Ok(session)
}

/// Keep every Nth element so at most ~`target` remain.
///
/// N is the fixed ratio `len / target`; the exact kept count may exceed
/// the target by the rounding remainder.
fn subsample<T>(items: Vec<T>, target: usize) -> Vec<T> {
    if target == 0 || items.len() <= target {
        return items;
    }
    let step = items.len() / target;
    items
        .into_iter()
        .step_by(step.max(1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FrameBuffer, FrameSample, ImuSample, Vec3};
    use std::io::Write;

    #[test]
    fn test_subsample_keeps_short_inputs() {
        let items: Vec<u32> = (0..50).collect();
        assert_eq!(subsample(items.clone(), 100), items);
    }

    #[test]
    fn test_subsample_fixed_ratio() {
        let items: Vec<u32> = (0..1000).collect();
        let kept = subsample(items, 100);
        assert_eq!(kept.len(), 100);
        assert_eq!(kept[0], 0);
        assert_eq!(kept[1], 10);
    }

    #[test]
    fn test_load_session_round_trip() {
        let session = SensorSession {
            imu_samples: vec![
                ImuSample {
                    timestamp_ns: 200,
                    accel: Vec3::new(0.0, 0.0, 9.81),
                    gyro: Vec3::ZERO,
                },
                ImuSample {
                    timestamp_ns: 100,
                    accel: Vec3::new(0.0, 0.0, 9.81),
                    gyro: Vec3::ZERO,
                },
            ],
            frames: vec![FrameSample {
                timestamp_ns: 0,
                buffer: FrameBuffer { width: 2, height: 2, channels: 1, data: vec![0; 4] },
            }],
            num_frames: 30,
            recording_path: String::new(),
        };

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(serde_json::to_string(&session).expect("serialize").as_bytes())
            .expect("write dump");

        let loaded =
            load_session(file.path(), &SamplingConfig::default()).expect("load dump");
        assert_eq!(loaded.num_frames, 30);
        assert_eq!(loaded.imu_samples.len(), 2);
        // normalize() restored timestamp order
        assert!(loaded.imu_samples[0].timestamp_ns < loaded.imu_samples[1].timestamp_ns);
    }

    #[test]
    fn test_load_session_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"{ not json").expect("write");
        let err = load_session(file.path(), &SamplingConfig::default());
        assert!(matches!(err, Err(AcquisitionError::MalformedSession { .. })));
    }
}
