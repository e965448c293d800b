//! Sensor session types: IMU samples, frame samples, extracted recordings

use serde::{Deserialize, Serialize};

use crate::config::defaults::ASSUMED_VIDEO_FPS;

/// 3-component vector used for accelerometer, gyroscope and wrist positions.
///
/// Units depend on context: m/s² (accel), rad/s (gyro), m (positions).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Population variance of the three components.
    ///
    /// Used by the stress estimator as a per-sample motion-variability proxy.
    pub fn component_variance(&self) -> f64 {
        let mean = (self.x + self.y + self.z) / 3.0;
        ((self.x - mean).powi(2) + (self.y - mean).powi(2) + (self.z - mean).powi(2)) / 3.0
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    pub fn has_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Single IMU reading from the headset
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImuSample {
    /// Capture timestamp (ns, device clock)
    pub timestamp_ns: u64,
    /// Linear acceleration including gravity (m/s²)
    pub accel: Vec3,
    /// Angular velocity (rad/s)
    pub gyro: Vec3,
}

/// Raw pixel buffer for one sampled frame.
///
/// `data` is row-major, `channels` interleaved (1 = grayscale, 3 = RGB).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl FrameBuffer {
    /// Per-pixel luminance, averaging channels for multi-channel frames.
    ///
    /// Returns one f64 per pixel in row-major order. An inconsistent buffer
    /// (data length not matching the declared shape) yields an empty vec.
    pub fn luminance(&self) -> Vec<f64> {
        let pixels = self.width * self.height;
        if self.channels == 0 || self.data.len() != pixels * self.channels {
            return Vec::new();
        }

        self.data
            .chunks_exact(self.channels)
            .map(|px| px.iter().map(|&c| f64::from(c)).sum::<f64>() / self.channels as f64)
            .collect()
    }
}

/// One sampled video frame with its capture timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSample {
    /// Capture timestamp (ns, device clock)
    pub timestamp_ns: u64,
    pub buffer: FrameBuffer,
}

/// Extracted content of one device recording.
///
/// Frames are a sparse sample of the full recording (the loader keeps
/// roughly one in N for cost control); `num_frames` is the frame count of
/// the full recording and is what per-frame metrics are aligned to.
///
/// Invariant: `imu_samples` and `frames` are each sorted by timestamp
/// ascending. Loaders call [`SensorSession::normalize`] after assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorSession {
    /// Ordered IMU samples (possibly empty when the stream was absent)
    #[serde(default)]
    pub imu_samples: Vec<ImuSample>,
    /// Ordered sparse frame samples
    #[serde(default)]
    pub frames: Vec<FrameSample>,
    /// Frame count of the full recording
    pub num_frames: usize,
    /// Source the session was extracted from (path or "simulation")
    #[serde(default)]
    pub recording_path: String,
}

impl SensorSession {
    /// Restore the sorted-by-timestamp invariant after assembly.
    pub fn normalize(&mut self) {
        self.imu_samples.sort_by_key(|s| s.timestamp_ns);
        self.frames.sort_by_key(|f| f.timestamp_ns);
    }

    /// Session duration in seconds.
    ///
    /// Last − first frame timestamp when at least two frames carry
    /// timestamps; otherwise estimated as `num_frames` at the assumed
    /// video frame rate.
    pub fn duration_s(&self) -> f64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) if last.timestamp_ns > first.timestamp_ns => {
                (last.timestamp_ns - first.timestamp_ns) as f64 / 1e9
            }
            _ => self.num_frames as f64 / ASSUMED_VIDEO_FPS,
        }
    }
}
