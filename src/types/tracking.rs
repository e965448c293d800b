//! Companion perception tracks: hand-landmark and eye-gaze samples

use serde::{Deserialize, Serialize};

use super::Vec3;

/// One wrist-position sample from the hand-tracking pipeline
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HandSample {
    /// Wrist position in the device frame (m)
    pub position: Vec3,
    /// Tracking confidence 0-1, when the source provided it
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Tracking timestamp (µs), when the source provided it
    #[serde(default)]
    pub timestamp_us: Option<u64>,
}

impl HandSample {
    /// Whether the position is usable for kinematics.
    ///
    /// The tracker marks dropped frames with an all-zero position, a -1
    /// sentinel on one or more axes, or NaN. Those samples are excluded
    /// from all position-derived metrics.
    pub fn is_valid(&self) -> bool {
        let p = self.position;
        !(p.is_zero() || p.has_nan() || p.x == -1.0 || p.y == -1.0 || p.z == -1.0)
    }
}

/// Ordered sequence of wrist samples for one hand
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandTrack {
    pub samples: Vec<HandSample>,
}

impl HandTrack {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximal valid sub-sequence in original order
    pub fn valid_positions(&self) -> Vec<Vec3> {
        self.samples
            .iter()
            .filter(|s| s.is_valid())
            .map(|s| s.position)
            .collect()
    }
}

/// One eye-gaze sample
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GazeSample {
    /// Vertical gaze direction (rad)
    pub pitch_rad: f64,
    /// Horizontal gaze direction, left eye (rad)
    pub left_yaw_rad: f64,
    /// Horizontal gaze direction, right eye (rad)
    pub right_yaw_rad: f64,
    /// Distance to the gaze point (m)
    pub depth_m: f64,
}

impl GazeSample {
    /// Combined horizontal direction, mean of both eyes (rad)
    pub fn combined_yaw(&self) -> f64 {
        (self.left_yaw_rad + self.right_yaw_rad) / 2.0
    }
}

/// Ordered sequence of gaze samples
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GazeTrack {
    pub samples: Vec<GazeSample>,
}

impl GazeTrack {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f64, y: f64, z: f64) -> HandSample {
        HandSample { position: Vec3::new(x, y, z), confidence: None, timestamp_us: None }
    }

    #[test]
    fn test_hand_sample_validity() {
        assert!(sample(0.1, 0.2, 0.3).is_valid());
        assert!(!sample(0.0, 0.0, 0.0).is_valid(), "all-zero position is a dropped frame");
        assert!(!sample(0.1, -1.0, 0.3).is_valid(), "-1 sentinel on any axis is invalid");
        assert!(!sample(f64::NAN, 0.2, 0.3).is_valid(), "NaN position is invalid");
    }

    #[test]
    fn test_valid_positions_preserves_order() {
        let track = HandTrack {
            samples: vec![sample(1.0, 0.0, 0.0), sample(0.0, 0.0, 0.0), sample(2.0, 0.0, 0.0)],
        };
        let valid = track.valid_positions();
        assert_eq!(valid.len(), 2);
        assert_eq!(valid[0].x, 1.0);
        assert_eq!(valid[1].x, 2.0);
    }
}
