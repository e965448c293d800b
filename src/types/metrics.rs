//! Derived performance metrics: per-analyzer results and the session aggregate

use serde::{Deserialize, Serialize};

// ============================================================================
// Motion (IMU)
// ============================================================================

/// Head motion and tremor metrics derived from the IMU stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionMetrics {
    /// Rectified sum of gyro magnitudes over the session (rad/s units,
    /// grows with sample count — only comparable within one session)
    pub head_movement_total: f64,
    /// 0-10, 10 = perfectly still head
    pub head_stability_score: f64,
    /// Mean absolute high-frequency acceleration component (m/s²)
    pub avg_tremor: f64,
    /// Tremor magnitude downsampled to the video frame count
    pub tremor_per_frame: Vec<f64>,
}

impl Default for MotionMetrics {
    fn default() -> Self {
        Self {
            head_movement_total: 0.0,
            head_stability_score: 0.0,
            avg_tremor: 0.0,
            tremor_per_frame: Vec::new(),
        }
    }
}

// ============================================================================
// Visual stability (sampled frames)
// ============================================================================

/// Frame-to-frame visual stability metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StabilityMetrics {
    /// Sharpness estimation is not implemented; fixed placeholder value
    pub focus_score: f64,
    /// 0-10, 10 = no visible camera shake
    pub visual_stability: f64,
    /// Standard deviation of mean frame-to-frame luminance differences
    pub frame_jitter: f64,
}

// ============================================================================
// Stress proxy
// ============================================================================

/// Heuristic stress indicators.
///
/// These are motion-derived estimates (or explicit simulations when no IMU
/// data exists), not physiological measurements. Any user-facing output
/// must label them as such.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StressMetrics {
    /// Estimated average heart rate (bpm)
    pub avg_heart_rate: u32,
    /// Estimated heart-rate variability (ms)
    pub heart_rate_variability: f64,
    /// 0-10 peak stress proxy
    pub peak_stress_level: f64,
    /// True when the values were simulated rather than motion-derived
    pub simulated: bool,
}

// ============================================================================
// Performance aggregate
// ============================================================================

/// Weighted overall performance breakdown
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceScore {
    /// 0-100 weighted overall score
    pub overall_score: f64,
    /// (head stability + visual stability) / 2, 0-10
    pub technical_skill: f64,
    /// 10 − peak stress, clamped ≥ 0
    pub stress_management: f64,
    /// Penalised by tremor and frame jitter, 0-10
    pub consistency: f64,
}

// ============================================================================
// Hand kinematics (companion data)
// ============================================================================

/// Position-derived hand kinematics.
///
/// Only produced when the track has at least the minimum number of valid
/// wrist positions; omitting the whole block (rather than zero-filling)
/// keeps absent measurements distinguishable from measured zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandKinematics {
    /// Total distance travelled by the wrist (m)
    pub path_length_m: f64,
    /// Mean speed at the assumed tracking rate (m/s)
    pub avg_speed_m_s: f64,
    /// Population variance of per-step speeds
    pub velocity_variance: f64,
    /// 0-10, 10 = perfectly even movement
    pub smoothness_score: f64,
    /// Mean absolute high-frequency velocity component
    pub hand_tremor: f64,
    /// Bounding-box volume of all valid wrist positions (m³)
    pub workspace_volume_m3: f64,
    /// Straight-line distance / path length, 0 for a zero-length path
    pub efficiency: f64,
}

/// Hand-tracking metrics for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandMetrics {
    // A flattened None emits no keys at all, keeping the JSON free of
    // position-derived fields when kinematics were not measured.
    #[serde(flatten)]
    pub kinematics: Option<HandKinematics>,
    /// Wall-clock span of the track (s), when timestamps were present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_duration_s: Option<f64>,
    /// Mean tracking confidence, when the source provided confidences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_confidence: Option<f64>,
}

// ============================================================================
// Eye tracking (companion data)
// ============================================================================

/// Eye-gaze metrics for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GazeMetrics {
    /// 0-10, 10 = very steady gaze direction
    pub gaze_stability: f64,
    /// Mean distance to the gaze point (m)
    pub avg_gaze_depth_m: f64,
    /// 1 / (1 + std of gaze depth), in (0, 1]
    pub gaze_focus_consistency: f64,
    /// Mean absolute frame-to-frame gaze shift (rad)
    pub avg_gaze_shift: f64,
    /// Saccade events per second at the assumed gaze sampling rate
    pub saccades_per_second: f64,
}

// ============================================================================
// Session aggregate
// ============================================================================

/// Complete metrics output for one session.
///
/// Built once by the analysis pipeline and immutable afterwards; the
/// report layer serializes it as-is. Companion-data categories are absent
/// (not zeroed) when the corresponding track was not provided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub motion: MotionMetrics,
    pub stability: StabilityMetrics,
    pub stress: StressMetrics,
    pub performance: PerformanceScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_tracking: Option<HandMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_tracking: Option<GazeMetrics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_metrics_serialization_omits_absent_kinematics() {
        let metrics = HandMetrics {
            kinematics: None,
            task_duration_s: Some(12.5),
            avg_confidence: None,
        };
        let json = serde_json::to_value(&metrics).expect("serialize");
        assert!(json.get("path_length_m").is_none(), "absent kinematics must not appear");
        assert!(json.get("task_duration_s").is_some());
        assert!(json.get("avg_confidence").is_none());
    }

    #[test]
    fn test_hand_metrics_serialization_flattens_kinematics() {
        let metrics = HandMetrics {
            kinematics: Some(HandKinematics {
                path_length_m: 1.0,
                avg_speed_m_s: 0.2,
                velocity_variance: 0.001,
                smoothness_score: 9.0,
                hand_tremor: 0.002,
                workspace_volume_m3: 0.01,
                efficiency: 0.8,
            }),
            task_duration_s: None,
            avg_confidence: Some(0.95),
        };
        let json = serde_json::to_value(&metrics).expect("serialize");
        assert_eq!(json["path_length_m"], 1.0);
        assert_eq!(json["avg_confidence"], 0.95);
    }
}
