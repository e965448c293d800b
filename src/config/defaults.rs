//! System-wide default constants.
//!
//! Centralises the magic numbers of the analysis pipeline.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Physical Constants
// ============================================================================

/// Gravity along the device Z axis (m/s²), subtracted before tremor analysis.
pub const GRAVITY_Z_MPS2: f64 = 9.81;

// ============================================================================
// Assumed Sampling Rates
// ============================================================================
//
// Used when true per-sample timestamps are unavailable. The scoring
// constants downstream (speed ×10, smoothness ×1000) are calibrated to
// these rates; change them together.

/// Video frame rate used for the duration fallback (fps).
pub const ASSUMED_VIDEO_FPS: f64 = 30.0;

/// Hand-tracking sample rate (Hz) for converting step distances to speeds.
pub const ASSUMED_HAND_RATE_HZ: f64 = 10.0;

/// Eye-gaze sample rate (Hz) for converting saccade counts to a rate.
pub const ASSUMED_GAZE_RATE_HZ: f64 = 10.0;

// ============================================================================
// Analysis Minimums and Caps
// ============================================================================

/// Minimum series length for a stable high-pass filter response.
///
/// Below this the filter transient dominates and the output is garbage;
/// callers skip the dependent metric (defaulting it to zero) instead.
pub const MIN_FILTER_SAMPLES: usize = 100;

/// Minimum valid wrist positions before kinematics are computed.
pub const MIN_VALID_HAND_SAMPLES: usize = 10;

/// Frames considered by the visual-stability analyzer (≤ 49 frame pairs).
pub const MAX_STABILITY_FRAMES: usize = 50;

/// Angular change between consecutive gaze samples that counts as a
/// saccade event (rad).
pub const SACCADE_THRESHOLD_RAD: f64 = 0.1;

/// Sharpness estimation is not implemented; fixed placeholder score.
pub const FOCUS_SCORE_PLACEHOLDER: f64 = 7.5;

// ============================================================================
// Filter Cutoffs (fraction of Nyquist)
// ============================================================================

/// High-pass cutoff isolating tremor from the IMU acceleration magnitude.
pub const IMU_TREMOR_CUTOFF: f64 = 0.1;

/// High-pass cutoff isolating tremor from the wrist velocity series.
pub const HAND_TREMOR_CUTOFF: f64 = 0.2;

// ============================================================================
// Loader Sub-sampling Targets
// ============================================================================
//
// Fixed-ratio sub-sampling caps per-session work; fidelity is traded for
// bounded cost rather than time-bounding the computation.

/// Approximate number of frames kept per session.
pub const FRAME_SAMPLE_TARGET: usize = 100;

/// Approximate number of IMU samples kept per session.
pub const IMU_SAMPLE_TARGET: usize = 1_000;

// ============================================================================
// Performance Weights
// ============================================================================

/// Technical-skill weight in the overall score.
pub const WEIGHT_TECHNICAL_SKILL: f64 = 0.4;
/// Stress-management weight in the overall score.
pub const WEIGHT_STRESS_MANAGEMENT: f64 = 0.3;
/// Consistency weight in the overall score.
pub const WEIGHT_CONSISTENCY: f64 = 0.3;

// ============================================================================
// Expert Benchmarks
// ============================================================================

/// Expert reference: total wrist path length (m), lower is better.
pub const EXPERT_PATH_LENGTH_M: f64 = 1.5;
/// Expert reference: movement smoothness score (0-10).
pub const EXPERT_SMOOTHNESS_SCORE: f64 = 8.5;
/// Expert reference: movement efficiency (0-1).
pub const EXPERT_EFFICIENCY: f64 = 0.7;
/// Expert reference: hand tremor amplitude, lower is better.
pub const EXPERT_HAND_TREMOR: f64 = 0.005;
/// Expert reference: head stability score (0-10).
pub const EXPERT_HEAD_STABILITY: f64 = 9.0;
/// Expert reference: gaze stability score (0-10).
pub const EXPERT_GAZE_STABILITY: f64 = 8.5;

/// Benchmark gaps below this are not worth a recommendation.
pub const GAP_EPSILON: f64 = 0.1;

// ============================================================================
// Priority Triggers
// ============================================================================
//
// A metric that crosses its trigger is escalated to the tabled priority;
// metrics included by gap alone stay LOW.

/// Path length above this is a HIGH-priority training area (m).
pub const TRIGGER_PATH_LENGTH_M: f64 = 3.0;
/// Smoothness below this is a HIGH-priority training area.
pub const TRIGGER_SMOOTHNESS_SCORE: f64 = 5.0;
/// Efficiency below this is a MEDIUM-priority training area.
pub const TRIGGER_EFFICIENCY: f64 = 0.3;
/// Hand tremor above this is a MEDIUM-priority training area.
pub const TRIGGER_HAND_TREMOR: f64 = 0.01;
/// Head stability below this is a MEDIUM-priority training area.
pub const TRIGGER_HEAD_STABILITY: f64 = 8.0;
/// Gaze stability below this is a LOW-priority training area.
pub const TRIGGER_GAZE_STABILITY: f64 = 8.0;
