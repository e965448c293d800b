//! Analysis Configuration Module
//!
//! Provides analysis tuning loaded from TOML files: assumed sampling rates,
//! filter cutoffs, score weights and the expert benchmark table. Every field
//! defaults to the constants in [`defaults`], ensuring zero-change behavior
//! when no config file is present.
//!
//! The config is an explicit value passed into the analyzers and the
//! aggregator — never a hidden global — so tests can supply alternate
//! benchmark sets.
//!
//! ## Loading Order
//!
//! 1. Explicit path (`--config` flag)
//! 2. `OPSIGHT_CONFIG` environment variable
//! 3. `opsight.toml` in the current working directory
//! 4. Built-in defaults

pub mod defaults;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use defaults::*;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for an analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Assumed sampling rates and loader sub-sampling targets
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// High-pass filter tuning
    #[serde(default)]
    pub filter: FilterConfig,

    /// Overall-score category weights
    #[serde(default)]
    pub weights: ScoreWeights,

    /// Expert benchmark reference values
    #[serde(default)]
    pub benchmarks: ExpertBenchmarks,
}

impl AnalysisConfig {
    /// Load configuration following the documented search order.
    ///
    /// A missing file at a searched location falls through to the next;
    /// a file that exists but fails to parse is a hard error surfaced to
    /// the caller (a half-applied config is worse than none).
    pub fn load(explicit_path: Option<&Path>) -> anyhow::Result<Self> {
        let candidates: Vec<PathBuf> = explicit_path
            .map(|p| vec![p.to_path_buf()])
            .unwrap_or_else(|| {
                let mut paths = Vec::new();
                if let Ok(env_path) = std::env::var("OPSIGHT_CONFIG") {
                    paths.push(PathBuf::from(env_path));
                }
                paths.push(PathBuf::from("opsight.toml"));
                paths
            });

        for path in &candidates {
            if !path.exists() {
                continue;
            }
            let raw = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&raw)?;
            info!(path = %path.display(), "Loaded analysis config");
            return Ok(config);
        }

        if explicit_path.is_some() {
            anyhow::bail!("config file not found: {}", candidates[0].display());
        }

        info!("No config file found, using built-in defaults");
        Ok(Self::default())
    }
}

// ============================================================================
// Sampling
// ============================================================================

/// Assumed sampling rates and sub-sampling targets.
///
/// The rates are approximations used when true per-sample timestamps are
/// unavailable; the scoring constants downstream are calibrated to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Hand-tracking rate (Hz), converts step distances to speeds
    pub hand_rate_hz: f64,
    /// Eye-gaze rate (Hz), converts saccade counts to a rate
    pub gaze_rate_hz: f64,
    /// Video frame rate (fps) for the duration fallback
    pub video_fps: f64,
    /// Approximate frames kept per session by the loader
    pub frame_sample_target: usize,
    /// Approximate IMU samples kept per session by the loader
    pub imu_sample_target: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            hand_rate_hz: ASSUMED_HAND_RATE_HZ,
            gaze_rate_hz: ASSUMED_GAZE_RATE_HZ,
            video_fps: ASSUMED_VIDEO_FPS,
            frame_sample_target: FRAME_SAMPLE_TARGET,
            imu_sample_target: IMU_SAMPLE_TARGET,
        }
    }
}

// ============================================================================
// Filtering
// ============================================================================

/// High-pass filter tuning for tremor isolation.
///
/// The minimum-series-length floor is not tunable: it is the filter's own
/// stability precondition (see [`defaults::MIN_FILTER_SAMPLES`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Cutoff (fraction of Nyquist) for the IMU acceleration magnitude
    pub imu_tremor_cutoff: f64,
    /// Cutoff (fraction of Nyquist) for the wrist velocity series
    pub hand_tremor_cutoff: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            imu_tremor_cutoff: IMU_TREMOR_CUTOFF,
            hand_tremor_cutoff: HAND_TREMOR_CUTOFF,
        }
    }
}

impl FilterConfig {
    /// Validate cutoffs are inside the open (0, 1) Nyquist interval.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, cutoff) in [
            ("imu_tremor_cutoff", self.imu_tremor_cutoff),
            ("hand_tremor_cutoff", self.hand_tremor_cutoff),
        ] {
            if !(cutoff > 0.0 && cutoff < 1.0) {
                anyhow::bail!("filter.{name} must be in (0, 1), got {cutoff}");
            }
        }
        Ok(())
    }
}

// ============================================================================
// Score Weights
// ============================================================================

/// Category weights for the weighted overall score.
///
/// Should sum to 1.0; a different sum rescales the 0-100 range and is
/// warned about at load time rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub technical_skill: f64,
    pub stress_management: f64,
    pub consistency: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            technical_skill: WEIGHT_TECHNICAL_SKILL,
            stress_management: WEIGHT_STRESS_MANAGEMENT,
            consistency: WEIGHT_CONSISTENCY,
        }
    }
}

impl ScoreWeights {
    pub fn warn_if_unnormalized(&self) {
        let sum = self.technical_skill + self.stress_management + self.consistency;
        if (sum - 1.0).abs() > 1e-6 {
            warn!(sum, "Score weights do not sum to 1.0 — overall score range is rescaled");
        }
    }
}

// ============================================================================
// Expert Benchmarks
// ============================================================================

/// Expert reference values for the benchmark-gap computation.
///
/// Fixed values drawn from expert demonstration sessions; read-only at
/// runtime, injectable in tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpertBenchmarks {
    /// Total wrist path length (m), lower is better
    pub path_length_m: f64,
    /// Movement smoothness score (0-10)
    pub smoothness_score: f64,
    /// Movement efficiency (0-1)
    pub efficiency: f64,
    /// Hand tremor amplitude, lower is better
    pub hand_tremor: f64,
    /// Head stability score (0-10)
    pub head_stability_score: f64,
    /// Gaze stability score (0-10)
    pub gaze_stability: f64,
    /// Gaps below this are excluded from the priority list
    pub gap_epsilon: f64,
}

impl Default for ExpertBenchmarks {
    fn default() -> Self {
        Self {
            path_length_m: EXPERT_PATH_LENGTH_M,
            smoothness_score: EXPERT_SMOOTHNESS_SCORE,
            efficiency: EXPERT_EFFICIENCY,
            hand_tremor: EXPERT_HAND_TREMOR,
            head_stability_score: EXPERT_HEAD_STABILITY,
            gaze_stability: EXPERT_GAZE_STABILITY,
            gap_epsilon: GAP_EPSILON,
        }
    }
}
