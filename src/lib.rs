//! OPSIGHT: Surgical Training Performance Intelligence
//!
//! Batch analyzer for wearable sensor recordings of surgical training
//! sessions.
//!
//! ## Architecture
//!
//! - **Acquisition**: session dumps, companion hand/gaze CSVs, simulation
//! - **Signal**: filtering and statistics primitives
//! - **Analysis**: independent per-stream analyzers feeding a weighted
//!   performance aggregator and an expert benchmark-gap computation
//! - **Report**: JSON metrics plus a self-contained HTML dashboard

pub mod acquisition;
pub mod analysis;
pub mod config;
pub mod report;
pub mod signal;
pub mod types;

// Re-export the analysis configuration
pub use config::{AnalysisConfig, ExpertBenchmarks};

// Re-export commonly used types
pub use types::{
    GazeMetrics, GazeSample, GazeTrack, HandKinematics, HandMetrics, HandSample, HandTrack,
    ImuSample, MotionMetrics, PerformanceScore, SensorSession, SessionMetrics, StabilityMetrics,
    StressMetrics, TrainingPriority, TrainingRecommendation, Vec3,
};

// Re-export the core pipeline entry points
pub use analysis::{
    compute_benchmark_gaps, compute_gaze_metrics, compute_hand_metrics, compute_session_metrics,
};

// Re-export report emission
pub use report::{write_report, SessionInfo, SessionReport};
