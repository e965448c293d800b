//! Training recommendations derived from expert benchmark gaps

use serde::{Deserialize, Serialize};

/// Priority classification for a training recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum TrainingPriority {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl std::fmt::Display for TrainingPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrainingPriority::Low => write!(f, "LOW"),
            TrainingPriority::Medium => write!(f, "MEDIUM"),
            TrainingPriority::High => write!(f, "HIGH"),
        }
    }
}

/// One prioritized training focus area.
///
/// Produced by the benchmark-gap computation for each metric that falls
/// meaningfully short of its expert reference value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRecommendation {
    /// Skill area (e.g. "Hand Movement", "Gaze Control")
    pub area: String,
    /// What the gap is, with measured and expert values
    pub issue: String,
    pub priority: TrainingPriority,
    /// Fixed coaching advice for this metric
    pub advice: String,
    /// Metric key the recommendation was derived from
    pub metric: String,
    /// Session value of the metric
    pub current_value: f64,
    /// Expert reference value
    pub expert_value: f64,
    /// Benchmark gap, oriented so larger = further from expert
    pub gap: f64,
}
