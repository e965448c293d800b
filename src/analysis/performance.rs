//! Performance aggregation and expert benchmark gaps
//!
//! Combines the per-analyzer scores into the weighted overall score and
//! turns the distance to fixed expert reference values into a prioritized
//! list of training recommendations.

use crate::config::defaults::{
    TRIGGER_EFFICIENCY, TRIGGER_GAZE_STABILITY, TRIGGER_HAND_TREMOR, TRIGGER_HEAD_STABILITY,
    TRIGGER_PATH_LENGTH_M, TRIGGER_SMOOTHNESS_SCORE,
};
use crate::config::{ExpertBenchmarks, ScoreWeights};
use crate::types::{
    MotionMetrics, PerformanceScore, SessionMetrics, StabilityMetrics, StressMetrics,
    TrainingPriority, TrainingRecommendation,
};

// ============================================================================
// Weighted Overall Score
// ============================================================================

/// Combine motion, stability and stress results into the overall score.
///
/// Category scores are 0-10; the overall score is their weighted average
/// scaled to 0-100 and explicitly clamped to that range.
pub fn score(
    motion: &MotionMetrics,
    stability: &StabilityMetrics,
    stress: &StressMetrics,
    weights: &ScoreWeights,
) -> PerformanceScore {
    let technical_skill = (motion.head_stability_score + stability.visual_stability) / 2.0;

    let stress_management = (10.0 - stress.peak_stress_level).max(0.0);

    // Low tremor and low frame jitter both contribute to consistency
    let consistency =
        (10.0 - (motion.avg_tremor * 100.0 + stability.frame_jitter / 10.0)).max(0.0);

    let overall_score = ((technical_skill * weights.technical_skill
        + stress_management * weights.stress_management
        + consistency * weights.consistency)
        * 10.0)
        .clamp(0.0, 100.0);

    PerformanceScore { overall_score, technical_skill, stress_management, consistency }
}

// ============================================================================
// Benchmark Gaps
// ============================================================================

/// Comparison direction for a benchmarked metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// One metric's fixed benchmark classification
struct BenchmarkCheck {
    metric: &'static str,
    area: &'static str,
    unit: &'static str,
    advice: &'static str,
    direction: Direction,
    expert: f64,
    /// Crossing this escalates the recommendation to `trigger_priority`
    trigger: f64,
    trigger_priority: TrainingPriority,
    value: Option<f64>,
}

impl BenchmarkCheck {
    /// Gap oriented so larger = further from expert; positive means the
    /// session fell short.
    fn gap(&self, value: f64) -> f64 {
        match self.direction {
            Direction::HigherIsBetter => self.expert - value,
            Direction::LowerIsBetter => value - self.expert,
        }
    }

    fn trigger_fired(&self, value: f64) -> bool {
        match self.direction {
            Direction::HigherIsBetter => value < self.trigger,
            Direction::LowerIsBetter => value > self.trigger,
        }
    }
}

/// Compare session metrics against the expert benchmark table.
///
/// Metrics whose gap stays below `benchmarks.gap_epsilon` are not worth
/// training focus and are excluded. A metric that crosses its fixed
/// trigger threshold is tagged with the tabled priority; one included by
/// gap alone stays LOW. The result is ordered HIGH → LOW, ties broken by
/// gap size.
///
/// Metrics that were never measured (absent hand/eye tracking) simply do
/// not appear — no recommendation is fabricated from missing data.
pub fn compute_benchmark_gaps(
    metrics: &SessionMetrics,
    benchmarks: &ExpertBenchmarks,
) -> Vec<TrainingRecommendation> {
    let kinematics = metrics.hand_tracking.as_ref().and_then(|h| h.kinematics.as_ref());

    let checks = [
        BenchmarkCheck {
            metric: "path_length_m",
            area: "Hand Movement",
            unit: " m",
            advice: "Excessive hand travel. Practice economy-of-motion drills and plan \
                     instrument paths before moving.",
            direction: Direction::LowerIsBetter,
            expert: benchmarks.path_length_m,
            trigger: TRIGGER_PATH_LENGTH_M,
            trigger_priority: TrainingPriority::High,
            value: kinematics.map(|k| k.path_length_m),
        },
        BenchmarkCheck {
            metric: "smoothness_score",
            area: "Movement Smoothness",
            unit: "/10",
            advice: "Jerky instrument handling. Slow down and rehearse continuous, \
                     even-velocity movements.",
            direction: Direction::HigherIsBetter,
            expert: benchmarks.smoothness_score,
            trigger: TRIGGER_SMOOTHNESS_SCORE,
            trigger_priority: TrainingPriority::High,
            value: kinematics.map(|k| k.smoothness_score),
        },
        BenchmarkCheck {
            metric: "efficiency",
            area: "Movement Efficiency",
            unit: "",
            advice: "Indirect instrument paths. Train deliberate point-to-point movements \
                     with minimal correction.",
            direction: Direction::HigherIsBetter,
            expert: benchmarks.efficiency,
            trigger: TRIGGER_EFFICIENCY,
            trigger_priority: TrainingPriority::Medium,
            value: kinematics.map(|k| k.efficiency),
        },
        BenchmarkCheck {
            metric: "hand_tremor",
            area: "Hand Tremor",
            unit: "",
            advice: "Elevated tremor amplitude. Work on grip relaxation and \
                     supported-wrist techniques.",
            direction: Direction::LowerIsBetter,
            expert: benchmarks.hand_tremor,
            trigger: TRIGGER_HAND_TREMOR,
            trigger_priority: TrainingPriority::Medium,
            value: kinematics.map(|k| k.hand_tremor),
        },
        BenchmarkCheck {
            metric: "head_stability_score",
            area: "Head Stability",
            unit: "/10",
            advice: "Frequent head repositioning. Practice maintaining a stable viewing \
                     posture over the field.",
            direction: Direction::HigherIsBetter,
            expert: benchmarks.head_stability_score,
            trigger: TRIGGER_HEAD_STABILITY,
            trigger_priority: TrainingPriority::Medium,
            value: Some(metrics.motion.head_stability_score),
        },
        BenchmarkCheck {
            metric: "gaze_stability",
            area: "Gaze Control",
            unit: "/10",
            advice: "Wandering visual attention. Rehearse target fixation during \
                     instrument exchanges.",
            direction: Direction::HigherIsBetter,
            expert: benchmarks.gaze_stability,
            trigger: TRIGGER_GAZE_STABILITY,
            trigger_priority: TrainingPriority::Low,
            value: metrics.eye_tracking.as_ref().map(|g| g.gaze_stability),
        },
    ];

    let mut recommendations: Vec<TrainingRecommendation> = checks
        .iter()
        .filter_map(|check| {
            let value = check.value?;
            let gap = check.gap(value);
            if gap <= benchmarks.gap_epsilon {
                return None;
            }
            let priority = if check.trigger_fired(value) {
                check.trigger_priority
            } else {
                TrainingPriority::Low
            };
            Some(TrainingRecommendation {
                area: check.area.to_string(),
                issue: format!(
                    "{} is {:.3}{} against an expert reference of {:.3}{}",
                    check.area, value, check.unit, check.expert, check.unit
                ),
                priority,
                advice: check.advice.to_string(),
                metric: check.metric.to_string(),
                current_value: value,
                expert_value: check.expert,
                gap,
            })
        })
        .collect();

    recommendations.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.gap.partial_cmp(&a.gap).unwrap_or(std::cmp::Ordering::Equal))
    });
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HandKinematics, HandMetrics, GazeMetrics};

    fn base_metrics() -> SessionMetrics {
        SessionMetrics {
            motion: MotionMetrics {
                head_movement_total: 5.0,
                head_stability_score: 9.5,
                avg_tremor: 0.0,
                tremor_per_frame: Vec::new(),
            },
            stability: StabilityMetrics {
                focus_score: 7.5,
                visual_stability: 9.5,
                frame_jitter: 0.0,
            },
            stress: StressMetrics {
                avg_heart_rate: 72,
                heart_rate_variability: 40.0,
                peak_stress_level: 2.0,
                simulated: false,
            },
            performance: PerformanceScore::default(),
            hand_tracking: None,
            eye_tracking: None,
        }
    }

    fn expert_kinematics() -> HandKinematics {
        HandKinematics {
            path_length_m: 1.4,
            avg_speed_m_s: 0.2,
            velocity_variance: 0.0005,
            smoothness_score: 9.5,
            hand_tremor: 0.004,
            workspace_volume_m3: 0.005,
            efficiency: 0.8,
        }
    }

    #[test]
    fn test_score_formulas() {
        let metrics = base_metrics();
        let perf = score(
            &metrics.motion,
            &metrics.stability,
            &metrics.stress,
            &ScoreWeights::default(),
        );
        assert!((perf.technical_skill - 9.5).abs() < 1e-9);
        assert!((perf.stress_management - 8.0).abs() < 1e-9);
        assert!((perf.consistency - 10.0).abs() < 1e-9);
        // 0.4*9.5 + 0.3*8.0 + 0.3*10.0 = 9.2 → 92
        assert!((perf.overall_score - 92.0).abs() < 1e-9);
    }

    #[test]
    fn test_stress_management_clamps_at_zero() {
        let mut metrics = base_metrics();
        metrics.stress.peak_stress_level = 14.0;
        let perf = score(
            &metrics.motion,
            &metrics.stability,
            &metrics.stress,
            &ScoreWeights::default(),
        );
        assert_eq!(perf.stress_management, 0.0);
    }

    #[test]
    fn test_consistency_penalised_by_tremor_and_jitter() {
        let mut metrics = base_metrics();
        metrics.motion.avg_tremor = 0.03;
        metrics.stability.frame_jitter = 20.0;
        let perf = score(
            &metrics.motion,
            &metrics.stability,
            &metrics.stress,
            &ScoreWeights::default(),
        );
        // 10 − (0.03·100 + 20/10) = 5.0
        assert!((perf.consistency - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_expert_session_has_no_recommendations() {
        let mut metrics = base_metrics();
        metrics.hand_tracking = Some(HandMetrics {
            kinematics: Some(expert_kinematics()),
            task_duration_s: Some(60.0),
            avg_confidence: Some(0.95),
        });
        metrics.eye_tracking = Some(GazeMetrics {
            gaze_stability: 9.0,
            avg_gaze_depth_m: 0.4,
            gaze_focus_consistency: 0.9,
            avg_gaze_shift: 0.01,
            saccades_per_second: 0.5,
        });
        let gaps = compute_benchmark_gaps(&metrics, &ExpertBenchmarks::default());
        assert!(gaps.is_empty(), "expert-level session should not get training areas: {:?}", gaps);
    }

    #[test]
    fn test_excessive_path_length_is_high_priority() {
        let mut metrics = base_metrics();
        let mut kin = expert_kinematics();
        kin.path_length_m = 4.0; // benchmark 1.5, trigger 3.0
        metrics.hand_tracking = Some(HandMetrics {
            kinematics: Some(kin),
            task_duration_s: None,
            avg_confidence: None,
        });

        let gaps = compute_benchmark_gaps(&metrics, &ExpertBenchmarks::default());
        let path = gaps
            .iter()
            .find(|r| r.metric == "path_length_m")
            .expect("path length must be flagged");
        assert_eq!(path.priority, TrainingPriority::High);
        assert!((path.gap - 2.5).abs() < 1e-9);
        assert!((path.current_value - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_moderate_gap_without_trigger_stays_low() {
        let mut metrics = base_metrics();
        let mut kin = expert_kinematics();
        kin.path_length_m = 2.0; // above benchmark 1.5 but below trigger 3.0
        metrics.hand_tracking = Some(HandMetrics {
            kinematics: Some(kin),
            task_duration_s: None,
            avg_confidence: None,
        });

        let gaps = compute_benchmark_gaps(&metrics, &ExpertBenchmarks::default());
        let path = gaps
            .iter()
            .find(|r| r.metric == "path_length_m")
            .expect("gap 0.5 exceeds epsilon");
        assert_eq!(path.priority, TrainingPriority::Low);
    }

    #[test]
    fn test_small_gaps_are_excluded() {
        let mut metrics = base_metrics();
        metrics.motion.head_stability_score = 8.95; // gap 0.05 < epsilon
        let gaps = compute_benchmark_gaps(&metrics, &ExpertBenchmarks::default());
        assert!(gaps.iter().all(|r| r.metric != "head_stability_score"));
    }

    #[test]
    fn test_unmeasured_metrics_do_not_appear() {
        // No hand or eye tracking: only motion-derived checks possible
        let metrics = base_metrics();
        let gaps = compute_benchmark_gaps(&metrics, &ExpertBenchmarks::default());
        assert!(gaps.iter().all(|r| r.metric == "head_stability_score"));
    }

    #[test]
    fn test_recommendations_ordered_by_priority_then_gap() {
        let mut metrics = base_metrics();
        metrics.motion.head_stability_score = 6.0; // MEDIUM (below trigger 8.0)
        let mut kin = expert_kinematics();
        kin.path_length_m = 5.0; // HIGH
        kin.smoothness_score = 3.0; // HIGH, gap 5.5 > path gap 3.5
        kin.efficiency = 0.2; // MEDIUM
        metrics.hand_tracking = Some(HandMetrics {
            kinematics: Some(kin),
            task_duration_s: None,
            avg_confidence: None,
        });
        metrics.eye_tracking = Some(GazeMetrics {
            gaze_stability: 5.0, // LOW trigger
            avg_gaze_depth_m: 0.4,
            gaze_focus_consistency: 0.5,
            avg_gaze_shift: 0.05,
            saccades_per_second: 2.0,
        });

        let gaps = compute_benchmark_gaps(&metrics, &ExpertBenchmarks::default());
        let priorities: Vec<TrainingPriority> = gaps.iter().map(|r| r.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(priorities, sorted, "must be ordered HIGH → LOW");
        assert_eq!(gaps[0].metric, "smoothness_score", "largest HIGH gap first");
        assert_eq!(gaps[1].metric, "path_length_m");
    }
}
