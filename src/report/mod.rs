//! Session report emission
//!
//! Writes the per-session output directory:
//! - `metrics.json`: the full metrics result plus session info and the
//!   prioritized training recommendations
//! - `report.html`: self-contained dashboard (metric cards, tremor chart,
//!   recommendations), no external assets

mod html;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::types::{SessionMetrics, TrainingRecommendation};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Basic facts about the analyzed recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_name: String,
    pub duration_s: f64,
    pub num_frames: usize,
    pub recording_path: String,
}

/// Everything the report layer persists for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub generated_at: DateTime<Utc>,
    pub session_info: SessionInfo,
    pub metrics: SessionMetrics,
    pub recommendations: Vec<TrainingRecommendation>,
}

impl SessionReport {
    pub fn new(
        session_info: SessionInfo,
        metrics: SessionMetrics,
        recommendations: Vec<TrainingRecommendation>,
    ) -> Self {
        Self { generated_at: Utc::now(), session_info, metrics, recommendations }
    }
}

/// Write `metrics.json` and `report.html` into `output_dir`.
///
/// Creates the directory if needed. Returns the path of the HTML report.
pub fn write_report(report: &SessionReport, output_dir: &Path) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(output_dir)?;

    let json_path = output_dir.join("metrics.json");
    std::fs::write(&json_path, serde_json::to_string_pretty(report)?)?;

    let html_path = output_dir.join("report.html");
    std::fs::write(&html_path, html::render(report))?;

    info!(
        json = %json_path.display(),
        html = %html_path.display(),
        "Report written"
    );
    Ok(html_path)
}
