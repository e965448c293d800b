//! Companion perception file loaders
//!
//! The perception pipeline drops its outputs next to the recording as
//! column-keyed CSV files:
//! - `general_eye_gaze.csv`: per-eye yaw, pitch and gaze depth
//! - `hand_tracking_results.csv` (legacy name `hand_tracking.csv`):
//!   per-landmark device-frame positions; the wrist is landmark 0
//!
//! Columns are resolved by header name, with aliases for the legacy
//! pre-landmark export format, so the core never branches on input shape:
//! each row becomes one normalized sample record.

use std::path::{Path, PathBuf};

use tracing::info;

use super::AcquisitionError;
use crate::types::{GazeSample, GazeTrack, HandSample, HandTrack, Vec3};

/// Eye-gaze export file name
pub const EYE_GAZE_FILE: &str = "general_eye_gaze.csv";
/// Hand-tracking export file name
pub const HAND_TRACKING_FILE: &str = "hand_tracking_results.csv";
/// Legacy hand-tracking export file name
pub const HAND_TRACKING_FILE_LEGACY: &str = "hand_tracking.csv";

// Gaze columns
const COL_PITCH: &str = "pitch_rads_cpf";
const COL_LEFT_YAW: &str = "left_yaw_rads_cpf";
const COL_RIGHT_YAW: &str = "right_yaw_rads_cpf";
const COL_DEPTH: &str = "depth_m";

// Wrist columns: landmark format with legacy aliases
const COL_WRIST_X: [&str; 2] = ["tx_right_landmark_0_device", "wrist_position_x"];
const COL_WRIST_Y: [&str; 2] = ["ty_right_landmark_0_device", "wrist_position_y"];
const COL_WRIST_Z: [&str; 2] = ["tz_right_landmark_0_device", "wrist_position_z"];
const COL_CONFIDENCE: [&str; 2] = ["right_tracking_confidence", "confidence"];
const COL_TIMESTAMP: &str = "tracking_timestamp_us";

/// Companion tracks found next to a recording
#[derive(Debug, Default)]
pub struct CompanionData {
    pub hand: Option<HandTrack>,
    pub gaze: Option<GazeTrack>,
}

/// Load whatever companion files exist in a directory.
///
/// Missing files are a normal condition (the perception pipeline may not
/// have been run) and yield `None`; files that exist but are malformed
/// are an error — a clear failure beats analyzing garbage.
pub fn load_companion_dir(dir: &Path) -> Result<CompanionData, AcquisitionError> {
    let mut data = CompanionData::default();

    let gaze_path = dir.join(EYE_GAZE_FILE);
    if gaze_path.exists() {
        let track = load_gaze_track(&gaze_path)?;
        info!(samples = track.samples.len(), "Loaded eye-gaze track");
        data.gaze = Some(track);
    }

    if let Some(hand_path) = find_hand_file(dir) {
        let track = load_hand_track(&hand_path)?;
        info!(samples = track.samples.len(), path = %hand_path.display(), "Loaded hand track");
        data.hand = Some(track);
    }

    Ok(data)
}

/// Hand-tracking file under either the current or the legacy name.
pub fn find_hand_file(dir: &Path) -> Option<PathBuf> {
    [HAND_TRACKING_FILE, HAND_TRACKING_FILE_LEGACY]
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Parse an eye-gaze CSV into an ordered [`GazeTrack`].
pub fn load_gaze_track(path: &Path) -> Result<GazeTrack, AcquisitionError> {
    let table = CsvTable::read(path)?;
    let pitch = table.require_column(COL_PITCH)?;
    let left_yaw = table.require_column(COL_LEFT_YAW)?;
    let right_yaw = table.require_column(COL_RIGHT_YAW)?;
    let depth = table.require_column(COL_DEPTH)?;

    let mut samples = Vec::with_capacity(table.rows.len());
    for (line, row) in table.rows.iter().enumerate() {
        samples.push(GazeSample {
            pitch_rad: table.value(row, pitch, line)?,
            left_yaw_rad: table.value(row, left_yaw, line)?,
            right_yaw_rad: table.value(row, right_yaw, line)?,
            depth_m: table.value(row, depth, line)?,
        });
    }
    Ok(GazeTrack { samples })
}

/// Parse a hand-tracking CSV into an ordered [`HandTrack`].
///
/// Confidence and timestamp columns are optional; dropped frames arrive
/// as zero / −1 / NaN positions and are kept as-is (validity filtering is
/// the analyzer's concern).
pub fn load_hand_track(path: &Path) -> Result<HandTrack, AcquisitionError> {
    let table = CsvTable::read(path)?;
    let x = table.require_aliased_column(&COL_WRIST_X)?;
    let y = table.require_aliased_column(&COL_WRIST_Y)?;
    let z = table.require_aliased_column(&COL_WRIST_Z)?;
    let confidence = COL_CONFIDENCE.iter().find_map(|c| table.column(c));
    let timestamp = table.column(COL_TIMESTAMP);

    let mut samples = Vec::with_capacity(table.rows.len());
    for (line, row) in table.rows.iter().enumerate() {
        samples.push(HandSample {
            position: Vec3::new(
                table.value(row, x, line)?,
                table.value(row, y, line)?,
                table.value(row, z, line)?,
            ),
            confidence: confidence.map(|c| table.value(row, c, line)).transpose()?,
            timestamp_us: timestamp
                .map(|c| table.value(row, c, line).map(|v| v as u64))
                .transpose()?,
        });
    }
    Ok(HandTrack { samples })
}

// ============================================================================
// Minimal header-keyed CSV reader
// ============================================================================

struct CsvTable {
    path: String,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    fn read(path: &Path) -> Result<Self, AcquisitionError> {
        let raw = std::fs::read_to_string(path)?;
        let mut lines = raw.lines().filter(|l| !l.trim().is_empty());

        let header: Vec<String> = lines
            .next()
            .unwrap_or("")
            .split(',')
            .map(|c| c.trim().to_string())
            .collect();

        let rows = lines
            .map(|l| l.split(',').map(|c| c.trim().to_string()).collect())
            .collect();

        Ok(Self { path: path.display().to_string(), header, rows })
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    fn require_column(&self, name: &str) -> Result<usize, AcquisitionError> {
        self.column(name).ok_or_else(|| AcquisitionError::MissingColumn {
            column: name.to_string(),
            path: self.path.clone(),
        })
    }

    fn require_aliased_column(&self, names: &[&str]) -> Result<usize, AcquisitionError> {
        names.iter().find_map(|n| self.column(n)).ok_or_else(|| {
            AcquisitionError::MissingColumn {
                column: names.join(" / "),
                path: self.path.clone(),
            }
        })
    }

    /// Numeric cell value. Empty cells are dropped-frame markers and map
    /// to NaN; anything else must parse.
    fn value(&self, row: &[String], column: usize, line: usize) -> Result<f64, AcquisitionError> {
        let cell = row.get(column).map(String::as_str).unwrap_or("");
        if cell.is_empty() {
            return Ok(f64::NAN);
        }
        cell.parse::<f64>().map_err(|_| AcquisitionError::MalformedCompanion {
            path: self.path.clone(),
            line: line + 2, // 1-based, after the header
            reason: format!("expected a number, got '{cell}'"),
        })
    }
}
