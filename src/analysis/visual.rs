//! Frame-to-frame visual stability analysis

use tracing::debug;

use crate::config::defaults::{FOCUS_SCORE_PLACEHOLDER, MAX_STABILITY_FRAMES};
use crate::signal;
use crate::types::{FrameSample, StabilityMetrics};

/// Derive visual jitter/stability from the sampled frames.
///
/// Only the first [`MAX_STABILITY_FRAMES`] frames are compared (≤ 49
/// frame pairs) to bound cost. Fewer than 2 frames degrades to the
/// all-zero result, never an error.
pub fn analyze(frames: &[FrameSample]) -> StabilityMetrics {
    if frames.len() < 2 {
        debug!("Fewer than 2 frames, visual stability not assessable");
        return StabilityMetrics::default();
    }

    let luminances: Vec<Vec<f64>> = frames
        .iter()
        .take(MAX_STABILITY_FRAMES)
        .map(|f| f.buffer.luminance())
        .collect();

    let frame_diffs: Vec<f64> = luminances
        .windows(2)
        .filter_map(|pair| mean_abs_diff(&pair[0], &pair[1]))
        .collect();

    if frame_diffs.is_empty() {
        return StabilityMetrics::default();
    }

    let frame_jitter = signal::std_dev(&frame_diffs);
    let visual_stability = (10.0 - frame_jitter / 10.0).max(0.0);

    StabilityMetrics {
        focus_score: FOCUS_SCORE_PLACEHOLDER,
        visual_stability,
        frame_jitter,
    }
}

/// Mean absolute per-pixel luminance difference between two frames.
///
/// Frames of mismatched dimensions (resolution change mid-recording,
/// inconsistent buffer) are skipped rather than compared.
fn mean_abs_diff(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum();
    Some(sum / a.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FrameBuffer;

    fn gray_frame(ts: u64, value: u8) -> FrameSample {
        FrameSample {
            timestamp_ns: ts,
            buffer: FrameBuffer { width: 4, height: 4, channels: 1, data: vec![value; 16] },
        }
    }

    #[test]
    fn test_fewer_than_two_frames_is_all_zero() {
        let metrics = analyze(&[gray_frame(0, 100)]);
        assert_eq!(metrics.visual_stability, 0.0);
        assert_eq!(metrics.frame_jitter, 0.0);
        assert_eq!(metrics.focus_score, 0.0);
    }

    #[test]
    fn test_identical_frames_are_perfectly_stable() {
        let frames: Vec<FrameSample> = (0..10).map(|i| gray_frame(i, 128)).collect();
        let metrics = analyze(&frames);
        assert_eq!(metrics.frame_jitter, 0.0);
        assert_eq!(metrics.visual_stability, 10.0);
        assert_eq!(metrics.focus_score, FOCUS_SCORE_PLACEHOLDER);
    }

    #[test]
    fn test_constant_change_has_zero_jitter() {
        // Uniform brightness steps: every diff is identical, so the std
        // of the diffs (the jitter) is zero even though frames change.
        let frames: Vec<FrameSample> = (0..10).map(|i| gray_frame(i, (i * 10) as u8)).collect();
        let metrics = analyze(&frames);
        assert!(metrics.frame_jitter.abs() < 1e-12);
        assert_eq!(metrics.visual_stability, 10.0);
    }

    #[test]
    fn test_erratic_frames_lower_stability() {
        let values = [0u8, 200, 10, 180, 0, 255, 30, 220];
        let frames: Vec<FrameSample> =
            values.iter().enumerate().map(|(i, &v)| gray_frame(i as u64, v)).collect();
        let metrics = analyze(&frames);
        assert!(metrics.frame_jitter > 0.0);
        assert!(metrics.visual_stability < 10.0);
        assert!(metrics.visual_stability >= 0.0);
    }

    #[test]
    fn test_frame_cap_bounds_work() {
        // 200 erratic frames: only the first MAX_STABILITY_FRAMES are
        // compared, and the result is identical to passing just those.
        let frames: Vec<FrameSample> = (0..200)
            .map(|i| gray_frame(i, if i % 2 == 0 { 0 } else { ((i * 7) % 256) as u8 }))
            .collect();
        let all = analyze(&frames);
        let capped = analyze(&frames[..MAX_STABILITY_FRAMES]);
        assert_eq!(all.frame_jitter, capped.frame_jitter);
    }

    #[test]
    fn test_multichannel_frames() {
        let rgb = |ts: u64, v: u8| FrameSample {
            timestamp_ns: ts,
            buffer: FrameBuffer { width: 2, height: 2, channels: 3, data: vec![v; 12] },
        };
        let metrics = analyze(&[rgb(0, 10), rgb(1, 10), rgb(2, 10)]);
        assert_eq!(metrics.visual_stability, 10.0);
    }
}
