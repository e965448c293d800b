//! Signal-processing primitives shared by the analyzers
//!
//! Small, allocation-light building blocks:
//! - Population statistics (mean, variance, std)
//! - 4th-order Butterworth high-pass for tremor isolation
//! - Windowed mean-absolute downsampling for frame alignment
//!
//! Everything here degrades to a defined value (0.0 / empty) on short or
//! empty input rather than returning errors; the analyzers rely on that.

use crate::config::defaults::MIN_FILTER_SAMPLES;

// ============================================================================
// Population Statistics
// ============================================================================

/// Arithmetic mean. Returns 0.0 for an empty series.
pub fn mean(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    series.iter().sum::<f64>() / series.len() as f64
}

/// Population variance (÷ n, not n−1). Returns 0.0 for an empty series.
pub fn variance(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let m = mean(series);
    series.iter().map(|x| (x - m).powi(2)).sum::<f64>() / series.len() as f64
}

/// Population standard deviation. Returns 0.0 for an empty series.
pub fn std_dev(series: &[f64]) -> f64 {
    variance(series).sqrt()
}

/// Mean absolute value. Returns 0.0 for an empty series.
pub fn mean_abs(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    series.iter().map(|x| x.abs()).sum::<f64>() / series.len() as f64
}

// ============================================================================
// High-Pass Filter
// ============================================================================

/// One direct-form-II-transposed biquad section.
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    s1: f64,
    s2: f64,
}

impl Biquad {
    /// High-pass section from the bilinear transform.
    ///
    /// `k` = tan(π · cutoff_fraction / 2), `q` = section quality factor.
    fn highpass(k: f64, q: f64) -> Self {
        let norm = 1.0 / (1.0 + k / q + k * k);
        Self {
            b0: norm,
            b1: -2.0 * norm,
            b2: norm,
            a1: 2.0 * (k * k - 1.0) * norm,
            a2: (1.0 - k / q + k * k) * norm,
            s1: 0.0,
            s2: 0.0,
        }
    }

    fn process(&mut self, x: f64) -> f64 {
        let y = self.b0 * x + self.s1;
        self.s1 = self.b1 * x - self.a1 * y + self.s2;
        self.s2 = self.b2 * x - self.a2 * y;
        y
    }
}

/// Butterworth section quality factors for order 4: 1 / (2·cos θ) at the
/// pole angles 22.5° and 67.5°.
const BUTTERWORTH_4_Q: [f64; 2] = [0.5411961001461971, 1.3065629648763766];

/// 4th-order Butterworth high-pass over a real series.
///
/// `cutoff_fraction` is the normalized cutoff as a fraction of Nyquist
/// (e.g. 0.1 at a 1 kHz sample rate = 50 Hz). Implemented as a cascade of
/// two biquad sections with zero initial state, matching the causal SOS
/// filtering the tremor formulas were calibrated against.
///
/// Returns an empty vec when the series is shorter than
/// [`MIN_FILTER_SAMPLES`] (the filter transient dominates and the output
/// is meaningless) or when the cutoff is outside (0, 1). Callers treat an
/// empty result as "tremor not assessable" and default the metric to zero.
pub fn highpass(series: &[f64], cutoff_fraction: f64) -> Vec<f64> {
    if series.len() < MIN_FILTER_SAMPLES || !(cutoff_fraction > 0.0 && cutoff_fraction < 1.0) {
        return Vec::new();
    }

    let k = (std::f64::consts::PI * cutoff_fraction / 2.0).tan();
    let mut sections: Vec<Biquad> =
        BUTTERWORTH_4_Q.iter().map(|&q| Biquad::highpass(k, q)).collect();

    series
        .iter()
        .map(|&x| sections.iter_mut().fold(x, |acc, s| s.process(acc)))
        .collect()
}

// ============================================================================
// Windowed Downsampling
// ============================================================================

/// Mean absolute value over contiguous windows of `window` samples.
///
/// The trailing partial window is dropped. Used to align a high-rate
/// tremor signal to the much lower video frame rate.
pub fn windowed_mean_abs(series: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    series.chunks_exact(window).map(mean_abs).collect()
}

/// Truncate or zero-pad a series to exactly `target` samples.
pub fn fit_to_length(mut series: Vec<f64>, target: usize) -> Vec<f64> {
    series.truncate(target);
    series.resize(target, 0.0);
    series
}
