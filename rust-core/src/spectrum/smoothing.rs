//! Windowed moving-average smoothing of an amplitude spectrum
//!
//! Each output bin is the window-weighted mean of its neighbourhood. Near
//! the ends the window is cut to the part that overlaps the array and the
//! mean is re-normalized by the weights actually used, so the edges are
//! not pulled towards zero.

use crate::error::{SignalError, SignalResult};
use crate::filters::windows::{WindowType, window_segment};
use log::debug;

/// Smoothing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingConfig {
    /// Bandwidth in frequency units (same units as the frequency axis)
    pub bandwidth: f64,

    /// Window shape
    pub window_type: WindowType,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            bandwidth: 0.5,
            window_type: WindowType::Hann,
        }
    }
}

impl SmoothingConfig {
    pub fn apply(&self, frequency: &[f64], amplitude: &[f64]) -> SignalResult<Vec<f64>> {
        smooth_spectrum(frequency, amplitude, self.bandwidth, self.window_type)
    }
}

/// Odd window length covering `bandwidth` at a spectrum sampling rate `fs`
///
/// `N = 2 * floor(bandwidth * fs / 2) + 1`
///
/// # Errors
/// `InvalidParameter` when the half-width is negative, not finite, or too
/// large to index with.
pub fn smoothing_window_length(bandwidth: f64, fs: f64) -> SignalResult<usize> {
    let half = (bandwidth * fs / 2.0).floor();
    if !(half.is_finite() && half >= 0.0 && half < MAX_HALF_WIDTH as f64) {
        return Err(SignalError::InvalidParameter(format!(
            "smoothing window for bandwidth {} at fs {} is not representable",
            bandwidth, fs
        )));
    }
    Ok(2 * half as usize + 1)
}

/// Largest accepted half-width; keeps `2n + 1` and `i + n + 1` in range
const MAX_HALF_WIDTH: usize = usize::MAX / 4;

/// Smooth an amplitude spectrum with a Hann window of the given bandwidth
///
/// # Arguments
/// * `frequency` - Ascending, uniformly spaced frequency axis
/// * `amplitude` - Amplitude per frequency bin
/// * `bandwidth` - Window span in frequency units
///
/// # Returns
/// Smoothed amplitudes, same length as `amplitude`
pub fn hanning_smooth(
    frequency: &[f64],
    amplitude: &[f64],
    bandwidth: f64,
) -> SignalResult<Vec<f64>> {
    smooth_spectrum(frequency, amplitude, bandwidth, WindowType::Hann)
}

/// Smooth an amplitude spectrum with any window shape
///
/// With `fs = 1 / (f[1] - f[0])`, the window has `N` (odd) taps and
/// half-width `n = (N - 1) / 2`. Output `i` averages `amp[i-n ..= i+n]`
/// weighted by the window, where both ranges are clipped to the array and
/// the weights are normalized by the sum of the clipped window slice:
///
/// - `i < n`: `window[n-i .. N]` against `amp[0 .. i+n+1]`
/// - `i >= len - n`: `window[0 .. n+len-i]` against `amp[i-n .. len]`
/// - otherwise the full window against `amp[i-n .. i+n+1]`
///
/// # Errors
/// * `ShapeMismatch` when the arrays differ in length
/// * `DegenerateInput` for fewer than two bins
/// * `InvalidParameter` for a negative or non-finite bandwidth, or a
///   frequency axis that does not increase
pub fn smooth_spectrum(
    frequency: &[f64],
    amplitude: &[f64],
    bandwidth: f64,
    window_type: WindowType,
) -> SignalResult<Vec<f64>> {
    SignalError::check_aligned("frequency", frequency.len(), "amplitude", amplitude.len())?;
    SignalError::check_min_len("frequency axis", frequency.len())?;

    if !(bandwidth.is_finite() && bandwidth >= 0.0) {
        return Err(SignalError::InvalidParameter(format!(
            "bandwidth must be finite and non-negative, got {}",
            bandwidth
        )));
    }
    let df = frequency[1] - frequency[0];
    if !(df.is_finite() && df > 0.0) {
        return Err(SignalError::InvalidParameter(format!(
            "frequency axis must be ascending, first step is {}",
            df
        )));
    }

    let fs = 1.0 / df;
    let window_len = smoothing_window_length(bandwidth, fs)?;
    let half = (window_len - 1) / 2;
    let len = amplitude.len();

    // Window offsets reachable from the array lie in [half - (len - 1), half + len)
    let start = half.saturating_sub(len - 1);
    let window = window_segment(window_type, window_len, start..half.saturating_add(len));
    debug!(
        "smoothing {} bins: bandwidth={} fs={} window={:?}x{}",
        amplitude.len(),
        bandwidth,
        fs,
        window_type,
        window_len
    );

    let smoothed = (0..len)
        .map(|i| {
            // Array span [lo, hi) and the matching window offset
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(len);
            let offset = lo + half - i - start;

            let weights = &window[offset..offset + (hi - lo)];
            let values = &amplitude[lo..hi];

            let weighted: f64 = weights.iter().zip(values).map(|(w, a)| w * a).sum();
            let total: f64 = weights.iter().sum();
            weighted / total
        })
        .collect();

    Ok(smoothed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::windows::generate_window;

    fn axis(len: usize, df: f64) -> Vec<f64> {
        (0..len).map(|i| i as f64 * df).collect()
    }

    /// Direct transcription of the three-case rule, for cross-checking
    fn three_case(window: &[f64], amp: &[f64]) -> Vec<f64> {
        let big_n = window.len();
        let n = (big_n - 1) / 2;
        let len = amp.len();
        let dot = |w: &[f64], a: &[f64]| -> f64 {
            w.iter().zip(a).map(|(x, y)| x * y).sum::<f64>() / w.iter().sum::<f64>()
        };
        (0..len)
            .map(|i| {
                if i < n {
                    dot(&window[n - i..big_n], &amp[0..i + n + 1])
                } else if i >= len - n {
                    dot(&window[0..n + len - i], &amp[i - n..len])
                } else {
                    dot(window, &amp[i - n..i + n + 1])
                }
            })
            .collect()
    }

    #[test]
    fn test_window_length_is_odd() {
        for bandwidth in [0.0, 0.01, 0.3, 1.0, 2.5, 7.77, 100.0] {
            for fs in [0.5, 1.0, 3.0, 10.24, 1000.0] {
                let n = smoothing_window_length(bandwidth, fs).unwrap();
                assert_eq!(n % 2, 1, "bandwidth={} fs={}", bandwidth, fs);
            }
        }
        assert_eq!(smoothing_window_length(1.0, 10.0).unwrap(), 11);
        assert_eq!(smoothing_window_length(0.95, 10.0).unwrap(), 9);
    }

    #[test]
    fn test_unrepresentable_window_length_is_rejected() {
        for (bandwidth, fs) in [(1.0, 1e20), (1e300, 1.0), (f64::MAX, 4.0), (-1.0, 1.0)] {
            let err = smoothing_window_length(bandwidth, fs).unwrap_err();
            assert!(matches!(err, SignalError::InvalidParameter(_)), "{} {}", bandwidth, fs);
        }

        let err = hanning_smooth(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0], 1e300).unwrap_err();
        assert!(matches!(err, SignalError::InvalidParameter(_)));
    }

    #[test]
    fn test_huge_window_only_touches_its_centre() {
        // N = 1e12 + 1 taps; every bin averages the whole array with weights ~1
        let freq = axis(3, 1.0);
        let amp = vec![1.0, 2.0, 3.0];
        let smoothed = hanning_smooth(&freq, &amp, 1e12).unwrap();

        assert_eq!(smoothed.len(), 3);
        for s in smoothed {
            assert!((s - 2.0).abs() < 1e-6, "{}", s);
        }
    }

    #[test]
    fn test_constant_is_reproduced_everywhere() {
        let freq = axis(60, 0.1);
        let amp = vec![4.2; 60];

        for bandwidth in [0.0, 0.35, 1.0, 2.0] {
            let smoothed = hanning_smooth(&freq, &amp, bandwidth).unwrap();
            assert_eq!(smoothed.len(), amp.len());
            for (i, &s) in smoothed.iter().enumerate() {
                assert!((s - 4.2).abs() < 1e-12, "bandwidth {} index {}: {}", bandwidth, i, s);
            }
        }
    }

    #[test]
    fn test_matches_three_case_rule() {
        let freq = axis(40, 0.25);
        let amp: Vec<f64> = (0..40).map(|i| ((i * 13 % 7) as f64) + 0.1 * i as f64).collect();

        // fs = 4, bandwidth 2.2 -> N = 9, n = 4
        let smoothed = hanning_smooth(&freq, &amp, 2.2).unwrap();
        let window = generate_window(WindowType::Hann, 9);
        let expected = three_case(&window, &amp);

        for (i, (s, e)) in smoothed.iter().zip(expected.iter()).enumerate() {
            assert!((s - e).abs() < 1e-12, "index {}: {} vs {}", i, s, e);
        }
    }

    #[test]
    fn test_edges_use_truncated_window() {
        // N = 5 Hann = [0, .5, 1, .5, 0], n = 2
        let freq = axis(6, 1.0);
        let amp = vec![0.0, 10.0, 0.0, 0.0, 0.0, 6.0];
        let smoothed = hanning_smooth(&freq, &amp, 4.0).unwrap();

        // i = 0: window[2..5] = [1, .5, 0] over amp[0..3]
        assert!((smoothed[0] - (0.5 * 10.0) / 1.5).abs() < 1e-12);
        // i = 2 (interior): full window over amp[0..5]
        assert!((smoothed[2] - (0.5 * 10.0) / 2.0).abs() < 1e-12);
        // i = 5: window[0..3] = [0, .5, 1] over amp[3..6]
        assert!((smoothed[5] - 6.0 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_bandwidth_is_identity() {
        let freq = axis(5, 0.5);
        let amp = vec![1.0, -2.0, 3.5, 0.0, 9.0];
        let smoothed = hanning_smooth(&freq, &amp, 0.0).unwrap();
        assert_eq!(smoothed, amp);
    }

    #[test]
    fn test_window_wider_than_array() {
        let freq = axis(4, 1.0);
        let amp = vec![1.0, 2.0, 3.0, 4.0];
        let smoothed = smooth_spectrum(&freq, &amp, 20.0, WindowType::Rectangular).unwrap();

        // Every position sees the whole array with equal weights
        for s in smoothed {
            assert!((s - 2.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_config_apply() {
        let freq = axis(30, 0.1);
        let amp: Vec<f64> = (0..30).map(|i| (i as f64).sqrt()).collect();
        let config = SmoothingConfig::default();

        let via_config = config.apply(&freq, &amp).unwrap();
        let direct = hanning_smooth(&freq, &amp, 0.5).unwrap();
        assert_eq!(via_config, direct);
    }

    #[test]
    fn test_input_errors() {
        let err = hanning_smooth(&[0.0, 1.0], &[1.0], 1.0).unwrap_err();
        assert!(matches!(err, SignalError::ShapeMismatch { .. }));

        let err = hanning_smooth(&[0.0], &[1.0], 1.0).unwrap_err();
        assert!(matches!(err, SignalError::DegenerateInput(_)));

        let err = hanning_smooth(&[0.0, 1.0], &[1.0, 2.0], -1.0).unwrap_err();
        assert!(matches!(err, SignalError::InvalidParameter(_)));

        let err = hanning_smooth(&[1.0, 1.0], &[1.0, 2.0], 1.0).unwrap_err();
        assert!(matches!(err, SignalError::InvalidParameter(_)));
    }
}
