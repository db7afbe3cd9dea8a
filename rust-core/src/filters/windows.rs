//! Window functions used by the spectral smoother

use std::f64::consts::PI;
use std::ops::Range;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Hann window: w[k] = 0.5 - 0.5*cos(2πk/(N-1))
    /// Endpoints are exactly zero (same as `numpy.hanning`)
    #[default]
    Hann,

    /// Hamming window: w[k] = 0.54 - 0.46*cos(2πk/(N-1))
    Hamming,

    /// Blackman window: w[k] = 0.42 - 0.5*cos(2πk/(N-1)) + 0.08*cos(4πk/(N-1))
    Blackman,

    /// Rectangular window (plain moving average)
    Rectangular,
}

impl WindowType {
    /// Parse a window name as accepted on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hann" | "hanning" => Some(WindowType::Hann),
            "hamming" => Some(WindowType::Hamming),
            "blackman" => Some(WindowType::Blackman),
            "rect" | "rectangular" | "boxcar" => Some(WindowType::Rectangular),
            _ => None,
        }
    }
}

/// Generate symmetric window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (N)
///
/// # Returns
/// Vector of window coefficients w[k] for k = 0..N-1. A single-sample
/// window is `[1.0]` and an empty length yields an empty vector.
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    window_segment(window_type, length, 0..length)
}

/// Coefficients `w[k]` for `k` in `range` of a window of `length` samples
///
/// Indices past the end of the window are dropped. Only the requested
/// samples are computed, so a very long window costs nothing beyond the
/// segment.
pub fn window_segment(window_type: WindowType, length: usize, range: Range<usize>) -> Vec<f64> {
    let range = range.start.min(length)..range.end.min(length);
    if length == 1 {
        return vec![1.0; range.len()];
    }

    let span = length.saturating_sub(1) as f64;
    range.map(|k| coefficient(window_type, k as f64 / span)).collect()
}

/// Window value at normalized position `x = k / (N - 1)`
fn coefficient(window_type: WindowType, x: f64) -> f64 {
    let angle = 2.0 * PI * x;
    match window_type {
        WindowType::Hann => 0.5 - 0.5 * angle.cos(),
        WindowType::Hamming => 0.54 - 0.46 * angle.cos(),
        // Clamp the -1e-17 rounding at the endpoints to keep weights non-negative
        WindowType::Blackman => (0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos()).max(0.0),
        WindowType::Rectangular => 1.0,
    }
}
