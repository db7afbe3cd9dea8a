//! Digital Butterworth low-pass design
//!
//! Analog prototype -> frequency pre-warp -> bilinear transform -> transfer
//! function, the same chain `scipy.signal.butter(order, wn, 'low')` follows.

use crate::error::{SignalError, SignalResult};
use log::debug;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Low-pass Butterworth design in transfer-function form
///
/// `b` and `a` hold `order + 1` coefficients each, with `a[0] == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ButterworthDesign {
    /// Filter order
    pub order: usize,

    /// Cutoff as a fraction of Nyquist, in (0, 1)
    pub normalized_cutoff: f64,

    /// Numerator coefficients
    pub b: Vec<f64>,

    /// Denominator coefficients
    pub a: Vec<f64>,
}

impl ButterworthDesign {
    /// Design from a cutoff and sampling frequency in the same units (Hz)
    pub fn from_frequencies(
        order: usize,
        cutoff: f64,
        sampling_frequency: f64,
    ) -> SignalResult<Self> {
        let nyquist = 0.5 * sampling_frequency;
        let normalized_cutoff = cutoff / nyquist;
        design_butter_lowpass(order, normalized_cutoff)
    }

    /// Gain at DC, sum(b) / sum(a)
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }
}

/// Highest accepted filter order
///
/// Transfer-function coefficients lose all precision well before this.
pub const MAX_ORDER: usize = 64;

/// Design a digital low-pass Butterworth filter
///
/// # Arguments
/// * `order` - Filter order, 1 to [`MAX_ORDER`]
/// * `normalized_cutoff` - Cutoff as a fraction of Nyquist, strictly inside (0, 1)
///
/// # Errors
/// `InvalidParameter` for an order outside 1 to [`MAX_ORDER`] or a cutoff
/// outside (0, 1). The cutoff is never clamped.
pub fn design_butter_lowpass(
    order: usize,
    normalized_cutoff: f64,
) -> SignalResult<ButterworthDesign> {
    if order == 0 {
        return Err(SignalError::InvalidParameter(
            "Butterworth order must be at least 1".to_string(),
        ));
    }
    if order > MAX_ORDER {
        return Err(SignalError::InvalidParameter(format!(
            "Butterworth order must be at most {}, got {}",
            MAX_ORDER, order
        )));
    }
    if !(normalized_cutoff > 0.0 && normalized_cutoff < 1.0) {
        return Err(SignalError::InvalidParameter(format!(
            "normalized cutoff must lie in (0, 1), got {}",
            normalized_cutoff
        )));
    }

    // Analog prototype poles on the unit circle, left half plane
    // p_k = -exp(jπ m / 2N), m = -N+1, -N+3, ..., N-1
    let n = order as f64;
    let prototype: Vec<Complex64> = (0..order)
        .map(|k| {
            let m = -(n - 1.0) + 2.0 * k as f64;
            -Complex64::from_polar(1.0, PI * m / (2.0 * n))
        })
        .collect();

    // Pre-warp with fs = 2 so the digital cutoff lands exactly on wn
    let fs = 2.0;
    let warped = 2.0 * fs * (PI * normalized_cutoff / fs).tan();

    // Low-pass to low-pass: scale poles, gain picks up warped^N (no zeros)
    let analog_poles: Vec<Complex64> = prototype.iter().map(|&p| p * warped).collect();
    let analog_gain = warped.powi(order as i32);

    // Bilinear transform: z = (2fs + s) / (2fs - s)
    // Zeros at infinity map to z = -1
    let fs2 = 2.0 * fs;
    let digital_poles: Vec<Complex64> = analog_poles
        .iter()
        .map(|&p| (fs2 + p) / (fs2 - p))
        .collect();
    let digital_zeros = vec![Complex64::new(-1.0, 0.0); order];
    let denominator: Complex64 = analog_poles.iter().map(|&p| fs2 - p).product();
    let digital_gain = analog_gain * (Complex64::new(1.0, 0.0) / denominator).re;

    let b: Vec<f64> = poly(&digital_zeros)
        .iter()
        .map(|c| digital_gain * c.re)
        .collect();
    let a: Vec<f64> = poly(&digital_poles).iter().map(|c| c.re).collect();

    debug!(
        "butterworth order={} wn={:.6}: b={:?} a={:?}",
        order, normalized_cutoff, b, a
    );

    Ok(ButterworthDesign {
        order,
        normalized_cutoff,
        b,
        a,
    })
}

/// Expand monic polynomial coefficients from its roots (highest power first)
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= root * c;
        }
        coeffs = next;
    }
    coeffs
}

/// Calculate frequency response at given frequencies
///
/// # Arguments
/// * `design` - Filter design
/// * `frequencies` - Normalized frequencies (units of π rad/sample, 1 = Nyquist)
///
/// # Returns
/// Complex frequency response H(e^jω) = B(e^jω) / A(e^jω)
pub fn frequency_response(design: &ButterworthDesign, frequencies: &[f64]) -> Vec<Complex64> {
    let evaluate = |coeffs: &[f64], omega_rad: f64| -> Complex64 {
        coeffs
            .iter()
            .enumerate()
            .map(|(k, &c)| c * Complex64::from_polar(1.0, -(omega_rad * k as f64)))
            .sum()
    };

    frequencies
        .iter()
        .map(|&omega| {
            let omega_rad = omega * PI;
            evaluate(&design.b, omega_rad) / evaluate(&design.a, omega_rad)
        })
        .collect()
}

/// Calculate magnitude response in dB (conventional 20*log10)
pub fn magnitude_response_db(design: &ButterworthDesign, frequencies: &[f64]) -> Vec<f64> {
    frequency_response(design, frequencies)
        .iter()
        .map(|c| 20.0 * c.norm().max(1e-300).log10())
        .collect()
}
