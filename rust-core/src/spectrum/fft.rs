//! FFT engine using realfft for real-valued signals

use crate::error::{SignalError, SignalResult};
use num_complex::Complex64;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// FFT engine for real-valued signals of one fixed length
///
/// Any length is accepted (even or odd); the forward transform yields the
/// `len/2 + 1` non-negative-frequency coefficients.
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer (realfft scrambles it during processing)
    input_buffer: Vec<f64>,

    /// Reusable output buffer (one-sided complex spectrum)
    output_buffer: Vec<Complex64>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }

    /// Compute the one-sided complex spectrum X[k], k = 0..=fft_size/2
    ///
    /// No window is applied and nothing is scaled.
    pub fn compute_complex(&mut self, signal: &[f64]) -> SignalResult<Vec<Complex64>> {
        SignalError::check_aligned("fft input", self.fft_size, "signal", signal.len())?;

        self.input_buffer.copy_from_slice(signal);
        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| SignalError::InvalidParameter(format!("FFT processing failed: {}", e)))?;

        Ok(self.output_buffer.clone())
    }

    /// Compute the one-sided magnitude spectrum |X[k]|
    pub fn compute_magnitude(&mut self, signal: &[f64]) -> SignalResult<Vec<f64>> {
        Ok(self.compute_complex(signal)?.iter().map(|c| c.norm()).collect())
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get number of frequency bins (fft_size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }
}

impl std::fmt::Debug for FftEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FftEngine")
            .field("fft_size", &self.fft_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new(100);

        let signal = vec![1.0; 100];
        let spectrum = fft.compute_magnitude(&signal).unwrap();

        // DC bin carries the sum, everything else is ~0
        assert!((spectrum[0] - 100.0).abs() < 1e-9);
        assert!(spectrum[1..].iter().all(|&m| m < 1e-9));
    }

    #[test]
    fn test_bin_count_even_and_odd() {
        assert_eq!(FftEngine::new(100).num_bins(), 51);
        assert_eq!(FftEngine::new(101).num_bins(), 51);

        let mut odd = FftEngine::new(101);
        assert_eq!(odd.compute_complex(&vec![0.5; 101]).unwrap().len(), 51);
    }

    #[test]
    fn test_matches_direct_dft() {
        let n = 15;
        let signal: Vec<f64> = (0..n).map(|i| ((i * 7 % 5) as f64) - 1.5).collect();
        let fast = FftEngine::new(n).compute_complex(&signal).unwrap();

        for (k, x) in fast.iter().enumerate() {
            let direct: Complex64 = signal
                .iter()
                .enumerate()
                .map(|(j, &s)| {
                    s * Complex64::from_polar(1.0, -2.0 * PI * (k * j) as f64 / n as f64)
                })
                .sum();
            assert!((*x - direct).norm() < 1e-9, "bin {}", k);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let mut fft = FftEngine::new(64);
        let err = fft.compute_complex(&[0.0; 32]).unwrap_err();
        assert!(matches!(err, SignalError::ShapeMismatch { .. }));
    }
}
