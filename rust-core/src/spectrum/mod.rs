//! Spectral analysis with FFT

pub mod fft;
pub mod analysis;
pub mod smoothing;

pub use fft::FftEngine;
pub use analysis::{Spectrum, SpectrumEstimator, estimate_spectrum};
pub use smoothing::{SmoothingConfig, hanning_smooth, smooth_spectrum, smoothing_window_length};
