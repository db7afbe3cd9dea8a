//! One-sided spectrum estimation of a sampled record
//!
//! Scaling conventions follow the post-processing scripts this crate
//! replaces, including three quirks that are kept on purpose and covered
//! by tests:
//! - amplitude is `2|X|/n` on every bin, DC and Nyquist included
//! - phase is the single-argument `atan(Im/Re)`, folded into (-π/2, π/2)
//! - the "dB" level is `20 ln(amplitude)`, natural log rather than log10

use super::fft::FftEngine;
use crate::error::{SignalError, SignalResult};
use crate::signal::time_step;
use log::debug;
use ndarray::Array1;
use num_complex::Complex64;

/// One-sided spectral descriptors, all aligned by bin index
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Bin frequencies, 0 to floor(n/2)/(dt*n) inclusive
    pub frequency: Vec<f64>,

    /// 2|X[k]|/n
    pub amplitude: Vec<f64>,

    /// |X[k]|, unscaled
    pub magnitude: Vec<f64>,

    /// X[k], unscaled
    pub complex: Vec<Complex64>,

    /// atan(Im/Re); NaN where X[k] == 0
    pub phase: Vec<f64>,

    /// Mean-square amplitude, sqrt(1/2) * amplitude
    pub power: Vec<f64>,

    /// 20 ln(amplitude); -inf where the amplitude is zero
    pub db: Vec<f64>,
}

impl Spectrum {
    /// Number of one-sided bins
    pub fn len(&self) -> usize {
        self.frequency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequency.is_empty()
    }

    /// Spacing between neighbouring bins
    pub fn resolution(&self) -> f64 {
        match self.frequency.len() {
            0 | 1 => 0.0,
            _ => self.frequency[1] - self.frequency[0],
        }
    }

    /// Frequency and amplitude of the largest amplitude bin
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.amplitude
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.is_nan())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, &a)| (self.frequency[i], a))
    }

    /// Named columns in the order they are exported
    pub fn columns(&self) -> Vec<(&'static str, Vec<f64>)> {
        vec![
            ("frequency", self.frequency.clone()),
            ("amplitude", self.amplitude.clone()),
            ("magnitude", self.magnitude.clone()),
            ("real", self.complex.iter().map(|c| c.re).collect()),
            ("imag", self.complex.iter().map(|c| c.im).collect()),
            ("phase", self.phase.clone()),
            ("power", self.power.clone()),
            ("db", self.db.clone()),
        ]
    }

    /// Alternative keys for existing columns: `powers` for `power`, `dB` for `db`
    pub fn alias_columns(&self) -> Vec<(&'static str, Vec<f64>)> {
        vec![("powers", self.power.clone()), ("dB", self.db.clone())]
    }
}

/// Spectrum estimator that keeps its FFT plan between calls
///
/// Records of the same length (e.g. several sensor columns of one report)
/// reuse the plan; a different length re-plans.
#[derive(Debug, Default)]
pub struct SpectrumEstimator {
    fft_engine: Option<FftEngine>,
}

impl SpectrumEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate the one-sided spectrum of `motion` sampled at `time`
    ///
    /// # Errors
    /// * `ShapeMismatch` when `time` and `motion` differ in length
    /// * `DegenerateInput` for fewer than two samples
    /// * `InvalidParameter` when the first time step is not finite and positive
    pub fn estimate(&mut self, time: &[f64], motion: &[f64]) -> SignalResult<Spectrum> {
        SignalError::check_aligned("time", time.len(), "signal", motion.len())?;
        SignalError::check_min_len("signal", motion.len())?;
        let dt = time_step(time)?;

        let n = motion.len();
        if self.fft_engine.as_ref().map(FftEngine::fft_size) != Some(n) {
            self.fft_engine = Some(FftEngine::new(n));
        }
        let engine = self.fft_engine.get_or_insert_with(|| FftEngine::new(n));
        let complex = engine.compute_complex(motion)?;

        let t_n = n / 2 + 1;
        let nf = n as f64;
        let stop = (n / 2) as f64 / (dt * nf);
        let frequency = Array1::linspace(0.0, stop, t_n).to_vec();

        let magnitude: Vec<f64> = complex.iter().map(|c| c.norm()).collect();
        let amplitude: Vec<f64> = magnitude.iter().map(|&m| 2.0 * m / nf).collect();
        let phase: Vec<f64> = complex.iter().map(|c| (c.im / c.re).atan()).collect();
        let power: Vec<f64> = amplitude.iter().map(|&a| 0.5_f64.sqrt() * a).collect();
        let db: Vec<f64> = amplitude.iter().map(|&a| 20.0 * a.ln()).collect();

        debug!(
            "spectrum: n={} dt={} bins={} df={}",
            n,
            dt,
            t_n,
            stop / (t_n - 1) as f64
        );

        Ok(Spectrum {
            frequency,
            amplitude,
            magnitude,
            complex,
            phase,
            power,
            db,
        })
    }
}

/// Estimate the one-sided spectrum of a record
///
/// See [`SpectrumEstimator::estimate`].
pub fn estimate_spectrum(time: &[f64], motion: &[f64]) -> SignalResult<Spectrum> {
    SpectrumEstimator::new().estimate(time, motion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn time_base(n: usize, dt: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * dt).collect()
    }

    #[test]
    fn test_sine_peak_and_amplitude() {
        // 12.5 Hz, amplitude 3, fs = 200 Hz, 400 samples -> exact bin 25
        let dt = 0.005;
        let time = time_base(400, dt);
        let motion: Vec<f64> = time.iter().map(|&t| 3.0 * (2.0 * PI * 12.5 * t).sin()).collect();

        let spectrum = estimate_spectrum(&time, &motion).unwrap();
        let (peak_freq, peak_amp) = spectrum.peak().unwrap();

        assert!((peak_freq - 12.5).abs() < spectrum.resolution() / 2.0);
        assert!((peak_amp - 3.0).abs() < 1e-9, "peak amplitude {}", peak_amp);
    }

    #[test]
    fn test_sine_off_bin_lands_on_nearest_bin() {
        let dt = 0.01;
        let time = time_base(101, dt);
        let f0 = 7.3;
        let motion: Vec<f64> = time.iter().map(|&t| (2.0 * PI * f0 * t).sin()).collect();

        let spectrum = estimate_spectrum(&time, &motion).unwrap();
        let (peak_freq, peak_amp) = spectrum.peak().unwrap();

        let df = spectrum.resolution();
        assert!((peak_freq - f0).abs() <= df / 2.0 + 1e-12);
        // Leakage loses some height off-bin
        assert!(peak_amp > 0.6 && peak_amp <= 1.05, "peak amplitude {}", peak_amp);
    }

    #[test]
    fn test_bin_count_and_ordering() {
        for n in [100usize, 101] {
            let dt = 0.02;
            let time = time_base(n, dt);
            let motion: Vec<f64> = (0..n).map(|i| (i as f64 * 0.3).cos()).collect();

            let spectrum = estimate_spectrum(&time, &motion).unwrap();
            assert_eq!(spectrum.len(), n / 2 + 1, "n = {}", n);
            assert_eq!(spectrum.amplitude.len(), spectrum.len());
            assert_eq!(spectrum.complex.len(), spectrum.len());
            assert_eq!(spectrum.db.len(), spectrum.len());

            assert_eq!(spectrum.frequency[0], 0.0);
            assert!(spectrum.frequency.windows(2).all(|w| w[1] > w[0]));

            let last = *spectrum.frequency.last().unwrap();
            let expected = (n / 2) as f64 / (dt * n as f64);
            assert!((last - expected).abs() < 1e-9, "n = {}: {} vs {}", n, last, expected);
        }
    }

    #[test]
    fn test_db_is_natural_log() {
        let time = time_base(64, 0.1);
        let motion: Vec<f64> = (0..64).map(|i| 1.0 + (i as f64 * 0.7).sin()).collect();
        let spectrum = estimate_spectrum(&time, &motion).unwrap();

        for (&db, &amp) in spectrum.db.iter().zip(spectrum.amplitude.iter()) {
            if amp == 0.0 {
                assert_eq!(db, f64::NEG_INFINITY);
                continue;
            }
            assert!((db - 20.0 * amp.ln()).abs() < 1e-9);
            if amp > 1e-6 && (amp - 1.0).abs() > 1e-3 {
                assert!((db - 20.0 * amp.log10()).abs() > 1e-6);
            }
        }
    }

    #[test]
    fn test_dc_bin_is_doubled() {
        // Constant 1.0: amplitude at DC reads 2.0 with the uniform 2/n scaling
        let time = time_base(50, 0.1);
        let spectrum = estimate_spectrum(&time, &vec![1.0; 50]).unwrap();

        assert!((spectrum.amplitude[0] - 2.0).abs() < 1e-12);
        assert!((spectrum.magnitude[0] - 50.0).abs() < 1e-9);
        assert!((spectrum.power[0] - 2.0 * 0.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_phase_uses_single_argument_arctangent() {
        // Cosine at bin 4 of 32: X[4] = 16 + 0j -> phase 0
        // Negated cosine: X[4] = -16 -> atan(-0/-16) = 0, not π
        let time = time_base(32, 1.0 / 32.0);
        let cosine: Vec<f64> = time.iter().map(|&t| -(2.0 * PI * 4.0 * t).cos()).collect();
        let spectrum = estimate_spectrum(&time, &cosine).unwrap();

        assert!(spectrum.complex[4].re < -15.0);
        assert!(spectrum.phase[4].abs() < 1e-9);
        assert!(spectrum
            .phase
            .iter()
            .filter(|p| !p.is_nan())
            .all(|p| p.abs() <= PI / 2.0));
    }

    #[test]
    fn test_uses_first_time_step_only() {
        let motion = vec![0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0];
        let uniform = time_base(8, 0.25);
        let mut irregular = uniform.clone();
        irregular[5] = 9.0;

        let a = estimate_spectrum(&uniform, &motion).unwrap();
        let b = estimate_spectrum(&irregular, &motion).unwrap();
        assert_eq!(a.frequency, b.frequency);
        assert_eq!(a.amplitude, b.amplitude);
    }

    #[test]
    fn test_estimator_reuses_and_replans() {
        let mut estimator = SpectrumEstimator::new();
        let a = estimator.estimate(&time_base(16, 0.1), &vec![1.0; 16]).unwrap();
        let b = estimator.estimate(&time_base(16, 0.1), &vec![1.0; 16]).unwrap();
        let c = estimator.estimate(&time_base(9, 0.1), &vec![1.0; 9]).unwrap();

        assert_eq!(a.amplitude, b.amplitude);
        assert_eq!(c.len(), 5);
    }

    #[test]
    fn test_input_errors() {
        let err = estimate_spectrum(&[0.0, 1.0, 2.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, SignalError::ShapeMismatch { .. }));

        let err = estimate_spectrum(&[0.0], &[1.0]).unwrap_err();
        assert!(matches!(err, SignalError::DegenerateInput(_)));

        let err = estimate_spectrum(&[1.0, 0.5], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, SignalError::InvalidParameter(_)));
    }

    #[test]
    fn test_alias_columns_mirror_power_and_db() {
        let time: Vec<f64> = (0..8).map(|i| i as f64 * 0.1).collect();
        let motion = vec![1.0, 3.0, -2.0, 0.5, 0.0, 1.5, -1.0, 2.0];
        let spectrum = estimate_spectrum(&time, &motion).unwrap();

        let aliases = spectrum.alias_columns();
        let names: Vec<&str> = aliases.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["powers", "dB"]);
        assert_eq!(aliases[0].1, spectrum.power);
        assert_eq!(aliases[1].1.len(), spectrum.db.len());
        for (a, d) in aliases[1].1.iter().zip(spectrum.db.iter()) {
            assert!(a == d || (a.is_nan() && d.is_nan()));
        }
    }
}
