//! Sampled signal with its time base

use crate::error::{SignalError, SignalResult};
use crate::spectrum::{Spectrum, estimate_spectrum};

/// Real-valued samples paired with equally spaced time stamps
///
/// Only the first interval is used as the time step; spacing further along
/// the record is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    time: Vec<f64>,
    samples: Vec<f64>,
}

impl Signal {
    /// Pair samples with their time base
    ///
    /// # Errors
    /// * `ShapeMismatch` when the lengths differ
    /// * `DegenerateInput` for fewer than two samples
    /// * `InvalidParameter` when the first step is not finite and positive
    pub fn new(time: Vec<f64>, samples: Vec<f64>) -> SignalResult<Self> {
        SignalError::check_aligned("time", time.len(), "signal", samples.len())?;
        SignalError::check_min_len("signal", samples.len())?;
        time_step(&time)?;
        Ok(Self { time, samples })
    }

    /// Build the time base from a sampling frequency, starting at zero
    pub fn from_sampling_frequency(
        samples: Vec<f64>,
        sampling_frequency: f64,
    ) -> SignalResult<Self> {
        if !(sampling_frequency.is_finite() && sampling_frequency > 0.0) {
            return Err(SignalError::InvalidParameter(format!(
                "sampling frequency must be finite and positive, got {}",
                sampling_frequency
            )));
        }
        let dt = 1.0 / sampling_frequency;
        let time = (0..samples.len()).map(|i| i as f64 * dt).collect();
        Self::new(time, samples)
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Spacing between the first two time stamps
    pub fn time_step(&self) -> f64 {
        self.time[1] - self.time[0]
    }

    pub fn sampling_frequency(&self) -> f64 {
        1.0 / self.time_step()
    }

    /// One-sided spectrum of this record
    pub fn spectrum(&self) -> SignalResult<Spectrum> {
        estimate_spectrum(&self.time, &self.samples)
    }

    /// Same time base, new samples (e.g. a filtered copy)
    pub fn with_samples(&self, samples: Vec<f64>) -> SignalResult<Self> {
        Self::new(self.time.clone(), samples)
    }
}

/// First time step of a time base
///
/// # Errors
/// `DegenerateInput` for fewer than two stamps, `InvalidParameter` when the
/// step is not finite and positive.
pub fn time_step(time: &[f64]) -> SignalResult<f64> {
    SignalError::check_min_len("time base", time.len())?;
    let dt = time[1] - time[0];
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SignalError::InvalidParameter(format!(
            "time base must be strictly increasing, first step is {}",
            dt
        )));
    }
    Ok(dt)
}
