//! Forward-only Butterworth low-pass filtering of a whole record

use super::design::ButterworthDesign;
use super::iir::IirFilter;
use crate::error::SignalResult;
use log::debug;

/// Low-pass filter parameters
#[derive(Debug, Clone, PartialEq)]
pub struct LowpassConfig {
    /// Cutoff frequency (Hz)
    pub cutoff: f64,

    /// Sampling frequency (Hz)
    pub sampling_frequency: f64,

    /// Butterworth order
    pub order: usize,
}

impl Default for LowpassConfig {
    fn default() -> Self {
        Self {
            cutoff: 60.0,
            sampling_frequency: 200.0,
            order: 4,
        }
    }
}

impl LowpassConfig {
    /// Filter a record with this configuration
    pub fn apply(&self, data: &[f64]) -> SignalResult<Vec<f64>> {
        butter_lowpass_filter(data, self.cutoff, self.sampling_frequency, self.order)
    }
}

/// Low-pass filter a signal with a digital Butterworth design
///
/// The normalized cutoff is `cutoff / (0.5 * sampling_frequency)` and must
/// lie strictly inside (0, 1). The design runs as a single causal pass from
/// a zero initial state, so the output lags the input; there is no
/// forward-backward (zero-phase) pass.
///
/// # Returns
/// Filtered signal, same length as `data`
pub fn butter_lowpass_filter(
    data: &[f64],
    cutoff: f64,
    sampling_frequency: f64,
    order: usize,
) -> SignalResult<Vec<f64>> {
    let design = ButterworthDesign::from_frequencies(order, cutoff, sampling_frequency)?;
    debug!(
        "low-pass {} samples: cutoff={} fs={} order={}",
        data.len(),
        cutoff,
        sampling_frequency,
        order
    );

    let mut filter = IirFilter::from_design(&design);
    Ok(filter.process_block(data))
}
