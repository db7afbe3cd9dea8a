//! rpt-spectra - Response Spectra Core
//!
//! One-sided amplitude spectra, Butterworth low-pass filtering and Hanning
//! smoothing for sampled structural response histories, with Abaqus report
//! reading, figures and CSV export around them. Python bindings behind the
//! `python` feature.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod signal;
pub mod filters;
pub mod spectrum;
pub mod table;
pub mod plot;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{SignalError, SignalResult};
pub use signal::Signal;
pub use filters::{LowpassConfig, WindowType, butter_lowpass_filter};
pub use spectrum::{
    SmoothingConfig, Spectrum, SpectrumEstimator, estimate_spectrum, hanning_smooth,
};
pub use table::{Table, TableOptions, read_delimited, read_rpt};
