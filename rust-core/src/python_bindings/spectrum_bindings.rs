//! Python bindings for spectrum estimation and smoothing

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::filters::WindowType;
use crate::spectrum::{estimate_spectrum, smooth_spectrum};

/// One-sided spectrum of a uniformly sampled record
///
/// Args:
///     time: Sample times (only the first step is used)
///     motion: Sample values, same length as `time`
///
/// Returns:
///     dict of numpy arrays: frequency, amplitude, magnitude, complex
///     (complex128), real, imag, phase, power, db. The keys `powers` and
///     `dB` hold the same arrays as `power` and `db`.
#[pyfunction]
pub fn dft<'py>(
    py: Python<'py>,
    time: PyReadonlyArray1<f64>,
    motion: PyReadonlyArray1<f64>,
) -> PyResult<&'py PyDict> {
    let spectrum = estimate_spectrum(time.as_slice()?, motion.as_slice()?)?;

    let result = PyDict::new(py);
    for (name, values) in spectrum.columns().into_iter().chain(spectrum.alias_columns()) {
        result.set_item(name, PyArray1::from_vec(py, values))?;
    }
    result.set_item("complex", PyArray1::from_slice(py, &spectrum.complex))?;
    Ok(result)
}

/// Smooth an amplitude spectrum with a window of the given bandwidth
///
/// Args:
///     frequency: Uniformly spaced frequency axis
///     amplitude: Amplitude per bin
///     bandwidth: Window span in frequency units (default: 0.5)
///     window: "hann", "hamming", "blackman" or "rectangular"
///
/// Returns:
///     Smoothed amplitude as numpy array
#[pyfunction]
#[pyo3(signature = (frequency, amplitude, bandwidth=0.5, window="hann"))]
pub fn hanning_smooth<'py>(
    py: Python<'py>,
    frequency: PyReadonlyArray1<f64>,
    amplitude: PyReadonlyArray1<f64>,
    bandwidth: f64,
    window: &str,
) -> PyResult<&'py PyArray1<f64>> {
    let window_type = WindowType::from_name(window)
        .ok_or_else(|| PyValueError::new_err(format!("Unknown window type: {}", window)))?;
    let smoothed = smooth_spectrum(
        frequency.as_slice()?,
        amplitude.as_slice()?,
        bandwidth,
        window_type,
    )?;

    Ok(PyArray1::from_vec(py, smoothed))
}
