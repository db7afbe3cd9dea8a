//! Python bindings for Butterworth low-pass filtering

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::filters::{design_butter_lowpass, lowpass};

/// Low-pass filter a signal (single forward pass, not zero-phase)
///
/// Args:
///     data: Input signal as numpy array
///     cutoff: Cutoff frequency in Hz (default: 60)
///     fs: Sampling frequency in Hz (default: 200)
///     order: Butterworth order (default: 4)
///
/// Returns:
///     Filtered signal as numpy array
#[pyfunction]
#[pyo3(signature = (data, cutoff=60.0, fs=200.0, order=4))]
pub fn butter_lowpass_filter<'py>(
    py: Python<'py>,
    data: PyReadonlyArray1<f64>,
    cutoff: f64,
    fs: f64,
    order: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let filtered = lowpass::butter_lowpass_filter(data.as_slice()?, cutoff, fs, order)?;
    Ok(PyArray1::from_vec(py, filtered))
}

/// Digital Butterworth low-pass coefficients
///
/// Args:
///     order: Filter order
///     wn: Cutoff as a fraction of Nyquist, strictly inside (0, 1)
///
/// Returns:
///     (b, a) numerator and denominator as numpy arrays
#[pyfunction]
pub fn butter<'py>(
    py: Python<'py>,
    order: usize,
    wn: f64,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let design = design_butter_lowpass(order, wn)?;
    Ok((PyArray1::from_vec(py, design.b), PyArray1::from_vec(py, design.a)))
}
