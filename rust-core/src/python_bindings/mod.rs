//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::SignalError;

mod filter_bindings;
mod spectrum_bindings;

impl From<SignalError> for PyErr {
    fn from(err: SignalError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Python module definition
#[pymodule]
fn rpt_spectra(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(spectrum_bindings::dft, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::hanning_smooth, m)?)?;
    m.add_function(wrap_pyfunction!(filter_bindings::butter_lowpass_filter, m)?)?;
    m.add_function(wrap_pyfunction!(filter_bindings::butter, m)?)?;

    Ok(())
}
