//! Error types for the numerical core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Shape mismatch: {left} has {left_len} samples but {right} has {right_len}")]
    ShapeMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),
}

impl SignalError {
    /// Fail unless two aligned arrays have the same length
    pub(crate) fn check_aligned(
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    ) -> Result<(), SignalError> {
        if left_len != right_len {
            return Err(SignalError::ShapeMismatch {
                left,
                left_len,
                right,
                right_len,
            });
        }
        Ok(())
    }

    /// Fail unless there are at least two samples to derive a step from
    pub(crate) fn check_min_len(what: &str, len: usize) -> Result<(), SignalError> {
        if len < 2 {
            return Err(SignalError::DegenerateInput(format!(
                "{} needs at least 2 samples to derive a step (got {})",
                what, len
            )));
        }
        Ok(())
    }
}

pub type SignalResult<T> = Result<T, SignalError>;
