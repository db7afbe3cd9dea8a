//! Butterworth low-pass design and causal IIR filtering

pub mod windows;
pub mod design;
pub mod iir;
pub mod lowpass;

pub use windows::{WindowType, generate_window, window_segment};
pub use design::{
    ButterworthDesign, MAX_ORDER, design_butter_lowpass, frequency_response, magnitude_response_db,
};
pub use iir::IirFilter;
pub use lowpass::{LowpassConfig, butter_lowpass_filter};
