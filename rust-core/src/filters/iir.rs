//! Causal IIR filter with state management
//!
//! Direct form II transposed, one forward pass (the `lfilter` recurrence).
//! There is no backward pass, so the output carries the filter's phase lag.

use super::design::ButterworthDesign;

/// IIR filter processor with a fixed-size delay line
#[derive(Debug, Clone)]
pub struct IirFilter {
    /// Numerator coefficients, normalized so a[0] == 1
    b: Vec<f64>,

    /// Denominator coefficients, normalized so a[0] == 1
    a: Vec<f64>,

    /// Delay line z[0..order], all zeros at start
    state: Vec<f64>,
}

impl IirFilter {
    /// Create a filter from transfer-function coefficients
    ///
    /// # Arguments
    /// * `b` - Numerator coefficients
    /// * `a` - Denominator coefficients; a missing or zero `a[0]` is taken as 1
    ///
    /// Shorter coefficient vectors are zero-padded to a common length.
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Self {
        let len = b.len().max(a.len()).max(1);
        let a0 = match a.first() {
            Some(&v) if v != 0.0 => v,
            _ => 1.0,
        };

        let mut b: Vec<f64> = b.into_iter().map(|c| c / a0).collect();
        let mut a: Vec<f64> = a.into_iter().map(|c| c / a0).collect();
        b.resize(len, 0.0);
        a.resize(len, 0.0);
        a[0] = 1.0;

        Self {
            b,
            a,
            state: vec![0.0; len - 1],
        }
    }

    /// Create a filter running a Butterworth design
    pub fn from_design(design: &ButterworthDesign) -> Self {
        Self::new(design.b.clone(), design.a.clone())
    }

    /// Process single sample
    ///
    /// # Arguments
    /// * `input` - Input sample x[n]
    ///
    /// # Returns
    /// Filtered output sample y[n]
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let order = self.state.len();
        if order == 0 {
            return self.b[0] * input;
        }

        // y[n] = b0 x[n] + z0
        let output = self.b[0] * input + self.state[0];

        // z[k] = b[k+1] x[n] - a[k+1] y[n] + z[k+1]
        for k in 0..order - 1 {
            self.state[k] = self.b[k + 1] * input - self.a[k + 1] * output + self.state[k + 1];
        }
        self.state[order - 1] = self.b[order] * input - self.a[order] * output;

        output
    }

    /// Process a block of samples
    ///
    /// # Returns
    /// Filtered output samples (same length as input)
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Reset filter state (clear delay line)
    pub fn reset(&mut self) {
        self.state.fill(0.0);
    }

    /// Get numerator coefficients
    pub fn numerator(&self) -> &[f64] {
        &self.b
    }

    /// Get denominator coefficients
    pub fn denominator(&self) -> &[f64] {
        &self.a
    }

    /// Filter order
    pub fn order(&self) -> usize {
        self.state.len()
    }
}
