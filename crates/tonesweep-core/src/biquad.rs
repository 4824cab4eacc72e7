//! Biquad (bi-quadratic) filter section.
//!
//! A single second-order IIR section. Higher-order filters are built as a
//! cascade of these (second-order sections), which stays numerically stable
//! where a single high-order direct form would not.

/// Second-order IIR section with coefficients and state.
///
/// Implements the Direct Form I structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
///
/// Coefficients and delay lines are kept in `f64`; narrow bands at high
/// sample rates put poles very close to the unit circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,

    /// Input delay line: x[n-1], x[n-2]
    x1: f64,
    x2: f64,

    /// Output delay line: y[n-1], y[n-2]
    y1: f64,
    y2: f64,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    ///
    /// Initial state: `y[n] = x[n]` (no filtering)
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Creates a biquad from coefficients, normalizing by `a0`.
    pub fn with_coefficients(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        let mut biquad = Self::new();
        biquad.set_coefficients(b0, b1, b2, a0, a1, a2);
        biquad
    }

    /// Sets the biquad coefficients.
    ///
    /// # Arguments
    ///
    /// * `b0, b1, b2` - Feedforward coefficients
    /// * `a0, a1, a2` - Feedback coefficients (a0 is typically 1.0)
    ///
    /// Note: This function normalizes by a0 internally.
    pub fn set_coefficients(&mut self, b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) {
        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Normalized coefficients as `[b0, b1, b2, a1, a2]`.
    pub fn coefficients(&self) -> [f64; 5] {
        [self.b0, self.b1, self.b2, self.a1, self.a2]
    }

    /// Multiplies the feedforward coefficients by `gain`.
    pub fn scale(&mut self, gain: f64) {
        self.b0 *= gain;
        self.b1 *= gain;
        self.b2 *= gain;
    }

    /// Processes a single sample through the section.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the filter state (delay lines) without touching coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    /// Magnitude of the frequency response at normalized angular frequency
    /// `omega` (radians per sample, `0..=PI`).
    pub fn magnitude_at(&self, omega: f64) -> f64 {
        // Evaluate numerator and denominator at z^-1 = e^{-j omega}
        let (c1, s1) = (omega.cos(), -omega.sin());
        let (c2, s2) = ((2.0 * omega).cos(), -(2.0 * omega).sin());

        let num_re = self.b0 + self.b1 * c1 + self.b2 * c2;
        let num_im = self.b1 * s1 + self.b2 * s2;
        let den_re = 1.0 + self.a1 * c1 + self.a2 * c2;
        let den_im = self.a1 * s1 + self.a2 * s2;

        (num_re.hypot(num_im)) / den_re.hypot(den_im)
    }

    /// True when both poles lie strictly inside the unit circle.
    ///
    /// Uses the stability triangle for `1 + a1 z^-1 + a2 z^-2`.
    pub fn is_stable(&self) -> bool {
        self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn passthrough_by_default() {
        let mut biquad = Biquad::new();
        for x in [0.5, -0.25, 1.0, 0.0] {
            assert_eq!(biquad.process(x), x);
        }
        assert!((biquad.magnitude_at(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn set_coefficients_normalizes_by_a0() {
        let biquad = Biquad::with_coefficients(2.0, 4.0, 2.0, 2.0, 1.0, 0.5);
        assert_eq!(biquad.coefficients(), [1.0, 2.0, 1.0, 0.5, 0.25]);
    }

    #[test]
    fn clear_resets_state() {
        let mut biquad = Biquad::with_coefficients(0.5, 0.5, 0.0, 1.0, -0.5, 0.0);
        biquad.process(1.0);
        biquad.process(1.0);
        biquad.clear();

        let mut fresh = biquad.clone();
        fresh.clear();
        assert_eq!(biquad.process(0.3), fresh.process(0.3));
    }

    #[test]
    fn two_point_average_magnitude() {
        // y = 0.5 x[n] + 0.5 x[n-1]: unity at DC, null at Nyquist
        let biquad = Biquad::with_coefficients(0.5, 0.5, 0.0, 1.0, 0.0, 0.0);
        assert!((biquad.magnitude_at(0.0) - 1.0).abs() < 1e-12);
        assert!(biquad.magnitude_at(PI) < 1e-12);
    }

    #[test]
    fn scale_multiplies_feedforward_only() {
        let mut biquad = Biquad::with_coefficients(1.0, 0.0, -1.0, 1.0, -1.2, 0.5);
        biquad.scale(0.5);
        assert_eq!(biquad.coefficients(), [0.5, 0.0, -0.5, -1.2, 0.5]);
    }

    #[test]
    fn stability_triangle() {
        assert!(Biquad::with_coefficients(1.0, 0.0, 0.0, 1.0, -1.8, 0.81).is_stable());
        assert!(!Biquad::with_coefficients(1.0, 0.0, 0.0, 1.0, -2.0, 1.0).is_stable());
    }
}
