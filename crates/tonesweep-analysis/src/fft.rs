//! FFT wrapper with windowing functions

use rustfft::{FftPlanner, num_complex::Complex};
use std::f64::consts::PI;
use std::sync::Arc;
use tonesweep_core::{Error, Result, Signal};

/// Tapering window types.
///
/// All windows are the symmetric form (`n - 1` in the denominator), so the
/// first and last coefficients mirror each other and the peak sits at the
/// centre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Window {
    /// Hann window (raised cosine), zero at both ends
    #[default]
    Hann,
    /// Hamming window, 0.08 at both ends
    Hamming,
    /// Blackman window (better sidelobe suppression)
    Blackman,
}

impl Window {
    /// Weight of coefficient `i` in a window of `size` points (`size >= 2`).
    fn weight(self, i: usize, size: usize) -> f64 {
        let x = 2.0 * PI * i as f64 / (size - 1) as f64;
        match self {
            Window::Hann => 0.5 - 0.5 * x.cos(),
            Window::Hamming => 0.54 - 0.46 * x.cos(),
            Window::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
        }
    }

    /// Get window coefficients for a window of `size` points.
    ///
    /// A one-point window is `[1.0]`. A zero-length window is rejected.
    pub fn coefficients(&self, size: usize) -> Result<Vec<f32>> {
        match size {
            0 => Err(Error::invalid_parameter(
                "window_length",
                "window length must be at least 1",
            )),
            1 => Ok(vec![1.0]),
            _ => Ok((0..size)
                .map(|i| self.weight(i, size).max(0.0) as f32)
                .collect()),
        }
    }

    /// Return a new signal with the window applied sample by sample.
    pub fn apply(&self, signal: &Signal) -> Result<Signal> {
        let coeffs = self.coefficients(signal.len())?;
        let windowed = signal
            .samples()
            .iter()
            .zip(coeffs.iter())
            .map(|(&s, &w)| s * w)
            .collect();
        Ok(signal.with_samples(windowed))
    }

    /// Parse a window name as used in config files and on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hann" | "hanning" => Some(Window::Hann),
            "hamming" => Some(Window::Hamming),
            "blackman" => Some(Window::Blackman),
            _ => None,
        }
    }

    /// Lowercase name of the window.
    pub fn name(&self) -> &'static str {
        match self {
            Window::Hann => "hann",
            Window::Hamming => "hamming",
            Window::Blackman => "blackman",
        }
    }
}

/// FFT processor for a fixed transform size
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Perform forward FFT on real input, returning all `size` bins.
    ///
    /// Input shorter than the FFT size is zero-padded, longer input is truncated.
    pub fn forward(&self, input: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> =
            input.iter().map(|&x| Complex::new(x, 0.0)).collect();

        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);
        buffer
    }
}
