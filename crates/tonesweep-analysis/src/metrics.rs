//! Scalar quality metrics of a raw capture
//!
//! - RMS level
//! - Spectral flatness (noise-like vs. tonal)
//! - Total power
//!
//! These characterize the unmodified capture, so they are always computed on
//! the raw samples: no filtering, no windowing, and the full FFT rather than a
//! band-limited slice. Accumulation is done in `f64`.

use crate::fft::Fft;
use crate::spectrum::LOG_EPSILON;
use serde::Serialize;
use tonesweep_core::{Result, Signal};

/// Metrics computed from one signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// Root mean square level (linear)
    pub rms: f32,
    /// Spectral flatness in (0, 1]; near 1 is noise-like, near 0 is tonal
    pub flatness: f32,
    /// Sum of squared samples
    pub total_power: f32,
}

impl Metrics {
    /// Compute all three metrics on the same unmodified signal.
    pub fn compute(signal: &Signal) -> Result<Self> {
        Ok(Self {
            rms: rms(signal)?,
            flatness: spectral_flatness(signal)?,
            total_power: total_power(signal)?,
        })
    }
}

/// Compute RMS (Root Mean Square) level of a signal
///
/// Returns RMS value in linear scale (not dB)
pub fn rms(signal: &Signal) -> Result<f32> {
    signal.require_samples("rms")?;
    let sum_sq = sum_of_squares(signal.samples());
    Ok((sum_sq / signal.len() as f64).sqrt() as f32)
}

/// Sum of squared samples.
pub fn total_power(signal: &Signal) -> Result<f32> {
    signal.require_samples("total power")?;
    Ok(sum_of_squares(signal.samples()) as f32)
}

/// Compute spectral flatness (how noise-like the spectrum is)
///
/// Ratio of the geometric to the arithmetic mean of `|FFT(x)| + eps` over all
/// `N` bins of the full transform.
pub fn spectral_flatness(signal: &Signal) -> Result<f32> {
    signal.require_samples("spectral flatness")?;

    let n = signal.len();
    let fft = Fft::new(n);
    let bins = fft.forward(signal.samples());

    let eps = f64::from(LOG_EPSILON);
    let (log_sum, sum) = bins.iter().fold((0.0f64, 0.0f64), |(log_sum, sum), c| {
        let mag = f64::from(c.norm()) + eps;
        (log_sum + mag.ln(), sum + mag)
    });

    let geometric_mean = (log_sum / n as f64).exp();
    let arithmetic_mean = sum / n as f64;

    // Rounding can push a perfectly flat spectrum a hair above 1
    Ok((geometric_mean / arithmetic_mean).min(1.0) as f32)
}

fn sum_of_squares(samples: &[f32]) -> f64 {
    samples.iter().map(|&x| f64::from(x) * f64::from(x)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use tonesweep_core::Error;

    fn sine(freq_hz: f64, sample_rate: u32, len: usize, amplitude: f64) -> Signal {
        let samples = (0..len)
            .map(|i| {
                let t = i as f64 / f64::from(sample_rate);
                (amplitude * (2.0 * PI * freq_hz * t).sin()) as f32
            })
            .collect();
        Signal::new(samples, sample_rate).unwrap()
    }

    /// xorshift32 uniform noise in [-1, 1)
    fn noise(len: usize, sample_rate: u32) -> Signal {
        let mut state = 0x12345678u32;
        let samples = (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect();
        Signal::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn rms_of_sine() {
        let signal = sine(1000.0, 48000, 48000, 0.9);
        let value = rms(&signal).unwrap();
        assert!(
            (value - 0.9 / 2.0f32.sqrt()).abs() < 1e-3,
            "RMS {value} should be ~0.636"
        );
    }

    #[test]
    fn total_power_of_constant() {
        let signal = Signal::new(vec![0.5; 400], 48000).unwrap();
        assert!((total_power(&signal).unwrap() - 100.0).abs() < 1e-4);
        assert!((rms(&signal).unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn flatness_tone_vs_noise() {
        let tone = sine(1000.0, 48000, 48000, 0.9);
        let tonal = spectral_flatness(&tone).unwrap();
        assert!(tonal < 0.1, "tonal flatness should be near 0: {tonal}");

        let noisy = spectral_flatness(&noise(48000, 48000)).unwrap();
        assert!(noisy > 0.7, "noise flatness should be near 1: {noisy}");
        assert!(noisy <= 1.0);
    }

    #[test]
    fn flatness_of_impulse_is_one() {
        // A unit impulse has a perfectly flat magnitude spectrum
        let mut samples = vec![0.0; 1024];
        samples[0] = 1.0;
        let signal = Signal::new(samples, 48000).unwrap();
        let value = spectral_flatness(&signal).unwrap();
        assert!((value - 1.0).abs() < 1e-4, "impulse flatness {value}");
    }

    #[test]
    fn empty_signal_is_an_error() {
        let signal = Signal::new(Vec::new(), 48000).unwrap();
        assert_eq!(rms(&signal), Err(Error::EmptySignal("rms")));
        assert!(matches!(
            Metrics::compute(&signal),
            Err(Error::EmptySignal(_))
        ));
    }

    #[test]
    fn compute_bundles_all_three() {
        let signal = sine(440.0, 44100, 44100, 0.5);
        let metrics = Metrics::compute(&signal).unwrap();
        assert_eq!(metrics.rms, rms(&signal).unwrap());
        assert_eq!(metrics.total_power, total_power(&signal).unwrap());
        assert_eq!(metrics.flatness, spectral_flatness(&signal).unwrap());
        assert!(metrics.flatness > 0.0 && metrics.flatness <= 1.0);
    }
}
