//! Normalized magnitude spectrum of a real signal.

use crate::fft::Fft;
use serde::Serialize;
use tonesweep_core::{FrequencyBand, Result, Signal};

/// Floor added to magnitudes before taking logarithms.
pub const LOG_EPSILON: f32 = 1e-10;

/// Magnitude spectrum in dB over a linear frequency axis.
///
/// `frequencies_hz` and `magnitudes_db` are parallel and strictly ordered by
/// frequency. A spectrum computed from `N` samples has `N / 2` points spread
/// evenly from 0 Hz to Nyquist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spectrum {
    /// Frequency of each point in Hz.
    pub frequencies_hz: Vec<f64>,
    /// Level of each point in dB (`20 * log10(|X| / N + eps)`).
    pub magnitudes_db: Vec<f32>,
}

impl Spectrum {
    /// Compute the spectrum of an (already windowed) signal.
    ///
    /// The transform size is the signal length. Magnitudes are normalized by
    /// the transform size before conversion to dB.
    pub fn from_signal(signal: &Signal) -> Result<Self> {
        signal.require_samples("spectrum")?;

        let n = signal.len();
        let half = n / 2;
        let fft = Fft::new(n);
        let bins = fft.forward(signal.samples());

        let scale = 1.0 / n as f32;
        let magnitudes_db = bins
            .iter()
            .take(half)
            .map(|c| 20.0 * (c.norm() * scale + LOG_EPSILON).log10())
            .collect();

        let frequencies_hz = linear_axis(f64::from(signal.sample_rate()) / 2.0, half);

        tracing::debug!(samples = n, points = half, "computed spectrum");

        Ok(Self {
            frequencies_hz,
            magnitudes_db,
        })
    }

    /// Keep only the points whose frequency lies inside `band` (edges included).
    pub fn restrict(&self, band: FrequencyBand) -> Self {
        let low = f64::from(band.low_hz);
        let high = f64::from(band.high_hz);

        let (frequencies_hz, magnitudes_db) = self
            .frequencies_hz
            .iter()
            .zip(self.magnitudes_db.iter())
            .filter(|&(&f, _)| f >= low && f <= high)
            .map(|(&f, &m)| (f, m))
            .unzip();

        Self {
            frequencies_hz,
            magnitudes_db,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.frequencies_hz.len()
    }

    /// True when the spectrum holds no points.
    pub fn is_empty(&self) -> bool {
        self.frequencies_hz.is_empty()
    }

    /// Spacing between adjacent points in Hz, or `None` with fewer than two points.
    pub fn resolution_hz(&self) -> Option<f64> {
        match self.frequencies_hz.as_slice() {
            [first, second, ..] => Some(second - first),
            _ => None,
        }
    }

    /// Index and level of the loudest point.
    pub fn max_point(&self) -> Option<(usize, f32)> {
        self.magnitudes_db
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// `points` frequencies evenly spaced from 0 to `nyquist`, both ends included.
///
/// A single point sits at 0 Hz.
fn linear_axis(nyquist: f64, points: usize) -> Vec<f64> {
    if points <= 1 {
        return vec![0.0; points];
    }
    let step = nyquist / (points - 1) as f64;
    (0..points).map(|k| k as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::Window;
    use std::f64::consts::PI;
    use tonesweep_core::Error;

    fn sine(freq_hz: f64, sample_rate: u32, len: usize, amplitude: f64) -> Signal {
        let samples = (0..len)
            .map(|i| (amplitude * (2.0 * PI * freq_hz * i as f64 / f64::from(sample_rate)).sin()) as f32)
            .collect();
        Signal::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn axis_spans_zero_to_nyquist() {
        let signal = Signal::new(vec![0.0; 1000], 48000).unwrap();
        let spectrum = Spectrum::from_signal(&signal).unwrap();

        assert_eq!(spectrum.len(), 500);
        assert_eq!(spectrum.frequencies_hz[0], 0.0);
        assert!((spectrum.frequencies_hz[499] - 24000.0).abs() < 1e-6);
        assert!(
            spectrum
                .frequencies_hz
                .windows(2)
                .all(|w| w[1] > w[0])
        );
    }

    #[test]
    fn silence_sits_at_epsilon_floor() {
        let signal = Signal::new(vec![0.0; 64], 48000).unwrap();
        let spectrum = Spectrum::from_signal(&signal).unwrap();
        for &db in &spectrum.magnitudes_db {
            assert!((db + 200.0).abs() < 0.01, "expected -200 dB, got {db}");
        }
    }

    #[test]
    fn odd_and_tiny_lengths() {
        let odd = Signal::new(vec![0.5; 9], 8000).unwrap();
        assert_eq!(Spectrum::from_signal(&odd).unwrap().len(), 4);

        let two = Signal::new(vec![0.5; 2], 8000).unwrap();
        let spectrum = Spectrum::from_signal(&two).unwrap();
        assert_eq!(spectrum.frequencies_hz, vec![0.0]);
    }

    #[test]
    fn empty_signal_rejected() {
        let signal = Signal::new(Vec::new(), 48000).unwrap();
        assert_eq!(
            Spectrum::from_signal(&signal),
            Err(Error::EmptySignal("spectrum"))
        );
    }

    #[test]
    fn unwindowed_sine_level() {
        // Bin-centred full-scale sine: |X| / N = A / 2 -> -6.02 dB
        let signal = sine(1000.0, 48000, 48000, 1.0);
        let spectrum = Spectrum::from_signal(&signal).unwrap();
        let (idx, level) = spectrum.max_point().unwrap();
        assert_eq!(idx, 1000);
        assert!((level + 6.02).abs() < 0.05, "level {level}");
    }

    #[test]
    fn restrict_keeps_band_inclusive_and_ordered() {
        let signal = sine(1000.0, 8000, 8002, 0.5);
        let spectrum = Spectrum::from_signal(&signal).unwrap();
        // 4001 points from 0 to 4000 Hz, 1 Hz apart
        assert_eq!(spectrum.resolution_hz(), Some(1.0));

        let band = FrequencyBand::new(900.0, 1100.0).unwrap();
        let restricted = spectrum.restrict(band);
        assert_eq!(restricted.len(), 201);
        assert_eq!(restricted.frequencies_hz[0], 900.0);
        assert_eq!(*restricted.frequencies_hz.last().unwrap(), 1100.0);
        assert_eq!(restricted.magnitudes_db.len(), restricted.len());
    }

    #[test]
    fn windowed_tone_peak_within_one_bin() {
        let sample_rate = 48000;
        let len = 4800;
        let freq = 1234.5;
        let signal = sine(freq, sample_rate, len, 0.9);
        let windowed = Window::Hann.apply(&signal).unwrap();
        let spectrum = Spectrum::from_signal(&windowed).unwrap();

        let (idx, _) = spectrum.max_point().unwrap();
        let bin_width = f64::from(sample_rate) / len as f64;
        assert!(
            (spectrum.frequencies_hz[idx] - freq).abs() <= bin_width,
            "peak at {} Hz",
            spectrum.frequencies_hz[idx]
        );
    }
}
