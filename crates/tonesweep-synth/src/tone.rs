//! Pure sine test tones.
//!
//! Every tone starts at phase zero and is scaled to [`AMPLITUDE`], leaving
//! headroom below full scale so integer encoding never clips. Phase is
//! computed in `f64` from the sample index, not accumulated, so long tones do
//! not drift.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tonesweep_core::{Error, Result, Signal};

/// Peak amplitude of every synthesized tone.
pub const AMPLITUDE: f64 = 0.9;

/// Frequency and duration of one tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    /// Tone frequency in Hz
    pub frequency_hz: f64,
    /// Tone length in seconds
    pub duration_s: f64,
}

impl ToneSpec {
    /// Create a tone spec, rejecting non-positive or non-finite values.
    pub fn new(frequency_hz: f64, duration_s: f64) -> Result<Self> {
        if !(frequency_hz.is_finite() && frequency_hz > 0.0) {
            return Err(Error::invalid_parameter(
                "frequency_hz",
                format!("must be positive, got {frequency_hz}"),
            ));
        }
        if !(duration_s.is_finite() && duration_s > 0.0) {
            return Err(Error::invalid_parameter(
                "duration_s",
                format!("must be positive, got {duration_s}"),
            ));
        }
        Ok(Self {
            frequency_hz,
            duration_s,
        })
    }

    /// Number of samples this tone occupies at `sample_rate`.
    ///
    /// `round(sample_rate * duration_s)`.
    pub fn sample_count(&self, sample_rate: u32) -> usize {
        (f64::from(sample_rate) * self.duration_s).round() as usize
    }

    /// Render `len` samples of this tone at `sample_rate`.
    pub(crate) fn render_samples(&self, sample_rate: u32, len: usize) -> Vec<f32> {
        let omega = 2.0 * PI * self.frequency_hz / f64::from(sample_rate);
        (0..len)
            .map(|k| (AMPLITUDE * (omega * k as f64).sin()) as f32)
            .collect()
    }
}

/// Synthesize a single tone.
///
/// Returns `round(sample_rate * duration_s)` samples of
/// `0.9 * sin(2π f k / sample_rate)`.
///
/// # Example
///
/// ```rust
/// use tonesweep_synth::synthesize_tone;
///
/// let tone = synthesize_tone(1000.0, 0.5, 48000).unwrap();
/// assert_eq!(tone.len(), 24000);
/// assert_eq!(tone.samples()[0], 0.0);
/// ```
pub fn synthesize_tone(frequency_hz: f64, duration_s: f64, sample_rate: u32) -> Result<Signal> {
    if sample_rate == 0 {
        return Err(Error::invalid_parameter("sample_rate", "must be positive, got 0"));
    }
    let tone = ToneSpec::new(frequency_hz, duration_s)?;
    if frequency_hz >= f64::from(sample_rate) / 2.0 {
        tracing::warn!(
            frequency_hz,
            sample_rate,
            "tone at or above Nyquist will alias"
        );
    }
    let len = tone.sample_count(sample_rate);
    Signal::new(tone.render_samples(sample_rate, len), sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_is_rounded() {
        assert_eq!(synthesize_tone(440.0, 1.0, 48000).unwrap().len(), 48000);
        assert_eq!(synthesize_tone(440.0, 0.5, 44100).unwrap().len(), 22050);
        // 0.00001 s at 48 kHz is 0.48 samples
        assert_eq!(synthesize_tone(440.0, 0.00001, 48000).unwrap().len(), 0);
        assert_eq!(synthesize_tone(440.0, 0.0001, 48000).unwrap().len(), 5);
    }

    #[test]
    fn phase_starts_at_zero() {
        let tone = synthesize_tone(1000.0, 0.01, 48000).unwrap();
        assert_eq!(tone.samples()[0], 0.0);
        // Quarter period of 1 kHz at 48 kHz is 12 samples
        assert!((tone.samples()[12] - 0.9).abs() < 1e-6);
    }

    #[test]
    fn amplitude_bounded() {
        let tone = synthesize_tone(997.0, 1.0, 48000).unwrap();
        let peak = tone.samples().iter().fold(0.0f32, |m, &s| m.max(s.abs()));
        assert!(peak <= 0.9 + 1e-6);
        assert!(peak > 0.899);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(
            synthesize_tone(0.0, 1.0, 48000),
            Err(Error::InvalidParameter { name: "frequency_hz", .. })
        ));
        assert!(matches!(
            synthesize_tone(-5.0, 1.0, 48000),
            Err(Error::InvalidParameter { name: "frequency_hz", .. })
        ));
        assert!(matches!(
            synthesize_tone(440.0, 0.0, 48000),
            Err(Error::InvalidParameter { name: "duration_s", .. })
        ));
        assert!(matches!(
            synthesize_tone(440.0, f64::NAN, 48000),
            Err(Error::InvalidParameter { name: "duration_s", .. })
        ));
        assert!(matches!(
            synthesize_tone(440.0, 1.0, 0),
            Err(Error::InvalidParameter { name: "sample_rate", .. })
        ));
    }

    #[test]
    fn deterministic() {
        let a = synthesize_tone(15500.0, 0.25, 192000).unwrap();
        let b = synthesize_tone(15500.0, 0.25, 192000).unwrap();
        assert_eq!(a, b);
    }
}
