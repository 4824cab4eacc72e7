//! Frequency band of interest.

use crate::error::{Error, Result};

/// A frequency interval `[low_hz, high_hz]`.
///
/// Construction enforces `0 <= low_hz < high_hz`. The upper Nyquist bound
/// depends on the signal being processed and is checked separately:
/// [`FrequencyBand::check_within_nyquist`] for spectrum restriction (edge
/// included) and [`FrequencyBand::check_nyquist`] for filter design (edge
/// excluded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    /// Lower edge in Hz
    pub low_hz: f32,
    /// Upper edge in Hz
    pub high_hz: f32,
}

impl FrequencyBand {
    /// Create a band, rejecting inverted, empty, negative, or non-finite edges.
    pub fn new(low_hz: f32, high_hz: f32) -> Result<Self> {
        if !low_hz.is_finite() || !high_hz.is_finite() {
            return Err(Error::invalid_band(low_hz, high_hz, "edges must be finite"));
        }
        if low_hz < 0.0 {
            return Err(Error::invalid_band(
                low_hz,
                high_hz,
                "low edge must not be negative",
            ));
        }
        if low_hz >= high_hz {
            return Err(Error::invalid_band(
                low_hz,
                high_hz,
                "low edge must be below high edge",
            ));
        }
        Ok(Self { low_hz, high_hz })
    }

    /// Check that the whole band lies below the Nyquist frequency of `sample_rate`.
    pub fn check_nyquist(&self, sample_rate: u32) -> Result<()> {
        let nyquist = sample_rate as f32 / 2.0;
        if self.high_hz >= nyquist {
            return Err(Error::invalid_band(
                self.low_hz,
                self.high_hz,
                format!("high edge must be below Nyquist ({nyquist} Hz)"),
            ));
        }
        Ok(())
    }

    /// Check that the band does not extend past the Nyquist frequency of
    /// `sample_rate`. A high edge exactly at Nyquist is accepted.
    pub fn check_within_nyquist(&self, sample_rate: u32) -> Result<()> {
        let nyquist = sample_rate as f32 / 2.0;
        if self.high_hz > nyquist {
            return Err(Error::invalid_band(
                self.low_hz,
                self.high_hz,
                format!("high edge must not exceed Nyquist ({nyquist} Hz)"),
            ));
        }
        Ok(())
    }

    /// True if `freq_hz` lies within the band, edges included.
    pub fn contains(&self, freq_hz: f32) -> bool {
        freq_hz >= self.low_hz && freq_hz <= self.high_hz
    }

    /// Geometric centre of the band in Hz.
    pub fn center_hz(&self) -> f32 {
        (self.low_hz * self.high_hz).sqrt()
    }

    /// Bandwidth in Hz.
    pub fn bandwidth(&self) -> f32 {
        self.high_hz - self.low_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_band() {
        let band = FrequencyBand::new(15000.0, 19000.0).unwrap();
        assert_eq!(band.bandwidth(), 4000.0);
        assert!(band.contains(15000.0));
        assert!(band.contains(19000.0));
        assert!(!band.contains(19000.5));
    }

    #[test]
    fn zero_low_edge_allowed() {
        assert!(FrequencyBand::new(0.0, 1000.0).is_ok());
    }

    #[test]
    fn inverted_band_rejected() {
        assert!(matches!(
            FrequencyBand::new(19000.0, 15000.0),
            Err(Error::InvalidBand { .. })
        ));
        assert!(FrequencyBand::new(1000.0, 1000.0).is_err());
    }

    #[test]
    fn negative_or_nan_rejected() {
        assert!(FrequencyBand::new(-1.0, 100.0).is_err());
        assert!(FrequencyBand::new(f32::NAN, 100.0).is_err());
        assert!(FrequencyBand::new(10.0, f32::INFINITY).is_err());
    }

    #[test]
    fn nyquist_check() {
        let band = FrequencyBand::new(15000.0, 24000.0).unwrap();
        assert!(band.check_nyquist(48000).is_err());
        assert!(band.check_nyquist(96000).is_ok());
    }

    #[test]
    fn nyquist_edge_allowed_for_restriction() {
        let band = FrequencyBand::new(1000.0, 24000.0).unwrap();
        assert!(band.check_within_nyquist(48000).is_ok());
        assert!(band.check_nyquist(48000).is_err());
        assert!(band.check_within_nyquist(44100).is_err());
    }

    #[test]
    fn center_is_geometric_mean() {
        let band = FrequencyBand::new(100.0, 10000.0).unwrap();
        assert!((band.center_hz() - 1000.0).abs() < 0.01);
    }
}
