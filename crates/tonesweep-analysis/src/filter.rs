//! Butterworth bandpass filter for isolating the band under test.
//!
//! The filter is designed from the analog Butterworth prototype with a
//! lowpass-to-bandpass transform followed by the bilinear transform (band
//! edges pre-warped), and is realized as a cascade of second-order sections.
//! An order-`n` design has `2n` poles and `n` sections.
//!
//! # Example
//!
//! ```rust
//! use tonesweep_analysis::filter::{BandpassFilter, DEFAULT_ORDER};
//! use tonesweep_core::{FrequencyBand, Signal};
//!
//! let band = FrequencyBand::new(15000.0, 19000.0).unwrap();
//! let filter = BandpassFilter::design(band, 48000, DEFAULT_ORDER).unwrap();
//!
//! let signal = Signal::new(vec![0.0; 4800], 48000).unwrap();
//! let filtered = filter.apply(&signal).unwrap();
//! assert_eq!(filtered.len(), signal.len());
//! ```

use rustfft::num_complex::Complex64;
use std::f64::consts::PI;
use tonesweep_core::{Biquad, Error, FrequencyBand, Result, Signal};

/// Filter order used when none is configured.
pub const DEFAULT_ORDER: usize = 5;

/// Highest order accepted by [`BandpassFilter::design`].
pub const MAX_ORDER: usize = 24;

/// Bandpass filter as a cascade of second-order sections.
///
/// Higher orders give steeper skirts at the band edges at the cost of longer
/// ringing after transients.
#[derive(Debug, Clone)]
pub struct BandpassFilter {
    sections: Vec<Biquad>,
    band: FrequencyBand,
    order: usize,
    sample_rate: u32,
}

impl BandpassFilter {
    /// Design a Butterworth bandpass filter of the given order.
    ///
    /// The band must satisfy `0 < low_hz < high_hz < sample_rate / 2`.
    /// The passband gain is unity at the geometric centre of the band.
    pub fn design(band: FrequencyBand, sample_rate: u32, order: usize) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::invalid_parameter(
                "sample_rate",
                "must be positive, got 0",
            ));
        }
        if order == 0 || order > MAX_ORDER {
            return Err(Error::invalid_parameter(
                "filter_order",
                format!("must be in 1..={MAX_ORDER}, got {order}"),
            ));
        }
        if band.low_hz <= 0.0 {
            return Err(Error::invalid_band(
                band.low_hz,
                band.high_hz,
                "low edge must be above 0 Hz for a bandpass design",
            ));
        }
        band.check_nyquist(sample_rate)?;

        let fs = f64::from(sample_rate);
        let fs2 = 2.0 * fs;

        // Pre-warp the edges so the digital band lands where requested
        let warped_low = fs2 * (PI * f64::from(band.low_hz) / fs).tan();
        let warped_high = fs2 * (PI * f64::from(band.high_hz) / fs).tan();
        let bandwidth = warped_high - warped_low;
        let center_sq = warped_low * warped_high;

        let bilinear = |s: Complex64| (fs2 + s) / (fs2 - s);

        let mut sections = Vec::with_capacity(order);

        // Upper-half-plane prototype poles; each maps to two bandpass poles,
        // and each of those forms a section with its conjugate.
        for k in 0..order / 2 {
            let theta = PI * (2 * k + order + 1) as f64 / (2 * order) as f64;
            let pole = Complex64::from_polar(1.0, theta);
            let half = pole * (bandwidth / 2.0);
            let disc = (half * half - center_sq).sqrt();

            for s in [half + disc, half - disc] {
                let z = bilinear(s);
                sections.push(section_from_poles(z, z.conj()));
            }
        }

        // Odd orders carry one real prototype pole at -1; its two bandpass
        // poles are a conjugate (or real) pair sharing one section.
        if order % 2 == 1 {
            let half = Complex64::new(-bandwidth / 2.0, 0.0);
            let disc = (half * half - center_sq).sqrt();
            let z1 = bilinear(half + disc);
            let z2 = bilinear(half - disc);
            sections.push(section_from_poles(z1, z2));
        }

        // Normalize every section to unity at the digital band centre
        let omega_center = 2.0 * (center_sq.sqrt() / fs2).atan();
        for section in &mut sections {
            let gain = section.magnitude_at(omega_center);
            if gain > 0.0 && gain.is_finite() {
                section.scale(1.0 / gain);
            }
        }

        if !sections.iter().all(Biquad::is_stable) {
            return Err(Error::invalid_band(
                band.low_hz,
                band.high_hz,
                "band too narrow for a stable design at this sample rate",
            ));
        }

        tracing::debug!(
            low_hz = band.low_hz,
            high_hz = band.high_hz,
            order,
            sections = sections.len(),
            "designed bandpass filter"
        );

        Ok(Self {
            sections,
            band,
            order,
            sample_rate,
        })
    }

    /// The band this filter passes.
    pub fn band(&self) -> FrequencyBand {
        self.band
    }

    /// Filter order (number of second-order sections).
    pub fn order(&self) -> usize {
        self.order
    }

    /// Sample rate the filter was designed for.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The second-order sections of the cascade.
    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Process a single sample through the cascade, updating its state.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut sample = f64::from(input);
        for section in &mut self.sections {
            sample = section.process(sample);
        }
        sample as f32
    }

    /// Reset the filter state.
    pub fn reset(&mut self) {
        for section in &mut self.sections {
            section.clear();
        }
    }

    /// Filter a whole signal causally from rest, returning a new signal of
    /// the same length. The filter's own state is left untouched.
    pub fn apply(&self, signal: &Signal) -> Result<Signal> {
        if signal.sample_rate() != self.sample_rate {
            return Err(Error::invalid_parameter(
                "sample_rate",
                format!(
                    "filter designed for {} Hz but signal is {} Hz",
                    self.sample_rate,
                    signal.sample_rate()
                ),
            ));
        }

        let mut cascade = self.clone();
        cascade.reset();
        let filtered = signal
            .samples()
            .iter()
            .map(|&x| cascade.process(x))
            .collect();
        Ok(signal.with_samples(filtered))
    }

    /// Magnitude response of the cascade at `freq_hz` (linear).
    pub fn magnitude_at(&self, freq_hz: f32) -> f64 {
        let omega = 2.0 * PI * f64::from(freq_hz) / f64::from(self.sample_rate);
        self.sections
            .iter()
            .map(|s| s.magnitude_at(omega))
            .product()
    }
}

/// Bandpass a signal with a freshly designed Butterworth filter.
pub fn bandpass(signal: &Signal, band: FrequencyBand, order: usize) -> Result<Signal> {
    BandpassFilter::design(band, signal.sample_rate(), order)?.apply(signal)
}

/// Section with zeros at `z = 1` and `z = -1` and the given pole pair.
///
/// `p1` and `p2` must be a conjugate pair or both real so the coefficients
/// come out real.
fn section_from_poles(p1: Complex64, p2: Complex64) -> Biquad {
    let a1 = -(p1 + p2).re;
    let a2 = (p1 * p2).re;
    Biquad::with_coefficients(1.0, 0.0, -1.0, 1.0, a1, a2)
}
