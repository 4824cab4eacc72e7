//! One-call spectrum analysis: raw samples in, annotated spectrum and metrics out.
//!
//! Stages, in order:
//!
//! 1. Optional bandpass filter over the band of interest
//! 2. Window
//! 3. Spectral transform over the whole signal
//! 4. Restriction of the spectrum to the band
//! 5. Peak detection on the restricted spectrum
//!
//! [`Metrics`] are computed separately on the original signal, untouched by
//! any of the stages above: they describe the raw capture while the spectrum
//! and peaks describe the band of interest.

use crate::fft::Window;
use crate::filter::{BandpassFilter, DEFAULT_ORDER};
use crate::metrics::Metrics;
use crate::peaks::{PeakAnnotation, PeakDetector};
use crate::spectrum::Spectrum;
use serde::Serialize;
use tonesweep_core::{FrequencyBand, Result, Signal};

/// Settings for [`SpectrumAnalyzer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    /// Bandpass-filter the signal before the transform when a band is given
    pub filter: bool,
    /// Butterworth order of the bandpass filter
    pub filter_order: usize,
    /// Window applied before the transform
    pub window: Window,
    /// Peak picker run on the band-restricted spectrum
    pub peaks: PeakDetector,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            filter: true,
            filter_order: DEFAULT_ORDER,
            window: Window::Hann,
            peaks: PeakDetector::default(),
        }
    }
}

/// Result of a full analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Spectrum, restricted to the band when one was given
    pub spectrum: Spectrum,
    /// Peaks of the (restricted) spectrum in frequency order
    pub peaks: Vec<PeakAnnotation>,
    /// Metrics of the raw input signal
    pub metrics: Metrics,
}

impl Analysis {
    /// The loudest detected peak, if any.
    pub fn strongest_peak(&self) -> Option<PeakAnnotation> {
        self.peaks
            .iter()
            .copied()
            .max_by(|a, b| a.magnitude_db.total_cmp(&b.magnitude_db))
    }
}

/// Composes filter, window, transform, and peak detection.
#[derive(Debug, Clone, Default)]
pub struct SpectrumAnalyzer {
    options: AnalysisOptions,
}

impl SpectrumAnalyzer {
    /// Create an analyzer with the given options.
    pub fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Analyze a signal, optionally focusing on `band`.
    ///
    /// The band may reach the signal's Nyquist frequency only when no filter
    /// runs; filter design needs the high edge strictly below it. A band
    /// whose low edge is 0 Hz restricts the spectrum but skips the filter,
    /// since a bandpass needs a positive low edge.
    pub fn analyze(&self, signal: &Signal, band: Option<FrequencyBand>) -> Result<Analysis> {
        signal.require_samples("analysis")?;
        let filter_band = band.filter(|b| self.options.filter && b.low_hz > 0.0);
        match (band, filter_band) {
            (_, Some(b)) => b.check_nyquist(signal.sample_rate())?,
            (Some(b), None) => b.check_within_nyquist(signal.sample_rate())?,
            (None, None) => {}
        }

        let metrics = Metrics::compute(signal)?;

        let filtered = match filter_band {
            Some(band) => {
                BandpassFilter::design(band, signal.sample_rate(), self.options.filter_order)?
                    .apply(signal)?
            }
            None if band.is_some() && self.options.filter => {
                tracing::debug!("band starts at 0 Hz, skipping bandpass filter");
                signal.clone()
            }
            None => signal.clone(),
        };

        let windowed = self.options.window.apply(&filtered)?;
        let full = Spectrum::from_signal(&windowed)?;
        let spectrum = match band {
            Some(band) => full.restrict(band),
            None => full,
        };

        let peaks = self.options.peaks.detect(&spectrum);

        tracing::debug!(
            points = spectrum.len(),
            peaks = peaks.len(),
            rms = metrics.rms,
            flatness = metrics.flatness,
            "analysis complete"
        );

        Ok(Analysis {
            spectrum,
            peaks,
            metrics,
        })
    }
}

/// Analyze a signal with default options.
pub fn analyze(signal: &Signal, band: Option<FrequencyBand>) -> Result<Analysis> {
    SpectrumAnalyzer::default().analyze(signal, band)
}
