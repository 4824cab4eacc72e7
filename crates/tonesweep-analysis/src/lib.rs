//! Tonesweep Analysis - spectral analysis of frequency-response test tones
//!
//! This crate turns raw sampled audio into a calibrated, peak-annotated
//! spectrum plus scalar quality metrics:
//!
//! - [`fft`] - FFT wrapper and symmetric tapering windows
//! - [`filter`] - Butterworth bandpass as cascaded second-order sections
//! - [`spectrum`] - Normalized magnitude spectrum in dB
//! - [`peaks`] - Greedy local-maximum peak detection
//! - [`metrics`] - RMS, spectral flatness, total power
//! - [`pipeline`] - All of the above in one call
//! - [`export`] - CSV and JSON output of results
//!
//! ## Example Workflow
//!
//! ```rust
//! use tonesweep_analysis::analyze;
//! use tonesweep_core::{FrequencyBand, Signal};
//!
//! // One second of a 17 kHz tone at 48 kHz
//! let samples: Vec<f32> = (0..48000)
//!     .map(|i| 0.9 * (2.0 * std::f32::consts::PI * 17000.0 * i as f32 / 48000.0).sin())
//!     .collect();
//! let signal = Signal::new(samples, 48000).unwrap();
//!
//! let band = FrequencyBand::new(15000.0, 19000.0).unwrap();
//! let analysis = analyze(&signal, Some(band)).unwrap();
//!
//! println!("RMS {:.3}, flatness {:.3}", analysis.metrics.rms, analysis.metrics.flatness);
//! for peak in &analysis.peaks {
//!     println!("{:.1} Hz at {:.1} dB", peak.frequency_hz, peak.magnitude_db);
//! }
//! ```

pub mod export;
pub mod fft;
pub mod filter;
pub mod metrics;
pub mod peaks;
pub mod pipeline;
pub mod spectrum;

// Re-export main types
pub use fft::{Fft, Window};
pub use filter::{BandpassFilter, bandpass};
pub use metrics::{Metrics, rms, spectral_flatness, total_power};
pub use peaks::{PeakAnnotation, PeakDetector, find_peaks};
pub use pipeline::{Analysis, AnalysisOptions, SpectrumAnalyzer, analyze};
pub use spectrum::Spectrum;
