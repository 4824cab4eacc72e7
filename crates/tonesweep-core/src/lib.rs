//! Tonesweep Core - shared types for test-tone analysis and synthesis
//!
//! This crate holds the small set of types every other tonesweep crate agrees on:
//!
//! - [`Signal`] - an owned, single-channel block of samples with its sample rate
//! - [`FrequencyBand`] - a validated `[low_hz, high_hz]` interval below Nyquist
//! - [`Biquad`] - a second-order IIR section used to build cascaded filters
//! - [`Error`] / [`Result`] - numeric and parameter errors shared by the pipeline
//!
//! # Example
//!
//! ```rust
//! use tonesweep_core::{FrequencyBand, Signal};
//!
//! let signal = Signal::new(vec![0.0; 480], 48000).unwrap();
//! assert!((signal.duration_secs() - 0.01).abs() < 1e-9);
//!
//! let band = FrequencyBand::new(15000.0, 19000.0).unwrap();
//! band.check_nyquist(signal.sample_rate()).unwrap();
//! ```

pub mod band;
pub mod biquad;
pub mod error;
pub mod signal;

pub use band::FrequencyBand;
pub use biquad::Biquad;
pub use error::{Error, Result};
pub use signal::Signal;
