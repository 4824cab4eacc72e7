//! Configuration for tonesweep.
//!
//! Every setting the analysis and generation pipelines take is spelled out in
//! an explicit struct that is validated before use:
//!
//! - [`AnalysisConfig`] - band, filter, window, and peak settings (TOML)
//! - [`GenerateConfig`] - quality, mode, and sweep range (TOML)
//! - [`Quality`] - the `regular` and `max` output presets
//! - [`parse_filename`] - sweep metadata recovered from generated file names
//! - [`BandSource`] / [`resolve_band`] - ordered providers for the analysis band
//! - [`paths`] - platform-specific config locations
//!
//! # Example
//!
//! ```rust
//! use tonesweep_config::{AnalysisConfig, ConfigBand, FilenameBand, ManualBand, resolve_band};
//!
//! let config = AnalysisConfig::default();
//! let manual = ManualBand::default();
//! let from_name = FilenameBand::new("15.000kHz_to_19.000kHz_spacing_0.500kHz_regular.wav");
//!
//! let resolved = resolve_band(&[&manual, &ConfigBand::new(&config), &from_name])
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(resolved.source, "file name");
//! assert_eq!(resolved.band.low_hz, 15000.0);
//! ```

mod analysis_config;
mod band_source;
mod error;
mod filename;
mod generate_config;
mod quality;

/// Platform-specific configuration paths.
pub mod paths;

pub use analysis_config::{AnalysisConfig, BandConfig, PeaksConfig};
pub use band_source::{BandSource, ConfigBand, FilenameBand, ManualBand, ResolvedBand, resolve_band};
pub use error::ConfigError;
pub use filename::{
    SweepMetadata, annotation_path, changing_filename, parse_filename, range_filename,
    single_filename,
};
pub use generate_config::{GenerateConfig, GenerateMode};
pub use paths::{default_analysis_config_path, load_analysis_config_if_present, user_config_dir};
pub use quality::Quality;
