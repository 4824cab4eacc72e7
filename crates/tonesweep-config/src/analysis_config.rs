//! Analysis settings file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tonesweep_analysis::filter::{DEFAULT_ORDER, MAX_ORDER};
use tonesweep_analysis::peaks::{DEFAULT_MIN_DISTANCE_BINS, DEFAULT_MIN_HEIGHT_DB};
use tonesweep_analysis::{AnalysisOptions, PeakDetector, Window};
use tonesweep_core::FrequencyBand;

use crate::error::ConfigError;

/// Band edges as written in a config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BandConfig {
    /// Lower edge in Hz.
    pub low_hz: f32,
    /// Upper edge in Hz.
    pub high_hz: f32,
}

impl BandConfig {
    /// Validated band.
    pub fn to_band(self) -> Result<FrequencyBand, ConfigError> {
        Ok(FrequencyBand::new(self.low_hz, self.high_hz)?)
    }
}

impl From<FrequencyBand> for BandConfig {
    fn from(band: FrequencyBand) -> Self {
        Self {
            low_hz: band.low_hz,
            high_hz: band.high_hz,
        }
    }
}

/// Peak detector settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PeaksConfig {
    /// Height floor in dB.
    pub min_height_db: f32,
    /// Minimum separation in FFT bins (not Hz).
    pub min_distance_bins: usize,
}

impl Default for PeaksConfig {
    fn default() -> Self {
        Self {
            min_height_db: DEFAULT_MIN_HEIGHT_DB,
            min_distance_bins: DEFAULT_MIN_DISTANCE_BINS,
        }
    }
}

/// Everything the analysis pipeline can be told, in one explicit struct.
///
/// # TOML Format
///
/// ```toml
/// filter = true
/// filter_order = 5
/// window = "hann"
///
/// [band]
/// low_hz = 15000.0
/// high_hz = 19000.0
///
/// [peaks]
/// min_height_db = -80.0
/// min_distance_bins = 100
/// ```
///
/// Every key is optional; missing keys take the defaults shown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Bandpass-filter before the transform.
    pub filter: bool,
    /// Butterworth order of the bandpass.
    pub filter_order: usize,
    /// Window name: `hann`, `hamming`, or `blackman`.
    pub window: String,
    /// Band of interest; absent means "ask another source".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<BandConfig>,
    /// Peak detector settings.
    pub peaks: PeaksConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            filter: true,
            filter_order: DEFAULT_ORDER,
            window: Window::default().name().to_string(),
            band: None,
            peaks: PeaksConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load from a TOML file and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded analysis config");
        Ok(config)
    }

    /// Parse from a TOML string and validate.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
        std::fs::write(path, self.to_toml()?).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.options().map(|_| ())?;
        if let Some(band) = self.band {
            band.to_band()?;
        }
        Ok(())
    }

    /// Parsed window.
    pub fn window(&self) -> Result<Window, ConfigError> {
        Window::from_name(&self.window).ok_or_else(|| {
            ConfigError::validation(
                "window",
                format!("unknown window '{}', expected hann, hamming, or blackman", self.window),
            )
        })
    }

    /// Pipeline options described by this config.
    pub fn options(&self) -> Result<AnalysisOptions, ConfigError> {
        if !(1..=MAX_ORDER).contains(&self.filter_order) {
            return Err(ConfigError::validation(
                "filter_order",
                format!("must be between 1 and {MAX_ORDER}, got {}", self.filter_order),
            ));
        }
        Ok(AnalysisOptions {
            filter: self.filter,
            filter_order: self.filter_order,
            window: self.window()?,
            peaks: PeakDetector::new(self.peaks.min_height_db, self.peaks.min_distance_bins)?,
        })
    }
}
