//! Where the analysis band comes from.
//!
//! A band can be typed in by the user, stored in a config file, or read off
//! a generated file's name. Each of these is a [`BandSource`]; callers list
//! them in priority order and [`resolve_band`] takes the first one that has
//! an answer. Nothing is consulted implicitly.

use std::path::{Path, PathBuf};
use tonesweep_core::FrequencyBand;

use crate::analysis_config::AnalysisConfig;
use crate::error::ConfigError;
use crate::filename::parse_filename;

/// A provider that may know the band to analyze.
pub trait BandSource {
    /// Short name for logs and reports.
    fn name(&self) -> &'static str;

    /// The band, `Ok(None)` if this source has nothing to say, or an error
    /// if it has something to say but it is invalid.
    fn band(&self) -> Result<Option<FrequencyBand>, ConfigError>;
}

/// Band edges given explicitly, e.g. on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualBand {
    /// Lower edge in Hz.
    pub low_hz: Option<f32>,
    /// Upper edge in Hz.
    pub high_hz: Option<f32>,
}

impl ManualBand {
    /// Both edges, or neither.
    pub fn new(low_hz: Option<f32>, high_hz: Option<f32>) -> Self {
        Self { low_hz, high_hz }
    }
}

impl BandSource for ManualBand {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn band(&self) -> Result<Option<FrequencyBand>, ConfigError> {
        match (self.low_hz, self.high_hz) {
            (Some(low), Some(high)) => Ok(Some(FrequencyBand::new(low, high)?)),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::validation(
                "high_hz",
                "an upper edge is required when a lower edge is given",
            )),
            (None, Some(_)) => Err(ConfigError::validation(
                "low_hz",
                "a lower edge is required when an upper edge is given",
            )),
        }
    }
}

/// The `[band]` table of an analysis config.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBand<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> ConfigBand<'a> {
    /// Read the band from `config`.
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }
}

impl BandSource for ConfigBand<'_> {
    fn name(&self) -> &'static str {
        "config file"
    }

    fn band(&self) -> Result<Option<FrequencyBand>, ConfigError> {
        self.config.band.map(|b| b.to_band()).transpose()
    }
}

/// Sweep range encoded in an audio file's name.
///
/// A name without sweep metadata, or whose range has no width, is not an
/// error here; the source simply has no band and the next one is tried.
#[derive(Debug, Clone)]
pub struct FilenameBand {
    path: PathBuf,
}

impl FilenameBand {
    /// Parse the name of the file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl BandSource for FilenameBand {
    fn name(&self) -> &'static str {
        "file name"
    }

    fn band(&self) -> Result<Option<FrequencyBand>, ConfigError> {
        match parse_filename(&self.path) {
            Ok(meta) if meta.end_hz <= meta.start_hz => {
                tracing::warn!(
                    file = %self.path.display(),
                    start_hz = meta.start_hz,
                    end_hz = meta.end_hz,
                    "sweep range in file name has no width"
                );
                Ok(None)
            }
            Ok(meta) => meta.band().map(Some),
            Err(ConfigError::FormatMismatch(name)) => {
                tracing::warn!(file = %name, "file name carries no sweep metadata");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// A band together with the source that supplied it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBand {
    /// The band.
    pub band: FrequencyBand,
    /// [`BandSource::name`] of the supplier.
    pub source: &'static str,
}

/// Ask each source in turn; the first band found wins.
///
/// Returns `Ok(None)` when no source has a band. An invalid band from any
/// source consulted before a match is an error, not a fallthrough.
pub fn resolve_band(sources: &[&dyn BandSource]) -> Result<Option<ResolvedBand>, ConfigError> {
    for source in sources {
        if let Some(band) = source.band()? {
            tracing::debug!(
                source = source.name(),
                low_hz = band.low_hz,
                high_hz = band.high_hz,
                "resolved analysis band"
            );
            return Ok(Some(ResolvedBand {
                band,
                source: source.name(),
            }));
        }
    }
    Ok(None)
}
