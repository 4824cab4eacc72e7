//! Sweep metadata carried in file names.
//!
//! Generated files are named after their content, for example
//! `15.000kHz_to_19.000kHz_spacing_0.500kHz_regular.wav`. [`parse_filename`]
//! recovers the range from such a name; the `*_filename` builders produce
//! them.

use crate::error::ConfigError;
use crate::quality::Quality;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tonesweep_core::FrequencyBand;

/// `<start>kHz_to_<end>kHz[_spacing_<step>kHz][_changing|_single][_regular|_max]`
const SWEEP_PATTERN: &str = r"(\d+(?:\.\d+)?)kHz_to_(\d+(?:\.\d+)?)kHz(?:_spacing_(\d+(?:\.\d+)?)kHz)?(?:_(?:changing|single))?(?:_(regular|max))?";

static SWEEP_REGEX: OnceLock<Regex> = OnceLock::new();

fn sweep_regex() -> &'static Regex {
    SWEEP_REGEX.get_or_init(|| Regex::new(SWEEP_PATTERN).expect("invalid regex pattern"))
}

/// Range information recovered from a file name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepMetadata {
    /// First frequency in Hz
    pub start_hz: f64,
    /// Last frequency in Hz
    pub end_hz: f64,
    /// Tone spacing in Hz, when the name carries one
    pub spacing_hz: Option<f64>,
    /// Quality label, when the name carries one
    pub quality: Option<Quality>,
}

impl SweepMetadata {
    /// The swept range as an analysis band.
    pub fn band(&self) -> Result<FrequencyBand, ConfigError> {
        Ok(FrequencyBand::new(self.start_hz as f32, self.end_hz as f32)?)
    }
}

/// Extract sweep metadata from a file name or path.
///
/// Only the final path component is inspected. A name without the
/// `<start>kHz_to_<end>kHz` pattern yields [`ConfigError::FormatMismatch`].
pub fn parse_filename(name: impl AsRef<Path>) -> Result<SweepMetadata, ConfigError> {
    let path = name.as_ref();
    let file_name = path
        .file_name()
        .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy());

    let caps = sweep_regex()
        .captures(&file_name)
        .ok_or_else(|| ConfigError::FormatMismatch(file_name.to_string()))?;

    let khz = |i: usize| -> Option<f64> {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(|v| v * 1000.0)
    };
    let (Some(start_hz), Some(end_hz)) = (khz(1), khz(2)) else {
        return Err(ConfigError::FormatMismatch(file_name.to_string()));
    };

    Ok(SweepMetadata {
        start_hz,
        end_hz,
        spacing_hz: khz(3),
        quality: caps.get(4).and_then(|m| m.as_str().parse().ok()),
    })
}

/// `{f:.3}kHz_single_{quality}.wav`
pub fn single_filename(frequency_khz: f64, quality: Quality) -> String {
    format!("{frequency_khz:.3}kHz_single_{quality}.wav")
}

/// `{start:.3}kHz_to_{end:.3}kHz_spacing_{step:.3}kHz_{quality}.wav`
pub fn range_filename(start_khz: f64, end_khz: f64, spacing_khz: f64, quality: Quality) -> String {
    format!("{start_khz:.3}kHz_to_{end_khz:.3}kHz_spacing_{spacing_khz:.3}kHz_{quality}.wav")
}

/// `{start:.3}kHz_to_{end:.3}kHz_changing_{quality}.wav`
pub fn changing_filename(start_khz: f64, end_khz: f64, quality: Quality) -> String {
    format!("{start_khz:.3}kHz_to_{end_khz:.3}kHz_changing_{quality}.wav")
}

/// Annotation track path that accompanies an audio file.
pub fn annotation_path(audio_path: impl AsRef<Path>) -> PathBuf {
    audio_path.as_ref().with_extension("srt")
}
