//! Generation settings.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tonesweep_synth::{SequenceMode, SweepRange, ToneSequence, ToneSpec};

use crate::error::ConfigError;
use crate::filename::{changing_filename, range_filename, single_filename};
use crate::quality::Quality;

/// What kind of file to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerateMode {
    /// One tone
    Single,
    /// Stepped sweep streamed to disk tone by tone, with annotations
    #[default]
    Range,
    /// Stepped sweep rendered in memory and written at once, with annotations
    Changing,
}

/// A fully specified generation request.
///
/// Frequencies are in kHz, as they appear in file names. `frequency_khz`
/// is used by [`GenerateMode::Single`]; the range fields by the sweep modes.
///
/// # TOML Format
///
/// ```toml
/// quality = "regular"
/// mode = "range"
/// start_khz = 15.0
/// end_khz = 19.0
/// spacing_khz = 0.5
/// duration_s = 1.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerateConfig {
    /// Output sample rate and bit depth.
    pub quality: Quality,
    /// Single tone or sweep.
    pub mode: GenerateMode,
    /// Tone frequency for single mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_khz: Option<f64>,
    /// First sweep frequency.
    pub start_khz: f64,
    /// Last sweep frequency.
    pub end_khz: f64,
    /// Sweep step.
    pub spacing_khz: f64,
    /// Length of the single tone, or of each sweep tone.
    pub duration_s: f64,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            quality: Quality::Regular,
            mode: GenerateMode::Range,
            frequency_khz: None,
            start_khz: 15.0,
            end_khz: 19.0,
            spacing_khz: 0.5,
            duration_s: 1.0,
        }
    }
}

impl GenerateConfig {
    /// Load from a TOML file and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string and validate.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that the fields the mode needs are present and in range.
    ///
    /// Tones must sit below the Nyquist frequency of the chosen quality, and
    /// a sweep must end above where it starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let nyquist_khz = f64::from(self.quality.sample_rate()) / 2000.0;
        let below_nyquist = |field: &'static str, khz: f64| {
            if khz < nyquist_khz {
                Ok(())
            } else {
                Err(ConfigError::validation(
                    field,
                    format!("{khz} kHz is not below Nyquist ({nyquist_khz} kHz) for {} quality", self.quality),
                ))
            }
        };

        match self.mode {
            GenerateMode::Single => {
                let freq = self.frequency_khz.ok_or_else(|| {
                    ConfigError::validation("frequency_khz", "required for single mode")
                })?;
                below_nyquist("frequency_khz", freq)?;
            }
            GenerateMode::Range | GenerateMode::Changing => {
                // The swept range doubles as the analysis band read back
                // from the file name, so it needs a nonzero width
                if self.end_khz <= self.start_khz {
                    return Err(ConfigError::validation(
                        "end_khz",
                        format!(
                            "sweep end ({} kHz) must be above its start ({} kHz)",
                            self.end_khz, self.start_khz
                        ),
                    ));
                }
                below_nyquist("end_khz", self.end_khz)?;
            }
        }
        self.sequence().map(|_| ())
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.quality.sample_rate()
    }

    /// Build the tone sequence this config describes.
    pub fn sequence(&self) -> Result<ToneSequence, ConfigError> {
        let rate = self.sample_rate();
        let sequence = match self.mode {
            GenerateMode::Single => {
                let freq = self.frequency_khz.ok_or_else(|| {
                    ConfigError::validation("frequency_khz", "required for single mode")
                })?;
                ToneSequence::single(ToneSpec::new(freq * 1000.0, self.duration_s)?, rate)?
            }
            GenerateMode::Range => {
                ToneSequence::sweep(&self.range()?, self.duration_s, rate, SequenceMode::Segmented)?
            }
            GenerateMode::Changing => ToneSequence::sweep(
                &self.range()?,
                self.duration_s,
                rate,
                SequenceMode::Continuous,
            )?,
        };
        Ok(sequence)
    }

    /// Sweep range in Hz.
    pub fn range(&self) -> Result<SweepRange, ConfigError> {
        Ok(SweepRange::new(
            self.start_khz * 1000.0,
            self.end_khz * 1000.0,
            self.spacing_khz * 1000.0,
        )?)
    }

    /// Output file name for this request.
    pub fn file_name(&self) -> String {
        match self.mode {
            GenerateMode::Single => {
                single_filename(self.frequency_khz.unwrap_or_default(), self.quality)
            }
            GenerateMode::Range => {
                range_filename(self.start_khz, self.end_khz, self.spacing_khz, self.quality)
            }
            GenerateMode::Changing => changing_filename(self.start_khz, self.end_khz, self.quality),
        }
    }

    /// Whether an annotation track accompanies the audio.
    pub fn writes_annotations(&self) -> bool {
        self.mode != GenerateMode::Single
    }
}
