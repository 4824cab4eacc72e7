//! Output quality presets.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sample rate and bit depth of generated files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// 48 kHz, 16-bit PCM
    #[default]
    Regular,
    /// 192 kHz, 24-bit PCM
    Max,
}

impl Quality {
    /// Sample rate in Hz.
    pub fn sample_rate(self) -> u32 {
        match self {
            Quality::Regular => 48000,
            Quality::Max => 192000,
        }
    }

    /// Integer PCM bit depth.
    pub fn bits_per_sample(self) -> u16 {
        match self {
            Quality::Regular => 16,
            Quality::Max => 24,
        }
    }

    /// Name used in file names and config files.
    pub fn label(self) -> &'static str {
        match self {
            Quality::Regular => "regular",
            Quality::Max => "max",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Quality {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" | "r" => Ok(Quality::Regular),
            "max" | "m" => Ok(Quality::Max),
            other => Err(ConfigError::validation(
                "quality",
                format!("expected 'regular' or 'max', got '{other}'"),
            )),
        }
    }
}
