//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/tonesweep/`
//! - macOS: `~/Library/Application Support/tonesweep/`
//! - Windows: `%APPDATA%\tonesweep\`

use std::path::{Path, PathBuf};

use crate::analysis_config::AnalysisConfig;
use crate::error::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "tonesweep";

/// File name of the default analysis config.
pub const ANALYSIS_CONFIG_FILE: &str = "analysis.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Location of the default analysis config.
pub fn default_analysis_config_path() -> PathBuf {
    user_config_dir().join(ANALYSIS_CONFIG_FILE)
}

/// Ensures the user config directory exists.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// Load the analysis config at `path` if the file exists.
///
/// A missing file is `Ok(None)`; an unreadable or invalid one is an error.
pub fn load_analysis_config_if_present(
    path: impl AsRef<Path>,
) -> Result<Option<AnalysisConfig>, ConfigError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(None);
    }
    AnalysisConfig::load(path).map(Some)
}
