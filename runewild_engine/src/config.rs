//! Display settings loaded from `settings.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "settings.toml";

/// How text is presented. Owned by the `View`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub colors_enabled: bool,
    /// Wrap width in columns; 0 disables wrapping.
    pub text_width: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            colors_enabled: true,
            text_width: 90,
        }
    }
}

/// Load settings from a TOML file. A missing file yields the defaults.
///
/// # Errors
/// - if the file exists but cannot be read or parsed
pub fn load_settings(path: &Path) -> Result<DisplaySettings> {
    if !path.exists() {
        info!("no settings file at '{}', using defaults", path.display());
        return Ok(DisplaySettings::default());
    }
    let text = fs::read_to_string(path).with_context(|| format!("reading settings from '{}'", path.display()))?;
    let settings: DisplaySettings =
        toml::from_str(&text).with_context(|| format!("parsing settings from '{}'", path.display()))?;
    info!("display settings loaded from '{}': {settings:?}", path.display());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() -> Result<()> {
        let dir = tempdir()?;
        let settings = load_settings(&dir.path().join("settings.toml"))?;
        assert_eq!(settings, DisplaySettings::default());
        Ok(())
    }

    #[test]
    fn partial_file_keeps_other_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("settings.toml");
        fs::write(&path, "colors_enabled = false\n")?;
        let settings = load_settings(&path)?;
        assert!(!settings.colors_enabled);
        assert_eq!(settings.text_width, 90);
        Ok(())
    }

    #[test]
    fn malformed_file_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("settings.toml");
        fs::write(&path, "text_width = \"wide\"\n")?;
        assert!(load_settings(&path).is_err());
        Ok(())
    }
}
