//! Optional TOML settings file.
//!
//! Every field is optional; CLI flags win over file values, and anything left
//! unspecified falls back to built-in defaults in `run::resolve_config`.
//!
//! ```toml
//! [window]
//! width = 1920
//! height = 1080
//! title = "pulsegrid"
//! antialias = "4"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use renderer::Antialiasing;
use serde::{Deserialize, Serialize};

use crate::cli::parse_antialias;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub window: WindowSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WindowSettings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: Option<String>,
    pub antialias: Option<String>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Window size from the file, if both components are present.
    pub fn size(&self) -> Option<(u32, u32)> {
        match (self.window.width, self.window.height) {
            (Some(width), Some(height)) => Some((width, height)),
            _ => None,
        }
    }

    /// Anti-aliasing mode from the file, parsed with the CLI grammar.
    pub fn antialias(&self) -> Result<Option<Antialiasing>, SettingsError> {
        self.window
            .antialias
            .as_deref()
            .map(|raw| parse_antialias(raw).map_err(SettingsError::Invalid))
            .transpose()
    }

    fn validate(&self) -> Result<(), SettingsError> {
        match (self.window.width, self.window.height) {
            (Some(0), _) | (_, Some(0)) => {
                return Err(SettingsError::Invalid(
                    "window dimensions must be nonzero".to_string(),
                ));
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(SettingsError::Invalid(
                    "window width and height must be given together".to_string(),
                ));
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_a_full_settings_file() {
        let settings = Settings::parse(
            r#"
            [window]
            width = 1920
            height = 1080
            title = "demo wall"
            antialias = "4"
            "#,
        )
        .unwrap();

        assert_eq!(settings.size(), Some((1920, 1080)));
        assert_eq!(settings.window.title.as_deref(), Some("demo wall"));
        assert_eq!(
            settings.antialias().unwrap(),
            Some(Antialiasing::Samples(4))
        );
    }

    #[test]
    fn empty_input_yields_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.size(), None);
        assert_eq!(settings.antialias().unwrap(), None);
        assert!(settings.window.title.is_none());
    }

    #[test]
    fn rejects_partial_window_size() {
        let err = Settings::parse("[window]\nwidth = 800\n").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let err = Settings::parse("[window]\nwidth = 0\nheight = 600\n").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_antialias_mode() {
        let settings = Settings::parse("[window]\nantialias = \"fancy\"\n").unwrap();
        assert!(matches!(
            settings.antialias(),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\nwidth = 640\nheight = 480").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.size(), Some((640, 480)));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = Settings::load(Path::new("/nonexistent/pulsegrid.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/pulsegrid.toml"));
    }
}
