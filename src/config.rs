/// User settings
///
/// Settings are stored as JSON in the user's config directory:
/// - Linux: ~/.config/photo-gallery/settings.json
/// - macOS: ~/Library/Application Support/photo-gallery/settings.json
/// - Windows: %APPDATA%\photo-gallery\settings.json
///
/// Every field is optional in the file; missing fields take their defaults.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::media::thumbnail::THUMBNAIL_SIZE;

const MIN_THUMBNAIL_SIZE: u32 = 64;
const MAX_THUMBNAIL_SIZE: u32 = 1024;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

impl std::str::FromStr for ThemePreference {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemePreference::Dark),
            "light" => Ok(ThemePreference::Light),
            other => Err(Error::Args(format!("unknown theme '{}'", other))),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemePreference,
    /// Edge length of grid thumbnails in pixels
    pub thumbnail_size: u32,
    /// Gap between grid tiles in pixels
    pub grid_spacing: f32,
    /// Manifest file or folder opened at startup
    pub gallery: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemePreference::Dark,
            thumbnail_size: THUMBNAIL_SIZE,
            grid_spacing: 24.0,
            gallery: None,
        }
    }
}

impl Settings {
    /// Path of the settings file, if the platform has a config directory
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("photo-gallery").join("settings.json"))
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(Some(settings)) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Ok(None) => Self::default(),
            Err(err) => {
                tracing::warn!(error = %err, "using default settings");
                Self::default()
            }
        }
    }

    /// Read settings from a file. A missing file is not an error.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Error::io(path, err)),
        };

        Self::from_json(&contents).map(Some)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).map_err(Error::Settings)?;
        Ok(settings.normalized())
    }

    /// Clamp values into their usable ranges
    fn normalized(mut self) -> Self {
        self.thumbnail_size = self
            .thumbnail_size
            .clamp(MIN_THUMBNAIL_SIZE, MAX_THUMBNAIL_SIZE);
        if !self.grid_spacing.is_finite() || self.grid_spacing < 0.0 {
            self.grid_spacing = Self::default().grid_spacing;
        }
        self
    }
}
