use crate::domain::tts::{AudioSettings, VoiceSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// `playback` section of the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    pub auto_play: bool,
    /// Report the cached artifact path after a run
    pub save_audio: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            auto_play: true,
            save_audio: true,
        }
    }
}

/// User-editable synthesis settings.
///
/// Every section and key has a default, so a partial file only overrides the
/// keys it names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsSettings {
    pub voice: VoiceSettings,
    pub audio_config: AudioSettings,
    pub playback: PlaybackSettings,
}

impl TtsSettings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), SettingsError> {
        let to_write_error = |source| SettingsError::Write {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(to_write_error)?;
        }

        let mut content = serde_json::to_string_pretty(self).map_err(|e| SettingsError::Write {
            path: path.display().to_string(),
            source: e.into(),
        })?;
        content.push('\n');

        std::fs::write(path, content).map_err(to_write_error)
    }

    /// Load settings, never failing.
    ///
    /// A missing file is created with the defaults (a failed write only logs a
    /// warning). An unreadable or malformed file falls back to the defaults.
    pub fn load_or_create(path: &Path) -> Self {
        if !path.exists() {
            let defaults = Self::default();
            match defaults.write(path) {
                Ok(()) => tracing::info!(path = %path.display(), "Created default settings file"),
                Err(e) => tracing::warn!(error = %e, "Could not create default settings file"),
            }
            return defaults;
        }

        match Self::load(path) {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), voice = %settings.voice.name, "Settings loaded");
                settings
            }
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to default settings");
                Self::default()
            }
        }
    }
}
