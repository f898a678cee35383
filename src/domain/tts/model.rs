use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SsmlGender {
    Male,
    Female,
    Neutral,
    SsmlVoiceGenderUnspecified,
}

/// Output encodings understood by the backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    Mp3,
    OggOpus,
    Linear16,
    Mulaw,
    Alaw,
}

impl AudioEncoding {
    /// File extension for artifacts in this encoding
    pub fn extension(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "mp3",
            AudioEncoding::OggOpus => "ogg",
            AudioEncoding::Linear16 | AudioEncoding::Mulaw | AudioEncoding::Alaw => "wav",
        }
    }
}

/// `voice` section of the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub language_code: String,
    pub name: String,
    pub ssml_gender: SsmlGender,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            language_code: "en-US".to_string(),
            name: "en-US-Neural2-D".to_string(),
            ssml_gender: SsmlGender::Male,
        }
    }
}

impl VoiceSettings {
    /// Same settings with a different voice name
    pub fn with_name(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..self.clone()
        }
    }

    /// Primary language subtag, e.g. `en` for `en-US`
    pub fn language_prefix(&self) -> &str {
        self.language_code
            .split('-')
            .next()
            .unwrap_or(&self.language_code)
    }
}

/// `audio_config` section of the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub audio_encoding: AudioEncoding,
    pub speaking_rate: f32,
    pub pitch: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            audio_encoding: AudioEncoding::Mp3,
            speaking_rate: 1.0,
            pitch: 0.0,
        }
    }
}

/// A voice offered by a backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceInfo {
    pub name: String,
    pub language_codes: Vec<String>,
    pub gender: String,
}

/// What a synthesis run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// The whole text was already cached
    Cached { path: PathBuf },
    /// Short text synthesized in one backend call
    Synthesized { path: PathBuf },
    /// Long text synthesized per segment and concatenated
    Assembled { path: PathBuf, segments: usize },
    /// No concatenation tool; only the first segment made it into the output
    AssembledDegraded {
        path: PathBuf,
        segments: usize,
        dropped_segments: usize,
    },
}

impl SynthesisOutcome {
    pub fn path(&self) -> &Path {
        match self {
            SynthesisOutcome::Cached { path }
            | SynthesisOutcome::Synthesized { path }
            | SynthesisOutcome::Assembled { path, .. }
            | SynthesisOutcome::AssembledDegraded { path, .. } => path,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SynthesisOutcome::AssembledDegraded { .. })
    }
}
