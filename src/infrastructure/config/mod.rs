pub mod settings;

pub use settings::{PlaybackSettings, SettingsError, TtsSettings};

use crate::domain::text::{BACKEND_MAX_INPUT_BYTES, DEFAULT_MAX_CHUNK_BYTES};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub config_path: PathBuf,
    pub cache_dir: PathBuf,
    pub search_base: PathBuf,
    /// Searched in order; the first one is preferred when ranking
    pub content_roots: Vec<PathBuf>,
    pub max_chunk_bytes: usize,
    pub provider: TtsProvider,
    pub log_format: LogFormat,
    // AWS Polly
    pub aws_region: String,
    // OpenAI
    pub openai_model: String,
    pub openai_voice: String,
    // Google Cloud
    pub google_api_key: Option<String>,
    pub google_access_token: Option<String>,
    // External tools
    pub ffmpeg_bin: Option<String>,
    pub player_bin: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtsProvider {
    Google,
    Polly,
    OpenAi,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let max_chunk_bytes: usize = env::var("TTS_MAX_CHUNK_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_CHUNK_BYTES.to_string())
            .parse()?;
        if max_chunk_bytes == 0 || max_chunk_bytes > BACKEND_MAX_INPUT_BYTES {
            return Err(format!(
                "TTS_MAX_CHUNK_BYTES must be between 1 and {}, got {}",
                BACKEND_MAX_INPUT_BYTES, max_chunk_bytes
            )
            .into());
        }

        let provider = match env::var("TTS_PROVIDER")
            .unwrap_or_else(|_| "google".to_string())
            .to_lowercase()
            .as_str()
        {
            "google" => TtsProvider::Google,
            "polly" => TtsProvider::Polly,
            "openai" => TtsProvider::OpenAi,
            other => return Err(format!("unknown TTS_PROVIDER: {}", other).into()),
        };

        let config = Config {
            config_path: env::var("TTS_CONFIG_PATH")
                .unwrap_or_else(|_| "dev/config/tts-config.json".to_string())
                .into(),
            cache_dir: env::var("TTS_CACHE_DIR")
                .unwrap_or_else(|_| "dev/cache/audio-cache".to_string())
                .into(),
            search_base: env::var("TTS_SEARCH_BASE")
                .unwrap_or_else(|_| ".".to_string())
                .into(),
            content_roots: parse_roots(
                &env::var("TTS_CONTENT_ROOTS").unwrap_or_else(|_| "content/characters".to_string()),
            ),
            max_chunk_bytes,
            provider,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            openai_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            openai_voice: env::var("OPENAI_TTS_VOICE").unwrap_or_else(|_| "alloy".to_string()),
            google_api_key: non_empty_var("GOOGLE_TTS_API_KEY"),
            google_access_token: non_empty_var("GOOGLE_ACCESS_TOKEN"),
            ffmpeg_bin: non_empty_var("FFMPEG_BIN"),
            player_bin: non_empty_var("TTS_PLAYER"),
        };

        Ok(config)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Comma separated list of content roots, blanks ignored
fn parse_roots(value: &str) -> Vec<PathBuf> {
    value
        .split(',')
        .map(str::trim)
        .filter(|root| !root.is_empty())
        .map(PathBuf::from)
        .collect()
}
