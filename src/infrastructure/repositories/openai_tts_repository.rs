use super::tts_repository::TtsRepository;
use crate::domain::tts::{AudioEncoding, AudioSettings, VoiceInfo, VoiceSettings};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

const OPENAI_VOICES: &[&str] = &["alloy", "echo", "fable", "onyx", "nova", "shimmer"];

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    default_voice: String,
}

impl OpenAiTtsRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, default_voice: String) -> Self {
        Self {
            client,
            model,
            default_voice,
        }
    }

    /// OpenAI voice for the configured settings; names it does not know
    /// fall back to the configured default
    pub fn voice_for(&self, voice: &VoiceSettings) -> Voice {
        let requested = voice.name.to_lowercase();
        let name = if OPENAI_VOICES.contains(&requested.as_str()) {
            requested
        } else {
            self.default_voice.to_lowercase()
        };

        match name.as_str() {
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            _ => Voice::Alloy,
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    pub fn response_format(encoding: AudioEncoding) -> Result<SpeechResponseFormat, String> {
        match encoding {
            AudioEncoding::Mp3 => Ok(SpeechResponseFormat::Mp3),
            AudioEncoding::OggOpus => Ok(SpeechResponseFormat::Opus),
            other => Err(format!("OpenAI TTS cannot produce {:?} audio", other)),
        }
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    fn provider(&self) -> &'static str {
        "openai"
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSettings,
        audio: &AudioSettings,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let voice_enum = self.voice_for(voice);

        tracing::info!(
            model = %self.model,
            voice = ?voice_enum,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice: voice_enum,
            response_format: Some(Self::response_format(audio.audio_encoding)?),
            speed: Some(audio.speaking_rate),
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS error: {}", e)
        })?;

        let audio_data = response.bytes.to_vec();

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }

    /// OpenAI voices are multilingual; the prefix does not filter
    async fn list_voices(&self, _language_prefix: &str) -> Result<Vec<VoiceInfo>, String> {
        Ok(OPENAI_VOICES
            .iter()
            .map(|name| VoiceInfo {
                name: name.to_string(),
                language_codes: Vec::new(),
                gender: String::new(),
            })
            .collect())
    }
}
