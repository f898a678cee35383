use super::tts_repository::TtsRepository;
use crate::domain::tts::{AudioEncoding, AudioSettings, VoiceInfo, VoiceSettings};
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// Polly voices that support the neural engine
const NEURAL_VOICES: &[&str] = &[
    // English
    "Joanna", "Matthew", "Ivy", "Kendra", "Kimberly", "Salli", "Joey", "Justin", "Kevin",
    // Spanish
    "Lupe", "Pedro", "Sergio", // French
    "Lea", "Remi", // German
    "Vicki", "Daniel", // Italian
    "Bianca", "Adriano", // Portuguese
    "Ines", "Camila", "Vitoria", "Thiago",
];

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Polly voice for the configured settings.
    ///
    /// A configured name that is a known neural Polly voice is used as is;
    /// otherwise (e.g. a Google voice name) the language default applies.
    pub fn voice_for(voice: &VoiceSettings) -> &'static str {
        if let Some(known) = NEURAL_VOICES.iter().find(|known| **known == voice.name) {
            return known;
        }

        match voice.language_prefix() {
            "es" => "Lupe",
            "fr" => "Lea",
            "de" => "Vicki",
            "it" => "Bianca",
            "pt" => "Ines",
            _ => "Joanna",
        }
    }

    pub fn output_format(encoding: AudioEncoding) -> Result<OutputFormat, String> {
        match encoding {
            AudioEncoding::Mp3 => Ok(OutputFormat::Mp3),
            AudioEncoding::OggOpus => Ok(OutputFormat::OggVorbis),
            other => Err(format!("AWS Polly cannot produce {:?} audio", other)),
        }
    }

    /// Call AWS Polly to synthesize a single text
    async fn call_polly(
        &self,
        text: &str,
        voice_name: &str,
        output_format: OutputFormat,
    ) -> Result<Vec<u8>, String> {
        let voice_id = VoiceId::from(voice_name);
        let engine = Engine::Neural;

        tracing::info!(
            voice = voice_name,
            engine = ?engine,
            output_format = ?output_format,
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .output_format(output_format)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    voice = voice_name,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {:?}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        Ok(audio_stream.into_bytes().to_vec())
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    fn provider(&self) -> &'static str {
        "polly"
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSettings,
        audio: &AudioSettings,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let output_format = Self::output_format(audio.audio_encoding)?;
        let voice_name = Self::voice_for(voice);
        if voice_name != voice.name {
            tracing::debug!(
                configured_voice = %voice.name,
                voice = voice_name,
                "Configured voice is not a Polly neural voice, using language default"
            );
        }

        let audio_data = self.call_polly(text, voice_name, output_format).await?;

        tracing::info!(
            provider = "polly",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }

    async fn list_voices(&self, language_prefix: &str) -> Result<Vec<VoiceInfo>, String> {
        let response = self
            .polly_client
            .describe_voices()
            .engine(Engine::Neural)
            .send()
            .await
            .map_err(|e| format!("AWS Polly error: {:?}", e))?;

        let voices = response
            .voices()
            .iter()
            .filter_map(|voice| {
                let name = voice.id()?.as_str().to_string();
                let language_code = voice.language_code()?.as_str().to_string();
                if !language_code.starts_with(language_prefix) {
                    return None;
                }
                Some(VoiceInfo {
                    name,
                    language_codes: vec![language_code],
                    gender: voice
                        .gender()
                        .map(|gender| gender.as_str().to_uppercase())
                        .unwrap_or_default(),
                })
            })
            .collect();

        Ok(voices)
    }
}
