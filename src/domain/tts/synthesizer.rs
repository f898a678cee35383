use super::cache_key::CacheKey;
use super::error::TtsServiceError;
use super::model::{AudioSettings, VoiceSettings};
use crate::infrastructure::repositories::{AudioCacheRepository, TtsRepository};
use std::path::PathBuf;
use std::sync::Arc;

/// A cache entry for one piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedArtifact {
    pub path: PathBuf,
    /// The entry existed before this call
    pub from_cache: bool,
}

/// Cache-addressed synthesis: the backend is called at most once per
/// distinct (text, voice) pair
pub struct Synthesizer {
    tts_repo: Arc<dyn TtsRepository>,
    cache_repo: Arc<AudioCacheRepository>,
    audio: AudioSettings,
}

impl Synthesizer {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        cache_repo: Arc<AudioCacheRepository>,
        audio: AudioSettings,
    ) -> Self {
        Self {
            tts_repo,
            cache_repo,
            audio,
        }
    }

    pub fn audio(&self) -> &AudioSettings {
        &self.audio
    }

    /// Key of the audio for `text` spoken by `voice` on this backend
    pub fn cache_key(&self, text: &str, voice: &VoiceSettings) -> CacheKey {
        CacheKey::derive(text, &CacheKey::voice_id(self.tts_repo.provider(), &voice.name))
    }

    pub async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSettings,
    ) -> Result<SynthesizedArtifact, TtsServiceError> {
        let cache_key = self.cache_key(text, voice);
        let encoding = self.audio.audio_encoding;

        if let Some(path) = self.cache_repo.lookup(&cache_key, encoding).await {
            tracing::info!(
                cache_key = %cache_key,
                path = %path.display(),
                "Using cached audio"
            );
            return Ok(SynthesizedArtifact {
                path,
                from_cache: true,
            });
        }

        let start_time = std::time::Instant::now();

        let audio_data = self
            .tts_repo
            .synthesize(text, voice, &self.audio)
            .await
            .map_err(TtsServiceError::Synthesis)?;

        if audio_data.is_empty() {
            return Err(TtsServiceError::Synthesis(format!(
                "{} returned no audio",
                self.tts_repo.provider()
            )));
        }

        let path = self
            .cache_repo
            .store(&cache_key, encoding, &audio_data)
            .await
            .map_err(TtsServiceError::Dependency)?;

        tracing::info!(
            provider = self.tts_repo.provider(),
            cache_key = %cache_key,
            voice = %voice.name,
            text_bytes = text.len(),
            audio_size_bytes = audio_data.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Audio generated"
        );

        Ok(SynthesizedArtifact {
            path,
            from_cache: false,
        })
    }
}
