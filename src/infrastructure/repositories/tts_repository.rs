use crate::domain::tts::{AudioSettings, VoiceInfo, VoiceSettings};
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Google Cloud, AWS Polly, OpenAI)
///
/// Implementations receive text that already fits the provider's input limit;
/// splitting long documents and merging audio happen above this layer.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Short provider name used in logs
    fn provider(&self) -> &'static str;

    /// Synthesize text to speech with the given voice and audio format
    ///
    /// Returns the encoded audio bytes exactly as the provider produced them
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSettings,
        audio: &AudioSettings,
    ) -> Result<Vec<u8>, String>;

    /// Voices whose language code starts with `language_prefix`
    async fn list_voices(&self, language_prefix: &str) -> Result<Vec<VoiceInfo>, String>;
}
