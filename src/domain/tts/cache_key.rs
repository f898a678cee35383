use super::model::AudioEncoding;
use sha2::{Digest, Sha256};
use std::fmt;

/// Hex digits kept from the digest (96 bits)
const KEY_LENGTH: usize = 24;

/// Content address of a synthesized artifact, derived from (text, voice)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a text spoken by a voice.
    ///
    /// The text is length-prefixed so that no (text, voice) split of the same
    /// bytes can collide.
    pub fn derive(text: &str, voice_name: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((text.len() as u64).to_le_bytes());
        hasher.update(text.as_bytes());
        hasher.update(voice_name.as_bytes());

        let digest = format!("{:x}", hasher.finalize());
        Self(digest[..KEY_LENGTH].to_string())
    }

    /// Voice identifier for keys: the backend name plus its voice name, so
    /// switching backends never reuses another backend's audio
    pub fn voice_id(provider: &str, voice_name: &str) -> String {
        format!("{}:{}", provider, voice_name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Cache file name for an artifact in the given encoding
    pub fn file_name(&self, encoding: AudioEncoding) -> String {
        format!("tts-{}.{}", self.0, encoding.extension())
    }

    /// File name for first-segment-only output, never served as a cache hit
    pub fn degraded_file_name(&self, encoding: AudioEncoding) -> String {
        format!("tts-{}.degraded.{}", self.0, encoding.extension())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
