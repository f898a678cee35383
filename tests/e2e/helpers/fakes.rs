use async_trait::async_trait;
use markdown_tts::domain::tts::{AudioSettings, VoiceInfo, VoiceSettings};
use markdown_tts::infrastructure::audio::AudioConcatenator;
use markdown_tts::infrastructure::repositories::TtsRepository;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Audio the fake backend returns for a text
pub fn fake_audio(text: &str) -> Vec<u8> {
    format!("[{}]", text).into_bytes()
}

/// Speech backend that records every request
#[derive(Default)]
pub struct FakeTtsRepository {
    provider: Option<&'static str>,
    calls: Mutex<Vec<String>>,
    fail_when_contains: Mutex<Option<String>>,
}

impl FakeTtsRepository {
    /// A backend reporting another provider name
    pub fn named(provider: &'static str) -> Self {
        Self {
            provider: Some(provider),
            ..Self::default()
        }
    }

    /// Texts sent to the backend, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Fail any request whose text contains `needle`
    pub fn fail_when_contains(&self, needle: &str) {
        *self.fail_when_contains.lock() = Some(needle.to_string());
    }
}

#[async_trait]
impl TtsRepository for FakeTtsRepository {
    fn provider(&self) -> &'static str {
        self.provider.unwrap_or("fake")
    }

    async fn synthesize(
        &self,
        text: &str,
        _voice: &VoiceSettings,
        _audio: &AudioSettings,
    ) -> Result<Vec<u8>, String> {
        self.calls.lock().push(text.to_string());

        if let Some(needle) = self.fail_when_contains.lock().as_deref() {
            if text.contains(needle) {
                return Err("quota exceeded".to_string());
            }
        }

        Ok(fake_audio(text))
    }

    async fn list_voices(&self, language_prefix: &str) -> Result<Vec<VoiceInfo>, String> {
        Ok(vec![VoiceInfo {
            name: format!("{}-Fake-A", language_prefix),
            language_codes: vec![language_prefix.to_string()],
            gender: "NEUTRAL".to_string(),
        }])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcatMode {
    Working,
    Missing,
    Failing,
}

/// Concatenation tool that joins file bytes in order
pub struct FakeConcatenator {
    mode: ConcatMode,
    calls: Mutex<Vec<Vec<PathBuf>>>,
}

impl FakeConcatenator {
    pub fn new(mode: ConcatMode) -> Self {
        Self {
            mode,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<PathBuf>> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl AudioConcatenator for FakeConcatenator {
    fn is_available(&self) -> bool {
        self.mode != ConcatMode::Missing
    }

    async fn concatenate(&self, inputs: &[PathBuf], output: &Path) -> Result<(), String> {
        self.calls.lock().push(inputs.to_vec());

        if self.mode == ConcatMode::Failing {
            return Err("Invalid data found when processing input".to_string());
        }

        let mut combined = Vec::new();
        for input in inputs {
            let bytes = tokio::fs::read(input).await.map_err(|e| e.to_string())?;
            combined.extend(bytes);
        }
        tokio::fs::write(output, combined)
            .await
            .map_err(|e| e.to_string())
    }
}
