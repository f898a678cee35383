use super::assembler::{Assembler, AssemblyOutcome};
use super::error::TtsServiceError;
use super::model::{AudioSettings, SynthesisOutcome, VoiceInfo, VoiceSettings};
use super::synthesizer::Synthesizer;
use crate::domain::text::{plan_segments, Segment};
use crate::infrastructure::audio::AudioConcatenator;
use crate::infrastructure::repositories::{AudioCacheRepository, TtsRepository};
use async_trait::async_trait;
use std::sync::Arc;

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    cache_repo: Arc<AudioCacheRepository>,
    synthesizer: Synthesizer,
    assembler: Assembler,
    max_chunk_bytes: usize,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        cache_repo: Arc<AudioCacheRepository>,
        concatenator: Arc<dyn AudioConcatenator>,
        audio: AudioSettings,
        max_chunk_bytes: usize,
    ) -> Self {
        let synthesizer = Synthesizer::new(tts_repo.clone(), cache_repo.clone(), audio);

        Self {
            tts_repo,
            cache_repo,
            synthesizer,
            assembler: Assembler::new(concatenator),
            max_chunk_bytes,
        }
    }

    pub fn provider(&self) -> &'static str {
        self.tts_repo.provider()
    }

    /// Segments a text would be split into, without synthesizing anything
    pub fn plan(&self, text: &str) -> Vec<Segment> {
        plan_segments(text, self.max_chunk_bytes)
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Turn normalized text into one playable audio file.
    ///
    /// This operation:
    /// - Returns the cached artifact when the whole text was spoken before
    /// - Synthesizes short text in a single backend call
    /// - Splits long text into sentence-aligned segments, synthesizes them in
    ///   order and concatenates the results
    ///
    /// The first failing segment aborts the run.
    async fn synthesize_text(
        &self,
        text: &str,
        voice: &VoiceSettings,
    ) -> Result<SynthesisOutcome, TtsServiceError>;

    /// Voices the backend offers for a language prefix such as `en`
    async fn list_voices(&self, language_prefix: &str) -> Result<Vec<VoiceInfo>, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize_text(
        &self,
        text: &str,
        voice: &VoiceSettings,
    ) -> Result<SynthesisOutcome, TtsServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TtsServiceError::EmptyContent(
                "text is empty after normalization".to_string(),
            ));
        }

        let encoding = self.synthesizer.audio().audio_encoding;
        let document_key = self.synthesizer.cache_key(text, voice);

        if let Some(path) = self.cache_repo.lookup(&document_key, encoding).await {
            tracing::info!(
                cache_key = %document_key,
                path = %path.display(),
                "Using cached document audio"
            );
            return Ok(SynthesisOutcome::Cached { path });
        }

        if text.len() <= self.max_chunk_bytes {
            let artifact = self.synthesizer.synthesize(text, voice).await?;
            return Ok(SynthesisOutcome::Synthesized {
                path: artifact.path,
            });
        }

        let segments = self.plan(text);
        if segments.is_empty() {
            return Err(TtsServiceError::EmptyContent(
                "no chunks produced".to_string(),
            ));
        }

        tracing::info!(
            provider = self.provider(),
            text_bytes = text.len(),
            segments = segments.len(),
            max_chunk_bytes = self.max_chunk_bytes,
            "Long text, synthesizing in segments"
        );

        let mut artifacts = Vec::with_capacity(segments.len());
        for segment in &segments {
            tracing::info!(
                segment = %segment.label(),
                total = segments.len(),
                bytes = segment.byte_len(),
                "Synthesizing segment"
            );

            let artifact = self
                .synthesizer
                .synthesize(&segment.text, voice)
                .await
                .inspect_err(|e| {
                    tracing::error!(
                        segment = %segment.label(),
                        error = %e,
                        "Segment synthesis failed, aborting"
                    );
                })?;
            artifacts.push(artifact);
        }

        if artifacts.len() == 1 {
            return Ok(SynthesisOutcome::Synthesized {
                path: artifacts.remove(0).path,
            });
        }

        // First-segment-only output never goes under the document key, so a
        // later run retries the full merge instead of hitting the cache
        let output = if self.assembler.can_concatenate() {
            self.cache_repo.path_for(&document_key, encoding)
        } else {
            self.cache_repo.degraded_path_for(&document_key, encoding)
        };

        let outcome = match self.assembler.assemble(&artifacts, &output).await? {
            AssemblyOutcome::Concatenated { path, segments } => {
                self.cache_repo.remove_degraded(&document_key, encoding).await;
                SynthesisOutcome::Assembled { path, segments }
            }
            AssemblyOutcome::FirstSegmentOnly {
                path,
                segments,
                dropped_segments,
            } => SynthesisOutcome::AssembledDegraded {
                path,
                segments,
                dropped_segments,
            },
        };

        tracing::info!(
            cache_key = %document_key,
            path = %outcome.path().display(),
            degraded = outcome.is_degraded(),
            "Document audio assembled"
        );

        Ok(outcome)
    }

    async fn list_voices(&self, language_prefix: &str) -> Result<Vec<VoiceInfo>, TtsServiceError> {
        self.tts_repo
            .list_voices(language_prefix)
            .await
            .map_err(TtsServiceError::Dependency)
    }
}
