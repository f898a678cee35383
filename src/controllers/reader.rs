use std::path::PathBuf;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    domain::{
        document::{DocumentEntry, DocumentService, DocumentServiceApi},
        text::plan_segments,
        tts::{SynthesisOutcome, TtsService, TtsServiceApi, VoiceInfo},
    },
    error::{AppError, AppResult},
    infrastructure::{audio::AudioPlayer, config::TtsSettings},
};

/// Characters of normalized text shown by a dry run
const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    pub voice: Option<String>,
    pub dry_run: bool,
    pub no_play: bool,
}

/// Result of one `read` command
#[derive(Debug, Clone, PartialEq)]
pub enum ReadReport {
    DryRun {
        source: PathBuf,
        char_count: usize,
        byte_len: usize,
        preview: String,
        planned_segments: usize,
    },
    /// Audio is ready but was not played
    Saved {
        source: PathBuf,
        outcome: SynthesisOutcome,
    },
    Played {
        source: PathBuf,
        outcome: SynthesisOutcome,
        save_audio: bool,
    },
}

pub struct ReaderController {
    document_service: Arc<DocumentService>,
    /// None when no backend could be configured; only dry runs and
    /// document listing work then
    tts_service: Option<Arc<TtsService>>,
    player: Arc<AudioPlayer>,
    settings: TtsSettings,
    max_chunk_bytes: usize,
}

impl ReaderController {
    pub fn new(
        document_service: Arc<DocumentService>,
        tts_service: Option<Arc<TtsService>>,
        player: Arc<AudioPlayer>,
        settings: TtsSettings,
        max_chunk_bytes: usize,
    ) -> Self {
        Self {
            document_service,
            tts_service,
            player,
            settings,
            max_chunk_bytes,
        }
    }

    fn tts_service(&self) -> AppResult<&TtsService> {
        self.tts_service.as_deref().ok_or_else(|| {
            AppError::ConfigIO("no text-to-speech backend is configured".to_string())
        })
    }

    /// Locate a document, speak it and play (or save) the result
    pub async fn read(&self, input: &str, options: &ReadOptions) -> AppResult<ReadReport> {
        let span = tracing::info_span!("read", run_id = %Uuid::new_v4(), input = input);
        self.run(input, options).instrument(span).await
    }

    async fn run(&self, input: &str, options: &ReadOptions) -> AppResult<ReadReport> {
        let source = self.document_service.resolve(input).await?;
        let document = self.document_service.load(&source).await?;

        if document.is_empty() {
            return Err(AppError::EmptyContent(source.display().to_string()));
        }

        if options.dry_run {
            let planned_segments = plan_segments(&document.normalized_text, self.max_chunk_bytes).len();
            tracing::info!(
                path = %source.display(),
                bytes = document.byte_len(),
                planned_segments = planned_segments,
                "Dry run, skipping synthesis"
            );

            return Ok(ReadReport::DryRun {
                char_count: document.char_count(),
                byte_len: document.byte_len(),
                preview: document.normalized_text.chars().take(PREVIEW_CHARS).collect(),
                planned_segments,
                source,
            });
        }

        let voice = match &options.voice {
            Some(name) => self.settings.voice.with_name(name),
            None => self.settings.voice.clone(),
        };

        let outcome = self
            .tts_service()?
            .synthesize_text(&document.normalized_text, &voice)
            .await?;

        if let SynthesisOutcome::AssembledDegraded {
            segments,
            dropped_segments,
            ..
        } = &outcome
        {
            tracing::warn!(
                segments = segments,
                dropped_segments = dropped_segments,
                "Audio contains only the first segment; install ffmpeg for full output"
            );
        }

        if options.no_play || !self.settings.playback.auto_play {
            return Ok(ReadReport::Saved { source, outcome });
        }

        self.player
            .play(outcome.path())
            .await
            .map_err(AppError::Playback)?;

        Ok(ReadReport::Played {
            source,
            outcome,
            save_audio: self.settings.playback.save_audio,
        })
    }

    pub async fn list_documents(&self) -> AppResult<Vec<DocumentEntry>> {
        Ok(self.document_service.list_documents().await?)
    }

    /// Voices for the language of the configured voice
    pub async fn list_voices(&self) -> AppResult<Vec<VoiceInfo>> {
        let prefix = self.settings.voice.language_prefix();
        Ok(self.tts_service()?.list_voices(prefix).await?)
    }
}
