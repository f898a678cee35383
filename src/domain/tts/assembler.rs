use super::error::TtsServiceError;
use super::synthesizer::SynthesizedArtifact;
use crate::infrastructure::audio::AudioConcatenator;
use crate::infrastructure::repositories::audio_cache_repository::partial_path;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyOutcome {
    /// Every segment was concatenated, in order
    Concatenated { path: PathBuf, segments: usize },
    /// No concatenation tool: the output is the first segment alone.
    /// Known limitation, later segments are dropped.
    FirstSegmentOnly {
        path: PathBuf,
        segments: usize,
        dropped_segments: usize,
    },
}

/// Merges per-segment artifacts into one file
pub struct Assembler {
    concatenator: Arc<dyn AudioConcatenator>,
}

impl Assembler {
    pub fn new(concatenator: Arc<dyn AudioConcatenator>) -> Self {
        Self { concatenator }
    }

    /// Whether a full merge is possible, as opposed to first-segment-only output
    pub fn can_concatenate(&self) -> bool {
        self.concatenator.is_available()
    }

    /// Merge `segments` (in index order) into `output`.
    ///
    /// After a successful merge, segments synthesized by this run are removed.
    /// Segments that were already cached stay. First-segment-only output
    /// keeps every segment so a later full merge needs no backend calls. When
    /// the tool runs but fails, everything is left in place for diagnosis.
    pub async fn assemble(
        &self,
        segments: &[SynthesizedArtifact],
        output: &Path,
    ) -> Result<AssemblyOutcome, TtsServiceError> {
        let first = segments.first().ok_or_else(|| {
            TtsServiceError::Assembly("no segment artifacts to assemble".to_string())
        })?;

        let partial = partial_path(output);
        let paths: Vec<PathBuf> = segments.iter().map(|s| s.path.clone()).collect();

        let outcome = if self.can_concatenate() {
            if let Err(e) = self.concatenator.concatenate(&paths, &partial).await {
                let _ = tokio::fs::remove_file(&partial).await;
                tracing::error!(
                    error = %e,
                    segments = segments.len(),
                    "Audio concatenation failed, keeping segment files"
                );
                return Err(TtsServiceError::Assembly(e));
            }

            AssemblyOutcome::Concatenated {
                path: output.to_path_buf(),
                segments: segments.len(),
            }
        } else {
            let dropped_segments = segments.len() - 1;
            tracing::warn!(
                segments = segments.len(),
                dropped_segments = dropped_segments,
                "No concatenation tool found, using first segment only"
            );

            tokio::fs::copy(&first.path, &partial).await.map_err(|e| {
                TtsServiceError::Assembly(format!(
                    "failed to copy {}: {}",
                    first.path.display(),
                    e
                ))
            })?;

            AssemblyOutcome::FirstSegmentOnly {
                path: output.to_path_buf(),
                segments: segments.len(),
                dropped_segments,
            }
        };

        if let Err(e) = tokio::fs::rename(&partial, output).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(TtsServiceError::Assembly(format!(
                "failed to move audio into {}: {}",
                output.display(),
                e
            )));
        }

        if let AssemblyOutcome::Concatenated { .. } = outcome {
            remove_synthesized_segments(segments, output).await;
        }

        Ok(outcome)
    }
}

/// Best-effort removal of the segment files this run created
async fn remove_synthesized_segments(segments: &[SynthesizedArtifact], output: &Path) {
    let mut removable: Vec<&Path> = segments
        .iter()
        .filter(|segment| !segment.from_cache && segment.path.as_path() != output)
        .map(|segment| segment.path.as_path())
        .collect();
    removable.sort();
    removable.dedup();

    for path in removable {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::debug!(
                error = %e,
                path = %path.display(),
                "Could not remove segment file"
            );
        }
    }
}
