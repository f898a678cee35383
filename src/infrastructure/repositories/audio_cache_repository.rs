use crate::domain::tts::{AudioEncoding, CacheKey};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Directory of immutable, content-addressed audio artifacts.
///
/// Artifacts are never expired. Writes go to a uniquely named temporary file
/// that is renamed into place, so a failed write never leaves a truncated
/// entry under a real key.
pub struct AudioCacheRepository {
    cache_dir: PathBuf,
}

impl AudioCacheRepository {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Create the cache directory if it is missing
    pub async fn ensure_dir(&self) -> Result<(), String> {
        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| format!("failed to create cache dir {}: {}", self.cache_dir.display(), e))
    }

    pub fn path_for(&self, key: &CacheKey, encoding: AudioEncoding) -> PathBuf {
        self.cache_dir.join(key.file_name(encoding))
    }

    /// Where first-segment-only output for this key is written
    pub fn degraded_path_for(&self, key: &CacheKey, encoding: AudioEncoding) -> PathBuf {
        self.cache_dir.join(key.degraded_file_name(encoding))
    }

    /// Drop stale first-segment-only output once the full audio exists
    pub async fn remove_degraded(&self, key: &CacheKey, encoding: AudioEncoding) {
        let path = self.degraded_path_for(key, encoding);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed degraded audio"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                error = %e,
                path = %path.display(),
                "Could not remove degraded audio"
            ),
        }
    }

    /// Path of an existing artifact for this key
    pub async fn lookup(&self, key: &CacheKey, encoding: AudioEncoding) -> Option<PathBuf> {
        let path = self.path_for(key, encoding);
        match tokio::fs::try_exists(&path).await {
            Ok(true) => Some(path),
            Ok(false) => None,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %path.display(),
                    "Could not check cache entry, treating as miss"
                );
                None
            }
        }
    }

    /// Persist audio under its key and return the artifact path
    pub async fn store(
        &self,
        key: &CacheKey,
        encoding: AudioEncoding,
        audio: &[u8],
    ) -> Result<PathBuf, String> {
        self.ensure_dir().await?;

        let path = self.path_for(key, encoding);
        let partial = partial_path(&path);

        if let Err(e) = tokio::fs::write(&partial, audio).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(format!("failed to write {}: {}", partial.display(), e));
        }

        if let Err(e) = tokio::fs::rename(&partial, &path).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(format!("failed to move audio into {}: {}", path.display(), e));
        }

        tracing::debug!(
            cache_key = %key,
            audio_size = audio.len(),
            path = %path.display(),
            "Audio cached"
        );

        Ok(path)
    }
}

/// Unique hidden sibling used while a file is being written.
/// The original extension stays last so tools can infer the format.
pub fn partial_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".partial-{}-{}", Uuid::new_v4(), file_name))
}
