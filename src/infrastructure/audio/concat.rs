use super::executable::find_executable_or_override;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use uuid::Uuid;

/// Joins same-format audio files into one, in order
#[async_trait]
pub trait AudioConcatenator: Send + Sync {
    /// Whether the underlying tool can be used at all
    fn is_available(&self) -> bool;

    /// Concatenate `inputs` in order into `output`
    async fn concatenate(&self, inputs: &[PathBuf], output: &Path) -> Result<(), String>;
}

/// Lossless concatenation with the ffmpeg concat demuxer (`-c copy`)
pub struct FfmpegConcatenator {
    ffmpeg: Option<PathBuf>,
}

impl FfmpegConcatenator {
    pub fn new(ffmpeg: Option<PathBuf>) -> Self {
        Self { ffmpeg }
    }

    /// Locate ffmpeg, honouring an explicit binary from configuration
    pub fn detect(override_bin: Option<&str>) -> Self {
        let ffmpeg = find_executable_or_override(override_bin, "ffmpeg");
        match &ffmpeg {
            Some(path) => tracing::debug!(ffmpeg = %path.display(), "Concatenation tool found"),
            None => tracing::debug!("ffmpeg not found on PATH"),
        }
        Self::new(ffmpeg)
    }

    /// Body of the concat demuxer list file
    pub fn input_list(inputs: &[PathBuf]) -> String {
        inputs
            .iter()
            .map(|path| {
                let absolute = if path.is_absolute() {
                    path.clone()
                } else {
                    std::env::current_dir()
                        .map(|dir| dir.join(path))
                        .unwrap_or_else(|_| path.clone())
                };
                // concat lists quote with '...'; an embedded quote becomes '\''
                let quoted = absolute.to_string_lossy().replace('\'', r"'\''");
                format!("file '{}'\n", quoted)
            })
            .collect()
    }
}

#[async_trait]
impl AudioConcatenator for FfmpegConcatenator {
    fn is_available(&self) -> bool {
        self.ffmpeg.is_some()
    }

    async fn concatenate(&self, inputs: &[PathBuf], output: &Path) -> Result<(), String> {
        let ffmpeg = self
            .ffmpeg
            .as_ref()
            .ok_or_else(|| "ffmpeg is not available".to_string())?;

        let list_dir = output.parent().unwrap_or_else(|| Path::new("."));
        let list_path = list_dir.join(format!(".concat-{}.txt", Uuid::new_v4()));

        tokio::fs::write(&list_path, Self::input_list(inputs))
            .await
            .map_err(|e| format!("failed to write concat list {}: {}", list_path.display(), e))?;

        tracing::info!(
            inputs = inputs.len(),
            output = %output.display(),
            "Combining audio segments with ffmpeg"
        );

        let result = Command::new(ffmpeg)
            .args(["-hide_banner", "-loglevel", "error", "-f", "concat", "-safe", "0", "-i"])
            .arg(&list_path)
            .args(["-c", "copy", "-y"])
            .arg(output)
            .output()
            .await;

        let _ = tokio::fs::remove_file(&list_path).await;

        let result = result.map_err(|e| format!("failed to run ffmpeg: {}", e))?;
        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(format!("ffmpeg exited with {}: {}", result.status, stderr.trim()));
        }

        Ok(())
    }
}
