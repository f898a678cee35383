use super::executable::{executable_name, find_executable, find_executable_or_override};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Players tried in order when none is configured
const PLAYERS: &[&str] = &["mpv", "mpg123", "ffplay", "mplayer", "paplay", "aplay"];

/// Plays a finished artifact through an external player process
pub struct AudioPlayer {
    player: Option<PathBuf>,
}

impl AudioPlayer {
    pub fn new(player: Option<PathBuf>) -> Self {
        Self { player }
    }

    /// Use the configured player if it exists, otherwise the first one on PATH
    pub fn detect(preferred: Option<&str>) -> Self {
        let player = find_executable_or_override(preferred, PLAYERS[0])
            .or_else(|| PLAYERS[1..].iter().find_map(|bin| find_executable(bin)));

        if let Some(path) = &player {
            tracing::debug!(player = %path.display(), "Audio player selected");
        }

        Self::new(player)
    }

    /// Arguments for playing `audio` in the foreground without a video window
    pub fn player_args(player: &Path, audio: &Path) -> Vec<String> {
        let audio = audio.to_string_lossy().into_owned();
        match executable_name(player) {
            "mpv" => vec!["--no-video".to_string(), "--term-osd-bar".to_string(), audio],
            "ffplay" => vec![
                "-nodisp".to_string(),
                "-autoexit".to_string(),
                "-loglevel".to_string(),
                "error".to_string(),
                audio,
            ],
            _ => vec![audio],
        }
    }

    /// Play the file, waiting until the player exits
    pub async fn play(&self, audio: &Path) -> Result<(), String> {
        let player = self.player.as_ref().ok_or_else(|| {
            format!(
                "no audio player found; install one of: {}",
                PLAYERS.join(", ")
            )
        })?;

        tracing::info!(
            player = %player.display(),
            audio = %audio.display(),
            "Starting playback"
        );

        let status = Command::new(player)
            .args(Self::player_args(player, audio))
            .status()
            .await
            .map_err(|e| format!("failed to launch {}: {}", player.display(), e))?;

        if !status.success() {
            return Err(format!("{} exited with {}", player.display(), status));
        }

        Ok(())
    }
}
