use clap::Parser;
use std::path::PathBuf;

/// Read markdown documents aloud with a cloud text-to-speech backend
#[derive(Debug, Parser)]
#[command(name = "markdown-tts", version)]
#[command(about = "Convert markdown documents to speech and play them")]
pub struct Cli {
    /// Document name (fuzzy matched) or path to a .md file
    #[arg(required_unless_present_any = ["list_documents", "list_voices"])]
    pub input: Option<String>,

    /// Voice name overriding the settings file
    #[arg(long)]
    pub voice: Option<String>,

    /// Synthesize and save without playing
    #[arg(long)]
    pub no_play: bool,

    /// Locate and normalize only; no backend calls
    #[arg(long, visible_alias = "test-mode")]
    pub dry_run: bool,

    /// List every markdown document under the content roots
    #[arg(long, visible_alias = "list-characters")]
    pub list_documents: bool,

    /// List voices for the configured language
    #[arg(long)]
    pub list_voices: bool,

    /// Settings file (defaults to TTS_CONFIG_PATH)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
