use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use markdown_tts::controllers::{ReadOptions, ReadReport, ReaderController};
use markdown_tts::domain::document::DocumentService;
use markdown_tts::domain::tts::{SynthesisOutcome, TtsService};
use markdown_tts::error::{AppError, AppResult};
use markdown_tts::infrastructure::audio::{AudioPlayer, FfmpegConcatenator};
use markdown_tts::infrastructure::cli::Cli;
use markdown_tts::infrastructure::config::{Config, LogFormat, TtsProvider, TtsSettings};
use markdown_tts::infrastructure::repositories::{
    AudioCacheRepository, DocumentRepository, GoogleCredentials, GoogleTtsRepository,
    OpenAiTtsRepository, PollyTtsRepository, TtsRepository,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(AppError::ConfigIO(e.to_string()).exit_status());
        }
    };

    // Initialize logging
    init_logging(&config);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.into_exit_code()
        }
    }
}

async fn run(cli: Cli, config: Config) -> AppResult<()> {
    let settings_path = cli.config.clone().unwrap_or_else(|| config.config_path.clone());
    let settings = TtsSettings::load_or_create(&settings_path);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    let document_repo = Arc::new(DocumentRepository::new(
        config.search_base.clone(),
        config.content_roots.clone(),
    ));
    let cache_repo = Arc::new(AudioCacheRepository::new(config.cache_dir.clone()));

    // 2. Instantiate services
    let document_service = Arc::new(DocumentService::new(document_repo));
    let tts_service = match build_tts_repository(&config).await {
        Ok(tts_repo) => Some(Arc::new(TtsService::new(
            tts_repo,
            cache_repo,
            Arc::new(FfmpegConcatenator::detect(config.ffmpeg_bin.as_deref())),
            settings.audio_config.clone(),
            config.max_chunk_bytes,
        ))),
        Err(e) => {
            tracing::warn!(error = %e, "Text-to-speech backend unavailable");
            None
        }
    };

    // 3. Instantiate controller
    let player = Arc::new(AudioPlayer::detect(config.player_bin.as_deref()));
    let controller = ReaderController::new(
        document_service,
        tts_service,
        player,
        settings,
        config.max_chunk_bytes,
    );

    if cli.list_documents {
        print_documents(&controller).await?;
        return Ok(());
    }

    if cli.list_voices {
        let voices = controller.list_voices().await?;
        println!("Available voices ({}):", voices.len());
        for voice in voices {
            println!(
                "  {} [{}] {}",
                voice.name,
                voice.language_codes.join(", "),
                voice.gender
            );
        }
        return Ok(());
    }

    let input = cli
        .input
        .ok_or_else(|| AppError::BadRequest("a document name or path is required".to_string()))?;

    let options = ReadOptions {
        voice: cli.voice,
        dry_run: cli.dry_run,
        no_play: cli.no_play,
    };

    match controller.read(&input, &options).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(AppError::DocumentNotFound(name)) => {
            eprintln!("No document matches '{}'.", name);
            if let Err(e) = print_documents(&controller).await {
                tracing::warn!(error = %e, "Could not list documents");
            }
            Err(AppError::DocumentNotFound(name))
        }
        Err(e) => Err(e),
    }
}

async fn build_tts_repository(config: &Config) -> Result<Arc<dyn TtsRepository>, String> {
    let repository: Arc<dyn TtsRepository> = match config.provider {
        TtsProvider::Google => {
            let credentials = match (&config.google_api_key, &config.google_access_token) {
                (Some(key), _) => GoogleCredentials::ApiKey(key.clone()),
                (None, Some(token)) => GoogleCredentials::AccessToken(token.clone()),
                (None, None) => {
                    return Err(
                        "set GOOGLE_TTS_API_KEY or GOOGLE_ACCESS_TOKEN for the google provider"
                            .to_string(),
                    )
                }
            };
            Arc::new(GoogleTtsRepository::new(credentials))
        }
        TtsProvider::Polly => {
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            tracing::debug!(region = ?aws_config.region(), "AWS configuration loaded");

            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
            Arc::new(PollyTtsRepository::new(polly_client))
        }
        TtsProvider::OpenAi => {
            if std::env::var("OPENAI_API_KEY").is_err() {
                return Err("set OPENAI_API_KEY for the openai provider".to_string());
            }
            Arc::new(OpenAiTtsRepository::new(
                Arc::new(async_openai::Client::new()),
                config.openai_model.clone(),
                config.openai_voice.clone(),
            ))
        }
    };

    tracing::info!(provider = repository.provider(), "Text-to-speech backend ready");
    Ok(repository)
}

async fn print_documents(controller: &ReaderController) -> AppResult<()> {
    let documents = controller.list_documents().await?;
    println!("Available documents ({}):", documents.len());
    for document in documents {
        println!("  {:<24} {}", document.name, document.path.display());
    }
    Ok(())
}

fn print_report(report: &ReadReport) {
    match report {
        ReadReport::DryRun {
            source,
            char_count,
            byte_len,
            preview,
            planned_segments,
        } => {
            println!("Document: {}", source.display());
            println!("Normalized text: {} characters, {} bytes", char_count, byte_len);
            println!("Planned segments: {}", planned_segments);
            println!("Preview: {}", preview);
        }
        ReadReport::Saved { source, outcome } => {
            println!("Document: {}", source.display());
            println!("{}", describe_outcome(outcome));
            println!("Audio saved to {}", outcome.path().display());
        }
        ReadReport::Played {
            source,
            outcome,
            save_audio,
        } => {
            println!("Document: {}", source.display());
            println!("{}", describe_outcome(outcome));
            if *save_audio {
                println!("Audio saved to {}", outcome.path().display());
            }
        }
    }
}

fn describe_outcome(outcome: &SynthesisOutcome) -> String {
    match outcome {
        SynthesisOutcome::Cached { .. } => "Using cached audio".to_string(),
        SynthesisOutcome::Synthesized { .. } => "Audio synthesized".to_string(),
        SynthesisOutcome::Assembled { segments, .. } => {
            format!("Audio assembled from {} segments", segments)
        }
        SynthesisOutcome::AssembledDegraded {
            segments,
            dropped_segments,
            ..
        } => format!(
            "Warning: ffmpeg not found, audio has 1 of {} segments ({} dropped)",
            segments, dropped_segments
        ),
    }
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "markdown_tts=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "markdown_tts=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
