pub mod audio_cache_repository;
pub mod document_repository;
pub mod google_tts_repository;
pub mod openai_tts_repository;
pub mod polly_tts_repository;
pub mod tts_repository;

pub use audio_cache_repository::AudioCacheRepository;
pub use document_repository::DocumentRepository;
pub use google_tts_repository::{GoogleCredentials, GoogleTtsRepository};
pub use openai_tts_repository::OpenAiTtsRepository;
pub use polly_tts_repository::PollyTtsRepository;
pub use tts_repository::TtsRepository;
