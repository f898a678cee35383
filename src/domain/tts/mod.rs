pub mod assembler;
pub mod cache_key;
pub mod error;
pub mod model;
pub mod service;
pub mod synthesizer;

pub use assembler::{Assembler, AssemblyOutcome};
pub use cache_key::CacheKey;
pub use error::TtsServiceError;
pub use model::{
    AudioEncoding, AudioSettings, SsmlGender, SynthesisOutcome, VoiceInfo, VoiceSettings,
};
pub use service::{TtsService, TtsServiceApi};
pub use synthesizer::{SynthesizedArtifact, Synthesizer};
