use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("nothing to synthesize: {0}")]
    EmptyContent(String),
    #[error("synthesis failed: {0}")]
    Synthesis(String),
    #[error("assembly failed: {0}")]
    Assembly(String),
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::EmptyContent(msg) => AppError::EmptyContent(msg),
            TtsServiceError::Synthesis(msg) => AppError::SynthesisFailure(msg),
            TtsServiceError::Assembly(msg) => AppError::AssemblyFailure(msg),
            TtsServiceError::Dependency(msg) => AppError::Internal(msg),
            TtsServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
