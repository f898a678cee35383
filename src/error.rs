use std::process::ExitCode;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("No readable text found in {0}")]
    EmptyContent(String),

    #[error("Speech synthesis failed: {0}")]
    SynthesisFailure(String),

    #[error("Audio assembly failed: {0}")]
    AssemblyFailure(String),

    #[error("Configuration error: {0}")]
    ConfigIO(String),

    #[error("Playback failed: {0}")]
    Playback(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Process exit status reported for this error
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::DocumentNotFound(_) => 2,
            Self::EmptyContent(_) => 3,
            Self::SynthesisFailure(_) => 4,
            Self::AssemblyFailure(_) => 5,
            Self::ConfigIO(_)
            | Self::Playback(_)
            | Self::BadRequest(_)
            | Self::Internal(_) => 1,
        }
    }

    /// Log the error and convert it into the process exit code
    pub fn into_exit_code(self) -> ExitCode {
        let status = self.exit_status();
        tracing::error!(
            error = %self,
            exit_status = status,
            "Run failed"
        );

        ExitCode::from(status)
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
