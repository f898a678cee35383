use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum DocumentServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("document not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<DocumentServiceError> for AppError {
    fn from(err: DocumentServiceError) -> Self {
        match err {
            DocumentServiceError::Invalid(msg) => AppError::BadRequest(msg),
            DocumentServiceError::NotFound(name) => AppError::DocumentNotFound(name),
            DocumentServiceError::Dependency(msg) => AppError::Internal(msg),
            DocumentServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
