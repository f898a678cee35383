use super::error::DocumentServiceError;
use super::model::{CandidateMatch, Document, DocumentEntry};
use super::scoring::rank_candidates;
use crate::domain::text::normalize;
use crate::infrastructure::repositories::DocumentRepository;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const MARKDOWN_EXTENSION: &str = "md";

pub struct DocumentService {
    document_repo: Arc<DocumentRepository>,
}

impl DocumentService {
    pub fn new(document_repo: Arc<DocumentRepository>) -> Self {
        Self { document_repo }
    }
}

#[async_trait]
pub trait DocumentServiceApi: Send + Sync {
    /// Find the best-matching document for a short name.
    ///
    /// Returns `Ok(None)` when nothing matches; that is a normal outcome.
    async fn locate(&self, name: &str) -> Result<Option<CandidateMatch>, DocumentServiceError>;

    /// Resolve CLI input: an existing `.md` path is used as is, anything else
    /// is located by name
    async fn resolve(&self, input: &str) -> Result<PathBuf, DocumentServiceError>;

    async fn list_documents(&self) -> Result<Vec<DocumentEntry>, DocumentServiceError>;

    /// Read a document and normalize it into speakable text
    async fn load(&self, path: &Path) -> Result<Document, DocumentServiceError>;
}

#[async_trait]
impl DocumentServiceApi for DocumentService {
    async fn locate(&self, name: &str) -> Result<Option<CandidateMatch>, DocumentServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DocumentServiceError::Invalid(
                "Document name cannot be empty".to_string(),
            ));
        }

        let candidates = self
            .document_repo
            .find_candidates(name)
            .map_err(DocumentServiceError::Dependency)?;

        let ranked = rank_candidates(name, candidates, self.document_repo.preferred_root());

        let Some(best) = ranked.into_iter().next() else {
            tracing::info!(query = name, "No document matched");
            return Ok(None);
        };

        tracing::info!(
            query = name,
            path = %best.path.display(),
            score = best.score,
            "Document located"
        );

        Ok(Some(CandidateMatch {
            path: self.document_repo.resolve(&best.path),
            score: best.score,
        }))
    }

    async fn resolve(&self, input: &str) -> Result<PathBuf, DocumentServiceError> {
        let direct = PathBuf::from(input);
        let is_markdown = direct
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION));

        if is_markdown && direct.is_file() {
            return Ok(direct);
        }

        self.locate(input)
            .await?
            .map(|found| found.path)
            .ok_or_else(|| DocumentServiceError::NotFound(input.to_string()))
    }

    async fn list_documents(&self) -> Result<Vec<DocumentEntry>, DocumentServiceError> {
        self.document_repo
            .list_documents()
            .map_err(DocumentServiceError::Dependency)
    }

    async fn load(&self, path: &Path) -> Result<Document, DocumentServiceError> {
        if !path.is_file() {
            return Err(DocumentServiceError::NotFound(path.display().to_string()));
        }

        let raw_text = self
            .document_repo
            .read_to_string(path)
            .await
            .map_err(DocumentServiceError::Dependency)?;

        let normalized_text = normalize(&raw_text);

        tracing::info!(
            path = %path.display(),
            original_length = raw_text.len(),
            normalized_length = normalized_text.len(),
            "Document normalized"
        );

        Ok(Document {
            path: path.to_path_buf(),
            raw_text,
            normalized_text,
        })
    }
}
