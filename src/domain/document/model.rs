use serde::Serialize;
use std::path::PathBuf;

/// A markdown document loaded for reading
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub raw_text: String,
    pub normalized_text: String,
}

impl Document {
    /// Encoded length of the normalized text
    pub fn byte_len(&self) -> usize {
        self.normalized_text.len()
    }

    pub fn char_count(&self) -> usize {
        self.normalized_text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized_text.trim().is_empty()
    }
}

/// A located file and its ranking score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMatch {
    pub path: PathBuf,
    pub score: i32,
}

/// A known document, as shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentEntry {
    pub name: String,
    pub path: PathBuf,
}
