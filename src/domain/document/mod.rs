pub mod error;
pub mod model;
pub mod scoring;
pub mod service;

pub use error::DocumentServiceError;
pub use model::{CandidateMatch, Document, DocumentEntry};
pub use scoring::{rank_candidates, score_candidate};
pub use service::{DocumentService, DocumentServiceApi};
