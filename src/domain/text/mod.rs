pub mod chunker;
pub mod normalizer;

pub use chunker::{
    plan_segments, split_into_chunks, split_sentences, Segment, BACKEND_MAX_INPUT_BYTES,
    DEFAULT_MAX_CHUNK_BYTES,
};
pub use normalizer::normalize;
