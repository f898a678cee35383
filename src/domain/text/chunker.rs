use once_cell::sync::Lazy;
use regex::Regex;

/// Default per-request budget, leaving headroom under the backend limit
pub const DEFAULT_MAX_CHUNK_BYTES: usize = 4500;

/// Hard limit on encoded input bytes per backend request
pub const BACKEND_MAX_INPUT_BYTES: usize = 5000;

static SENTENCE_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

/// An ordered, sentence-aligned slice of normalized text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-based position in the document
    pub index: usize,
    pub text: String,
}

impl Segment {
    /// Zero-padded index, so labels sort in document order
    pub fn label(&self) -> String {
        format!("{:03}", self.index)
    }

    /// UTF-8 encoded length of the segment text
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }
}

/// Split text after `.`, `!` or `?` followed by whitespace.
/// The punctuation stays with its sentence; the whitespace is dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY_RE.find_iter(text) {
        // terminal punctuation is a single ASCII byte
        let end = boundary.start() + 1;
        sentences.push(&text[start..end]);
        start = boundary.end();
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}

/// Split text into chunks of whole sentences, each at most `max_bytes` long.
///
/// Sentences are joined with a single space. A sentence that alone exceeds the
/// budget is kept whole in its own chunk rather than being cut mid-sentence.
/// Empty input yields no chunks.
pub fn split_into_chunks(text: &str, max_bytes: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    if text.len() <= max_bytes {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        let joined_len = if current.is_empty() {
            sentence.len()
        } else {
            current.len() + 1 + sentence.len()
        };

        // Seal the current chunk before it would overflow
        if joined_len > max_bytes && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(sentence);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Chunk text and number the pieces from 1
pub fn plan_segments(text: &str, max_bytes: usize) -> Vec<Segment> {
    split_into_chunks(text, max_bytes)
        .into_iter()
        .enumerate()
        .map(|(i, text)| Segment { index: i + 1, text })
        .collect()
}
