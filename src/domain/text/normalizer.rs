//! Markdown to speakable prose.
//!
//! Normalization is an ordered pipeline of independent string stages. The order
//! is part of the contract: links must be unwrapped after images are removed
//! (an image embed is a link with a leading `!`), emphasis is stripped before
//! code is handled, and whitespace is collapsed before table delimiters go.

use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[.*?\]\(.*?\)").expect("valid regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid regex"));
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s+").expect("valid regex"));
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));
static FENCED_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));
static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]*)`").expect("valid regex"));
static RULE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^---+$").expect("valid regex"));
static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));
static HORIZONTAL_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("valid regex"));
static TABLE_CELL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|[^|\n]*\|").expect("valid regex"));

/// A single named normalization step
pub struct Stage {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// Normalization stages in application order
pub const STAGES: &[Stage] = &[
    Stage { name: "images", apply: strip_images },
    Stage { name: "links", apply: unwrap_links },
    Stage { name: "headings", apply: strip_headings },
    Stage { name: "emphasis", apply: strip_emphasis },
    Stage { name: "code", apply: strip_code },
    Stage { name: "rules", apply: strip_rules },
    Stage { name: "whitespace", apply: collapse_whitespace },
    Stage { name: "tables", apply: strip_table_cells },
];

/// Remove image embeds entirely
pub fn strip_images(text: &str) -> String {
    IMAGE_RE.replace_all(text, "").into_owned()
}

/// Replace `[text](url)` with `text`
pub fn unwrap_links(text: &str) -> String {
    LINK_RE.replace_all(text, "${1}").into_owned()
}

/// Drop leading `#` markers, keeping the heading text
pub fn strip_headings(text: &str) -> String {
    HEADING_RE.replace_all(text, "").into_owned()
}

/// Drop `**bold**` and `*italic*` markers, keeping the inner text
pub fn strip_emphasis(text: &str) -> String {
    let without_bold = BOLD_RE.replace_all(text, "${1}");
    ITALIC_RE.replace_all(&without_bold, "${1}").into_owned()
}

/// Remove fenced blocks with their contents and unwrap inline code
pub fn strip_code(text: &str) -> String {
    let without_blocks = FENCED_CODE_RE.replace_all(text, "");
    INLINE_CODE_RE.replace_all(&without_blocks, "${1}").into_owned()
}

/// Remove horizontal rule lines
pub fn strip_rules(text: &str) -> String {
    RULE_RE.replace_all(text, "").into_owned()
}

/// Collapse blank-line runs to one blank line and space runs to one space
pub fn collapse_whitespace(text: &str) -> String {
    let paragraphs = BLANK_LINES_RE.replace_all(text, "\n\n");
    HORIZONTAL_SPACE_RE.replace_all(&paragraphs, " ").into_owned()
}

/// Remove `| cell |` table delimiters
pub fn strip_table_cells(text: &str) -> String {
    TABLE_CELL_RE.replace_all(text, "").into_owned()
}

/// Run every stage once, in order, and trim the result
pub fn normalize_pass(text: &str) -> String {
    let mut current = text.to_string();
    for stage in STAGES {
        current = (stage.apply)(&current);
    }
    current.trim().to_string()
}

/// Convert markdown into plain text suitable for speech synthesis.
///
/// A later stage can expose markup for an earlier one (`# # Title`, or a
/// removed table cell leaving two adjacent spaces), so passes repeat until the
/// text is stable. No stage lengthens its input, which bounds the loop and
/// makes the result idempotent.
pub fn normalize(text: &str) -> String {
    let mut current = normalize_pass(text);
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
