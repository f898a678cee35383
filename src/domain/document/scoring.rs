use super::model::CandidateMatch;
use std::path::{Component, Path, PathBuf};

const EXACT_STEM_SCORE: i32 = 100;
const PARTIAL_STEM_SCORE: i32 = 50;
const PREFERRED_ROOT_SCORE: i32 = 20;

/// Score a candidate path against a case-insensitive query.
///
/// Exact stem match beats a substring match, files under the preferred root
/// get a bonus, and every path separator costs one point so shallower files
/// win.
pub fn score_candidate(query: &str, candidate: &Path, preferred_root: Option<&Path>) -> i32 {
    let query = query.to_lowercase();
    let stem = candidate
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let mut score = 0;

    if stem == query {
        score += EXACT_STEM_SCORE;
    } else if stem.contains(&query) {
        score += PARTIAL_STEM_SCORE;
    }

    let candidate = strip_current_dir(candidate);
    if let Some(root) = preferred_root {
        if candidate.starts_with(strip_current_dir(root)) {
            score += PREFERRED_ROOT_SCORE;
        }
    }

    score - separator_count(&candidate)
}

/// Rank candidates best-first. Equal scores keep their input order.
pub fn rank_candidates(
    query: &str,
    candidates: Vec<PathBuf>,
    preferred_root: Option<&Path>,
) -> Vec<CandidateMatch> {
    let mut ranked: Vec<CandidateMatch> = candidates
        .into_iter()
        .map(|path| {
            let score = score_candidate(query, &path, preferred_root);
            CandidateMatch { path, score }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

fn separator_count(path: &Path) -> i32 {
    let components = path.components().count() as i32;
    (components - 1).max(0)
}

fn strip_current_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
