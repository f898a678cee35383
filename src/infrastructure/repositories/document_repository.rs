use crate::domain::document::DocumentEntry;
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

/// `*` never crosses a separator and hidden entries are skipped, like a shell glob
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Filesystem access to the markdown content tree.
///
/// All paths returned by searches are relative to the search base, so ranking
/// sees the same depth for a file regardless of where the tool was started.
pub struct DocumentRepository {
    search_base: PathBuf,
    content_roots: Vec<PathBuf>,
}

impl DocumentRepository {
    pub fn new(search_base: PathBuf, content_roots: Vec<PathBuf>) -> Self {
        let content_roots = content_roots.iter().map(|root| without_current_dir(root)).collect();
        Self {
            search_base,
            content_roots,
        }
    }

    /// The first configured content root ranks higher than anything else
    pub fn preferred_root(&self) -> Option<&Path> {
        self.content_roots.first().map(PathBuf::as_path)
    }

    /// Absolute (or base-relative) location of a search result
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.search_base.join(relative)
    }

    /// Glob patterns for a query: exact and substring stem matches under each
    /// content root, then the same two anywhere below the search base
    pub fn search_patterns(&self, query: &str) -> Vec<String> {
        let query = Pattern::escape(query);
        let mut patterns = Vec::with_capacity(self.content_roots.len() * 2 + 2);

        for root in &self.content_roots {
            let root = Pattern::escape(&root.to_string_lossy());
            patterns.push(format!("{root}/**/{query}.md"));
            patterns.push(format!("{root}/**/*{query}*.md"));
        }
        patterns.push(format!("**/{query}.md"));
        patterns.push(format!("**/*{query}*.md"));

        patterns
    }

    /// Deduplicated candidate files for a query, in path order
    pub fn find_candidates(&self, query: &str) -> Result<Vec<PathBuf>, String> {
        let mut found = BTreeSet::new();
        for pattern in self.search_patterns(&query.to_lowercase()) {
            found.extend(self.glob_relative(&pattern)?);
        }

        tracing::debug!(
            query = query,
            candidate_count = found.len(),
            "Document search completed"
        );

        Ok(found.into_iter().collect())
    }

    /// Every markdown file under the content roots, sorted by path
    pub fn list_documents(&self) -> Result<Vec<DocumentEntry>, String> {
        let mut found = BTreeSet::new();
        for root in &self.content_roots {
            let root = Pattern::escape(&root.to_string_lossy());
            found.extend(self.glob_relative(&format!("{root}/**/*.md"))?);
        }

        Ok(found
            .into_iter()
            .map(|path| DocumentEntry {
                name: path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                path,
            })
            .collect())
    }

    pub async fn read_to_string(&self, path: &Path) -> Result<String, String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))
    }

    fn glob_relative(&self, pattern: &str) -> Result<Vec<PathBuf>, String> {
        let base = Pattern::escape(&self.search_base.to_string_lossy());
        let full_pattern = format!("{}/{}", base.trim_end_matches('/'), pattern);

        let entries = glob::glob_with(&full_pattern, MATCH_OPTIONS)
            .map_err(|e| format!("invalid search pattern {full_pattern}: {e}"))?;

        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => {
                    let relative = path
                        .strip_prefix(&self.search_base)
                        .map(Path::to_path_buf)
                        .unwrap_or(path);
                    paths.push(without_current_dir(&relative));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable path during document search");
                }
            }
        }

        Ok(paths)
    }
}

fn without_current_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
