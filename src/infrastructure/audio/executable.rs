use std::path::{Path, PathBuf};

/// Find an executable by name on `PATH`, or accept an explicit path
pub fn find_executable(bin: &str) -> Option<PathBuf> {
    if bin.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(bin);
        return path.is_file().then_some(path);
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(bin))
        .find(|candidate| candidate.is_file())
}

/// Prefer an explicit override when it resolves, otherwise search `PATH`
pub fn find_executable_or_override(override_bin: Option<&str>, default_bin: &str) -> Option<PathBuf> {
    if let Some(bin) = override_bin {
        if let Some(path) = find_executable(bin) {
            return Some(path);
        }
        tracing::warn!(bin = bin, fallback = default_bin, "Configured executable not found");
    }
    find_executable(default_bin)
}

/// File name of an executable path, used to pick player arguments
pub fn executable_name(path: &Path) -> &str {
    path.file_name().and_then(|s| s.to_str()).unwrap_or("")
}
