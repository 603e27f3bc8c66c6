use crate::MergeError;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Rewrites the platform separator to `/`. A no-op where `/` is already the separator.
pub fn normalize_path(path: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        path.to_owned()
    } else {
        path.replace(MAIN_SEPARATOR, "/")
    }
}

/// Path of `path` relative to `root`.
pub fn relative_path(root: &Path, path: &Path) -> Option<PathBuf> {
    path.strip_prefix(root).ok().map(Path::to_path_buf)
}

/// Forward-slash rendering of a relative path, joined component by component.
pub fn display_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Final segment of a forward-slash path.
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Reads a text file, mapping a missing file to `Ok(None)`. Invalid UTF-8 is replaced, not rejected.
pub fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Checks the user-supplied project directory.
pub fn validate_root(input: &str) -> Result<PathBuf, MergeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MergeError::InvalidDirectory(trimmed.to_owned()));
    }
    let root = PathBuf::from(trimmed);
    match fs::metadata(&root) {
        Ok(meta) if meta.is_dir() => Ok(root),
        _ => Err(MergeError::InvalidDirectory(trimmed.to_owned())),
    }
}
