use crate::ignore::IgnorePatterns;
use crate::utils::{display_path, relative_path};
use crate::MergeError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// A listed file: the path relative to the scanned root, and its forward-slash rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub display: String,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = display_path(&path);
        FileEntry { path, display }
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }
}

impl fmt::Display for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl PartialEq<&str> for FileEntry {
    fn eq(&self, other: &&str) -> bool {
        self.display == *other
    }
}

/// Lists every file under `root` not excluded by `ignore`.
///
/// Entries are visited in file-name order within each directory, so repeated walks of an
/// unchanged tree produce identical indices. Any unreadable entry aborts the walk.
pub fn list_files(root: &Path, ignore: &IgnorePatterns) -> Result<Vec<FileEntry>, MergeError> {
    let meta = fs::metadata(root)
        .map_err(|e| MergeError::WalkError(format!("{}: {}", root.display(), e)))?;
    if !meta.is_dir() {
        return Err(MergeError::WalkError(format!(
            "{}: not a directory",
            root.display()
        )));
    }

    debug!("Walking {:?}", root);
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let rel_path = relative_path(root, entry.path()).ok_or_else(|| {
            MergeError::WalkError(format!("{} is outside {}", entry.path().display(), root.display()))
        })?;
        let file = FileEntry::new(rel_path);
        if ignore.should_ignore(file.as_str()) {
            continue;
        }
        trace!("Found file: {}", file);
        files.push(file);
    }

    debug!("Listed {} files", files.len());
    Ok(files)
}
